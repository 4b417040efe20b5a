pub mod daily_routes;

pub use daily_routes::*;
