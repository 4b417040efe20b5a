pub mod health;
pub mod weathers;

pub use health::*;
pub use weathers::*;
