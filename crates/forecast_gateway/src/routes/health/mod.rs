pub mod healthz;

pub use healthz::*;
