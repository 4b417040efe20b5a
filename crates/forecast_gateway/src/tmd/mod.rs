pub mod client;
pub mod models;

pub use client::{Error, ForecastClient, TmdClient, DEFAULT_TIMEOUT};
pub use models::*;
