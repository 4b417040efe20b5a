mod app_error;
mod de;
pub mod forecast;
mod request_context;
pub mod routes;
mod startup;
pub mod tmd;
mod utils;
mod validation;

pub use app_error::{AppError, ErrorCode, ErrorResponse};
pub use request_context::{RequestContext, CORRELATION_ID_HEADER};
pub use routes::*;
pub use startup::*;
pub use utils::*;
pub use validation::ValidationErrors;
