use crate::AppError;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use log::error;
use std::convert::Infallible;
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Per-request values threaded explicitly through handlers, usecase and upstream client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub correlation_id: String,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::now_v7().to_string(),
        }
    }

    /// Reuses the caller's correlation id when one was sent, otherwise mints a fresh one
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Self {
                correlation_id: id.to_owned(),
            })
            .unwrap_or_default()
    }

    /// Logs a failure tagged with this request's correlation id and hands it back for the response.
    pub fn report(&self, err: impl Into<AppError>) -> AppError {
        let err = err.into();
        error!("[{}] error handling request: {}", self.correlation_id, err);
        err
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // the logging middleware normally inserts the context; fall back for routers built without it
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(|| RequestContext::from_headers(&parts.headers)))
    }
}
