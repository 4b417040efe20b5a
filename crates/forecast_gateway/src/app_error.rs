use crate::{forecast, ValidationErrors};
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Request(#[from] anyhow::Error),
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    Forecast(#[from] forecast::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Request(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forecast(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Envelope written for every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    Conflict,
    UnprocessableEntity,
    InternalServerError,
}

impl From<StatusCode> for ErrorCode {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ErrorCode::Unauthorized,
            StatusCode::FORBIDDEN => ErrorCode::Forbidden,
            StatusCode::CONFLICT => ErrorCode::Conflict,
            StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::UnprocessableEntity,
            s if s.is_client_error() => ErrorCode::BadRequest,
            _ => ErrorCode::InternalServerError,
        }
    }
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            code: status.into(),
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorResponse::new(status, self.to_string());
        if let AppError::Validation(errors) = &self {
            body = body.with_errors(errors.details());
        }
        (status, Json(body)).into_response()
    }
}
