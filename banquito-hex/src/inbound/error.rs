//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use banquito_types::{CrudError, DomainError};

/// Error returned by every handler: a status plus the `{"error", "code"}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: u16,
    message: String,
}

impl ApiError {
    /// Uses the CRUD code as the status when it is a valid HTTP error status,
    /// otherwise falls back to 400.
    pub fn from_crud(err: CrudError) -> Self {
        let status = Some(err.code())
            .filter(|code| (400..=999).contains(code))
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::BAD_REQUEST);

        Self {
            status,
            code: err.code(),
            message: err.message().to_string(),
        }
    }

    /// A failed create is always reported as 400; the CRUD code stays in the body.
    pub fn rejected(err: CrudError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: err.code(),
            message: err.message().to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: StatusCode::BAD_REQUEST.as_u16(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: CrudError::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<CrudError> for ApiError {
    fn from(err: CrudError) -> Self {
        ApiError::from_crud(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message,
            "code": self.code
        });

        (self.status, Json(body)).into_response()
    }
}
