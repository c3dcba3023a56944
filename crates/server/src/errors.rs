use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use models::errors::ModelError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Error envelope: `{"success": false, "message": ..., "error"?: ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, message: message.into(), detail }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "un-authorized", None)
    }

    /// Storage failures are logged; the client only sees a generic message.
    fn internal(detail: String) -> Self {
        error!(err = %detail, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error", None)
    }

    fn bad_request(detail: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "request failed", Some(detail))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { success: false, message: &self.message, error: self.detail.as_deref() };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg, None),
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, e.to_string(), None),
            AuthError::NotFound => Self::new(StatusCode::NOT_FOUND, e.to_string(), None),
            AuthError::InvalidUsername | AuthError::InvalidPassword | AuthError::Unauthorized => {
                Self::new(StatusCode::UNAUTHORIZED, e.to_string(), None)
            }
            AuthError::HashError(_) | AuthError::Repository(_) => Self::internal(e.to_string()),
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) | ServiceError::Model(ModelError::Validation(msg)) => {
                Self::new(StatusCode::BAD_REQUEST, msg, None)
            }
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg, None),
            ServiceError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, msg, None),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg, None),
            ServiceError::Model(ModelError::Duplicate(detail)) => {
                Self::new(StatusCode::CONFLICT, "record already exists", Some(detail))
            }
            ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_)) => Self::internal(e.to_string()),
        }
    }
}
