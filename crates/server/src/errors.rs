use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use service::errors::{BatchFailure, ServiceError, MSG_INVALID_CAR};
use thiserror::Error;
use tracing::debug;

/// JSON 错误响应：`{ "error": "..." }`，批量创建失败时为 `{ "errors": [...] }`
#[derive(Debug)]
pub enum JsonApiError {
    Message { status: StatusCode, error: String },
    Batch(Vec<BatchFailure>),
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self::Message { status, error: error.into() }
    }

    /// Malformed or incomplete request body.
    pub fn invalid_body() -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_INVALID_CAR)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Message { status, .. } => *status,
            Self::Batch(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation | ServiceError::DuplicateId(_) => {
                Self::new(StatusCode::BAD_REQUEST, e.to_string())
            }
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            ServiceError::Batch(failures) => Self::Batch(failures),
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Message { error, .. } => {
                debug!(%status, %error, "request rejected");
                (status, Json(json!({ "error": error }))).into_response()
            }
            Self::Batch(errors) => {
                debug!(%status, failed = errors.len(), "batch rejected");
                (status, Json(json!({ "errors": errors }))).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_http_status() {
        assert_eq!(JsonApiError::from(ServiceError::Validation).status(), StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(ServiceError::DuplicateId("1".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(ServiceError::not_found("1")).status(), StatusCode::NOT_FOUND);
        assert_eq!(JsonApiError::from(ServiceError::Batch(vec![])).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn messages_are_kept_verbatim() {
        match JsonApiError::from(ServiceError::DuplicateId("1".into())) {
            JsonApiError::Message { error, .. } => assert_eq!(error, "ID já existe"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
