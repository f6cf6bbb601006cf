use axum::http::StatusCode;
use thiserror::Error;

/// Domain-level failures raised by `AppData` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown vendor {0}")]
    UnknownVendor(i64),
    #[error("unknown item {0}")]
    UnknownItem(i64),
    #[error("unknown log entry {0}")]
    UnknownLog(i64),
    #[error("vendor '{0}' already exists")]
    DuplicateVendor(String),
    #[error("name must not be empty")]
    EmptyName,
    #[error("no fields to update")]
    EmptyUpdate,
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::UnknownVendor(_)
            | StoreError::UnknownItem(_)
            | StoreError::UnknownLog(_) => StatusCode::NOT_FOUND,
            StoreError::DuplicateVendor(_)
            | StoreError::EmptyName
            | StoreError::EmptyUpdate
            | StoreError::InvalidQuantity => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Failures seen by the tally client. Network problems and backend
/// rejections both end up as a transient toast; neither mutates tally state
/// beyond whatever step had already been confirmed.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend error {status}: {message}")]
    Backend { status: u16, message: String },
}
