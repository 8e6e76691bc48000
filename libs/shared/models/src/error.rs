use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response at '{path}': {reason}")]
    MalformedResponse { path: String, reason: String },

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::MalformedResponse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn assertion(message: impl Into<String>) -> Self {
        ApiError::Assertion(message.into())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::malformed("$", err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
