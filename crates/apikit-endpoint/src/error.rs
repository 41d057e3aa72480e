//! Error types for apikit endpoints

use thiserror::Error;

/// Errors that can occur while decoding, invoking or encoding an endpoint
#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EndpointError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        EndpointError::BadRequest(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        EndpointError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        EndpointError::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        EndpointError::Upstream(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        EndpointError::Unavailable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        EndpointError::Internal(msg.into())
    }

    /// Convert the error to an HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            EndpointError::BadRequest(_) | EndpointError::Validation(_) => 400,
            EndpointError::NotFound(_) => 404,
            EndpointError::Upstream(_) => 502,
            EndpointError::Unavailable(_) => 503,
            EndpointError::Serialization(_) | EndpointError::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(EndpointError::bad_request("x").status_code(), 400);
        assert_eq!(EndpointError::validation("x").status_code(), 400);
        assert_eq!(EndpointError::not_found("x").status_code(), 404);
        assert_eq!(EndpointError::upstream("x").status_code(), 502);
        assert_eq!(EndpointError::unavailable("x").status_code(), 503);
        assert_eq!(EndpointError::internal("x").status_code(), 500);
    }

    #[test]
    fn test_serialization_error_maps_to_500() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = EndpointError::from(err);
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_display_includes_message() {
        let err = EndpointError::upstream("inventory service timed out");
        assert_eq!(err.to_string(), "Upstream error: inventory service timed out");
    }
}
