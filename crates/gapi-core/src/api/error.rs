use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error {status}: {message}")]
    ServerError { status: StatusCode, message: String },

    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error bodies from the server look like `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Pick the most useful description of a failed response: the server's
    /// `message` field, then the raw body, then the status reason.
    fn describe(status: StatusCode, body: &str) -> String {
        if let Ok(ErrorBody {
            message: Some(message),
        }) = serde_json::from_str::<ErrorBody>(body)
        {
            if !message.is_empty() {
                return message;
            }
        }
        let trimmed = body.trim();
        if !trimmed.is_empty() {
            return Self::truncate_body(trimmed);
        }
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string())
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = Self::describe(status, body);
        match status.as_u16() {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            412 => ApiError::PreconditionFailed(message),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError { status, message },
            _ => ApiError::UnexpectedStatus { status, message },
        }
    }

    /// HTTP status behind this error, if it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::BadRequest(_) => Some(StatusCode::BAD_REQUEST),
            ApiError::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            ApiError::AccessDenied(_) => Some(StatusCode::FORBIDDEN),
            ApiError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ApiError::PreconditionFailed(_) => Some(StatusCode::PRECONDITION_FAILED),
            ApiError::RateLimited => Some(StatusCode::TOO_MANY_REQUESTS),
            ApiError::ServerError { status, .. } | ApiError::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            ApiError::Network(e) => e.status(),
            ApiError::Decode(_) | ApiError::InvalidUrl(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_json_message() {
        let body = r#"{"message":"The dashboard has been changed by someone else",
                       "status":"version-mismatch"}"#;
        let err = ApiError::from_status(StatusCode::PRECONDITION_FAILED, body);
        match err {
            ApiError::PreconditionFailed(msg) => {
                assert_eq!(msg, "The dashboard has been changed by someone else")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_status_falls_back_to_body_then_reason() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "no such thing\n");
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "no such thing"));

        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "");
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Bad Request"));

        // An empty JSON message is not useful either
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"message":""}"#);
        assert!(matches!(err, ApiError::Unauthorized(ref m) if m == r#"{"message":""}"#));
    }

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            ApiError::RateLimited
        ));
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "");
        assert!(matches!(
            err,
            ApiError::ServerError { ref message, .. } if message == "Bad Gateway"
        ));
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(err.to_string(), "Server error 502 Bad Gateway: Bad Gateway");
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, ""),
            ApiError::AccessDenied(_)
        ));
        let err = ApiError::from_status(StatusCode::CONFLICT, r#"{"message":"exists"}"#);
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
        assert_eq!(err.to_string(), "Unexpected status 409 Conflict: exists");
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(MAX_ERROR_BODY_LENGTH + 20);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &long);
        match err {
            ApiError::ServerError { message: msg, .. } => {
                assert!(msg.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
                assert!(msg.ends_with("(truncated, 520 total bytes)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Never split a multi-byte character
        let wide = "é".repeat(MAX_ERROR_BODY_LENGTH);
        let truncated = ApiError::truncate_body(&wide);
        assert!(truncated.contains("truncated"));
    }
}
