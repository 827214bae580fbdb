//! Generation backend errors
//!
//! Every variant leaves the session usable; the caller decides whether the
//! same answer or `generate mom` is worth sending again.

use std::time::Duration;
use thiserror::Error;

/// Failures from one backend call
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The call succeeded but carried no usable text
    #[error("Backend returned an empty response")]
    EmptyResponse,

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing API key or unusable provider settings
    #[error("LLM configuration error: {0}")]
    Config(String),
}

impl LlmError {
    /// Whether sending the same request again has a chance of succeeding
    ///
    /// Server-side and transport failures are; anything the user has to fix
    /// in their setup (key, model name, request shape) is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } => true,
            LlmError::ApiError { status, .. } => *status >= 500,
            LlmError::Network(_) => true,
            LlmError::Timeout(_) => true,
            LlmError::EmptyResponse => true,
            LlmError::InvalidResponse(_) => false,
            LlmError::Json(_) => false,
            LlmError::Config(_) => false,
        }
    }

    /// Get the retry duration if this is a rate limit error
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LlmError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overloaded_backend_mid_interview_can_be_resent() {
        // Provider outage while the consultant is answering
        let err = LlmError::ApiError {
            status: 529,
            message: "overloaded_error".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_rate_limit_reports_wait() {
        let err = LlmError::RateLimited {
            retry_after: Duration::from_secs(20),
        };
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(20)));
        assert_eq!(err.to_string(), "Rate limited, retry after 20s");
    }

    #[test]
    fn test_blank_minutes_can_be_regenerated() {
        // Sampling at a non-zero temperature, so a second attempt can differ
        assert!(LlmError::EmptyResponse.is_retryable());
        assert_eq!(LlmError::EmptyResponse.to_string(), "Backend returned an empty response");
    }

    #[test]
    fn test_setup_problems_are_not_retried() {
        let rejected_key = LlmError::ApiError {
            status: 401,
            message: "invalid x-api-key".to_string(),
        };
        let unknown_model = LlmError::ApiError {
            status: 404,
            message: "model: gpt-4o-minii".to_string(),
        };
        let missing_key = LlmError::Config("Set the OPENAI_API_KEY environment variable.".to_string());

        assert!(!rejected_key.is_retryable());
        assert!(!unknown_model.is_retryable());
        assert!(!missing_key.is_retryable());
        assert_eq!(rejected_key.to_string(), "API error 401: invalid x-api-key");
    }

    #[test]
    fn test_slow_minutes_call_times_out_retryable() {
        let err = LlmError::Timeout(Duration::from_millis(120_000));
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Timeout after 120s");
    }

    #[test]
    fn test_malformed_body_is_not_retried() {
        let err: LlmError = serde_json::from_str::<serde_json::Value>("{\"choices\": [").unwrap_err().into();
        assert!(matches!(err, LlmError::Json(_)));
        assert!(!err.is_retryable());
    }
}
