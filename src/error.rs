use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::response::ErrorResponse;

/// Application-wide error type.
///
/// Variants fall into three families: request validation, missing
/// configuration, and upstream (AI service) failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Malformed request body: {0}")]
    JsonParseFailed(String),

    #[error("{0}")]
    ConfigurationError(String),

    #[error("AI service error: {0}")]
    UpstreamError(String),

    #[error("AI service did not respond in time")]
    UpstreamTimeout,

    #[error("AI service rejected the configured credential")]
    UpstreamAuthError,

    #[error("AI service rate limit reached")]
    UpstreamRateLimited,

    #[error("AI service returned no hashtags")]
    UpstreamEmptyResponse,

    #[error("Could not read content from the page: {0}")]
    ExtractionFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Error code carried in the response envelope
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) | AppError::JsonParseFailed(_) => "COMMON400",
            AppError::ConfigurationError(_) => "HASHTAG_001",
            AppError::UpstreamError(_) => "HASHTAG_002",
            AppError::UpstreamTimeout => "HASHTAG_003",
            AppError::UpstreamAuthError => "HASHTAG_004",
            AppError::UpstreamRateLimited => "HASHTAG_005",
            AppError::UpstreamEmptyResponse => "HASHTAG_006",
            AppError::ExtractionFailed(_) => "HASHTAG_007",
            AppError::Internal(_) => "COMMON500",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigurationError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamAuthError => StatusCode::BAD_GATEWAY,
            AppError::UpstreamRateLimited => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamEmptyResponse => StatusCode::BAD_GATEWAY,
            AppError::ExtractionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the failure came from the AI service
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamError(_)
                | AppError::UpstreamTimeout
                | AppError::UpstreamAuthError
                | AppError::UpstreamRateLimited
                | AppError::UpstreamEmptyResponse
        )
    }

    /// User-facing message.
    ///
    /// Upstream failures never leak provider details; they only invite a retry.
    pub fn message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("Malformed request body: {msg}"),
            AppError::ConfigurationError(msg) => msg.clone(),
            AppError::UpstreamAuthError => {
                "The AI service rejected the configured API key. Check GEMINI_API_KEY.".to_string()
            }
            AppError::UpstreamTimeout => {
                "The AI service took too long to respond. Please try again.".to_string()
            }
            AppError::UpstreamRateLimited => {
                "The AI service is busy right now. Please try again in a moment.".to_string()
            }
            AppError::UpstreamError(_) | AppError::UpstreamEmptyResponse => {
                "Could not generate hashtags. Please try again.".to_string()
            }
            AppError::ExtractionFailed(msg) => {
                format!("Could not read content from the page: {msg}")
            }
            AppError::Internal(_) => "Internal server error.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        match &self {
            AppError::Internal(_) | AppError::ConfigurationError(_) => {
                tracing::error!(code, error = %self, "Request failed");
            }
            _ if self.is_upstream() => {
                tracing::warn!(code, error = %self, "Upstream request failed");
            }
            _ => {
                tracing::info!(code, error = %self, "Request rejected");
            }
        }

        (status, Json(ErrorResponse::new(code, self.message()))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}
