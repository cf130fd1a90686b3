use serde::Serialize;
use utoipa::ToSchema;

/// Common response envelope
///
/// ```json
/// {
///   "isSuccess": true,
///   "code": "COMMON200",
///   "message": "Success.",
///   "result": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<T: Serialize> {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<T>,
}

impl<T: Serialize> BaseResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            is_success: true,
            code: "COMMON200".to_string(),
            message: "Success.".to_string(),
            result: Some(result),
        }
    }
}

impl BaseResponse<()> {
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            is_success: false,
            code: code.to_string(),
            message: message.to_string(),
            result: None,
        }
    }
}

/// Error response envelope
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always false for errors
    #[schema(example = false)]
    pub is_success: bool,

    #[schema(example = "HASHTAG_002")]
    pub code: String,

    #[schema(example = "Could not generate hashtags. Please try again.")]
    pub message: String,

    pub result: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
            result: None,
        }
    }
}
