use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use crate::error::AppError;
use crate::response::{BaseResponse, ErrorResponse};
use crate::AppState;

use super::dto::{
    CatalogResponse, CatalogSuccessResponse, ExtractContentRequest, ExtractContentResponse,
    ExtractContentSuccessResponse, GenerateHashtagsRequest, GenerateHashtagsResponse,
    GenerateHashtagsSuccessResponse,
};
use super::model::{GenerationRequest, DEFAULT_HASHTAG_COUNT, MAX_HASHTAG_COUNT, MIN_HASHTAG_COUNT};
use super::platform::{Category, Platform};

/// Generate hashtags
///
/// Builds a prompt from the submitted content and count, asks the AI service
/// for hashtags, and returns them in model order.
#[utoipa::path(
    post,
    path = "/api/hashtags/generate",
    tag = "Hashtag",
    request_body = GenerateHashtagsRequest,
    responses(
        (status = 200, description = "Hashtags generated", body = GenerateHashtagsSuccessResponse),
        (status = 400, description = "Invalid content or count", body = ErrorResponse),
        (status = 429, description = "Too many requests", body = ErrorResponse),
        (status = 502, description = "AI service failed", body = ErrorResponse),
        (status = 503, description = "AI service not configured or busy", body = ErrorResponse),
        (status = 504, description = "AI service timed out", body = ErrorResponse)
    )
)]
pub async fn generate_hashtags(
    State(state): State<AppState>,
    request: Result<Json<GenerateHashtagsRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<GenerateHashtagsResponse>>, AppError> {
    let Json(request) = request?;

    tracing::info!(
        content_length = request.content.len(),
        count = request.count,
        platform = ?request.platform,
        category = ?request.category,
        "Generate request received"
    );

    request.validate()?;
    let generation = GenerationRequest::try_from(&request)?;
    tracing::debug!("Request validation passed");

    let hashtags = state.hashtag_service.generate(&generation).await?;

    tracing::info!(
        requested = generation.count(),
        returned = hashtags.len(),
        "Hashtags generated successfully"
    );

    Ok(Json(BaseResponse::success(GenerateHashtagsResponse::new(
        &generation,
        hashtags,
    ))))
}

/// Extract page content
///
/// Fetches a web page and condenses it into content suitable for generation.
#[utoipa::path(
    post,
    path = "/api/hashtags/extract",
    tag = "Hashtag",
    request_body = ExtractContentRequest,
    responses(
        (status = 200, description = "Content extracted", body = ExtractContentSuccessResponse),
        (status = 400, description = "Invalid URL", body = ErrorResponse),
        (status = 422, description = "Page could not be read", body = ErrorResponse)
    )
)]
pub async fn extract_content(
    State(state): State<AppState>,
    request: Result<Json<ExtractContentRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<ExtractContentResponse>>, AppError> {
    let Json(request) = request?;
    request.validate()?;

    let extracted = state.content_extractor.extract(&request.url).await?;

    Ok(Json(BaseResponse::success(extracted.into())))
}

/// Platform and category catalog
#[utoipa::path(
    get,
    path = "/api/hashtags/platforms",
    tag = "Hashtag",
    responses(
        (status = 200, description = "Catalog", body = CatalogSuccessResponse)
    )
)]
pub async fn list_platforms() -> Json<BaseResponse<CatalogResponse>> {
    Json(BaseResponse::success(CatalogResponse {
        platforms: Platform::ALL.into_iter().map(Into::into).collect(),
        categories: Category::ALL.into_iter().map(Into::into).collect(),
        min_count: MIN_HASHTAG_COUNT,
        max_count: MAX_HASHTAG_COUNT,
        default_count: DEFAULT_HASHTAG_COUNT,
    }))
}
