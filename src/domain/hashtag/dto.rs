use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::extractor::ExtractedContent;
use super::model::{ContentSource, GenerationRequest, HashtagList, DEFAULT_HASHTAG_COUNT};
use super::platform::{count_advice, Category, Platform};
use crate::error::AppError;

fn default_count() -> u32 {
    DEFAULT_HASHTAG_COUNT
}

/// Hashtag generation request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateHashtagsRequest {
    /// Keywords, caption or extracted page content (1 ~ 5000 chars)
    #[validate(length(
        min = 1,
        max = 5000,
        message = "Content must be between 1 and 5000 characters."
    ))]
    #[schema(example = "sustainable travel")]
    pub content: String,

    /// Number of hashtags to generate (5 ~ 20)
    #[serde(default = "default_count")]
    #[validate(range(min = 5, max = 20, message = "Count must be between 5 and 20."))]
    #[schema(example = 10, minimum = 5, maximum = 20)]
    pub count: u32,

    /// Target platform (optional)
    #[serde(default)]
    pub platform: Option<Platform>,

    /// Content category (optional)
    #[serde(default)]
    pub category: Option<Category>,

    /// Where the content came from
    #[serde(default)]
    pub source_type: ContentSource,
}

impl TryFrom<&GenerateHashtagsRequest> for GenerationRequest {
    type Error = AppError;

    fn try_from(dto: &GenerateHashtagsRequest) -> Result<Self, Self::Error> {
        Ok(GenerationRequest::new(&dto.content, dto.count)?
            .with_platform(dto.platform)
            .with_category(dto.category)
            .with_source(dto.source_type))
    }
}

/// Hashtag generation result DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateHashtagsResponse {
    /// Hashtags in model order
    #[schema(example = json!(["#travel", "#ecotourism"]))]
    pub hashtags: Vec<String>,

    /// Space-joined hashtags for the editable text area
    #[schema(example = "#travel #ecotourism")]
    pub hashtags_text: String,

    /// Number of hashtags returned
    #[schema(example = 2)]
    pub count: usize,

    #[schema(example = 10)]
    pub requested_count: u32,

    pub platform: Option<Platform>,

    pub category: Option<Category>,

    /// Platform count advice, present when the count is outside the optimal range
    #[schema(example = "Instagram performs best with 8-12 hashtags for maximum reach!")]
    pub tip: Option<String>,
}

impl GenerateHashtagsResponse {
    pub fn new(request: &GenerationRequest, hashtags: HashtagList) -> Self {
        let tip = request
            .platform()
            .and_then(|platform| count_advice(platform, request.count()));

        Self {
            hashtags_text: hashtags.to_text(),
            count: hashtags.len(),
            hashtags: hashtags.into_vec(),
            requested_count: request.count(),
            platform: request.platform(),
            category: request.category(),
            tip,
        }
    }
}

/// Page content extraction request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractContentRequest {
    /// Page URL; `https://` is assumed when no scheme is given
    #[validate(length(min = 1, max = 2048, message = "URL is required."))]
    #[schema(example = "https://example.com/blog/post")]
    pub url: String,
}

/// Page content extraction result DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractContentResponse {
    /// Condensed page text, ready to submit as generation content
    pub content: String,
    pub title: String,
    pub description: String,
    /// Normalized URL that was fetched
    pub url: String,
}

impl From<ExtractedContent> for ExtractContentResponse {
    fn from(extracted: ExtractedContent) -> Self {
        Self {
            content: extracted.content,
            title: extracted.title,
            description: extracted.description,
            url: extracted.url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    pub platform: Platform,
    #[schema(example = "Instagram")]
    pub name: String,
    #[schema(example = 8)]
    pub optimal_min: u32,
    #[schema(example = 12)]
    pub optimal_max: u32,
    pub style: String,
    pub requirements: String,
}

impl From<Platform> for PlatformInfo {
    fn from(platform: Platform) -> Self {
        let (optimal_min, optimal_max) = platform.optimal_range();
        Self {
            platform,
            name: platform.display_name().to_string(),
            optimal_min,
            optimal_max,
            style: platform.style().to_string(),
            requirements: platform.requirements().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub category: Category,
    #[schema(example = "Travel")]
    pub name: String,
    pub keywords: Vec<String>,
}

impl From<Category> for CategoryInfo {
    fn from(category: Category) -> Self {
        Self {
            category,
            name: category.display_name().to_string(),
            keywords: category.keywords().iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Options the page offers for personalization
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub platforms: Vec<PlatformInfo>,
    pub categories: Vec<CategoryInfo>,
    #[schema(example = 5)]
    pub min_count: u32,
    #[schema(example = 20)]
    pub max_count: u32,
    #[schema(example = 10)]
    pub default_count: u32,
}

/// Generation success envelope (OpenAPI schema)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateHashtagsSuccessResponse {
    #[schema(example = true)]
    pub is_success: bool,
    #[schema(example = "COMMON200")]
    pub code: String,
    #[schema(example = "Success.")]
    pub message: String,
    pub result: GenerateHashtagsResponse,
}

/// Extraction success envelope (OpenAPI schema)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractContentSuccessResponse {
    #[schema(example = true)]
    pub is_success: bool,
    #[schema(example = "COMMON200")]
    pub code: String,
    #[schema(example = "Success.")]
    pub message: String,
    pub result: ExtractContentResponse,
}

/// Catalog success envelope (OpenAPI schema)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSuccessResponse {
    #[schema(example = true)]
    pub is_success: bool,
    #[schema(example = "COMMON200")]
    pub code: String,
    #[schema(example = "Success.")]
    pub message: String,
    pub result: CatalogResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_should_default_count_and_source() {
        let request: GenerateHashtagsRequest =
            serde_json::from_value(json!({ "content": "coffee" })).unwrap();

        assert_eq!(request.count, DEFAULT_HASHTAG_COUNT);
        assert_eq!(request.source_type, ContentSource::ManualInput);
        assert!(request.platform.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn request_should_fail_validation_outside_count_range() {
        for count in [4, 21] {
            let request: GenerateHashtagsRequest =
                serde_json::from_value(json!({ "content": "coffee", "count": count })).unwrap();
            assert!(request.validate().is_err(), "count {count}");
        }
    }

    #[test]
    fn request_should_fail_validation_for_empty_content() {
        let request: GenerateHashtagsRequest =
            serde_json::from_value(json!({ "content": "" })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_should_reject_unknown_platform() {
        let result = serde_json::from_value::<GenerateHashtagsRequest>(
            json!({ "content": "coffee", "platform": "MYSPACE" }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn whitespace_content_should_fail_conversion() {
        let request: GenerateHashtagsRequest =
            serde_json::from_value(json!({ "content": "   " })).unwrap();
        assert!(request.validate().is_ok());
        assert!(matches!(
            GenerationRequest::try_from(&request),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn response_should_use_camel_case_and_tip() {
        let request = GenerationRequest::new("coffee", 20)
            .unwrap()
            .with_platform(Some(Platform::Instagram));
        let hashtags = HashtagList::new(vec!["#coffee".to_string(), "#latteart".to_string()]);

        let json = serde_json::to_value(GenerateHashtagsResponse::new(&request, hashtags)).unwrap();

        assert_eq!(json["hashtags"], json!(["#coffee", "#latteart"]));
        assert_eq!(json["hashtagsText"], "#coffee #latteart");
        assert_eq!(json["count"], 2);
        assert_eq!(json["requestedCount"], 20);
        assert_eq!(json["platform"], "INSTAGRAM");
        assert!(json["category"].is_null());
        assert_eq!(
            json["tip"],
            "Instagram performs best with 8-12 hashtags for maximum reach!"
        );
    }

    #[test]
    fn response_without_platform_should_have_no_tip() {
        let request = GenerationRequest::new("coffee", 20).unwrap();
        let response = GenerateHashtagsResponse::new(&request, HashtagList::default());
        assert!(response.tip.is_none());
    }

    #[test]
    fn platform_info_should_expose_range() {
        let info = PlatformInfo::from(Platform::Twitter);
        assert_eq!(info.name, "Twitter");
        assert_eq!((info.optimal_min, info.optimal_max), (1, 3));
    }
}
