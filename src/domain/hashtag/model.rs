use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::platform::{Category, Platform};
use crate::error::AppError;

pub const MIN_HASHTAG_COUNT: u32 = 5;
pub const MAX_HASHTAG_COUNT: u32 = 20;
pub const DEFAULT_HASHTAG_COUNT: u32 = 10;

/// Where the topic text came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentSource {
    #[default]
    ManualInput,
    Webpage,
}

impl ContentSource {
    pub fn describe(self) -> &'static str {
        match self {
            ContentSource::ManualInput => "manual input",
            ContentSource::Webpage => "webpage content",
        }
    }
}

/// One validated generation submission.
///
/// Only constructible through [`GenerationRequest::new`], so a value of this
/// type always has a non-blank topic and a count within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    topic: String,
    count: u32,
    platform: Option<Platform>,
    category: Option<Category>,
    source: ContentSource,
}

impl GenerationRequest {
    pub fn new(topic: &str, count: u32) -> Result<Self, AppError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::ValidationError(
                "Please enter keywords or a caption to generate hashtags for.".to_string(),
            ));
        }
        if !(MIN_HASHTAG_COUNT..=MAX_HASHTAG_COUNT).contains(&count) {
            return Err(AppError::ValidationError(format!(
                "Hashtag count must be between {MIN_HASHTAG_COUNT} and {MAX_HASHTAG_COUNT}, got {count}."
            )));
        }

        Ok(Self {
            topic: topic.to_string(),
            count,
            platform: None,
            category: None,
            source: ContentSource::default(),
        })
    }

    pub fn with_platform(mut self, platform: Option<Platform>) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_source(mut self, source: ContentSource) -> Self {
        self.source = source;
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn source(&self) -> ContentSource {
        self.source
    }

    /// True when the platform-aware template applies
    pub fn is_personalized(&self) -> bool {
        self.platform.is_some() || self.category.is_some()
    }
}

/// Ordered hashtags parsed from one model response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashtagList(Vec<String>);

impl HashtagList {
    pub fn new(tags: Vec<String>) -> Self {
        Self(tags)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn truncate(&mut self, max: usize) {
        self.0.truncate(max);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Space-joined form used to pre-fill the editable text area
    pub fn to_text(&self) -> String {
        self.0.join(" ")
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
