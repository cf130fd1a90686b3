//! Platform and category catalog
//!
//! Static per-platform guidance and per-category keyword lists used to
//! personalize the generation prompt.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Target social media platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Instagram,
    TikTok,
    LinkedIn,
    Twitter,
    YouTube,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Instagram,
        Platform::TikTok,
        Platform::LinkedIn,
        Platform::Twitter,
        Platform::YouTube,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "Twitter",
            Platform::YouTube => "YouTube",
        }
    }

    /// Hashtag count range the platform performs best with (inclusive)
    pub fn optimal_range(self) -> (u32, u32) {
        match self {
            Platform::Instagram => (8, 12),
            Platform::TikTok => (5, 8),
            Platform::LinkedIn => (3, 5),
            Platform::Twitter => (1, 3),
            Platform::YouTube => (5, 10),
        }
    }

    pub fn style(self) -> &'static str {
        match self {
            Platform::Instagram => "Mix of popular and niche hashtags for community engagement",
            Platform::TikTok => "Trending and viral format hashtags",
            Platform::LinkedIn => "Professional and industry-specific hashtags",
            Platform::Twitter => "Concise and trending topic hashtags",
            Platform::YouTube => "Searchable keyword hashtags",
        }
    }

    pub fn requirements(self) -> &'static str {
        match self {
            Platform::Instagram => "Focus on lifestyle, visual appeal, and community building. Include trending and evergreen hashtags.",
            Platform::TikTok => "Emphasize trending challenges, viral content, and short catchy phrases. Include dance, music, and trend-related tags.",
            Platform::LinkedIn => "Focus on professional development, industry insights, and thought leadership. Avoid casual or entertainment hashtags.",
            Platform::Twitter => "Keep it minimal and news-worthy. Focus on current events, conversations, and trending topics.",
            Platform::YouTube => "Optimize for search discovery. Include descriptive, educational, and how-to related hashtags.",
        }
    }
}

/// Content category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Business,
    Lifestyle,
    Technology,
    Travel,
    Food,
    Fitness,
    Education,
    Entertainment,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Business,
        Category::Lifestyle,
        Category::Technology,
        Category::Travel,
        Category::Food,
        Category::Fitness,
        Category::Education,
        Category::Entertainment,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Business => "Business",
            Category::Lifestyle => "Lifestyle",
            Category::Technology => "Technology",
            Category::Travel => "Travel",
            Category::Food => "Food",
            Category::Fitness => "Fitness",
            Category::Education => "Education",
            Category::Entertainment => "Entertainment",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Business => &["entrepreneur", "startup", "leadership", "productivity", "business", "marketing", "sales", "growth"],
            Category::Lifestyle => &["dailylife", "inspiration", "wellness", "mindfulness", "lifestyle", "motivation", "selfcare", "happiness"],
            Category::Technology => &["tech", "innovation", "AI", "digital", "software", "coding", "programming", "future"],
            Category::Travel => &["wanderlust", "adventure", "explore", "destination", "travel", "vacation", "journey", "discover"],
            Category::Food => &["foodie", "recipe", "cooking", "delicious", "cuisine", "chef", "homemade", "tasty"],
            Category::Fitness => &["workout", "health", "motivation", "fitlife", "training", "gym", "exercise", "wellness"],
            Category::Education => &["learning", "knowledge", "skills", "growth", "study", "education", "teaching", "development"],
            Category::Entertainment => &["fun", "trending", "viral", "creative", "content", "entertainment", "comedy", "music"],
        }
    }
}

/// Tip shown when the requested count falls outside the platform's optimal range.
///
/// Advisory only: the requested count is never changed.
pub fn count_advice(platform: Platform, count: u32) -> Option<String> {
    let (min, max) = platform.optimal_range();
    if (min..=max).contains(&count) {
        return None;
    }
    Some(format!(
        "{} performs best with {}-{} hashtags for maximum reach!",
        platform.display_name(),
        min,
        max
    ))
}
