//! Platform and category aware prompt

use crate::domain::hashtag::model::ContentSource;
use crate::domain::hashtag::platform::{Category, Platform};

pub(super) fn prompt(
    topic: &str,
    count: u32,
    platform: Platform,
    category: Category,
    source: ContentSource,
) -> String {
    let platform_name = platform.display_name();
    let category_name = category.display_name();

    format!(
        r#"You are an expert social media strategist specializing in {platform_name} content.
Given the following content from {source}, generate exactly {count} high-quality,
trend-aware, brand-safe hashtags optimized for {platform_name} in the {category_name} niche.

Platform-specific requirements for {platform_name}:
{requirements}

Category focus: {category_name}
Include relevant terms like: {keywords}

Content: "{topic}"

Guidelines:
- Optimize for {platform_name} algorithm and user behavior
- Include {category_name}-specific terminology
- Mix broad reach and niche targeting hashtags
- Make hashtags short (1-3 words), readable, and relevant
- Avoid duplicates, numbers, and banned or sensitive words
- Use only standard ASCII characters; no emojis
- Output as ONE single line, space-separated, each starting with '#'
- Output EXACTLY {count} hashtags and nothing else

Generate {count} hashtags:"#,
        source = source.describe(),
        requirements = platform.requirements(),
        keywords = category.keywords().join(", "),
    )
}
