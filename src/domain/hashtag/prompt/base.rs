//! Topic-only prompt

pub(super) fn prompt(topic: &str, count: u32) -> String {
    format!(
        r#"You are an expert social media strategist. Given a user seed (keyword, caption or existing hashtag),
generate exactly {count} high-quality, trend-aware, brand-safe hashtags that would perform
well across platforms like Instagram, TikTok, LinkedIn, and X.

Guidelines:
- Make each hashtag short (1-3 words combined), readable, and relevant to the seed.
- Include a smart mix of broad and niche/long-tail hashtags for reach and intent.
- Avoid duplicates, numbers, bulleting, and any banned or sensitive words.
- Use only standard ASCII characters; no emojis.
- Output as ONE single line, space-separated, each starting with '#'.
- Output EXACTLY {count} hashtags and nothing else.

Seed: "{topic}""#
    )
}
