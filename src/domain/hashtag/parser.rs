//! Model output parsing

use std::collections::HashSet;

use super::model::HashtagList;
use crate::error::AppError;

/// Parses free-form model output into an ordered hashtag list.
///
/// Tokens are whitespace-separated; only tokens starting with `#` are kept.
/// Repeated leading `#` collapse to one, the body keeps only letters, digits
/// and `_`, tokens left without a body are dropped, and duplicates are
/// removed case-insensitively keeping the first occurrence.
pub fn parse_hashtags(raw: &str) -> Result<HashtagList, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::UpstreamEmptyResponse);
    }

    let mut seen = HashSet::new();
    let tags: Vec<String> = raw
        .split_whitespace()
        .filter_map(normalize_token)
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .collect();

    if tags.is_empty() {
        return Err(AppError::UpstreamError(
            "response contained no hashtags".to_string(),
        ));
    }

    Ok(HashtagList::new(tags))
}

fn normalize_token(token: &str) -> Option<String> {
    if !token.starts_with('#') {
        return None;
    }

    let body: String = token
        .trim_start_matches('#')
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    if body.is_empty() {
        None
    } else {
        Some(format!("#{body}"))
    }
}
