//! Hashtag generation prompts
//!
//! ## Layout
//! - `base`: topic-only prompt
//! - `personalized`: platform and category aware prompt

mod base;
mod personalized;

use super::model::GenerationRequest;
use super::platform::{Category, Platform};

/// Platform assumed when only a category is given
pub const DEFAULT_PLATFORM: Platform = Platform::Instagram;
/// Category assumed when only a platform is given
pub const DEFAULT_CATEGORY: Category = Category::Business;

/// Builds the single instruction sent to the model.
///
/// The result always embeds the trimmed topic and the literal requested count.
pub fn build_prompt(request: &GenerationRequest) -> String {
    if request.is_personalized() {
        personalized::prompt(
            request.topic(),
            request.count(),
            request.platform().unwrap_or(DEFAULT_PLATFORM),
            request.category().unwrap_or(DEFAULT_CATEGORY),
            request.source(),
        )
    } else {
        base::prompt(request.topic(), request.count())
    }
}
