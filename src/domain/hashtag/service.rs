use std::time::Instant;

use super::client::AiClient;
use super::model::{GenerationRequest, HashtagList};
use super::parser::parse_hashtags;
use super::prompt::build_prompt;
use crate::error::AppError;

/// Hashtag generation service
///
/// One prompt, one upstream call, one parse. Failures are returned as-is;
/// the caller re-submits to retry.
#[derive(Clone)]
pub struct HashtagService {
    client: AiClient,
}

impl HashtagService {
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<HashtagList, AppError> {
        let prompt = build_prompt(request);
        tracing::debug!(
            prompt_length = prompt.len(),
            personalized = request.is_personalized(),
            "Prompt built"
        );

        let start = Instant::now();
        let raw = self.client.complete(&prompt).await?;
        tracing::info!(
            latency_ms = start.elapsed().as_millis() as u64,
            response_length = raw.len(),
            "AI service responded"
        );

        let mut hashtags = parse_hashtags(&raw)?;
        let parsed = hashtags.len();
        hashtags.truncate(request.count() as usize);

        if hashtags.len() < request.count() as usize {
            tracing::warn!(
                requested = request.count(),
                returned = hashtags.len(),
                "AI service returned fewer hashtags than requested"
            );
        } else if parsed > hashtags.len() {
            tracing::debug!(parsed, kept = hashtags.len(), "Extra hashtags dropped");
        }

        Ok(hashtags)
    }

    pub async fn health_check(&self) -> Result<String, AppError> {
        self.client.health_check().await
    }
}
