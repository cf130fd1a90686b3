use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};

use crate::config::AiSettings;
use crate::error::AppError;

/// Timeout for the health check, independent of the generation timeout
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

const GENERATION_TEMPERATURE: f32 = 0.7;

pub(crate) const MISSING_CREDENTIAL_MESSAGE: &str =
    "The AI service is not configured. Set GEMINI_API_KEY (or GEMINI_API_KEY_FILE) and restart the server.";

/// Maps async-openai errors onto upstream error variants
fn classify_openai_error(error: OpenAIError) -> AppError {
    match &error {
        OpenAIError::ApiError(api_err) => {
            let err_type = api_err.r#type.as_deref().unwrap_or("").to_lowercase();
            let err_code = api_err
                .code
                .as_ref()
                .map(|code| code.to_string().to_lowercase())
                .unwrap_or_default();
            let message = api_err.message.to_lowercase();

            if err_code.contains("invalid_api_key")
                || message.contains("api key")
                || err_type.contains("authentication")
                || err_type.contains("permission")
            {
                AppError::UpstreamAuthError
            } else if err_type.contains("rate_limit")
                || err_code.contains("rate_limit")
                || err_code.contains("resource_exhausted")
                || message.contains("rate limit")
                || message.contains("quota")
            {
                AppError::UpstreamRateLimited
            } else {
                AppError::UpstreamError(api_err.message.clone())
            }
        }
        OpenAIError::Reqwest(req_err) if req_err.is_timeout() => AppError::UpstreamTimeout,
        _ => AppError::UpstreamError(error.to_string()),
    }
}

/// AI client interface
///
/// Abstracts the text-generation call so tests can substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AiClientTrait: Send + Sync {
    /// Sends one prompt and returns the raw text the model produced
    async fn complete(&self, prompt: &str) -> Result<String, AppError>;

    /// Minimal generation used by the health endpoint
    async fn health_check(&self) -> Result<String, AppError>;
}

pub type AiClient = Arc<dyn AiClientTrait>;

/// Client for any OpenAI-compatible chat-completions endpoint.
///
/// Defaults target Gemini's OpenAI-compatible API.
#[derive(Clone)]
pub struct ChatCompletionClient {
    /// `None` when no credential was configured
    client: Option<Client<OpenAIConfig>>,
    model: String,
    timeout: Duration,
}

impl ChatCompletionClient {
    pub fn new(settings: &AiSettings) -> Self {
        let client = settings.api_key.as_deref().map(|api_key| {
            let config = OpenAIConfig::new()
                .with_api_key(api_key)
                .with_api_base(settings.api_base.trim_end_matches('/'));
            Client::with_config(config).with_backoff(no_retry())
        });

        Self {
            client,
            model: settings.model.clone(),
            timeout: settings.timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&Client<OpenAIConfig>, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::ConfigurationError(MISSING_CREDENTIAL_MESSAGE.to_string()))
    }

    async fn send(
        &self,
        prompt: &str,
        max_tokens: Option<u16>,
        timeout: Duration,
    ) -> Result<String, AppError> {
        let client = self.client()?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.as_str())
            .messages(vec![build_user_message(prompt)?])
            .temperature(GENERATION_TEMPERATURE);
        if let Some(max_tokens) = max_tokens {
            args.max_tokens(max_tokens);
        }
        let request = args.build().map_err(|e| AppError::Internal(e.to_string()))?;

        let response = tokio::time::timeout(timeout, client.chat().create(request))
            .await
            .map_err(|_| AppError::UpstreamTimeout)?
            .map_err(classify_openai_error)?;

        Ok(first_choice_text(response))
    }
}

#[async_trait::async_trait]
impl AiClientTrait for ChatCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        self.send(prompt, None, self.timeout).await
    }

    async fn health_check(&self) -> Result<String, AppError> {
        self.send("Respond with exactly 'ok'", Some(5), HEALTH_CHECK_TIMEOUT)
            .await
    }
}

fn first_choice_text(response: CreateChatCompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default()
}

/// A backoff that gives up after the first failure, so a 429 is returned
/// to the caller instead of being retried inside async-openai.
fn no_retry() -> backoff::ExponentialBackoff {
    backoff::ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

pub(crate) fn build_user_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::User(
        ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    ))
}
