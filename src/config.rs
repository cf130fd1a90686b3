use std::env;
use std::time::Duration;

/// Gemini's OpenAI-compatible endpoint
pub const DEFAULT_AI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

const DEFAULT_RATE_LIMIT_PER_SECOND: u64 = 2;
const DEFAULT_RATE_LIMIT_BURST: u32 = 10;

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub ai: AiSettings,
    pub rate_limit: RateLimitSettings,
    pub log_format: LogFormat,
}

/// Settings handed to the AI client.
///
/// `api_key` stays optional here: the server starts without it and each
/// generation reports the missing credential instead.
#[derive(Clone)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_AI_API_BASE.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitSettings {
    pub per_second: u64,
    pub burst_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl AppConfig {
    /// Loads settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8080,
        };

        let api_key = match non_blank(lookup("GEMINI_API_KEY")) {
            Some(key) => Some(key),
            None => match non_blank(lookup("GEMINI_API_KEY_FILE")) {
                Some(path) => read_secret_file(&path)?,
                None => None,
            },
        };

        let timeout_secs = match lookup("AI_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_AI_TIMEOUT_SECS,
        };

        let per_second = match lookup("RATE_LIMIT_PER_SECOND") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(value) if value > 0 => value,
                _ => return Err(ConfigError::InvalidRateLimit(raw)),
            },
            None => DEFAULT_RATE_LIMIT_PER_SECOND,
        };

        let burst_size = match lookup("RATE_LIMIT_BURST") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(value) if value > 0 => value,
                _ => return Err(ConfigError::InvalidRateLimit(raw)),
            },
            None => DEFAULT_RATE_LIMIT_BURST,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        };

        Ok(Self {
            server_host,
            server_port,
            ai: AiSettings {
                api_key,
                api_base: non_blank(lookup("AI_API_BASE"))
                    .unwrap_or_else(|| DEFAULT_AI_API_BASE.to_string()),
                model: non_blank(lookup("AI_MODEL")).unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            rate_limit: RateLimitSettings {
                per_second,
                burst_size,
            },
            log_format,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_secret_file(path: &str) -> Result<Option<String>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::SecretFile {
        path: path.to_string(),
        source,
    })?;
    Ok(non_blank(Some(contents)))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
    #[error("Invalid AI_TIMEOUT_SECS (expected a positive number of seconds): {0}")]
    InvalidTimeout(String),
    #[error("Invalid rate limit setting: {0}")]
    InvalidRateLimit(String),
    #[error("Invalid LOG_FORMAT (expected json or pretty): {0}")]
    InvalidLogFormat(String),
    #[error("Failed to read secret file {path}: {source}")]
    SecretFile {
        path: String,
        source: std::io::Error,
    },
}
