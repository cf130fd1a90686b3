pub mod client;
pub mod dto;
pub mod extractor;
pub mod handler;
pub mod model;
pub mod parser;
pub mod platform;
pub mod prompt;
pub mod service;

pub use client::{AiClient, AiClientTrait, ChatCompletionClient};
pub use extractor::ContentExtractor;
pub use model::{GenerationRequest, HashtagList};
pub use service::HashtagService;
