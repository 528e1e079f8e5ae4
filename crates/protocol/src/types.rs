use serde::{Deserialize, Serialize};

/// Groq's OpenAI-compatible chat-completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

// Sampling parameters are fixed for palette generation.
pub const TEMPERATURE: f64 = 0.8;
pub const MAX_TOKENS: u32 = 200;
pub const TOP_P: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
