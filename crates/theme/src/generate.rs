//! AI palette generation over an OpenAI-compatible chat-completion API.
//!
//! [`ThemeGenerator::generate_theme`] always returns a usable palette: a
//! missing key, a transport failure or an unusable reply all end in
//! [`ColorPalette::fallback`]. The typed failure is still available through
//! [`ThemeGenerator::try_generate`] for callers that want to report it.

use std::time::Duration;

use prism_protocol::{ChatMessage, ChatRequest, ChatResponse, DEFAULT_API_URL, DEFAULT_MODEL};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::types::ColorPalette;
use crate::validation::validate_palette;

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("prism/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("API key is not configured")]
    MissingApiKey,
    #[error("Request timed out")]
    Timeout,
    #[error("Network error: {0}")]
    Transport(String),
    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid response format from API")]
    EmptyResponse,
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Sends one chat-completion request and decodes the reply.
pub trait ChatTransport {
    fn complete(&self, api_key: &str, request: &ChatRequest)
        -> Result<ChatResponse, GenerateError>;
}

/// Blocking HTTP transport with a global request timeout.
pub struct UreqTransport {
    agent: ureq::Agent,
    api_url: String,
}

impl UreqTransport {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            api_url: api_url.into(),
        }
    }
}

fn map_ureq_error(e: ureq::Error) -> GenerateError {
    match e {
        ureq::Error::Timeout(_) => GenerateError::Timeout,
        ureq::Error::StatusCode(status) => GenerateError::Status {
            status,
            body: String::new(),
        },
        other => GenerateError::Transport(other.to_string()),
    }
}

impl ChatTransport for UreqTransport {
    fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, GenerateError> {
        let body = request.to_json()?;

        debug!(url = %self.api_url, model = %request.model, "Dispatching chat completion");

        let mut response = self
            .agent
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .header("User-Agent", USER_AGENT)
            .send(body.as_str())
            .map_err(map_ureq_error)?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            return Err(GenerateError::Status { status, body });
        }

        let text = response
            .body_mut()
            .read_to_string()
            .map_err(map_ureq_error)?;

        Ok(ChatResponse::from_json(&text)?)
    }
}

/// Anything that can turn a free-text description into a palette.
pub trait PaletteSource {
    fn generate_theme(&self, prompt: &str) -> ColorPalette;
}

impl<F> PaletteSource for F
where
    F: Fn(&str) -> ColorPalette,
{
    fn generate_theme(&self, prompt: &str) -> ColorPalette {
        self(prompt)
    }
}

/// Settings for [`ThemeGenerator::new`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeneratorConfig {
    /// Defaults with the credential taken from [`API_KEY_ENV`].
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            ..Self::default()
        }
    }
}

pub struct ThemeGenerator<T = UreqTransport> {
    transport: T,
    model: String,
    api_key: Option<String>,
}

impl ThemeGenerator<UreqTransport> {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_transport(
            UreqTransport::new(config.api_url, config.timeout),
            config.model,
            config.api_key,
        )
    }
}

impl<T: ChatTransport> ThemeGenerator<T> {
    pub fn with_transport(transport: T, model: impl Into<String>, api_key: Option<String>) -> Self {
        // An empty credential is the same as none at all.
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        Self {
            transport,
            model: model.into(),
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run the whole pipeline, surfacing the first failure.
    pub fn try_generate(&self, prompt: &str) -> Result<ColorPalette, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or(GenerateError::MissingApiKey)?;

        let request = build_request(&self.model, prompt);
        let response = self.transport.complete(api_key, &request)?;
        let content = response
            .first_content()
            .ok_or(GenerateError::EmptyResponse)?;

        debug!(content, "Received palette response");

        let raw = parse_palette_content(content)?;
        Ok(validate_palette(&raw))
    }

    /// Generate a palette for `prompt`, falling back on any failure.
    pub fn generate_theme(&self, prompt: &str) -> ColorPalette {
        match self.try_generate(prompt) {
            Ok(palette) => palette,
            Err(GenerateError::MissingApiKey) => {
                warn!("{} is not set, using fallback palette", API_KEY_ENV);
                ColorPalette::fallback()
            }
            Err(e) => {
                error!("Error generating theme: {}", e);
                ColorPalette::fallback()
            }
        }
    }

    /// Generate `count` palettes one after another.
    ///
    /// Each call gets `"{base_prompt} - variation {i}"` (1-indexed); a failed
    /// call only replaces its own slot with the fallback palette.
    pub fn generate_theme_variations(&self, base_prompt: &str, count: usize) -> Vec<ColorPalette> {
        (1..=count)
            .map(|i| {
                let prompt = format!("{} - variation {}", base_prompt, i);
                self.try_generate(&prompt).unwrap_or_else(|e| {
                    error!("Failed to generate variation {}: {}", i, e);
                    ColorPalette::fallback()
                })
            })
            .collect()
    }
}

impl<T: ChatTransport> PaletteSource for ThemeGenerator<T> {
    fn generate_theme(&self, prompt: &str) -> ColorPalette {
        ThemeGenerator::generate_theme(self, prompt)
    }
}

pub fn system_prompt(prompt: &str) -> String {
    format!(
        r##"You are a professional UI/UX designer and color theory expert. Generate a harmonious color palette in JSON format with exactly these keys: primary, secondary, accent, background, text.

Guidelines:
- Return ONLY valid JSON, no additional text or markdown
- Colors must be in hex format (#RRGGBB)
- Primary color should be the main brand color
- Secondary color should complement the primary
- Accent color should provide contrast
- Background should be light or dark based on theme
- Text color should have good contrast with background
- All colors should work well together and match the theme: "{}"

Example format: {{"primary":"#3B82F6","secondary":"#1E40AF","accent":"#10B981","background":"#FFFFFF","text":"#1F2937"}}"##,
        prompt
    )
}

pub fn user_prompt(prompt: &str) -> String {
    format!("Generate a color palette for: {}", prompt)
}

pub fn build_request(model: &str, prompt: &str) -> ChatRequest {
    ChatRequest::new(
        model,
        vec![
            ChatMessage::system(system_prompt(prompt)),
            ChatMessage::user(user_prompt(prompt)),
        ],
    )
}

/// Remove every Markdown code-fence marker and surrounding whitespace.
pub fn strip_code_fences(content: &str) -> String {
    content
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Decode model output into an untyped value for validation.
pub fn parse_palette_content(content: &str) -> Result<Value, GenerateError> {
    let cleaned = strip_code_fences(content);
    Ok(serde_json::from_str(&cleaned)?)
}
