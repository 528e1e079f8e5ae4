mod request;
mod response;
mod types;

pub use request::ChatRequest;
pub use response::{ChatResponse, Choice, ChoiceMessage};
pub use types::{
    ChatMessage, Role, DEFAULT_API_URL, DEFAULT_MODEL, MAX_TOKENS, TEMPERATURE, TOP_P,
};
