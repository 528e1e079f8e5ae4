use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, MAX_TOKENS, TEMPERATURE, TOP_P};

/// Body of a non-streaming chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub stream: bool,
}

impl ChatRequest {
    /// Builds a request with the fixed palette sampling parameters.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: false,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = ChatRequest::new(
            "llama-3.1-8b-instant",
            vec![
                ChatMessage::system("be a designer"),
                ChatMessage::user("Generate a color palette for: dusk"),
            ],
        );

        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "llama-3.1-8b-instant",
                "messages": [
                    {"role": "system", "content": "be a designer"},
                    {"role": "user", "content": "Generate a color palette for: dusk"}
                ],
                "temperature": 0.8,
                "max_tokens": 200,
                "top_p": 1.0,
                "stream": false
            })
        );
    }

    #[test]
    fn test_request_parses_back() {
        let json = r#"{"model":"m","messages":[{"role":"user","content":"hi"}],"temperature":0.8,"max_tokens":200,"top_p":1,"stream":false}"#;
        let request = ChatRequest::from_json(json).unwrap();
        assert_eq!(request.messages[0], ChatMessage::user("hi"));
        assert!(!request.stream);
    }
}
