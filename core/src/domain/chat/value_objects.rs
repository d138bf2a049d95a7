use crate::domain::chat::entities::ChatMessage;

pub const DEFAULT_CHAT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_CHAT_MAX_TOKENS: u32 = 1000;

#[derive(Debug, Clone)]
pub struct ChatInput {
    pub messages: Vec<ChatMessage>,
    /// Result of a previous food analysis the conversation refers to.
    pub context: Option<serde_json::Value>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatInput {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            context: None,
            temperature: DEFAULT_CHAT_TEMPERATURE,
            max_tokens: DEFAULT_CHAT_MAX_TOKENS,
        }
    }
}
