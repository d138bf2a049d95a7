use std::future::Future;

use crate::domain::chat::{entities::ChatCompletion, stream::FragmentBridge, value_objects::ChatInput};

/// Service trait for nutrition chat
pub trait ChatService: Send + Sync {
    /// Starts a model call and hands back its fragments. Upstream failures,
    /// including a failure to open the call, surface as a trailing error
    /// fragment rather than as an error.
    fn chat(&self, input: ChatInput) -> impl Future<Output = FragmentBridge> + Send;

    fn complete_chat(&self, input: ChatInput) -> impl Future<Output = ChatCompletion> + Send;
}
