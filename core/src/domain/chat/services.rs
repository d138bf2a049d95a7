use tracing::instrument;

use crate::domain::{
    chat::{
        entities::ChatCompletion, ports::ChatService, prompt::build_chat_prompt,
        stream::FragmentBridge, value_objects::ChatInput,
    },
    common::services::Service,
    food_analysis::{ports::LLMClient, value_objects::GenerationOptions},
};

impl<LLM> ChatService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(skip_all, fields(messages = input.messages.len()))]
    async fn chat(&self, input: ChatInput) -> FragmentBridge {
        let prompt = build_chat_prompt(&input.messages, input.context.as_ref());
        let options = GenerationOptions {
            model: self.llm_config.chat_model.clone(),
            temperature: input.temperature,
            max_output_tokens: input.max_tokens,
        };

        match self.llm_client.generate_stream(prompt, options).await {
            Ok(upstream) => FragmentBridge::new(upstream),
            Err(error) => {
                tracing::error!(%error, "Failed to open chat stream");
                FragmentBridge::failed(error)
            }
        }
    }

    async fn complete_chat(&self, input: ChatInput) -> ChatCompletion {
        let response = self.chat(input).await.collect_full().await;

        ChatCompletion {
            success: true,
            response,
            model_used: self.llm_config.chat_model.clone(),
        }
    }
}
