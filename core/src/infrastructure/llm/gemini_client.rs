use std::fmt::Display;

use base64::{Engine as _, engine::general_purpose};
use eventsource_stream::{EventStreamError, Eventsource};
use futures::{Stream, StreamExt, future};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    food_analysis::{
        entities::ImagePayload,
        ports::{FragmentStream, LLMClient},
        value_objects::GenerationOptions,
    },
};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    candidate_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<GeminiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        (!text.is_empty()).then_some(text)
    }
}

impl GenerationConfig {
    fn from_options(options: &GenerationOptions) -> Self {
        Self {
            temperature: options.temperature,
            max_output_tokens: options.max_output_tokens,
            candidate_count: 1,
        }
    }
}

impl GeminiLLMClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder().build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(Self {
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn text_request(prompt: String, options: &GenerationOptions) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::Text { text: prompt }],
            }],
            generation_config: Some(GenerationConfig::from_options(options)),
        }
    }

    async fn send(
        &self,
        url: &str,
        request: &GeminiRequest,
    ) -> Result<reqwest::Response, CoreError> {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);

            let detail = serde_json::from_str::<GeminiErrorEnvelope>(&error_text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(error_text);

            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, detail
            )));
        }

        Ok(response)
    }

    async fn call_gemini_api(
        &self,
        model: &str,
        request: GeminiRequest,
    ) -> Result<String, CoreError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self.send(&url, &request).await?;

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        if let Some(text) = gemini_response.text() {
            return Ok(text);
        }

        match gemini_response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            Some(reason) => Err(CoreError::ExternalServiceError(format!(
                "Prompt blocked by LLM: {}",
                reason
            ))),
            None => Err(CoreError::ExternalServiceError(
                "No response from LLM".to_string(),
            )),
        }
    }
}

/// Text carried by one streamed chunk. Chunks without text are skipped.
fn parse_stream_chunk(raw: &str) -> Result<Option<String>, CoreError> {
    let chunk: GeminiResponse = serde_json::from_str(raw).map_err(|e| {
        tracing::error!("Failed to parse Gemini stream chunk: {}", e);
        CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
    })?;

    if let Some(error) = chunk.error {
        return Err(CoreError::ExternalServiceError(error.message));
    }

    Ok(chunk.text())
}

/// Text fragments of an SSE response body. Nothing is read past the first
/// transport or parse failure.
fn stream_fragments<S, B, E>(
    body: S,
) -> impl Stream<Item = Result<String, CoreError>> + Send + 'static
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    body.eventsource()
        .filter_map(|event| {
            future::ready(match event {
                Ok(event) => parse_stream_chunk(&event.data).transpose(),
                Err(EventStreamError::Transport(e)) => Some(Err(
                    CoreError::ExternalServiceError(format!("LLM stream interrupted: {e}")),
                )),
                Err(e) => Some(Err(CoreError::ExternalServiceError(format!(
                    "Malformed LLM stream: {e}"
                )))),
            })
        })
        .scan(false, |failed, item| {
            if *failed {
                return future::ready(None);
            }
            *failed = item.is_err();
            future::ready(Some(item))
        })
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image: ImagePayload,
        options: GenerationOptions,
    ) -> Result<String, CoreError> {
        let base64_image = general_purpose::STANDARD.encode(&image.data);

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type().to_string(),
                            data: base64_image,
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
            generation_config: Some(GenerationConfig::from_options(&options)),
        };

        self.call_gemini_api(&options.model, request).await
    }

    async fn generate_with_text(
        &self,
        prompt: String,
        options: GenerationOptions,
    ) -> Result<String, CoreError> {
        let request = Self::text_request(prompt, &options);
        self.call_gemini_api(&options.model, request).await
    }

    async fn generate_stream(
        &self,
        prompt: String,
        options: GenerationOptions,
    ) -> Result<FragmentStream, CoreError> {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, options.model
        );
        let request = Self::text_request(prompt, &options);
        let response = self.send(&url, &request).await?;

        tracing::debug!(model = %options.model, "Gemini stream opened");

        Ok(stream_fragments(response.bytes_stream()).boxed())
    }
}
