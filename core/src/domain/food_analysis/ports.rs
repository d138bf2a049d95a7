use futures::stream::BoxStream;
use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{FoodAnalysisResult, ImagePayload},
        value_objects::{AnalyzeFoodInput, GenerationOptions},
    },
};

/// Incremental text produced by a streaming model call.
pub type FragmentStream = BoxStream<'static, Result<String, CoreError>>;

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image: ImagePayload,
        options: GenerationOptions,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        options: GenerationOptions,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Opens a streaming call. Errors raised after the first fragment are
    /// yielded as items of the returned stream.
    fn generate_stream(
        &self,
        prompt: String,
        options: GenerationOptions,
    ) -> impl Future<Output = Result<FragmentStream, CoreError>> + Send;
}

/// Service trait for food analysis business logic
pub trait FoodAnalysisService: Send + Sync {
    fn analyze_food(
        &self,
        input: AnalyzeFoodInput,
    ) -> impl Future<Output = Result<FoodAnalysisResult, CoreError>> + Send;
}
