use axum::extract::State;

use crate::application::http::{
    food_analysis::validators::AnalyzeFoodRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};
use healthscan_core::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::FoodAnalysisResult, ports::FoodAnalysisService,
        value_objects::AnalyzeFoodInput,
    },
};

#[utoipa::path(
    post,
    path = "/analyze-food",
    tag = "food-analysis",
    summary = "Analyze a food photo",
    description = "Sends the image to the vision model and extracts a health score and calorie estimate from its analysis.",
    request_body = AnalyzeFoodRequest,
    responses(
        (status = 200, body = FoodAnalysisResult),
        (status = 400, description = "Invalid image data", body = ApiErrorResponse),
        (status = 500, description = "Model call failed", body = ApiErrorResponse)
    ),
)]
pub async fn analyze_food(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeFoodRequest>,
) -> Result<Response<FoodAnalysisResult>, ApiError> {
    let result = state
        .service
        .analyze_food(AnalyzeFoodInput {
            image_data: payload.image_data,
            prompt: payload.prompt,
            user_preferences: payload.user_preferences,
        })
        .await
        .map_err(analysis_error)?;

    Ok(Response::OK(result))
}

/// Input errors keep their own message, anything else is reported as a
/// failed analysis.
fn analysis_error(error: CoreError) -> ApiError {
    match error {
        CoreError::InvalidImage(_) | CoreError::Invalid(_) => ApiError::from(error),
        CoreError::ExternalServiceError(_) | CoreError::InternalServerError => {
            ApiError::InternalServerError(format!("Food analysis failed: {}", error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_input_errors_are_prefixed() {
        assert_eq!(
            analysis_error(CoreError::ExternalServiceError("quota exceeded".to_string())),
            ApiError::InternalServerError("Food analysis failed: quota exceeded".to_string())
        );
        assert_eq!(
            analysis_error(CoreError::InternalServerError),
            ApiError::InternalServerError("Food analysis failed: Internal server error".to_string())
        );
    }

    #[test]
    fn test_input_errors_stay_bad_requests() {
        assert_eq!(
            analysis_error(CoreError::InvalidImage("unrecognized image format".to_string())),
            ApiError::BadRequest("Invalid image data: unrecognized image format".to_string())
        );
    }
}
