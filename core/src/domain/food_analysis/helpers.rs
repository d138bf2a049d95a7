use base64::{Engine as _, engine::general_purpose};

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{entities::ImagePayload, value_objects::ImageFormat},
};

const DATA_URL_PREFIX: &str = "data:image";

/// Decode a base64 image, accepting an optional `data:image/...;base64,` header
pub fn decode_base64_image(image_data: &str) -> Result<ImagePayload, CoreError> {
    let encoded = if image_data.starts_with(DATA_URL_PREFIX) {
        image_data
            .split_once(',')
            .map(|(_, data)| data)
            .ok_or_else(|| CoreError::InvalidImage("missing data after data URL header".into()))?
    } else {
        image_data
    };

    let encoded: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let data = general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| CoreError::InvalidImage(e.to_string()))?;

    let format = ImageFormat::sniff(&data)
        .ok_or_else(|| CoreError::InvalidImage("unrecognized image format".to_string()))?;

    Ok(ImagePayload { format, data })
}
