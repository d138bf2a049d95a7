use serde_json::Value;

const FOOD_ANALYSIS_TEMPLATE: &str = "You are an expert nutritionist and food analyst. Analyze the food image provided and give a comprehensive nutritional analysis.

Please provide your analysis in the following structured format:

## Food Identification
- **Primary Food Items**: List all main food items visible
- **Preparation Method**: How the food appears to be prepared
- **Estimated Portion Size**: Approximate serving size

## Nutritional Analysis
- **Calories**: Estimated total calories
- **Macronutrients**:
  - Protein: X grams
  - Carbohydrates: X grams
  - Fat: X grams
  - Fiber: X grams
- **Key Micronutrients**: Important vitamins and minerals present

## Health Assessment
- **Health Score**: Rate from 1-100 (100 being extremely healthy)
- **Health Benefits**: Key nutritional benefits
- **Potential Concerns**: Any nutritional concerns or allergens

## Recommendations
- **Dietary Advice**: Suggestions for this food choice
- **Pairing Suggestions**: Foods that would complement this meal
- **Portion Guidance**: Appropriate serving size recommendations";

const ACCURACY_NOTE: &str = "Provide accurate, evidence-based nutritional information. If uncertain about specific values, provide reasonable estimates with appropriate disclaimers.";

/// Builds the default vision prompt, optionally tailored to user preferences.
pub fn create_food_analysis_prompt(user_preferences: Option<&Value>) -> String {
    let mut prompt = FOOD_ANALYSIS_TEMPLATE.to_string();

    if let Some(preferences) = user_preferences.filter(|value| !is_blank(value)) {
        prompt.push_str("\n\n## User Context\nConsider these user preferences: ");
        prompt.push_str(&preferences.to_string());
    }

    prompt.push_str("\n\n");
    prompt.push_str(ACCURACY_NOTE);
    prompt
}

/// Null and empty containers carry no context.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}
