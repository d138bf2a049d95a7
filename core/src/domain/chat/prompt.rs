use crate::domain::{chat::entities::ChatMessage, food_analysis::prompt::is_blank};

const SYSTEM_INSTRUCTION: &str = "You are a knowledgeable nutritionist and health advisor.
Provide helpful, accurate information about nutrition, food, and healthy eating.
Base your responses on scientific evidence and be encouraging while being honest about health implications.
If you're discussing a specific food that was analyzed, reference the analysis context provided.";

/// Flattens the conversation into a single prompt for the model.
pub fn build_chat_prompt(messages: &[ChatMessage], context: Option<&serde_json::Value>) -> String {
    let mut parts = Vec::with_capacity(messages.len() + 1);

    if let Some(context) = context.filter(|value| !is_blank(value)) {
        let rendered = serde_json::to_string_pretty(context).unwrap_or_else(|_| context.to_string());
        parts.push(format!(
            "Context from previous food analysis: {rendered}\n\n"
        ));
    }

    for message in messages {
        let speaker = if message.is_user() { "User" } else { "Assistant" };
        parts.push(format!("{speaker}: {}", message.content));
    }

    format!("{SYSTEM_INSTRUCTION}\n\n{}", parts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(role: &str, content: &str) -> ChatMessage {
        ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
            timestamp: None,
        }
    }

    #[test]
    fn test_prompt_renders_roles() {
        let prompt = build_chat_prompt(
            &[
                message("user", "Is rice healthy?"),
                message("assistant", "In moderation."),
                message("model", "Brown rice has more fibre."),
            ],
            None,
        );

        assert!(prompt.starts_with(SYSTEM_INSTRUCTION));
        assert!(prompt.ends_with(
            "\n\nUser: Is rice healthy?\nAssistant: In moderation.\nAssistant: Brown rice has more fibre."
        ));
    }

    #[test]
    fn test_prompt_includes_analysis_context() {
        let context = json!({"health_score": 82});
        let prompt = build_chat_prompt(&[message("user", "Why 82?")], Some(&context));

        assert!(prompt.contains(
            "Context from previous food analysis: {\n  \"health_score\": 82\n}\n\n\nUser: Why 82?"
        ));
    }

    #[test]
    fn test_prompt_skips_empty_context() {
        let prompt = build_chat_prompt(&[message("user", "Hi")], Some(&json!({})));
        assert_eq!(prompt, format!("{SYSTEM_INSTRUCTION}\n\nUser: Hi"));
    }
}
