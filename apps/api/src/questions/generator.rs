//! Question Flow — resolves a prompt through the gateway and normalizes the
//! response into an ordered question set.

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::gemini::normalize::{clean_model_json, preview, Normalized};
use crate::gemini::CompletionGateway;
use crate::questions::prompts::build_question_prompt;

/// Generates interview questions for a role and candidate background.
///
/// Gateway transport faults propagate to the caller; a malformed or
/// mis-shaped model response is downgraded to the fixed fallback set.
pub async fn generate_questions(
    gateway: &dyn CompletionGateway,
    role: &str,
    context: &str,
) -> Result<Normalized<Vec<String>>, AppError> {
    let prompt = build_question_prompt(role, context);
    let raw = gateway.complete(&prompt).await?;

    debug!("Raw question response: {}", preview(&raw));

    Ok(normalize_questions(&raw, role))
}

/// Parses model output as a non-empty JSON array of strings.
/// Any failure yields the fallback question set for the role.
pub fn normalize_questions(raw: &str, role: &str) -> Normalized<Vec<String>> {
    let cleaned = clean_model_json(raw);

    match parse_question_array(&cleaned) {
        Some(questions) => Normalized::parsed(questions),
        None => {
            warn!("Question response failed normalization, serving fallback set");
            Normalized::fallback(fallback_questions(role))
        }
    }
}

fn parse_question_array(text: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(text).ok()?;
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| item.as_str().map(String::from))
        .collect()
}

/// Fixed question set served when the model response cannot be used.
pub fn fallback_questions(role: &str) -> Vec<String> {
    vec![
        format!("Can you walk me through a challenging project you worked on as a {role}?"),
        "What technical decisions did you make in your recent work and why?".to_string(),
        format!("How do you approach problem-solving in your role as a {role}?"),
        "Describe a time when you had to learn a new technology quickly.".to_string(),
        "What's the most complex technical challenge you've solved?".to_string(),
    ]
}
