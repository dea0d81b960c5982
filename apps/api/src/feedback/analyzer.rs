//! Feedback Flow — runs the multimodal analysis and normalizes the response
//! into a complete `FeedbackReport`.

use std::path::Path;

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::feedback::prompts::build_feedback_prompt;
use crate::feedback::report::FeedbackReport;
use crate::gemini::normalize::{clean_model_json, preview, Normalized};
use crate::gemini::CompletionGateway;

/// Analyzes one recorded response against the questions asked.
///
/// Gateway faults (upload, remote processing, transport) propagate; a model
/// response that cannot be parsed into a complete report is downgraded to
/// the fallback.
pub async fn analyze_video(
    gateway: &dyn CompletionGateway,
    video_path: &Path,
    mime_type: &str,
    questions: &[String],
    role: &str,
    context: &str,
) -> Result<Normalized<FeedbackReport>, AppError> {
    let prompt = build_feedback_prompt(role, context, questions);
    let raw = gateway
        .complete_with_video(&prompt, video_path, mime_type)
        .await?;

    debug!("Raw feedback response: {}", preview(&raw));

    Ok(normalize_feedback(&raw, role))
}

/// Parses model output into a `FeedbackReport`.
///
/// Every mandatory field must be present with the right type; sequences may
/// be empty. A report missing anything is replaced wholesale by the
/// fallback, never partially repaired.
pub fn normalize_feedback(raw: &str, role: &str) -> Normalized<FeedbackReport> {
    let cleaned = clean_model_json(raw);

    match serde_json::from_str::<FeedbackReport>(&cleaned) {
        Ok(report) => Normalized::parsed(report),
        Err(e) => {
            warn!("Feedback response failed normalization ({e}), serving fallback report");
            Normalized::fallback(FeedbackReport::fallback(role))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_report_json() -> String {
        serde_json::json!({
            "overall_score": 82,
            "content_feedback": {
                "score": 85,
                "strengths": ["Concrete examples from past projects"],
                "improvements": ["Tie answers back to the question asked"]
            },
            "verbal_feedback": {
                "score": 78,
                "strengths": ["Steady pace"],
                "improvements": ["Fewer filler words"]
            },
            "nonverbal_feedback": {
                "score": 80,
                "strengths": ["Good eye contact"],
                "improvements": ["Sit closer to the camera"]
            },
            "actionable_tips": ["Practice the STAR format"],
            "similar_roles": [
                {"title": "Platform Engineer", "reason": "Strong infrastructure background"}
            ]
        })
        .to_string()
    }

    #[test]
    fn test_normalize_parses_complete_report() {
        let normalized = normalize_feedback(&valid_report_json(), "Backend Engineer");
        assert!(!normalized.degraded);
        assert_eq!(normalized.value.overall_score, 82);
        assert_eq!(normalized.value.content_feedback.score, 85);
        assert_eq!(normalized.value.similar_roles[0].title, "Platform Engineer");
    }

    #[test]
    fn test_normalize_parses_fenced_report() {
        let raw = format!("```json\n{}\n```", valid_report_json());
        let normalized = normalize_feedback(&raw, "Backend Engineer");
        assert!(!normalized.degraded);
        assert_eq!(normalized.value.overall_score, 82);
    }

    #[test]
    fn test_normalize_falls_back_on_missing_field() {
        // Drop a mandatory top-level field: the report must not be partially
        // repaired.
        let mut value: serde_json::Value =
            serde_json::from_str(&valid_report_json()).unwrap();
        value.as_object_mut().unwrap().remove("actionable_tips");

        let normalized = normalize_feedback(&value.to_string(), "Backend Engineer");
        assert!(normalized.degraded);
        assert_eq!(normalized.value, FeedbackReport::fallback("Backend Engineer"));
    }

    #[test]
    fn test_normalize_falls_back_on_missing_nested_score() {
        let mut value: serde_json::Value =
            serde_json::from_str(&valid_report_json()).unwrap();
        value["verbal_feedback"]
            .as_object_mut()
            .unwrap()
            .remove("score");

        let normalized = normalize_feedback(&value.to_string(), "Backend Engineer");
        assert!(normalized.degraded);
        assert_eq!(normalized.value.overall_score, 70);
    }

    #[test]
    fn test_normalize_falls_back_on_non_numeric_score() {
        let mut value: serde_json::Value =
            serde_json::from_str(&valid_report_json()).unwrap();
        value["overall_score"] = serde_json::json!("excellent");

        let normalized = normalize_feedback(&value.to_string(), "Backend Engineer");
        assert!(normalized.degraded);
    }

    #[test]
    fn test_normalize_falls_back_on_prose() {
        let normalized = normalize_feedback("I cannot analyze this video.", "Data Engineer");
        assert!(normalized.degraded);
        assert_eq!(
            normalized.value.similar_roles[0].title,
            "Data Engineer (Advanced)"
        );
    }
}
