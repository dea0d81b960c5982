//! Feedback report wire types shared by the analyzer and its callers.

use serde::{Deserialize, Serialize};

/// Structured multimodal feedback for one recorded interview response.
///
/// Every field is mandatory in a successful parse; a model response missing
/// any of them is replaced wholesale by `FeedbackReport::fallback`, never
/// partially repaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub overall_score: u32,
    pub content_feedback: DimensionFeedback,
    pub verbal_feedback: DimensionFeedback,
    pub nonverbal_feedback: DimensionFeedback,
    pub actionable_tips: Vec<String>,
    pub similar_roles: Vec<RoleSuggestion>,
}

/// One scored feedback axis: content quality, verbal delivery, or non-verbal
/// communication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionFeedback {
    pub score: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

/// A suggested adjacent role and why it fits the candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSuggestion {
    pub title: String,
    pub reason: String,
}

impl FeedbackReport {
    /// Fixed low-information report served when analysis cannot be completed.
    pub fn fallback(role: &str) -> Self {
        Self {
            overall_score: 70,
            content_feedback: DimensionFeedback {
                score: 70,
                strengths: vec!["Good attempt at answering questions".to_string()],
                improvements: vec!["Analysis failed - please try again".to_string()],
            },
            verbal_feedback: DimensionFeedback {
                score: 70,
                strengths: vec!["Video received successfully".to_string()],
                improvements: vec!["Could not analyze verbal delivery".to_string()],
            },
            nonverbal_feedback: DimensionFeedback {
                score: 70,
                strengths: vec!["Video quality acceptable".to_string()],
                improvements: vec!["Could not analyze non-verbal cues".to_string()],
            },
            actionable_tips: vec![
                "Ensure good lighting for video recording".to_string(),
                "Position camera at eye level".to_string(),
                "Try recording again for detailed analysis".to_string(),
            ],
            similar_roles: vec![
                RoleSuggestion {
                    title: format!("{role} (Advanced)"),
                    reason: "Natural progression in your current field".to_string(),
                },
                RoleSuggestion {
                    title: "Technical Lead".to_string(),
                    reason: "Leadership opportunity based on your experience".to_string(),
                },
                RoleSuggestion {
                    title: "Solutions Architect".to_string(),
                    reason: "Combines technical and strategic skills".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_report_scores_are_all_70() {
        let report = FeedbackReport::fallback("Backend Engineer");
        assert_eq!(report.overall_score, 70);
        assert_eq!(report.content_feedback.score, 70);
        assert_eq!(report.verbal_feedback.score, 70);
        assert_eq!(report.nonverbal_feedback.score, 70);
    }

    #[test]
    fn test_fallback_report_substitutes_role() {
        let report = FeedbackReport::fallback("Data Engineer");
        assert_eq!(report.similar_roles[0].title, "Data Engineer (Advanced)");
    }

    #[test]
    fn test_report_round_trips_through_serde() {
        let report = FeedbackReport::fallback("SRE");
        let json = serde_json::to_string(&report).unwrap();
        let back: FeedbackReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_report_rejects_missing_mandatory_field() {
        // No actionable_tips — the whole report must fail to parse.
        let json = r#"{
            "overall_score": 85,
            "content_feedback": {"score": 80, "strengths": [], "improvements": []},
            "verbal_feedback": {"score": 80, "strengths": [], "improvements": []},
            "nonverbal_feedback": {"score": 80, "strengths": [], "improvements": []},
            "similar_roles": []
        }"#;
        assert!(serde_json::from_str::<FeedbackReport>(json).is_err());
    }

    #[test]
    fn test_report_accepts_empty_sequences() {
        let json = r#"{
            "overall_score": 85,
            "content_feedback": {"score": 80, "strengths": [], "improvements": []},
            "verbal_feedback": {"score": 80, "strengths": [], "improvements": []},
            "nonverbal_feedback": {"score": 80, "strengths": [], "improvements": []},
            "actionable_tips": [],
            "similar_roles": []
        }"#;
        let report: FeedbackReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.overall_score, 85);
        assert!(report.actionable_tips.is_empty());
    }
}
