// All prompt constants for Agent 1 (question generation).

/// Question generation prompt template.
/// Replace `{role}` and `{context}` before sending.
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are an expert interview coach. Generate 5 highly specific, technical interview questions for a {role} position based on the candidate's background below.

CRITICAL RULES:
1. Questions MUST be directly related to specific projects, technologies, or experiences mentioned in the background
2. Avoid generic questions like "Tell me about yourself" or "What are your strengths"
3. Focus on technical depth and real-world scenarios
4. Each question should probe understanding of decisions they made in their past work

Candidate Background:
{context}

Generate exactly 5 questions. Return ONLY a JSON array of strings, nothing else.
Example format: ["Question 1?", "Question 2?", "Question 3?", "Question 4?", "Question 5?"]"#;

/// Renders the question generation prompt for a role and candidate background.
pub fn build_question_prompt(role: &str, context: &str) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{context}", context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_question_prompt_embeds_role_and_context() {
        let prompt = build_question_prompt("Backend Engineer", "Built a rate limiter in Rust.");
        assert!(prompt.contains("for a Backend Engineer position"));
        assert!(prompt.contains("Built a rate limiter in Rust."));
    }

    #[test]
    fn test_build_question_prompt_leaves_no_placeholders() {
        let prompt = build_question_prompt("SRE", "Ran a fleet of Kafka clusters.");
        assert!(!prompt.contains("{role}"));
        assert!(!prompt.contains("{context}"));
    }

    #[test]
    fn test_build_question_prompt_demands_bare_json_array() {
        let prompt = build_question_prompt("SRE", "ctx");
        assert!(prompt.contains("Return ONLY a JSON array of strings"));
    }
}
