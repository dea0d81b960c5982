// All prompt constants for Agent 2 (video feedback).

/// Multimodal feedback prompt template.
/// Replace `{role}`, `{context}`, and `{questions}` before sending.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"You are an expert interview coach analyzing a candidate's video interview response.

**Interview Context:**
- Target Role: {role}
- Candidate Background: {context}

**Questions Asked:**
{questions}

**Your Task:**
Analyze the video comprehensively across three dimensions:

1. **Content Quality** (0-100):
   - Relevance to questions asked
   - Technical depth and accuracy
   - Structure and clarity of answers
   - Use of specific examples

2. **Verbal Delivery** (0-100):
   - Speaking pace and rhythm
   - Clarity and articulation
   - Confidence in tone
   - Filler words usage ("um", "uh", "like")
   - Pauses and hesitations

3. **Non-Verbal Communication** (0-100):
   - Facial expressions and engagement
   - Eye contact with camera
   - Posture and body language
   - Hand gestures (natural vs. distracting)
   - Overall confidence and presence

**Response Format:**
Return ONLY a JSON object with this exact structure (no markdown, no extra text):

{
  "overall_score": <number 0-100>,
  "content_feedback": {
    "score": <number 0-100>,
    "strengths": ["<specific strength 1>", "<specific strength 2>"],
    "improvements": ["<specific improvement 1>", "<specific improvement 2>"]
  },
  "verbal_feedback": {
    "score": <number 0-100>,
    "strengths": ["<specific strength 1>", "<specific strength 2>"],
    "improvements": ["<specific improvement 1>", "<specific improvement 2>"]
  },
  "nonverbal_feedback": {
    "score": <number 0-100>,
    "strengths": ["<specific strength 1>", "<specific strength 2>"],
    "improvements": ["<specific improvement 1>", "<specific improvement 2>"]
  },
  "actionable_tips": [
    "<concrete action 1>",
    "<concrete action 2>",
    "<concrete action 3>"
  ],
  "similar_roles": [
    {
      "title": "<job role title>",
      "reason": "<why this role fits based on their skills/background>"
    },
    {
      "title": "<job role title>",
      "reason": "<why this role fits based on their skills/background>"
    },
    {
      "title": "<job role title>",
      "reason": "<why this role fits based on their skills/background>"
    }
  ]
}

Be specific, honest, and constructive. Focus on actionable feedback.
For similar roles, suggest 3 relevant positions based on their demonstrated skills and background."#;

/// Renders the feedback prompt with a 1-indexed numbered question list.
pub fn build_feedback_prompt(role: &str, context: &str, questions: &[String]) -> String {
    let numbered = questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {q}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    FEEDBACK_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{context}", context)
        .replace("{questions}", &numbered)
}
