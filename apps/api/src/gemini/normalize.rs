//! Response normalization — strips conversational/markdown wrapping from raw
//! model output before JSON parsing.
//!
//! The prompts demand bare JSON, but the model does not reliably comply: it
//! wraps output in ``` fences, adds a language tag, or appends prose. The
//! cleanup here is maximally permissive about that formatting noise; the
//! structural checks downstream stay strict and fail closed to fixed
//! fallback values.

/// A normalized value plus whether the fixed fallback was substituted.
///
/// `degraded` lets callers and observability tooling tell a genuine
/// low-information result apart from a parsing failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub value: T,
    pub degraded: bool,
}

impl<T> Normalized<T> {
    pub fn parsed(value: T) -> Self {
        Self {
            value,
            degraded: false,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            degraded: true,
        }
    }
}

/// Strips markdown code fences and residual fence tokens from model output.
///
/// Handles the wrapping variants seen in practice: no fence, fence with or
/// without a language tag, fence with trailing prose. Idempotent.
pub fn clean_model_json(raw: &str) -> String {
    let text = raw.trim();

    let text = if text.starts_with("```") {
        let mut lines: Vec<&str> = text.lines().collect();
        // First line is the opening fence, optionally with a language tag.
        lines.remove(0);
        if lines
            .last()
            .is_some_and(|line| line.trim_start().starts_with("```"))
        {
            lines.pop();
        }
        lines.join("\n")
    } else {
        text.to_string()
    };

    // Sweep any residual fence markers left mid-text.
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Truncates text to a bounded prefix for log lines, respecting char
/// boundaries.
pub fn preview(text: &str) -> &str {
    const MAX_CHARS: usize = 200;
    match text.char_indices().nth(MAX_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
