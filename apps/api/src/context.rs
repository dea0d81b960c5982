//! Context Resolver — turns an uploaded resume PDF or a free-text description
//! into the plain-text candidate background used by both agents.

use tracing::debug;

use crate::errors::AppError;

/// Resolves the candidate background from the request inputs.
///
/// A resume takes precedence; otherwise a non-blank description is passed
/// through verbatim. Rejects the request before any model call when neither
/// input is usable.
pub fn resolve_context(
    resume: Option<&[u8]>,
    description: Option<&str>,
) -> Result<String, AppError> {
    if let Some(bytes) = resume {
        return extract_resume_text(bytes);
    }

    match description {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(AppError::Validation(
            "Must provide either resume or description".to_string(),
        )),
    }
}

/// Extracts all text from a resume PDF and normalizes its whitespace.
/// Whitespace normalization only — no summarization.
fn extract_resume_text(bytes: &[u8]) -> Result<String, AppError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::DocumentParse(format!("Error parsing PDF: {e}")))?;

    let text = normalize_document_text(&raw);
    debug!("Extracted {} chars of resume text", text.len());
    Ok(text)
}

/// Collapses extracted document text to trimmed, non-blank lines rejoined
/// with newlines.
fn normalize_document_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
