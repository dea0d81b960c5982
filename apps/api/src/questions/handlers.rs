//! Axum route handlers for Agent 1.

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::context::resolve_context;
use crate::errors::AppError;
use crate::questions::generator::generate_questions;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub success: bool,
    pub role: String,
    pub questions: Vec<String>,
    pub context_length: usize,
    pub degraded: bool,
}

/// POST /agent1/generate-questions
///
/// Multipart form: `role` (required), `resume` (PDF file, optional),
/// `description` (text, optional). One of resume/description must be usable.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let mut role: Option<String> = None;
    let mut resume: Option<Bytes> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some("role") => role = Some(read_text(field).await?),
            Some("resume") => {
                let bytes = read_bytes(field).await?;
                // An empty file part means no resume was attached.
                if !bytes.is_empty() {
                    resume = Some(bytes);
                }
            }
            Some("description") => description = Some(read_text(field).await?),
            _ => {}
        }
    }

    let role = role.ok_or_else(|| AppError::Validation("Missing 'role' field".to_string()))?;

    let context = resolve_context(resume.as_deref(), description.as_deref())?;

    info!(
        "Generating questions for role '{role}' ({} chars of context)",
        context.len()
    );

    let normalized = generate_questions(state.gateway.as_ref(), &role, &context).await?;

    Ok(Json(GenerateQuestionsResponse {
        success: true,
        context_length: context.len(),
        questions: normalized.value,
        degraded: normalized.degraded,
        role,
    }))
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart field: {e}")))
}

async fn read_bytes(field: Field<'_>) -> Result<Bytes, AppError> {
    field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart field: {e}")))
}
