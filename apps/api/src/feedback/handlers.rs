//! Axum route handlers for Agent 2.

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::analyzer::analyze_video;
use crate::feedback::report::FeedbackReport;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeVideoResponse {
    pub success: bool,
    pub feedback: FeedbackReport,
    pub degraded: bool,
}

struct VideoUpload {
    bytes: Bytes,
    mime_type: String,
    file_name: Option<String>,
}

/// POST /agent2/analyze-video
///
/// Multipart form: `video` (file, required, content-type video/*),
/// `questions` (JSON-encoded array of strings), `role`, `context`.
///
/// Validation happens before any disk or network work. The upload lives in
/// a uniquely named temp file scoped to this request; the guard deletes it
/// on every exit path, success or failure.
pub async fn handle_analyze_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeVideoResponse>, AppError> {
    let mut video: Option<VideoUpload> = None;
    let mut questions_raw: Option<String> = None;
    let mut role: Option<String> = None;
    let mut context: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some("video") => {
                let mime_type = field.content_type().unwrap_or_default().to_string();
                let file_name = field.file_name().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid multipart field: {e}")))?;
                video = Some(VideoUpload {
                    bytes,
                    mime_type,
                    file_name,
                });
            }
            Some("questions") => questions_raw = Some(read_text(field).await?),
            Some("role") => role = Some(read_text(field).await?),
            Some("context") => context = Some(read_text(field).await?),
            _ => {}
        }
    }

    let video = video.ok_or_else(|| AppError::Validation("Missing 'video' field".to_string()))?;
    let questions_raw = questions_raw
        .ok_or_else(|| AppError::Validation("Missing 'questions' field".to_string()))?;
    let role = role.ok_or_else(|| AppError::Validation("Missing 'role' field".to_string()))?;
    let context =
        context.ok_or_else(|| AppError::Validation("Missing 'context' field".to_string()))?;

    if !video.mime_type.starts_with("video/") {
        return Err(AppError::Validation("File must be a video".to_string()));
    }

    let questions = parse_questions_field(&questions_raw)?;

    let analysis_id = Uuid::new_v4();
    let extension = video
        .file_name
        .as_deref()
        .and_then(|n| n.rsplit_once('.').map(|(_, ext)| ext.to_string()))
        .unwrap_or_else(|| "webm".to_string());

    let temp = tempfile::Builder::new()
        .prefix(&format!("interview-{analysis_id}-"))
        .suffix(&format!(".{extension}"))
        .tempfile()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create temp file: {e}")))?;

    tokio::fs::write(temp.path(), &video.bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to persist video upload: {e}")))?;

    info!(
        "Analyzing video response {analysis_id} ({} bytes, role '{role}')",
        video.bytes.len()
    );

    let normalized = analyze_video(
        state.gateway.as_ref(),
        temp.path(),
        &video.mime_type,
        &questions,
        &role,
        &context,
    )
    .await?;

    // `temp` drops here and on every early return above, removing the file.
    Ok(Json(AnalyzeVideoResponse {
        success: true,
        feedback: normalized.value,
        degraded: normalized.degraded,
    }))
}

/// GET /agent2/health
pub async fn handle_agent2_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "agent": "Agent 2 - Multimodal Coach"
    }))
}

/// Parses the `questions` form field: a JSON-encoded non-empty array of
/// strings.
fn parse_questions_field(raw: &str) -> Result<Vec<String>, AppError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|_| AppError::Validation("Invalid questions format".to_string()))?;

    let items = value
        .as_array()
        .ok_or_else(|| AppError::Validation("Questions must be an array".to_string()))?;

    let questions: Vec<String> = items
        .iter()
        .filter_map(|q| q.as_str().map(String::from))
        .collect();

    if questions.is_empty() {
        return Err(AppError::Validation(
            "Questions must be a non-empty array".to_string(),
        ));
    }

    Ok(questions)
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart field: {e}")))
}
