/// Gemini Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through this module.
///
/// Model: gemini-2.0-flash-exp (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub mod normalize;

const API_BASE: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";
/// The model used for all completions, text and multimodal.
pub const MODEL: &str = "gemini-2.0-flash-exp";

/// Fixed interval between file-state polls while uploaded media is processing.
const POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Upper bound on poll attempts before the wait is declared a timeout.
const MAX_POLL_ATTEMPTS: u32 = 150;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model returned empty content")]
    EmptyContent,

    #[error("media processing failed: {0}")]
    MediaProcessing(String),

    #[error("media processing timed out after {waited_secs}s")]
    MediaProcessingTimeout { waited_secs: u64 },
}

/// The completion gateway trait. Implement this to swap the model backend
/// without touching handlers or flows.
///
/// Carried in `AppState` as `Arc<dyn CompletionGateway>`.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Sends a text-only prompt and returns the model's raw text.
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Uploads the video at `path`, waits for remote processing to finish,
    /// then runs one completion with the video attached. The remote file
    /// handle is released on every exit path.
    async fn complete_with_video(
        &self,
        prompt: &str,
        path: &Path,
        mime_type: &str,
    ) -> Result<String, GatewayError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileDataRef<'a>,
    },
}

#[derive(Debug, Serialize)]
struct FileDataRef<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    #[serde(rename = "fileUri")]
    file_uri: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Extracts the text of the first candidate's first text part.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.iter().find_map(|p| p.text.as_deref()))
    }
}

#[derive(Debug, Serialize)]
struct CreateFileRequest<'a> {
    file: CreateFileMeta<'a>,
}

#[derive(Debug, Serialize)]
struct CreateFileMeta<'a> {
    #[serde(rename = "displayName")]
    display_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct FileEnvelope {
    file: FileMetadata,
}

#[derive(Debug, Clone, Deserialize)]
struct FileMetadata {
    name: String,
    uri: String,
    state: FileState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum FileState {
    Processing,
    Active,
    Failed,
    #[serde(other)]
    Unknown,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single Gemini client shared by both agents.
/// Wraps the Gemini REST API for text and video-grounded completions.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Runs one `generateContent` round trip and extracts the response text.
    async fn generate(&self, parts: Vec<Part<'_>>) -> Result<String, GatewayError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content { parts }],
        };

        let url = format!("{API_BASE}/{API_VERSION}/models/{MODEL}:generateContent");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GenerateContentResponse = response.json().await?;
        let text = envelope.text().ok_or(GatewayError::EmptyContent)?;

        debug!("Completion succeeded ({} chars)", text.len());

        Ok(text.to_string())
    }

    /// Uploads media via the resumable upload protocol: one request to open
    /// the session, one to send the bytes and finalize.
    async fn upload_file(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<FileMetadata, GatewayError> {
        let start_url = format!("{API_BASE}/upload/{API_VERSION}/files");
        let response = self
            .client
            .post(&start_url)
            .header("x-goog-api-key", &self.api_key)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", bytes.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&CreateFileRequest {
                file: CreateFileMeta {
                    display_name: "interview-response",
                },
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let upload_url = response
            .headers()
            .get("X-Goog-Upload-URL")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| GatewayError::Api {
                status: status.as_u16(),
                message: "upload session response missing X-Goog-Upload-URL".to_string(),
            })?
            .to_string();

        let response = self
            .client
            .post(&upload_url)
            .header("X-Goog-Upload-Command", "upload, finalize")
            .header("X-Goog-Upload-Offset", "0")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: FileEnvelope = response.json().await?;
        Ok(envelope.file)
    }

    /// Polls the uploaded file at a fixed interval until it leaves the
    /// processing state. Bounded: exceeding `MAX_POLL_ATTEMPTS` is a timeout,
    /// not an indefinite hang.
    async fn poll_until_ready(&self, mut file: FileMetadata) -> Result<FileMetadata, GatewayError> {
        let mut attempts = 0u32;
        while file.state == FileState::Processing {
            if attempts >= MAX_POLL_ATTEMPTS {
                return Err(GatewayError::MediaProcessingTimeout {
                    waited_secs: u64::from(attempts) * POLL_INTERVAL.as_secs(),
                });
            }
            attempts += 1;
            debug!("Video still processing (attempt {attempts}/{MAX_POLL_ATTEMPTS})");
            tokio::time::sleep(POLL_INTERVAL).await;
            file = self.get_file(&file.name).await?;
        }

        if file.state == FileState::Failed {
            return Err(GatewayError::MediaProcessing(format!(
                "remote processing of {} ended in FAILED state",
                file.name
            )));
        }

        Ok(file)
    }

    async fn get_file(&self, name: &str) -> Result<FileMetadata, GatewayError> {
        // `name` is fully qualified, e.g. "files/abc123"
        let url = format!("{API_BASE}/{API_VERSION}/{name}");
        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Best-effort remote release. A leaked handle is logged, never escalated.
    async fn delete_file(&self, name: &str) {
        let url = format!("{API_BASE}/{API_VERSION}/{name}");
        match self
            .client
            .delete(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
        {
            Ok(response) if !response.status().is_success() => {
                warn!(
                    "Failed to delete remote file {name}: status {}",
                    response.status()
                );
            }
            Ok(_) => debug!("Deleted remote file {name}"),
            Err(e) => warn!("Failed to delete remote file {name}: {e}"),
        }
    }
}

#[async_trait]
impl CompletionGateway for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        self.generate(vec![Part::Text { text: prompt }]).await
    }

    async fn complete_with_video(
        &self,
        prompt: &str,
        path: &Path,
        mime_type: &str,
    ) -> Result<String, GatewayError> {
        let bytes = tokio::fs::read(path).await?;
        debug!("Uploading video ({} bytes, {mime_type})", bytes.len());

        let file = self.upload_file(bytes, mime_type).await?;

        let result = match self.poll_until_ready(file.clone()).await {
            Ok(ready) => {
                self.generate(vec![
                    Part::FileData {
                        file_data: FileDataRef {
                            mime_type,
                            file_uri: &ready.uri,
                        },
                    },
                    Part::Text { text: prompt },
                ])
                .await
            }
            Err(e) => Err(e),
        };

        // Release the remote handle regardless of the completion outcome.
        self.delete_file(&file.name).await;

        result
    }
}
