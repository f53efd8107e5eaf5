//! HTTP client for the case-management backend (`/api/v1`).
//!
//! Thin, typed wrappers over the REST surface — one async method per
//! endpoint, no business logic. All failures come back as `ApiError`;
//! nothing is logged-and-swallowed here.

pub mod cancel;
pub mod error;
pub mod types;

use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

pub use cancel::CancelToken;
pub use error::ApiError;
pub use types::{AnalyzeRequest, ChatReply, IntelligencePatch, MediaAnalysis, DOC_TYPE_FIR};

use crate::config::BackendConfig;
use crate::models::{Case, CaseId, Evidence, FactExtractionResponse, LawMapping, MediaKind};

/// Backend service client. Cheap to clone-by-construction: build one per
/// session and share it by reference.
pub struct CaseServiceClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl CaseServiceClient {
    pub fn new(config: BackendConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Client configured from `FIRDESK_API_URL` (or the local default).
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(BackendConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    fn timeout_secs(&self) -> u64 {
        self.config.timeout().as_secs()
    }

    // ── Case CRUD ───────────────────────────────────────────────────

    /// `GET /cases/` — the full case list. No pagination or server-side
    /// filtering exists; filter client-side (see `CaseStore::search_by_title`).
    pub async fn get_cases(&self) -> Result<Vec<Case>, ApiError> {
        let response = self
            .http
            .get(self.url("/cases/"))
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        self.read_json(response).await
    }

    /// `GET /cases/{id}`.
    pub async fn get_case(&self, id: &CaseId) -> Result<Case, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/cases/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        self.read_json(response).await
    }

    /// `POST /cases/` — persist a draft under its client-chosen FIR id.
    /// The server echoes the case back; no idempotency key is used, so a
    /// duplicate submission makes a duplicate case.
    pub async fn create_case(&self, case: &Case) -> Result<Case, ApiError> {
        tracing::debug!(case_id = %case.id, "Creating case");
        let response = self
            .http
            .post(self.url("/cases/"))
            .json(case)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        self.read_json(response).await
    }

    /// `PATCH /cases/{id}/intelligence` — merge AI results into a
    /// persisted case. Last writer wins; there is no concurrency token.
    pub async fn save_intelligence(
        &self,
        id: &CaseId,
        patch: &IntelligencePatch,
    ) -> Result<Case, ApiError> {
        tracing::debug!(case_id = %id, "Saving case intelligence");
        let response = self
            .http
            .patch(self.url(&format!("/cases/{id}/intelligence")))
            .json(patch)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        self.read_json(response).await
    }

    // ── Evidence ────────────────────────────────────────────────────

    /// `POST /cases/{id}/evidence` — multipart upload. Rejected locally,
    /// before any network I/O, when the case has never been saved.
    pub async fn upload_evidence(
        &self,
        case_id: &CaseId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Evidence, ApiError> {
        if !case_id.is_persisted() {
            return Err(ApiError::UnsavedCase);
        }
        tracing::debug!(case_id = %case_id, file_name, "Uploading evidence");
        let form = Form::new().part("file", file_part(file_name, bytes)?);
        let response = self
            .http
            .post(self.url(&format!("/cases/{case_id}/evidence")))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        self.read_json(response).await
    }

    /// Read a file from disk and upload it as evidence.
    pub async fn upload_evidence_file(
        &self,
        case_id: &CaseId,
        path: &std::path::Path,
    ) -> Result<Evidence, ApiError> {
        if !case_id.is_persisted() {
            return Err(ApiError::UnsavedCase);
        }
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        self.upload_evidence(case_id, &file_name, bytes).await
    }

    /// `GET /cases/{id}/evidence`.
    pub async fn get_evidence(&self, case_id: &CaseId) -> Result<Vec<Evidence>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/cases/{case_id}/evidence")))
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        self.read_json(response).await
    }

    /// `GET /cases/{id}/evidence/{file_name}` — raw file download, e.g.
    /// for local chain-of-custody verification.
    pub async fn download_evidence(
        &self,
        case_id: &CaseId,
        file_name: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/cases/{case_id}/evidence/{file_name}")))
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        let response = self.check_status(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        Ok(bytes.to_vec())
    }

    // ── AI services ─────────────────────────────────────────────────

    /// `POST /analyze` — extract summary, chronology, and law sections
    /// from a case narrative. Latency is the model's; the configured
    /// timeout is the only bound.
    pub async fn analyze(
        &self,
        case_id: &CaseId,
        case_text: &str,
    ) -> Result<FactExtractionResponse, ApiError> {
        tracing::debug!(case_id = %case_id, chars = case_text.len(), "Requesting analysis");
        let body = AnalyzeRequest {
            case_id: case_id.as_str(),
            case_text,
            doc_type: DOC_TYPE_FIR,
        };
        let response = self
            .http
            .post(self.url("/analyze"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        self.read_json(response).await
    }

    /// `POST /gemini/analyze/{image|video|doc}` — one file plus a prompt.
    pub async fn analyze_media(
        &self,
        kind: MediaKind,
        file_name: &str,
        bytes: Vec<u8>,
        prompt: &str,
    ) -> Result<MediaAnalysis, ApiError> {
        tracing::debug!(kind = %kind, file_name, "Requesting media analysis");
        let form = Form::new()
            .part("file", file_part(file_name, bytes)?)
            .text("prompt", prompt.to_string());
        let response = self
            .http
            .post(self.url(&format!("/gemini/analyze/{kind}")))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        self.read_json(response).await
    }

    /// `POST /gemini/chat` — one-shot chat; conversation history lives
    /// on the client, the server is stateless.
    pub async fn chat(&self, message: &str) -> Result<ChatReply, ApiError> {
        tracing::debug!(chars = message.len(), "Sending chat message");
        let form = Form::new().text("message", message.to_string());
        let response = self
            .http
            .post(self.url("/gemini/chat"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        self.read_json(response).await
    }

    /// `GET /map-law/{section}` — IPC→BNS lookup. Unmapped sections are
    /// a `NotFound` for the caller to surface inline.
    pub async fn map_law(&self, ipc_section: &str) -> Result<LawMapping, ApiError> {
        tracing::debug!(ipc_section, "Looking up BNS mapping");
        let response = self
            .http
            .get(self.url(&format!("/map-law/{ipc_section}")))
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))?;
        self.read_json(response).await
    }

    // ── Response handling ───────────────────────────────────────────

    async fn check_status(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_detail(&body);
        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            s if s.is_client_error() => ApiError::Validation {
                status: s.as_u16(),
                message,
            },
            s => ApiError::Server {
                status: s.as_u16(),
                body: message,
            },
        })
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let response = self.check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_secs()))
    }
}

/// FastAPI-style errors carry `{"detail": "..."}`; fall back to the raw body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

fn file_part(file_name: &str, bytes: Vec<u8>) -> Result<Part, ApiError> {
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime.essence_str())
        .map_err(|e| ApiError::Network(e.to_string()))
}
