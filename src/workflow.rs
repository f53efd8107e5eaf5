//! Filing workflows — the multi-step backend flows driven as single
//! resumable operations.
//!
//! The create → analyze → save-intelligence sequence has no server-side
//! transaction: a failure mid-way leaves earlier steps committed. Rather
//! than hiding that, every failure reports the stage reached and the
//! persisted case id (if any), so the caller can tell the user exactly
//! what exists and resume from it instead of re-creating the case.

use serde::Serialize;

use crate::client::{ApiError, CancelToken, CaseServiceClient, IntelligencePatch};
use crate::models::{
    Case, CaseDraft, CaseId, CaseStatus, Evidence, EvidenceKind, EvidenceStatus,
    FactExtractionResponse,
};
use crate::store::CaseStore;

/// Which step of the filing flow was running when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilingStage {
    /// Persisting the draft (or fetching the existing case).
    Create,
    /// Running AI analysis on the narrative.
    Analyze,
    /// Saving the analysis results back to the case.
    SaveIntelligence,
}

impl FilingStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilingStage::Create => "create",
            FilingStage::Analyze => "analyze",
            FilingStage::SaveIntelligence => "save-intelligence",
        }
    }
}

impl std::fmt::Display for FilingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filing flow failure, with enough context to resume.
#[derive(Debug, thiserror::Error)]
#[error("Filing failed during {stage}: {source}")]
pub struct FilingError {
    pub stage: FilingStage,
    /// Set when the case was persisted before the failure — the flow can
    /// be resumed against this id.
    pub case_id: Option<CaseId>,
    #[source]
    pub source: ApiError,
}

/// Result of a completed filing flow.
#[derive(Debug, Clone)]
pub struct FilingOutcome {
    /// The case as the backend last returned it (intelligence merged).
    pub case: Case,
    /// The raw extraction, for immediate display.
    pub extraction: FactExtractionResponse,
    /// Whether this flow created the case (vs. re-analyzing an existing one).
    pub created: bool,
}

/// What to file: a brand-new draft, or a fresh analysis of a persisted case.
#[derive(Debug, Clone)]
pub enum FilingTarget {
    New(CaseDraft),
    Existing(CaseId),
}

/// Run the filing flow: persist the draft if needed, analyze the
/// narrative, and save the resulting intelligence. The store is kept in
/// step at each point so screens observe consistent data.
pub async fn file_and_analyze(
    client: &CaseServiceClient,
    store: &CaseStore,
    target: FilingTarget,
    cancel: &CancelToken,
) -> Result<FilingOutcome, FilingError> {
    // ── Step 1: establish a persisted case ──────────────────────────
    ensure_live(cancel, FilingStage::Create, None)?;
    let (case, created) = match target {
        FilingTarget::New(draft) => {
            let case = draft.into_case(CaseId::generate());
            let persisted = client.create_case(&case).await.map_err(|source| FilingError {
                stage: FilingStage::Create,
                case_id: None,
                source,
            })?;
            record_created(store, &persisted);
            (persisted, true)
        }
        FilingTarget::Existing(id) => {
            let case = match store.get_case(&id).ok().flatten() {
                Some(case) => case,
                None => {
                    let fetched =
                        client.get_case(&id).await.map_err(|source| FilingError {
                            stage: FilingStage::Create,
                            case_id: Some(id.clone()),
                            source,
                        })?;
                    if let Err(e) = store.add_case(fetched.clone()) {
                        tracing::warn!(case_id = %id, error = %e, "Store registration failed");
                    }
                    fetched
                }
            };
            (case, false)
        }
    };
    let case_id = case.id.clone();
    tracing::info!(case_id = %case_id, created, "Filing flow: case established");

    // ── Step 2: analyze the narrative ───────────────────────────────
    ensure_live(cancel, FilingStage::Analyze, Some(&case_id))?;
    let extraction = client
        .analyze(&case_id, &case.description)
        .await
        .map_err(|source| FilingError {
            stage: FilingStage::Analyze,
            case_id: Some(case_id.clone()),
            source,
        })?;

    // ── Step 3: save intelligence back to the case ──────────────────
    ensure_live(cancel, FilingStage::SaveIntelligence, Some(&case_id))?;
    let patch = IntelligencePatch::from(&extraction);
    let saved = client
        .save_intelligence(&case_id, &patch)
        .await
        .map_err(|source| FilingError {
            stage: FilingStage::SaveIntelligence,
            case_id: Some(case_id.clone()),
            source,
        })?;

    // keep the session view in step; the server copy is authoritative
    if let Err(e) = store.apply_intelligence(&case_id, &extraction) {
        tracing::warn!(case_id = %case_id, error = %e, "Store intelligence merge failed");
    }

    tracing::info!(case_id = %case_id, "Filing flow complete");
    Ok(FilingOutcome {
        case: saved,
        extraction,
        created,
    })
}

/// Upload one evidence file and (optionally) run media analysis on it,
/// driving the store's single-row upload lifecycle: the Processing
/// placeholder appears immediately and transitions in place to Analyzed
/// or Failed. A Failed row is never retried — a retry is a new upload.
pub async fn upload_and_analyze_evidence(
    client: &CaseServiceClient,
    store: &CaseStore,
    case_id: &CaseId,
    file_name: &str,
    bytes: Vec<u8>,
    prompt: Option<&str>,
    cancel: &CancelToken,
) -> Result<Evidence, ApiError> {
    if !case_id.is_persisted() {
        return Err(ApiError::UnsavedCase);
    }
    if cancel.is_cancelled() {
        return Err(ApiError::Cancelled);
    }

    // the store must know the case before it can hold the placeholder
    if store.get_case(case_id).ok().flatten().is_none() {
        let fetched = client.get_case(case_id).await?;
        if let Err(e) = store.add_case(fetched) {
            tracing::warn!(case_id = %case_id, error = %e, "Store registration failed");
        }
    }

    let kind = Evidence::kind_for_file(file_name);
    let upload_id = match store.begin_upload(case_id, file_name, kind, None) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(case_id = %case_id, error = %e, "No upload placeholder");
            None
        }
    };

    let result = run_upload(client, case_id, file_name, bytes, kind, prompt, cancel).await;

    match result {
        Ok(mut resolved) => {
            if let Some(upload_id) = upload_id {
                match store.complete_upload(case_id, &upload_id, resolved.clone()) {
                    Ok(stored) => return Ok(stored),
                    Err(e) => {
                        tracing::warn!(case_id = %case_id, error = %e, "Upload resolution lost")
                    }
                }
            }
            // the server accepted the file even if the session view lost track
            resolved.status = EvidenceStatus::Analyzed;
            Ok(resolved)
        }
        Err(source) => {
            if let Some(upload_id) = upload_id {
                if let Err(e) = store.fail_upload(case_id, &upload_id) {
                    tracing::warn!(case_id = %case_id, error = %e, "Could not mark upload failed");
                }
            }
            Err(source)
        }
    }
}

async fn run_upload(
    client: &CaseServiceClient,
    case_id: &CaseId,
    file_name: &str,
    bytes: Vec<u8>,
    kind: EvidenceKind,
    prompt: Option<&str>,
    cancel: &CancelToken,
) -> Result<Evidence, ApiError> {
    let mut evidence = client
        .upload_evidence(case_id, file_name, bytes.clone())
        .await?;

    if let Some(prompt) = prompt {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        let analysis = client
            .analyze_media(kind.media_kind(), file_name, bytes, prompt)
            .await?;
        evidence.analysis = Some(analysis.analysis);
    }
    Ok(evidence)
}

fn record_created(store: &CaseStore, case: &Case) {
    if let Err(e) = store.add_case(case.clone()) {
        tracing::warn!(case_id = %case.id, error = %e, "Store registration failed");
        return;
    }
    // the case is now live on the server
    if let Err(e) = store.update_case_status(&case.id, CaseStatus::Active) {
        tracing::warn!(case_id = %case.id, error = %e, "Could not activate case");
    }
}

fn ensure_live(
    cancel: &CancelToken,
    stage: FilingStage,
    case_id: Option<&CaseId>,
) -> Result<(), FilingError> {
    if cancel.is_cancelled() {
        Err(FilingError {
            stage,
            case_id: case_id.cloned(),
            source: ApiError::Cancelled,
        })
    } else {
        Ok(())
    }
}
