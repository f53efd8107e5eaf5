//! In-memory session store for cases and their evidence.
//!
//! Holds the authoritative client-side view for the current session,
//! backed by `RwLock` so UI transports can read concurrently. The store
//! is an explicit injected object — construct one and pass it around;
//! nothing here is ambient. Nothing is persisted.

use std::sync::RwLock;

use crate::models::{
    Case, CaseId, CaseStatus, Evidence, EvidenceId, EvidenceKind, EvidenceStatus,
    FactExtractionResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Case not found: {0}")]
    CaseNotFound(CaseId),

    #[error("Evidence not found: {0}")]
    EvidenceNotFound(EvidenceId),

    #[error("Invalid case status transition: {from} -> {to}")]
    InvalidStatusTransition { from: CaseStatus, to: CaseStatus },

    #[error("Invalid evidence status transition: {from} -> {to}")]
    InvalidEvidenceTransition {
        from: EvidenceStatus,
        to: EvidenceStatus,
    },

    #[error("Case is not persisted yet; save it before attaching evidence")]
    UnsavedCase,

    #[error("Store lock poisoned")]
    LockFailed,
}

/// One case plus its evidence, newest evidence first.
struct CaseRecord {
    case: Case,
    evidence: Vec<Evidence>,
}

/// Session store. Newest case first.
pub struct CaseStore {
    records: RwLock<Vec<CaseRecord>>,
}

impl CaseStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Register a case, prepending it to the session list. Evidence
    /// starts empty; upload order is preserved most-recent-first.
    pub fn add_case(&self, case: Case) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockFailed)?;
        tracing::debug!(case_id = %case.id, "Registering case in session store");
        records.insert(
            0,
            CaseRecord {
                case,
                evidence: Vec::new(),
            },
        );
        Ok(())
    }

    /// Exact-match lookup. Absence is `None`, not an error — callers
    /// check before dereferencing.
    pub fn get_case(&self, id: &CaseId) -> Result<Option<Case>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockFailed)?;
        Ok(records.iter().find(|r| &r.case.id == id).map(|r| r.case.clone()))
    }

    /// All cases in session order (newest first).
    pub fn list_cases(&self) -> Result<Vec<Case>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockFailed)?;
        Ok(records.iter().map(|r| r.case.clone()).collect())
    }

    /// Case-insensitive substring filter on the title. The backend has
    /// no query parameters; filtering happens here.
    pub fn search_by_title(&self, query: &str) -> Result<Vec<Case>, StoreError> {
        let needle = query.to_lowercase();
        let records = self.records.read().map_err(|_| StoreError::LockFailed)?;
        Ok(records
            .iter()
            .filter(|r| r.case.title.to_lowercase().contains(&needle))
            .map(|r| r.case.clone())
            .collect())
    }

    /// Evidence for one case, newest first.
    pub fn evidence_for(&self, case_id: &CaseId) -> Result<Vec<Evidence>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockFailed)?;
        let record = records
            .iter()
            .find(|r| &r.case.id == case_id)
            .ok_or_else(|| StoreError::CaseNotFound(case_id.clone()))?;
        Ok(record.evidence.clone())
    }

    /// Upsert an evidence item by id: replace in place when the id is
    /// already present (the second write's fields win), otherwise
    /// prepend. One logical upload therefore maps to exactly one row —
    /// no "Processing" ghost alongside the final entry.
    pub fn add_evidence(&self, case_id: &CaseId, item: Evidence) -> Result<(), StoreError> {
        if !case_id.is_persisted() {
            return Err(StoreError::UnsavedCase);
        }
        let mut records = self.records.write().map_err(|_| StoreError::LockFailed)?;
        let record = records
            .iter_mut()
            .find(|r| &r.case.id == case_id)
            .ok_or_else(|| StoreError::CaseNotFound(case_id.clone()))?;

        if let Some(existing) = record.evidence.iter_mut().find(|e| e.id == item.id) {
            tracing::debug!(case_id = %case_id, evidence_id = %item.id, "Replacing evidence in place");
            *existing = item;
        } else {
            record.evidence.insert(0, item);
        }
        Ok(())
    }

    /// Move a case to a new status, enforcing the transition table.
    /// Writing the current status again is a no-op.
    pub fn update_case_status(
        &self,
        case_id: &CaseId,
        next: CaseStatus,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockFailed)?;
        let record = records
            .iter_mut()
            .find(|r| &r.case.id == case_id)
            .ok_or_else(|| StoreError::CaseNotFound(case_id.clone()))?;

        let current = record.case.status;
        if current == next {
            return Ok(());
        }
        if !current.can_transition_to(next) {
            return Err(StoreError::InvalidStatusTransition {
                from: current,
                to: next,
            });
        }
        tracing::debug!(case_id = %case_id, from = %current, to = %next, "Case status change");
        record.case.status = next;
        Ok(())
    }

    /// Merge AI results into the stored case the way the backend's
    /// intelligence PATCH does, returning the updated copy.
    pub fn apply_intelligence(
        &self,
        case_id: &CaseId,
        response: &FactExtractionResponse,
    ) -> Result<Case, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockFailed)?;
        let record = records
            .iter_mut()
            .find(|r| &r.case.id == case_id)
            .ok_or_else(|| StoreError::CaseNotFound(case_id.clone()))?;

        record.case.merge_intelligence(
            &response.summary,
            &response.chronological_facts,
            &response.potential_bns_sections,
            response.metadata.as_ref(),
        );
        Ok(record.case.clone())
    }

    // ── Optimistic upload lifecycle ─────────────────────────────────

    /// Start an upload: create the single mutable record for this
    /// logical upload, in `Processing` state, keyed by a correlation id.
    pub fn begin_upload(
        &self,
        case_id: &CaseId,
        file_name: &str,
        kind: EvidenceKind,
        uri: Option<String>,
    ) -> Result<EvidenceId, StoreError> {
        if !case_id.is_persisted() {
            return Err(StoreError::UnsavedCase);
        }
        let placeholder = Evidence::placeholder(case_id.clone(), file_name, kind, uri);
        let upload_id = placeholder.id.clone();
        self.add_evidence(case_id, placeholder)?;
        Ok(upload_id)
    }

    /// Resolve an upload: the placeholder transitions in place to
    /// `Analyzed`, taking on the backend's record (id included) while
    /// keeping the client-side kind and local uri.
    pub fn complete_upload(
        &self,
        case_id: &CaseId,
        upload_id: &EvidenceId,
        mut resolved: Evidence,
    ) -> Result<Evidence, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockFailed)?;
        let record = records
            .iter_mut()
            .find(|r| &r.case.id == case_id)
            .ok_or_else(|| StoreError::CaseNotFound(case_id.clone()))?;
        let slot = record
            .evidence
            .iter_mut()
            .find(|e| &e.id == upload_id)
            .ok_or_else(|| StoreError::EvidenceNotFound(upload_id.clone()))?;

        if !slot.status.can_transition_to(EvidenceStatus::Analyzed) {
            return Err(StoreError::InvalidEvidenceTransition {
                from: slot.status,
                to: EvidenceStatus::Analyzed,
            });
        }
        resolved.status = EvidenceStatus::Analyzed;
        resolved.kind = slot.kind;
        if resolved.uri.is_none() {
            resolved.uri = slot.uri.clone();
        }
        *slot = resolved;
        Ok(slot.clone())
    }

    /// Mark an upload failed. Terminal: the row is never retried under
    /// this id — a retry is a fresh upload with a new correlation id.
    pub fn fail_upload(&self, case_id: &CaseId, upload_id: &EvidenceId) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockFailed)?;
        let record = records
            .iter_mut()
            .find(|r| &r.case.id == case_id)
            .ok_or_else(|| StoreError::CaseNotFound(case_id.clone()))?;
        let slot = record
            .evidence
            .iter_mut()
            .find(|e| &e.id == upload_id)
            .ok_or_else(|| StoreError::EvidenceNotFound(upload_id.clone()))?;

        if !slot.status.can_transition_to(EvidenceStatus::Failed) {
            return Err(StoreError::InvalidEvidenceTransition {
                from: slot.status,
                to: EvidenceStatus::Failed,
            });
        }
        tracing::warn!(case_id = %case_id, upload_id = %upload_id, "Upload marked failed");
        slot.status = EvidenceStatus::Failed;
        Ok(())
    }
}

impl Default for CaseStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaseDraft, CaseMetadata};

    fn persisted_case(id: &str, title: &str) -> Case {
        CaseDraft {
            title: title.into(),
            description: "Sample case description.".into(),
            ..Default::default()
        }
        .into_case(CaseId::new(id))
    }

    fn sample_evidence(id: &str, case_id: &CaseId) -> Evidence {
        Evidence {
            id: EvidenceId::new(id),
            case_id: case_id.clone(),
            file_name: "scene.jpg".into(),
            file_type: "image/jpeg".into(),
            file_hash: Some("abc".into()),
            uploaded_at: None,
            kind: EvidenceKind::Image,
            status: EvidenceStatus::Pending,
            uri: None,
            analysis: None,
        }
    }

    #[test]
    fn cases_are_listed_newest_first() {
        let store = CaseStore::new();
        store.add_case(persisted_case("FIR-10001", "First")).unwrap();
        store.add_case(persisted_case("FIR-10002", "Second")).unwrap();
        let cases = store.list_cases().unwrap();
        assert_eq!(cases[0].title, "Second");
        assert_eq!(cases[1].title, "First");
    }

    #[test]
    fn lookup_misses_return_none() {
        let store = CaseStore::new();
        assert!(store.get_case(&CaseId::new("FIR-99999")).unwrap().is_none());
    }

    #[test]
    fn title_search_is_substring_and_case_insensitive() {
        let store = CaseStore::new();
        store
            .add_case(persisted_case("FIR-10001", "State v. Sharma"))
            .unwrap();
        store
            .add_case(persisted_case("FIR-10002", "Land Dispute: Patil"))
            .unwrap();
        let hits = store.search_by_title("sharma").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "State v. Sharma");
        assert_eq!(store.search_by_title("").unwrap().len(), 2);
    }

    #[test]
    fn add_evidence_upserts_by_id() {
        let store = CaseStore::new();
        let case_id = CaseId::new("FIR-10001");
        store.add_case(persisted_case("FIR-10001", "Theft")).unwrap();

        let first = sample_evidence("EVD-1", &case_id);
        let mut second = sample_evidence("EVD-1", &case_id);
        second.analysis = Some("Updated finding".into());

        store.add_evidence(&case_id, first).unwrap();
        store.add_evidence(&case_id, second).unwrap();

        let evidence = store.evidence_for(&case_id).unwrap();
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].analysis.as_deref(), Some("Updated finding"));
    }

    #[test]
    fn evidence_requires_persisted_case() {
        let store = CaseStore::new();
        let unsaved = CaseId::unsaved();
        let err = store
            .add_evidence(&unsaved, sample_evidence("EVD-1", &unsaved))
            .unwrap_err();
        assert!(matches!(err, StoreError::UnsavedCase));
    }

    #[test]
    fn status_transitions_are_validated() {
        let store = CaseStore::new();
        let case_id = CaseId::new("FIR-10001");
        store.add_case(persisted_case("FIR-10001", "Theft")).unwrap();

        // Draft -> Closed is not in the table
        let err = store
            .update_case_status(&case_id, CaseStatus::Closed)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidStatusTransition {
                from: CaseStatus::Draft,
                to: CaseStatus::Closed,
            }
        ));

        store.update_case_status(&case_id, CaseStatus::Active).unwrap();
        // same-status write is a no-op
        store.update_case_status(&case_id, CaseStatus::Active).unwrap();
        store
            .update_case_status(&case_id, CaseStatus::Analyzed)
            .unwrap();
        store.update_case_status(&case_id, CaseStatus::Closed).unwrap();
        assert_eq!(
            store.get_case(&case_id).unwrap().unwrap().status,
            CaseStatus::Closed
        );
    }

    #[test]
    fn upload_lifecycle_keeps_one_row() {
        let store = CaseStore::new();
        let case_id = CaseId::new("FIR-10001");
        store.add_case(persisted_case("FIR-10001", "Theft")).unwrap();

        let upload_id = store
            .begin_upload(&case_id, "cctv.mp4", EvidenceKind::Video, None)
            .unwrap();
        assert_eq!(
            store.evidence_for(&case_id).unwrap()[0].status,
            EvidenceStatus::Processing
        );

        let mut resolved = sample_evidence("41", &case_id);
        resolved.file_name = "cctv.mp4".into();
        resolved.analysis = Some("One vehicle visible.".into());
        let stored = store
            .complete_upload(&case_id, &upload_id, resolved)
            .unwrap();

        let evidence = store.evidence_for(&case_id).unwrap();
        assert_eq!(evidence.len(), 1);
        assert_eq!(stored.status, EvidenceStatus::Analyzed);
        assert_eq!(stored.kind, EvidenceKind::Video);
        assert_eq!(evidence[0].id, EvidenceId::new("41"));
    }

    #[test]
    fn failed_upload_is_terminal() {
        let store = CaseStore::new();
        let case_id = CaseId::new("FIR-10001");
        store.add_case(persisted_case("FIR-10001", "Theft")).unwrap();

        let upload_id = store
            .begin_upload(&case_id, "scene.jpg", EvidenceKind::Image, None)
            .unwrap();
        store.fail_upload(&case_id, &upload_id).unwrap();

        let err = store
            .complete_upload(&case_id, &upload_id, sample_evidence("9", &case_id))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidEvidenceTransition {
                from: EvidenceStatus::Failed,
                ..
            }
        ));
    }

    #[test]
    fn apply_intelligence_merges_and_marks_analyzed() {
        let store = CaseStore::new();
        let case_id = CaseId::new("FIR-10001");
        store.add_case(persisted_case("FIR-10001", "Theft")).unwrap();

        let response = FactExtractionResponse {
            case_id: None,
            summary: "A theft at night.".into(),
            chronological_facts: vec!["Lock broken around 10 PM".into()],
            potential_bns_sections: vec!["BNS 303: Theft".into()],
            metadata: Some(CaseMetadata {
                location: Some("Main St".into()),
                ..Default::default()
            }),
        };
        let updated = store.apply_intelligence(&case_id, &response).unwrap();
        assert_eq!(updated.status, CaseStatus::Analyzed);
        assert_eq!(updated.location.as_deref(), Some("Main St"));
        assert_eq!(updated.chronology_facts().len(), 1);
    }
}
