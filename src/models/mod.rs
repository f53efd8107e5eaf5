//! Data model shared by the backend client, the session store, and the
//! scoring heuristics: cases, evidence, analysis results, and the closed
//! status enums with their transition tables.

pub mod case;
pub mod enums;
pub mod evidence;
pub mod intelligence;

pub use case::{Case, CaseDraft, CaseId, UNSAVED_CASE_ID};
pub use enums::{
    CaseStatus, EvidenceKind, EvidenceStatus, MediaKind, ParseEnumError, Priority,
};
pub use evidence::{Evidence, EvidenceId};
pub use intelligence::{CaseMetadata, FactExtractionResponse, LawMapping};
