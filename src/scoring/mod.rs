//! Advisory heuristics computed from the current case file: a strength
//! estimate and an evidence gap checklist. Both are pure functions over
//! a typed case-type classification.

pub mod checklist;
pub mod classify;
pub mod strength;

pub use checklist::{evidence_checklist, ChecklistInputs, ChecklistItem, EvidenceChecklist};
pub use classify::{classify_case_type, CaseTag, CaseTypeProfile};
pub use strength::{case_strength, StrengthInputs, StrengthReport, StrengthVerdict};
