//! Evidence gap checklist — which documents a case of this type needs
//! and which are still missing. Pure and display-only, like the strength
//! score.
//!
//! Presence of most case-specific items is approximated as "any evidence
//! exists": uploads carry no category, so the checklist cannot tell a
//! post-mortem report from a photo. Known approximation, kept as-is.

use serde::Serialize;

use super::classify::{classify_case_type, CaseTag};

/// What the checklist is derived from.
#[derive(Debug, Clone, Default)]
pub struct ChecklistInputs<'a> {
    pub case_type: &'a str,
    pub has_description: bool,
    pub has_complainant: bool,
    pub has_location: bool,
    pub has_incident_date: bool,
    pub has_incident_time: bool,
    pub evidence_count: usize,
}

/// One required item. `critical` items are the ones the case is weak
/// without.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub name: &'static str,
    pub present: bool,
    pub critical: bool,
}

/// The full checklist for a case.
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceChecklist {
    pub items: Vec<ChecklistItem>,
}

impl EvidenceChecklist {
    /// Percent of items present, rounded to the nearest integer.
    pub fn completion_rate(&self) -> u8 {
        let present = self.items.iter().filter(|i| i.present).count();
        let total = self.items.len();
        (((present * 100) as f64 / total as f64).round()) as u8
    }

    /// Critical items still missing.
    pub fn missing_critical(&self) -> Vec<&ChecklistItem> {
        self.items
            .iter()
            .filter(|i| i.critical && !i.present)
            .collect()
    }
}

/// Build the checklist: four base items every case needs, plus items
/// activated by the offence families matched in the case type.
pub fn evidence_checklist(inputs: &ChecklistInputs) -> EvidenceChecklist {
    let has_any_evidence = inputs.evidence_count > 0;
    let mut items = vec![
        ChecklistItem {
            name: "FIR Narrative",
            present: inputs.has_description,
            critical: true,
        },
        ChecklistItem {
            name: "Complainant Details",
            present: inputs.has_complainant,
            critical: true,
        },
        ChecklistItem {
            name: "Incident Location",
            present: inputs.has_location,
            critical: true,
        },
        ChecklistItem {
            name: "Date & Time",
            present: inputs.has_incident_date && inputs.has_incident_time,
            critical: true,
        },
    ];

    let profile = classify_case_type(inputs.case_type);

    if profile.has(CaseTag::Assault) {
        items.push(ChecklistItem {
            name: "Medical Report",
            present: has_any_evidence,
            critical: true,
        });
        items.push(ChecklistItem {
            name: "Injury Photographs",
            present: has_any_evidence,
            critical: false,
        });
    }

    if profile.has(CaseTag::Theft) {
        items.push(ChecklistItem {
            name: "List of Stolen Items",
            present: inputs.has_description,
            critical: true,
        });
        // no structured witness capture exists; always outstanding
        items.push(ChecklistItem {
            name: "Witness Statements",
            present: false,
            critical: false,
        });
    }

    if profile.has(CaseTag::SexualOffence) {
        items.push(ChecklistItem {
            name: "Medical Examination Report",
            present: has_any_evidence,
            critical: true,
        });
        items.push(ChecklistItem {
            name: "Forensic Evidence",
            present: has_any_evidence,
            critical: true,
        });
    }

    if profile.has(CaseTag::Homicide) {
        items.push(ChecklistItem {
            name: "Post-Mortem Report",
            present: has_any_evidence,
            critical: true,
        });
        items.push(ChecklistItem {
            name: "Crime Scene Photos",
            present: has_any_evidence,
            critical: true,
        });
        items.push(ChecklistItem {
            name: "Weapon/Evidence",
            present: has_any_evidence,
            critical: false,
        });
    }

    EvidenceChecklist { items }
}
