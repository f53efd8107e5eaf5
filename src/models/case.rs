use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enums::{CaseStatus, Priority};
use super::intelligence::CaseMetadata;

/// Sentinel id for a case that has not been persisted yet.
pub const UNSAVED_CASE_ID: &str = "new";

/// FIR number. Client-generated as `FIR-NNNNN`, immutable once the
/// backend has accepted it. The `"new"` sentinel (and the empty string)
/// mean "draft, not yet persisted".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh FIR number with a 5-digit random suffix.
    pub fn generate() -> Self {
        let n = rand::thread_rng().gen_range(10_000..100_000);
        Self(format!("FIR-{n}"))
    }

    pub fn unsaved() -> Self {
        Self(UNSAVED_CASE_ID.to_string())
    }

    /// Whether this id addresses a case the backend knows about.
    pub fn is_persisted(&self) -> bool {
        !self.0.is_empty() && self.0 != UNSAVED_CASE_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CaseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CaseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One incident report, as the backend stores it.
///
/// `chronology` and `bns_sections` stay in the backend's representation
/// (JSON-serialized string lists) so the struct round-trips unchanged;
/// use the typed accessors to read them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    pub title: String,
    pub description: String,
    pub case_type: String,
    pub status: CaseStatus,
    pub priority: Priority,
    pub officer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    // Structured fields, user-entered or AI-backfilled
    #[serde(default)]
    pub incident_date: Option<String>,
    #[serde(default)]
    pub incident_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub complainant: Option<String>,
    #[serde(default)]
    pub accused: Option<String>,
    // AI analysis results
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub chronology: Option<String>,
    #[serde(default)]
    pub bns_sections: Option<String>,
}

impl Case {
    /// Chronological facts extracted by analysis, oldest first.
    /// Empty when no intelligence has been saved.
    pub fn chronology_facts(&self) -> Vec<String> {
        parse_string_list(self.chronology.as_deref())
    }

    /// Law sections suggested by analysis.
    pub fn bns_section_list(&self) -> Vec<String> {
        parse_string_list(self.bns_sections.as_deref())
    }

    /// Merge AI results into the case, mirroring the backend's
    /// intelligence PATCH: summary/chronology/sections are overwritten
    /// and status moves to Analyzed. Structured fields are backfilled
    /// only where empty — a value the officer typed wins over an
    /// extracted one.
    pub fn merge_intelligence(
        &mut self,
        summary: &str,
        facts: &[String],
        laws: &[String],
        metadata: Option<&CaseMetadata>,
    ) {
        self.summary = Some(summary.to_string());
        self.chronology = serde_json::to_string(facts).ok();
        self.bns_sections = serde_json::to_string(laws).ok();
        self.status = CaseStatus::Analyzed;

        if let Some(meta) = metadata {
            backfill(&mut self.incident_date, &meta.incident_date);
            backfill(&mut self.incident_time, &meta.incident_time);
            backfill(&mut self.location, &meta.location);
            backfill(&mut self.complainant, &meta.complainant);
            backfill(&mut self.accused, &meta.accused);
        }
    }
}

fn parse_string_list(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

fn backfill(slot: &mut Option<String>, value: &Option<String>) {
    let empty = slot.as_deref().map_or(true, |s| s.trim().is_empty());
    if empty {
        if let Some(v) = value {
            *slot = Some(v.clone());
        }
    }
}

/// Pre-persistence form payload. Becomes a `Case` once an id is assigned.
/// Defaults mirror the backend model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseDraft {
    pub title: String,
    pub description: String,
    pub case_type: String,
    pub priority: Priority,
    pub officer_id: String,
    #[serde(default)]
    pub incident_date: Option<String>,
    #[serde(default)]
    pub incident_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub complainant: Option<String>,
    #[serde(default)]
    pub accused: Option<String>,
}

impl Default for CaseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            case_type: "General".to_string(),
            priority: Priority::Medium,
            officer_id: String::new(),
            incident_date: None,
            incident_time: None,
            location: None,
            complainant: None,
            accused: None,
        }
    }
}

impl CaseDraft {
    pub fn into_case(self, id: CaseId) -> Case {
        Case {
            id,
            title: self.title,
            description: self.description,
            case_type: self.case_type,
            status: CaseStatus::Draft,
            priority: self.priority,
            officer_id: self.officer_id,
            created_at: None,
            incident_date: self.incident_date,
            incident_time: self.incident_time,
            location: self.location,
            complainant: self.complainant,
            accused: self.accused,
            summary: None,
            chronology: None,
            bns_sections: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_has_fir_format() {
        let id = CaseId::generate();
        assert!(id.as_str().starts_with("FIR-"));
        let digits = &id.as_str()[4..];
        assert_eq!(digits.len(), 5);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
        assert!(id.is_persisted());
    }

    #[test]
    fn sentinel_ids_are_not_persisted() {
        assert!(!CaseId::unsaved().is_persisted());
        assert!(!CaseId::new("").is_persisted());
        assert!(CaseId::new("FIR-10423").is_persisted());
    }

    #[test]
    fn merge_overwrites_ai_fields_and_backfills_structured() {
        let mut case = CaseDraft {
            title: "Night theft".into(),
            description: "Theft occurred at 10 PM near Main St".into(),
            location: Some("Main St".into()),
            ..Default::default()
        }
        .into_case(CaseId::new("FIR-11111"));

        let meta = CaseMetadata {
            incident_date: Some("2024-06-01".into()),
            incident_time: Some("22:00".into()),
            location: Some("Station Rd".into()),
            complainant: Some("R. Deshmukh".into()),
            accused: None,
        };
        let facts = vec!["Complainant left shop at 9 PM".to_string()];
        let laws = vec!["BNS 303: Theft".to_string()];
        case.merge_intelligence("A theft at night.", &facts, &laws, Some(&meta));

        assert_eq!(case.status, CaseStatus::Analyzed);
        assert_eq!(case.summary.as_deref(), Some("A theft at night."));
        assert_eq!(case.chronology_facts(), facts);
        assert_eq!(case.bns_section_list(), laws);
        // user-entered location wins; empty fields are backfilled
        assert_eq!(case.location.as_deref(), Some("Main St"));
        assert_eq!(case.incident_date.as_deref(), Some("2024-06-01"));
        assert_eq!(case.complainant.as_deref(), Some("R. Deshmukh"));
        assert_eq!(case.accused, None);
    }

    #[test]
    fn chronology_accessor_tolerates_missing_or_garbage() {
        let mut case = CaseDraft::default().into_case(CaseId::generate());
        assert!(case.chronology_facts().is_empty());
        case.chronology = Some("not json".into());
        assert!(case.chronology_facts().is_empty());
    }
}
