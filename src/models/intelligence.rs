use serde::{Deserialize, Serialize};

/// Structured fields the analysis extracts from a narrative, used to
/// auto-fill the case form. Everything is optional; the model only
/// returns what the text supports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseMetadata {
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

/// AI analysis result for one case narrative. Transient — it is merged
/// into the `Case` via the intelligence PATCH, never stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactExtractionResponse {
    #[serde(default)]
    pub case_id: Option<String>,
    pub summary: String,
    /// Ordered chronologically; order is display order, not sortable.
    pub chronological_facts: Vec<String>,
    pub potential_bns_sections: Vec<String>,
    #[serde(default)]
    pub metadata: Option<CaseMetadata>,
}

/// IPC → BNS section correspondence returned by the law mapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawMapping {
    pub ipc_section: String,
    pub bns_equivalent: String,
    pub title: String,
    pub key_changes: String,
}
