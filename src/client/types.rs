//! Request/response bodies for endpoints that don't map onto a model
//! entity directly.

use serde::{Deserialize, Serialize};

use crate::models::{CaseMetadata, FactExtractionResponse};

/// Document type tag sent with every analyze call.
pub const DOC_TYPE_FIR: &str = "FIR";

/// Body for `POST /analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub case_id: &'a str,
    pub case_text: &'a str,
    pub doc_type: &'a str,
}

/// Body for `PATCH /cases/{id}/intelligence`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelligencePatch {
    pub summary: String,
    pub facts: Vec<String>,
    pub laws: Vec<String>,
    pub metadata: CaseMetadata,
}

impl From<&FactExtractionResponse> for IntelligencePatch {
    fn from(response: &FactExtractionResponse) -> Self {
        Self {
            summary: response.summary.clone(),
            facts: response.chronological_facts.clone(),
            laws: response.potential_bns_sections.clone(),
            metadata: response.metadata.clone().unwrap_or_default(),
        }
    }
}

/// Reply from `POST /gemini/chat`. One-shot; the server keeps no
/// conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Reply from `POST /gemini/analyze/{image|video|doc}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAnalysis {
    pub analysis: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_built_from_extraction_response() {
        let response = FactExtractionResponse {
            case_id: None,
            summary: "A theft at night.".into(),
            chronological_facts: vec!["Lock broken around 10 PM".into()],
            potential_bns_sections: vec!["BNS 303: Theft".into()],
            metadata: None,
        };
        let patch = IntelligencePatch::from(&response);
        assert_eq!(patch.summary, response.summary);
        assert_eq!(patch.facts, response.chronological_facts);
        assert_eq!(patch.metadata, CaseMetadata::default());
    }
}
