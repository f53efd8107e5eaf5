use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::case::CaseId;
use super::enums::{EvidenceKind, EvidenceStatus};

/// Evidence identifier. The backend hands out numeric row ids while the
/// client generates string correlation ids for in-flight uploads, so
/// deserialization accepts either shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EvidenceId(String);

impl EvidenceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Client-generated correlation id for one logical upload. The row
    /// created under this id transitions in place; it is never duplicated.
    pub fn correlation() -> Self {
        Self(format!("EVD-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EvidenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EvidenceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for EvidenceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(i64),
            Text(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

/// A file attached to exactly one case.
///
/// Backend fields (`file_hash`, `uploaded_at`) are absent on the
/// optimistic client-side placeholder and filled in once the upload
/// resolves; client-side lifecycle fields (`kind`, `status`, `uri`)
/// are never sent by the backend and default on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub id: EvidenceId,
    pub case_id: CaseId,
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_hash: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub kind: EvidenceKind,
    #[serde(default)]
    pub status: EvidenceStatus,
    /// Local device reference before/while uploading.
    #[serde(default)]
    pub uri: Option<String>,
    /// AI finding attached after processing.
    #[serde(default, alias = "analysis_result")]
    pub analysis: Option<String>,
}

impl Evidence {
    /// Optimistic placeholder shown immediately when an upload starts.
    pub fn placeholder(
        case_id: CaseId,
        file_name: &str,
        kind: EvidenceKind,
        uri: Option<String>,
    ) -> Self {
        Self {
            id: EvidenceId::correlation(),
            case_id,
            file_name: file_name.to_string(),
            file_type: String::new(),
            file_hash: None,
            uploaded_at: None,
            kind,
            status: EvidenceStatus::Processing,
            uri,
            analysis: None,
        }
    }

    /// Guess the coarse category from the file extension.
    pub fn kind_for_file(file_name: &str) -> EvidenceKind {
        let ext = file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "heic" => EvidenceKind::Image,
            "mp4" | "mov" | "avi" | "mkv" | "webm" => EvidenceKind::Video,
            "mp3" | "m4a" | "wav" | "aac" | "ogg" => EvidenceKind::Audio,
            _ => EvidenceKind::Document,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_both_deserialize() {
        let from_num: EvidenceId = serde_json::from_str("7").unwrap();
        assert_eq!(from_num.as_str(), "7");
        let from_str: EvidenceId = serde_json::from_str("\"EVD-abc\"").unwrap();
        assert_eq!(from_str.as_str(), "EVD-abc");
    }

    #[test]
    fn correlation_ids_are_unique() {
        assert_ne!(EvidenceId::correlation(), EvidenceId::correlation());
    }

    #[test]
    fn backend_record_deserializes_without_client_fields() {
        let json = r#"{
            "id": 3,
            "case_id": "FIR-10423",
            "file_name": "scene.jpg",
            "file_type": "image/jpeg",
            "file_hash": "abc123",
            "analysis_result": "One vehicle visible.",
            "uploaded_at": "2024-06-01T10:00:00"
        }"#;
        let evidence: Evidence = serde_json::from_str(json).unwrap();
        assert_eq!(evidence.status, EvidenceStatus::Pending);
        assert_eq!(evidence.kind, EvidenceKind::Document);
        assert_eq!(evidence.analysis.as_deref(), Some("One vehicle visible."));
        assert!(evidence.uri.is_none());
    }

    #[test]
    fn placeholder_starts_processing() {
        let item = Evidence::placeholder(
            CaseId::new("FIR-10423"),
            "scene.jpg",
            EvidenceKind::Image,
            Some("file:///tmp/scene.jpg".into()),
        );
        assert_eq!(item.status, EvidenceStatus::Processing);
        assert!(item.file_hash.is_none());
    }

    #[test]
    fn kind_guessed_from_extension() {
        assert_eq!(Evidence::kind_for_file("scene.JPG"), EvidenceKind::Image);
        assert_eq!(Evidence::kind_for_file("cctv.mp4"), EvidenceKind::Video);
        assert_eq!(Evidence::kind_for_file("call.m4a"), EvidenceKind::Audio);
        assert_eq!(Evidence::kind_for_file("report.pdf"), EvidenceKind::Document);
        assert_eq!(Evidence::kind_for_file("noext"), EvidenceKind::Document);
    }
}
