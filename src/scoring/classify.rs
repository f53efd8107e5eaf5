//! Case-type classification.
//!
//! The case type is free text everywhere else in the system; this is the
//! single place the substring rules live. Consumers get a typed profile
//! instead of re-parsing the text.

/// A recognized offence family. A case type can match several at once
/// ("robbery and murder").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTag {
    Assault,
    Theft,
    SexualOffence,
    Homicide,
}

/// Typed view of a free-text case type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseTypeProfile {
    /// Matched offence families, in rule order.
    pub tags: Vec<CaseTag>,
    /// True for offences where courts demand a stricter standard of
    /// proof (the text mentions murder or rape).
    pub heightened_proof_burden: bool,
}

impl CaseTypeProfile {
    pub fn has(&self, tag: CaseTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Classify a free-text case type by substring match.
pub fn classify_case_type(case_type: &str) -> CaseTypeProfile {
    let text = case_type.to_lowercase();
    let mut tags = Vec::new();

    if text.contains("assault") || text.contains("hurt") {
        tags.push(CaseTag::Assault);
    }
    if text.contains("theft") || text.contains("robbery") {
        tags.push(CaseTag::Theft);
    }
    if text.contains("rape") || text.contains("sexual") {
        tags.push(CaseTag::SexualOffence);
    }
    if text.contains("murder") || text.contains("death") {
        tags.push(CaseTag::Homicide);
    }

    CaseTypeProfile {
        tags,
        heightened_proof_burden: text.contains("murder") || text.contains("rape"),
    }
}
