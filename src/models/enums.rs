use serde::{Deserialize, Serialize};

/// Error returned when a wire string does not match any variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized {field} value: {value}")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}

/// Macro to generate enum with as_str + FromStr + serde wire names
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(
    /// Case lifecycle status. The backend stores these as free strings;
    /// this closes the set and pairs it with an explicit transition table.
    CaseStatus {
        Draft => "Draft",
        Active => "Active",
        Analyzed => "Analyzed",
        Closed => "Closed",
        Dismissed => "Dismissed",
        Withdrawn => "Withdrawn",
    }
);

impl CaseStatus {
    /// Whether moving to `next` is a legal transition.
    ///
    /// Draft → Active → Analyzed, and any open case (Active/Analyzed)
    /// may be Closed, Dismissed, or Withdrawn. Terminal states stay put.
    pub fn can_transition_to(self, next: CaseStatus) -> bool {
        use CaseStatus::*;
        matches!(
            (self, next),
            (Draft, Active)
                | (Active, Analyzed)
                | (Active | Analyzed, Closed | Dismissed | Withdrawn)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CaseStatus::Closed | CaseStatus::Dismissed | CaseStatus::Withdrawn
        )
    }
}

str_enum!(
    Priority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
);

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

str_enum!(
    /// Evidence processing status. Pending → Processing → {Analyzed, Failed};
    /// Analyzed and Failed are terminal. A Failed item is never retried
    /// under the same id — retry is a fresh upload with a new id.
    EvidenceStatus {
        Pending => "Pending",
        Processing => "Processing",
        Analyzed => "Analyzed",
        Failed => "Failed",
    }
);

impl EvidenceStatus {
    pub fn can_transition_to(self, next: EvidenceStatus) -> bool {
        use EvidenceStatus::*;
        matches!(
            (self, next),
            (Pending, Processing) | (Processing, Analyzed | Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, EvidenceStatus::Analyzed | EvidenceStatus::Failed)
    }
}

impl Default for EvidenceStatus {
    fn default() -> Self {
        EvidenceStatus::Pending
    }
}

str_enum!(
    /// Coarse evidence category, as the mobile client tracks it.
    EvidenceKind {
        Image => "image",
        Video => "video",
        Audio => "audio",
        Document => "file",
    }
);

impl EvidenceKind {
    /// The media-analysis endpoint segment for this kind of file.
    /// The backend only analyzes image/video/doc; audio goes through
    /// the document path.
    pub fn media_kind(self) -> MediaKind {
        match self {
            EvidenceKind::Image => MediaKind::Image,
            EvidenceKind::Video => MediaKind::Video,
            EvidenceKind::Audio | EvidenceKind::Document => MediaKind::Doc,
        }
    }
}

impl Default for EvidenceKind {
    fn default() -> Self {
        EvidenceKind::Document
    }
}

str_enum!(
    /// Media analysis endpoint selector (`/gemini/analyze/{image|video|doc}`).
    MediaKind {
        Image => "image",
        Video => "video",
        Doc => "doc",
    }
);
