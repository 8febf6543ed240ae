use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AnalysisMode, CategoryKind, MessageRole};

/// One entry in the analysis transcript. The transcript is append-only:
/// messages are never edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: NaiveDateTime,
    /// Citations backing an assistant reply. Empty on user messages and on
    /// the fixed error reply.
    #[serde(default)]
    pub sources: Vec<Source>,
    /// Which request produced this message pair. Absent on the error reply.
    #[serde(default)]
    pub mode: Option<AnalysisMode>,
}

/// A citation pointing from an assistant reply back to a specific page and
/// excerpt of a document. Immutable once attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub filename: String,
    pub page_number: u32,
    pub excerpt: String,
    /// The cited document. May reference a document that has since been
    /// deleted from the library.
    pub document_id: Uuid,
    /// Denormalized copy of the document's category at citation time.
    #[serde(default)]
    pub category: Option<CategoryKind>,
}
