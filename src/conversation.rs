//! Analysis transcript — append-only request/response message log.
//!
//! Builds on top of `models::Message` / `models::Source`. The transcript
//! never edits or removes a message; every user message is followed by
//! exactly one assistant message (the real reply, or the fixed error reply
//! when the analysis backend fails).

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AnalysisMode, Message, MessageRole, Source};

/// Fixed assistant reply appended when the analysis call fails or times out.
pub const ANALYSIS_ERROR_REPLY: &str = "Sorry, there was an error processing your request.";

/// The append-only message log behind the analysis panel.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append the user's query. Returns the appended message.
    pub fn push_user(&mut self, content: &str, mode: AnalysisMode) -> Message {
        self.push(Message {
            id: Uuid::new_v4(),
            role: MessageRole::User,
            content: content.to_string(),
            timestamp: Local::now().naive_local(),
            sources: Vec::new(),
            mode: Some(mode),
        })
    }

    /// Append the assistant's reply with its citations.
    pub fn push_assistant(
        &mut self,
        content: &str,
        sources: Vec<Source>,
        mode: AnalysisMode,
    ) -> Message {
        self.push(Message {
            id: Uuid::new_v4(),
            role: MessageRole::Assistant,
            content: content.to_string(),
            timestamp: Local::now().naive_local(),
            sources,
            mode: Some(mode),
        })
    }

    /// Append the fixed error reply. Carries no sources and no mode tag.
    pub fn push_error(&mut self) -> Message {
        self.push(Message {
            id: Uuid::new_v4(),
            role: MessageRole::Assistant,
            content: ANALYSIS_ERROR_REPLY.to_string(),
            timestamp: Local::now().naive_local(),
            sources: Vec::new(),
            mode: None,
        })
    }

    fn push(&mut self, message: Message) -> Message {
        self.messages.push(message.clone());
        message
    }
}

/// Generate a panel title from the first user query.
/// Truncates at 50 characters with "..." if longer, handling UTF-8 correctly.
pub fn generate_title(first_query: &str) -> String {
    let trimmed = first_query.trim();
    if trimmed.is_empty() {
        return "New analysis".to_string();
    }

    // Find the byte position at or just before the 50th character
    let boundary = trimmed
        .char_indices()
        .take_while(|(i, _)| *i < 50)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(trimmed.len());

    if boundary >= trimmed.len() {
        trimmed.to_string()
    } else {
        format!("{}...", &trimmed[..boundary])
    }
}

// ═══════════════════════════════════════════
// Frontend-facing views
// ═══════════════════════════════════════════

/// Frontend-friendly message representation.
/// Converts NaiveDateTime to String, role/mode enums to String.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub id: String,
    pub role: String,
    pub content: String,
    pub timestamp: String,
    pub sources: Vec<SourceView>,
    pub mode: Option<String>,
}

/// Citation as displayed in the analysis panel (String IDs for JS interop).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceView {
    pub filename: String,
    pub page_number: u32,
    pub excerpt: String,
    pub document_id: String,
    pub category: Option<String>,
}

impl From<Source> for SourceView {
    fn from(s: Source) -> Self {
        SourceView {
            filename: s.filename,
            page_number: s.page_number,
            excerpt: s.excerpt,
            document_id: s.document_id.to_string(),
            category: s.category.map(|c| c.as_str().to_string()),
        }
    }
}

impl From<Message> for MessageView {
    fn from(m: Message) -> Self {
        MessageView {
            id: m.id.to_string(),
            role: m.role.as_str().to_string(),
            content: m.content,
            timestamp: m.timestamp.to_string(),
            sources: m.sources.into_iter().map(SourceView::from).collect(),
            mode: m.mode.map(|mode| mode.as_str().to_string()),
        }
    }
}
