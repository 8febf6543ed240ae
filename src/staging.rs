//! Pre-commit upload staging.
//!
//! Files dropped on the upload page are held here with their user-assigned
//! metadata until the batch is committed through the workspace. Staged
//! entries live only client-side and are discarded on commit or removal.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::models::{CategoryKind, DealCategory, DealOutcome, ModelError};

/// A file staged for upload, with metadata still editable.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    /// Staging-local handle for row operations; not the committed document id.
    pub id: Uuid,
    pub path: PathBuf,
    pub filename: String,
    pub tags: Vec<String>,
    kind: CategoryKind,
    outcome: Option<DealOutcome>,
}

impl PendingUpload {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = sanitize_filename(
            path.file_name().and_then(|n| n.to_str()).unwrap_or("document"),
        );
        Self {
            id: Uuid::new_v4(),
            path,
            filename,
            tags: Vec::new(),
            kind: CategoryKind::Other,
            outcome: None,
        }
    }

    pub fn kind(&self) -> &CategoryKind {
        &self.kind
    }

    pub fn outcome(&self) -> Option<&DealOutcome> {
        self.outcome.as_ref()
    }

    /// Change the category. Leaving `HistoricalDeal` drops any chosen
    /// outcome so the entry cannot commit with a dangling one.
    pub fn set_kind(&mut self, kind: CategoryKind) {
        if kind != CategoryKind::HistoricalDeal {
            self.outcome = None;
        }
        self.kind = kind;
    }

    pub fn set_outcome(&mut self, outcome: Option<DealOutcome>) {
        self.outcome = outcome;
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        let trimmed = tag.trim();
        if !trimmed.is_empty() && !self.tags.iter().any(|t| t == trimmed) {
            self.tags.push(trimmed.to_string());
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Resolve the staged category/outcome pair, enforcing the commit rule:
    /// historical deals require an outcome, nothing else may carry one.
    pub fn category(&self) -> Result<DealCategory, ModelError> {
        DealCategory::from_parts(self.kind.clone(), self.outcome.clone())
    }
}

/// The staging list behind the upload page.
#[derive(Debug, Default)]
pub struct StagedUploads {
    pending: Vec<PendingUpload>,
}

impl StagedUploads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a file. Returns the staging handle.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> Uuid {
        let entry = PendingUpload::new(path);
        let id = entry.id;
        self.pending.push(entry);
        id
    }

    /// Discard a staged entry. Returns false if the handle is unknown.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.id != id);
        self.pending.len() < before
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut PendingUpload> {
        self.pending.iter_mut().find(|entry| entry.id == id)
    }

    pub fn list(&self) -> &[PendingUpload] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drain all staged entries for commit. The staging list is empty
    /// afterwards regardless of how the commit goes.
    pub fn take_all(&mut self) -> Vec<PendingUpload> {
        std::mem::take(&mut self.pending)
    }
}

/// Strip path separators and NULs, cap length, never return empty.
pub fn sanitize_filename(original: &str) -> String {
    let name = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");

    let clean: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .take(255)
        .collect();

    if clean.is_empty() {
        "document".to_string()
    } else {
        clean
    }
}
