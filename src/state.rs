//! Workspace state container.
//!
//! `Workspace` is the single authority every view renders from: it owns the
//! document list, the analysis transcript, the current page, and the busy
//! flag. Mutation goes through the operations here; reads return snapshots.
//! The upload and analysis backends are injected as trait objects so tests
//! substitute in-process doubles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use crate::config;
use crate::conversation::Transcript;
use crate::library;
use crate::models::{AnalysisMode, Document, Message, Page};
use crate::providers::{
    AnalysisProvider, AnalysisRequest, ProviderError, UploadProvider, UploadRequest,
};
use crate::selection::DocumentSelection;
use crate::staging::PendingUpload;

// ═══════════════════════════════════════════════════════════
// Workspace
// ═══════════════════════════════════════════════════════════

/// Shared workspace state. Wrapped in `Arc` by the embedding shell so every
/// transport sees the same instance; `RwLock` allows concurrent reads of
/// the document list and transcript.
pub struct Workspace {
    documents: RwLock<Vec<Document>>,
    transcript: RwLock<Transcript>,
    current_page: RwLock<Page>,
    /// At most one outstanding analysis request. Acquired by
    /// compare-and-swap so a second submit cannot interleave.
    busy: AtomicBool,
    analysis: Arc<dyn AnalysisProvider>,
    uploader: Arc<dyn UploadProvider>,
    analysis_timeout: Duration,
}

impl Workspace {
    /// Create a workspace with the configured analysis timeout.
    pub fn new(analysis: Arc<dyn AnalysisProvider>, uploader: Arc<dyn UploadProvider>) -> Self {
        Self::with_timeout(analysis, uploader, config::analysis_timeout())
    }

    /// Create a workspace with an explicit analysis timeout.
    pub fn with_timeout(
        analysis: Arc<dyn AnalysisProvider>,
        uploader: Arc<dyn UploadProvider>,
        analysis_timeout: Duration,
    ) -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            transcript: RwLock::new(Transcript::new()),
            current_page: RwLock::new(Page::Analysis),
            busy: AtomicBool::new(false),
            analysis,
            uploader,
            analysis_timeout,
        }
    }

    // ── Documents ───────────────────────────────────────────

    /// Snapshot of the document list, insertion order.
    pub fn list_documents(&self) -> Result<Vec<Document>, WorkspaceError> {
        let docs = self
            .documents
            .read()
            .map_err(|_| WorkspaceError::LockPoisoned)?;
        Ok(docs.clone())
    }

    /// Commit a staged batch.
    ///
    /// Validation is all-or-nothing: any entry violating the
    /// category/outcome rule rejects the whole batch with the document list
    /// untouched. After validation, each file is confirmed with the upload
    /// backend one at a time — a failed item does not block the rest.
    pub async fn commit_uploads(
        &self,
        batch: Vec<PendingUpload>,
    ) -> Result<CommitOutcome, WorkspaceError> {
        let mut requests = Vec::with_capacity(batch.len());
        for entry in &batch {
            let category = entry.category().map_err(|e| {
                WorkspaceError::Validation(format!("{}: {e}", entry.filename))
            })?;
            requests.push(UploadRequest {
                path: entry.path.clone(),
                filename: entry.filename.clone(),
                tags: entry.tags.clone(),
                category,
            });
        }

        let mut outcome = CommitOutcome::default();
        for request in requests {
            let filename = request.filename.clone();
            match self.uploader.upload(request).await {
                Ok(doc) => {
                    tracing::info!(document_id = %doc.id, file = %doc.filename, "Document committed");
                    self.documents
                        .write()
                        .map_err(|_| WorkspaceError::LockPoisoned)?
                        .push(doc.clone());
                    outcome.committed.push(doc);
                }
                Err(error) => {
                    tracing::warn!(file = %filename, %error, "Upload failed, continuing with remaining files");
                    outcome.failures.push(UploadFailure { filename, error });
                }
            }
        }
        Ok(outcome)
    }

    /// Remove a document. A second delete of the same id fails — deletes
    /// are not idempotent.
    pub fn delete_document(&self, id: Uuid) -> Result<Document, WorkspaceError> {
        let mut docs = self
            .documents
            .write()
            .map_err(|_| WorkspaceError::LockPoisoned)?;
        let index = docs
            .iter()
            .position(|doc| doc.id == id)
            .ok_or(WorkspaceError::NotFound(id))?;
        let removed = docs.remove(index);
        tracing::info!(document_id = %id, file = %removed.filename, "Document deleted");
        Ok(removed)
    }

    // ── Analysis ────────────────────────────────────────────

    /// Submit an analysis query.
    ///
    /// Validation happens before any message is appended: an empty query or
    /// an empty selection in `document_search` mode is rejected inline and
    /// never reaches the transcript. While a request is in flight the
    /// workspace is busy and a second submit fails with [`WorkspaceError::Busy`].
    ///
    /// The user message is appended synchronously, then the analysis
    /// backend is called under the configured timeout. Success appends the
    /// cited reply; failure or timeout appends the fixed error reply. The
    /// busy flag clears on every path. Returns the appended assistant
    /// message.
    pub async fn submit_query(
        &self,
        text: &str,
        mode: AnalysisMode,
        selection: Option<&DocumentSelection>,
    ) -> Result<Message, WorkspaceError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(WorkspaceError::Validation("query text is empty".into()));
        }
        if mode == AnalysisMode::DocumentSearch
            && selection.map_or(true, |sel| sel.is_empty())
        {
            return Err(WorkspaceError::Validation(
                "document_search requires at least one selected document".into(),
            ));
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(WorkspaceError::Busy);
        }

        // From here every path must clear the busy flag.
        let result = self.run_analysis(trimmed, mode, selection).await;
        self.busy.store(false, Ordering::Release);
        result
    }

    async fn run_analysis(
        &self,
        text: &str,
        mode: AnalysisMode,
        selection: Option<&DocumentSelection>,
    ) -> Result<Message, WorkspaceError> {
        // Submit-time revalidation: ids deleted since selection are dropped
        // from the outgoing request, never failed.
        let document_ids = match (&mode, selection) {
            (AnalysisMode::DocumentSearch, Some(sel)) => {
                let docs = self
                    .documents
                    .read()
                    .map_err(|_| WorkspaceError::LockPoisoned)?;
                sel.sanitize(&docs)
            }
            _ => Vec::new(),
        };

        self.transcript
            .write()
            .map_err(|_| WorkspaceError::LockPoisoned)?
            .push_user(text, mode.clone());

        let request = AnalysisRequest {
            query: text.to_string(),
            mode: mode.clone(),
            document_ids,
        };
        let reply = tokio::time::timeout(self.analysis_timeout, self.analysis.analyze(request)).await;

        let mut transcript = self
            .transcript
            .write()
            .map_err(|_| WorkspaceError::LockPoisoned)?;
        let appended = match reply {
            Ok(Ok(reply)) => transcript.push_assistant(&reply.answer, reply.sources, mode),
            Ok(Err(error)) => {
                tracing::warn!(%error, "Analysis request failed");
                transcript.push_error()
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.analysis_timeout, "Analysis request timed out");
                transcript.push_error()
            }
        };
        Ok(appended)
    }

    /// Snapshot of the transcript, append order.
    pub fn messages(&self) -> Result<Vec<Message>, WorkspaceError> {
        let transcript = self
            .transcript
            .read()
            .map_err(|_| WorkspaceError::LockPoisoned)?;
        Ok(transcript.messages().to_vec())
    }

    /// Whether an analysis request is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    // ── Navigation ──────────────────────────────────────────

    pub fn navigate(&self, page: Page) {
        if let Ok(mut current) = self.current_page.write() {
            *current = page;
        }
    }

    pub fn current_page(&self) -> Page {
        self.current_page
            .read()
            .map(|page| page.clone())
            .unwrap_or(Page::Analysis)
    }

    /// Sidebar summary: current page plus the document counts shown as
    /// navigation badges.
    pub fn nav_summary(&self) -> Result<NavSummary, WorkspaceError> {
        let docs = self
            .documents
            .read()
            .map_err(|_| WorkspaceError::LockPoisoned)?;
        let counts = library::category_counts(&docs);
        Ok(NavSummary {
            page: self.current_page(),
            total_documents: counts.all,
            historical_deals: counts.historical_deal,
            current_opportunities: counts.current_opportunity,
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Operation results
// ═══════════════════════════════════════════════════════════

/// Result of a batch commit: documents confirmed and appended, plus the
/// per-item failures that did not block them.
#[derive(Debug, Default)]
pub struct CommitOutcome {
    pub committed: Vec<Document>,
    pub failures: Vec<UploadFailure>,
}

/// One file the upload backend rejected.
#[derive(Debug)]
pub struct UploadFailure {
    pub filename: String,
    pub error: ProviderError,
}

/// Sidebar badges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSummary {
    pub page: Page,
    pub total_documents: usize,
    pub historical_deals: usize,
    pub current_opportunities: usize,
}

// ═══════════════════════════════════════════════════════════
// Error types
// ═══════════════════════════════════════════════════════════

/// Errors from workspace operations. Analysis backend failures never show
/// up here — they are recovered inside `submit_query` and surfaced as the
/// fixed error reply in the transcript.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Document not found: {0}")]
    NotFound(Uuid),

    #[error("An analysis request is already running")]
    Busy,

    #[error("Internal lock error")]
    LockPoisoned,
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
