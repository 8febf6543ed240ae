//! Collaborator seams: upload confirmation and analysis generation.
//!
//! The workspace core consumes two external services through these traits —
//! it never implements retrieval, ranking, inference, or parsing itself.
//! Adapters: [`HttpWorkspaceClient`] speaks the REST backend;
//! [`LocalUploader`] stages files on the local filesystem. Tests substitute
//! in-process doubles.

pub mod http;
pub mod local;

pub use http::HttpWorkspaceClient;
pub use local::LocalUploader;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AnalysisMode, DealCategory, Document, Source};

/// One staged file to confirm with the upload backend.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub filename: String,
    pub tags: Vec<String>,
    pub category: DealCategory,
}

/// An analysis request composed by the workspace.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub query: String,
    pub mode: AnalysisMode,
    /// Grounding scope for `document_search`; empty in
    /// `investment_analysis` mode, which synthesizes over the whole corpus.
    pub document_ids: Vec<Uuid>,
}

/// The collaborator's answer with its citations.
#[derive(Debug, Clone)]
pub struct AnalysisReply {
    pub answer: String,
    pub sources: Vec<Source>,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    #[error("Malformed backend response: {0}")]
    InvalidResponse(String),
}

/// Upload confirmation, one call per staged file. The returned `Document`
/// carries the provider-assigned id and timestamp.
#[async_trait]
pub trait UploadProvider: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> Result<Document, ProviderError>;
}

/// Analysis generation over the workspace corpus.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReply, ProviderError>;
}
