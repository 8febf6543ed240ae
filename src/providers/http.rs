//! REST adapter for the analysis/upload backend.
//!
//! Speaks the local RAG API: `POST /chat` for analysis, `POST /upload` for
//! per-file confirmation, `GET /health` for reachability. Wire types stay
//! private to this module; the rest of the crate only sees core models.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    AnalysisProvider, AnalysisReply, AnalysisRequest, ProviderError, UploadProvider, UploadRequest,
};
use crate::config;
use crate::models::{AnalysisMode, CategoryKind, DealCategory, DealOutcome, Document, Source};

/// HTTP client for the workspace backend.
#[derive(Debug, Clone)]
pub struct HttpWorkspaceClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWorkspaceClient {
    /// Create a client with an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from `DEALDESK_API_URL` (default local backend).
    pub fn from_env() -> Self {
        Self::new(config::api_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the backend is reachable.
    pub async fn health(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::Rejected(format!(
                "health check returned {}",
                response.status()
            )))
        }
    }
}

// ═══════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════

#[derive(Debug, Serialize)]
struct ChatRequestWire {
    query: String,
    analysis_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc_ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseWire {
    answer: String,
    #[serde(default)]
    sources: Vec<SourceWire>,
}

#[derive(Debug, Deserialize)]
struct SourceWire {
    filename: String,
    #[serde(default = "default_page")]
    page_number: u32,
    chunk_text: String,
    doc_id: String,
    #[serde(default)]
    category: Option<String>,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct DocumentWire {
    id: String,
    filename: String,
    upload_timestamp: String,
    #[serde(default)]
    tags: Vec<String>,
    category: String,
    #[serde(default)]
    deal_outcome: Option<String>,
}

fn source_from_wire(wire: SourceWire) -> Result<Source, ProviderError> {
    let document_id = Uuid::parse_str(&wire.doc_id)
        .map_err(|_| ProviderError::InvalidResponse(format!("bad doc_id: {}", wire.doc_id)))?;
    Ok(Source {
        filename: wire.filename,
        page_number: wire.page_number,
        excerpt: wire.chunk_text,
        document_id,
        // An unknown category label degrades to an uncategorized citation.
        category: wire
            .category
            .as_deref()
            .and_then(|c| CategoryKind::from_str(c).ok()),
    })
}

fn document_from_wire(wire: DocumentWire) -> Result<Document, ProviderError> {
    let id = Uuid::parse_str(&wire.id)
        .map_err(|_| ProviderError::InvalidResponse(format!("bad document id: {}", wire.id)))?;
    let uploaded_at = parse_timestamp(&wire.upload_timestamp).ok_or_else(|| {
        ProviderError::InvalidResponse(format!("bad timestamp: {}", wire.upload_timestamp))
    })?;
    let kind = CategoryKind::from_str(&wire.category)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
    let outcome = wire
        .deal_outcome
        .as_deref()
        .map(DealOutcome::from_str)
        .transpose()
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
    let category = DealCategory::from_parts(kind, outcome)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    Ok(Document {
        id,
        filename: wire.filename,
        uploaded_at,
        tags: wire.tags,
        category,
    })
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

async fn rejection(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let detail = response.text().await.unwrap_or_default();
    ProviderError::Rejected(format!("{status}: {detail}"))
}

// ═══════════════════════════════════════════
// Provider implementations
// ═══════════════════════════════════════════

#[async_trait]
impl AnalysisProvider for HttpWorkspaceClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReply, ProviderError> {
        let doc_ids = match request.mode {
            AnalysisMode::DocumentSearch => Some(
                request
                    .document_ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect(),
            ),
            AnalysisMode::InvestmentAnalysis => None,
        };
        let body = ChatRequestWire {
            query: request.query,
            analysis_type: request.mode.as_str().to_string(),
            doc_ids,
        };

        tracing::debug!(mode = %body.analysis_type, "Dispatching analysis request");

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let wire: ChatResponseWire = response.json().await?;
        let sources = wire
            .sources
            .into_iter()
            .map(source_from_wire)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AnalysisReply {
            answer: wire.answer,
            sources,
        })
    }
}

#[async_trait]
impl UploadProvider for HttpWorkspaceClient {
    async fn upload(&self, request: UploadRequest) -> Result<Document, ProviderError> {
        let bytes = tokio::fs::read(&request.path).await?;
        let tags_json =
            serde_json::to_string(&request.tags).unwrap_or_else(|_| "[]".to_string());

        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(request.filename.clone()),
            )
            .text("tags", tags_json)
            .text("category", request.category.kind().as_str());
        if let Some(outcome) = request.category.outcome() {
            form = form.text("deal_outcome", outcome.as_str());
        }

        tracing::debug!(file = %request.filename, "Confirming upload with backend");

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let wire: DocumentWire = response.json().await?;
        document_from_wire(wire)
    }
}
