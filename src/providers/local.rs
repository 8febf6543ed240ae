//! Local filesystem uploader.
//!
//! Stages the raw file into the workspace uploads directory and mints the
//! document record in-process. This is the no-backend path: the same trait
//! seam as the REST adapter, so the workspace never knows the difference.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Local;
use uuid::Uuid;

use super::{ProviderError, UploadProvider, UploadRequest};
use crate::config;
use crate::models::Document;

/// Upload provider that keeps originals on the local disk.
#[derive(Debug, Clone)]
pub struct LocalUploader {
    uploads_dir: PathBuf,
}

impl LocalUploader {
    /// Stage into the default workspace uploads directory.
    pub fn new() -> Self {
        Self {
            uploads_dir: config::uploads_dir(),
        }
    }

    /// Stage into an explicit directory.
    pub fn with_dir(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }

    pub fn uploads_dir(&self) -> &std::path::Path {
        &self.uploads_dir
    }
}

impl Default for LocalUploader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UploadProvider for LocalUploader {
    async fn upload(&self, request: UploadRequest) -> Result<Document, ProviderError> {
        let document_id = Uuid::new_v4();
        let extension = request
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");

        // Target: <uploads_dir>/<doc_uuid>.<ext>
        tokio::fs::create_dir_all(&self.uploads_dir).await?;
        let target_path = self.uploads_dir.join(format!("{document_id}.{extension}"));
        let size = tokio::fs::copy(&request.path, &target_path).await?;

        tracing::debug!(
            document_id = %document_id,
            file = %request.filename,
            size,
            "File staged locally"
        );

        Ok(Document {
            id: document_id,
            filename: request.filename,
            uploaded_at: Local::now().naive_local(),
            tags: request.tags,
            category: request.category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DealCategory, DealOutcome};

    fn staged_request(dir: &std::path::Path, filename: &str) -> UploadRequest {
        let path = dir.join(filename);
        std::fs::write(&path, b"PDF file content for staging test").unwrap();
        UploadRequest {
            path,
            filename: filename.to_string(),
            tags: vec!["SaaS".into()],
            category: DealCategory::HistoricalDeal {
                deal_outcome: DealOutcome::Invested,
            },
        }
    }

    #[tokio::test]
    async fn upload_stages_file_and_mints_record() {
        let source_dir = tempfile::tempdir().unwrap();
        let uploads_dir = tempfile::tempdir().unwrap();
        let uploader = LocalUploader::with_dir(uploads_dir.path());

        let request = staged_request(source_dir.path(), "memo.pdf");
        let doc = uploader.upload(request).await.unwrap();

        assert_eq!(doc.filename, "memo.pdf");
        assert_eq!(doc.tags, vec!["SaaS"]);
        assert_eq!(doc.category.outcome(), Some(&DealOutcome::Invested));

        let staged = uploads_dir.path().join(format!("{}.pdf", doc.id));
        assert!(staged.exists());
        assert_eq!(
            std::fs::read(&staged).unwrap(),
            b"PDF file content for staging test"
        );
    }

    #[tokio::test]
    async fn upload_of_missing_source_fails_with_io() {
        let uploads_dir = tempfile::tempdir().unwrap();
        let uploader = LocalUploader::with_dir(uploads_dir.path());

        let request = UploadRequest {
            path: PathBuf::from("/nonexistent/source.pdf"),
            filename: "source.pdf".into(),
            tags: Vec::new(),
            category: DealCategory::Other,
        };
        let result = uploader.upload(request).await;
        assert!(matches!(result, Err(ProviderError::Io(_))));
    }

    #[tokio::test]
    async fn distinct_uploads_get_distinct_staged_names() {
        let source_dir = tempfile::tempdir().unwrap();
        let uploads_dir = tempfile::tempdir().unwrap();
        let uploader = LocalUploader::with_dir(uploads_dir.path());

        let first = uploader
            .upload(staged_request(source_dir.path(), "a.pdf"))
            .await
            .unwrap();
        let second = uploader
            .upload(staged_request(source_dir.path(), "a.pdf"))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(std::fs::read_dir(uploads_dir.path()).unwrap().count(), 2);
    }
}
