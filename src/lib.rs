//! DealDesk — workspace core for a private-equity document/analysis tool.
//!
//! The crate owns the workspace state (document library, analysis
//! transcript, busy flag) and the pure logic around it: library
//! filtering, document selection for grounded search, upload staging, and
//! request/response composition. The upload and analysis backends are
//! consumed through the trait seams in [`providers`].

pub mod config;
pub mod conversation;
pub mod library;
pub mod models;
pub mod providers;
pub mod selection;
pub mod staging;
pub mod state;

pub use selection::DocumentSelection;
pub use staging::{PendingUpload, StagedUploads};
pub use state::{CommitOutcome, NavSummary, UploadFailure, Workspace, WorkspaceError};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for shells and tools embedding the workspace core.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
