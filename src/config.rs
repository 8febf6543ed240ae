use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "DealDesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base URL of the analysis/upload backend (the local RAG API).
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Upper bound on a single analysis round trip. A hung backend surfaces as
/// the same user-visible failure as a rejected call.
const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 120;

/// Get the application data directory
/// ~/DealDesk/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("DealDesk")
}

/// Get the uploads directory (locally staged document originals)
pub fn uploads_dir() -> PathBuf {
    app_data_dir().join("uploads")
}

/// Backend base URL, overridable via `DEALDESK_API_URL`.
pub fn api_url() -> String {
    std::env::var("DEALDESK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Analysis call timeout, overridable via `DEALDESK_ANALYSIS_TIMEOUT_SECS`.
pub fn analysis_timeout() -> Duration {
    let secs = std::env::var("DEALDESK_ANALYSIS_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_ANALYSIS_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "dealdesk=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("DealDesk"));
    }

    #[test]
    fn uploads_dir_under_app_data() {
        let uploads = uploads_dir();
        let app = app_data_dir();
        assert!(uploads.starts_with(app));
        assert!(uploads.ends_with("uploads"));
    }

    #[test]
    fn app_name_is_dealdesk() {
        assert_eq!(APP_NAME, "DealDesk");
    }

    #[test]
    fn default_timeout_is_two_minutes() {
        // Only valid when the env override is unset, which is the case in CI.
        if std::env::var("DEALDESK_ANALYSIS_TIMEOUT_SECS").is_err() {
            assert_eq!(analysis_timeout(), Duration::from_secs(120));
        }
    }
}
