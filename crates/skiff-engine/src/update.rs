//! Auto-update collaborator interface.
//!
//! Update checks and package downloads are handled by an external provider;
//! the shim only passes calls through. Package verification is the
//! provider's responsibility.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;

/// Receives download progress for a host progress bar.
pub trait UpdateProgress: Send + Sync {
    /// Percent of the download completed, 0 to 100.
    fn progress(&self, percent: i32);
}

/// External update service.
#[async_trait::async_trait]
pub trait UpdateProvider: Send + Sync {
    /// Check whether a newer package is available.
    ///
    /// Returns the download URL of the new version, or `None` when
    /// `current_version` is already the latest.
    async fn check_update(
        &self,
        should_proxy: bool,
        server_url: &str,
        current_version: &str,
    ) -> Result<Option<String>>;

    /// Download the package at `url` to `dest`, reporting progress.
    async fn download(
        &self,
        url: &str,
        dest: &Path,
        should_proxy: bool,
        progress: Arc<dyn UpdateProgress>,
    ) -> Result<()>;
}
