//! Update check and download passthrough.
//!
//! The shim forwards update calls to a registered provider; it performs no
//! verification or installation itself.

use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use skiff_engine::{UpdateProgress, UpdateProvider};

use crate::error::{Error, Result};

/// Update server consulted by `check_for_updates`.
pub const UPDATE_SERVER_URL: &str = "https://update.skiffproxy.io";

/// Version reported to the update server.
pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

lazy_static! {
    static ref PROVIDER: RwLock<Option<Arc<dyn UpdateProvider>>> = RwLock::new(None);
}

/// Register the update provider. Replaces any previous one.
pub fn set_update_provider(provider: Arc<dyn UpdateProvider>) {
    *PROVIDER.write() = Some(provider);
}

fn provider() -> Result<Arc<dyn UpdateProvider>> {
    PROVIDER
        .read()
        .clone()
        .ok_or_else(|| Error::Update("no update provider registered".to_string()))
}

/// Check whether a newer package is available.
pub async fn check_for_updates(should_proxy: bool) -> Result<Option<String>> {
    provider()?
        .check_update(should_proxy, UPDATE_SERVER_URL, PACKAGE_VERSION)
        .await
        .map_err(|e| Error::Update(e.to_string()))
}

/// Download the package at `url` to `dest`, reporting progress to the host.
pub async fn download_update(
    url: &str,
    dest: &Path,
    should_proxy: bool,
    progress: Arc<dyn UpdateProgress>,
) -> Result<()> {
    provider()?
        .download(url, dest, should_proxy, progress)
        .await
        .map_err(|e| Error::Update(e.to_string()))
}
