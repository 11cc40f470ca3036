//! Process-wide API exposed to the host application.
//!
//! Mirrors the embedding contract: the platform glue registers a concrete
//! engine once, then the host calls [`start`]. One proxy instance exists
//! per process; repeated `start` calls reuse it and only re-run the
//! readiness waits.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use skiff_engine::ProxyEngine;

use crate::error::{Error, Result};
use crate::models::{HostCallbacks, StartResult};
use crate::startup::Startup;

lazy_static! {
    static ref ENGINE: RwLock<Option<Arc<dyn ProxyEngine>>> = RwLock::new(None);
    static ref STARTUP: RwLock<Option<Arc<Startup>>> = RwLock::new(None);
}

/// Register the proxy engine. Must be called once before [`start`].
///
/// Later registrations are ignored once a startup exists; the single
/// instance already running keeps its engine.
pub fn set_engine(engine: Arc<dyn ProxyEngine>) {
    // Lock order: STARTUP before ENGINE, same as `startup`.
    if STARTUP.read().is_some() {
        tracing::warn!("engine already in use; ignoring re-registration");
        return;
    }
    *ENGINE.write() = Some(engine);
}

fn startup() -> Result<Arc<Startup>> {
    if let Some(existing) = STARTUP.read().clone() {
        return Ok(existing);
    }
    let mut slot = STARTUP.write();
    if let Some(existing) = slot.clone() {
        return Ok(existing);
    }
    let engine = ENGINE.read().clone().ok_or(Error::NoEngine)?;
    let created = Startup::new(engine);
    *slot = Some(created.clone());
    Ok(created)
}

/// Start HTTP and SOCKS5 proxies and wait for their addresses.
///
/// Blocks the calling task up to `timeout_millis` across both readiness
/// waits and returns the bound addresses. The proxy keeps initializing in
/// the background after this returns; early traffic may be slow while the
/// configuration sequence finishes. A timed-out call can be retried and
/// will reuse the running instance.
pub async fn start(
    config_dir: &Path,
    locale: &str,
    timeout_millis: u64,
    callbacks: Arc<dyn HostCallbacks>,
) -> Result<StartResult> {
    let startup = startup()?;
    startup
        .start(
            config_dir,
            locale,
            Duration::from_millis(timeout_millis),
            callbacks,
        )
        .await
}
