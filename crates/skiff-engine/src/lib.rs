//! Proxy engine interface layer
//!
//! Defines the seam between the embeddable shim (`skiff-mobile`) and the
//! concrete proxy engine that owns listening, relaying, and configuration
//! distribution. Nothing in this crate touches the network; it provides the
//! traits an engine implements, the readiness signals it publishes its
//! listener addresses on, and the quota stream it reports usage through.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hooks;
pub mod protect;
pub mod quota;
pub mod signal;
pub mod update;

pub use config::{EngineConfig, DEFAULT_HTTP_ADDR, DEFAULT_SOCKS5_ADDR};
pub use error::{Error, Result};
pub use hooks::{EngineHooks, GlobalConfig};
pub use protect::{current_override, protect_connections, remove_overrides, ProtectedDial, SocketProtector};
pub use quota::{quota_channel, Quota, QuotaReceiver, QuotaSender};
pub use signal::{ListenerAddrs, ListenerKind, ReadySignal};
pub use update::{UpdateProgress, UpdateProvider};

use std::sync::Arc;

/// A background proxy engine.
///
/// `run` is expected to block (asynchronously) for the remaining lifetime of
/// the process. Implementations publish each listener address on `listeners`
/// as soon as the corresponding socket is bound, and push [`Quota`] samples
/// into `quota` whenever the upstream reports usage. Dropping `quota` ends
/// the shim's bandwidth notifier.
#[async_trait::async_trait]
pub trait ProxyEngine: Send + Sync {
    /// Run the proxy until process exit.
    async fn run(
        &self,
        config: EngineConfig,
        hooks: EngineHooks,
        listeners: Arc<ListenerAddrs>,
        quota: QuotaSender,
    );
}
