//! VPN socket protection overrides.
//!
//! When the proxy runs inside a device VPN, its own sockets must bypass the
//! tunnel or traffic loops back through the proxy forever. The host supplies
//! a [`SocketProtector`]; engine implementations consult the process-wide
//! override before dialing.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Protects sockets from being routed through the device VPN.
pub trait SocketProtector: Send + Sync {
    /// Mark the socket behind `fd` as exempt from VPN routing.
    fn protect(&self, fd: i32) -> std::io::Result<()>;
}

/// The active protection override: a protector plus the DNS server to use
/// for resolution outside the tunnel.
#[derive(Clone)]
pub struct ProtectedDial {
    /// DNS server address used for protected resolution
    pub dns_server: String,
    /// The host-supplied protector
    pub protector: Arc<dyn SocketProtector>,
}

static OVERRIDE: Lazy<RwLock<Option<ProtectedDial>>> = Lazy::new(|| RwLock::new(None));

/// Install a protection override for all engine connections.
pub fn protect_connections(dns_server: impl Into<String>, protector: Arc<dyn SocketProtector>) {
    let dns_server = dns_server.into();
    tracing::info!(%dns_server, "socket protection enabled");
    *OVERRIDE.write() = Some(ProtectedDial {
        dns_server,
        protector,
    });
}

/// Remove the protection override.
pub fn remove_overrides() {
    tracing::info!("socket protection disabled");
    *OVERRIDE.write() = None;
}

/// The current override, if any. Engine implementations call this per dial.
pub fn current_override() -> Option<ProtectedDial> {
    OVERRIDE.read().clone()
}
