//! Bandwidth quota samples pushed by the engine.

use tokio::sync::mpsc;

/// A single usage report from the bandwidth service.
///
/// Samples are independent; the only ordering guarantee is that delivery
/// order is preserved. Values outside the valid `mib_allowed` range are
/// sentinel or corrupt and are filtered by the shim, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Quota {
    /// Mebibytes allowed in the current period
    pub mib_allowed: i64,
    /// Mebibytes used in the current period
    pub mib_used: i64,
}

/// Sending half of the quota stream, held by the engine.
pub type QuotaSender = mpsc::UnboundedSender<Quota>;
/// Receiving half of the quota stream, drained by the shim's notifier.
pub type QuotaReceiver = mpsc::UnboundedReceiver<Quota>;

/// Create the quota stream pair.
///
/// Unbounded: the engine pushes at its own pace and must never block on a
/// slow consumer; the notifier is the single consumer.
pub fn quota_channel() -> (QuotaSender, QuotaReceiver) {
    mpsc::unbounded_channel()
}
