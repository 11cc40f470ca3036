//! Quota-to-bandwidth-signal translation and the notifier task.

use std::sync::Arc;

use skiff_engine::{Quota, QuotaReceiver};
use tokio::task::JoinHandle;

use crate::models::{BandwidthSignal, HostCallbacks};

/// Quota samples claiming more than this many MiB allowed are sentinel or
/// corrupt values and are discarded without producing a signal.
pub const MAX_QUOTA_ALLOWED_MIB: i64 = 50_000_000;

/// Translate a quota sample into a clamped bandwidth signal.
///
/// Returns `None` for out-of-range `mib_allowed`. The result always has
/// `percent` in `[0, 100]` and a non-negative `remaining_mib`.
pub fn translate(quota: &Quota) -> Option<BandwidthSignal> {
    let allowed = quota.mib_allowed;
    if allowed < 0 || allowed > MAX_QUOTA_ALLOWED_MIB {
        return None;
    }
    if quota.mib_used >= allowed {
        return Some(BandwidthSignal {
            percent: 100,
            remaining_mib: 0,
        });
    }
    // Here allowed > mib_used; negative usage reads as zero.
    let used = quota.mib_used.max(0);
    if allowed == 0 {
        return Some(BandwidthSignal {
            percent: 100,
            remaining_mib: 0,
        });
    }
    Some(BandwidthSignal {
        percent: (100 * used / allowed) as i32,
        remaining_mib: allowed - used,
    })
}

/// Spawn the bandwidth notifier task.
///
/// The task owns the receiving half of the quota stream, so the host
/// callback is invoked by exactly one consumer, serially, in arrival order.
/// It runs until the engine drops the sending half.
pub fn spawn_notifier(
    mut quota_rx: QuotaReceiver,
    callbacks: Arc<dyn HostCallbacks>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(quota) = quota_rx.recv().await {
            if let Some(signal) = translate(&quota) {
                callbacks.bandwidth_update(signal.percent, signal.remaining_mib);
            } else {
                tracing::debug!(
                    allowed = quota.mib_allowed,
                    used = quota.mib_used,
                    "discarding out-of-range quota sample"
                );
            }
        }
        tracing::debug!("quota stream closed; bandwidth notifier exiting");
    })
}
