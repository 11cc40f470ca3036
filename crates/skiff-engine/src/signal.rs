//! One-shot readiness signals for engine listeners.

use std::fmt;
use std::pin::pin;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::Notify;

/// A one-shot value that tasks can await with a bounded timeout.
///
/// The first `publish` wins; later publishes are ignored. Waiters registered
/// before or after publication both observe the value.
pub struct ReadySignal<T> {
    value: RwLock<Option<T>>,
    ready: Notify,
}

impl<T: Clone> ReadySignal<T> {
    /// Create a new, unset signal.
    pub fn new() -> Self {
        Self {
            value: RwLock::new(None),
            ready: Notify::new(),
        }
    }

    /// Publish the value, waking all waiters.
    ///
    /// Returns `false` if a value was already published; the signal keeps
    /// the first value in that case.
    pub fn publish(&self, value: T) -> bool {
        {
            let mut slot = self.value.write();
            if slot.is_some() {
                return false;
            }
            *slot = Some(value);
        }
        self.ready.notify_waiters();
        true
    }

    /// Get the current value without waiting.
    pub fn get(&self) -> Option<T> {
        self.value.read().clone()
    }

    /// Wait up to `timeout` for the value.
    ///
    /// Returns `None` on timeout. A zero timeout still observes an
    /// already-published value but never blocks on an unset one.
    pub async fn wait(&self, timeout: Duration) -> Option<T> {
        if let Some(value) = self.get() {
            return Some(value);
        }
        tokio::time::timeout(timeout, async {
            loop {
                // Register interest before re-checking so a concurrent
                // publish cannot slip between the check and the await.
                let mut notified = pin!(self.ready.notified());
                notified.as_mut().enable();
                if let Some(value) = self.get() {
                    return value;
                }
                notified.await;
            }
        })
        .await
        .ok()
    }
}

impl<T: Clone> Default for ReadySignal<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Which proxy listener a signal or wait refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    /// The HTTP proxy listener
    Http,
    /// The SOCKS5 proxy listener
    Socks5,
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "HTTP"),
            Self::Socks5 => write!(f, "SOCKS5"),
        }
    }
}

/// Readiness signals for the two proxy listeners.
///
/// The engine publishes each address exactly once after binding; the shim
/// waits on them with per-listener timeout slices.
#[derive(Default)]
pub struct ListenerAddrs {
    http: ReadySignal<String>,
    socks5: ReadySignal<String>,
}

impl ListenerAddrs {
    /// Create with both signals unset.
    pub fn new() -> Self {
        Self::default()
    }

    fn signal(&self, kind: ListenerKind) -> &ReadySignal<String> {
        match kind {
            ListenerKind::Http => &self.http,
            ListenerKind::Socks5 => &self.socks5,
        }
    }

    /// Publish the bound address for a listener. First publish wins.
    pub fn publish(&self, kind: ListenerKind, addr: impl Into<String>) -> bool {
        let addr = addr.into();
        let published = self.signal(kind).publish(addr.clone());
        if published {
            tracing::debug!(listener = %kind, %addr, "listener address published");
        }
        published
    }

    /// Get a listener address without waiting.
    pub fn get(&self, kind: ListenerKind) -> Option<String> {
        self.signal(kind).get()
    }

    /// Wait up to `timeout` for a listener address.
    pub async fn wait(&self, kind: ListenerKind, timeout: Duration) -> Option<String> {
        self.signal(kind).wait(timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn wait_returns_published_value() {
        let signal = ReadySignal::new();
        assert!(signal.publish("127.0.0.1:8080".to_string()));
        let value = signal.wait(Duration::from_millis(10)).await;
        assert_eq!(value.as_deref(), Some("127.0.0.1:8080"));
    }

    #[tokio::test]
    async fn wait_times_out_on_unset_signal() {
        let signal: ReadySignal<String> = ReadySignal::new();
        assert!(signal.wait(Duration::from_millis(20)).await.is_none());
    }

    #[tokio::test]
    async fn zero_timeout_observes_existing_value_only() {
        let signal = ReadySignal::new();
        assert!(signal.wait(Duration::ZERO).await.is_none());
        signal.publish(42u16);
        assert_eq!(signal.wait(Duration::ZERO).await, Some(42));
    }

    #[tokio::test]
    async fn first_publish_wins() {
        let signal = ReadySignal::new();
        assert!(signal.publish("a".to_string()));
        assert!(!signal.publish("b".to_string()));
        assert_eq!(signal.get().as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn waiter_registered_before_publish_is_woken() {
        let signal = Arc::new(ReadySignal::new());
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait(Duration::from_secs(5)).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        signal.publish("ready".to_string());
        let value = waiter.await.expect("waiter panicked");
        assert_eq!(value.as_deref(), Some("ready"));
    }

    #[tokio::test]
    async fn listener_addrs_are_independent() {
        let addrs = ListenerAddrs::new();
        addrs.publish(ListenerKind::Http, "127.0.0.1:1080");
        assert_eq!(
            addrs.wait(ListenerKind::Http, Duration::ZERO).await.as_deref(),
            Some("127.0.0.1:1080")
        );
        assert!(addrs.wait(ListenerKind::Socks5, Duration::ZERO).await.is_none());
    }
}
