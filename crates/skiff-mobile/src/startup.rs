//! Startup coordination for the background proxy.
//!
//! One `Startup` owns one engine run for the lifetime of the process. The
//! first `start` call spawns the background run task; every call, first or
//! not, then waits for the two listener addresses with a shared timeout
//! budget. Timeouts bound only the caller's wait; the background run keeps
//! going and can satisfy a later retry.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use skiff_engine::{
    quota_channel, EngineConfig, EngineHooks, GlobalConfig, ListenerAddrs, ListenerKind,
    ProxyEngine, QuotaReceiver, QuotaSender,
};

use crate::bandwidth;
use crate::error::{Error, Result};
use crate::logging;
use crate::models::{HostCallbacks, StartResult};
use crate::survey::SurveyResolver;

/// Compiled-in staging switch, forwarded to the engine as a flag.
const STAGING: bool = false;

/// Coordinates the single background engine run and the readiness waits.
pub struct Startup {
    engine: Arc<dyn ProxyEngine>,
    launched: AtomicBool,
    listeners: Arc<ListenerAddrs>,
    quota_tx: Mutex<Option<QuotaSender>>,
    quota_rx: Mutex<Option<QuotaReceiver>>,
    survey: SurveyResolver,
}

impl Startup {
    /// Create a coordinator for `engine` using the production survey URL.
    pub fn new(engine: Arc<dyn ProxyEngine>) -> Arc<Self> {
        Self::with_survey(engine, SurveyResolver::new())
    }

    /// Create a coordinator with a custom survey resolver.
    pub fn with_survey(engine: Arc<dyn ProxyEngine>, survey: SurveyResolver) -> Arc<Self> {
        let (quota_tx, quota_rx) = quota_channel();
        Arc::new(Self {
            engine,
            launched: AtomicBool::new(false),
            listeners: Arc::new(ListenerAddrs::new()),
            quota_tx: Mutex::new(Some(quota_tx)),
            quota_rx: Mutex::new(Some(quota_rx)),
            survey,
        })
    }

    /// Start the proxy, or join one already starting, and wait for both
    /// listener addresses.
    ///
    /// The budget is spent sequentially: the HTTP wait gets all of it and
    /// the SOCKS5 wait gets whatever is left, saturating at zero. On
    /// timeout no partial result is returned, only the error naming the
    /// listener whose wait expired.
    pub async fn start(
        self: &Arc<Self>,
        config_dir: &Path,
        locale: &str,
        timeout: Duration,
        callbacks: Arc<dyn HostCallbacks>,
    ) -> Result<StartResult> {
        if self
            .launched
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            let this = Arc::clone(self);
            let config_dir = config_dir.to_path_buf();
            let locale = locale.to_string();
            let callbacks = callbacks.clone();
            tokio::spawn(async move { this.run(config_dir, locale, callbacks).await });
        }

        let started = Instant::now();
        let http_addr = self
            .listeners
            .wait(ListenerKind::Http, timeout)
            .await
            .ok_or(Error::ReadinessTimeout {
                listener: ListenerKind::Http,
            })?;

        let remaining = timeout.saturating_sub(started.elapsed());
        let socks5_addr = self
            .listeners
            .wait(ListenerKind::Socks5, remaining)
            .await
            .ok_or(Error::ReadinessTimeout {
                listener: ListenerKind::Socks5,
            })?;

        Ok(StartResult {
            http_addr,
            socks5_addr,
        })
    }

    /// Whether the background run has been launched.
    pub fn is_launched(&self) -> bool {
        self.launched.load(Ordering::SeqCst)
    }

    /// The listener readiness signals, for engine glue and tests.
    pub fn listeners(&self) -> Arc<ListenerAddrs> {
        self.listeners.clone()
    }

    async fn run(
        self: Arc<Self>,
        config_dir: PathBuf,
        locale: String,
        callbacks: Arc<dyn HostCallbacks>,
    ) {
        if let Err(err) = std::fs::create_dir_all(&config_dir) {
            // Callers observe this only as a readiness timeout; the run
            // never starts, so the signals stay unset.
            tracing::error!(dir = %config_dir.display(), %err, "unable to create config directory");
            return;
        }
        if let Err(err) = logging::enable_file_logging(&config_dir) {
            tracing::error!(%err, "unable to enable file logging");
            return;
        }

        let mut config = EngineConfig::new(config_dir.as_path())
            .with_flag("staging", serde_json::Value::Bool(STAGING));
        config.staging = STAGING;

        // The engine holds the only sender; the notifier ends with it.
        let Some(quota_tx) = self.quota_tx.lock().take() else {
            tracing::error!("quota stream already handed to an engine run");
            return;
        };

        // Engine hooks fire from the engine's run loop; the after-start
        // work is async, so it is handed back to the runtime.
        let runtime = tokio::runtime::Handle::current();
        let hooks = EngineHooks {
            before_start: Box::new(|| true),
            after_start: {
                let this = Arc::clone(&self);
                let callbacks = callbacks.clone();
                Box::new(move || {
                    let this = Arc::clone(&this);
                    let locale = locale.clone();
                    let callbacks = callbacks.clone();
                    runtime.spawn(async move { this.after_start(locale, callbacks).await });
                })
            },
            on_config_update: {
                let callbacks = callbacks.clone();
                Box::new(move |config: GlobalConfig| callbacks.config_update(config.show_ads))
            },
            on_error: Box::new(|err| tracing::error!(%err, "engine error")),
        };

        self.engine
            .run(config, hooks, self.listeners.clone(), quota_tx)
            .await;
        tracing::warn!("proxy engine run loop returned");
    }

    async fn after_start(self: Arc<Self>, locale: String, callbacks: Arc<dyn HostCallbacks>) {
        if let Some(quota_rx) = self.quota_rx.lock().take() {
            bandwidth::spawn_notifier(quota_rx, callbacks.clone());
        }
        callbacks.after_start();

        match self.survey.resolve(&locale).await {
            Ok(url) if !url.is_empty() => callbacks.show_survey(&url),
            Ok(_) => tracing::debug!(%locale, "no survey configured"),
            Err(err) => tracing::error!(%err, "survey resolution failed"),
        }
    }
}
