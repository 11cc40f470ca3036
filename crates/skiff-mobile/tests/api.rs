//! Process-global API tests.
//!
//! Single test function: the engine registry and launch guard are
//! process-wide, so ordering between cases must be explicit.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use skiff_engine::{
    EngineConfig, EngineHooks, ListenerAddrs, ListenerKind, ProxyEngine, QuotaSender,
};
use skiff_mobile::{Error, HostCallbacks};

struct ImmediateEngine;

#[async_trait]
impl ProxyEngine for ImmediateEngine {
    async fn run(
        &self,
        _config: EngineConfig,
        _hooks: EngineHooks,
        listeners: Arc<ListenerAddrs>,
        _quota: QuotaSender,
    ) {
        listeners.publish(ListenerKind::Http, "127.0.0.1:42080");
        listeners.publish(ListenerKind::Socks5, "127.0.0.1:42081");
        tokio::time::sleep(Duration::from_secs(3600)).await;
    }
}

struct NopCallbacks;

impl HostCallbacks for NopCallbacks {
    fn config_update(&self, _ads_enabled: bool) {}
    fn after_start(&self) {}
    fn show_survey(&self, _url: &str) {}
    fn bandwidth_update(&self, _percent: i32, _remaining_mib: i64) {}
}

#[tokio::test]
async fn start_requires_engine_then_reuses_single_instance() {
    let dir = tempfile::tempdir().unwrap();

    let err = skiff_mobile::start(dir.path(), "en-US", 100, Arc::new(NopCallbacks))
        .await
        .expect_err("no engine registered yet");
    assert!(matches!(err, Error::NoEngine), "got {err:?}");

    skiff_mobile::set_engine(Arc::new(ImmediateEngine));

    let first = skiff_mobile::start(dir.path(), "en-US", 5_000, Arc::new(NopCallbacks))
        .await
        .expect("start failed");
    assert_eq!(first.http_addr, "127.0.0.1:42080");
    assert_eq!(first.socks5_addr, "127.0.0.1:42081");

    // Second call joins the running instance and sees the same addresses.
    let second = skiff_mobile::start(dir.path(), "en-US", 5_000, Arc::new(NopCallbacks))
        .await
        .expect("second start failed");
    assert_eq!(first, second);

    // Re-registration after launch is ignored.
    skiff_mobile::set_engine(Arc::new(ImmediateEngine));
    let third = skiff_mobile::start(dir.path(), "en-US", 5_000, Arc::new(NopCallbacks))
        .await
        .expect("third start failed");
    assert_eq!(first, third);
}
