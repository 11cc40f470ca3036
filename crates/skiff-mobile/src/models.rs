//! Host-facing data models and the callback surface.

use serde::Deserialize;

/// Addresses of the started proxies.
///
/// Produced once both listeners are bound within the caller's timeout
/// budget; immutable and owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartResult {
    /// HTTP proxy address
    pub http_addr: String,
    /// SOCKS5 proxy address
    pub socks5_addr: String,
}

/// One locale's entry in the remote survey document.
///
/// All fields default so partial entries still parse; an empty `url` means
/// "no survey configured" and is not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyInfo {
    /// Whether the survey is enabled for this locale
    #[serde(default)]
    pub enabled: bool,
    /// Campaign identifier
    #[serde(default)]
    pub campaign: String,
    /// Survey URL to open in the host UI
    #[serde(default)]
    pub url: String,
    /// Prompt message
    #[serde(default)]
    pub message: String,
    /// Thank-you message
    #[serde(default)]
    pub thanks: String,
    /// Button label
    #[serde(default)]
    pub button: String,
}

/// A clamped bandwidth reading derived from a quota sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandwidthSignal {
    /// Percent of the quota used, 0 to 100
    pub percent: i32,
    /// Mebibytes remaining, never negative
    pub remaining_mib: i64,
}

/// Lifecycle callbacks implemented by the host application.
///
/// `bandwidth_update` is invoked serially by a single task, one call at a
/// time, in stream order; implementations must not block indefinitely or
/// they stall all subsequent signals.
pub trait HostCallbacks: Send + Sync {
    /// A new global configuration was applied.
    fn config_update(&self, ads_enabled: bool);
    /// Configuration and connectivity setup finished.
    fn after_start(&self);
    /// A survey is available for the user's locale.
    fn show_survey(&self, url: &str);
    /// A fresh bandwidth reading arrived.
    fn bandwidth_update(&self, percent: i32, remaining_mib: i64);
}
