//! Lifecycle hooks injected into the engine run loop.

/// Global configuration snapshot pushed by the config service.
///
/// Only the fields the shim forwards to the host are modeled here; the
/// engine keeps the rest to itself.
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub struct GlobalConfig {
    /// Whether the UI should show sponsored content
    #[serde(default)]
    pub show_ads: bool,
}

/// Callbacks the engine invokes at fixed points of its lifecycle.
///
/// `after_start` fires once, when configuration has been applied and
/// connectivity is established. That is a separate event from the listener
/// addresses becoming ready; listeners usually bind earlier.
pub struct EngineHooks {
    /// Called before the run loop starts; returning `false` aborts the run.
    pub before_start: Box<dyn Fn() -> bool + Send + Sync>,
    /// Called once after configuration and connectivity setup complete.
    pub after_start: Box<dyn Fn() + Send + Sync>,
    /// Called whenever a new global configuration is applied.
    pub on_config_update: Box<dyn Fn(GlobalConfig) + Send + Sync>,
    /// Called for non-fatal engine errors.
    pub on_error: Box<dyn Fn(String) + Send + Sync>,
}

impl Default for EngineHooks {
    fn default() -> Self {
        Self {
            before_start: Box::new(|| true),
            after_start: Box::new(|| {}),
            on_config_update: Box::new(|_| {}),
            on_error: Box::new(|err| tracing::error!(%err, "engine error")),
        }
    }
}
