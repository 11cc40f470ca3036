//! Engine run configuration

use std::path::PathBuf;

/// Default HTTP listen address (random port).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:0";
/// Default SOCKS5 listen address (random port).
pub const DEFAULT_SOCKS5_ADDR: &str = "127.0.0.1:0";

/// Configuration handed to [`crate::ProxyEngine::run`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// HTTP proxy listen address
    pub http_addr: String,
    /// SOCKS5 proxy listen address
    pub socks5_addr: String,
    /// Directory for engine configuration and logs
    pub config_dir: PathBuf,
    /// Whether the engine should persist fetched configuration
    pub sticky_config: bool,
    /// Run against staging infrastructure
    pub staging: bool,
    /// Free-form engine flags
    pub flags: serde_json::Map<String, serde_json::Value>,
    /// Per-process instance id reported to the config service
    pub instance_id: String,
}

impl EngineConfig {
    /// Create a config with default listen addresses and a fresh instance id.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            socks5_addr: DEFAULT_SOCKS5_ADDR.to_string(),
            config_dir: config_dir.into(),
            sticky_config: false,
            staging: false,
            flags: serde_json::Map::new(),
            instance_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Set a free-form flag.
    pub fn with_flag(mut self, key: &str, value: serde_json::Value) -> Self {
        self.flags.insert(key.to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_random_ports() {
        let config = EngineConfig::new("/tmp/skiff");
        assert_eq!(config.http_addr, "127.0.0.1:0");
        assert_eq!(config.socks5_addr, "127.0.0.1:0");
        assert!(!config.sticky_config);
        assert!(!config.staging);
        assert!(!config.instance_id.is_empty());
    }

    #[test]
    fn instance_ids_are_unique_per_config() {
        let a = EngineConfig::new("/tmp/skiff");
        let b = EngineConfig::new("/tmp/skiff");
        assert_ne!(a.instance_id, b.instance_id);
    }
}
