//! File logging and reporting metadata.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use lazy_static::lazy_static;

/// Log file name inside the config directory.
pub const LOG_FILE_NAME: &str = "skiff.log";

lazy_static! {
    static ref METADATA: parking_lot::RwLock<HashMap<String, String>> =
        parking_lot::RwLock::new(HashMap::new());
}

/// Attach a key/value pair to the process-wide log context.
///
/// Metadata is emitted with the startup log line so crash reports from the
/// host can be correlated with a device and session.
pub fn add_metadata(key: impl Into<String>, value: impl Into<String>) {
    METADATA.write().insert(key.into(), value.into());
}

/// Snapshot of the current metadata.
pub fn metadata() -> HashMap<String, String> {
    METADATA.read().clone()
}

/// Route tracing output to `<config_dir>/skiff.log`.
///
/// Fails only when the log file cannot be opened. If the host already
/// installed a global subscriber the file writer is skipped and logging
/// keeps going to the host's subscriber.
pub fn enable_file_logging(config_dir: &Path) -> io::Result<()> {
    let path = config_dir.join(LOG_FILE_NAME);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    let installed = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(path = %path.display(), "writing log messages to file");
    } else {
        tracing::debug!("global subscriber already installed; keeping it");
    }
    for (key, value) in metadata() {
        tracing::info!(%key, %value, "log metadata");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_roundtrip() {
        add_metadata("device_id", "abc123");
        assert_eq!(metadata().get("device_id").map(String::as_str), Some("abc123"));
    }

    #[test]
    fn file_logging_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        enable_file_logging(dir.path()).unwrap();
        assert!(dir.path().join(LOG_FILE_NAME).exists());
    }

    #[test]
    fn file_logging_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(enable_file_logging(&missing).is_err());
    }
}
