//! Error types

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Engine-side errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Update check or download error
    #[error("Update error: {0}")]
    Update(String),

    /// Engine error
    #[error("Engine error: {0}")]
    Engine(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
