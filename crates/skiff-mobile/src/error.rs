//! Error types for the shim.

use skiff_engine::ListenerKind;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Shim errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A proxy listener did not bind within its timeout slice
    #[error("{listener} proxy did not start within the given timeout")]
    ReadinessTimeout {
        /// Which listener's wait expired
        listener: ListenerKind,
    },

    /// Survey document could not be fetched
    #[error("Survey fetch error: {0}")]
    SurveyFetch(String),

    /// Survey document or entry could not be parsed
    #[error("Survey parse error: {0}")]
    SurveyParse(String),

    /// Update check or download failed
    #[error("Update error: {0}")]
    Update(String),

    /// No proxy engine has been registered
    #[error("No proxy engine registered")]
    NoEngine,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Which listener a readiness timeout refers to, if this is one.
    pub fn timed_out_listener(&self) -> Option<ListenerKind> {
        match self {
            Self::ReadinessTimeout { listener } => Some(*listener),
            _ => None,
        }
    }
}
