//! Embeddable client-side proxy shim
//!
//! Exposes a background proxy engine to a host application (typically a
//! mobile app): starts it once per process, reports its listening
//! addresses, translates bandwidth-quota telemetry into UI signals, and
//! resolves a localized survey prompt. The proxy transport itself lives
//! behind the [`skiff_engine::ProxyEngine`] trait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod bandwidth;
pub mod error;
pub mod logging;
pub mod models;
pub mod startup;
pub mod survey;
pub mod updates;

pub use api::{set_engine, start};
pub use bandwidth::{spawn_notifier, translate, MAX_QUOTA_ALLOWED_MIB};
pub use error::{Error, Result};
pub use logging::add_metadata;
pub use models::{BandwidthSignal, HostCallbacks, StartResult, SurveyInfo};
pub use startup::Startup;
pub use survey::{SurveyResolver, DEFAULT_LOCALE, SURVEY_URL};
pub use updates::{
    check_for_updates, download_update, set_update_provider, PACKAGE_VERSION, UPDATE_SERVER_URL,
};

// Re-export socket protection so hosts depend on one crate.
pub use skiff_engine::{protect_connections, remove_overrides, SocketProtector};
