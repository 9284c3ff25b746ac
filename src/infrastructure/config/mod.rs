//! Infrastructure configuration modules.

pub mod logging;
pub mod settings;
pub mod venue;

pub use logging::LoggingConfig;
pub use settings::{Config, ReconcileConfig, DEFAULT_CONFIG_PATH};
pub use venue::{Credentials, HttpConfig, SourceVenueConfig, TargetVenueConfig};
