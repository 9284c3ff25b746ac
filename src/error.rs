use thiserror::Error;

use crate::domain::error::ReconcileError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Non-success responses from a venue's REST API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VenueError {
    #[error("{venue} {endpoint}: 404 Record Not Found")]
    NotFound {
        venue: &'static str,
        endpoint: String,
    },

    #[error("{venue} {endpoint}: 401 Not Authorized")]
    NotAuthorized {
        venue: &'static str,
        endpoint: String,
    },

    #[error("{venue} {endpoint}: {status} Service Unavailable")]
    ServiceUnavailable {
        venue: &'static str,
        endpoint: String,
        status: u16,
    },

    #[error("{venue} {endpoint}: unexpected status {status}")]
    UnexpectedStatus {
        venue: &'static str,
        endpoint: String,
        status: u16,
    },
}

impl VenueError {
    /// Map a non-success HTTP status to a venue error.
    #[must_use]
    pub fn from_status(venue: &'static str, endpoint: impl Into<String>, status: u16) -> Self {
        let endpoint = endpoint.into();
        match status {
            401 => Self::NotAuthorized { venue, endpoint },
            404 => Self::NotFound { venue, endpoint },
            502 | 503 => Self::ServiceUnavailable {
                venue,
                endpoint,
                status,
            },
            _ => Self::UnexpectedStatus {
                venue,
                endpoint,
                status,
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Venue(#[from] VenueError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("request signing failed: {0}")]
    Signing(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}
