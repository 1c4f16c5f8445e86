//! Error type shared by the client, the fixture helpers and the scenarios.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing configuration value `{key}`")]
    MissingConfig { key: String },

    #[error("invalid base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error(transparent)]
    Config(#[from] figment::Error),

    #[error("failed to load {}: {source}", path.display())]
    DotEnv {
        path:   std::path::PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url:    String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response body at `{path}`: {source}")]
    Decode {
        path:   String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{message}: expected status {expected}, got {actual}")]
    Status {
        message:  String,
        expected: String,
        actual:   StatusCode,
    },

    #[error("{message}: field `{field}` expected {expected:?}, got {actual:?}")]
    FieldMismatch {
        message:  String,
        field:    &'static str,
        expected: String,
        actual:   String,
    },

    #[error("{message}: response body is empty")]
    EmptyBody { message: String },

    #[error("{message}: request unexpectedly succeeded with {actual}")]
    UnexpectedSuccess { message: String, actual: StatusCode },
}

impl Error {
    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfig { key: key.into() }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether the error came from the transport rather than from a check.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
