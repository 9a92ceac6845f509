//! Error types for JIRA integration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A mini-language token that is not `key:value`.
    #[error("incorrect value format, expect: key:value (got \"{token}\")")]
    Format { token: String },

    #[error("invalid story points for {label}: \"{value}\"")]
    InvalidPoints { label: String, value: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response, with the raw body for diagnostics.
    #[error("response error {status} {body}")]
    Remote { status: u16, body: String },

    /// 2xx response whose body does not decode into the expected shape.
    #[error("unexpected response: {0}")]
    Protocol(#[source] serde_json::Error),
}

impl Error {
    /// Malformed user input, rejected before any request was built
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. } | Error::InvalidPoints { .. })
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
