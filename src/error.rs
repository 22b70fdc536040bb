//! Error types
//!
//! Every operation returns [`Result`]. The variants keep the three failure
//! classes apart: parameters rejected before any request was sent
//! ([`Error::Validation`]), a non-2xx answer from the API ([`Error::Api`]),
//! and a failure of the network call itself ([`Error::Transport`]).

use std::fmt;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Client error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Arguments violated the operation's parameter schema; no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The API answered with a non-2xx status
    #[error("Affinity API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// The HTTP exchange itself failed (DNS, connect, TLS, body read)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx body was not valid JSON, or typed params did not serialize
    #[error("JSON decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// A response had a shape the pagination layer cannot follow
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// No descriptor is registered under this name
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The configured base URL could not be parsed
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl Error {
    /// HTTP status of an [`Error::Api`], `None` for every other variant
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the API rejected the request with 404
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True when the API rejected the request because of rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

/// A single rejected parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// All parameter violations found for one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub operation: String,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Check whether a given field was reported
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Names of the offending fields, in report order
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid parameters for {}: ", self.operation)?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
