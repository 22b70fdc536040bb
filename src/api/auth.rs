//! API key handling
//!
//! Affinity authenticates with HTTP Basic auth: empty username, the API key
//! as password. The key is held for the lifetime of the client and is never
//! printed.

use std::fmt;
use std::sync::Arc;

/// Opaque API key
#[derive(Clone)]
pub struct Credential {
    secret: Arc<str>,
}

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }

    /// Username half of the Basic auth pair (always empty)
    pub fn username(&self) -> &'static str {
        ""
    }

    /// Password half of the Basic auth pair
    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl From<&str> for Credential {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Credential {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}
