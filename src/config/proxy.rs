//! Proxy address parsing.
//!
//! The accepted grammar is strict: `[user:password@]host:port`. Anything
//! else (missing port, empty host, credentials without a colon, scheme
//! prefixes) is rejected with a configuration error instead of being
//! partially parsed and silently connecting directly.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A parsed proxy address.
///
/// Fields are ordered the way they are handed to the connection constructor:
/// host, port, user, password.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxySpec {
    /// Proxy hostname or IP.
    pub host: String,

    /// Proxy port.
    pub port: u16,

    /// Optional basic-auth user.
    pub user: Option<String>,

    /// Optional basic-auth password. Present exactly when `user` is.
    pub password: Option<String>,
}

impl ProxySpec {
    /// Parse a proxy string of the form `[user:password@]host:port`.
    pub fn parse(raw: &str) -> Result<Self> {
        let bad = || Error::Config(format!("malformed proxy address '{raw}', expected [user:password@]host:port"));

        if raw.contains("://") {
            return Err(bad());
        }

        let (credentials, address) = match raw.rsplit_once('@') {
            Some((credentials, address)) => (Some(credentials), address),
            None => (None, raw),
        };

        let (user, password) = match credentials {
            Some(credentials) => {
                let (user, password) = credentials.split_once(':').ok_or_else(bad)?;
                if user.is_empty() || password.is_empty() {
                    return Err(bad());
                }
                (Some(user.to_string()), Some(password.to_string()))
            }
            None => (None, None),
        };

        let (host, port) = address.rsplit_once(':').ok_or_else(bad)?;
        if host.is_empty() || host.contains(':') || host.contains('@') {
            return Err(bad());
        }
        let port: u16 = port.parse().map_err(|_| bad())?;

        Ok(Self {
            host: host.to_string(),
            port,
            user,
            password,
        })
    }
}

impl std::fmt::Display for ProxySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials are omitted so the value is safe to log.
        write!(f, "{}:{}", self.host, self.port)
    }
}
