//! Common types for the Neon Matrix environment abstraction.

use crate::error::EnvError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Port used when an endpoint does not name one.
pub const DEFAULT_PORT: u16 = 2077;

/// A mainframe address.
///
/// Only ever used for logging and host validation; nothing here opens a
/// socket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Host name, e.g. `neon.cyberpunk.net`
    pub host: String,

    /// TCP-style port number
    pub port: u16,
}

impl Endpoint {
    /// Creates an endpoint from host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Creates an endpoint on the default port.
    pub fn with_default_port(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_PORT)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EnvError::endpoint("empty endpoint"));
        }

        match s.rsplit_once(':') {
            Some((host, port)) => {
                if host.is_empty() {
                    return Err(EnvError::endpoint(s));
                }
                let port = port
                    .parse::<u16>()
                    .map_err(|_| EnvError::InvalidPort(port.to_string()))?;
                Ok(Self::new(host, port))
            }
            None => Ok(Self::with_default_port(s)),
        }
    }
}
