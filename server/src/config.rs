//! Listener settings read from the environment.

use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Config {
    /// `SERVERIFY_HOST` and `PORT`, falling back to defaults when unset or
    /// unparsable.
    pub fn from_env() -> Self {
        Self::from_vars(env::var("SERVERIFY_HOST").ok(), env::var("PORT").ok())
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Self {
        let defaults = Self::default();
        let port = match port {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(port = %raw, "ignoring invalid PORT");
                defaults.port
            }),
            None => defaults.port,
        };
        Self {
            host: host.unwrap_or(defaults.host),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
