//! The transport seam between the mediator and an HTTP library.
//!
//! # Design
//! `Transport` is the only I/O boundary in the crate: one blocking call that
//! turns an `HttpRequest` into an `HttpResponse`. Error statuses come back as
//! responses; only failures to get a response at all are `TransportError`s.
//! `UreqTransport` is the default implementation.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP request and returns the response.
///
/// Sessions sharing a mediator may call this concurrently when the
/// implementation is `Sync`; nothing in this crate serializes calls.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Settings for the default transport.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Upper bound on a whole request, connect through body read.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// `Transport` backed by a `ureq::Agent`.
///
/// The agent pools connections and is safe to share between threads.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    user_agent: Option<String>,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::from_config(&TransportConfig::default())
    }

    pub fn from_config(config: &TransportConfig) -> Self {
        // Error statuses must reach the mediator as data so it can decode the
        // error envelope.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self {
            agent,
            user_agent: config.user_agent.clone(),
        }
    }

    fn with_headers<B>(&self, mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.header("user-agent", user_agent.as_str());
        }
        builder
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => self.with_headers(self.agent.get(url), request).call(),
            (HttpMethod::Delete, _) => self.with_headers(self.agent.delete(url), request).call(),
            (HttpMethod::Post, Some(body)) => {
                self.with_headers(self.agent.post(url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => self.with_headers(self.agent.post(url), request).send_empty(),
        };
        let mut response = result.map_err(TransportError::new)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(TransportError::new)?;

        Ok(HttpResponse { status, headers, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_fields_default_to_none() {
        let config: TransportConfig = serde_json::from_str("{}").unwrap();
        assert!(config.timeout.is_none());
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn config_reads_timeout_and_user_agent() {
        let config: TransportConfig = serde_json::from_str(
            r#"{"timeout":{"secs":5,"nanos":0},"user_agent":"serverify-tests"}"#,
        )
        .unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.user_agent.as_deref(), Some("serverify-tests"));
    }

    #[test]
    fn unreachable_server_is_a_transport_error() {
        // Port 1 on loopback is reserved and refuses connections.
        let transport = UreqTransport::from_config(&TransportConfig {
            timeout: Some(Duration::from_secs(2)),
            user_agent: None,
        });
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "http://127.0.0.1:1/session/x".to_string(),
            headers: Vec::new(),
            body: None,
        };
        assert!(transport.execute(&request).is_err());
    }
}
