//! Request mediation for the Serverify control API.
//!
//! # Design
//! `Serverify` holds only a `base_url` and a transport, and carries no mutable
//! state between calls. Every operation goes through the same three steps:
//! `build_request` produces an `HttpRequest`, the transport executes it, and
//! `parse_response` turns the `HttpResponse` into either the caller's typed
//! result or a single `Error` value. The build and parse steps are pure, so
//! they are tested without a network.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, OperationError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::Session;
use crate::transport::{Transport, UreqTransport};
use crate::types::{ErrorEnvelope, SessionBody};

/// Body argument for requests that send none.
pub const NO_BODY: Option<&()> = None;

/// Client for one Serverify server.
///
/// Sessions created through it borrow it, so it must outlive all of them.
#[derive(Debug, Clone)]
pub struct Serverify<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl Serverify<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> Serverify<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create a session on the server.
    ///
    /// The returned session carries the name the server reported, which is
    /// not assumed to equal `name`.
    pub fn create_session(&self, name: &str) -> Result<Session<'_, T>, Error> {
        let body = SessionBody {
            session: name.to_string(),
        };
        let created: SessionBody = self.perform(HttpMethod::Post, "/session", Some(&body))?;
        Ok(Session::new(created.session, self))
    }

    /// Bind a handle to a session that already exists on the server.
    ///
    /// No request is made; an unknown name surfaces as a 404 on first use.
    pub fn session(&self, name: &str) -> Session<'_, T> {
        Session::new(name.to_string(), self)
    }

    /// Send a request and decode a successful response body into `R`.
    pub fn perform<B, R>(&self, method: HttpMethod, path: &str, body: Option<&B>) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(method, path, body)?;
        parse_response(response)
    }

    /// Send a request and discard a successful response body.
    pub fn perform_ignoring_body<B>(&self, method: HttpMethod, path: &str, body: Option<&B>) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, body)?;
        check_status(&response)?;
        Ok(())
    }

    pub fn build_request<B>(&self, method: HttpMethod, path: &str, body: Option<&B>) -> Result<HttpRequest, Error>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        match body {
            Some(body) => {
                let body = serde_json::to_string(body).map_err(Error::Serialization)?;
                Ok(HttpRequest {
                    method,
                    url,
                    headers: vec![("content-type".to_string(), "application/json".to_string())],
                    body: Some(body),
                })
            }
            None => Ok(HttpRequest {
                method,
                url,
                headers: Vec::new(),
                body: None,
            }),
        }
    }

    fn send<B>(&self, method: HttpMethod, path: &str, body: Option<&B>) -> Result<HttpResponse, Error>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, body)?;
        tracing::debug!(method = method.as_str(), url = %request.url, "sending serverify request");
        let response = self.transport.execute(&request)?;
        tracing::debug!(status = response.status, url = %request.url, "received serverify response");
        Ok(response)
    }
}

/// Decode a response: the caller's type on 2xx, an `OperationError` otherwise.
pub fn parse_response<R: DeserializeOwned>(response: HttpResponse) -> Result<R, Error> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(Error::Deserialization)
}

/// Map a non-2xx response to an `OperationError` built from its envelope.
pub fn check_status(response: &HttpResponse) -> Result<(), OperationError> {
    if response.is_success() {
        return Ok(());
    }
    let envelope: ErrorEnvelope = serde_json::from_str(&response.body).unwrap_or_default();
    let err = OperationError {
        status_code: response.status,
        message: envelope.serverify_error.message,
    };
    tracing::warn!(status = err.status_code, message = %err.message, "serverify reported an error");
    Err(err)
}
