//! HTTP request and response values exchanged with a `Transport`.
//!
//! # Design
//! The mediator builds an `HttpRequest` as plain data, hands it to the
//! transport, and interprets the returned `HttpResponse`. Keeping both sides
//! as owned values lets request construction and response decoding be tested
//! without a network, and lets any HTTP library sit behind the transport.

/// HTTP verbs used by the Serverify control API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute: the mediator has already joined its base URL with the
/// server-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Transports return error statuses through this type too; only failures to
/// obtain a response at all are transport errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// 2xx is success; every other status is an error class.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
