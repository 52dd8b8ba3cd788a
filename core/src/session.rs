//! Handle to one Serverify session.

use crate::client::{Serverify, NO_BODY};
use crate::error::Error;
use crate::http::HttpMethod;
use crate::transport::{Transport, UreqTransport};
use crate::types::Logs;

/// A session on the server, bound to the `Serverify` client that created it.
///
/// The handle borrows its client rather than owning it: the client must
/// outlive every session derived from it. Deleting the session does not
/// invalidate the handle; later calls fail with the server's 404.
#[derive(Debug)]
pub struct Session<'a, T = UreqTransport> {
    name: String,
    serverify: &'a Serverify<T>,
}

impl<T> Clone for Session<'_, T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            serverify: self.serverify,
        }
    }
}

impl<'a, T: Transport> Session<'a, T> {
    pub(crate) fn new(name: String, serverify: &'a Serverify<T>) -> Self {
        Self { name, serverify }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch the requests recorded so far. Each call is a fresh snapshot.
    pub fn logs(&self) -> Result<Logs, Error> {
        self.serverify.perform(HttpMethod::Get, &self.path(), NO_BODY)
    }

    pub fn delete(&self) -> Result<(), Error> {
        self.serverify
            .perform_ignoring_body(HttpMethod::Delete, &self.path(), NO_BODY)
    }

    /// Base URL of this session's mock endpoint. Requests sent under it are
    /// recorded and show up in `logs`.
    pub fn base_url(&self) -> String {
        format!("{}/mock/{}", self.serverify.base_url(), self.name)
    }

    fn path(&self) -> String {
        format!("/session/{}", self.name)
    }
}
