//! Blocking client for the Serverify mock-server control API.
//!
//! # Overview
//! Create a named session, point the system under test at
//! `Session::base_url`, then read back the requests it made with
//! `Session::logs` and clean up with `Session::delete`.
//!
//! # Design
//! - `Serverify` is the only component that talks HTTP. It builds a plain
//!   `HttpRequest`, hands it to a `Transport`, and decodes the `HttpResponse`
//!   into the caller's type or a single `Error`.
//! - `Session` borrows the `Serverify` it came from and delegates to it.
//! - Failures reaching the server (`TransportError`) and failures reported by
//!   it (`OperationError`) stay distinct. Nothing is retried.
//! - DTOs are defined independently from the server crate; integration tests
//!   catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::{Serverify, NO_BODY};
pub use error::{Error, OperationError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::Session;
pub use transport::{Transport, TransportConfig, UreqTransport};
pub use types::{Log, Logs, SessionBody};
