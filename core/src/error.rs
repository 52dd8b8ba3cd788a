//! Error types for the Serverify client.
//!
//! # Design
//! Failures to reach the server (`Transport`) and failures reported by the
//! server (`Operation`) are kept disjoint. `OperationError` compares by value
//! so callers can match on a specific status code or message.

/// Opaque failure from the transport: connection refused, timeout, or a
/// response that could not be read.
#[derive(Debug, thiserror::Error)]
#[error("transport failed: {0}")]
pub struct TransportError(#[source] Box<dyn std::error::Error + Send + Sync + 'static>);

impl TransportError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self(source.into())
    }
}

/// A failure reported by Serverify through a non-2xx response.
///
/// `message` comes from the `serverify_error.message` field of the response
/// body and is empty when the body carried no such envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("serverify returned {status_code}: {message}")]
pub struct OperationError {
    pub status_code: u16,
    pub message: String,
}

/// Errors returned by `Serverify` and `Session` operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A success body did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl Error {
    pub fn operation(&self) -> Option<&OperationError> {
        match self {
            Error::Operation(err) => Some(err),
            _ => None,
        }
    }
}
