// src/core/errors.rs

//! Defines the primary error type for the entire crate.

use std::sync::Arc;
use thiserror::Error;

/// The main error enum, representing all possible failures while talking to a
/// munin node. Using `thiserror` allows for clean error definitions and
/// automatic `From` trait implementations.
#[derive(Error, Debug)]
pub enum MuninError {
    /// The underlying stream failed (connect, write, or read). Not recoverable
    /// locally; the connection must be re-established.
    #[error("IO Error: {0}")]
    Io(Arc<std::io::Error>),

    /// A transport-level deadline elapsed before the operation completed.
    #[error("Timeout while {0}")]
    Timeout(&'static str),

    /// The greeting line could not be read after connecting. The connection is
    /// unusable.
    #[error("Handshake failed: {0}")]
    Handshake(String),

    /// The node violated the wire protocol, or a response-region invariant was
    /// broken. The stream position is unknown afterwards, so the connection
    /// must be treated as unusable.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The node explicitly reported that the requested metric does not exist.
    /// Returned by `config`/`fetch` only; an expected, recoverable outcome
    /// callers are meant to branch on.
    #[error("Metric not found")]
    MetricNotFound,
}

// Manual implementation of Clone because `std::io::Error` is not cloneable.
// We wrap it in an Arc to allow for cheap, shared cloning.
impl Clone for MuninError {
    fn clone(&self) -> Self {
        match self {
            MuninError::Io(e) => MuninError::Io(Arc::clone(e)),
            MuninError::Timeout(op) => MuninError::Timeout(op),
            MuninError::Handshake(s) => MuninError::Handshake(s.clone()),
            MuninError::Protocol(s) => MuninError::Protocol(s.clone()),
            MuninError::MetricNotFound => MuninError::MetricNotFound,
        }
    }
}

impl PartialEq for MuninError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MuninError::Io(e1), MuninError::Io(e2)) => e1.to_string() == e2.to_string(),
            (MuninError::Timeout(o1), MuninError::Timeout(o2)) => o1 == o2,
            (MuninError::Handshake(s1), MuninError::Handshake(s2)) => s1 == s2,
            (MuninError::Protocol(s1), MuninError::Protocol(s2)) => s1 == s2,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl From<std::io::Error> for MuninError {
    fn from(e: std::io::Error) -> Self {
        MuninError::Io(Arc::new(e))
    }
}
