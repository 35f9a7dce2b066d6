// src/client/sequencer.rs

//! Command sequencing and the response-region discipline.
//!
//! Every command sent on a connection is tagged with a monotonically
//! increasing sequence id. Reading that command's response happens inside a
//! "response region": a bounded interval during which the connection is the
//! exclusive reader of lines belonging to that command. At most one region
//! may be open at a time; the region is an RAII guard so it closes on every
//! exit path, leaving the stream positioned at the start of the next
//! response even when parsing fails mid-body.

use crate::core::MuninError;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Sequence ids start here; 0 is reserved to mean "no region open".
const FIRST_SEQUENCE_ID: u64 = 1;

/// Issues sequence ids and tracks the currently open response region.
#[derive(Debug)]
pub struct Sequencer {
    next_id: u64,
    open_region: Arc<AtomicU64>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            next_id: FIRST_SEQUENCE_ID,
            open_region: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns a fresh sequence id, strictly greater than all previously
    /// issued ids on this connection. Ids are never reused.
    pub fn issue(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Opens the response region for `id`.
    ///
    /// Fails fast if a region for another command is still open. That is a
    /// protocol-usage error on the caller's side, not a network failure, and
    /// silently proceeding would interleave two commands' response lines.
    pub fn open(&self, id: u64) -> Result<ResponseRegion, MuninError> {
        match self
            .open_region
            .compare_exchange(0, id, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => Ok(ResponseRegion {
                open_region: Arc::clone(&self.open_region),
                id,
            }),
            Err(held_by) => Err(MuninError::Protocol(format!(
                "response region for command {held_by} is still open, cannot open one for {id}"
            ))),
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// An RAII guard marking the response region for one sequence id as open.
/// Dropping the guard closes the region.
#[derive(Debug)]
pub struct ResponseRegion {
    open_region: Arc<AtomicU64>,
    id: u64,
}

impl ResponseRegion {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for ResponseRegion {
    /// Closes the region when the guard goes out of scope, on success and
    /// failure paths alike.
    fn drop(&mut self) {
        self.open_region.store(0, Ordering::SeqCst);
        debug!("response region for command {} closed", self.id);
    }
}
