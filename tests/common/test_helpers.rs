// tests/common/test_helpers.rs

//! Shared test doubles for driving the protocol engine without a socket.

#![allow(dead_code)]

use async_trait::async_trait;
use munin_client::MuninError;
use munin_client::transport::LineStream;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A [`LineStream`] double fed from a fixed script of incoming lines.
///
/// Reads pop the script front and yield `Ok(None)` once it is exhausted,
/// mimicking a clean end-of-stream. Every written line is recorded and can
/// be inspected through the handle returned by [`ScriptedStream::sent`].
#[derive(Debug)]
pub struct ScriptedStream {
    incoming: VecDeque<String>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedStream {
    pub fn new<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Self {
        Self {
            incoming: lines.into_iter().map(str::to_string).collect(),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A handle to the lines written so far, usable after the stream has
    /// been moved into a connection.
    pub fn sent(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.sent)
    }
}

#[async_trait]
impl LineStream for ScriptedStream {
    async fn read_line(&mut self) -> Result<Option<String>, MuninError> {
        Ok(self.incoming.pop_front())
    }

    async fn write_line(&mut self, line: &str) -> Result<(), MuninError> {
        self.sent.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

/// A [`LineStream`] double whose every operation fails with an IO error.
#[derive(Debug)]
pub struct BrokenStream;

fn connection_reset() -> MuninError {
    std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset by peer").into()
}

#[async_trait]
impl LineStream for BrokenStream {
    async fn read_line(&mut self) -> Result<Option<String>, MuninError> {
        Err(connection_reset())
    }

    async fn write_line(&mut self, _line: &str) -> Result<(), MuninError> {
        Err(connection_reset())
    }
}
