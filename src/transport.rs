// src/transport.rs

//! The transport layer: a minimal line-read/line-write capability trait and
//! its TCP-backed implementation.
//!
//! The protocol engine only ever talks to a [`LineStream`], which keeps it
//! decoupled from any concrete socket type and makes test doubles trivial.
//! Timeouts are a transport concern and are enforced here, not in the
//! protocol core.

use crate::config::TransportConfig;
use crate::core::MuninError;
use crate::core::protocol::LineCodec;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio_util::codec::Framed;

/// A bidirectional, ordered stream of text lines.
///
/// `read_line` resolves to `Ok(None)` on a clean end-of-stream; the layer
/// above decides whether that is acceptable at the current protocol position.
#[async_trait]
pub trait LineStream: Send {
    async fn read_line(&mut self) -> Result<Option<String>, MuninError>;
    async fn write_line(&mut self, line: &str) -> Result<(), MuninError>;
}

/// A [`LineStream`] over any async byte stream, framed by [`LineCodec`] and
/// guarded by the configured timeouts.
#[derive(Debug)]
pub struct FramedTransport<S> {
    framed: Framed<S, LineCodec>,
    config: TransportConfig,
}

impl<S: AsyncRead + AsyncWrite + Unpin + Send> FramedTransport<S> {
    pub fn new(stream: S, config: TransportConfig) -> Self {
        Self {
            framed: Framed::new(stream, LineCodec),
            config,
        }
    }
}

#[async_trait]
impl<S: AsyncRead + AsyncWrite + Unpin + Send> LineStream for FramedTransport<S> {
    async fn read_line(&mut self) -> Result<Option<String>, MuninError> {
        let read_fut = self.framed.next();
        match tokio::time::timeout(self.config.read_timeout, read_fut).await {
            Ok(Some(line)) => line.map(Some),
            Ok(None) => Ok(None),
            Err(_) => Err(MuninError::Timeout("waiting for a response line")),
        }
    }

    async fn write_line(&mut self, line: &str) -> Result<(), MuninError> {
        let write_fut = self.framed.send(line);
        tokio::time::timeout(self.config.write_timeout, write_fut)
            .await
            .map_err(|_| MuninError::Timeout("sending a command line"))?
    }
}

/// Opens a TCP connection to a munin node with the configured connect
/// timeout, returning the framed transport. The protocol handshake is not
/// performed here; see [`crate::client::Connection::handshake`].
pub async fn connect<A: ToSocketAddrs + Send>(
    addr: A,
    config: &TransportConfig,
) -> Result<FramedTransport<TcpStream>, MuninError> {
    let stream = tokio::time::timeout(config.connect_timeout, TcpStream::connect(addr))
        .await
        .map_err(|_| MuninError::Timeout("connecting to the node"))??;
    Ok(FramedTransport::new(stream, config.clone()))
}
