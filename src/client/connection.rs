// src/client/connection.rs

//! The munin node connection: handshake, command dispatch, and the typed
//! command surface (`list`, `nodes`, `version`, `config`, `fetch`).

use crate::client::sequencer::Sequencer;
use crate::config::TransportConfig;
use crate::core::MuninError;
use crate::core::protocol::{framing, parse};
use crate::transport::{self, FramedTransport, LineStream};
use std::collections::HashMap;
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::debug;

/// The greeting prefix a munin node conventionally sends after connecting.
const GREETING_PREFIX: &str = "# munin node at ";

/// A live connection to a munin node.
///
/// The connection owns its transport exclusively and runs exactly one
/// command at a time: every command method takes `&mut self`, sends one
/// line, and fully reads the response inside a response region before
/// returning. A [`MuninError::Protocol`], [`MuninError::Io`], or
/// [`MuninError::Timeout`] leaves the stream position unknown, so the
/// connection must be discarded and re-established afterwards.
#[derive(Debug)]
pub struct Connection<T> {
    transport: T,
    sequencer: Sequencer,
    host: String,
}

/// Connects to a munin node over TCP with default transport timeouts and
/// performs the protocol handshake.
pub async fn connect<A: ToSocketAddrs + Send>(
    addr: A,
) -> Result<Connection<FramedTransport<TcpStream>>, MuninError> {
    connect_with_config(addr, &TransportConfig::default()).await
}

/// Like [`connect`], with caller-supplied transport timeouts.
pub async fn connect_with_config<A: ToSocketAddrs + Send>(
    addr: A,
    config: &TransportConfig,
) -> Result<Connection<FramedTransport<TcpStream>>, MuninError> {
    let transport = transport::connect(addr, config).await?;
    Connection::handshake(transport).await
}

impl<T: LineStream> Connection<T> {
    /// Consumes the node's greeting line from a freshly connected transport
    /// and builds the connection around it.
    ///
    /// The advertised host label is the greeting with the conventional
    /// prefix stripped. The protocol does not guarantee the prefix, so a
    /// greeting without it becomes the label verbatim. Exactly one line is
    /// consumed; there are no retries.
    pub async fn handshake(mut transport: T) -> Result<Self, MuninError> {
        let greeting = match transport.read_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                return Err(MuninError::Handshake(
                    "stream closed before the greeting line".to_string(),
                ));
            }
            Err(e) => {
                return Err(MuninError::Handshake(format!(
                    "could not read the greeting line: {e}"
                )));
            }
        };

        let host = greeting
            .strip_prefix(GREETING_PREFIX)
            .unwrap_or(&greeting)
            .to_string();
        debug!(host = %host, "munin node handshake complete");

        Ok(Self {
            transport,
            sequencer: Sequencer::new(),
            host,
        })
    }

    /// The host label the node advertised in its greeting.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Lists the metrics available on the node itself.
    pub async fn list(&mut self) -> Result<Vec<String>, MuninError> {
        let line = self.single_line_command("list").await?;
        Ok(parse::split_tokens(&line))
    }

    /// Lists the metrics available for a given node. See [`Self::nodes`] for
    /// how to enumerate nodes.
    pub async fn list_node(&mut self, node: &str) -> Result<Vec<String>, MuninError> {
        let line = self.single_line_command(&format!("list {node}")).await?;
        Ok(parse::split_tokens(&line))
    }

    /// Returns the nodes this munin node answers for, one per response line,
    /// in protocol order with duplicates preserved.
    pub async fn nodes(&mut self) -> Result<Vec<String>, MuninError> {
        self.dot_body_command("nodes").await
    }

    /// Returns the node's version string.
    pub async fn version(&mut self) -> Result<String, MuninError> {
        let line = self.single_line_command("version").await?;
        Ok(parse::version_token(&line))
    }

    /// Returns the configuration of a metric as a key/value mapping, or
    /// [`MuninError::MetricNotFound`] if the node does not know the metric.
    pub async fn config(&mut self, metric: &str) -> Result<HashMap<String, String>, MuninError> {
        self.key_value_command("config", metric).await
    }

    /// Returns the current values of a metric as a key/value mapping, or
    /// [`MuninError::MetricNotFound`] if the node does not know the metric.
    pub async fn fetch(&mut self, metric: &str) -> Result<HashMap<String, String>, MuninError> {
        self.key_value_command("fetch", metric).await
    }

    /// Closes the connection by dropping the transport.
    pub fn close(self) {}

    /// Writes one command line and issues its sequence id.
    async fn send(&mut self, command: &str) -> Result<u64, MuninError> {
        self.transport.write_line(command).await?;
        let id = self.sequencer.issue();
        debug!(id, command, "command sent");
        Ok(id)
    }

    /// Runs a command whose response is a single line.
    async fn single_line_command(&mut self, command: &str) -> Result<String, MuninError> {
        let id = self.send(command).await?;
        let _region = self.sequencer.open(id)?;
        framing::read_single_line(&mut self.transport).await
    }

    /// Runs a command whose response is a dot-terminated body.
    async fn dot_body_command(&mut self, command: &str) -> Result<Vec<String>, MuninError> {
        let id = self.send(command).await?;
        let _region = self.sequencer.open(id)?;
        framing::read_dot_body(&mut self.transport).await
    }

    /// Runs a `config`/`fetch` style command: reads the dot body, checks it
    /// for the not-found sentinel, then parses it as key/value lines.
    async fn key_value_command(
        &mut self,
        verb: &str,
        metric: &str,
    ) -> Result<HashMap<String, String>, MuninError> {
        let body = self.dot_body_command(&format!("{verb} {metric}")).await?;
        parse::classify_body(&body)?;
        Ok(parse::parse_key_values(&body))
    }
}
