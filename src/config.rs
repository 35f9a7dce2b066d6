// src/config.rs

//! Client configuration: transport-level timeouts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeouts applied at the transport layer. The protocol core itself defines
/// no deadlines; callers needing different limits set them here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Maximum time to wait for the TCP connection to be established.
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Maximum time to wait for a single response line.
    #[serde(default = "default_read_timeout", with = "humantime_serde")]
    pub read_timeout: Duration,
    /// Maximum time to wait for a command line to be written out.
    #[serde(default = "default_write_timeout", with = "humantime_serde")]
    pub write_timeout: Duration,
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(2)
}

fn default_read_timeout() -> Duration {
    Duration::from_secs(3)
}

fn default_write_timeout() -> Duration {
    Duration::from_secs(2)
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            read_timeout: default_read_timeout(),
            write_timeout: default_write_timeout(),
        }
    }
}
