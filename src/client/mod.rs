// src/client/mod.rs

//! Manages the lifecycle of a single connection to a munin node: handshake,
//! command sequencing, and the typed command surface.

// Declare the sub-modules of the `client` module.
mod connection;
pub mod sequencer;

// Publicly re-export the primary types from the sub-modules.
pub use connection::{Connection, connect, connect_with_config};
pub use sequencer::{ResponseRegion, Sequencer};
