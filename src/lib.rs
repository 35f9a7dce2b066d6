// src/lib.rs

pub mod client;
pub mod config;
pub mod core;
pub mod transport;

// Re-export
pub use crate::client::{Connection, connect, connect_with_config};
pub use crate::core::MuninError;
