// src/core/mod.rs

//! The central module containing the protocol engine of munin-client.

pub mod errors;
pub mod protocol;

pub use errors::MuninError;
