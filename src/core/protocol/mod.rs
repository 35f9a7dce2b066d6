// src/core/protocol/mod.rs

pub mod framing;
pub mod line_codec;
pub mod parse;

pub use framing::BODY_TERMINATOR;
pub use line_codec::LineCodec;
pub use parse::UNKNOWN_SERVICE;
