// src/core/protocol/line_codec.rs

//! Implements the byte-level line framing of the munin node protocol and the
//! corresponding `Encoder` and `Decoder` for network communication.
//!
//! The protocol is `\n`-delimited ASCII text. Some node implementations send
//! `\r\n`, so a single trailing `\r` is stripped on decode. Dot-terminated
//! body handling lives one layer up, in [`super::framing`].

use crate::core::MuninError;
use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// The line terminator written on the wire.
const LF: u8 = b'\n';

// Protocol-level limit to prevent an endless unterminated line from growing
// the read buffer without bound.
const MAX_LINE_LEN: usize = 1024 * 1024; // 1MB max line length.

/// A `tokio_util::codec` implementation framing the stream into text lines.
///
/// Decoding yields one `String` per wire line, without the terminator.
/// Encoding writes the item followed by a single `\n`.
#[derive(Debug, Default)]
pub struct LineCodec;

impl Encoder<&str> for LineCodec {
    type Error = MuninError;

    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.extend_from_slice(item.as_bytes());
        dst.extend_from_slice(&[LF]);
        Ok(())
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = MuninError;

    /// Decodes one complete line from the buffer, or signals that more data is
    /// needed by returning `Ok(None)`.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(pos) = src.iter().position(|&b| b == LF) else {
            if src.len() > MAX_LINE_LEN {
                return Err(MuninError::Protocol(format!(
                    "line exceeds {MAX_LINE_LEN} bytes without a terminator"
                )));
            }
            return Ok(None);
        };

        if pos > MAX_LINE_LEN {
            return Err(MuninError::Protocol(format!(
                "line exceeds {MAX_LINE_LEN} bytes"
            )));
        }

        let mut line = src.split_to(pos);
        // Consume the terminator itself.
        src.advance(1);

        // Tolerate CRLF-terminated nodes.
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }

        Ok(Some(String::from_utf8_lossy(&line).to_string()))
    }
}
