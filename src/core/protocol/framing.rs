// src/core/protocol/framing.rs

//! Response framing on top of a [`LineStream`]: single-line responses and
//! multi-line dot-terminated bodies with terminator unstuffing.
//!
//! Getting this layer wrong corrupts every subsequent exchange on the same
//! connection, so unterminated bodies fail loudly instead of returning
//! partial data.

use crate::core::MuninError;
use crate::transport::LineStream;

/// A line consisting of exactly this string ends a multi-line body.
pub const BODY_TERMINATOR: &str = ".";

/// A body line starting with this escape carries a literal leading dot.
const STUFFED_PREFIX: &str = "..";

/// Reads exactly one response line. A closed stream at this position is a
/// protocol violation: the command was sent but no response arrived.
pub async fn read_single_line<T: LineStream + ?Sized>(
    transport: &mut T,
) -> Result<String, MuninError> {
    match transport.read_line().await? {
        Some(line) => Ok(line),
        None => Err(MuninError::Protocol(
            "stream closed before the response line".to_string(),
        )),
    }
}

/// Reads a dot-terminated body. The terminator line is consumed but not
/// included in the result; stuffed lines are unescaped before being appended.
/// Fails with a protocol error if the stream ends before the terminator line.
pub async fn read_dot_body<T: LineStream + ?Sized>(
    transport: &mut T,
) -> Result<Vec<String>, MuninError> {
    let mut body = Vec::new();
    loop {
        let Some(line) = transport.read_line().await? else {
            return Err(MuninError::Protocol(format!(
                "stream closed after {} body line(s), before the terminator",
                body.len()
            )));
        };
        if line == BODY_TERMINATOR {
            return Ok(body);
        }
        body.push(unstuff(line));
    }
}

/// Removes the leading duplicate terminator from a stuffed body line; all
/// other lines pass through verbatim.
fn unstuff(line: String) -> String {
    match line.strip_prefix(STUFFED_PREFIX) {
        Some(rest) => format!("{BODY_TERMINATOR}{rest}"),
        None => line,
    }
}
