// src/core/protocol/parse.rs

//! Turns raw response lines into the three typed result shapes of the
//! protocol: a token list, a key/value mapping, or a scalar string.

use crate::core::MuninError;
use std::collections::HashMap;

/// The exact one-line body a node sends when the requested service/metric
/// does not exist.
pub const UNKNOWN_SERVICE: &str = "# Unknown service";

/// Splits a single-line response on single spaces into an ordered token list.
pub fn split_tokens(line: &str) -> Vec<String> {
    line.split(' ').map(str::to_string).collect()
}

/// Extracts the version from a `version` response line, which ends in
/// `... version: <version>`. The result is the last space-separated token;
/// a line without spaces is returned whole.
pub fn version_token(line: &str) -> String {
    line.rsplit(' ').next().unwrap_or(line).to_string()
}

/// Parses a dot-terminated body into a key/value mapping.
///
/// Each line is split on the first space into key and value, with surrounding
/// spaces trimmed from both; a line with no space yields the whole line as a
/// key with an empty value. Inner runs of spaces in the value survive
/// verbatim. The node does not guarantee unique keys, so a duplicate key
/// keeps the last occurrence. An empty body is an empty mapping, not an
/// error.
pub fn parse_key_values(body: &[String]) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(body.len());
    for line in body {
        match line.split_once(' ') {
            Some((key, value)) => {
                map.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                map.insert(line.trim().to_string(), String::new());
            }
        }
    }
    map
}

/// Checks a `config`/`fetch` body for the not-found sentinel before it is
/// handed to [`parse_key_values`]. The sentinel line would otherwise parse as
/// an ordinary key/value line, which is why this check must come first.
pub fn classify_body(body: &[String]) -> Result<(), MuninError> {
    if body.len() == 1 && body[0] == UNKNOWN_SERVICE {
        return Err(MuninError::MetricNotFound);
    }
    Ok(())
}
