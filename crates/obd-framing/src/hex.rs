//! Hex Classification and Byte Grouping

/// Check whether a command string is strictly hexadecimal.
///
/// True iff the string is non-empty and every character is an uppercase
/// hex digit (`0-9A-F`). Lowercase digits fail the check: adapter data
/// responses are uppercase, so anything else is treated as a status or
/// informational message rather than sensor data.
pub fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}

/// Split a flat hex string into 2-character byte tokens, left to right.
///
/// An odd-length input yields a final token of length 1. That trailing
/// token is passed through as-is; downstream converters may depend on the
/// exact slice they receive, so it is not padded or dropped.
pub fn byte_groups(s: &str) -> Vec<String> {
    s.as_bytes()
        .chunks(2)
        .map(|pair| String::from_utf8_lossy(pair).into_owned())
        .collect()
}
