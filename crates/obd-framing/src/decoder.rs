//! Response Line Decoding
//!
//! Turns one normalized command string into a [`ParseResult`] by
//! classifying it, tokenizing it into byte groups, and dispatching the
//! payload to the registered PID converter.

use crate::elm;
use crate::error::DecodeError;
use crate::hex::{byte_groups, is_hex};
use obd_pids::PidRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

/// Decoded outcome of a single response line
///
/// Always carries the raw line and its byte groups so failures are
/// diagnosable without re-parsing. At most one of `value`/`error` is
/// set; a generic (non-hex) adapter message sets neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Unix timestamp (ms) when the line was decoded
    pub timestamp_ms: u64,
    /// Normalized command string as extracted from the frame
    pub raw: String,
    /// 2-hex-character byte tokens of the raw line
    pub byte_groups: Vec<String>,
    /// Converted sensor value, when decoding succeeded
    pub value: Option<f64>,
    /// Decode failure, when the line was hex but could not be converted
    pub error: Option<DecodeError>,
}

impl ParseResult {
    /// True for adapter status output such as `NO DATA` or `SEARCHING...`
    pub fn is_generic_message(&self) -> bool {
        self.value.is_none() && self.error.is_none()
    }
}

/// Decoder for individual command strings
pub struct ResponseDecoder {
    registry: Arc<PidRegistry>,
}

impl ResponseDecoder {
    /// Create a decoder backed by the given PID registry
    pub fn new(registry: Arc<PidRegistry>) -> Self {
        Self { registry }
    }

    /// Decode one command string into a [`ParseResult`]
    pub fn decode(&self, cmd: &str) -> ParseResult {
        let groups = byte_groups(cmd);
        let timestamp_ms = unix_millis();

        if !is_hex(cmd) {
            trace!(raw = cmd, "generic adapter message");
            return ParseResult {
                timestamp_ms,
                raw: cmd.to_string(),
                byte_groups: groups,
                value: None,
                error: None,
            };
        }

        if groups.first().map(String::as_str) != Some(elm::MODE_CURRENT_DATA) {
            return self.failed(timestamp_ms, cmd, groups.clone(), DecodeError::UnsupportedMode {
                byte_groups: groups,
            });
        }

        let pid = groups.get(1).cloned().unwrap_or_default();
        let Some(descriptor) = self.registry.lookup(&pid) else {
            return self.failed(timestamp_ms, cmd, groups, DecodeError::NoConverter { pid });
        };

        // Payload slice is bounded by the descriptor's declared byte
        // count, clamped to what actually arrived; a short response
        // reaches the converter, which decides how to handle it.
        let payload: Vec<u8> = groups
            .iter()
            .skip(2)
            .take(descriptor.bytes)
            .map(|group| u8::from_str_radix(group, 16).unwrap_or(0))
            .collect();

        match (descriptor.convert)(&payload) {
            Ok(value) => {
                trace!(pid = %pid, value, "decoded sensor value");
                ParseResult {
                    timestamp_ms,
                    raw: cmd.to_string(),
                    byte_groups: groups,
                    value: Some(value),
                    error: None,
                }
            }
            Err(err) => self.failed(timestamp_ms, cmd, groups, err.into()),
        }
    }

    fn failed(
        &self,
        timestamp_ms: u64,
        cmd: &str,
        byte_groups: Vec<String>,
        error: DecodeError,
    ) -> ParseResult {
        trace!(raw = cmd, %error, "line failed to decode");
        ParseResult {
            timestamp_ms,
            raw: cmd.to_string(),
            byte_groups,
            value: None,
            error: Some(error),
        }
    }
}

fn unix_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
