//! Decode Error Types

use obd_pids::ConvertError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors attached to a [`ParseResult`](crate::ParseResult).
///
/// These never abort the stream: a failed line still produces a result,
/// and later lines and frames decode normally.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum DecodeError {
    /// Response-mode marker not recognized (only Mode 01 replies are supported)
    #[error("unsupported response mode in {byte_groups:?}")]
    UnsupportedMode { byte_groups: Vec<String> },

    /// Mode recognized but no descriptor registered for the PID code
    #[error("no converter registered for PID {pid}")]
    NoConverter { pid: String },

    /// Descriptor found but its converter rejected the payload bytes
    #[error("conversion failed: {0}")]
    ConversionFailed(#[from] ConvertError),
}
