//! OBD-II Response Stream Framing
//!
//! This crate reassembles the half-duplex text stream produced by an
//! ELM327-style OBD-II adapter into complete responses and decodes each
//! response line into a structured sensor reading. Transport chunks may
//! arrive fragmented at arbitrary boundaries; the accumulator retains
//! partial data until the adapter's `>` prompt marks a response complete.

mod accumulator;
mod decoder;
mod error;
mod frame;
mod hex;
mod session;

pub use accumulator::{FeedOutcome, StreamAccumulator};
pub use decoder::{ParseResult, ResponseDecoder};
pub use error::DecodeError;
pub use frame::split_frame;
pub use hex::{byte_groups, is_hex};
pub use session::run_session;

/// ELM327 line-protocol constants
pub mod elm {
    /// Prompt character the adapter appends after a complete response
    pub const PROMPT: char = '>';
    /// Response-mode marker for Mode 01 (current data) replies
    pub const MODE_CURRENT_DATA: &str = "41";
    /// Literal two-character escape some transports emit for a carriage return
    pub const ESCAPED_CR: &str = "\\r";
}
