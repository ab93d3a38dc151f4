//! Incremental Stream Accumulation
//!
//! The accumulator is the stateful top of the pipeline: transport chunks
//! of arbitrary size are appended to an owned buffer until the adapter's
//! `>` prompt arrives, at which point the buffered frame is split,
//! decoded, and the buffer cleared in one step. Framing is therefore
//! invariant under chunk boundaries: any partition of the same bytes
//! across `feed` calls yields the same results.

use crate::decoder::{ParseResult, ResponseDecoder};
use crate::elm;
use crate::frame::split_frame;
use obd_pids::PidRegistry;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Outcome of a single [`StreamAccumulator::feed`] call
#[derive(Debug, Clone, Default)]
pub struct FeedOutcome {
    /// True when this chunk completed a frame (the prompt was seen)
    pub frame_complete: bool,
    /// Results decoded from the completed frame, in arrival order
    pub results: Vec<ParseResult>,
}

/// Stateful reassembler for the half-duplex adapter stream
///
/// Each adapter connection gets its own accumulator; there is no shared
/// state between instances. Callers must serialize `feed` calls — the
/// buffer is mutable state with no internal locking (funnel chunks
/// through a single task, as [`run_session`](crate::run_session) does).
pub struct StreamAccumulator {
    buffer: String,
    decoder: ResponseDecoder,
    ready_tx: Option<mpsc::UnboundedSender<()>>,
}

impl StreamAccumulator {
    /// Create an accumulator backed by the given PID registry
    pub fn new(registry: Arc<PidRegistry>) -> Self {
        Self {
            buffer: String::new(),
            decoder: ResponseDecoder::new(registry),
            ready_tx: None,
        }
    }

    /// Install a ready signal, sent once per completed frame.
    ///
    /// The signal tells the writer side of the half-duplex link it may
    /// send the next command. It is advisory: a dropped receiver is
    /// ignored, and the accumulator never enforces request/response
    /// alternation itself.
    pub fn ready_signal(&mut self, tx: mpsc::UnboundedSender<()>) {
        self.ready_tx = Some(tx);
    }

    /// Consume one transport chunk.
    ///
    /// Absence of the prompt is not an error: the chunk is retained and
    /// an empty outcome returned. When the prompt is present the whole
    /// buffer is processed as one frame and cleared. A single call may
    /// yield zero, one, or many results.
    pub fn feed(&mut self, chunk: &[u8]) -> FeedOutcome {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        if !self.buffer.contains(elm::PROMPT) {
            return FeedOutcome::default();
        }

        if let Some(tx) = &self.ready_tx {
            let _ = tx.send(());
        }

        let lines = split_frame(&self.buffer);
        debug!(lines = lines.len(), buffered = self.buffer.len(), "frame complete");

        let results = lines.iter().map(|line| self.decoder.decode(line)).collect();
        self.buffer.clear();

        FeedOutcome {
            frame_complete: true,
            results,
        }
    }

    /// Discard any buffered, never-completed frame
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Unconsumed buffered text (bytes not yet attributed to a frame)
    pub fn pending(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn accumulator() -> StreamAccumulator {
        StreamAccumulator::new(Arc::new(PidRegistry::standard()))
    }

    fn feed_all(acc: &mut StreamAccumulator, chunks: &[&str]) -> Vec<ParseResult> {
        chunks
            .iter()
            .flat_map(|chunk| acc.feed(chunk.as_bytes()).results)
            .collect()
    }

    #[test]
    fn test_partial_chunk_is_retained() {
        let mut acc = accumulator();
        let outcome = acc.feed(b"410C1B");
        assert!(!outcome.frame_complete);
        assert!(outcome.results.is_empty());
        assert_eq!(acc.pending(), "410C1B");
    }

    #[test]
    fn test_buffer_cleared_after_frame() {
        let mut acc = accumulator();
        let outcome = acc.feed(b"410C1B56\r\r>");
        assert!(outcome.frame_complete);
        assert_eq!(outcome.results.len(), 1);
        assert!(acc.pending().is_empty());
    }

    #[test]
    fn test_split_across_two_feeds() {
        let mut acc = accumulator();
        assert!(!acc.feed(b"41").frame_complete);

        let outcome = acc.feed(b"0C1B56\r\r>");
        assert!(outcome.frame_complete);

        let result = &outcome.results[0];
        assert_eq!(result.raw, "410C1B56");
        assert_eq!(result.byte_groups, vec!["41", "0C", "1B", "56"]);
        assert!((result.value.unwrap() - 1749.5).abs() < 0.01);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_multiple_lines_in_one_frame() {
        let mut acc = accumulator();
        let outcome = acc.feed(b"410C1B56\r41057E\r\r>");
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].raw, "410C1B56");
        assert_eq!(outcome.results[1].raw, "41057E");
        // Coolant: 0x7E - 40 = 86
        assert!((outcome.results[1].value.unwrap() - 86.0).abs() < 0.01);
    }

    #[test]
    fn test_generic_message_frame() {
        let mut acc = accumulator();
        let outcome = acc.feed(b"NODATA>");
        let result = &outcome.results[0];
        assert_eq!(result.raw, "NODATA");
        assert!(result.value.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_unsupported_mode_frame() {
        let mut acc = accumulator();
        let outcome = acc.feed(b"5512AB\r\r>");
        let result = &outcome.results[0];
        assert!(result.value.is_none());
        assert!(matches!(
            result.error,
            Some(crate::DecodeError::UnsupportedMode { .. })
        ));
    }

    #[test]
    fn test_ready_signal_once_per_frame() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut acc = accumulator();
        acc.ready_signal(tx);

        acc.feed(b"410C1B");
        assert!(rx.try_recv().is_err());

        acc.feed(b"56\r\r>");
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_ready_signal_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut acc = accumulator();
        acc.ready_signal(tx);
        // A closed receiver never fails the feed
        let outcome = acc.feed(b"410D55\r\r>");
        assert!(outcome.frame_complete);
    }

    #[test]
    fn test_reset_discards_partial_frame() {
        let mut acc = accumulator();
        acc.feed(b"410C1B");
        acc.reset();
        assert!(acc.pending().is_empty());

        // Subsequent frames decode from a clean slate
        let outcome = acc.feed(b"410D55\r\r>");
        assert_eq!(outcome.results[0].raw, "410D55");
    }

    #[test]
    fn test_consecutive_frames() {
        let mut acc = accumulator();
        let first = acc.feed(b"410C1B56\r\r>");
        let second = acc.feed(b"410D55\r\r>");
        assert_eq!(first.results[0].raw, "410C1B56");
        assert_eq!(second.results[0].raw, "410D55");
    }

    proptest! {
        // Any partition of the same response bytes across feed calls
        // produces the same result sequence.
        #[test]
        fn prop_chunk_boundary_invariance(split in 1usize..11) {
            let response = "410C1B56\r\r>";
            let (head, tail) = response.split_at(split);

            let mut whole = accumulator();
            let expected = feed_all(&mut whole, &[response]);

            let mut parts = accumulator();
            let actual = feed_all(&mut parts, &[head, tail]);

            prop_assert_eq!(expected.len(), actual.len());
            for (a, b) in expected.iter().zip(actual.iter()) {
                prop_assert_eq!(&a.raw, &b.raw);
                prop_assert_eq!(&a.byte_groups, &b.byte_groups);
                prop_assert_eq!(a.value, b.value);
                prop_assert_eq!(&a.error, &b.error);
            }
        }

        #[test]
        fn prop_multi_line_invariance(cuts in proptest::collection::vec(1usize..19, 0..4)) {
            let response = "410C1B56\r41057E\r\r>";

            let mut offsets: Vec<usize> = cuts;
            offsets.sort_unstable();
            offsets.dedup();

            let mut chunks = Vec::new();
            let mut start = 0;
            for &cut in &offsets {
                chunks.push(&response[start..cut]);
                start = cut;
            }
            chunks.push(&response[start..]);

            let mut whole = accumulator();
            let expected = feed_all(&mut whole, &[response]);

            let mut parts = accumulator();
            let actual = feed_all(&mut parts, &chunks);

            prop_assert_eq!(expected.len(), actual.len());
            for (a, b) in expected.iter().zip(actual.iter()) {
                prop_assert_eq!(&a.raw, &b.raw);
                prop_assert_eq!(a.value, b.value);
            }
        }
    }
}
