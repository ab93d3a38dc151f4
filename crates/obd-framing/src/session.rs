//! Channel Session Adapter
//!
//! Bridges a transport that delivers chunks over a channel to the
//! accumulator, guaranteeing the single-writer access the accumulator
//! requires by funneling every chunk through one task.

use crate::accumulator::StreamAccumulator;
use crate::decoder::ParseResult;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Drive an accumulator from a chunk channel until the transport closes.
///
/// Results are forwarded in decode order. Returns the number of frames
/// completed. When the chunk channel closes, any partially buffered
/// frame is discarded without error; when the result receiver is
/// dropped, the session ends early.
pub async fn run_session(
    mut accumulator: StreamAccumulator,
    mut chunk_rx: mpsc::Receiver<Vec<u8>>,
    result_tx: mpsc::Sender<ParseResult>,
) -> usize {
    info!("stream session started");
    let mut frames = 0usize;

    while let Some(chunk) = chunk_rx.recv().await {
        let outcome = accumulator.feed(&chunk);
        if outcome.frame_complete {
            frames += 1;
        }

        for result in outcome.results {
            if result_tx.send(result).await.is_err() {
                debug!("result receiver dropped, ending session");
                info!(frames, "stream session ended");
                return frames;
            }
        }
    }

    if !accumulator.pending().is_empty() {
        debug!(
            discarded = accumulator.pending().len(),
            "transport closed mid-frame"
        );
    }

    info!(frames, "stream session ended");
    frames
}
