//! Tone sinks: where control events go.
//!
//! The sequencer publishes through the [`ToneSink`] trait and never
//! learns where events end up. Publishing is infallible by contract; a
//! sink that cannot accept an event drops it and moves on.

use crate::control::{TuneControl, TUNE_CONTROL_QUEUE_DEPTH};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::warn;

/// External capability that accepts control events for rendering.
pub trait ToneSink {
    fn publish(&mut self, event: TuneControl);
}

/// Channel-backed sink with the queue depth the tune-control protocol
/// requires: three slots, so a tune, stop, tune triplet issued
/// back-to-back is buffered without loss.
///
/// Created pairwise with the consumer's receiver:
///
/// ```
/// use tunes::playback::ChannelSink;
///
/// let (sink, events) = ChannelSink::bounded();
/// # let _ = (sink, events);
/// ```
pub struct ChannelSink {
    tx: Sender<TuneControl>,
}

impl ChannelSink {
    /// A sink/receiver pair over a queue of depth
    /// [`TUNE_CONTROL_QUEUE_DEPTH`].
    pub fn bounded() -> (Self, Receiver<TuneControl>) {
        let (tx, rx) = bounded(TUNE_CONTROL_QUEUE_DEPTH);
        (Self { tx }, rx)
    }
}

impl ToneSink for ChannelSink {
    fn publish(&mut self, event: TuneControl) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(tune_id = event.tune_id, "tune control queue full, dropping event");
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!("tune control consumer gone, dropping event");
            }
        }
    }
}

/// Recording sink for tests and diagnostics.
impl ToneSink for Vec<TuneControl> {
    fn publish(&mut self, event: TuneControl) {
        self.push(event);
    }
}
