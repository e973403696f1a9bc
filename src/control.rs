//! Tune control events and protocol constants.
//!
//! A [`TuneControl`] is the wire message a playback sequencer hands to its
//! sink. Two protocols share the message: predefined tunes travel as a
//! compact `tune_id` that the consumer expands itself, while melody-string
//! playback is expanded on the producer side and streams raw tone
//! parameters with `tune_id` 0. A zeroed message with `tune_override` set
//! cancels whatever the consumer is currently playing.

use serde::Serialize;
use std::time::Duration;

/// Hard cap on events emitted per playback call.
///
/// Melody strings are typo- and attacker-controlled input; without a bound
/// a repeating or very long tune would block the caller indefinitely.
/// Exceeding the cap truncates playback silently.
pub const MAX_NOTE_ITERATION: usize = 50;

/// Queue depth the sink must provide. Three slots, so that a
/// tune, stop, tune triplet issued back-to-back fits without loss.
pub const TUNE_CONTROL_QUEUE_DEPTH: usize = 3;

/// Minimum spacing between successive control messages that guarantees the
/// consumer observes each one. `stop` blocks for this long after
/// publishing so the override cannot be shadowed by a queued event.
pub const MAX_UPDATE_INTERVAL: Duration = Duration::from_millis(100);

/// Volume applied when the caller supplies none, or an out-of-range one.
pub const STRENGTH_NORMAL: u8 = 40;

/// Exclusive upper bound on tone frequencies, in Hz.
pub const FREQUENCY_LIMIT_HZ: u16 = 22_000;

/// One decoded playable unit of a melody.
///
/// # Fields
/// - `frequency`: tone pitch in Hz; 0 means a rest
/// - `duration_us`: sounding time in microseconds
/// - `silence_us`: trailing gap before the next event, in microseconds
/// - `strength`: volume, 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub frequency: u16,
    pub duration_us: u32,
    pub silence_us: u32,
    pub strength: u8,
}

impl NoteEvent {
    /// A rest: no tone for `duration_us`.
    pub fn rest(duration_us: u32, strength: u8) -> Self {
        Self {
            frequency: 0,
            duration_us,
            silence_us: 0,
            strength,
        }
    }

    /// True if this event sounds no tone.
    pub fn is_rest(&self) -> bool {
        self.frequency == 0
    }
}

/// Wire message published to a tone sink.
///
/// `timestamp_us` is stamped by the sequencer at publish time, as
/// microseconds elapsed since the sequencer was created.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TuneControl {
    pub timestamp_us: u64,
    pub tune_id: u8,
    pub tune_override: bool,
    pub frequency: u16,
    pub duration_us: u32,
    pub silence_us: u32,
    pub strength: u8,
}

impl TuneControl {
    /// Expanded-melody protocol: one raw tone (or rest), `tune_id` 0.
    pub fn note(event: &NoteEvent) -> Self {
        Self {
            timestamp_us: 0,
            tune_id: 0,
            tune_override: false,
            frequency: event.frequency,
            duration_us: event.duration_us,
            silence_us: event.silence_us,
            strength: event.strength,
        }
    }

    /// Compact protocol: the consumer expands `tune_id` itself.
    pub fn predefined(tune_id: u8, strength: u8) -> Self {
        Self {
            timestamp_us: 0,
            tune_id,
            tune_override: false,
            frequency: 0,
            duration_us: 0,
            silence_us: 0,
            strength,
        }
    }

    /// Stop override: all numeric fields zeroed, `tune_override` set.
    pub fn stop_override() -> Self {
        Self {
            timestamp_us: 0,
            tune_id: 0,
            tune_override: true,
            frequency: 0,
            duration_us: 0,
            silence_us: 0,
            strength: 0,
        }
    }
}

/// Total wall-clock time an event occupies during paced playback.
pub fn event_period(event: &NoteEvent) -> Duration {
    Duration::from_micros(u64::from(event.duration_us) + u64::from(event.silence_us))
}
