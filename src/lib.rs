//! Melody compiler and playback sequencer for MML-style alert tunes.
//!
//! Tunes provide audible notification and warnings (system armed,
//! position lock, battery low, and so on). This crate turns a tune
//! request, either a predefined tune id or an inline melody string such
//! as `"MFT200e8a8a"`, into a time-ordered stream of tune control events
//! and drives their paced emission to a tone sink. Rendering the tones is
//! the sink consumer's job.

pub mod control;
pub mod error;
pub mod library;
pub mod melody;
pub mod playback;
pub mod request;

pub use control::{
    NoteEvent, TuneControl, FREQUENCY_LIMIT_HZ, MAX_NOTE_ITERATION, MAX_UPDATE_INTERVAL,
    STRENGTH_NORMAL, TUNE_CONTROL_QUEUE_DEPTH,
};
pub use error::TuneError;
pub use library::{Tune, TuneLibrary};
pub use melody::{maximum_update_interval, MelodyDecoder, MELODY_MARKER};
pub use playback::{ChannelSink, PlaybackOutcome, PlaybackSequencer, ToneSink};
pub use request::{clamp_strength, TuneRequest, TuneSource};

/// Compile a melody string into a lazy event decoder at the default
/// strength. This is the main entry point for the library.
pub fn compile(source: &str) -> Result<MelodyDecoder, TuneError> {
    MelodyDecoder::new(source, STRENGTH_NORMAL)
}

/// Compile a melody string at a caller-supplied strength; out-of-range
/// strengths fall back to the default.
pub fn compile_with_strength(source: &str, strength: u8) -> Result<MelodyDecoder, TuneError> {
    MelodyDecoder::new(source, clamp_strength(strength))
}
