//! # Playback Module
//!
//! Timed emission of compiled tune events to a tone sink.
//!
//! ## Sub-modules
//! - `sequencer` - Paced, bounded event emission and the stop override
//! - `sink` - The publish capability ([`ToneSink`]) and the depth-3
//!   channel sink consumers hang off of
//!
//! ## Two playback protocols
//! Predefined tunes are published as a single compact event carrying the
//! `tune_id`; the consumer expands the tune itself. Inline melodies are
//! expanded on this side and streamed as raw tone parameters with
//! `tune_id` 0. The asymmetry is part of the wire contract, not an
//! implementation detail: a sink must be prepared to expand ids.
//!
//! ## Entry Point
//! [`PlaybackSequencer`] - construct over any [`ToneSink`], then
//! `play_request` / `play_melody` / `play_single` / `play_tone` / `stop`.

mod sequencer;
mod sink;


pub use sequencer::{PlaybackOutcome, PlaybackSequencer};
pub use sink::{ChannelSink, ToneSink};
