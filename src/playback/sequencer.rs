//! Timed emission of compiled melodies to a tone sink.

use crate::control::{
    event_period, NoteEvent, TuneControl, MAX_NOTE_ITERATION, MAX_UPDATE_INTERVAL,
};
use crate::error::TuneError;
use crate::library::TuneLibrary;
use crate::melody::MelodyDecoder;
use crate::request::{TuneRequest, TuneSource};
use std::thread;
use std::time::Instant;
use tracing::info;

/// How a playback call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The melody ran to the end of its event sequence.
    Exhausted { notes_published: usize },
    /// Playback was truncated at the iteration bound. Not an error;
    /// repeating and runaway melodies are expected to end this way.
    Bounded { notes_published: usize },
}

impl PlaybackOutcome {
    pub fn notes_published(&self) -> usize {
        match *self {
            PlaybackOutcome::Exhausted { notes_published }
            | PlaybackOutcome::Bounded { notes_published } => notes_published,
        }
    }
}

/// Drives timed emission of tune control events to a caller-supplied
/// sink.
///
/// Playback is synchronous: `play_melody` publishes one event, then
/// blocks the calling thread for that event's sounding time plus trailing
/// silence before advancing. One melody drains to completion (or
/// truncation) before the caller regains control; a `stop` that needs to
/// preempt an in-flight melody must come from a separate sequencer over
/// the same sink.
pub struct PlaybackSequencer<S> {
    sink: S,
    note_limit: usize,
    epoch: Instant,
}

impl<S: super::ToneSink> PlaybackSequencer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            note_limit: MAX_NOTE_ITERATION,
            epoch: Instant::now(),
        }
    }

    /// Override the iteration bound. The default is
    /// [`MAX_NOTE_ITERATION`]; raising it widens the window a malformed
    /// melody can block the caller for.
    pub fn with_note_limit(mut self, note_limit: usize) -> Self {
        self.note_limit = note_limit;
        self
    }

    pub fn note_limit(&self) -> usize {
        self.note_limit
    }

    /// Dispatch a validated request over the appropriate protocol:
    /// predefined ids are published compact, melodies are expanded here
    /// and streamed.
    pub fn play_request(
        &mut self,
        request: &TuneRequest,
        library: &TuneLibrary,
    ) -> Result<PlaybackOutcome, TuneError> {
        match &request.source {
            TuneSource::Predefined(id) => {
                self.play_single(*id, request.strength, library)?;
                Ok(PlaybackOutcome::Exhausted { notes_published: 1 })
            }
            TuneSource::Notation(text) => {
                let melody = MelodyDecoder::new(text, request.strength)?;
                Ok(self.play_melody(melody))
            }
        }
    }

    /// Publish an expanded melody one event at a time, pacing each event
    /// by its own duration, until the melody is exhausted or the
    /// iteration bound is reached.
    pub fn play_melody(&mut self, melody: impl Iterator<Item = NoteEvent>) -> PlaybackOutcome {
        info!("starting melody playback");
        let mut notes_published = 0;

        for note in melody {
            self.publish(TuneControl::note(&note));
            thread::sleep(event_period(&note));
            notes_published += 1;

            if notes_published >= self.note_limit {
                info!(notes_published, "iteration bound reached, truncating playback");
                return PlaybackOutcome::Bounded { notes_published };
            }
        }

        info!(notes_published, "playback finished");
        PlaybackOutcome::Exhausted { notes_published }
    }

    /// Publish exactly one compact event carrying a predefined tune id
    /// and return immediately; the consumer expands the tune itself.
    pub fn play_single(
        &mut self,
        tune_id: usize,
        strength: u8,
        library: &TuneLibrary,
    ) -> Result<(), TuneError> {
        library.get(tune_id)?;
        info!(tune_id, "publishing predefined tune");
        self.publish(TuneControl::predefined(tune_id as u8, strength));
        Ok(())
    }

    /// Publish a single raw tone. Accepts frequencies in `1..22000` Hz;
    /// zero is reserved for the stop override.
    pub fn play_tone(
        &mut self,
        frequency: u16,
        duration_us: u32,
        strength: u8,
    ) -> Result<(), TuneError> {
        if frequency == 0 || frequency >= crate::control::FREQUENCY_LIMIT_HZ {
            return Err(TuneError::OutOfRangeFrequency(frequency));
        }

        self.publish(TuneControl::note(&NoteEvent {
            frequency,
            duration_us,
            silence_us: 0,
            strength,
        }));
        Ok(())
    }

    /// Publish one zeroed override event cancelling any pending playback,
    /// then block for the maximum update interval so a previously queued
    /// event cannot shadow the stop inside the sink's queue.
    pub fn stop(&mut self) {
        info!("stopping playback");
        self.publish(TuneControl::stop_override());
        thread::sleep(MAX_UPDATE_INTERVAL);
    }

    /// Consume the sequencer, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn publish(&mut self, mut event: TuneControl) {
        event.timestamp_us = self.epoch.elapsed().as_micros() as u64;
        self.sink.publish(event);
    }
}
