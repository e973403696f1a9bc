//! Melody string decoder.
//!
//! Decodes compact MML-style melody strings (`"MFT200e8a8a"`) into
//! [`NoteEvent`]s, one per call to `next()`, so a caller can drive
//! playback without materializing long tunes.
//!
//! A melody string must begin with `'M'`. After that the decoder is a
//! plain character scanner: whitespace is skipped, letters are
//! case-insensitive. `T`/`O`/`L`/`<`/`>`/`M?` tokens update decoder state
//! and produce no event; `A`-`G`, `N` and `P` produce one event each.
//! Decoding is best-effort: a token the decoder does not understand is
//! decoded as a rest of one default note length rather than aborting the
//! tune mid-stream. Out-of-range tempo values and zero lengths are
//! ignored.
//!
//! Strings carrying the `MB` (repeat) token rewind on exhaustion and
//! decode forever; termination for those is owned by the playback
//! iteration bound.

use crate::control::{NoteEvent, MAX_UPDATE_INTERVAL};
use crate::error::TuneError;
use std::time::Duration;
use tracing::debug;

/// Melody marker every valid string must begin with.
pub const MELODY_MARKER: char = 'M';

const TEMPO_DEFAULT: u32 = 120;
const TEMPO_MIN: u32 = 32;
const TEMPO_MAX: u32 = 255;
const OCTAVE_DEFAULT: u32 = 4;
const OCTAVE_MAX: u32 = 6;
const NOTE_LENGTH_DEFAULT: u32 = 4;
const NOTE_MIN: u32 = 1;
const NOTE_MAX: u32 = 84;

// A whole note is four beats; tempo is beats per minute.
const WHOLE_NOTE_US: u32 = 60 * 1_000_000 * 4;

/// Semitone offsets of note letters A-G within an octave.
const SEMITONE_TABLE: [u32; 7] = [9, 11, 0, 2, 4, 5, 7];

/// Articulation mode, selected with `MN`/`ML`/`MS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoteMode {
    /// An eighth of each note period is trailing silence.
    Normal,
    /// No trailing silence.
    Legato,
    /// A quarter of each note period is trailing silence.
    Staccato,
}

/// Lazy decoder over one melody string.
///
/// Implements `Iterator<Item = NoteEvent>`; construction validates the
/// leading marker, after which decoding never fails.
#[derive(Debug, Clone)]
pub struct MelodyDecoder {
    source: Vec<u8>,
    cursor: usize,
    tempo: u32,
    octave: u32,
    note_length: u32,
    mode: NoteMode,
    repeat: bool,
    strength: u8,
}

impl MelodyDecoder {
    /// Create a decoder over `source`, emitting events at `strength`.
    ///
    /// Fails with [`TuneError::InvalidNotation`] unless the string begins
    /// with `'M'`. The caller is expected to have normalized `strength`
    /// already (see [`crate::request::clamp_strength`]).
    pub fn new(source: &str, strength: u8) -> Result<Self, TuneError> {
        if !source.starts_with(MELODY_MARKER) {
            return Err(TuneError::InvalidNotation);
        }

        Ok(Self {
            source: source.as_bytes().to_vec(),
            cursor: 0,
            tempo: TEMPO_DEFAULT,
            octave: OCTAVE_DEFAULT,
            note_length: NOTE_LENGTH_DEFAULT,
            mode: NoteMode::Normal,
            repeat: false,
            strength,
        })
    }

    /// True if the string carries `MB` and will rewind on exhaustion.
    pub fn is_repeating(&self) -> bool {
        self.repeat
    }

    fn skip_whitespace(&mut self) {
        while self
            .source
            .get(self.cursor)
            .is_some_and(|c| c.is_ascii_whitespace())
        {
            self.cursor += 1;
        }
    }

    fn next_char(&mut self) -> Option<u8> {
        self.skip_whitespace();
        let c = *self.source.get(self.cursor)?;
        self.cursor += 1;
        Some(c.to_ascii_uppercase())
    }

    fn peek_char(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.source.get(self.cursor).map(|c| c.to_ascii_uppercase())
    }

    /// Consume a run of digits; 0 when none follow.
    fn next_number(&mut self) -> u32 {
        let mut number = 0u32;
        while let Some(c) = self.peek_char() {
            if !c.is_ascii_digit() {
                break;
            }
            self.cursor += 1;
            number = number
                .saturating_mul(10)
                .saturating_add(u32::from(c - b'0'));
        }
        number
    }

    /// Consume trailing dots, each extending a note by a halving amount.
    fn next_dots(&mut self) -> u32 {
        let mut dots = 0;
        while self.peek_char() == Some(b'.') {
            self.cursor += 1;
            dots += 1;
        }
        dots
    }

    /// Sounding duration and trailing silence for one note, in µs.
    fn note_duration(&self, note_length: u32, dots: u32) -> (u32, u32) {
        let whole_note_period = WHOLE_NOTE_US / self.tempo;
        let note_length = note_length.max(1);
        let note_period = whole_note_period / note_length;

        let silence = match self.mode {
            NoteMode::Normal => note_period / 8,
            NoteMode::Staccato => note_period / 4,
            NoteMode::Legato => 0,
        };

        let mut duration = note_period - silence;
        let mut dot_extension = duration / 2;

        for _ in 0..dots {
            duration += dot_extension;
            dot_extension /= 2;
        }

        (duration, silence)
    }

    /// Duration of a rest, in µs. Rests take the whole period.
    fn rest_duration(&self, rest_length: u32, dots: u32) -> u32 {
        let whole_note_period = WHOLE_NOTE_US / self.tempo;
        let rest_length = rest_length.max(1);

        let mut duration = whole_note_period / rest_length;
        let mut dot_extension = duration / 2;

        for _ in 0..dots {
            duration += dot_extension;
            dot_extension /= 2;
        }

        duration
    }

    /// Recovery policy for tokens the decoder cannot interpret: a rest of
    /// one default note length, never a mid-stream error.
    fn recovery_rest(&self) -> NoteEvent {
        NoteEvent::rest(self.rest_duration(self.note_length, 0), self.strength)
    }

    fn tone(&self, note: u32, note_length: u32, dots: u32) -> NoteEvent {
        let (duration_us, silence_us) = self.note_duration(note_length, dots);
        NoteEvent {
            frequency: note_to_frequency(note),
            duration_us,
            silence_us,
            strength: self.strength,
        }
    }

    /// Restart decoding from the beginning of the string with default
    /// state. The repeat flag survives; the string re-asserts it anyway.
    fn rewind(&mut self) {
        self.cursor = 0;
        self.tempo = TEMPO_DEFAULT;
        self.octave = OCTAVE_DEFAULT;
        self.note_length = NOTE_LENGTH_DEFAULT;
        self.mode = NoteMode::Normal;
    }
}

impl Iterator for MelodyDecoder {
    type Item = NoteEvent;

    fn next(&mut self) -> Option<NoteEvent> {
        // At most one rewind per call: a repeating string that produces no
        // event in a full pass is exhausted, not an infinite loop.
        let mut rewound = false;

        loop {
            let Some(c) = self.next_char() else {
                if self.repeat && !rewound {
                    rewound = true;
                    self.rewind();
                    continue;
                }
                return None;
            };

            match c {
                b'L' => {
                    let length = self.next_number();
                    if length > 0 {
                        self.note_length = length;
                    } else {
                        debug!("ignoring zero note length");
                    }
                }
                b'O' => {
                    self.octave = self.next_number().min(OCTAVE_MAX);
                }
                b'<' => {
                    self.octave = self.octave.saturating_sub(1);
                }
                b'>' => {
                    if self.octave < OCTAVE_MAX {
                        self.octave += 1;
                    }
                }
                b'T' => {
                    let tempo = self.next_number();
                    if (TEMPO_MIN..=TEMPO_MAX).contains(&tempo) {
                        self.tempo = tempo;
                    } else {
                        debug!(tempo, "ignoring out-of-range tempo");
                    }
                }
                b'M' => match self.next_char() {
                    Some(b'N') => self.mode = NoteMode::Normal,
                    Some(b'L') => self.mode = NoteMode::Legato,
                    Some(b'S') => self.mode = NoteMode::Staccato,
                    Some(b'F') => self.repeat = false,
                    Some(b'B') => self.repeat = true,
                    other => {
                        debug!(?other, "unrecognized mode token, decoding as a rest");
                        return Some(self.recovery_rest());
                    }
                },
                b'P' => {
                    let length = self.next_number();
                    let dots = self.next_dots();
                    return Some(NoteEvent::rest(
                        self.rest_duration(length, dots),
                        self.strength,
                    ));
                }
                b'N' => {
                    let note = self.next_number();
                    let dots = self.next_dots();

                    if note == 0 {
                        // N0 is an explicit rest of one note length.
                        return Some(NoteEvent::rest(
                            self.rest_duration(self.note_length, dots),
                            self.strength,
                        ));
                    }

                    if note > NOTE_MAX {
                        debug!(note, "note number out of range, decoding as a rest");
                        return Some(self.recovery_rest());
                    }

                    return Some(self.tone(note, self.note_length, dots));
                }
                b'A'..=b'G' => {
                    let mut note =
                        SEMITONE_TABLE[usize::from(c - b'A')] + self.octave * 12 + 1;

                    match self.peek_char() {
                        Some(b'#') | Some(b'+') => {
                            if note < NOTE_MAX {
                                note += 1;
                            }
                            self.cursor += 1;
                        }
                        Some(b'-') => {
                            if note > NOTE_MIN {
                                note -= 1;
                            }
                            self.cursor += 1;
                        }
                        _ => {}
                    }

                    // Shorthand length digits override the default.
                    let mut note_length = self.next_number();
                    if note_length == 0 {
                        note_length = self.note_length;
                    }
                    let dots = self.next_dots();

                    return Some(self.tone(note, note_length, dots));
                }
                other => {
                    debug!(token = %(other as char), "unrecognized token, decoding as a rest");
                    return Some(self.recovery_rest());
                }
            }
        }
    }
}

/// Pitch of a note number in Hz, anchored at note 46 = 880 Hz (A5).
///
/// f32 math and truncation, matching the firmware library this notation
/// originates from.
fn note_to_frequency(note: u32) -> u16 {
    (880.0_f32 * 2.0_f32.powf((note as f32 - 46.0) / 12.0)) as u16
}

/// Minimum spacing between control messages the sink is guaranteed to
/// observe; callers debounce `stop` against this.
pub fn maximum_update_interval() -> Duration {
    MAX_UPDATE_INTERVAL
}
