//! Predefined tune table.
//!
//! A fixed, process-lifetime table of named system tunes, addressed by
//! 1-based id. Slot 0 is reserved for caller-supplied custom melodies and
//! is never a valid lookup target. The table is read-only; versioning of
//! its contents is owned by whoever renders the tunes.

use crate::error::TuneError;
use crate::melody::MelodyDecoder;

/// One named entry in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tune {
    pub name: &'static str,
    pub melody: &'static str,
}

/// System tunes, indexed by id. Several alarm tunes carry `MB` and repeat
/// until playback truncates them.
const DEFAULT_TUNES: &[Tune] = &[
    Tune { name: "custom", melody: "" }, // id 0: reserved
    Tune { name: "startup", melody: "MFT240L8 O4aO5dc O4aO5dc O4aO5dc L16dcdcdcdc" },
    Tune { name: "error", melody: "MBT200a8a8a8PaaaP" },
    Tune { name: "notify_positive", melody: "MFT200e8a8a" },
    Tune { name: "notify_neutral", melody: "MFT200e8e" },
    Tune { name: "notify_negative", melody: "MFT200e8c8e8c8e8c8" },
    Tune { name: "arming_warning", melody: "MNT75L1O2G" },
    Tune { name: "battery_warning_slow", melody: "MBNT100a8" },
    Tune { name: "battery_warning_fast", melody: "MBNT255a8a8a8a8a8a8a8a8a8a8" },
    Tune { name: "gps_warning", melody: "MFT255L4AAAL1F#" },
    Tune { name: "arming_failure", melody: "MFT255L4<<<BAP" },
    Tune { name: "parachute_release", melody: "MFT255L16agagagag" },
    Tune { name: "single_beep", melody: "MFT100a8" },
    Tune { name: "home_set", melody: "MFT100L4>G#6A#6B#4" },
    Tune { name: "sd_init", melody: "MFAGPAG" },
    Tune { name: "sd_error", melody: "MFAGPAB" },
    Tune { name: "program_io", melody: "MLL32CP8MB" },
    Tune { name: "program_io_ok", melody: "MLL8CDE" },
    Tune { name: "program_io_error", melody: "ML<<CP4CP4CP4CP4CP4" },
    Tune { name: "power_off", melody: "MFT255a8g8f8e8c8<b8a8g4" },
];

/// Read-only view over the predefined tune table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TuneLibrary;

impl TuneLibrary {
    pub fn new() -> Self {
        Self
    }

    /// Number of table slots, including the reserved slot 0. Valid ids
    /// are `1..size()`.
    pub fn size(&self) -> usize {
        DEFAULT_TUNES.len()
    }

    /// Look up a tune by id.
    pub fn get(&self, id: usize) -> Result<&'static Tune, TuneError> {
        if id == 0 || id >= self.size() {
            return Err(TuneError::InvalidTuneId {
                id,
                table_size: self.size(),
            });
        }
        Ok(&DEFAULT_TUNES[id])
    }

    /// Resolve a predefined tune into a decoder over its events.
    ///
    /// This is producer-side expansion; the compact protocol in
    /// [`crate::playback`] instead ships the id to the consumer.
    pub fn resolve_predefined(
        &self,
        id: usize,
        strength: u8,
    ) -> Result<MelodyDecoder, TuneError> {
        let tune = self.get(id)?;
        MelodyDecoder::new(tune.melody, strength)
    }
}
