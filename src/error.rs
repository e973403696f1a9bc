//! # Error Types
//!
//! All request-validation errors for the tunes crate.
//!
//! Errors are detected synchronously, before anything is published to a
//! sink: a bad tune id or a melody string without its `'M'` marker is
//! rejected up front, and no partial playback state is created. Malformed
//! tokens *inside* an accepted melody string are not errors at all; the
//! decoder recovers them as rests (see [`crate::melody`]).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TuneError {
    /// Predefined tune id outside the valid range.
    ///
    /// Valid ids are `1..table_size`; id 0 is the reserved custom slot.
    ///
    /// # Example
    /// ```
    /// # use tunes::TuneError;
    /// let err = TuneError::InvalidTuneId { id: 0, table_size: 20 };
    /// assert_eq!(err.to_string(), "tune id 0 is out of range (valid ids are 1..20)");
    /// ```
    #[error("tune id {id} is out of range (valid ids are 1..{table_size})")]
    InvalidTuneId { id: usize, table_size: usize },

    /// Melody string is empty or does not begin with the `'M'` marker.
    ///
    /// # Example
    /// ```
    /// # use tunes::TuneError;
    /// let err = TuneError::InvalidNotation;
    /// assert_eq!(err.to_string(), "melody string must begin with 'M'");
    /// ```
    #[error("melody string must begin with 'M'")]
    InvalidNotation,

    /// Requested tone frequency outside `1..22000` Hz.
    ///
    /// Zero is rejected on this path because a zero-frequency control
    /// event is the stop override, not a tone.
    #[error("frequency {0} Hz is out of range (accepted range is 1..22000)")]
    OutOfRangeFrequency(u16),
}
