//! Tune request validation.
//!
//! A [`TuneRequest`] is the validated caller intent the playback layer
//! consumes: either a predefined tune id or an inline melody string, plus
//! the strength to play at. All validation happens at construction, so an
//! accepted request can always be played.

use crate::control::STRENGTH_NORMAL;
use crate::error::TuneError;
use crate::library::TuneLibrary;
use crate::melody::MELODY_MARKER;

/// What to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuneSource {
    /// 1-based index into the predefined tune table.
    Predefined(usize),
    /// Inline melody string, beginning with `'M'`.
    Notation(String),
}

/// A validated request to play one tune.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuneRequest {
    pub source: TuneSource,
    pub strength: u8,
}

impl TuneRequest {
    /// Request a predefined tune by id, validated against `library`.
    pub fn predefined(id: usize, library: &TuneLibrary) -> Result<Self, TuneError> {
        library.get(id)?;
        Ok(Self {
            source: TuneSource::Predefined(id),
            strength: STRENGTH_NORMAL,
        })
    }

    /// Request an inline melody. Fails unless `text` begins with `'M'`.
    pub fn notation(text: &str) -> Result<Self, TuneError> {
        if !text.starts_with(MELODY_MARKER) {
            return Err(TuneError::InvalidNotation);
        }
        Ok(Self {
            source: TuneSource::Notation(text.to_owned()),
            strength: STRENGTH_NORMAL,
        })
    }

    /// Set the playback strength; out-of-range values fall back to the
    /// default rather than failing.
    pub fn with_strength(mut self, strength: u8) -> Self {
        self.strength = clamp_strength(strength);
        self
    }
}

/// Accept a strength iff `0 < strength < 100`; anything else falls back
/// to [`STRENGTH_NORMAL`].
///
/// The bounds are exclusive on both ends, so full volume (100) is not
/// accepted. That matches the validation this tool has always shipped
/// with; see the test below before "fixing" it.
pub fn clamp_strength(strength: u8) -> u8 {
    if strength > 0 && strength < 100 {
        strength
    } else {
        STRENGTH_NORMAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_requests_are_validated() {
        let library = TuneLibrary::new();
        assert!(TuneRequest::predefined(2, &library).is_ok());
        assert!(TuneRequest::predefined(0, &library).is_err());
        assert!(TuneRequest::predefined(library.size(), &library).is_err());
    }

    #[test]
    fn test_notation_requests_require_the_marker() {
        assert!(TuneRequest::notation("MFT200e8a8a").is_ok());
        assert_eq!(
            TuneRequest::notation("FT200e8a8a").unwrap_err(),
            TuneError::InvalidNotation
        );
        assert_eq!(
            TuneRequest::notation("").unwrap_err(),
            TuneError::InvalidNotation
        );
    }

    #[test]
    fn test_in_range_strength_is_kept() {
        assert_eq!(clamp_strength(1), 1);
        assert_eq!(clamp_strength(55), 55);
        assert_eq!(clamp_strength(99), 99);
    }

    #[test]
    fn test_out_of_range_strength_falls_back_to_default() {
        assert_eq!(clamp_strength(0), STRENGTH_NORMAL);
        assert_eq!(clamp_strength(255), STRENGTH_NORMAL);
    }

    #[test]
    fn strength_of_exactly_100_falls_back_to_default() {
        // The accepted range is exclusive at both ends: 100 means full
        // volume to a consumer but is rejected here. Long-standing
        // behavior, kept as-is.
        assert_eq!(clamp_strength(100), STRENGTH_NORMAL);
    }

    #[test]
    fn test_with_strength_clamps() {
        let library = TuneLibrary::new();
        let request = TuneRequest::predefined(1, &library)
            .unwrap()
            .with_strength(120);
        assert_eq!(request.strength, STRENGTH_NORMAL);
    }
}
