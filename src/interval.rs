//! Interval
//!
//! Qualified diatonic intervals (`P5`, `m3`, `AA4`, `-M2`) and their
//! semitone sizes.

use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

use crate::pitch::PitchClass;

const SEMITONES: i32 = 12;

/// Semitones of the major/perfect interval for each simple degree
const DEGREE_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Errors when reading or building intervals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// The text is not a quality followed by a number.
    #[error(
        "invalid interval `{input}`: expected a quality (P, M, m, A.., d..) followed by a \
         non-zero number, e.g. `M3` or `-P5`"
    )]
    InvalidFormat {
        /// The rejected text.
        input: String,
    },

    /// The quality does not apply to the interval number.
    #[error(
        "quality `{quality}` cannot qualify interval number {number}: unisons, fourths and \
         fifths take P/A/d, the others M/m/A/d"
    )]
    InvalidQuality {
        /// The rejected quality.
        quality: String,
        /// The interval number it was paired with.
        number: i8,
    },
}

/// Interval quality
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quality {
    /// Perfect (unison, fourth, fifth and their compounds)
    Perfect,
    /// Major
    Major,
    /// Minor
    Minor,
    /// Augmented the given number of times
    Augmented(u8),
    /// Diminished the given number of times
    Diminished(u8),
}

impl Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Quality::Perfect => f.write_str("P"),
            Quality::Major => f.write_str("M"),
            Quality::Minor => f.write_str("m"),
            Quality::Augmented(n) => f.write_str(&"A".repeat(n as usize)),
            Quality::Diminished(n) => f.write_str(&"d".repeat(n as usize)),
        }
    }
}

impl FromStr for Quality {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(Quality::Perfect),
            "M" => Ok(Quality::Major),
            "m" => Ok(Quality::Minor),
            _ if !s.is_empty() && s.len() <= u8::MAX as usize && s.chars().all(|c| c == 'A') => {
                Ok(Quality::Augmented(s.len() as u8))
            }
            _ if !s.is_empty() && s.len() <= u8::MAX as usize && s.chars().all(|c| c == 'd') => {
                Ok(Quality::Diminished(s.len() as u8))
            }
            _ => Err(()),
        }
    }
}

/// A qualified, directed interval such as a major third or a descending
/// perfect fifth.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "IntervalParts")
)]
pub struct Interval {
    quality: Quality,
    number: i8,
}

impl Interval {
    /// Build from a quality and a signed, non-zero number
    /// (negative numbers descend).
    pub fn new(quality: Quality, number: i8) -> Result<Self, IntervalError> {
        let invalid_quality = || IntervalError::InvalidQuality {
            quality: quality.to_string(),
            number,
        };
        if number == 0 {
            return Err(IntervalError::InvalidFormat {
                input: format!("{quality}{number}"),
            });
        }
        let fits = match quality {
            Quality::Perfect => is_perfectable(number),
            Quality::Major | Quality::Minor => !is_perfectable(number),
            Quality::Augmented(n) | Quality::Diminished(n) => n > 0,
        };
        if !fits {
            return Err(invalid_quality());
        }
        Ok(Interval { quality, number })
    }

    /// Parse a name such as `P1`, `m3`, `AA4`, `M13` or `-P5`.
    pub fn from_name(name: &str) -> Result<Self, IntervalError> {
        let invalid = || IntervalError::InvalidFormat {
            input: name.to_string(),
        };
        let (descending, body) = match name.strip_prefix('-') {
            Some(body) => (true, body),
            None => (false, name.strip_prefix('+').unwrap_or(name)),
        };
        let split = body
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (quality, digits) = body.split_at(split);
        let quality = quality.parse::<Quality>().map_err(|_| invalid())?;
        let number = digits.parse::<i8>().map_err(|_| invalid())?;
        Interval::new(quality, if descending { -number } else { number })
    }

    /// The ascending simple interval from one spelled pitch class up to
    /// another (C to E is a major third, B# to C a diminished second).
    pub fn between(from: PitchClass, to: PitchClass) -> Interval {
        let number = (to.letter().index() - from.letter().index()).rem_euclid(7) + 1;
        let semitones = (to.chroma() as i32 - from.chroma() as i32).rem_euclid(SEMITONES);
        let alteration =
            (semitones - DEGREE_SEMITONES[(number - 1) as usize] + 6).rem_euclid(SEMITONES) - 6;
        Interval::from_alteration(number as i8, alteration)
    }

    /// Interval with the given number, altered from its major/perfect size.
    pub(crate) fn from_alteration(number: i8, alteration: i32) -> Interval {
        let quality = match (is_perfectable(number), alteration) {
            (true, 0) => Quality::Perfect,
            (false, 0) => Quality::Major,
            (false, -1) => Quality::Minor,
            (_, n) if n > 0 => Quality::Augmented(n as u8),
            (true, n) => Quality::Diminished((-n) as u8),
            (false, n) => Quality::Diminished((-n - 1) as u8),
        };
        Interval { quality, number }
    }

    /// The quality.
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// The signed interval number.
    pub fn number(&self) -> i8 {
        self.number
    }

    /// Signed size in semitones.
    pub fn semitones(&self) -> i32 {
        let size = self.number.unsigned_abs() as i32 - 1;
        let degree = (size % 7) as usize;
        let octaves = size / 7;
        let alteration = match (is_perfectable(self.number), self.quality) {
            (_, Quality::Perfect) | (_, Quality::Major) => 0,
            (_, Quality::Minor) => -1,
            (_, Quality::Augmented(n)) => n as i32,
            (true, Quality::Diminished(n)) => -(n as i32),
            (false, Quality::Diminished(n)) => -(n as i32) - 1,
        };
        let magnitude = DEGREE_SEMITONES[degree] + alteration + octaves * SEMITONES;
        self.number.signum() as i32 * magnitude
    }

    /// Size reduced to a pitch-class distance 0..=11.
    pub fn chroma(&self) -> u8 {
        self.semitones().rem_euclid(SEMITONES) as u8
    }

    /// The spelled name, e.g. `m7`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}{}", self.quality, self.number.unsigned_abs())
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::from_name(s)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct IntervalParts {
    quality: Quality,
    number: i8,
}

#[cfg(feature = "serde")]
impl TryFrom<IntervalParts> for Interval {
    type Error = IntervalError;

    fn try_from(parts: IntervalParts) -> Result<Self, Self::Error> {
        Interval::new(parts.quality, parts.number)
    }
}

/// Unisons, fourths, fifths and their compounds
fn is_perfectable(number: i8) -> bool {
    matches!((number.unsigned_abs() as i32 - 1) % 7, 0 | 3 | 4)
}
