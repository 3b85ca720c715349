//! Pitch
//!
//! Spelled pitch classes and octave-bearing notes: the values every other
//! module resolves note names and MIDI numbers into.

use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

use crate::interval::Interval;

const SEMITONES: i32 = 12;

/// Highest valid MIDI note number
const MAX_MIDI: i32 = 127;

/// Sharp spellings for each chroma, used when only a number is known
const SHARP_SPELLINGS: [(Letter, i8); SEMITONES as usize] = [
    (Letter::C, 0),
    (Letter::C, 1),
    (Letter::D, 0),
    (Letter::D, 1),
    (Letter::E, 0),
    (Letter::F, 0),
    (Letter::F, 1),
    (Letter::G, 0),
    (Letter::G, 1),
    (Letter::A, 0),
    (Letter::A, 1),
    (Letter::B, 0),
];

/// Errors when resolving pitches
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    /// The text could not be read as a note name.
    #[error(
        "invalid note name `{input}`: expected a letter A-G, optional accidentals \
         (#, b, x) and an optional octave, e.g. `C#4` or `Eb`"
    )]
    InvalidName {
        /// The rejected text.
        input: String,
    },

    /// A chroma outside the twelve pitch classes.
    #[error("chroma {value} out of range: expected 0..=11")]
    ChromaOutOfRange {
        /// The rejected chroma.
        value: i32,
    },

    /// A note whose MIDI number falls outside the MIDI range.
    #[error("MIDI number {value} out of range: expected 0..=127")]
    MidiOutOfRange {
        /// The rejected MIDI number.
        value: i32,
    },
}

/// The seven diatonic letter names
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Letter {
    /// C
    C,
    /// D
    D,
    /// E
    E,
    /// F
    F,
    /// G
    G,
    /// A
    A,
    /// B
    B,
}

const LETTERS: [Letter; 7] = [
    Letter::C,
    Letter::D,
    Letter::E,
    Letter::F,
    Letter::G,
    Letter::A,
    Letter::B,
];

impl Letter {
    /// Semitones above C of the natural pitch with this letter.
    pub const fn semitones(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Position in the diatonic cycle, C = 0 through B = 6.
    pub const fn index(self) -> i32 {
        self as i32
    }

    /// Letter at a diatonic position, wrapping in both directions.
    pub fn from_index(idx: i32) -> Letter {
        LETTERS[idx.rem_euclid(LETTERS.len() as i32) as usize]
    }

    fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

impl Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A spelled pitch class: a letter plus a signed alteration in semitones.
///
/// Equality compares spelling, so `C#` and `Db` differ; use
/// [`PitchClass::is_enharmonic`] to compare sounding pitch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchClass {
    letter: Letter,
    alteration: i8,
}

impl PitchClass {
    /// Build from a letter and an alteration (+1 sharp, -1 flat, ...).
    pub const fn from_parts(letter: Letter, alteration: i8) -> Self {
        PitchClass { letter, alteration }
    }

    /// Parse a name such as `C`, `f#`, `Bb` or `Ebb`.
    ///
    /// Returns `Err(PitchError::InvalidName)` for anything else, including
    /// names carrying an octave (use [`Note::from_name`] for those).
    pub fn from_name(name: &str) -> Result<Self, PitchError> {
        match split_spelling(name) {
            Some((pitch_class, "")) => Ok(pitch_class),
            _ => Err(PitchError::InvalidName {
                input: name.to_string(),
            }),
        }
    }

    /// Build from a chroma, spelling black keys as sharps.
    ///
    /// Returns `Err(PitchError::ChromaOutOfRange)` unless `chroma` is 0..=11.
    pub fn from_chroma(chroma: u8) -> Result<Self, PitchError> {
        SHARP_SPELLINGS
            .get(chroma as usize)
            .map(|&(letter, alteration)| PitchClass::from_parts(letter, alteration))
            .ok_or(PitchError::ChromaOutOfRange {
                value: chroma as i32,
            })
    }

    /// The letter name.
    pub fn letter(&self) -> Letter {
        self.letter
    }

    /// The alteration in semitones.
    pub fn alteration(&self) -> i8 {
        self.alteration
    }

    /// Pitch class as an integer 0..=11, C = 0.
    pub fn chroma(&self) -> u8 {
        (self.letter.semitones() + self.alteration as i32).rem_euclid(SEMITONES) as u8
    }

    /// True when both spellings sound the same pitch class.
    pub fn is_enharmonic(&self, other: &PitchClass) -> bool {
        self.chroma() == other.chroma()
    }

    /// Transpose by an interval, keeping the spelling the interval implies
    /// (C up a minor third is Eb, not D#).
    pub fn transpose(&self, interval: &Interval) -> PitchClass {
        let number = interval.number() as i32;
        let steps = number.signum() * (number.abs() - 1);
        let letter = Letter::from_index(self.letter.index() + steps);
        let target = (self.chroma() as i32 + interval.semitones()).rem_euclid(SEMITONES);
        let alteration = (target - letter.semitones() + 6).rem_euclid(SEMITONES) - 6;
        PitchClass::from_parts(letter, alteration as i8)
    }

    /// The spelled name, e.g. `F#` or `Bbb`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accidental = if self.alteration >= 0 { "#" } else { "b" };
        write!(
            f,
            "{}{}",
            self.letter,
            accidental.repeat(self.alteration.unsigned_abs() as usize)
        )
    }
}

impl FromStr for PitchClass {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PitchClass::from_name(s)
    }
}

/// A pitch class with an optional octave.
///
/// Octave-less notes still take part in chord guessing; only notes with an
/// octave have a MIDI number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "NoteParts")
)]
pub struct Note {
    pitch_class: PitchClass,
    octave: Option<i8>,
}

impl Note {
    /// Build from a pitch class and octave.
    ///
    /// Returns `Err(PitchError::MidiOutOfRange)` when the octave places the
    /// note outside MIDI 0..=127.
    pub fn from_parts(pitch_class: PitchClass, octave: Option<i8>) -> Result<Self, PitchError> {
        let note = Note {
            pitch_class,
            octave,
        };
        if let Some(height) = note.height() {
            if !(0..=MAX_MIDI).contains(&height) {
                return Err(PitchError::MidiOutOfRange { value: height });
            }
        }
        Ok(note)
    }

    /// Parse a name such as `C4`, `Bb-1`, `f#` or `Eb`.
    pub fn from_name(name: &str) -> Result<Self, PitchError> {
        let invalid = || PitchError::InvalidName {
            input: name.to_string(),
        };
        let (pitch_class, rest) = split_spelling(name).ok_or_else(invalid)?;
        let octave = match rest {
            "" => None,
            digits => Some(digits.parse::<i8>().map_err(|_| invalid())?),
        };
        Note::from_parts(pitch_class, octave)
    }

    /// Build from a MIDI number, spelling black keys as sharps.
    pub fn from_midi(midi: u8) -> Result<Self, PitchError> {
        let midi = midi as i32;
        if midi > MAX_MIDI {
            return Err(PitchError::MidiOutOfRange { value: midi });
        }
        let pitch_class = PitchClass::from_chroma((midi % SEMITONES) as u8)?;
        Ok(Note {
            pitch_class,
            octave: Some((midi / SEMITONES - 1) as i8),
        })
    }

    /// The spelled pitch class.
    pub fn pitch_class(&self) -> PitchClass {
        self.pitch_class
    }

    /// The octave, if the note has one.
    pub fn octave(&self) -> Option<i8> {
        self.octave
    }

    /// Pitch class as an integer 0..=11.
    pub fn chroma(&self) -> u8 {
        self.pitch_class.chroma()
    }

    /// MIDI number (C4 = 60), if the note has an octave.
    pub fn midi(&self) -> Option<u8> {
        self.height().map(|height| height as u8)
    }

    fn height(&self) -> Option<i32> {
        self.octave.map(|octave| {
            (octave as i32 + 1) * SEMITONES
                + self.pitch_class.letter.semitones()
                + self.pitch_class.alteration as i32
        })
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pitch_class)?;
        if let Some(octave) = self.octave {
            write!(f, "{octave}")?;
        }
        Ok(())
    }
}

impl FromStr for Note {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::from_name(s)
    }
}

/// Unchecked fields of a deserialized [`Note`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct NoteParts {
    pitch_class: PitchClass,
    octave: Option<i8>,
}

#[cfg(feature = "serde")]
impl TryFrom<NoteParts> for Note {
    type Error = PitchError;

    fn try_from(parts: NoteParts) -> Result<Self, Self::Error> {
        Note::from_parts(parts.pitch_class, parts.octave)
    }
}

/// Anything that resolves to a pitch class: the input the chord guesser
/// and pitch-class sets accept.
pub trait Pitched {
    /// The pitch class of this value.
    fn pitch_class(&self) -> PitchClass;
}

impl Pitched for PitchClass {
    fn pitch_class(&self) -> PitchClass {
        *self
    }
}

impl Pitched for Note {
    fn pitch_class(&self) -> PitchClass {
        self.pitch_class
    }
}

impl<T: Pitched + ?Sized> Pitched for &T {
    fn pitch_class(&self) -> PitchClass {
        (**self).pitch_class()
    }
}

/// Read a letter and its accidentals off the front of `input`, returning
/// the pitch class and whatever text follows.
pub(crate) fn split_spelling(input: &str) -> Option<(PitchClass, &str)> {
    let mut chars = input.char_indices();
    let (_, first) = chars.next()?;
    let letter = Letter::from_char(first)?;
    let mut alteration: i8 = 0;
    let mut rest = input.len();
    for (idx, c) in chars {
        match c {
            '#' | '♯' => alteration = alteration.saturating_add(1),
            'x' => alteration = alteration.saturating_add(2),
            'b' | '♭' => alteration = alteration.saturating_sub(1),
            _ => {
                rest = idx;
                break;
            }
        }
    }
    Some((PitchClass::from_parts(letter, alteration), &input[rest..]))
}
