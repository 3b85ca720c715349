//! Chord
//!
//! A root, a chord type and a bass: what the guesser produces and what
//! chord symbols such as `Am7/G` parse into.

use std::fmt::{self, Display};

use itertools::Itertools;
use thiserror::Error;

use crate::chord_guesser::{ChordGuess, ChordGuesser, GuessOptions};
use crate::chord_type::{ChordType, ChordTypeIndex};
use crate::interval::{Interval, IntervalError};
use crate::pcset::PitchClassSet;
use crate::pitch::{split_spelling, PitchClass, PitchError};

/// Name the index is asked for when a symbol is a bare root
const BARE_ROOT_NAME: &str = "major";

/// Errors when building chord types or reading chord symbols
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordError {
    /// A root or bass note could not be read.
    #[error(transparent)]
    Pitch(#[from] PitchError),

    /// An interval token in a chord-type pattern could not be read.
    #[error(transparent)]
    Interval(#[from] IntervalError),

    /// A database record has no interval tokens.
    #[error("chord type `{name}` has an empty interval pattern")]
    EmptyPattern {
        /// Name of the offending record.
        name: String,
    },

    /// A database record holds an interval below its root.
    #[error("chord type `{name}` holds descending interval {interval}: expected intervals above the root")]
    DescendingInterval {
        /// Name of the offending record.
        name: String,
        /// The descending interval.
        interval: Interval,
    },

    /// No chord type is known by the symbol.
    #[error("unknown chord symbol `{symbol}`")]
    UnknownSymbol {
        /// The symbol with root and bass removed.
        symbol: String,
    },
}

/// A chord: a root, a chord type and a bass that defaults to the root.
///
/// Equality looks at sounding pitch: root chroma, chord type and bass chroma.
#[derive(Debug, Clone)]
pub struct Chord {
    root: PitchClass,
    chord_type: ChordType,
    bass: PitchClass,
}

impl Chord {
    /// A chord in root position.
    pub fn new(root: PitchClass, chord_type: ChordType) -> Self {
        Chord {
            root,
            chord_type,
            bass: root,
        }
    }

    /// A chord over an explicit bass, which need not be a chord tone.
    pub fn with_bass(root: PitchClass, chord_type: ChordType, bass: PitchClass) -> Self {
        Chord {
            root,
            chord_type,
            bass,
        }
    }

    /// Read a symbol such as `Cmaj7`, `F#m7b5`, `C6/9` or `Am7/G`.
    ///
    /// A bare root (`Eb`) reads as a major triad. Text after the last `/`
    /// is a bass only when it spells a pitch class.
    ///
    /// Returns:
    /// - `Err(ChordError::Pitch)` if the symbol does not start with a note.
    /// - `Err(ChordError::UnknownSymbol)` if `index` knows no such chord type.
    pub fn parse(symbol: &str, index: &ChordTypeIndex) -> Result<Self, ChordError> {
        let (root, rest) = split_spelling(symbol).ok_or_else(|| PitchError::InvalidName {
            input: symbol.to_string(),
        })?;
        let (kind, bass) = match rest.rsplit_once('/') {
            Some((kind, bass)) => match PitchClass::from_name(bass) {
                Ok(bass) => (kind, Some(bass)),
                Err(_) => (rest, None),
            },
            None => (rest, None),
        };
        let chord_type = if kind.is_empty() {
            index.find_by_name(BARE_ROOT_NAME)
        } else {
            index.find_by_symbol(kind)
        }
        .ok_or_else(|| ChordError::UnknownSymbol {
            symbol: kind.to_string(),
        })?;
        Ok(Chord::with_bass(root, chord_type.clone(), bass.unwrap_or(root)))
    }

    /// Guess chords from note names using the global index.
    ///
    /// Shorthand for a [`ChordGuesser`] built with `options`; see
    /// [`ChordGuesser::guess_names`].
    pub fn guess(notes: &[&str], options: GuessOptions) -> Result<Vec<ChordGuess>, PitchError> {
        ChordGuesser::builder()
            .options(options)
            .build()
            .guess_names(notes)
    }

    /// The root.
    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// The bass; the root unless one was given.
    pub fn bass(&self) -> PitchClass {
        self.bass
    }

    /// The chord type.
    pub fn chord_type(&self) -> &ChordType {
        &self.chord_type
    }

    /// True when the bass sounds a different pitch class than the root.
    pub fn has_distinct_bass(&self) -> bool {
        !self.root.is_enharmonic(&self.bass)
    }

    /// Which chord tone sits in the bass.
    ///
    /// `Some(0)` in root position; otherwise the ordinal of the bass among
    /// the chord tones counting the root as 1 (a triad over its third gives
    /// `Some(2)`, over its fifth `Some(3)`). `None` when the bass is not a
    /// chord tone.
    pub fn inversion(&self) -> Option<usize> {
        if !self.has_distinct_bass() {
            return Some(0);
        }
        let root = self.root.chroma() as i32;
        let bass = self.bass.chroma() as i32;
        self.chord_type
            .intervals()
            .iter()
            .position(|interval| (root + interval.chroma() as i32) % 12 == bass)
            .map(|position| position + 1)
    }

    /// Full name such as `C major seventh` or `C major over E`; `None` for
    /// unnamed chord types.
    pub fn name(&self) -> Option<String> {
        let kind = self.chord_type.name()?;
        let mut name = format!("{} {}", self.root, kind);
        if self.has_distinct_bass() {
            name.push_str(&format!(" over {}", self.bass));
        }
        Some(name)
    }

    /// Every symbol spelling of the chord, e.g. `Cmaj7/E`, `CM7/E`.
    pub fn symbols(&self) -> Vec<String> {
        let bass = if self.has_distinct_bass() {
            format!("/{}", self.bass)
        } else {
            String::new()
        };
        self.chord_type
            .symbols()
            .iter()
            .map(|symbol| format!("{}{}{}", self.root, symbol, bass))
            .collect()
    }

    /// Chord tones spelled from the root, bass not included.
    pub fn notes(&self) -> Vec<PitchClass> {
        self.chord_type
            .intervals()
            .iter()
            .map(|interval| self.root.transpose(interval))
            .collect()
    }

    /// Chord tones as a pitch-class set, root first.
    pub fn pitch_class_set(&self) -> PitchClassSet {
        self.chord_type
            .pitch_class_set()
            .transpose(self.root.chroma() as i32)
    }
}

impl PartialEq for Chord {
    fn eq(&self, other: &Self) -> bool {
        self.root.is_enharmonic(&other.root)
            && self.chord_type == other.chord_type
            && self.bass.is_enharmonic(&other.bass)
    }
}

impl Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chord_type.symbols().first() {
            Some(symbol) => write!(f, "{}{}", self.root, symbol)?,
            None => write!(
                f,
                "{}({})",
                self.root,
                self.chord_type.intervals().iter().join(" ")
            )?,
        }
        if self.has_distinct_bass() {
            write!(f, "/{}", self.bass)?;
        }
        Ok(())
    }
}
