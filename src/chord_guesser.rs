//! Chord Guesser
//!
//! Names the chords a collection of sounding notes could spell, ranked by
//! how little the reading has to assume: missing chord tones and a bass
//! other than the root both cost confidence.

use itertools::Itertools;
use log::trace;

use crate::chord::Chord;
use crate::chord_type::ChordTypeIndex;
use crate::pcset::PitchClassSet;
use crate::pitch::{Note, PitchClass, PitchError, Pitched};

/// Weight factor for a chord type missing optional tones
const OMISSION_PENALTY: f32 = 0.9;

/// Weight factor for a bass on a chord tone other than the root
const INVERSION_PENALTY: f32 = 0.8;

/// Weight factor for a bass outside the chord
const SLASH_PENALTY: f32 = 0.7;

/// Fewer notes than this are only read from their first note
const MIN_ROTATED_NOTES: usize = 3;

/// From this many notes on, the bass is also tried as an added tone
const MIN_NOTES_FOR_UPPER_PASS: usize = 4;

/// Which readings the guesser accepts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuessOptions {
    /// Accept chord types with optional tones missing.
    pub allow_omissions: bool,
    /// Accept a chord tone other than the root in the bass.
    pub allow_inversions: bool,
    /// Accept any bass other than the root, chord tone or not.
    pub allow_slash: bool,
}

impl Default for GuessOptions {
    fn default() -> Self {
        GuessOptions {
            allow_omissions: true,
            allow_inversions: true,
            allow_slash: true,
        }
    }
}

/// One reading of the notes with its confidence in (0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ChordGuess {
    /// The chord.
    pub chord: Chord,
    /// Confidence: 1.0 for a complete chord in root position.
    pub weight: f32,
}

/// Builder for `ChordGuesser` to customize options and the chord-type index
pub struct ChordGuesserBuilder<'a> {
    index: Option<&'a ChordTypeIndex>,
    options: GuessOptions,
}

impl<'a> ChordGuesserBuilder<'a> {
    /// Create a new builder with every reading allowed and the global index
    pub fn new() -> Self {
        ChordGuesserBuilder {
            index: None,
            options: GuessOptions::default(),
        }
    }

    /// Look chord types up in `index` instead of the global one
    pub fn index(mut self, index: &'a ChordTypeIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Replace all options at once
    pub fn options(mut self, options: GuessOptions) -> Self {
        self.options = options;
        self
    }

    /// Accept chord types missing optional tones
    pub fn allow_omissions(mut self, value: bool) -> Self {
        self.options.allow_omissions = value;
        self
    }

    /// Accept inverted chords
    pub fn allow_inversions(mut self, value: bool) -> Self {
        self.options.allow_inversions = value;
        self
    }

    /// Accept a bass other than the root
    pub fn allow_slash(mut self, value: bool) -> Self {
        self.options.allow_slash = value;
        self
    }

    /// Build the `ChordGuesser`
    pub fn build(self) -> ChordGuesser<'a> {
        ChordGuesser {
            index: match self.index {
                Some(index) => index,
                None => ChordTypeIndex::global(),
            },
            options: self.options,
        }
    }
}

impl Default for ChordGuesserBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Main chord guesser
#[derive(Debug, Copy, Clone)]
pub struct ChordGuesser<'a> {
    index: &'a ChordTypeIndex,
    options: GuessOptions,
}

impl ChordGuesser<'static> {
    /// Create a guesser over the global index with every reading allowed
    pub fn new() -> Self {
        ChordGuesserBuilder::new().build()
    }
}

impl Default for ChordGuesser<'static> {
    fn default() -> Self {
        ChordGuesser::new()
    }
}

impl<'a> ChordGuesser<'a> {
    /// Return a builder to customize options and the index
    pub fn builder() -> ChordGuesserBuilder<'a> {
        ChordGuesserBuilder::new()
    }

    /// The options in effect.
    pub fn options(&self) -> GuessOptions {
        self.options
    }

    /// The index chord types are looked up in.
    pub fn index(&self) -> &'a ChordTypeIndex {
        self.index
    }

    /// Guess chords from notes listed bass first.
    ///
    /// Repeated pitch classes are dropped after their first occurrence and
    /// the first note is taken as the bass; notes are never re-sorted by
    /// height. Every rotation of the notes is tried as a root, and with
    /// more than three notes the notes above the bass are tried on their
    /// own too. Results are sorted by descending weight, ties in discovery
    /// order. No recognizable chord gives an empty list.
    pub fn guess<P: Pitched>(&self, notes: &[P]) -> Vec<ChordGuess> {
        let notes: Vec<PitchClass> = notes
            .iter()
            .map(|note| note.pitch_class())
            .unique_by(PitchClass::chroma)
            .collect();
        let Some(&bass) = notes.first() else {
            return Vec::new();
        };

        let mut found = Vec::new();
        self.collect(&notes, bass, &mut found);
        if notes.len() >= MIN_NOTES_FOR_UPPER_PASS {
            self.collect(&notes[1..], bass, &mut found);
        }
        found.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        found
    }

    /// Guess chords from note names such as `E`, `G4` or `Bb3`.
    ///
    /// Returns `Err(PitchError::InvalidName)` for the first name that does
    /// not parse; nothing is guessed in that case.
    pub fn guess_names(&self, names: &[&str]) -> Result<Vec<ChordGuess>, PitchError> {
        let notes = names
            .iter()
            .map(|name| Note::from_name(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.guess(&notes))
    }

    /// Guess chords from MIDI note numbers listed bass first.
    ///
    /// Returns `Err(PitchError::MidiOutOfRange)` for any number above 127.
    pub fn guess_midi(&self, notes: &[u8]) -> Result<Vec<ChordGuess>, PitchError> {
        let notes = notes
            .iter()
            .map(|&midi| Note::from_midi(midi))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.guess(&notes))
    }

    /// Try every rotation of `notes` as a root position and keep the
    /// readings the options allow.
    fn collect(&self, notes: &[PitchClass], bass: PitchClass, found: &mut Vec<ChordGuess>) {
        for rotation in rotations(notes) {
            let root = rotation[0];
            let shape = PitchClassSet::from_pitch_classes(rotation.as_slice()).zero();
            let Some(chord_type) = self.index.find_by_binary(shape.binary()) else {
                continue;
            };
            let chord = Chord::with_bass(root, chord_type.clone(), bass);
            if bass_fills_omission(&chord) {
                trace!("rejected {chord}: bass is an omitted tone");
                continue;
            }
            let Some(weight) = self.weigh(&chord) else {
                continue;
            };
            if found.iter().any(|guess| same_reading(&guess.chord, &chord)) {
                continue;
            }
            trace!("accepted {chord} with weight {weight:.3}");
            found.push(ChordGuess { chord, weight });
        }
    }

    /// Weight of a reading, or `None` when the options rule it out.
    fn weigh(&self, chord: &Chord) -> Option<f32> {
        let distinct_bass = chord.has_distinct_bass();
        if distinct_bass && !self.options.allow_slash {
            trace!("rejected {chord}: bass differs from root");
            return None;
        }
        let inversion = chord.inversion();
        if !self.options.allow_inversions && inversion.is_some_and(|i| i > 0) {
            trace!("rejected {chord}: inverted");
            return None;
        }
        let omits = chord.chord_type().has_omissions();
        if omits && !self.options.allow_omissions {
            trace!("rejected {chord}: chord tones omitted");
            return None;
        }

        let mut weight = 1.0;
        if omits {
            weight *= OMISSION_PENALTY;
        }
        if distinct_bass {
            weight *= match inversion {
                Some(_) => INVERSION_PENALTY,
                None => SLASH_PENALTY,
            };
        }
        Some(weight)
    }
}

/// Whether the bass sounds a tone the chord type counts as left out.
fn bass_fills_omission(chord: &Chord) -> bool {
    let root = chord.root();
    chord.chord_type().omissions().is_some_and(|omitted| {
        omitted
            .iter()
            .any(|interval| root.transpose(interval).is_enharmonic(&chord.bass()))
    })
}

/// Equal chords, or the same named type on the same root and bass.
fn same_reading(a: &Chord, b: &Chord) -> bool {
    if a == b {
        return true;
    }
    let name = a.chord_type().name();
    name.is_some()
        && name == b.chord_type().name()
        && a.root().is_enharmonic(&b.root())
        && a.bass().is_enharmonic(&b.bass())
}

/// Every cyclic rotation of `notes`, starting with `notes` itself; only the
/// identity below three notes.
fn rotations(notes: &[PitchClass]) -> Vec<Vec<PitchClass>> {
    let count = if notes.len() < MIN_ROTATED_NOTES {
        notes.len().min(1)
    } else {
        notes.len()
    };
    (0..count)
        .map(|i| notes[i..].iter().chain(&notes[..i]).copied().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcs(names: &[&str]) -> Vec<PitchClass> {
        names
            .iter()
            .map(|n| PitchClass::from_name(n).unwrap())
            .collect()
    }

    #[test]
    fn rotations_below_three_notes_keep_identity() {
        assert!(rotations(&[]).is_empty());
        assert_eq!(rotations(&pcs(&["C"])).len(), 1);
        assert_eq!(rotations(&pcs(&["C", "G"])), vec![pcs(&["C", "G"])]);
    }

    #[test]
    fn rotations_cycle_through_every_note() {
        let rotated = rotations(&pcs(&["C", "E", "G"]));
        assert_eq!(
            rotated,
            vec![pcs(&["C", "E", "G"]), pcs(&["E", "G", "C"]), pcs(&["G", "C", "E"])]
        );
    }
}
