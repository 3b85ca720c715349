//! Pitch-class sets
//!
//! Set-theoretic operations over collections of chromas: transposition,
//! inversion, normal and prime forms, interval vectors and the binary
//! fingerprint the chord-type index is keyed by.

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use crate::pitch::{PitchError, Pitched};

const SEMITONES: u8 = 12;

/// Number of interval classes (minor second through tritone)
const INTERVAL_CLASSES: usize = 6;

/// An ordered collection of unique chromas.
///
/// Members keep the order they were first seen in, but equality and hashing
/// follow set semantics: two sets are equal when they hold the same chromas.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct PitchClassSet {
    chromas: Vec<u8>,
}

impl PitchClassSet {
    /// Build from chromas, dropping repeats.
    ///
    /// Returns `Err(PitchError::ChromaOutOfRange)` for any value above 11.
    pub fn new<I: IntoIterator<Item = u8>>(chromas: I) -> Result<Self, PitchError> {
        let chromas: Vec<u8> = chromas.into_iter().collect();
        if let Some(&bad) = chromas.iter().find(|&&c| c >= SEMITONES) {
            return Err(PitchError::ChromaOutOfRange { value: bad as i32 });
        }
        Ok(Self::from_valid(chromas))
    }

    /// Build from anything that resolves to pitch classes, in input order.
    pub fn from_pitch_classes<P: Pitched>(pitches: &[P]) -> Self {
        Self::from_valid(pitches.iter().map(|p| p.pitch_class().chroma()))
    }

    /// Build from a 12-bit fingerprint; bits above 11 are ignored.
    pub fn from_binary(binary: u16) -> Self {
        Self::from_valid((0..SEMITONES).filter(|&c| binary & (1 << c) != 0))
    }

    /// Callers guarantee every chroma is below 12.
    pub(crate) fn from_valid<I: IntoIterator<Item = u8>>(chromas: I) -> Self {
        PitchClassSet {
            chromas: chromas.into_iter().unique().collect(),
        }
    }

    /// Members in first-seen order.
    pub fn chromas(&self) -> &[u8] {
        &self.chromas
    }

    /// Iterate the members in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.chromas.iter().copied()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.chromas.len()
    }

    /// True for the empty set.
    pub fn is_empty(&self) -> bool {
        self.chromas.is_empty()
    }

    /// True when `chroma` is a member.
    pub fn contains(&self, chroma: u8) -> bool {
        self.chromas.contains(&chroma)
    }

    /// True when every member of `self` is in `other`.
    pub fn is_subset_of(&self, other: &PitchClassSet) -> bool {
        self.binary() & !other.binary() == 0
    }

    /// True when every member of `other` is in `self`.
    pub fn is_superset_of(&self, other: &PitchClassSet) -> bool {
        other.is_subset_of(self)
    }

    /// Fingerprint with bit `c` set for each member chroma `c`.
    pub fn binary(&self) -> u16 {
        self.chromas.iter().fold(0, |acc, &c| acc | (1 << c))
    }

    /// Shift every member by `n` semitones, wrapping into 0..=11.
    pub fn transpose(&self, n: i32) -> PitchClassSet {
        Self::from_valid(
            self.chromas
                .iter()
                .map(|&c| (c as i32 + n).rem_euclid(SEMITONES as i32) as u8),
        )
    }

    /// Transpose so the first member becomes 0.
    pub fn zero(&self) -> PitchClassSet {
        match self.chromas.first() {
            Some(&first) => self.transpose(-(first as i32)),
            None => self.clone(),
        }
    }

    /// Reflect every member around 0.
    pub fn invert(&self) -> PitchClassSet {
        Self::from_valid(
            self.chromas
                .iter()
                .map(|&c| (SEMITONES - c) % SEMITONES),
        )
    }

    /// The chromas not in the set, ascending.
    pub fn complement(&self) -> PitchClassSet {
        Self::from_valid((0..SEMITONES).filter(|&c| !self.contains(c)))
    }

    /// Most left-packed rotation, transposed to start at 0.
    ///
    /// Every cyclic rotation of the ascending members is zeroed and the one
    /// with the smallest fingerprint wins; ties keep the earliest rotation.
    pub fn normal(&self) -> PitchClassSet {
        let sorted: Vec<u8> = self.chromas.iter().copied().sorted().collect();
        (0..sorted.len())
            .map(|i| Self::from_valid(sorted[i..].iter().chain(&sorted[..i]).copied()).zero())
            .min_by_key(PitchClassSet::binary)
            .unwrap_or_default()
    }

    /// The more compact of the normal form and the inversion's normal form,
    /// invariant under transposition and inversion.
    pub fn prime(&self) -> PitchClassSet {
        let normal = self.normal();
        let inverted = self.invert().normal();
        if inverted.binary() < normal.binary() {
            inverted
        } else {
            normal
        }
    }

    /// Count of each interval class 1..=6 over all unordered member pairs.
    pub fn interval_vector(&self) -> [u8; INTERVAL_CLASSES] {
        let mut vector = [0; INTERVAL_CLASSES];
        for (&a, &b) in self.chromas.iter().tuple_combinations() {
            let distance = (a as i32 - b as i32).rem_euclid(SEMITONES as i32);
            let class = distance.min(SEMITONES as i32 - distance);
            vector[(class - 1) as usize] += 1;
        }
        vector
    }

    /// True when both sets share an interval vector.
    ///
    /// Prime forms are not compared: identical set classes also report
    /// `true`, so compare [`PitchClassSet::prime`] to tell the two apart.
    pub fn is_z_related(&self, other: &PitchClassSet) -> bool {
        self.interval_vector() == other.interval_vector()
    }
}

impl PartialEq for PitchClassSet {
    fn eq(&self, other: &Self) -> bool {
        self.binary() == other.binary()
    }
}

impl Eq for PitchClassSet {}

impl Hash for PitchClassSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.binary().hash(state);
    }
}

impl Display for PitchClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.chromas.iter().join(", "))
    }
}

impl TryFrom<Vec<u8>> for PitchClassSet {
    type Error = PitchError;

    fn try_from(chromas: Vec<u8>) -> Result<Self, Self::Error> {
        PitchClassSet::new(chromas)
    }
}

impl From<PitchClassSet> for Vec<u8> {
    fn from(set: PitchClassSet) -> Self {
        set.chromas
    }
}

impl<'a> IntoIterator for &'a PitchClassSet {
    type Item = u8;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromas.iter().copied()
    }
}
