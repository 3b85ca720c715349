//! # chord_guesser
//!
//! Music-theory primitives and chord recognition: spell pitches and
//! intervals, work with pitch-class sets, look chord types up in a trie
//! index, and guess which chords a handful of sounding notes spell.
//!
//! ## Example
//! ```rust
//! use chord_guesser::{Chord, ChordGuesser, ChordTypeIndex, GuessOptions, PitchClassSet};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1) Guess from note names, bass first
//!     let guesses = Chord::guess(&["E", "G", "C"], GuessOptions::default())?;
//!     let best = &guesses[0];
//!     println!("{} (weight {:.2})", best.chord, best.weight); // Cmaj/E
//!
//!     // 2) Or configure a guesser
//!     let guesser = ChordGuesser::builder()
//!         .allow_slash(false)
//!         .build();
//!     let root_position = guesser.guess_midi(&[60, 64, 67, 71])?;
//!     assert_eq!(root_position[0].chord.to_string(), "Cmaj7");
//!
//!     // 3) Look chord types up directly
//!     let index = ChordTypeIndex::global();
//!     let maj7 = index.find("maj7", true).expect("known symbol");
//!     assert_eq!(maj7.name(), Some("major seventh"));
//!
//!     // 4) Set theory
//!     let set = PitchClassSet::new([0, 1, 4, 6])?;
//!     assert!(set.is_z_related(&PitchClassSet::new([0, 1, 3, 7])?));
//!
//!     Ok(())
//! }
//! # run().unwrap();
//! ```
//!
//! ## Features
//! - `serde`: `Serialize`/`Deserialize` for the value types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// Chord values and symbol parsing.
pub use chord::{Chord, ChordError};

/// Chord guessing API.
pub use chord_guesser::{ChordGuess, ChordGuesser, ChordGuesserBuilder, GuessOptions};

/// Chord-type trie index.
pub use chord_type::{ChordType, ChordTypeIndex, ChordTypeNode, ChordTypeRecord, NodeId};

/// Intervals.
pub use interval::{Interval, IntervalError, Quality};

/// Pitch-class sets.
pub use pcset::PitchClassSet;

/// Pitch classes and notes.
pub use pitch::{Letter, Note, PitchClass, PitchError, Pitched};

/// Chord module.
pub mod chord;

/// Built-in chord-type database.
pub mod chord_data;

/// Chord guessing module.
pub mod chord_guesser;

/// Chord-type index module.
pub mod chord_type;

/// Interval module.
pub mod interval;

/// Pitch-class set module.
pub mod pcset;

/// Pitch module.
pub mod pitch;
