//! Built-in chord-type database
//!
//! One record per chord type: space-separated interval tokens (a trailing
//! `*` marks a tone real voicings may leave out), the full name, and
//! space-separated symbols with the canonical one first.

use crate::chord_type::ChordTypeRecord;

/// Every chord type the global index knows, in registration order.
pub const CHORD_TYPES: &[ChordTypeRecord<'static>] = &[
    // major
    ChordTypeRecord::new("P1 M3 P5",             "major",                          "maj M ^"),
    ChordTypeRecord::new("P1 M3 P5* M7",         "major seventh",                  "maj7 M7 Δ ^7"),
    ChordTypeRecord::new("P1 M3 P5* M7 M9",      "major ninth",                    "maj9 M9 ^9"),
    ChordTypeRecord::new("P1 M3 P5* M7 M9* M13", "major thirteenth",               "maj13 M13 ^13"),
    ChordTypeRecord::new("P1 M3 P5 M6",          "sixth",                          "6 add6 M6"),
    ChordTypeRecord::new("P1 M3 P5* M6 M9",      "sixth added ninth",              "6/9 69"),
    ChordTypeRecord::new("P1 M3 P5 M9",          "added ninth",                    "add9 2"),
    ChordTypeRecord::new("P1 M3 P5 M7 A11",      "lydian",                         "maj7#11 M7#11 ^7#11"),
    ChordTypeRecord::new("P1 M3 d5",             "major flat five",                "Mb5 majb5"),
    ChordTypeRecord::new("P1 M3 A5",             "augmented",                      "aug + +5"),
    ChordTypeRecord::new("P1 M3 A5 M7",          "augmented major seventh",        "maj7#5 +maj7 M7#5"),
    // dominant
    ChordTypeRecord::new("P1 M3 P5* m7",         "dominant seventh",               "7 dom"),
    ChordTypeRecord::new("P1 M3 P5* m7 M9",      "dominant ninth",                 "9"),
    ChordTypeRecord::new("P1 M3 P5* m7 M9* M13", "dominant thirteenth",            "13"),
    ChordTypeRecord::new("P1 P5* m7 M9 P11",     "eleventh",                       "11"),
    ChordTypeRecord::new("P1 M3 d5 m7",          "dominant flat five",             "7b5"),
    ChordTypeRecord::new("P1 M3 A5 m7",          "augmented seventh",              "7#5 +7 7+"),
    ChordTypeRecord::new("P1 M3 P5* m7 m9",      "dominant flat ninth",            "7b9"),
    ChordTypeRecord::new("P1 M3 P5* m7 A9",      "dominant sharp ninth",           "7#9"),
    ChordTypeRecord::new("P1 M3 P5* m7 A11",     "lydian dominant seventh",        "7#11"),
    ChordTypeRecord::new("P1 M3 P5* m7 m13",     "dominant flat thirteenth",       "7b13"),
    // minor
    ChordTypeRecord::new("P1 m3 P5",             "minor",                          "m min -"),
    ChordTypeRecord::new("P1 m3 P5* m7",         "minor seventh",                  "m7 min7 mi7 -7"),
    ChordTypeRecord::new("P1 m3 P5* M7",         "minor major seventh",            "mMaj7 mM7 -^7"),
    ChordTypeRecord::new("P1 m3 P5 M6",          "minor sixth",                    "m6 -6"),
    ChordTypeRecord::new("P1 m3 P5* M6 M9",      "minor sixth added ninth",        "m69 m6/9 -69"),
    ChordTypeRecord::new("P1 m3 P5 M9",          "minor added ninth",              "madd9 m(add9)"),
    ChordTypeRecord::new("P1 m3 P5* m7 M9",      "minor ninth",                    "m9 -9"),
    ChordTypeRecord::new("P1 m3 P5* M7 M9",      "minor major ninth",              "mMaj9 -^9"),
    ChordTypeRecord::new("P1 m3 P5* m7 M9* P11", "minor eleventh",                 "m11 -11"),
    ChordTypeRecord::new("P1 m3 P5* m7 M9* M13", "minor thirteenth",               "m13 -13"),
    // diminished
    ChordTypeRecord::new("P1 m3 d5",             "diminished",                     "dim ° o"),
    ChordTypeRecord::new("P1 m3 d5 d7",          "diminished seventh",             "dim7 °7 o7"),
    ChordTypeRecord::new("P1 m3 d5 m7",          "half-diminished",                "m7b5 ø -7b5"),
    ChordTypeRecord::new("P1 m3 d5 m7 M9",       "half-diminished ninth",          "m9b5 ø9"),
    // suspended
    ChordTypeRecord::new("P1 P4 P5",             "suspended fourth",               "sus4 sus"),
    ChordTypeRecord::new("P1 M2 P5",             "suspended second",               "sus2"),
    ChordTypeRecord::new("P1 P4 P5 m7",          "suspended fourth seventh",       "7sus4 7sus"),
    ChordTypeRecord::new("P1 P4 P5* m7 M9",      "suspended fourth ninth",         "9sus4 9sus"),
    // other
    ChordTypeRecord::new("P1 P5",                "fifth",                          "5"),
];
