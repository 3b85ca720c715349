//! Integration tests for chord guessing over the built-in chord database.

use chord_guesser::{
    Chord, ChordGuess, ChordGuesser, ChordTypeIndex, ChordTypeRecord, GuessOptions, PitchError,
};
use lazy_static::lazy_static;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Notes listed bass first, with the symbol the best guess should print as
#[derive(Debug, Clone)]
struct Scenario {
    notes: Vec<&'static str>,
    expected: &'static str,
}

fn scenario(notes: &[&'static str], expected: &'static str) -> Scenario {
    Scenario {
        notes: notes.to_vec(),
        expected,
    }
}

lazy_static! {
    static ref SCENARIOS: Vec<Scenario> = vec![
        scenario(&["C", "E", "G"], "Cmaj"),
        scenario(&["A", "C", "E"], "Am"),
        scenario(&["G", "B", "D", "F"], "G7"),
        scenario(&["B", "D", "F"], "Bdim"),
        scenario(&["D", "F#", "A", "C#"], "Dmaj7"),
        scenario(&["C", "Eb", "Gb", "Bb"], "Cm7b5"),
        scenario(&["C", "F", "G"], "Csus4"),
        scenario(&["C", "E", "G#"], "Caug"),
        scenario(&["E", "G", "C"], "Cmaj/E"),
        scenario(&["E", "G", "B", "D"], "Em7"),
        scenario(&["C", "G"], "C5"),
    ];
}

fn guess(notes: &[&str]) -> Vec<ChordGuess> {
    Chord::guess(notes, GuessOptions::default()).unwrap()
}

#[test]
fn root_position_major_triad() {
    let guesses = guess(&["C", "E", "G"]);
    let best = &guesses[0];

    assert_eq!(best.chord.root().name(), "C");
    let symbols = best.chord.chord_type().symbols();
    assert!(symbols.iter().any(|s| s == "maj" || s == "M"), "{symbols:?}");
    assert_eq!(best.weight, 1.0);
    assert_eq!(best.chord.inversion(), Some(0));
}

#[test]
fn first_inversion_is_penalized() {
    let guesses = guess(&["E", "G", "C"]);
    let best = &guesses[0];

    assert_eq!(best.chord.root().name(), "C");
    assert_eq!(best.chord.bass().name(), "E");
    assert_eq!(best.chord.inversion(), Some(2));
    assert!(best.weight < 1.0);
    assert_eq!(best.chord.name().as_deref(), Some("C major over E"));
    assert_eq!(best.chord.to_string(), "Cmaj/E");
}

#[test]
fn major_seventh_beats_its_upper_triad() {
    let guesses = guess(&["C", "E", "G", "B"]);

    assert_eq!(guesses.len(), 2);
    assert!(guesses[0]
        .chord
        .chord_type()
        .name()
        .unwrap()
        .contains("major seventh"));
    assert_eq!(guesses[0].weight, 1.0);
    // the bass is read as an added tone under E minor
    assert_eq!(guesses[1].chord.to_string(), "Em/C");
    assert_eq!(guesses[1].chord.inversion(), None);
    assert_eq!(guesses[1].weight, 0.7);
}

#[test]
fn results_are_sorted_by_weight() {
    let guesses = guess(&["E", "G", "B", "D"]);
    let printed: Vec<String> = guesses.iter().map(|g| g.chord.to_string()).collect();

    assert_eq!(printed, ["Em7", "G6/E", "Gmaj/E"]);
    assert!(guesses.windows(2).all(|w| w[0].weight >= w[1].weight));
    assert_eq!(guesses[1].chord.inversion(), Some(4));
}

#[test]
fn root_position_survives_disallowed_inversions() {
    let guesser = ChordGuesser::builder().allow_inversions(false).build();

    let guesses = guesser.guess_names(&["C", "E", "G"]).unwrap();
    assert_eq!(guesses.len(), 1);
    assert_eq!(guesses[0].chord.to_string(), "Cmaj");

    assert!(guesser.guess_names(&["E", "G", "C"]).unwrap().is_empty());
}

#[test]
fn slash_bass_can_be_disallowed() {
    let guesser = ChordGuesser::builder().allow_slash(false).build();

    let guesses = guesser.guess_names(&["C", "E", "G", "B"]).unwrap();
    assert_eq!(guesses.len(), 1);
    assert_eq!(guesses[0].chord.to_string(), "Cmaj7");

    assert!(guesser.guess_names(&["E", "G", "C"]).unwrap().is_empty());
}

#[test]
fn omitted_fifth_is_tolerated_at_a_cost() {
    let guesses = guess(&["C", "E", "Bb"]);

    assert_eq!(guesses.len(), 1);
    let best = &guesses[0];
    assert_eq!(best.chord.to_string(), "C7");
    assert_eq!(best.weight, 0.9);
    let omitted: Vec<String> = best
        .chord
        .chord_type()
        .omissions()
        .unwrap()
        .iter()
        .map(|i| i.to_string())
        .collect();
    assert_eq!(omitted, ["P5"]);

    let strict = ChordGuesser::builder().allow_omissions(false).build();
    assert!(strict.guess_names(&["C", "E", "Bb"]).unwrap().is_empty());
}

#[test]
fn inverted_partial_type_pays_both_penalties() {
    let guesses = guess(&["E", "C", "Bb"]);

    assert_eq!(guesses.len(), 1);
    assert_eq!(guesses[0].chord.to_string(), "C7/E");
    assert_eq!(guesses[0].chord.inversion(), Some(2));
    assert_eq!(guesses[0].weight, 0.9 * 0.8);
}

#[test]
fn bass_on_an_omitted_tone_is_not_read_twice() {
    let guesses = guess(&["G", "C", "E", "Bb"]);

    assert_eq!(guesses.len(), 1);
    let best = &guesses[0];
    assert_eq!(best.chord.to_string(), "C7/G");
    assert!(!best.chord.chord_type().has_omissions());
    assert_eq!(best.chord.inversion(), Some(3));
    assert_eq!(best.weight, 0.8);
}

#[test]
fn octaves_and_doublings_collapse() {
    let guesses = guess(&["C3", "G3", "C4", "E4", "G4"]);

    assert_eq!(guesses.len(), 1);
    assert_eq!(guesses[0].chord.to_string(), "Cmaj");
    assert_eq!(guesses[0].weight, 1.0);
}

#[test]
fn midi_input_keeps_bass_order() {
    let guesser = ChordGuesser::new();

    let guesses = guesser.guess_midi(&[52, 55, 60]).unwrap();
    assert_eq!(guesses[0].chord.to_string(), "Cmaj/E");

    assert_eq!(
        guesser.guess_midi(&[60, 200]),
        Err(PitchError::MidiOutOfRange { value: 200 })
    );
}

#[test]
fn malformed_note_aborts_the_guess() {
    assert_eq!(
        Chord::guess(&["C", "H", "G"], GuessOptions::default()),
        Err(PitchError::InvalidName {
            input: "H".to_string()
        })
    );
}

#[test]
fn too_few_notes_give_no_chord() {
    assert!(guess(&[]).is_empty());
    assert!(guess(&["C"]).is_empty());
    // two notes are only read from the first one
    assert!(guess(&["G", "C"]).is_empty());
    assert_eq!(guess(&["C", "G"])[0].chord.to_string(), "C5");
}

#[test]
fn guessing_is_idempotent() {
    let notes = ["D", "F#", "A", "C", "E"];
    assert_eq!(guess(&notes), guess(&notes));
}

#[test]
fn injected_index_limits_the_vocabulary() {
    let records = [ChordTypeRecord::new("P1 m3 P5", "minor", "m")];
    let index = ChordTypeIndex::new(&records).unwrap();
    let guesser = ChordGuesser::builder().index(&index).build();

    assert!(guesser.guess_names(&["C", "E", "G"]).unwrap().is_empty());
    let guesses = guesser.guess_names(&["A", "C", "E"]).unwrap();
    assert_eq!(guesses.len(), 1);
    assert_eq!(guesses[0].chord.to_string(), "Am");
}

#[test]
fn scenarios_from_many_threads() {
    let failures: Vec<String> = SCENARIOS
        .par_iter()
        .filter_map(|sc| {
            let guesser = ChordGuesser::new();
            let guesses = guesser.guess_names(&sc.notes).unwrap();
            let actual = guesses.first().map(|g| g.chord.to_string());
            if actual.as_deref() == Some(sc.expected) {
                None
            } else {
                Some(format!(
                    "notes {:?}: expected {}, got {:?}",
                    sc.notes, sc.expected, actual
                ))
            }
        })
        .collect();

    assert!(
        failures.is_empty(),
        "{} chord scenarios failed:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn global_index_is_shared() {
    let addresses: Vec<usize> = SCENARIOS
        .par_iter()
        .map(|_| ChordTypeIndex::global() as *const ChordTypeIndex as usize)
        .collect();

    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}
