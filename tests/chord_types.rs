//! Integration tests for building and querying chord-type indices.

use chord_guesser::{
    Chord, ChordError, ChordType, ChordTypeIndex, ChordTypeRecord, Interval, IntervalError,
    PitchClass,
};

fn intervals(names: &[&str]) -> Vec<Interval> {
    names.iter().map(|n| Interval::from_name(n).unwrap()).collect()
}

fn names(intervals: &[Interval]) -> Vec<String> {
    intervals.iter().map(Interval::to_string).collect()
}

#[test]
fn major_seventh_by_symbol() {
    let maj7 = ChordTypeIndex::global().find("maj7", true).unwrap();

    assert!(maj7.symbols().iter().any(|s| s == "maj7"));
    assert_eq!(maj7.intervals().len(), 4);
    assert_eq!(names(maj7.intervals()), ["P1", "M3", "P5", "M7"]);
    let semitones: Vec<i32> = maj7.intervals().iter().map(Interval::semitones).collect();
    assert_eq!(semitones, [0, 4, 7, 11]);
    assert!(!maj7.has_omissions());
}

#[test]
fn find_tries_signature_symbol_name_then_binary() {
    let index = ChordTypeIndex::global();

    assert_eq!(index.find("0,4,7,10", false).unwrap().name(), Some("dominant seventh"));
    assert_eq!(index.find("m7b5", false).unwrap().name(), Some("half-diminished"));
    assert_eq!(index.find("minor sixth", false).unwrap().symbols()[0], "m6");
    // C, E and G set bits 0, 4 and 7
    assert_eq!(index.find("145", false).unwrap().name(), Some("major"));
    assert!(index.find("no such chord", true).is_none());
}

#[test]
fn omission_filter_only_guards_signatures() {
    let index = ChordTypeIndex::global();

    let partial = index.find("0,4,10", true).unwrap();
    assert_eq!(partial.name(), Some("dominant seventh"));
    assert_eq!(names(partial.omissions().unwrap()), ["P5"]);
    assert!(index.find("0,4,10", false).is_none());

    // the same partial voicing by fingerprint is not filtered
    let by_binary = index.find("1041", false).unwrap();
    assert!(by_binary.has_omissions());
    assert_eq!(by_binary, partial);
}

#[test]
fn optional_tones_expand_to_every_subset() {
    let records = [ChordTypeRecord::new("P1 M3 P5* m7*", "dominant seventh", "7")];
    let index = ChordTypeIndex::new(&records).unwrap();

    assert_eq!(index.len(), 4);
    let full = index.find("0,4,7,10", true).unwrap();
    assert!(full.omissions().is_none());
    assert_eq!(names(index.find("0,4,7", true).unwrap().omissions().unwrap()), ["m7"]);
    assert_eq!(names(index.find("0,4,10", true).unwrap().omissions().unwrap()), ["P5"]);
    assert_eq!(
        names(index.find("0,4", true).unwrap().omissions().unwrap()),
        ["P5", "m7"]
    );
    // name and symbol resolve to the complete pattern
    assert_eq!(index.find_by_symbol("7"), Some(full));
    assert_eq!(index.find_by_name("dominant seventh"), Some(full));
}

#[test]
fn shared_prefixes_reuse_nodes() {
    let records = [
        ChordTypeRecord::new("P1 M3 P5", "major", "maj"),
        ChordTypeRecord::new("P1 M3 P5 m7", "dominant seventh", "7"),
        ChordTypeRecord::new("P1 M3 P5 M7", "major seventh", "maj7"),
    ];
    let index = ChordTypeIndex::new(&records).unwrap();

    // root, M3, P5, m7, M7
    assert_eq!(index.node_count(), 5);
    assert_eq!(index.len(), 3);

    let third = index.node(index.root().child(4).unwrap()).unwrap();
    assert!(third.chord_type().is_none());
    assert_eq!(names(third.intervals()), ["P1", "M3"]);
    let fifth = index.node(third.child(3).unwrap()).unwrap();
    assert_eq!(fifth.name(), Some("major"));
    let steps: Vec<u8> = fifth.children().map(|(step, _)| step).collect();
    assert_eq!(steps, [3, 4]);
}

#[test]
fn complete_type_takes_over_a_partial_node() {
    let records = [
        ChordTypeRecord::new("P1 M3 P5* m7", "dominant seventh", "7"),
        ChordTypeRecord::new("P1 M3 m7", "italian sixth", "It+6"),
    ];
    let index = ChordTypeIndex::new(&records).unwrap();

    let shell = index.find_by_intervals(&intervals(&["m7", "P1", "M3"])).unwrap();
    assert_eq!(shell.name(), Some("italian sixth"));
    assert!(!shell.has_omissions());
    assert_eq!(index.find_by_binary(shell.binary()), Some(shell));
    assert_eq!(index.find_by_symbol("7").unwrap().intervals().len(), 4);

    // in the other order the complete type is never displaced
    let reversed = [records[1], records[0]];
    let index = ChordTypeIndex::new(&reversed).unwrap();
    assert_eq!(index.find_by_binary(1041).unwrap().name(), Some("italian sixth"));
}

#[test]
fn duplicate_shape_names_lead_to_the_complete_node() {
    let records = [
        ChordTypeRecord::new("P1 M3 P5 m7", "dominant seventh", "7"),
        ChordTypeRecord::new("P1 M3 P5* m7", "seventh alias", "7alias"),
    ];
    let index = ChordTypeIndex::new(&records).unwrap();

    for found in [
        index.find_by_name("seventh alias").unwrap(),
        index.find_by_symbol("7alias").unwrap(),
    ] {
        assert_eq!(found.signature(), "0,4,7,10");
        assert!(!found.has_omissions());
        assert_eq!(found.name(), Some("dominant seventh"));
    }
    // the shell voicing is still registered under the alias
    assert_eq!(index.find("0,4,10", true).unwrap().name(), Some("seventh alias"));
}

#[test]
fn malformed_records_fail_construction() {
    let bad_token = [ChordTypeRecord::new("P1 Q3", "bogus", "b")];
    assert_eq!(
        ChordTypeIndex::new(&bad_token).unwrap_err(),
        ChordError::Interval(IntervalError::InvalidFormat {
            input: "Q3".to_string()
        })
    );

    let empty = [ChordTypeRecord::new("  ", "empty", "e")];
    assert_eq!(
        ChordTypeIndex::new(&empty).unwrap_err(),
        ChordError::EmptyPattern {
            name: "empty".to_string()
        }
    );

    let descending = [ChordTypeRecord::new("P1 -M3", "down", "d")];
    assert!(matches!(
        ChordTypeIndex::new(&descending),
        Err(ChordError::DescendingInterval { .. })
    ));
}

#[test]
fn search_walks_the_whole_trie() {
    let index = ChordTypeIndex::global();

    let sevenths = index.search("seventh");
    assert!(!sevenths.is_empty());
    assert!(sevenths.iter().all(|n| n.name().unwrap().contains("seventh")));
    assert!(sevenths.iter().any(|n| n.name() == Some("major seventh")));

    let half_diminished = index.search("ø");
    assert_eq!(half_diminished.len(), 1);
    assert_eq!(half_diminished[0].name(), Some("half-diminished"));

    assert!(index.search("145").iter().any(|n| n.name() == Some("major")));
    assert!(index.search("").is_empty());
}

#[test]
fn ad_hoc_types_have_no_name() {
    let cluster = ChordType::from_intervals(intervals(&["M2", "P1", "m2"]));
    let chord = Chord::new(PitchClass::from_name("C").unwrap(), cluster);

    assert!(!chord.chord_type().is_known());
    assert_eq!(chord.name(), None);
    assert!(chord.symbols().is_empty());
    assert_eq!(chord.to_string(), "C(P1 m2 M2)");
    assert_eq!(chord.inversion(), Some(0));
}
