//! Chord types
//!
//! A trie over every chord interval pattern in a database, with side maps
//! for lookup by semitone signature, name, symbol and pitch-class-set
//! fingerprint. Optional tones are expanded when the index is built, so a
//! voicing missing them still resolves to its chord type.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::Hash;

use itertools::Itertools;
use lazy_static::lazy_static;
use log::debug;

use crate::chord::ChordError;
use crate::chord_data::CHORD_TYPES;
use crate::interval::Interval;
use crate::pcset::PitchClassSet;

/// Suffix marking an interval token as omittable
const OPTIONAL_MARKER: char = '*';

/// Arena position of the trie root (the unison)
const ROOT: NodeId = 0;

lazy_static! {
    static ref GLOBAL_INDEX: ChordTypeIndex =
        ChordTypeIndex::new(CHORD_TYPES).expect("built-in chord database is well-formed");
}

/// Position of a node inside a [`ChordTypeIndex`].
pub type NodeId = usize;

/// One database row: interval pattern, full name and symbols.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChordTypeRecord<'a> {
    /// Space-separated interval tokens; a trailing `*` marks an optional tone.
    pub intervals: &'a str,
    /// Full name, e.g. `major seventh`.
    pub name: &'a str,
    /// Space-separated symbols, canonical first.
    pub symbols: &'a str,
}

impl<'a> ChordTypeRecord<'a> {
    /// Bundle a database row.
    pub const fn new(intervals: &'a str, name: &'a str, symbols: &'a str) -> Self {
        ChordTypeRecord {
            intervals,
            name,
            symbols,
        }
    }
}

/// A chord shape: intervals above a root, plus the name and symbols it is
/// known by when it came from a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordType {
    intervals: Vec<Interval>,
    name: Option<String>,
    symbols: Vec<String>,
    omissions: Option<Vec<Interval>>,
    pcset: PitchClassSet,
}

impl ChordType {
    /// An unnamed chord type for a shape no database describes.
    pub fn from_intervals(mut intervals: Vec<Interval>) -> Self {
        intervals.sort_by_key(Interval::semitones);
        Self::build(intervals, None, Vec::new(), None)
    }

    fn build(
        intervals: Vec<Interval>,
        name: Option<String>,
        symbols: Vec<String>,
        omissions: Option<Vec<Interval>>,
    ) -> Self {
        let pcset = PitchClassSet::from_valid(intervals.iter().map(Interval::chroma));
        ChordType {
            intervals,
            name,
            symbols,
            omissions,
            pcset,
        }
    }

    /// Intervals above the root, ascending by size.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Full name, if the type came from a database.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Symbols, canonical first; empty for ad-hoc types.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Tones this variant leaves out of the full database pattern.
    pub fn omissions(&self) -> Option<&[Interval]> {
        self.omissions.as_deref()
    }

    /// True when this is a partial voicing of a database pattern.
    pub fn has_omissions(&self) -> bool {
        self.omissions.is_some()
    }

    /// True when the type came from a database.
    pub fn is_known(&self) -> bool {
        self.name.is_some()
    }

    /// Chromas of the intervals, anchored at 0.
    pub fn pitch_class_set(&self) -> &PitchClassSet {
        &self.pcset
    }

    /// Fingerprint of the root-anchored pitch-class set.
    pub fn binary(&self) -> u16 {
        self.pcset.binary()
    }

    /// Comma-joined semitone sizes, e.g. `0,4,7,11`.
    pub fn signature(&self) -> String {
        signature(&self.intervals)
    }
}

/// A node of the chord-type trie.
///
/// The edge into a node is keyed by its semitone distance from the parent,
/// so shapes sharing lower intervals share a path. Only nodes where some
/// pattern ends carry a chord type.
#[derive(Debug, Clone)]
pub struct ChordTypeNode {
    step: u8,
    intervals: Vec<Interval>,
    chord_type: Option<ChordType>,
    children: BTreeMap<u8, NodeId>,
}

impl ChordTypeNode {
    fn new(step: u8, intervals: Vec<Interval>) -> Self {
        ChordTypeNode {
            step,
            intervals,
            chord_type: None,
            children: BTreeMap::new(),
        }
    }

    /// Semitones from the parent node; 0 for the root.
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Intervals along the path from the root, ascending.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// The chord type registered here, if a pattern ends at this node.
    pub fn chord_type(&self) -> Option<&ChordType> {
        self.chord_type.as_ref()
    }

    /// Full name of the registered chord type.
    pub fn name(&self) -> Option<&str> {
        self.chord_type.as_ref().and_then(ChordType::name)
    }

    /// Symbols of the registered chord type.
    pub fn symbols(&self) -> &[String] {
        match &self.chord_type {
            Some(chord_type) => &chord_type.symbols,
            None => &[],
        }
    }

    /// Omitted tones of the registered chord type.
    pub fn omissions(&self) -> Option<&[Interval]> {
        self.chord_type.as_ref().and_then(ChordType::omissions)
    }

    /// Fingerprint of the path's pitch-class set.
    pub fn binary(&self) -> u16 {
        PitchClassSet::from_valid(self.intervals.iter().map(Interval::chroma)).binary()
    }

    /// Child node reached by an edge of `step` semitones.
    pub fn child(&self, step: u8) -> Option<NodeId> {
        self.children.get(&step).copied()
    }

    /// Edges to children as `(step, node)`, ascending by step.
    pub fn children(&self) -> impl Iterator<Item = (u8, NodeId)> + '_ {
        self.children.iter().map(|(&step, &id)| (step, id))
    }

    fn is_partial(&self) -> bool {
        self.chord_type
            .as_ref()
            .is_none_or(ChordType::has_omissions)
    }
}

/// Chord-type trie plus signature, name, symbol and fingerprint maps.
///
/// Built once and read-only afterwards, so it can be shared freely between
/// threads. [`ChordTypeIndex::global`] holds the one built from the
/// built-in database.
#[derive(Debug, Clone)]
pub struct ChordTypeIndex {
    nodes: Vec<ChordTypeNode>,
    by_signature: HashMap<String, NodeId>,
    by_name: HashMap<String, NodeId>,
    by_symbol: HashMap<String, NodeId>,
    by_binary: HashMap<u16, NodeId>,
}

impl ChordTypeIndex {
    /// Build an index from database records.
    ///
    /// Each record with `k` optional tones registers `2^k` patterns, the
    /// complete one first. A complete pattern is never displaced by a
    /// partial one; otherwise the first registration of a key wins.
    ///
    /// Returns:
    /// - `Err(ChordError::Interval)` for a malformed interval token.
    /// - `Err(ChordError::EmptyPattern)` for a record without tokens.
    /// - `Err(ChordError::DescendingInterval)` for a token below the root.
    pub fn new(records: &[ChordTypeRecord<'_>]) -> Result<Self, ChordError> {
        let mut index = ChordTypeIndex {
            nodes: vec![ChordTypeNode::new(0, vec![unison()])],
            by_signature: HashMap::new(),
            by_name: HashMap::new(),
            by_symbol: HashMap::new(),
            by_binary: HashMap::new(),
        };
        for record in records {
            index.insert_record(record)?;
        }
        debug!(
            "built chord type index: {} records, {} nodes, {} chord types",
            records.len(),
            index.node_count(),
            index.len()
        );
        Ok(index)
    }

    /// The index over the built-in database, built on first use.
    pub fn global() -> &'static ChordTypeIndex {
        &GLOBAL_INDEX
    }

    fn insert_record(&mut self, record: &ChordTypeRecord<'_>) -> Result<(), ChordError> {
        let (optional, mandatory): (Vec<&str>, Vec<&str>) = record
            .intervals
            .split_whitespace()
            .partition(|token| token.ends_with(OPTIONAL_MARKER));
        if optional.is_empty() && mandatory.is_empty() {
            return Err(ChordError::EmptyPattern {
                name: record.name.to_string(),
            });
        }
        let mandatory = mandatory
            .into_iter()
            .map(Interval::from_name)
            .collect::<Result<Vec<_>, _>>()?;
        let optional = optional
            .into_iter()
            .map(|token| Interval::from_name(token.trim_end_matches(OPTIONAL_MARKER)))
            .collect::<Result<Vec<_>, _>>()?;
        let symbols: Vec<String> = record.symbols.split_whitespace().map(String::from).collect();

        // powerset() starts from the empty subset; walk it backwards so the
        // complete pattern registers before its partial voicings
        let subsets = (0..optional.len()).powerset().collect_vec();
        for chosen in subsets.into_iter().rev() {
            let mut intervals = mandatory.clone();
            intervals.extend(chosen.iter().map(|&i| optional[i]));
            intervals.sort_by_key(Interval::semitones);
            let omitted: Vec<Interval> = (0..optional.len())
                .filter(|i| !chosen.contains(i))
                .map(|i| optional[i])
                .collect();

            let id = self.insert_path(&intervals, record.name)?;
            let chord_type = ChordType::build(
                intervals,
                Some(record.name.to_string()),
                symbols.clone(),
                (!omitted.is_empty()).then_some(omitted),
            );
            self.register(id, chord_type);
        }
        Ok(())
    }

    /// Follow or create the trie path for ascending `intervals`.
    fn insert_path(&mut self, intervals: &[Interval], name: &str) -> Result<NodeId, ChordError> {
        let mut current = ROOT;
        let mut previous = 0;
        for (position, interval) in intervals.iter().enumerate() {
            let semitones = interval.semitones();
            if semitones < 0 {
                return Err(ChordError::DescendingInterval {
                    name: name.to_string(),
                    interval: *interval,
                });
            }
            let step = (semitones - previous) as u8;
            previous = semitones;
            // the unison (or an enharmonic duplicate) stays on the same node
            if step == 0 {
                continue;
            }
            current = match self.nodes[current].child(step) {
                Some(child) => child,
                None => {
                    let id = self.nodes.len();
                    self.nodes
                        .push(ChordTypeNode::new(step, intervals[..=position].to_vec()));
                    self.nodes[current].children.insert(step, id);
                    id
                }
            };
        }
        Ok(current)
    }

    fn register(&mut self, id: NodeId, chord_type: ChordType) {
        let node = &mut self.nodes[id];
        if !node.is_partial() || (node.chord_type.is_some() && chord_type.has_omissions()) {
            // a complete shape owned by another record still answers to this name
            if !chord_type.has_omissions() {
                self.claim_labels(id, chord_type.name, chord_type.symbols);
            }
            return;
        }
        let signature = chord_type.signature();
        let binary = chord_type.binary();
        let name = chord_type.name.clone();
        let symbols = chord_type.symbols.clone();
        node.chord_type = Some(chord_type);

        claim(&mut self.by_signature, &self.nodes, signature, id);
        claim(&mut self.by_binary, &self.nodes, binary, id);
        self.claim_labels(id, name, symbols);
    }

    fn claim_labels(&mut self, id: NodeId, name: Option<String>, symbols: Vec<String>) {
        if let Some(name) = name {
            claim(&mut self.by_name, &self.nodes, name, id);
        }
        for symbol in symbols {
            claim(&mut self.by_symbol, &self.nodes, symbol, id);
        }
    }

    fn lookup(&self, id: Option<&NodeId>) -> Option<&ChordType> {
        id.and_then(|&id| self.nodes[id].chord_type.as_ref())
    }

    /// Chord type whose root-anchored pitch-class set has this fingerprint.
    pub fn find_by_binary(&self, binary: u16) -> Option<&ChordType> {
        self.lookup(self.by_binary.get(&binary))
    }

    /// Chord type known by this symbol, e.g. `m7b5`.
    pub fn find_by_symbol(&self, symbol: &str) -> Option<&ChordType> {
        self.lookup(self.by_symbol.get(symbol))
    }

    /// Chord type with this full name, e.g. `dominant seventh`.
    pub fn find_by_name(&self, name: &str) -> Option<&ChordType> {
        self.lookup(self.by_name.get(name))
    }

    /// Chord type with exactly these intervals, in any order.
    pub fn find_by_intervals(&self, intervals: &[Interval]) -> Option<&ChordType> {
        let sorted = intervals
            .iter()
            .copied()
            .sorted_by_key(Interval::semitones)
            .collect_vec();
        self.lookup(self.by_signature.get(&signature(&sorted)))
    }

    /// Resolve a textual key: semitone signature (`0,4,7`), then symbol,
    /// then name, then a numeric fingerprint.
    ///
    /// `allow_omissions` only filters signature matches; symbol, name and
    /// fingerprint matches are returned as found.
    pub fn find(&self, key: &str, allow_omissions: bool) -> Option<&ChordType> {
        if let Some(chord_type) = self.lookup(self.by_signature.get(key)) {
            if allow_omissions || !chord_type.has_omissions() {
                return Some(chord_type);
            }
        }
        self.find_by_symbol(key)
            .or_else(|| self.find_by_name(key))
            .or_else(|| key.parse::<u16>().ok().and_then(|b| self.find_by_binary(b)))
    }

    /// Breadth-first walk collecting every node whose name contains `key`,
    /// whose symbols include `key`, or whose fingerprint `key` spells.
    pub fn search(&self, key: &str) -> Vec<&ChordTypeNode> {
        let binary = key.parse::<u16>().ok();
        let mut found = Vec::new();
        let mut queue = VecDeque::from([ROOT]);
        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id];
            if let Some(chord_type) = &node.chord_type {
                let by_name = !key.is_empty() && chord_type.name().is_some_and(|n| n.contains(key));
                let by_symbol = chord_type.symbols.iter().any(|s| s == key);
                let by_binary = binary == Some(chord_type.binary());
                if by_name || by_symbol || by_binary {
                    found.push(node);
                }
            }
            queue.extend(node.children.values().copied());
        }
        found
    }

    /// The trie root, standing for the unison.
    pub fn root(&self) -> &ChordTypeNode {
        &self.nodes[ROOT]
    }

    /// Node at an arena position.
    pub fn node(&self, id: NodeId) -> Option<&ChordTypeNode> {
        self.nodes.get(id)
    }

    /// Every registered chord type, complete and partial, in trie-arena order.
    pub fn iter(&self) -> impl Iterator<Item = &ChordType> + '_ {
        self.nodes.iter().filter_map(ChordTypeNode::chord_type)
    }

    /// Number of registered chord types.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of trie nodes, including the root and unnamed path nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Point `key` at `id` unless it already names a complete chord type, or
/// both are partial and the earlier one got there first.
fn claim<K: Eq + Hash>(map: &mut HashMap<K, NodeId>, nodes: &[ChordTypeNode], key: K, id: NodeId) {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(id);
        }
        Entry::Occupied(mut slot) => {
            if nodes[*slot.get()].is_partial() && !nodes[id].is_partial() {
                slot.insert(id);
            }
        }
    }
}

fn signature(intervals: &[Interval]) -> String {
    intervals.iter().map(Interval::semitones).join(",")
}

fn unison() -> Interval {
    Interval::from_alteration(1, 0)
}
