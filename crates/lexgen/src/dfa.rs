//! # Deterministic Finite Automata
//!
//! Subset construction over [`Nfa`] graphs, producing a dense columnar
//! transition table the lexer steps through one character at a time.
//!
//! ## Representation
//!
//! Each DFA state remembers the sorted group of NFA arena indices it
//! stands for; sorted groups make set equality plain slice equality, so a
//! `HashMap` keyed on the group deduplicates states during construction.
//! Transitions live outside the states, as one column `Vec<u32>` per
//! alphabet character, indexed by source state position.

use std::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::PatternError;
use crate::nfa::Nfa;
use crate::regex::to_prefix;

#[derive(Debug, Clone)]
struct DfaState {
    id: u32,
    /// Sorted NFA arena indices this state stands for.
    group: SmallVec<[u32; 8]>,
    initial: bool,
    accepting: bool,
}

/// A deterministic finite automaton produced by subset construction.
#[derive(Clone)]
pub struct Dfa {
    states: Vec<DfaState>,
    /// Per-character transition columns, parallel to `states`.
    columns: HashMap<char, Vec<u32>, ahash::RandomState>,
}

impl Dfa {
    /// Determinize an NFA.
    ///
    /// The start state (epsilon closure of the NFA's entry node) lands at
    /// index 0. Characters outside an NFA group's reach go to the empty
    /// group, a non-accepting sink from which nothing is reachable.
    #[must_use]
    pub fn from_nfa(nfa: &Nfa) -> Self {
        if nfa.state_count() == 0 {
            return Self {
                states: vec![DfaState {
                    id: 0,
                    group: SmallVec::new(),
                    initial: true,
                    accepting: false,
                }],
                columns: HashMap::default(),
            };
        }

        let alphabet: Vec<char> = nfa.alphabet().into_iter().collect();
        let start = nfa.epsilon_closure(&[0]);

        let mut states = Vec::new();
        let mut index_of: HashMap<SmallVec<[u32; 8]>, u32, ahash::RandomState> =
            HashMap::default();
        let mut columns: HashMap<char, Vec<u32>, ahash::RandomState> = alphabet
            .iter()
            .map(|&c| (c, Vec::new()))
            .collect();

        index_of.insert(start.clone(), 0);
        states.push(DfaState {
            id: 0,
            group: start,
            initial: true,
            accepting: false,
        });

        let mut current = 0;
        while current < states.len() {
            let group = states[current].group.clone();
            states[current].accepting = group
                .iter()
                .any(|&index| nfa.node(index).accepting);
            for &c in &alphabet {
                let mut seeds: SmallVec<[u32; 8]> = SmallVec::new();
                for &index in &group {
                    seeds.extend(nfa.char_successors(index, c));
                }
                let target_group = if seeds.is_empty() {
                    SmallVec::new()
                } else {
                    nfa.epsilon_closure(&seeds)
                };
                let target = *index_of.entry(target_group.clone()).or_insert_with(|| {
                    let fresh = u32::try_from(states.len()).unwrap_or(0);
                    states.push(DfaState {
                        id: fresh,
                        group: target_group,
                        initial: false,
                        accepting: false,
                    });
                    fresh
                });
                if let Some(column) = columns.get_mut(&c) {
                    column.push(target);
                }
            }
            current += 1;
        }

        Self { states, columns }
    }

    /// Build a DFA from a prefix-form expression string.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the prefix expression is malformed.
    pub fn from_prefix(prefix: &str) -> Result<Self, PatternError> {
        Ok(Self::from_nfa(&Nfa::from_prefix(prefix)?))
    }

    /// Build a DFA from infix regex source.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern is malformed.
    pub fn from_pattern(pattern: &str) -> Result<Self, PatternError> {
        Self::from_prefix(&to_prefix(pattern)?)
    }

    /// Number of states, sink included once discovered.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// All state identities, construction order.
    #[must_use]
    pub fn states(&self) -> Vec<u32> {
        self.states.iter().map(|state| state.id).collect()
    }

    /// Identity of the start state.
    #[must_use]
    pub fn initial_state(&self) -> u32 {
        self.states
            .iter()
            .find(|state| state.initial)
            .map_or(0, |state| state.id)
    }

    /// Whether the state with the given identity accepts.
    #[must_use]
    pub fn is_accepting(&self, id: u32) -> bool {
        self.states
            .iter()
            .any(|state| state.id == id && state.accepting)
    }

    /// The successor identity from `from` on `on`, if `on` is in the
    /// alphabet.
    #[must_use]
    pub fn next(&self, from: u32, on: char) -> Option<u32> {
        let index = self.states.iter().position(|state| state.id == from)?;
        let column = self.columns.get(&on)?;
        let target = column[index] as usize;
        Some(self.states[target].id)
    }

    /// Remap every state identity through `f`, preserving the table.
    ///
    /// `f` must be injective for the result to be well formed.
    #[must_use]
    pub fn map<F: Fn(u32) -> u32>(&self, f: F) -> Self {
        let mut states = self.states.clone();
        for state in &mut states {
            state.id = f(state.id);
        }
        Self {
            states,
            columns: self.columns.clone(),
        }
    }

    /// Whole-string acceptance by table walk.
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = 0usize;
        for c in input.chars() {
            let Some(next) = self.step(current, c) else {
                return false;
            };
            current = next;
        }
        self.states[current].accepting
    }

    /// Whether any transition column exists for `c`.
    pub(crate) fn in_alphabet(&self, c: char) -> bool {
        self.columns.contains_key(&c)
    }

    /// Table step by position: the successor index of `from` on `c`, or
    /// `None` when `c` is outside the alphabet.
    pub(crate) fn step(&self, from: usize, c: char) -> Option<usize> {
        self.columns.get(&c).map(|column| column[from] as usize)
    }

    pub(crate) fn is_index_accepting(&self, index: usize) -> bool {
        self.states[index].accepting
    }

    /// The NFA arena indices behind the state at `index`.
    pub(crate) fn group_of(&self, index: usize) -> &[u32] {
        &self.states[index].group
    }
}

impl fmt::Debug for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, state) in self.states.iter().enumerate() {
            let marker = if state.accepting { "*" } else { "" };
            writeln!(f, "{index}{marker} {:?}", state.group.as_slice())?;
        }
        let mut alphabet: Vec<&char> = self.columns.keys().collect();
        alphabet.sort_unstable();
        for c in alphabet {
            writeln!(f, "    {c:?}: {:?}", self.columns[c])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matches_simple_patterns() {
        let dfa = Dfa::from_pattern("(a|b)*c").unwrap();
        assert!(dfa.accepts("c"));
        assert!(dfa.accepts("ababc"));
        assert!(!dfa.accepts("ab"));
        assert!(!dfa.accepts("cc"));
    }

    #[test]
    fn range_sugar_covers_exactly_its_span() {
        let dfa = Dfa::from_pattern("[a-c]").unwrap();
        assert!(dfa.accepts("a"));
        assert!(dfa.accepts("b"));
        assert!(dfa.accepts("c"));
        assert!(!dfa.accepts("d"));
        assert!(!dfa.accepts("ab"));
    }

    #[test]
    fn groups_are_distinct_and_start_is_first() {
        let dfa = Dfa::from_pattern("(a|b)*abb").unwrap();
        for (i, left) in dfa.states.iter().enumerate() {
            for right in &dfa.states[i + 1..] {
                assert_ne!(left.group, right.group);
            }
        }
        assert!(dfa.states[0].initial);
        assert!(dfa.states.iter().skip(1).all(|state| !state.initial));
    }

    #[test]
    fn sink_traps_forever() {
        let dfa = Dfa::from_pattern("ab").unwrap();
        // 'b' first goes to the empty group, which never escapes
        assert!(!dfa.accepts("ba"));
        assert!(!dfa.accepts("bab"));
        let sink = dfa
            .states
            .iter()
            .position(|state| state.group.is_empty())
            .unwrap();
        assert_eq!(dfa.step(sink, 'a'), Some(sink));
        assert_eq!(dfa.step(sink, 'b'), Some(sink));
        assert!(!dfa.is_index_accepting(sink));
    }

    #[test]
    fn out_of_alphabet_steps_are_none() {
        let dfa = Dfa::from_pattern("ab").unwrap();
        assert!(!dfa.in_alphabet('z'));
        assert_eq!(dfa.step(0, 'z'), None);
        assert!(!dfa.accepts("az"));
    }

    #[test]
    fn merging_no_rules_determinizes_to_a_dead_start() {
        let dfa = Dfa::from_nfa(&Nfa::merged(Vec::new()));
        assert_eq!(dfa.state_count(), 1);
        assert!(!dfa.accepts(""));
        assert!(!dfa.accepts("a"));
    }

    #[test]
    fn map_remaps_identities() {
        let dfa = Dfa::from_pattern("a*").unwrap();
        let shifted = dfa.map(|id| id * 2 + 1);
        assert!(shifted.states().iter().all(|id| id % 2 == 1));
        assert_eq!(shifted.initial_state(), dfa.initial_state() * 2 + 1);
        let from = shifted.initial_state();
        let next = shifted.next(from, 'a').unwrap();
        assert!(shifted.is_accepting(next));
    }
}
