//! # Nondeterministic Finite Automata
//!
//! Thompson's construction over [`Ast`] trees, plus the graph primitives
//! the subset-construction engine and the lexer build on: epsilon closure,
//! character successors, alphabet enumeration, and a direct backtracking
//! acceptance test usable as a correctness oracle.
//!
//! ## Representation
//!
//! An automaton is an arena: a flat `Vec` that exclusively owns every node,
//! with transitions stored as arena indices. Cycles (from `STAR` loops) are
//! therefore just index cycles, and remapping state identities is an
//! index-preserving transform. Each node additionally carries a dense
//! `id`, equal to its index at creation time, which [`Nfa::map`] can send
//! through an arbitrary injective function without disturbing structure.

use std::collections::BTreeSet;
use std::fmt;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::error::PatternError;
use crate::regex::{to_prefix, Ast, Symbol};

/// A transition label: a single character, or epsilon (no input consumed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Epsilon,
    Char(char),
}

/// One vertex of an NFA graph.
///
/// `token` is set only on the accepting nodes of per-rule sub-automata
/// after they are merged into a shared lexer graph.
#[derive(Debug, Clone)]
pub(crate) struct NfaNode {
    pub(crate) id: u32,
    /// Outgoing edges as (target arena index, label) pairs.
    pub(crate) transitions: Vec<(u32, Label)>,
    pub(crate) accepting: bool,
    pub(crate) token: Option<u32>,
}

/// A nondeterministic finite automaton.
///
/// Node 0 is the entry point; for automata built by [`Nfa::from_ast`] the
/// last node is the unique accept.
#[derive(Clone)]
pub struct Nfa {
    nodes: Vec<NfaNode>,
}

fn new_node(nodes: &mut Vec<NfaNode>) -> usize {
    let id = u32::try_from(nodes.len()).unwrap_or(0);
    nodes.push(NfaNode {
        id,
        transitions: Vec::new(),
        accepting: false,
        token: None,
    });
    nodes.len() - 1
}

fn link(nodes: &mut [NfaNode], from: usize, to: usize, label: Label) {
    let target = u32::try_from(to).unwrap_or(0);
    nodes[from].transitions.push((target, label));
}

/// Thompson's construction for one subtree. Returns the fragment's
/// (start, accept) arena indices; the fragment's nodes are contiguous and
/// its start is always the first of them.
fn build(nodes: &mut Vec<NfaNode>, ast: &Ast) -> (usize, usize) {
    match ast {
        Ast::Atom(Symbol::Epsilon) => {
            let start = new_node(nodes);
            let end = new_node(nodes);
            link(nodes, start, end, Label::Epsilon);
            (start, end)
        }
        Ast::Atom(Symbol::Text(text)) => {
            // A multi-character atom lowers to a chain of single-character
            // edges so per-character scanning can match it.
            let start = new_node(nodes);
            let mut current = start;
            for c in text.chars() {
                let next = new_node(nodes);
                link(nodes, current, next, Label::Char(c));
                current = next;
            }
            if current == start {
                let end = new_node(nodes);
                link(nodes, start, end, Label::Epsilon);
                current = end;
            }
            (start, current)
        }
        Ast::Union(left, right) => {
            let start = new_node(nodes);
            let (left_start, left_end) = build(nodes, left);
            let (right_start, right_end) = build(nodes, right);
            let end = new_node(nodes);
            link(nodes, start, left_start, Label::Epsilon);
            link(nodes, start, right_start, Label::Epsilon);
            link(nodes, left_end, end, Label::Epsilon);
            link(nodes, right_end, end, Label::Epsilon);
            (start, end)
        }
        Ast::Concat(left, right) => {
            let (left_start, left_end) = build(nodes, left);
            let (right_start, right_end) = build(nodes, right);
            link(nodes, left_end, right_start, Label::Epsilon);
            (left_start, right_end)
        }
        Ast::Star(inner) => {
            let start = new_node(nodes);
            let (inner_start, inner_end) = build(nodes, inner);
            let end = new_node(nodes);
            link(nodes, start, end, Label::Epsilon);
            link(nodes, start, inner_start, Label::Epsilon);
            link(nodes, inner_end, inner_start, Label::Epsilon);
            link(nodes, inner_end, end, Label::Epsilon);
            (start, end)
        }
    }
}

impl Nfa {
    /// Build an automaton from a desugared expression tree.
    ///
    /// The overall accept node is the arena's last node.
    #[must_use]
    pub fn from_ast(ast: &Ast) -> Self {
        let mut nodes = Vec::new();
        let (_, end) = build(&mut nodes, ast);
        nodes[end].accepting = true;
        Self { nodes }
    }

    /// Build an automaton from a prefix-form expression string.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the prefix expression is malformed.
    pub fn from_prefix(prefix: &str) -> Result<Self, PatternError> {
        Ok(Self::from_ast(&Ast::from_prefix(prefix)?))
    }

    /// Build an automaton from infix regex source.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern is malformed.
    pub fn from_pattern(pattern: &str) -> Result<Self, PatternError> {
        Self::from_prefix(&to_prefix(pattern)?)
    }

    /// Merge per-rule automata under one fresh root.
    ///
    /// Each sub-automaton's accept node is tagged with its position in
    /// `subs`, and the root gains an epsilon edge to each sub-automaton's
    /// start, producing one graph with one entry point and several
    /// independently tagged accepts. Ids are reassigned densely.
    #[must_use]
    pub fn merged(subs: Vec<Self>) -> Self {
        let mut nodes = vec![NfaNode {
            id: 0,
            transitions: Vec::new(),
            accepting: false,
            token: None,
        }];
        for (tag, sub) in subs.into_iter().enumerate() {
            if sub.nodes.is_empty() {
                continue;
            }
            let offset = u32::try_from(nodes.len()).unwrap_or(0);
            nodes[0].transitions.push((offset, Label::Epsilon));
            let last = sub.nodes.len() - 1;
            for (position, mut node) in sub.nodes.into_iter().enumerate() {
                node.id = offset + u32::try_from(position).unwrap_or(0);
                for transition in &mut node.transitions {
                    transition.0 += offset;
                }
                if position == last {
                    node.token = Some(u32::try_from(tag).unwrap_or(0));
                }
                nodes.push(node);
            }
        }
        Self { nodes }
    }

    pub(crate) fn node(&self, index: u32) -> &NfaNode {
        &self.nodes[index as usize]
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.nodes.len()
    }

    /// All node identities, in arena order.
    #[must_use]
    pub fn states(&self) -> Vec<u32> {
        self.nodes.iter().map(|node| node.id).collect()
    }

    /// Whether the node with the given identity is accepting.
    #[must_use]
    pub fn is_accepting(&self, id: u32) -> bool {
        self.nodes
            .iter()
            .any(|node| node.id == id && node.accepting)
    }

    /// Successor identities reachable from `from` on exactly `on`.
    #[must_use]
    pub fn next(&self, from: u32, on: char) -> HashSet<u32, ahash::RandomState> {
        let mut result = HashSet::default();
        let Some(index) = self.nodes.iter().position(|node| node.id == from) else {
            return result;
        };
        for &(target, label) in &self.nodes[index].transitions {
            if label == Label::Char(on) {
                result.insert(self.nodes[target as usize].id);
            }
        }
        result
    }

    /// Remap every node identity through `f`, preserving structure.
    ///
    /// `f` must be injective for the result to be a well-formed automaton
    /// over the new identity domain.
    #[must_use]
    pub fn map<F: Fn(u32) -> u32>(&self, f: F) -> Self {
        let mut nodes = self.nodes.clone();
        for node in &mut nodes {
            node.id = f(node.id);
        }
        Self { nodes }
    }

    /// Every distinct non-epsilon label in the graph.
    #[must_use]
    pub fn alphabet(&self) -> BTreeSet<char> {
        let mut alphabet = BTreeSet::new();
        for node in &self.nodes {
            for &(_, label) in &node.transitions {
                if let Label::Char(c) = label {
                    alphabet.insert(c);
                }
            }
        }
        alphabet
    }

    /// The set of arena indices reachable from `seeds` using only epsilon
    /// edges, including the seeds themselves. Iterative, so epsilon cycles
    /// from `STAR` loops cannot overflow the stack. Returned sorted, which
    /// makes set equality plain slice equality for the subset construction.
    pub(crate) fn epsilon_closure(&self, seeds: &[u32]) -> SmallVec<[u32; 8]> {
        let mut closure: HashSet<u32, ahash::RandomState> = seeds.iter().copied().collect();
        let mut stack: Vec<u32> = seeds.to_vec();
        while let Some(index) = stack.pop() {
            for &(target, label) in &self.nodes[index as usize].transitions {
                if label == Label::Epsilon && closure.insert(target) {
                    stack.push(target);
                }
            }
        }
        let mut sorted: SmallVec<[u32; 8]> = closure.into_iter().collect();
        sorted.sort_unstable();
        sorted
    }

    /// Direct targets of edges labeled exactly `on` out of `index`.
    pub(crate) fn char_successors(&self, index: u32, on: char) -> SmallVec<[u32; 4]> {
        self.nodes[index as usize]
            .transitions
            .iter()
            .filter(|&&(_, label)| label == Label::Char(on))
            .map(|&(target, _)| target)
            .collect()
    }

    /// Whole-string acceptance by direct backtracking search.
    ///
    /// At each position the search either consumes one character along a
    /// matching edge or follows an epsilon edge, short-circuiting on the
    /// first complete accepting path. A visited set keyed on (node,
    /// remaining input) prunes epsilon cycles. This is the correctness
    /// oracle; the lexer's hot path goes through the DFA instead.
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        let chars: Vec<char> = input.chars().collect();
        let mut visited: HashSet<(u32, usize), ahash::RandomState> = HashSet::default();
        self.search(0, &chars, &mut visited)
    }

    fn search(
        &self,
        index: usize,
        input: &[char],
        visited: &mut HashSet<(u32, usize), ahash::RandomState>,
    ) -> bool {
        if input.is_empty() && self.nodes[index].accepting {
            return true;
        }
        let key = (u32::try_from(index).unwrap_or(0), input.len());
        if !visited.insert(key) {
            return false;
        }
        for &(target, label) in &self.nodes[index].transitions {
            let found = match label {
                Label::Char(c) => {
                    input.first() == Some(&c) && self.search(target as usize, &input[1..], visited)
                }
                Label::Epsilon => self.search(target as usize, input, visited),
            };
            if found {
                return true;
            }
        }
        false
    }
}

impl fmt::Debug for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            let marker = if node.accepting { "*" } else { "" };
            writeln!(f, "{index}{marker} (id {})", node.id)?;
            for &(target, label) in &node.transitions {
                match label {
                    Label::Epsilon => writeln!(f, "    eps -> {target}")?,
                    Label::Char(c) => writeln!(f, "    {c:?} -> {target}")?,
                }
            }
        }
        Ok(())
    }
}
