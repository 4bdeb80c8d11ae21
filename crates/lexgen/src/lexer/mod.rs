//! # Maximal-munch lexing
//!
//! [`LexerBuilder`] collects named regex rules, compiles each to its own
//! automaton, merges them under a shared root, and determinizes the
//! result once. The compiled [`Lexer`] then scans input by repeatedly
//! taking the longest prefix any rule matches, breaking length ties in
//! favor of the rule declared first.

mod position;

use compact_str::CompactString;

use crate::dfa::Dfa;
use crate::error::{LexError, PatternError};
use crate::nfa::Nfa;

pub use position::LineCol;
use position::line_col;

/// One recognized token: the matching rule's name and the matched text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Lexeme {
    pub token: CompactString,
    pub text: CompactString,
}

/// Builder over named `(name, pattern)` rules.
///
/// Rule order is significant: when two rules match prefixes of equal
/// length, the one added first wins.
#[derive(Debug, Clone, Default)]
pub struct LexerBuilder {
    rules: Vec<(CompactString, String)>,
}

impl LexerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one token rule.
    #[must_use]
    pub fn token(mut self, name: impl Into<CompactString>, pattern: impl Into<String>) -> Self {
        self.rules.push((name.into(), pattern.into()));
        self
    }

    /// Compile every rule and determinize the merged automaton.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] for the first rule whose pattern fails to
    /// parse.
    pub fn build(self) -> Result<Lexer, PatternError> {
        let mut names = Vec::with_capacity(self.rules.len());
        let mut subs = Vec::with_capacity(self.rules.len());
        for (name, pattern) in self.rules {
            subs.push(Nfa::from_pattern(&pattern)?);
            names.push(name);
        }
        let nfa = Nfa::merged(subs);
        let dfa = Dfa::from_nfa(&nfa);
        Ok(Lexer { names, nfa, dfa })
    }
}

/// A compiled lexer.
///
/// Building is the expensive step; [`Lexer::lex`] only walks the
/// transition table, so one lexer can scan any number of inputs.
#[derive(Debug, Clone)]
pub struct Lexer {
    names: Vec<CompactString>,
    nfa: Nfa,
    dfa: Dfa,
}

impl Lexer {
    /// The merged rule automaton, before determinization.
    #[must_use]
    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    /// The determinized scanning automaton.
    #[must_use]
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Split `input` into lexemes by maximal munch.
    ///
    /// The scanner walks the DFA from each token's start, recording for
    /// every rule the longest prefix it accepts. When the walk dies (dead
    /// state or end of input) the longest recorded match is emitted, ties
    /// going to the earliest-declared rule, and scanning restarts right
    /// after it.
    ///
    /// # Errors
    ///
    /// Returns [`LexError`] when no rule matches any prefix at the current
    /// position, reporting the failure's line and column. A character
    /// outside every rule's alphabet is reported at its own position; a
    /// dead-end walk is noticed one character later and reported one
    /// column back from there; a walk that dies exactly at end of input
    /// is reported as an EOF failure.
    pub fn lex(&self, input: &str) -> Result<Vec<Lexeme>, LexError> {
        let chars: Vec<char> = input.chars().collect();
        let mut lexemes = Vec::new();
        let mut start = 0;
        let mut cursor = 0;
        let mut state = 0;
        let mut pending: Vec<Option<usize>> = vec![None; self.names.len()];

        loop {
            if cursor >= chars.len() {
                if self.record_matches(state, cursor, &mut pending) {
                    // accepting at end of input: flushed after the loop
                    break;
                }
                let Some((rule, end)) = best_pending(&pending) else {
                    let at = line_col(&chars, chars.len().saturating_sub(1));
                    return Err(LexError::eof(at.line));
                };
                self.emit(&mut lexemes, &chars, rule, start, end);
                start = end;
                cursor = start;
                state = 0;
                pending.fill(None);
                if cursor >= chars.len() {
                    break;
                }
                continue;
            }

            let c = chars[cursor];
            if !self.dfa.in_alphabet(c) {
                let at = line_col(&chars, cursor);
                return Err(LexError::no_viable(at.column, at.line));
            }

            self.record_matches(state, cursor, &mut pending);

            // a dead state entered on the previous character ends the
            // current attempt here, one position past the failure
            if self.dfa.group_of(state).is_empty() {
                let Some((rule, end)) = best_pending(&pending) else {
                    let at = line_col(&chars, cursor);
                    return Err(LexError::no_viable(at.column.saturating_sub(1), at.line));
                };
                self.emit(&mut lexemes, &chars, rule, start, end);
                start = end;
                cursor = start;
                state = 0;
                pending.fill(None);
                continue;
            }

            let Some(next) = self.dfa.step(state, c) else {
                let at = line_col(&chars, cursor);
                return Err(LexError::no_viable(at.column, at.line));
            };
            state = next;
            cursor += 1;
        }

        if let Some((rule, end)) = best_pending(&pending) {
            self.emit(&mut lexemes, &chars, rule, start, end);
        }
        if lexemes.is_empty() {
            let at = line_col(&chars, chars.len().saturating_sub(1));
            return Err(LexError::eof(at.line));
        }
        Ok(lexemes)
    }

    /// If the DFA state at `state` accepts, note `end` as the best match
    /// so far for every rule whose accept node the state contains, and
    /// report whether it accepted at all. `end` only grows within one
    /// attempt, so recording overwrites freely.
    fn record_matches(&self, state: usize, end: usize, pending: &mut [Option<usize>]) -> bool {
        if !self.dfa.is_index_accepting(state) {
            return false;
        }
        for &index in self.dfa.group_of(state) {
            let node = self.nfa.node(index);
            if node.accepting {
                if let Some(tag) = node.token {
                    pending[tag as usize] = Some(end);
                }
            }
        }
        true
    }

    fn emit(&self, lexemes: &mut Vec<Lexeme>, chars: &[char], rule: usize, start: usize, end: usize) {
        let text: String = chars[start..end].iter().collect();
        lexemes.push(Lexeme {
            token: self.names[rule].clone(),
            text: text.into(),
        });
    }
}

/// The longest recorded match; on equal length the earliest rule wins.
fn best_pending(pending: &[Option<usize>]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (rule, &end) in pending.iter().enumerate() {
        let Some(end) = end else { continue };
        if best.is_none_or(|(_, best_end)| end > best_end) {
            best = Some((rule, end));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexeme(token: &str, text: &str) -> Lexeme {
        Lexeme {
            token: token.into(),
            text: text.into(),
        }
    }

    #[test]
    fn longest_match_wins_over_first_match() {
        let lexer = LexerBuilder::new()
            .token("NUMBER", "[0-9][0-9]*")
            .token("ID", "[a-z][a-z]*")
            .build()
            .unwrap();
        assert_eq!(
            lexer.lex("12ab").unwrap(),
            vec![lexeme("NUMBER", "12"), lexeme("ID", "ab")]
        );
    }

    #[test]
    fn equal_length_ties_go_to_the_earlier_rule() {
        let lexer = LexerBuilder::new()
            .token("KEYWORD", "'if'")
            .token("ID", "[a-z]+")
            .build()
            .unwrap();
        assert_eq!(lexer.lex("if").unwrap(), vec![lexeme("KEYWORD", "if")]);
        assert_eq!(lexer.lex("iffy").unwrap(), vec![lexeme("ID", "iffy")]);
    }

    #[test]
    fn best_pending_prefers_length_then_order() {
        assert_eq!(best_pending(&[None, None]), None);
        assert_eq!(best_pending(&[Some(2), Some(2)]), Some((0, 2)));
        assert_eq!(best_pending(&[Some(2), Some(3)]), Some((1, 3)));
        assert_eq!(best_pending(&[None, Some(1)]), Some((1, 1)));
    }

    #[test]
    fn rebuilding_gives_identical_output() {
        let build = || {
            LexerBuilder::new()
                .token("A", "(a|b)*c")
                .token("B", "[0-9]+")
                .build()
                .unwrap()
        };
        let input = "abc007c";
        assert_eq!(build().lex(input).unwrap(), build().lex(input).unwrap());
    }
}
