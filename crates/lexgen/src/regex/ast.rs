//! Prefix-form expression trees.
//!
//! [`Ast`] is the shape handed to Thompson's construction. `?` and `+`
//! never survive parsing: `MAYBE x` becomes a union with epsilon and
//! `PLUS x` becomes `x` concatenated with `STAR x`.

use super::parser::{split_prefix, PrefixWord};
use super::token::{OpKind, Symbol};
use crate::error::PatternError;

/// A regex expression tree in desugared form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// Either of two alternatives, in source order.
    Union(Box<Ast>, Box<Ast>),
    /// Both children in sequence, in source order.
    Concat(Box<Ast>, Box<Ast>),
    /// Zero or more repetitions of the child.
    Star(Box<Ast>),
    /// A single atomic symbol.
    Atom(Symbol),
}

impl Ast {
    /// Parse a prefix-form expression string into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the expression is empty, truncated, or
    /// has words left over after one complete tree.
    pub fn from_prefix(prefix: &str) -> Result<Self, PatternError> {
        let words = split_prefix(prefix)?;
        if words.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        let (ast, rest) = Self::parse(&words)?;
        if !rest.is_empty() {
            let rest: Vec<&str> = rest
                .iter()
                .map(|word| match word {
                    PrefixWord::Bare(text) | PrefixWord::Quoted(text) => text.as_str(),
                })
                .collect();
            return Err(PatternError::TrailingInput {
                rest: rest.join(" "),
            });
        }
        Ok(ast)
    }

    /// Consume one complete subtree from the word list and return the
    /// unconsumed remainder, so callers chain recursive calls without a
    /// cursor.
    fn parse(words: &[PrefixWord]) -> Result<(Self, &[PrefixWord]), PatternError> {
        let (first, rest) = words.split_first().ok_or(PatternError::TruncatedPrefix)?;
        let word = match first {
            PrefixWord::Quoted(text) => {
                return Ok((Self::Atom(Symbol::Text(text.clone())), rest));
            }
            PrefixWord::Bare(text) => text,
        };
        match OpKind::from_word(word) {
            Some(OpKind::Union) => {
                let (left, rest) = Self::parse(rest)?;
                let (right, rest) = Self::parse(rest)?;
                Ok((Self::Union(Box::new(left), Box::new(right)), rest))
            }
            Some(OpKind::Concat) => {
                let (left, rest) = Self::parse(rest)?;
                let (right, rest) = Self::parse(rest)?;
                Ok((Self::Concat(Box::new(left), Box::new(right)), rest))
            }
            Some(OpKind::Star) => {
                let (inner, rest) = Self::parse(rest)?;
                Ok((Self::Star(Box::new(inner)), rest))
            }
            Some(OpKind::Maybe) => {
                // x? is x | eps
                let (inner, rest) = Self::parse(rest)?;
                let desugared = Self::Union(Box::new(inner), Box::new(Self::Atom(Symbol::Epsilon)));
                Ok((desugared, rest))
            }
            Some(OpKind::Plus) => {
                // x+ is x followed by x*, reusing the same subtree
                let (inner, rest) = Self::parse(rest)?;
                let desugared = Self::Concat(
                    Box::new(inner.clone()),
                    Box::new(Self::Star(Box::new(inner))),
                );
                Ok((desugared, rest))
            }
            Some(OpKind::Open | OpKind::Close) | None => {
                if word == "eps" {
                    Ok((Self::Atom(Symbol::Epsilon), rest))
                } else {
                    Ok((Self::Atom(Symbol::Text(word.clone())), rest))
                }
            }
        }
    }
}
