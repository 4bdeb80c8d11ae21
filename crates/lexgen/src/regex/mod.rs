//! # Regex Front-End
//!
//! Everything between raw regex source and the automaton constructors.
//!
//! ## Overview
//!
//! The front-end runs in three steps, each usable on its own:
//!
//! 1. [`tokenize`]: classify source characters into [`RegexToken`]s,
//!    expanding `[x-y]` range sugar and quoted literals.
//! 2. [`to_prefix`]: convert the infix token stream to a prefix-form
//!    expression string, inserting implicit concatenation.
//! 3. [`Ast::from_prefix`]: parse prefix form into a desugared tree.
//!
//! ## Syntax
//!
//! Literals are any character, a `'...'` quoted run (one atom, however
//! long), or the keyword `eps` for epsilon. Operators are `| * + ? ( )`.
//! `[a-b]` expands to the union of every character between the two
//! endpoints, inclusive.

pub mod ast;
pub mod parser;
pub mod token;

pub use ast::Ast;
pub use parser::{to_prefix, tokenize};
pub use token::{OpKind, RegexToken, Symbol};
