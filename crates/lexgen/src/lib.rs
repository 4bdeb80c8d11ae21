//! # lexgen
//!
//! A lexical analyzer generator: named regex rules in, a table-driven
//! maximal-munch scanner out.
//!
//! The pipeline has three stages, each usable on its own:
//!
//! 1. [`regex`] parses infix patterns (with `[x-y]` range sugar, quoted
//!    literals, and an explicit `eps`) into prefix form and then into an
//!    expression tree.
//! 2. [`nfa`] runs Thompson's construction over the tree.
//! 3. [`dfa`] determinizes the result by subset construction into a dense
//!    transition table.
//!
//! [`LexerBuilder`] drives all three for a whole rule set, merging the
//! per-rule automata so a single table walk services every rule at once.
//!
//! ## Example
//!
//! ```
//! use lexgen::LexerBuilder;
//!
//! let lexer = LexerBuilder::new()
//!     .token("NUMBER", "[0-9]+")
//!     .token("ID", "[a-z]+")
//!     .build()?;
//!
//! let lexemes = lexer.lex("12ab")?;
//! assert_eq!(lexemes[0].token, "NUMBER");
//! assert_eq!(lexemes[0].text, "12");
//! assert_eq!(lexemes[1].token, "ID");
//! assert_eq!(lexemes[1].text, "ab");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature flags
//!
//! - `diagnostics`: derive [`miette::Diagnostic`] on the error types.
//! - `serialize`: derive serde traits on lexemes and positions.

pub mod dfa;
pub mod error;
pub mod lexer;
pub mod nfa;
pub mod regex;

pub use dfa::Dfa;
pub use error::{LexError, PatternError};
pub use lexer::{Lexeme, Lexer, LexerBuilder, LineCol};
pub use nfa::{Label, Nfa};
pub use regex::{to_prefix, tokenize, Ast, OpKind, RegexToken, Symbol};
