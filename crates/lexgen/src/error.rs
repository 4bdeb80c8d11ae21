//! # Error Types
//!
//! Error types for pattern compilation and scanning.
//!
//! ## Overview
//!
//! Two error kinds exist, matching the two fallible surfaces of the crate:
//!
//! - [`PatternError`]: the regex source was malformed (bad range sugar,
//!   unterminated quote, dangling operator, ...). Raised while building an
//!   automaton or a lexer, never while scanning.
//! - [`LexError`]: the input text could not be partitioned into tokens.
//!   Always carries a position; the `Display` form is the stable
//!   `"No viable alternative ..."` message scanning callers rely on.
//!
//! ## Diagnostics Support
//!
//! When the `diagnostics` feature is enabled, both types derive
//! [`miette::Diagnostic`] for rich terminal reporting.

use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Error raised while compiling a regex pattern.
///
/// Offsets are character offsets into the pattern source (or into the
/// prefix-form string for the prefix-level constructors).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum PatternError {
    #[error("malformed character range at offset {offset}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexgen::pattern::malformed_range)))]
    MalformedRange { offset: usize },

    #[error("character range endpoints out of order at offset {offset}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexgen::pattern::inverted_range)))]
    InvertedRange { offset: usize },

    #[error("unterminated quoted literal starting at offset {offset}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexgen::pattern::unterminated_quote)))]
    UnterminatedQuote { offset: usize },

    #[error("operator {op} is missing an operand")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexgen::pattern::missing_operand)))]
    MissingOperand { op: &'static str },

    #[error("unbalanced parenthesis")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexgen::pattern::unbalanced_paren)))]
    UnbalancedParen,

    #[error("empty pattern")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexgen::pattern::empty)))]
    EmptyPattern,

    #[error("prefix expression ended before all operands were supplied")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexgen::pattern::truncated_prefix)))]
    TruncatedPrefix,

    #[error("trailing input after prefix expression: `{rest}`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexgen::pattern::trailing_input)))]
    TrailingInput { rest: String },
}

/// Error raised while scanning input text.
///
/// Line and column are zero-indexed; column counting follows the scanner's
/// position rules (see [`crate::lexer::LineCol`]). A failure discovered only
/// at end of input reports the literal marker `EOF` instead of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum LexError {
    #[error("No viable alternative at character {column}, line {line}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexgen::lex::no_viable_alternative)))]
    NoViableAlternative { column: u32, line: u32 },

    #[error("No viable alternative at character EOF, line {line}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexgen::lex::no_viable_alternative_eof)))]
    NoViableAlternativeAtEof { line: u32 },
}

impl LexError {
    /// Create a positional "no viable alternative" error.
    #[must_use]
    pub const fn no_viable(column: u32, line: u32) -> Self {
        Self::NoViableAlternative { column, line }
    }

    /// Create an end-of-input "no viable alternative" error.
    #[must_use]
    pub const fn eof(line: u32) -> Self {
        Self::NoViableAlternativeAtEof { line }
    }

    /// The zero-indexed line the failure was reported on.
    #[must_use]
    pub const fn line(&self) -> u32 {
        match self {
            Self::NoViableAlternative { line, .. } | Self::NoViableAlternativeAtEof { line } => {
                *line
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display_matches_contract() {
        let err = LexError::no_viable(3, 1);
        assert_eq!(
            err.to_string(),
            "No viable alternative at character 3, line 1"
        );

        let err = LexError::eof(0);
        assert_eq!(
            err.to_string(),
            "No viable alternative at character EOF, line 0"
        );
    }

    #[test]
    fn pattern_error_display() {
        let err = PatternError::UnterminatedQuote { offset: 4 };
        assert!(err.to_string().contains("offset 4"));

        let err = PatternError::MissingOperand { op: "UNION" };
        assert!(err.to_string().contains("UNION"));
    }
}
