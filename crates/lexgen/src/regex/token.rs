//! Regex token classification.
//!
//! [`RegexToken`] is the unit the regex front-end produces: either an atomic
//! symbol or one of the seven operators. Equality is structural, which is
//! what the shift-reduce conversion and the tests rely on.

use compact_str::CompactString;
use std::fmt;

/// An atomic regex unit.
///
/// A symbol is either the epsilon marker (the bare word `eps` in pattern
/// source) or a run of text: a single character, or a quoted multi-character
/// literal kept together as one atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// The epsilon atom: matches the empty string.
    Epsilon,
    /// A literal run of one or more characters.
    Text(CompactString),
}

impl Symbol {
    /// Symbol for a single character.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::Text(CompactString::from(c.to_string()))
    }

    /// Symbol for a literal run of text.
    #[must_use]
    pub fn text(text: impl Into<CompactString>) -> Self {
        Self::Text(text.into())
    }

    /// Whether this symbol is the epsilon marker.
    #[must_use]
    pub const fn is_epsilon(&self) -> bool {
        matches!(self, Self::Epsilon)
    }
}

/// A regex operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Union,
    Concat,
    Star,
    Plus,
    Maybe,
    Open,
    Close,
}

impl OpKind {
    /// Binding strength used by the shift-reduce conversion.
    /// Parentheses carry zero precedence so reductions stop at them.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Union => 1,
            Self::Concat => 2,
            Self::Star | Self::Plus | Self::Maybe => 3,
            Self::Open | Self::Close => 0,
        }
    }

    /// Whether this operator takes a single operand.
    #[must_use]
    pub const fn is_postfix(self) -> bool {
        matches!(self, Self::Star | Self::Plus | Self::Maybe)
    }

    /// The operator's name as written in prefix-form expressions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Concat => "CONCAT",
            Self::Star => "STAR",
            Self::Plus => "PLUS",
            Self::Maybe => "MAYBE",
            Self::Open => "(",
            Self::Close => ")",
        }
    }

    /// Classify a one-character operator from pattern source.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '|' => Some(Self::Union),
            '*' => Some(Self::Star),
            '+' => Some(Self::Plus),
            '?' => Some(Self::Maybe),
            '(' => Some(Self::Open),
            ')' => Some(Self::Close),
            _ => None,
        }
    }

    /// Classify a prefix-form operator word (`UNION`, `STAR`, ...).
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "UNION" => Some(Self::Union),
            "CONCAT" => Some(Self::Concat),
            "STAR" => Some(Self::Star),
            "PLUS" => Some(Self::Plus),
            "MAYBE" => Some(Self::Maybe),
            _ => None,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One classified unit of regex source: a literal symbol or an operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegexToken {
    Literal(Symbol),
    Op(OpKind),
}

impl RegexToken {
    /// Token for a single literal character.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::Literal(Symbol::char(c))
    }

    /// Whether this token is a literal symbol.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}
