//! Regex front-end: source tokenization and infix-to-prefix conversion.
//!
//! The front-end turns a regex source string into a fully parenthesized
//! prefix-form expression (`"CONCAT a STAR b"`), which is the input format
//! of [`crate::regex::Ast`] and of the automaton constructors. Along the
//! way it expands `[x-y]` range sugar into an explicit union, keeps quoted
//! runs together as single atoms, and inserts the implicit concatenation
//! operators the infix syntax leaves out.

use compact_str::CompactString;

use super::token::{OpKind, RegexToken, Symbol};
use crate::error::PatternError;

/// Classify a regex source string into literal and operator tokens.
///
/// - `[x-y]` expands eagerly into `( x | ... | y )`, inclusive by code point.
/// - `'...'` keeps everything up to the closing apostrophe as one atom;
///   two consecutive apostrophes stand for a single literal apostrophe.
/// - The bare word `eps` is the epsilon atom.
/// - `| * + ? ( )` are operators; any other character is a one-char literal.
///
/// # Errors
///
/// Returns [`PatternError`] for malformed range sugar or an unterminated
/// quoted literal; offsets are character offsets into the pattern.
pub fn tokenize(pattern: &str) -> Result<Vec<RegexToken>, PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '[' {
            // [x-y] is exactly five characters of sugar
            if i + 4 >= chars.len() || chars[i + 2] != '-' || chars[i + 4] != ']' {
                return Err(PatternError::MalformedRange { offset: i });
            }
            let from = chars[i + 1];
            let to = chars[i + 3];
            if from > to {
                return Err(PatternError::InvertedRange { offset: i });
            }
            tokens.push(RegexToken::Op(OpKind::Open));
            let mut first = true;
            for cp in from as u32..=to as u32 {
                let Some(member) = char::from_u32(cp) else {
                    continue;
                };
                if !first {
                    tokens.push(RegexToken::Op(OpKind::Union));
                }
                tokens.push(RegexToken::char(member));
                first = false;
            }
            tokens.push(RegexToken::Op(OpKind::Close));
            i += 5;
        } else if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                // two apostrophes stand for one literal apostrophe
                tokens.push(RegexToken::char('\''));
                i += 3;
            } else {
                let Some(close) = (i + 1..chars.len()).find(|&j| chars[j] == '\'') else {
                    return Err(PatternError::UnterminatedQuote { offset: i });
                };
                let text: CompactString = chars[i + 1..close].iter().collect();
                tokens.push(RegexToken::Literal(Symbol::Text(text)));
                i = close + 1;
            }
        } else if let Some(op) = OpKind::from_char(c) {
            tokens.push(RegexToken::Op(op));
            i += 1;
        } else if chars[i..].starts_with(&['e', 'p', 's']) {
            tokens.push(RegexToken::Literal(Symbol::Epsilon));
            i += 3;
        } else {
            tokens.push(RegexToken::char(c));
            i += 1;
        }
    }
    Ok(tokens)
}

/// Whether an implicit CONCAT must be inserted between two adjacent tokens.
///
/// Concatenation is implied exactly when both sides denote values that
/// sequence: literal-then-literal, close-paren-then-(literal or open-paren),
/// literal-then-open-paren, and postfix-operator-then-(literal or open-paren).
fn needs_concat(prev: Option<&RegexToken>, current: &RegexToken) -> bool {
    let Some(prev) = prev else {
        return false;
    };
    let opens_value = current.is_literal() || *current == RegexToken::Op(OpKind::Open);
    match prev {
        RegexToken::Literal(_) => opens_value,
        RegexToken::Op(OpKind::Close) => opens_value,
        RegexToken::Op(op) if op.is_postfix() => opens_value,
        RegexToken::Op(_) => false,
    }
}

/// Pop one operator's worth of operands and push the combined prefix form.
/// Operand source order is preserved: the second pop is written first.
fn reduce(op: OpKind, operands: &mut Vec<String>) -> Result<(), PatternError> {
    let last = operands
        .pop()
        .ok_or(PatternError::MissingOperand { op: op.name() })?;
    let mut combined = String::from(op.name());
    combined.push(' ');
    if !op.is_postfix() {
        let first = operands
            .pop()
            .ok_or(PatternError::MissingOperand { op: op.name() })?;
        combined.push_str(&first);
        combined.push(' ');
    }
    combined.push_str(&last);
    operands.push(combined);
    Ok(())
}

/// Render an atom into prefix form, re-wrapping in apostrophes whatever
/// [`split_prefix`] could not otherwise recover as one atom.
fn quote_atom(symbol: &Symbol) -> String {
    match symbol {
        Symbol::Epsilon => "eps".to_string(),
        Symbol::Text(text) => {
            if text == "'" {
                return "''".to_string();
            }
            let multi = text.chars().count() != 1;
            let whitespace = text.chars().any(char::is_whitespace);
            if multi || whitespace {
                format!("'{text}'")
            } else {
                text.to_string()
            }
        }
    }
}

/// Convert an infix regex source string into prefix (operator-first) form.
///
/// Uses the classic two-stack shift-reduce algorithm: operands accumulate as
/// prefix-form substrings, operators reduce when a lower-precedence operator
/// arrives, parentheses reduce eagerly, and whatever remains is drained at
/// end of input.
///
/// # Errors
///
/// Returns [`PatternError`] for tokenization failures, unbalanced
/// parentheses, missing operands, or an empty pattern.
///
/// # Example
///
/// ```
/// use lexgen::regex::to_prefix;
///
/// assert_eq!(to_prefix("(a|b)c").unwrap(), "CONCAT UNION a b c");
/// assert_eq!(to_prefix("ab+").unwrap(), "CONCAT a PLUS b");
/// ```
pub fn to_prefix(pattern: &str) -> Result<String, PatternError> {
    let tokens = tokenize(pattern)?;
    if tokens.is_empty() {
        return Err(PatternError::EmptyPattern);
    }

    let mut operators: Vec<OpKind> = Vec::new();
    let mut operands: Vec<String> = Vec::new();
    let mut prev: Option<RegexToken> = None;
    let mut i = 0;

    while i < tokens.len() {
        // Inject CONCAT without consuming the pending token; the cleared
        // prev stops the same boundary from injecting twice.
        let current = if needs_concat(prev.as_ref(), &tokens[i]) {
            prev = None;
            RegexToken::Op(OpKind::Concat)
        } else {
            let token = tokens[i].clone();
            i += 1;
            token
        };

        match &current {
            RegexToken::Literal(symbol) => operands.push(quote_atom(symbol)),
            RegexToken::Op(OpKind::Open) => operators.push(OpKind::Open),
            RegexToken::Op(OpKind::Close) => {
                while let Some(&top) = operators.last() {
                    if top == OpKind::Open {
                        break;
                    }
                    operators.pop();
                    reduce(top, &mut operands)?;
                }
                if operators.pop() != Some(OpKind::Open) {
                    return Err(PatternError::UnbalancedParen);
                }
            }
            RegexToken::Op(op) => {
                // higher-precedence operators on the stack take their
                // operands before a weaker one is shifted
                while let Some(&top) = operators.last() {
                    if op.precedence() >= top.precedence() {
                        break;
                    }
                    operators.pop();
                    reduce(top, &mut operands)?;
                }
                operators.push(*op);
            }
        }

        if !matches!(current, RegexToken::Op(OpKind::Concat)) {
            prev = Some(current);
        }
    }

    while let Some(op) = operators.pop() {
        if op == OpKind::Open {
            return Err(PatternError::UnbalancedParen);
        }
        reduce(op, &mut operands)?;
    }

    let result = operands.pop().ok_or(PatternError::EmptyPattern)?;
    if !operands.is_empty() {
        return Err(PatternError::TrailingInput {
            rest: operands.join(" "),
        });
    }
    Ok(result)
}

/// One word of a prefix-form expression.
///
/// Quoted words are always atoms; bare words may be operator names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PrefixWord {
    Bare(CompactString),
    Quoted(CompactString),
}

/// Split a prefix-form expression on whitespace, keeping quoted runs
/// together so atoms containing spaces (or spelling an operator name)
/// survive as single words.
pub(crate) fn split_prefix(prefix: &str) -> Result<Vec<PrefixWord>, PatternError> {
    let chars: Vec<char> = prefix.chars().collect();
    let mut words = Vec::new();
    let mut pending = CompactString::default();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                words.push(PrefixWord::Quoted(CompactString::from("'")));
                i += 2;
            } else {
                let Some(close) = (i + 1..chars.len()).find(|&j| chars[j] == '\'') else {
                    return Err(PatternError::UnterminatedQuote { offset: i });
                };
                let text: CompactString = chars[i + 1..close].iter().collect();
                words.push(PrefixWord::Quoted(text));
                i = close + 1;
            }
        } else if c == ' ' {
            if !pending.is_empty() {
                words.push(PrefixWord::Bare(std::mem::take(&mut pending)));
            }
            i += 1;
        } else {
            pending.push(c);
            i += 1;
        }
    }
    if !pending.is_empty() {
        words.push(PrefixWord::Bare(pending));
    }
    Ok(words)
}
