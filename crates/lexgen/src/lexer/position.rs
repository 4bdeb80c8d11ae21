//! Line and column recovery for diagnostics.

/// A zero-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

/// Recover the line and column of the character at `index`.
///
/// Lines are counted by `'\n'` occurrences before the position; the column
/// restarts at 0 after each newline. A newline character itself reports
/// column 0 on the line it ends.
pub(crate) fn line_col(chars: &[char], index: usize) -> LineCol {
    let mut line = 0;
    let mut column = 0;
    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' {
            line += 1;
            column = 0;
        }
        if i == index {
            break;
        }
        column += 1;
    }
    LineCol { line, column }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str, index: usize) -> LineCol {
        let chars: Vec<char> = text.chars().collect();
        line_col(&chars, index)
    }

    #[test]
    fn single_line_positions() {
        assert_eq!(at("abc", 0), LineCol { line: 0, column: 0 });
        assert_eq!(at("abc", 1), LineCol { line: 0, column: 1 });
        assert_eq!(at("abc", 2), LineCol { line: 0, column: 2 });
    }

    #[test]
    fn positions_after_a_newline() {
        // "ab\ncd": the newline is index 2, 'c' is index 3
        assert_eq!(at("ab\ncd", 2), LineCol { line: 1, column: 0 });
        assert_eq!(at("ab\ncd", 3), LineCol { line: 1, column: 1 });
        assert_eq!(at("ab\ncd", 4), LineCol { line: 1, column: 2 });
    }

    #[test]
    fn index_past_the_end_scans_the_whole_input() {
        assert_eq!(at("ab", 10), LineCol { line: 0, column: 2 });
        assert_eq!(at("a\n", 10), LineCol { line: 1, column: 1 });
    }
}
