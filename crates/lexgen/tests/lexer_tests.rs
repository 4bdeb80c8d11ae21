//! Scanner behavior: maximal munch, tie-breaking, and error reporting.

use lexgen::{LexError, Lexeme, LexerBuilder};

fn lexeme(token: &str, text: &str) -> Lexeme {
    Lexeme {
        token: token.into(),
        text: text.into(),
    }
}

#[test]
fn maximal_munch_across_rule_boundaries() {
    let lexer = LexerBuilder::new()
        .token("NUMBER", "[0-9]+")
        .token("ID", "[a-z]+")
        .build()
        .unwrap();
    assert_eq!(
        lexer.lex("12ab34").unwrap(),
        vec![
            lexeme("NUMBER", "12"),
            lexeme("ID", "ab"),
            lexeme("NUMBER", "34"),
        ]
    );
}

#[test]
fn keyword_beats_identifier_only_on_equal_length() {
    let lexer = LexerBuilder::new()
        .token("KEYWORD", "'if'")
        .token("ID", "[a-z]+")
        .build()
        .unwrap();
    assert_eq!(lexer.lex("if").unwrap(), vec![lexeme("KEYWORD", "if")]);
    assert_eq!(lexer.lex("iffy").unwrap(), vec![lexeme("ID", "iffy")]);
    assert_eq!(
        lexer.lex("ifif").unwrap(),
        vec![lexeme("ID", "ifif")]
    );
}

#[test]
fn whitespace_rule_interleaves() {
    let lexer = LexerBuilder::new()
        .token("WORD", "[a-z]+")
        .token("SPACE", "' '+")
        .build()
        .unwrap();
    assert_eq!(
        lexer.lex("ab  cd").unwrap(),
        vec![lexeme("WORD", "ab"), lexeme("SPACE", "  "), lexeme("WORD", "cd")]
    );
}

#[test]
fn backtracking_to_a_shorter_committed_match() {
    // "aab" forces the scanner past the one-char match before giving up
    let lexer = LexerBuilder::new()
        .token("A", "a")
        .token("AAB", "'aab'")
        .build()
        .unwrap();
    assert_eq!(lexer.lex("aab").unwrap(), vec![lexeme("AAB", "aab")]);
    assert_eq!(
        lexer.lex("aa").unwrap(),
        vec![lexeme("A", "a"), lexeme("A", "a")]
    );
}

#[test]
fn unknown_character_reports_its_position() {
    let lexer = LexerBuilder::new()
        .token("NUMBER", "[0-9]+")
        .token("NEWLINE", "\n")
        .build()
        .unwrap();
    let err = lexer.lex("12\n34!56").unwrap_err();
    assert_eq!(
        err.to_string(),
        "No viable alternative at character 3, line 1"
    );
}

#[test]
fn unknown_character_on_the_first_line() {
    let lexer = LexerBuilder::new()
        .token("NUMBER", "[0-9]+")
        .build()
        .unwrap();
    let err = lexer.lex("01!").unwrap_err();
    assert_eq!(
        err.to_string(),
        "No viable alternative at character 2, line 0"
    );
}

#[test]
fn dead_state_without_a_match_reports_the_previous_column() {
    let lexer = LexerBuilder::new().token("A", "'ab'").build().unwrap();
    let err = lexer.lex("ba").unwrap_err();
    assert_eq!(
        err.to_string(),
        "No viable alternative at character 0, line 0"
    );
}

#[test]
fn truncated_input_reports_eof() {
    let lexer = LexerBuilder::new().token("A", "'ab'").build().unwrap();
    let err = lexer.lex("a").unwrap_err();
    assert_eq!(err.to_string(), "No viable alternative at character EOF, line 0");
    assert_eq!(err, LexError::eof(0));
}

#[test]
fn eof_error_uses_the_last_line() {
    let lexer = LexerBuilder::new()
        .token("A", "'ab'")
        .token("NEWLINE", "\n")
        .build()
        .unwrap();
    let err = lexer.lex("ab\na").unwrap_err();
    assert_eq!(err.to_string(), "No viable alternative at character EOF, line 1");
}

#[test]
fn empty_input_without_nullable_rules_is_an_error() {
    let lexer = LexerBuilder::new().token("A", "a").build().unwrap();
    assert_eq!(lexer.lex("").unwrap_err(), LexError::eof(0));
}

#[test]
fn empty_input_with_a_nullable_rule_yields_one_empty_lexeme() {
    let lexer = LexerBuilder::new().token("A", "a*").build().unwrap();
    assert_eq!(lexer.lex("").unwrap(), vec![lexeme("A", "")]);
}

#[test]
fn scanning_is_deterministic_across_builds() {
    let build = || {
        LexerBuilder::new()
            .token("NUMBER", "[0-9]+")
            .token("OP", "('+'|-)")
            .token("ID", "[a-z]+")
            .build()
            .unwrap()
    };
    let input = "1-2abc3";
    assert_eq!(build().lex(input).unwrap(), build().lex(input).unwrap());
}

#[test]
fn a_lexer_is_reusable_across_inputs() {
    let lexer = LexerBuilder::new()
        .token("WORD", "[a-z]+")
        .build()
        .unwrap();
    assert_eq!(lexer.lex("ab").unwrap(), vec![lexeme("WORD", "ab")]);
    assert_eq!(lexer.lex("xyz").unwrap(), vec![lexeme("WORD", "xyz")]);
}
