//! Property-based tests over randomly generated patterns and inputs.

use proptest::prelude::*;

use lexgen::{to_prefix, Dfa, LexerBuilder, Nfa};

/// Random regex source over the `{a, b}` alphabet, built from the full
/// operator set with every subterm parenthesized.
fn pattern_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("eps".to_string()),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(x, y)| format!("({x})({y})")),
            (inner.clone(), inner.clone()).prop_map(|(x, y)| format!("({x})|({y})")),
            inner.clone().prop_map(|x| format!("({x})*")),
            inner.clone().prop_map(|x| format!("({x})+")),
            inner.prop_map(|x| format!("({x})?")),
        ]
    })
}

proptest! {
    #[test]
    fn determinization_preserves_acceptance(
        pattern in pattern_strategy(),
        input in "[ab]{0,6}",
    ) {
        let nfa = Nfa::from_pattern(&pattern).unwrap();
        let dfa = Dfa::from_pattern(&pattern).unwrap();
        prop_assert_eq!(
            nfa.accepts(&input),
            dfa.accepts(&input),
            "pattern {} disagrees on {:?}",
            pattern,
            input
        );
    }

    #[test]
    fn prefix_form_preserves_acceptance(
        pattern in pattern_strategy(),
        input in "[ab]{0,5}",
    ) {
        let prefix = to_prefix(&pattern).unwrap();
        let direct = Nfa::from_pattern(&pattern).unwrap();
        let via_prefix = Nfa::from_prefix(&prefix).unwrap();
        prop_assert_eq!(direct.accepts(&input), via_prefix.accepts(&input));
    }

    #[test]
    fn identity_remapping_preserves_acceptance(
        pattern in pattern_strategy(),
        input in "[ab]{0,5}",
    ) {
        let nfa = Nfa::from_pattern(&pattern).unwrap();
        prop_assert_eq!(nfa.accepts(&input), nfa.map(|id| id * 3 + 7).accepts(&input));
    }

    #[test]
    fn lexemes_partition_the_input(input in "[a-z0-9]{0,10}") {
        let lexer = LexerBuilder::new()
            .token("NUMBER", "[0-9]+")
            .token("ID", "[a-z]+")
            .build()
            .unwrap();
        if input.is_empty() {
            // no rule is nullable, so empty input is an end-of-input error
            prop_assert!(lexer.lex(&input).is_err());
            return Ok(());
        }
        let lexemes = lexer.lex(&input).unwrap();
        let rebuilt: String = lexemes.iter().map(|l| l.text.as_str()).collect();
        prop_assert_eq!(rebuilt, input.clone());
        prop_assert!(lexemes.iter().all(|l| !l.text.is_empty()));
    }
}
