use std::collections::HashSet;

use proptest::prelude::*;

use singlish_parser::lexer::lex;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]
    #[test]
    fn lexing_terminates_with_in_bounds_locations(s in ".*") {
        let keywords = HashSet::new();
        let (tokens, diagnostics) = lex(&s, &keywords);

        // Lines are 1-based and bounded by the number of line breaks.
        let max_line = s.chars().filter(|&c| c == '\n' || c == '\r').count() as u32 + 1;
        let total_chars = s.chars().count();

        for tok in &tokens {
            prop_assert!(tok.line >= 1, "line 0 for {tok:?} in {s:?}");
            prop_assert!(tok.column >= 1, "column 0 for {tok:?} in {s:?}");
            prop_assert!(tok.line <= max_line, "line out of bounds for {tok:?} in {s:?}");
            prop_assert!(
                tok.text.chars().count() <= total_chars,
                "token longer than input: {tok:?} in {s:?}"
            );
        }

        for diag in &diagnostics {
            prop_assert!(diag.line >= 1 && diag.column >= 1, "bad location {diag:?} in {s:?}");
            prop_assert!(diag.line <= max_line, "diag line out of bounds {diag:?} in {s:?}");
        }
    }
}
