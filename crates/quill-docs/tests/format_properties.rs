//! Property tests for markdown normalization.

use proptest::prelude::*;
use quill_docs::format_markdown;

/// Text dominated by whitespace so blank-line handling is exercised often.
fn markdown_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("\n".to_string()),
            Just("\t".to_string()),
            Just(" ".to_string()),
            "[a-z#>`]{1,6}",
        ],
        0..48,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_formatting_is_idempotent(input in markdown_strategy()) {
        let once = format_markdown(&input);
        prop_assert_eq!(format_markdown(&once), once);
    }

    #[test]
    fn prop_output_has_no_tabs(input in markdown_strategy()) {
        prop_assert!(!format_markdown(&input).contains('\t'));
    }

    #[test]
    fn prop_output_has_at_most_one_blank_line(input in markdown_strategy()) {
        prop_assert!(!format_markdown(&input).contains("\n\n\n"));
    }

    #[test]
    fn prop_text_is_preserved(input in markdown_strategy()) {
        let strip = |text: &str| text.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        prop_assert_eq!(strip(&format_markdown(&input)), strip(&input));
    }
}
