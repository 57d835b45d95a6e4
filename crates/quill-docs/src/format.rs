use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("blank line pattern is valid"));

static REPEATED_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("newline pattern is valid"));

/// Normalizes rendered markdown:
///
/// 1. Replace every hard tab (`\t`) with four spaces.
/// 2. Collapse whitespace between two newlines into a single blank line.
/// 3. Collapse three or more consecutive newlines into two.
///
/// Applying the function twice yields the same output as applying it once.
pub fn format_markdown(markdown: &str) -> String {
    let expanded = markdown.replace('\t', "    ");
    let collapsed = WHITESPACE_BLANK_LINES.replace_all(&expanded, "\n\n");
    REPEATED_NEWLINES
        .replace_all(&collapsed, "\n\n")
        .into_owned()
}
