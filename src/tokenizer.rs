//! Whitespace tokenizer preserving byte offsets
//!
//! Spans index the original input so a variadic capture can reproduce
//! inter-token whitespace verbatim.

use crate::types::Span;
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("Invalid regex pattern"));

/// Split input into whitespace-delimited token spans, left to right.
///
/// The caller trims the input; an empty string yields no spans.
pub fn tokenize(input: &str) -> Vec<Span> {
    TOKEN
        .find_iter(input)
        .map(|m| Span { start: m.start(), end: m.end() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn single_token() {
        let spans = tokenize("latios");
        assert_eq!(spans, vec![Span { start: 0, end: 6 }]);
    }

    #[test]
    fn multiple_whitespace_is_one_separator() {
        let input = "a  b\tc";
        let spans = tokenize(input);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text(input), "a");
        assert_eq!(spans[1].text(input), "b");
        assert_eq!(spans[2].text(input), "c");
    }

    #[test]
    fn absorbed_spans_reproduce_internal_whitespace() {
        let input = "Galaxy:  Earth   Sphere";
        let spans = tokenize(input);
        assert_eq!(&input[spans[0].start..spans[2].end], "Galaxy:  Earth   Sphere");
    }

    #[test]
    fn offsets_are_bytes_into_original() {
        let input = "café 5";
        let spans = tokenize(input);
        assert_eq!(spans[0].text(input), "café");
        assert_eq!(spans[1].text(input), "5");
    }
}
