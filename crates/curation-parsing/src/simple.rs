//! Line-oriented paragraph heuristic for numbered proceedings text.
//!
//! Proceedings paragraphs are numbered (`12. The Assembly decided...`,
//! `(3) Requests...`), so a line whose trimmed content starts with a digit,
//! or with `(` followed by a digit, opens a new paragraph. Every other line
//! continues the paragraph being built. Lines before the first numbered
//! line are merged into a single leading paragraph.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\(?[0-9]").unwrap());

/// Whether `line` opens a new paragraph.
pub fn is_paragraph_start(line: &str) -> bool {
    NUMBERING_RE.is_match(line.trim())
}

pub fn tokenize(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if is_paragraph_start(line) {
            flush(&mut paragraphs, &current);
            current.clear();
        } else {
            current.push(' ');
        }
        current.push_str(line);
    }
    flush(&mut paragraphs, &current);

    paragraphs
}

fn flush(paragraphs: &mut Vec<String>, current: &str) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        paragraphs.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_paragraph() {
        assert_eq!(
            tokenize("1. This is a single paragraph."),
            vec!["1. This is a single paragraph."]
        );
    }

    #[test]
    fn multiple_paragraphs() {
        assert_eq!(
            tokenize("1. This is the first paragraph.\n2. This is the second paragraph."),
            vec![
                "1. This is the first paragraph.",
                "2. This is the second paragraph."
            ]
        );
    }

    #[test]
    fn continuation_lines_join_with_space() {
        assert_eq!(
            tokenize("1. First.\nStill first.\n2. Second."),
            vec!["1. First. Still first.", "2. Second."]
        );
    }

    #[test]
    fn empty_lines_between_paragraphs() {
        assert_eq!(
            tokenize("1. This is the first paragraph.\n\n2. This is the second paragraph."),
            vec![
                "1. This is the first paragraph.",
                "2. This is the second paragraph."
            ]
        );
    }

    #[test]
    fn parenthesised_numbers() {
        assert_eq!(tokenize("(1) A.\n(2) B."), vec!["(1) A.", "(2) B."]);
    }

    #[test]
    fn mixed_number_formats() {
        assert_eq!(
            tokenize("1. This is the first paragraph.\n(2) This is the second paragraph."),
            vec![
                "1. This is the first paragraph.",
                "(2) This is the second paragraph."
            ]
        );
    }

    #[test]
    fn no_numbering_is_one_paragraph() {
        assert_eq!(
            tokenize("This is a paragraph without a number."),
            vec!["This is a paragraph without a number."]
        );
    }

    #[test]
    fn leading_unnumbered_lines_merge_into_first_paragraph() {
        assert_eq!(
            tokenize("GENERAL ASSEMBLY\nThird session\n1. Opening of the session."),
            vec!["GENERAL ASSEMBLY Third session", "1. Opening of the session."]
        );
    }

    #[test]
    fn leading_blank_lines_do_not_produce_empty_paragraphs() {
        assert_eq!(tokenize("\n\n1. A.\n2. B."), vec!["1. A.", "2. B."]);
    }

    #[test]
    fn indented_markers_still_start_paragraphs() {
        assert_eq!(tokenize("   1. A.\n  (2) B."), vec!["1. A.", "(2) B."]);
    }

    #[test]
    fn parenthesis_without_digit_continues() {
        assert_eq!(
            tokenize("1. A.\n(see annex) more.\n(b) still A."),
            vec!["1. A. (see annex) more. (b) still A."]
        );
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(
            tokenize("1. A.\r\ncontinued\r\n2. B.\r\n"),
            vec!["1. A. continued", "2. B."]
        );
    }

    #[test]
    fn empty_and_blank_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n\t\n").is_empty());
    }

    #[test]
    fn paragraph_start_detection() {
        assert!(is_paragraph_start("12. Item"));
        assert!(is_paragraph_start("  (3) Item"));
        assert!(!is_paragraph_start("(a) Item"));
        assert!(!is_paragraph_start("("));
        assert!(!is_paragraph_start("Item 1"));
        assert!(!is_paragraph_start(""));
    }
}
