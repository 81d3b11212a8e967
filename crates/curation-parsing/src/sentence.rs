//! Sentence-level tokenization via Unicode (UAX #29) sentence boundaries.
//!
//! Each sentence becomes its own paragraph. This splits finer than the
//! logical paragraph (a leading `1.` marker ends up on its own) but gives
//! the language detector short, single-language inputs.
//!
//! Line breaks are collapsed to spaces before segmentation: OCR text wraps
//! sentences across lines, and UAX #29 would otherwise end a sentence at
//! every newline.

use unicode_segmentation::UnicodeSegmentation;

pub fn tokenize(text: &str) -> Vec<String> {
    let flattened = text.replace(['\r', '\n'], " ");
    flattened
        .unicode_sentences()
        .map(|sentence| sentence.trim().to_string())
        .filter(|sentence| !sentence.is_empty())
        .collect()
}
