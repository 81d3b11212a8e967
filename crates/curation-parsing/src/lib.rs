use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub mod sentence;
pub mod simple;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParsingError {
    #[error("unknown tokenizer: {0}")]
    UnknownTokenizer(String),
}

/// Paragraph tokenization strategy.
///
/// Both strategies return trimmed, non-empty paragraphs in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenizerKind {
    /// Line heuristic: a paragraph starts at every numbered line.
    Simple,
    /// Every Unicode sentence becomes its own paragraph.
    Sentence,
}

impl TokenizerKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Sentence => "sentence",
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        match self {
            Self::Simple => simple::tokenize(text),
            Self::Sentence => sentence::tokenize(text),
        }
    }
}

impl FromStr for TokenizerKind {
    type Err = ParsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "sentence" => Ok(Self::Sentence),
            _ => Err(ParsingError::UnknownTokenizer(s.to_string())),
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_name() {
        assert_eq!("simple".parse::<TokenizerKind>(), Ok(TokenizerKind::Simple));
        assert_eq!("sentence".parse::<TokenizerKind>(), Ok(TokenizerKind::Sentence));
        assert_eq!(" Simple ".parse::<TokenizerKind>(), Ok(TokenizerKind::Simple));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "invalid".parse::<TokenizerKind>().unwrap_err();
        assert_eq!(err, ParsingError::UnknownTokenizer("invalid".into()));
        assert_eq!(err.to_string(), "unknown tokenizer: invalid");
    }

    #[test]
    fn dispatches_to_strategy() {
        let text = "1. First.\nStill first.\n2. Second.";
        assert_eq!(TokenizerKind::Simple.tokenize(text), simple::tokenize(text));
        assert_eq!(
            TokenizerKind::Sentence.tokenize(text),
            sentence::tokenize(text)
        );
    }

    #[test]
    fn empty_text_for_every_strategy() {
        for kind in [TokenizerKind::Simple, TokenizerKind::Sentence] {
            assert!(kind.tokenize("").is_empty(), "{kind}");
        }
    }
}
