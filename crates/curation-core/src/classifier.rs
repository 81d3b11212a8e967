use thiserror::Error;
use whatlang::Detector;

use crate::LanguageCode;
use crate::language;

/// One ranked classifier output.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub lang: LanguageCode,
    pub prob: f64,
}

#[derive(Error, Debug, PartialEq)]
pub enum ClassifierError {
    #[error("no language features found in text")]
    NoFeatures,
    #[error("classifier failed: {0}")]
    Failed(String),
}

/// Trait for probabilistic language identification backends.
///
/// Implementors only score text; candidate-set restriction and thresholding
/// are applied on top by [`crate::LanguageDetector`].
pub trait LanguageClassifier: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Candidates for `text`, ranked by descending probability.
    fn classify(&self, text: &str) -> Result<Vec<Candidate>, ClassifierError>;
}

/// whatlang-based implementation of [`LanguageClassifier`].
///
/// whatlang scores trigrams without any sampling, so the same text always
/// produces the same answer. The model always scores against every language
/// it knows: restricting it would relabel out-of-set text with the closest
/// allowed language and distort its confidence.
pub struct WhatlangClassifier {
    detector: Detector,
}

impl Default for WhatlangClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl WhatlangClassifier {
    pub fn new() -> Self {
        Self {
            detector: Detector::new(),
        }
    }
}

impl LanguageClassifier for WhatlangClassifier {
    fn name(&self) -> &'static str {
        "whatlang"
    }

    fn classify(&self, text: &str) -> Result<Vec<Candidate>, ClassifierError> {
        let info = self
            .detector
            .detect(text)
            .ok_or(ClassifierError::NoFeatures)?;
        Ok(vec![Candidate {
            lang: language::from_whatlang(info.lang()),
            prob: info.confidence(),
        }])
    }
}
