use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::classifier::{Candidate, LanguageClassifier, WhatlangClassifier};
use crate::{CoreError, LanguageCode, language};

/// Detector identifier, resolved from the configured name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorKind {
    Whatlang,
}

impl DetectorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Whatlang => "whatlang",
        }
    }

    /// Construct the detector for this kind.
    ///
    /// This is the one-time setup step of a run: the classifier is built
    /// here and then shared, read-only, by every detection call.
    pub fn build(self, options: DetectorOptions) -> Result<LanguageDetector, CoreError> {
        options.validate()?;
        Ok(match self {
            Self::Whatlang => LanguageDetector::whatlang(options),
        })
    }
}

impl FromStr for DetectorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whatlang" | "probabilistic" => Ok(Self::Whatlang),
            _ => Err(CoreError::UnknownDetector(s.to_string())),
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options shared by every detector kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorOptions {
    /// Codes the detector may return. `None` allows every supported language.
    pub candidates: Option<BTreeSet<LanguageCode>>,
    /// Minimum probability (inclusive) for a candidate to be accepted.
    pub threshold: Option<f64>,
}

impl DetectorOptions {
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.threshold {
            Some(t) if !(0.0..=1.0).contains(&t) => Err(CoreError::InvalidThreshold(t)),
            _ => Ok(()),
        }
    }

    fn accepts(&self, candidate: &Candidate) -> bool {
        let in_set = self
            .candidates
            .as_ref()
            .is_none_or(|set| set.contains(&candidate.lang));
        let confident = self.threshold.is_none_or(|t| candidate.prob >= t);
        in_set && confident
    }
}

/// Applies candidate-set restriction and thresholding to a classifier.
///
/// Detection never fails: classifier errors (empty or symbol-only text)
/// count as zero candidates and the text is reported as undetected.
#[derive(Clone)]
pub struct LanguageDetector {
    classifier: Arc<dyn LanguageClassifier>,
    options: DetectorOptions,
}

impl fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageDetector")
            .field("classifier", &self.classifier.name())
            .field("options", &self.options)
            .finish()
    }
}

impl LanguageDetector {
    pub fn new(classifier: Arc<dyn LanguageClassifier>, options: DetectorOptions) -> Self {
        Self {
            classifier,
            options,
        }
    }

    /// Detector backed by an unrestricted whatlang model. Candidate codes
    /// whatlang cannot return are reported once, here.
    pub(crate) fn whatlang(options: DetectorOptions) -> Self {
        for code in options.candidates.iter().flatten() {
            if language::to_whatlang(code).is_none() {
                tracing::warn!(code = %code, "language not supported by whatlang, it will never be detected");
            }
        }
        Self::new(Arc::new(WhatlangClassifier::new()), options)
    }

    pub fn name(&self) -> &'static str {
        self.classifier.name()
    }

    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    /// Candidates that pass the candidate set and threshold, best first.
    pub fn accepted_candidates(&self, text: &str) -> Vec<Candidate> {
        let candidates = match self.classifier.classify(text) {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::debug!(classifier = self.classifier.name(), error = %e, "classification failed");
                Vec::new()
            }
        };
        candidates
            .into_iter()
            .filter(|c| self.options.accepts(c))
            .collect()
    }

    /// Best accepted language for `text`, or `None` when undetected.
    pub fn detect(&self, text: &str) -> Option<LanguageCode> {
        self.accepted_candidates(text)
            .into_iter()
            .next()
            .map(|c| c.lang)
    }
}
