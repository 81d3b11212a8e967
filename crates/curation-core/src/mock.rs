//! Mock classifier for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::classifier::{Candidate, ClassifierError, LanguageClassifier};

/// A hand-rolled mock implementing [`LanguageClassifier`] for tests.
///
/// Each rule pairs a lowercase keyword with the ranked candidates returned
/// when the (lowercased) text contains it. Rules are checked in insertion
/// order; text matching no rule fails with [`ClassifierError::NoFeatures`],
/// the same way a real model fails on symbol-only input.
#[derive(Debug, Default)]
pub struct KeywordClassifier {
    rules: Vec<(String, Vec<Candidate>)>,
    call_count: AtomicUsize,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule returning a single candidate with probability 1.0.
    pub fn with_rule(self, keyword: &str, lang: &str) -> Self {
        self.with_ranked_rule(keyword, &[(lang, 1.0)])
    }

    /// Add a rule returning several candidates in the given order.
    pub fn with_ranked_rule(mut self, keyword: &str, candidates: &[(&str, f64)]) -> Self {
        let candidates = candidates
            .iter()
            .map(|(lang, prob)| Candidate {
                lang: lang.to_string(),
                prob: *prob,
            })
            .collect();
        self.rules.push((keyword.to_lowercase(), candidates));
        self
    }

    /// Number of times [`LanguageClassifier::classify`] was invoked.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl LanguageClassifier for KeywordClassifier {
    fn name(&self) -> &'static str {
        "keyword-mock"
    }

    fn classify(&self, text: &str) -> Result<Vec<Candidate>, ClassifierError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let text = text.to_lowercase();
        self.rules
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, candidates)| candidates.clone())
            .ok_or(ClassifierError::NoFeatures)
    }
}
