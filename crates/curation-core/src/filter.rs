use std::collections::BTreeSet;

use crate::detector::{DetectorOptions, LanguageDetector};
use crate::LanguageCode;

/// Which paragraphs a [`LanguageFilter`] keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    pub languages: BTreeSet<LanguageCode>,
    /// Keep paragraphs whose language could not be detected.
    pub keep_undetected: bool,
}

impl FilterPolicy {
    pub fn new<I, S>(languages: I, keep_undetected: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LanguageCode>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            keep_undetected,
        }
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::new(["en"], false)
    }
}

#[derive(Debug, Clone)]
pub struct LanguageFilter {
    policy: FilterPolicy,
    detector: LanguageDetector,
}

impl LanguageFilter {
    pub fn new(policy: FilterPolicy, detector: LanguageDetector) -> Self {
        Self { policy, detector }
    }

    /// Filter with a whatlang detector whose candidate set is the policy's
    /// languages.
    pub fn with_default_detector(policy: FilterPolicy) -> Self {
        let detector = LanguageDetector::whatlang(DetectorOptions {
            candidates: Some(policy.languages.clone()),
            threshold: None,
        });
        Self { policy, detector }
    }

    pub fn policy(&self) -> &FilterPolicy {
        &self.policy
    }

    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    /// Retention decision for an already computed detection.
    pub fn retains(&self, detection: Option<&str>) -> bool {
        match detection {
            Some(lang) => self.policy.languages.contains(lang),
            None => self.policy.keep_undetected,
        }
    }

    /// Keep the paragraphs the policy accepts, in their original order.
    pub fn filter(&self, paragraphs: &[String]) -> Vec<String> {
        paragraphs
            .iter()
            .filter(|p| self.retains(self.detector.detect(p).as_deref()))
            .cloned()
            .collect()
    }
}
