//! Deduplicating problem buckets.
//!
//! Deduplication runs on the final display text, so two argument sets that
//! render identically are merged into one entry.

use std::collections::HashMap;

use super::Severity;

/// A problem after localization: severity plus display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedProblem {
    /// Bucket the problem belongs to.
    pub severity: Severity,
    /// Glyph-prefixed, localized message.
    pub rendered_text: String,
}

/// Ordered message → count mapping for one severity.
///
/// Entries keep first-seen order and are never reordered by frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemBucket {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl ProblemBucket {
    /// Create an empty bucket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `message`, appending it if unseen.
    pub fn add(&mut self, message: String) {
        if let Some(&position) = self.index.get(&message) {
            if let Some((_, count)) = self.entries.get_mut(position) {
                *count = count.saturating_add(1);
            }
            return;
        }

        self.index.insert(message.clone(), self.entries.len());
        self.entries.push((message, 1));
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(message, count)| (message.as_str(), *count))
    }

    /// Occurrence count of `message`, if present.
    pub fn count(&self, message: &str) -> Option<usize> {
        let position = *self.index.get(message)?;
        self.entries.get(position).map(|(_, count)| *count)
    }

    /// Number of distinct messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bucket has no messages.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Error and warning buckets for one run.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    errors: ProblemBucket,
    warnings: ProblemBucket,
}

impl Aggregator {
    /// Create an aggregator with two empty buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one problem in the bucket for its severity.
    pub fn record(&mut self, problem: ClassifiedProblem) {
        match problem.severity {
            Severity::Error => self.errors.add(problem.rendered_text),
            Severity::Warning => self.warnings.add(problem.rendered_text),
        }
    }

    /// Distinct message counts as `(errors, warnings)`.
    pub fn totals(&self) -> (usize, usize) {
        (self.errors.len(), self.warnings.len())
    }

    /// The error bucket.
    pub fn errors(&self) -> &ProblemBucket {
        &self.errors
    }

    /// The warning bucket.
    pub fn warnings(&self) -> &ProblemBucket {
        &self.warnings
    }

    /// Consume the aggregator, returning `(errors, warnings)`.
    pub fn into_buckets(self) -> (ProblemBucket, ProblemBucket) {
        (self.errors, self.warnings)
    }
}
