//! Single-use orchestration of one diagnostic run.

use tracing::{debug, info};

use super::aggregator::{Aggregator, ClassifiedProblem};
use super::catalog::PatternCatalog;
use super::classifier::{CrossLineState, LineClassifier};
use super::renderer::{ReportRenderer, ReportSegment};
use crate::localization::Localizer;

/// Runs the classifier, aggregator, and renderer over one log.
///
/// Each session owns its own continuation state and buckets; only the
/// catalog and localizer are shared, read-only.
pub struct DiagnosticSession<'a> {
    catalog: &'a PatternCatalog,
    localizer: &'a dyn Localizer,
    locale: &'a str,
    max_segment_size: usize,
}

impl<'a> DiagnosticSession<'a> {
    /// Create a session.
    pub fn new(
        catalog: &'a PatternCatalog,
        localizer: &'a dyn Localizer,
        locale: &'a str,
        max_segment_size: usize,
    ) -> Self {
        Self {
            catalog,
            localizer,
            locale,
            max_segment_size,
        }
    }

    /// Classify and aggregate `lines` in order without rendering.
    pub fn aggregate<'l, I>(&self, lines: I) -> Aggregator
    where
        I: IntoIterator<Item = &'l str>,
    {
        let classifier = LineClassifier::new(self.catalog);
        let mut state = CrossLineState::default();
        let mut aggregator = Aggregator::new();

        for (number, line) in lines.into_iter().enumerate() {
            let Some(found) = classifier.classify(line, &mut state) else {
                continue;
            };

            let message = self
                .localizer
                .resolve(&found.label, self.locale, &found.args);
            debug!(
                line = number.saturating_add(1),
                severity = ?found.severity,
                label = %found.label,
                "classified log line"
            );

            aggregator.record(ClassifiedProblem {
                severity: found.severity,
                rendered_text: format!("{} {message}", found.severity.glyph()),
            });
        }

        aggregator
    }

    /// Run the whole pipeline over `lines` and return the report segments.
    pub fn run<'l, I>(self, lines: I) -> Vec<ReportSegment>
    where
        I: IntoIterator<Item = &'l str>,
    {
        let mut scanned: usize = 0;
        let aggregator = self.aggregate(lines.into_iter().inspect(|_| {
            scanned = scanned.saturating_add(1);
        }));
        let (errors, warnings) = aggregator.totals();

        let renderer = ReportRenderer::new(self.localizer, self.locale, self.max_segment_size);
        let (error_bucket, warning_bucket) = aggregator.into_buckets();
        let segments = renderer.render(&error_bucket, &warning_bucket);

        info!(
            lines = scanned,
            errors,
            warnings,
            segments = segments.len(),
            "log diagnosis complete"
        );

        segments
    }

    /// Split `text` on line boundaries and [`run`](Self::run) over it.
    pub fn run_text(self, text: &str) -> Vec<ReportSegment> {
        self.run(text.lines())
    }
}
