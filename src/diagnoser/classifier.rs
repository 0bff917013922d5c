//! Turns one raw log line into at most one classified problem.

use std::sync::LazyLock;

use regex::Regex;

use super::catalog::PatternCatalog;
use super::{labels, LabelId, Severity};

/// `[hh:mm:ss] [LEVEL] details`, searched anywhere in the line.
static ENVELOPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([0-9]{2}:[0-9]{2}:[0-9]{2})\] \[([^\]]+)\] (.*)")
        .expect("envelope pattern is valid")
});

/// Parsing state carried from one line to the next within a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossLineState {
    /// Set by the legacy API trigger line; cleared only by a line that does
    /// not match the envelope.
    pub in_legacy_continuation: bool,
}

/// A recognized problem before localization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Severity of the line.
    pub severity: Severity,
    /// Label to localize.
    pub label: LabelId,
    /// Positional arguments for the label.
    pub args: Vec<String>,
}

/// Classifies lines against a borrowed [`PatternCatalog`].
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier<'a> {
    catalog: &'a PatternCatalog,
}

impl<'a> LineClassifier<'a> {
    /// Create a classifier over `catalog`.
    pub fn new(catalog: &'a PatternCatalog) -> Self {
        Self { catalog }
    }

    /// Classify one line, updating `state`.
    ///
    /// Precedence:
    /// 1. A line outside the envelope clears continuation mode and yields nothing.
    /// 2. In continuation mode the whole details text is a legacy API warning,
    ///    whatever its level.
    /// 3. The trigger phrase enters continuation mode and yields nothing.
    /// 4. Unrecognized levels and ignored details yield nothing.
    /// 5. The first matching catalog rule wins.
    /// 6. Anything else is reported as unknown with the raw details.
    pub fn classify(&self, line: &str, state: &mut CrossLineState) -> Option<Classification> {
        let Some(captures) = ENVELOPE.captures(line) else {
            state.in_legacy_continuation = false;
            return None;
        };

        let level = captures.get(2).map_or("", |m| m.as_str());
        let details = captures.get(3).map_or("", |m| m.as_str());

        if state.in_legacy_continuation {
            return Some(Classification {
                severity: Severity::Warning,
                label: labels::LEGACY_API,
                args: vec![details.to_owned()],
            });
        }

        if self.catalog.is_continuation_trigger(details) {
            state.in_legacy_continuation = true;
            return None;
        }

        let severity = Severity::from_level(level)?;
        if self.catalog.is_ignored(details) {
            return None;
        }

        match self.catalog.first_match(details) {
            Some((rule, args)) => Some(Classification {
                severity,
                label: rule.label().clone(),
                args,
            }),
            None => Some(Classification {
                severity,
                label: labels::UNKNOWN,
                args: vec![details.to_owned()],
            }),
        }
    }
}
