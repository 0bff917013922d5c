//! Log diagnostic engine for ScriptHookVDotNet log files.
//!
//! A run walks the log once: every line goes through the [`LineClassifier`]
//! (which owns the cross-line continuation state), recognized problems are
//! localized and deduplicated by the [`Aggregator`], and the
//! [`ReportRenderer`] packs the result into size-bounded segments.
//! [`DiagnosticSession`] wires the pieces together.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Deduplicating, counted problem buckets.
pub mod aggregator;
/// Ordered classification rules and noise filters.
pub mod catalog;
/// Per-line classification with continuation state.
pub mod classifier;
/// Greedy packing of aggregated problems into report segments.
pub mod renderer;
/// One-shot orchestration of a diagnostic run.
pub mod session;

pub use aggregator::{Aggregator, ClassifiedProblem, ProblemBucket};
pub use catalog::{CatalogError, PatternCatalog, PatternRule};
pub use classifier::{Classification, CrossLineState, LineClassifier};
pub use renderer::{ReportRenderer, ReportSegment, DEFAULT_MAX_SEGMENT_SIZE};
pub use session::DiagnosticSession;

/// Severity of a recognized log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// `[WARNING]` lines.
    Warning,
    /// `[ERROR]` lines.
    Error,
}

impl Severity {
    /// Map a level token from the log envelope to a severity.
    ///
    /// Matching is case-sensitive; any other token (`INFO`, `DEBUG`, ...)
    /// yields `None`.
    pub fn from_level(level: &str) -> Option<Self> {
        match level {
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    /// Glyph prefixed to every rendered problem of this severity.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Warning => "\u{1f7e1}",
            Self::Error => "\u{1f534}",
        }
    }
}

/// Opaque key resolved to human text by a [`crate::localization::Localizer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelId(Cow<'static, str>);

impl LabelId {
    /// Create a label from a static key. Usable in `const` context.
    pub const fn from_static(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    /// The raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LabelId {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}

impl From<&'static str> for LabelId {
    fn from(key: &'static str) -> Self {
        Self::from_static(key)
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Labels used by the engine itself and by the default catalog.
pub mod labels {
    use super::LabelId;

    /// The SHVDN configuration file is missing.
    pub const CONFIG_MISSING: LabelId = LabelId::from_static("DIAGNOSER_CONFIG_MISSING");
    /// A custom script instance was used without being instantiated. `{0}` = type.
    pub const NOT_INSTANTIATED: LabelId = LabelId::from_static("DIAGNOSER_NOT_INSTANTIATED");
    /// A script needs an assembly that is not installed. `{0}` = script,
    /// `{1}` = assembly, `{2}` = minimum version.
    pub const MISSING_DEPENDENCY: LabelId = LabelId::from_static("DIAGNOSER_MISSING_DEPENDENCY");
    /// A script has no public default constructor. `{0}` = script.
    pub const NO_CONSTRUCTOR: LabelId = LabelId::from_static("DIAGNOSER_NO_CONSTRUCTOR");
    /// A script threw while running. `{0}` = script.
    pub const SCRIPT_CRASHED: LabelId = LabelId::from_static("DIAGNOSER_SCRIPT_CRASHED");
    /// A script listed under the legacy API version 2 notice. `{0}` = details.
    pub const LEGACY_API: LabelId = LabelId::from_static("DIAGNOSER_LEGACY_API");
    /// Fallback for recognized lines no rule matched. `{0}` = raw details.
    pub const UNKNOWN: LabelId = LabelId::from_static("DIAGNOSER_UNKNOWN");
    /// Report title. `{0}` = distinct errors, `{1}` = distinct warnings.
    pub const TITLE: LabelId = LabelId::from_static("DIAGNOSER_TITLE");
    /// Report title when nothing was found.
    pub const NOTHING_FOUND: LabelId = LabelId::from_static("DIAGNOSER_NOTHING_FOUND");
}
