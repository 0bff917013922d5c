//! Ordered classification rules for SHVDN log details.
//!
//! Declaration order is priority: the first rule that matches a line wins
//! and no later rule is tried. The catalog is immutable once built and can be
//! shared by reference across concurrent runs.

use regex::Regex;

use super::{labels, LabelId};

/// Details text that is noise regardless of severity.
const FATAL_EXCEPTION: &str = "Caught fatal unhandled exception:";

/// Prefix of the line SHVDN prints after a script was aborted.
const ABORTED_SCRIPT: &str = "Aborted script ";

/// Details text that opens the legacy API version 2 script listing.
pub const LEGACY_API_TRIGGER: &str = "The following scripts are using the legacy API version 2:";

/// Errors raised while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A regex rule failed to compile.
    #[error("invalid pattern for label {label}: {source}")]
    InvalidPattern {
        /// Label of the offending rule.
        label: LabelId,
        /// Compilation error from the regex engine.
        #[source]
        source: regex::Error,
    },
}

/// One classification rule.
#[derive(Debug, Clone)]
pub enum PatternRule {
    /// Matches when the details start with `text`. Carries no arguments.
    LiteralPrefix {
        /// Required prefix.
        text: String,
        /// Label reported on match.
        label: LabelId,
    },
    /// Matches when `pattern` matches at the start of the details; capture
    /// groups become positional arguments.
    Regex {
        /// Compiled pattern, already anchored at the start.
        pattern: Regex,
        /// Label reported on match.
        label: LabelId,
    },
}

impl PatternRule {
    /// Build a literal-prefix rule.
    pub fn prefix(text: impl Into<String>, label: LabelId) -> Self {
        Self::LiteralPrefix {
            text: text.into(),
            label,
        }
    }

    /// Build a regex rule, anchoring `pattern` at the start of the details.
    ///
    /// The pattern does not need to consume the whole string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPattern`] if the pattern does not compile.
    pub fn regex(pattern: &str, label: LabelId) -> Result<Self, CatalogError> {
        match Regex::new(&format!("^(?:{pattern})")) {
            Ok(pattern) => Ok(Self::Regex { pattern, label }),
            Err(source) => Err(CatalogError::InvalidPattern { label, source }),
        }
    }

    /// Label reported when this rule matches.
    pub fn label(&self) -> &LabelId {
        match self {
            Self::LiteralPrefix { label, .. } | Self::Regex { label, .. } => label,
        }
    }

    /// Test `details` against this rule, returning the captured arguments.
    ///
    /// Unmatched optional groups become empty strings so argument positions
    /// stay stable.
    pub fn matches(&self, details: &str) -> Option<Vec<String>> {
        match self {
            Self::LiteralPrefix { text, .. } => details.starts_with(text.as_str()).then(Vec::new),
            Self::Regex { pattern, .. } => {
                let captures = pattern.captures(details)?;
                Some(
                    captures
                        .iter()
                        .skip(1)
                        .map(|group| group.map_or_else(String::new, |m| m.as_str().to_owned()))
                        .collect(),
                )
            }
        }
    }
}

/// Ordered rule list plus noise filters and the continuation trigger.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    rules: Vec<PatternRule>,
    ignored_exact: Vec<String>,
    ignored_prefixes: Vec<String>,
    continuation_triggers: Vec<String>,
}

impl PatternCatalog {
    /// Build a catalog from explicit parts.
    pub fn new(
        rules: Vec<PatternRule>,
        ignored_exact: Vec<String>,
        ignored_prefixes: Vec<String>,
        continuation_triggers: Vec<String>,
    ) -> Self {
        Self {
            rules,
            ignored_exact,
            ignored_prefixes,
            continuation_triggers,
        }
    }

    /// The catalog for ScriptHookVDotNet logs.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the built-in patterns fails to compile.
    pub fn shvdn() -> Result<Self, CatalogError> {
        let rules = vec![
            PatternRule::prefix(
                "Failed to load config: System.IO.FileNotFoundException",
                labels::CONFIG_MISSING,
            ),
            PatternRule::regex(
                r"A script tried to use a custom script instance of type ([A-Za-z0-9_.]*) that was not instantiated by ScriptHookVDotNet",
                labels::NOT_INSTANTIATED,
            )?,
            PatternRule::regex(
                r"Failed to instantiate script ([A-Za-z0-9_.]*) because constructor threw an exception: System\.IO\.FileNotFoundException: .* '([A-Za-z0-9.]*), Version=([0-9.]*),",
                labels::MISSING_DEPENDENCY,
            )?,
            PatternRule::regex(
                r"Failed to load assembly ([A-Za-z0-9_.]*)\.dll: System\.IO\.FileNotFoundException: Could not load file or assembly '([A-Za-z0-9.]*), Version=([0-9.]*),",
                labels::MISSING_DEPENDENCY,
            )?,
            PatternRule::regex(
                r"Failed to instantiate script ([A-Za-z0-9_.]*) because no public default constructor was found",
                labels::NO_CONSTRUCTOR,
            )?,
            PatternRule::regex(
                r"The exception was thrown while executing the script ([A-Za-z0-9_.]*)",
                labels::SCRIPT_CRASHED,
            )?,
        ];

        Ok(Self::new(
            rules,
            vec![FATAL_EXCEPTION.to_owned()],
            vec![ABORTED_SCRIPT.to_owned()],
            vec![LEGACY_API_TRIGGER.to_owned()],
        ))
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Whether `details` is noise that never produces a problem.
    pub fn is_ignored(&self, details: &str) -> bool {
        self.ignored_exact.iter().any(|exact| exact == details)
            || self
                .ignored_prefixes
                .iter()
                .any(|prefix| details.starts_with(prefix.as_str()))
    }

    /// Whether `details` exactly equals a continuation trigger phrase.
    pub fn is_continuation_trigger(&self, details: &str) -> bool {
        self.continuation_triggers
            .iter()
            .any(|trigger| trigger == details)
    }

    /// First rule matching `details`, with its captured arguments.
    pub fn first_match(&self, details: &str) -> Option<(&PatternRule, Vec<String>)> {
        self.rules
            .iter()
            .find_map(|rule| rule.matches(details).map(|args| (rule, args)))
    }
}
