//! Report rendering under a per-segment size budget.
//!
//! Lengths are counted in `char`s. The title is carried beside the body and
//! never counts against the budget.

use serde::{Deserialize, Serialize};

use super::aggregator::ProblemBucket;
use super::labels;
use crate::localization::Localizer;

/// Body budget used when none is configured (the chat host's message limit).
pub const DEFAULT_MAX_SEGMENT_SIZE: usize = 4096;

/// One size-bounded unit of report output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSegment {
    /// Title text; only the first segment of a report has one.
    pub title: Option<String>,
    /// Newline-separated problem lines.
    pub body: String,
}

impl ReportSegment {
    /// Whether this segment carries the report title.
    pub fn has_title(&self) -> bool {
        self.title.is_some()
    }

    fn continuation() -> Self {
        Self {
            title: None,
            body: String::new(),
        }
    }
}

/// Packs aggregated buckets into segments.
pub struct ReportRenderer<'a> {
    localizer: &'a dyn Localizer,
    locale: &'a str,
    max_segment_size: usize,
}

impl<'a> ReportRenderer<'a> {
    /// Create a renderer. A `max_segment_size` of zero is treated as one.
    pub fn new(localizer: &'a dyn Localizer, locale: &'a str, max_segment_size: usize) -> Self {
        Self {
            localizer,
            locale,
            max_segment_size: max_segment_size.max(1),
        }
    }

    /// Render errors then warnings as `"{message} ({count})"` lines, greedily
    /// packed into segments no longer than the budget.
    pub fn render(&self, errors: &ProblemBucket, warnings: &ProblemBucket) -> Vec<ReportSegment> {
        if errors.is_empty() && warnings.is_empty() {
            return vec![ReportSegment {
                title: Some(
                    self.localizer
                        .resolve(&labels::NOTHING_FOUND, self.locale, &[]),
                ),
                body: String::new(),
            }];
        }

        let title = self.localizer.resolve(
            &labels::TITLE,
            self.locale,
            &[errors.len().to_string(), warnings.len().to_string()],
        );

        let lines = errors
            .entries()
            .chain(warnings.entries())
            .map(|(message, count)| format!("{message} ({count})"));

        let mut segments = Vec::new();
        let mut current = ReportSegment {
            title: Some(title),
            body: String::new(),
        };
        let mut current_len: usize = 0;

        for line in lines {
            for piece in split_to_budget(&line, self.max_segment_size) {
                let piece_len = piece.chars().count();
                let needed = if current.body.is_empty() {
                    piece_len
                } else {
                    current_len.saturating_add(1).saturating_add(piece_len)
                };

                if needed > self.max_segment_size {
                    segments.push(std::mem::replace(&mut current, ReportSegment::continuation()));
                    current_len = 0;
                }

                if !current.body.is_empty() {
                    current.body.push('\n');
                    current_len = current_len.saturating_add(1);
                }
                current.body.push_str(piece);
                current_len = current_len.saturating_add(piece_len);
            }
        }

        if !current.body.is_empty() {
            segments.push(current);
        }

        segments
    }
}

/// Split `line` into consecutive pieces of at most `max` chars.
fn split_to_budget(line: &str, max: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut taken: usize = 0;

    for (offset, _) in line.char_indices() {
        if taken == max {
            pieces.push(&line[start..offset]);
            start = offset;
            taken = 0;
        }
        taken = taken.saturating_add(1);
    }
    pieces.push(&line[start..]);

    pieces
}
