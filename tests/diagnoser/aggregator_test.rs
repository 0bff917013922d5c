//! Aggregator and bucket tests.

use leek::diagnoser::{Aggregator, ClassifiedProblem, ProblemBucket, Severity};

fn problem(severity: Severity, text: &str) -> ClassifiedProblem {
    ClassifiedProblem {
        severity,
        rendered_text: text.to_owned(),
    }
}

#[test]
fn repeated_message_is_counted_once() {
    let mut aggregator = Aggregator::new();
    for _ in 0..7 {
        aggregator.record(problem(Severity::Error, "boom"));
    }

    let entries: Vec<(&str, usize)> = aggregator.errors().entries().collect();
    assert_eq!(entries, vec![("boom", 7)]);
    assert_eq!(aggregator.totals(), (1, 0));
}

#[test]
fn first_seen_order_is_preserved() {
    let mut bucket = ProblemBucket::new();
    bucket.add("b".to_owned());
    bucket.add("a".to_owned());
    bucket.add("a".to_owned());
    bucket.add("a".to_owned());
    bucket.add("c".to_owned());
    bucket.add("b".to_owned());

    let entries: Vec<(&str, usize)> = bucket.entries().collect();
    assert_eq!(entries, vec![("b", 2), ("a", 3), ("c", 1)]);
    assert_eq!(bucket.count("a"), Some(3));
    assert_eq!(bucket.count("missing"), None);
}

#[test]
fn severities_go_to_separate_buckets() {
    let mut aggregator = Aggregator::new();
    aggregator.record(problem(Severity::Error, "same"));
    aggregator.record(problem(Severity::Warning, "same"));
    aggregator.record(problem(Severity::Warning, "other"));

    assert_eq!(aggregator.totals(), (1, 2));
    assert_eq!(aggregator.errors().count("same"), Some(1));
    assert_eq!(aggregator.warnings().count("same"), Some(1));

    let (errors, warnings) = aggregator.into_buckets();
    assert_eq!(errors.len(), 1);
    assert_eq!(warnings.len(), 2);
}

#[test]
fn totals_count_distinct_messages_not_occurrences() {
    let mut aggregator = Aggregator::new();
    aggregator.record(problem(Severity::Warning, "w"));
    aggregator.record(problem(Severity::Warning, "w"));
    aggregator.record(problem(Severity::Error, "e1"));
    aggregator.record(problem(Severity::Error, "e2"));
    aggregator.record(problem(Severity::Error, "e1"));

    assert_eq!(aggregator.totals(), (2, 1));
}

#[test]
fn new_bucket_is_empty() {
    let bucket = ProblemBucket::new();
    assert!(bucket.is_empty());
    assert_eq!(bucket.entries().count(), 0);
}
