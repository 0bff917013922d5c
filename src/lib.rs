//! Leek — log diagnostics for ScriptHookVDotNet.
//!
//! Classifies the problem lines of a SHVDN log against an ordered pattern
//! catalog, deduplicates and counts them, and renders a report split into
//! segments that fit a chat message. Fetching the log and posting the
//! segments belong to the host.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Configuration loading and validation.
pub mod config;
/// Log classification, aggregation, and report rendering.
pub mod diagnoser;
/// Label localization.
pub mod localization;
/// Tracing subscriber setup.
pub mod logging;
