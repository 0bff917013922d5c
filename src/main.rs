//! Leek CLI entry point.
//!
//! Provides `diagnose` for running the log diagnoser over a file or stdin,
//! and `label` for inspecting a label's translations.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use leek::config::{load_config, load_default_config, LeekConfig};
use leek::diagnoser::{DiagnosticSession, PatternCatalog, ReportSegment};
use leek::localization::Translations;
use leek::logging;

/// Leek — diagnose ScriptHookVDotNet log files.
#[derive(Parser)]
#[command(name = "leek", version, about)]
struct Cli {
    /// Path to a `leek.toml` (default: `~/.leek/leek.toml` if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Diagnose a log file and print the report.
    Diagnose {
        /// Log file to read, or `-` for stdin.
        path: PathBuf,
        /// Locale to render the report in.
        #[arg(long)]
        locale: Option<String>,
        /// Maximum body length of one report segment, in characters.
        #[arg(long)]
        max_segment_size: Option<usize>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print a label's template in every locale that defines it.
    Label {
        /// Label key, e.g. `DIAGNOSER_TITLE`.
        label: String,
    },
}

/// Report output format.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Title and bodies as plain text.
    Text,
    /// Segments as a JSON array.
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => load_default_config()?,
    };

    if let Command::Diagnose {
        locale,
        max_segment_size,
        ..
    } = &cli.command
    {
        if let Some(locale) = locale {
            config.diagnoser.locale.clone_from(locale);
        }
        if let Some(size) = max_segment_size {
            config.diagnoser.max_segment_size = *size;
        }
        config.validate()?;
    }

    let _logging_guard = match &config.logging.dir {
        Some(dir) => Some(logging::init_file(dir, &config.logging.level)?),
        None => {
            logging::init_cli(&config.logging.level);
            None
        }
    };

    let translations = load_translations(&config)?;

    match cli.command {
        Command::Diagnose { path, format, .. } => {
            handle_diagnose(&path, format, &config, &translations)
        }
        Command::Label { label } => handle_label(&label, &translations),
    }
}

/// Built-in tables plus the configured overlay directory.
fn load_translations(config: &LeekConfig) -> anyhow::Result<Translations> {
    let mut translations = Translations::embedded();
    if let Some(dir) = &config.localization.dir {
        translations
            .load_dir(dir)
            .with_context(|| format!("failed to load translations from {}", dir.display()))?;
        debug!(dir = %dir.display(), "translation overlay loaded");
    }
    Ok(translations)
}

/// Run one diagnostic session over the log at `path` and print the report.
fn handle_diagnose(
    path: &Path,
    format: Format,
    config: &LeekConfig,
    translations: &Translations,
) -> anyhow::Result<()> {
    let text = read_log(path)?;
    info!(source = %path.display(), bytes = text.len(), "diagnosing log");

    let catalog = PatternCatalog::shvdn().context("failed to build pattern catalog")?;
    let session = DiagnosticSession::new(
        &catalog,
        translations,
        &config.diagnoser.locale,
        config.diagnoser.max_segment_size,
    );
    let segments = session.run_text(&text);

    match format {
        Format::Text => print!("{}", format_text(&segments)),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&segments).context("failed to serialize report")?
        ),
    }

    Ok(())
}

/// Print every locale's template for `label`.
fn handle_label(label: &str, translations: &Translations) -> anyhow::Result<()> {
    let found = translations.all_locales(label);
    anyhow::ensure!(!found.is_empty(), "label {label} is not defined in any locale");

    for (locale, template) in found {
        println!("{locale}\t{template}");
    }
    Ok(())
}

/// Read the whole log as UTF-8 text from a file or stdin.
fn read_log(path: &Path) -> anyhow::Result<String> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read log from stdin")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    String::from_utf8(bytes)
        .map_err(|_| anyhow::anyhow!("{} is not a text file", path.display()))
}

/// Render segments as plain text, one blank line between segments.
fn format_text(segments: &[ReportSegment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if let Some(title) = &segment.title {
            out.push_str(title);
            out.push('\n');
        }
        if !segment.body.is_empty() {
            out.push_str(&segment.body);
            out.push('\n');
        }
    }
    out
}
