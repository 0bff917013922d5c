//! Label localization.
//!
//! The diagnoser only knows [`LabelId`]s; a [`Localizer`] turns a label, a
//! locale, and positional arguments into display text. [`Translations`] is
//! the file-backed implementation: JSON tables of `label → template` per
//! locale, with built-in `en-US` and `es-ES` tables.
//!
//! Resolution never fails. A label missing from the requested locale falls
//! back to [`DEFAULT_LOCALE`], and a label missing there too resolves to its
//! own key, unformatted.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::diagnoser::LabelId;

/// Locale used when a label is missing from the requested one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Locale tags the chat host can request.
pub const SUPPORTED_LOCALES: [&str; 30] = [
    "id", "da", "de", "en-GB", "en-US", "es-ES", "fr", "hr", "it", "hu", "nl", "no", "pl", "pt-BR",
    "ro", "fi", "sv-SE", "vi", "tr", "cs", "el", "bg", "ru", "uk", "hi", "th", "zh-CN", "ja",
    "zh-TW", "ko",
];

const EMBEDDED: [(&str, &str); 2] = [
    ("en-US", include_str!("en-US.json")),
    ("es-ES", include_str!("es-ES.json")),
];

/// Resolves labels to display text.
///
/// Implementations must be total and free of side effects visible to the
/// caller.
pub trait Localizer: Send + Sync {
    /// Resolve `label` in `locale`, formatting it with `args`.
    fn resolve(&self, label: &LabelId, locale: &str, args: &[String]) -> String;
}

/// Errors loading translation files.
#[derive(Debug, thiserror::Error)]
pub enum LocalizationError {
    /// The translation directory could not be read.
    #[error("failed to read translation directory {}: {source}", .path.display())]
    Io {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Per-locale translation tables.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    tables: HashMap<String, HashMap<String, String>>,
}

impl Translations {
    /// Tables with no entries; every label resolves to its key.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in tables.
    pub fn embedded() -> Self {
        let mut translations = Self::empty();
        for (locale, source) in EMBEDDED {
            match serde_json::from_str::<HashMap<String, String>>(source) {
                Ok(table) => translations.merge(locale, table),
                Err(e) => warn!(locale, error = %e, "built-in translation table is malformed"),
            }
        }
        translations
    }

    /// Overlay `<locale>.json` files from `dir` for every supported locale.
    ///
    /// Entries in the files replace entries already loaded. A missing file is
    /// skipped; a file that cannot be read or parsed is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LocalizationError::Io`] if `dir` itself cannot be read.
    pub fn load_dir(&mut self, dir: &Path) -> Result<(), LocalizationError> {
        std::fs::read_dir(dir).map_err(|source| LocalizationError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for locale in SUPPORTED_LOCALES {
            let path = dir.join(format!("{locale}.json"));
            let contents = match std::fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), locale, "no translation file");
                    continue;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read translation file");
                    continue;
                }
            };

            match serde_json::from_str::<HashMap<String, String>>(&contents) {
                Ok(table) => {
                    debug!(path = %path.display(), entries = table.len(), "loaded translation file");
                    self.merge(locale, table);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unable to parse translation file");
                }
            }
        }

        Ok(())
    }

    /// Insert or replace a single template.
    pub fn insert(&mut self, locale: &str, label: &str, template: &str) {
        self.tables
            .entry(locale.to_owned())
            .or_default()
            .insert(label.to_owned(), template.to_owned());
    }

    /// Raw template of `label` in every locale that defines it.
    pub fn all_locales(&self, label: &str) -> BTreeMap<String, String> {
        self.tables
            .iter()
            .filter_map(|(locale, table)| {
                table
                    .get(label)
                    .map(|template| (locale.clone(), template.clone()))
            })
            .collect()
    }

    fn merge(&mut self, locale: &str, table: HashMap<String, String>) {
        self.tables.entry(locale.to_owned()).or_default().extend(table);
    }

    fn template(&self, label: &str, locale: &str) -> Option<&str> {
        self.tables
            .get(locale)
            .and_then(|table| table.get(label))
            .or_else(|| {
                self.tables
                    .get(DEFAULT_LOCALE)
                    .and_then(|table| table.get(label))
            })
            .map(String::as_str)
    }
}

impl Localizer for Translations {
    fn resolve(&self, label: &LabelId, locale: &str, args: &[String]) -> String {
        match self.template(label.as_str(), locale) {
            Some(template) => format_positional(template, args),
            None => label.as_str().to_owned(),
        }
    }
}

/// Whether `locale` is one of [`SUPPORTED_LOCALES`].
pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Replace `{N}` placeholders with `args[N]`.
///
/// `{{` and `}}` produce literal braces. Placeholders that are out of range
/// or not numeric are kept verbatim.
pub fn format_positional(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(position) = rest.find(['{', '}']) {
        let (head, tail) = rest.split_at(position);
        out.push_str(head);

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
            continue;
        }

        let placeholder = tail
            .find('}')
            .map(|end| (&tail[1..end], &tail[end.saturating_add(1)..]));

        match placeholder {
            Some((index, after)) => {
                match index.parse::<usize>().ok().and_then(|i| args.get(i)) {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('{');
                        out.push_str(index);
                        out.push('}');
                    }
                }
                rest = after;
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out
}
