//! Translation table loading and fallback tests.

use leek::diagnoser::{labels, LabelId};
use leek::localization::{is_supported, LocalizationError, Localizer, Translations};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

#[test]
fn embedded_english_formats_arguments() {
    let translations = Translations::embedded();
    let text = translations.resolve(
        &labels::MISSING_DEPENDENCY,
        "en-US",
        &args(&["MyMod", "NativeUI", "1.9.0.0"]),
    );
    assert_eq!(text, "MyMod requires NativeUI version 1.9.0.0 or higher but is not installed");
}

#[test]
fn missing_locale_falls_back_to_default() {
    let translations = Translations::embedded();
    let text = translations.resolve(&labels::UNKNOWN, "ja", &args(&["raw"]));
    assert_eq!(text, "Unknown (raw)");
}

#[test]
fn missing_label_resolves_to_key_unformatted() {
    let translations = Translations::embedded();
    let label = LabelId::from_static("NOT_A_LABEL");
    assert_eq!(translations.resolve(&label, "en-US", &args(&["x"])), "NOT_A_LABEL");
    assert_eq!(
        Translations::empty().resolve(&labels::TITLE, "en-US", &args(&["1", "2"])),
        "DIAGNOSER_TITLE"
    );
}

#[test]
fn load_dir_overlays_supported_locales() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("fr.json"),
        r#"{"DIAGNOSER_UNKNOWN": "Inconnu ({0})"}"#,
    )
    .expect("write fr");
    std::fs::write(
        dir.path().join("en-US.json"),
        r#"{"DIAGNOSER_TITLE": "{0} errors, {1} warnings"}"#,
    )
    .expect("write en-US");

    let mut translations = Translations::embedded();
    translations.load_dir(dir.path()).expect("load dir");

    assert_eq!(
        translations.resolve(&labels::UNKNOWN, "fr", &args(&["x"])),
        "Inconnu (x)"
    );
    // Labels absent from the French file still come from en-US.
    assert_eq!(
        translations.resolve(&labels::SCRIPT_CRASHED, "fr", &args(&["A"])),
        "A crashed, contact the developer with this log file"
    );
    // Overlay replaces only the entries it defines.
    assert_eq!(
        translations.resolve(&labels::TITLE, "en-US", &args(&["1", "2"])),
        "1 errors, 2 warnings"
    );
    assert_eq!(
        translations.resolve(&labels::UNKNOWN, "en-US", &args(&["x"])),
        "Unknown (x)"
    );
}

#[test]
fn malformed_and_unsupported_files_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("de.json"), "{ not json").expect("write de");
    std::fs::write(
        dir.path().join("xx.json"),
        r#"{"DIAGNOSER_UNKNOWN": "never loaded"}"#,
    )
    .expect("write xx");

    let mut translations = Translations::embedded();
    translations.load_dir(dir.path()).expect("load dir");

    assert!(!translations.all_locales("DIAGNOSER_UNKNOWN").contains_key("de"));
    assert!(!translations.all_locales("DIAGNOSER_UNKNOWN").contains_key("xx"));
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope");

    let result = Translations::embedded().load_dir(&missing);
    assert!(matches!(result, Err(LocalizationError::Io { .. })));
}

#[test]
fn all_locales_lists_every_defining_locale() {
    let mut translations = Translations::embedded();
    translations.insert("pt-BR", "MESSAGE_DIAGNOSE_NAME", "Diagnosticar log do SHVDN");

    let found = translations.all_locales("MESSAGE_DIAGNOSE_NAME");
    let locales: Vec<&str> = found.keys().map(String::as_str).collect();
    assert_eq!(locales, vec!["en-US", "es-ES", "pt-BR"]);
    assert!(translations.all_locales("NOT_A_LABEL").is_empty());
}

#[test]
fn supported_locales() {
    assert!(is_supported("en-US"));
    assert!(is_supported("zh-TW"));
    assert!(!is_supported("en"));
}
