// SPDX-License-Identifier: PMPL-1.0-or-later

//! End-to-end pipeline tests with a scripted translator

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use xcstrings_localizer::catalog::{Catalog, LocalizedUnit, UnitState};
use xcstrings_localizer::config::LocalizerConfig;
use xcstrings_localizer::localizer::{self, RunOutcome};
use xcstrings_localizer::regions::LanguageSet;
use xcstrings_localizer::response::TranslationResponse;
use xcstrings_localizer::translator::Translator;
use xcstrings_localizer::{LocalizerError, Result};

const PROJECT_FR_DE: &str = r#"
        isa = PBXProject;
        knownRegions = (
            en,
            Base,
            fr,
            de,
        );
"#;

const PROJECT_NO_REGIONS: &str = "isa = PBXProject;\ndevelopmentRegion = en;\n";

/// Replays a canned payload and records every request it receives.
struct ScriptedTranslator {
    payload: Result<String>,
    calls: RefCell<Vec<(BTreeSet<String>, LanguageSet)>>,
}

impl ScriptedTranslator {
    fn answering(payload: &str) -> Self {
        Self {
            payload: Ok(payload.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            payload: Err(LocalizerError::ExternalService(message.to_string())),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Translator for ScriptedTranslator {
    fn translate(&self, keys: &BTreeSet<String>, languages: &LanguageSet) -> Result<TranslationResponse> {
        self.calls
            .borrow_mut()
            .push((keys.clone(), languages.clone()));
        match &self.payload {
            Ok(payload) => TranslationResponse::parse(payload),
            Err(err) => Err(LocalizerError::ExternalService(err.to_string())),
        }
    }
}

struct Workspace {
    _dir: TempDir,
    catalog: PathBuf,
    project: PathBuf,
}

impl Workspace {
    fn new(catalog: &str, project: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let catalog_path = dir.path().join("Localizable.xcstrings");
        let project_path = dir.path().join("project.pbxproj");
        fs::write(&catalog_path, catalog).unwrap();
        fs::write(&project_path, project).unwrap();
        Self {
            _dir: dir,
            catalog: catalog_path,
            project: project_path,
        }
    }

    fn config(&self) -> LocalizerConfig {
        LocalizerConfig {
            catalog_path: Some(self.catalog.clone()),
            project_path: Some(self.project.clone()),
            ..LocalizerConfig::default()
        }
    }

    fn catalog_text(&self) -> String {
        fs::read_to_string(&self.catalog).unwrap()
    }

    fn catalog(&self) -> Catalog {
        Catalog::parse(&self.catalog_text()).unwrap()
    }
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn run_with(config: &LocalizerConfig, translator: &ScriptedTranslator) -> Result<RunOutcome> {
    localizer::run(config, |_| Ok(translator))
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_untranslated_key_is_filled_for_every_region() {
    let workspace = Workspace::new(r#"{"sourceLanguage": "en", "strings": {"hello": {}}, "version": "1.0"}"#, PROJECT_FR_DE);
    let translator = ScriptedTranslator::answering(
        r#"[{"key": "hello", "localizations": [
            {"language_code": "fr", "value": "Bonjour"},
            {"language_code": "de", "value": "Hallo"}
        ]}]"#,
    );

    let outcome = run_with(&workspace.config(), &translator).expect("run should succeed");
    assert_eq!(
        outcome,
        RunOutcome::Translated {
            keys: set(&["hello"]),
            languages: set(&["de", "fr"]),
        }
    );

    let calls = translator.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, set(&["hello"]));
    assert_eq!(calls[0].1, set(&["de", "fr"]));

    let catalog = workspace.catalog();
    let hello = catalog.entry("hello").expect("hello entry");
    assert_eq!(hello.localizations.len(), 2);
    assert_eq!(hello.unit("fr"), Some(&LocalizedUnit::translated("Bonjour")));
    assert_eq!(hello.unit("de"), Some(&LocalizedUnit::translated("Hallo")));
    assert!(hello
        .localizations
        .values()
        .all(|localization| localization.string_unit.state == UnitState::Translated));
}

#[test]
fn test_without_regions_only_untouched_keys_are_pending() {
    let workspace = Workspace::new(
        r#"{"strings": {"goodbye": {"localizations": {
            "fr": {"stringUnit": {"state": "translated", "value": "Au revoir"}}}}}}"#,
        PROJECT_NO_REGIONS,
    );

    let work = localizer::pending(&workspace.config()).expect("pending should succeed");
    assert!(work.languages.is_empty());
    assert!(work.keys.is_empty(), "goodbye already has a localization");
}

#[test]
fn test_omitted_language_becomes_empty_value() {
    let workspace = Workspace::new(r#"{"strings": {"hello": {}}}"#, PROJECT_FR_DE);
    let translator = ScriptedTranslator::answering(
        r#"[{"key": "hello", "localizations": [{"language_code": "fr", "value": "Bonjour"}]}]"#,
    );

    run_with(&workspace.config(), &translator).expect("run should succeed");

    let catalog = workspace.catalog();
    let hello = catalog.entry("hello").expect("hello entry");
    assert_eq!(hello.unit("de"), Some(&LocalizedUnit::translated("")));
    assert_eq!(hello.unit("fr"), Some(&LocalizedUnit::translated("Bonjour")));
}

#[test]
fn test_complete_catalog_makes_no_call_and_keeps_bytes() {
    // Deliberately not in canonical formatting: any rewrite would show.
    let original = r#"{"sourceLanguage":"en","strings":{"hello":{"localizations":{
        "de":{"stringUnit":{"state":"translated","value":"Hallo"}},
        "fr":{"stringUnit":{"state":"needs_review","value":"Bonjour"}}}}},"version":"1.0"}"#;
    let workspace = Workspace::new(original, PROJECT_FR_DE);
    let translator = ScriptedTranslator::answering("[]");

    let outcome = run_with(&workspace.config(), &translator).expect("run should succeed");
    assert_eq!(outcome, RunOutcome::NothingToTranslate);
    assert_eq!(translator.call_count(), 0);
    assert_eq!(workspace.catalog_text(), original);
}

#[test]
fn test_nothing_pending_needs_no_credential() {
    let workspace = Workspace::new(r#"{"strings": {}}"#, PROJECT_FR_DE);
    let outcome = localizer::run(&workspace.config(), |config| {
        config.api_key()?;
        Ok(ScriptedTranslator::answering("[]"))
    })
    .expect("no credential needed when nothing is pending");
    assert_eq!(outcome, RunOutcome::NothingToTranslate);
}

#[test]
fn test_missing_credential_is_configuration_error() {
    let workspace = Workspace::new(r#"{"strings": {"hello": {}}}"#, PROJECT_FR_DE);
    let before = workspace.catalog_text();
    let err = localizer::run(&workspace.config(), |config| {
        config.api_key()?;
        Ok(ScriptedTranslator::answering("[]"))
    })
    .unwrap_err();
    assert!(err.is_configuration_missing());
    assert_eq!(workspace.catalog_text(), before);
}

#[test]
fn test_existing_entries_survive_and_partial_entry_is_replaced() {
    let workspace = Workspace::new(
        r#"{"strings": {
            "done": {"comment": "keep me", "localizations": {
                "de": {"stringUnit": {"state": "translated", "value": "Fertig"}},
                "fr": {"stringUnit": {"state": "translated", "value": "Fini"}}}},
            "partial": {"localizations": {
                "fr": {"stringUnit": {"state": "new", "value": "Partiel"}}}}
        }}"#,
        PROJECT_FR_DE,
    );
    let translator = ScriptedTranslator::answering(
        r#"[{"key": "partial", "localizations": [
            {"language_code": "fr", "value": "Partielle"},
            {"language_code": "de", "value": "Teilweise"}
        ]}]"#,
    );

    run_with(&workspace.config(), &translator).expect("run should succeed");
    assert_eq!(translator.calls.borrow()[0].0, set(&["partial"]));

    let catalog = workspace.catalog();
    let done = catalog.entry("done").expect("done entry");
    assert_eq!(done.comment.as_deref(), Some("keep me"));
    assert_eq!(done.unit("fr").map(|u| u.value.as_str()), Some("Fini"));

    let partial = catalog.entry("partial").expect("partial entry");
    assert_eq!(partial.unit("fr"), Some(&LocalizedUnit::translated("Partielle")));
    assert_eq!(partial.unit("de"), Some(&LocalizedUnit::translated("Teilweise")));
}

#[test]
fn test_written_catalog_is_canonical() {
    let workspace = Workspace::new(r#"{"strings": {"hello": {}}}"#, PROJECT_FR_DE);
    let translator = ScriptedTranslator::answering(
        r#"[{"key": "hello", "localizations": [
            {"language_code": "de", "value": "Hallo"},
            {"language_code": "fr", "value": "Bonjour"}
        ]}]"#,
    );
    run_with(&workspace.config(), &translator).unwrap();

    let text = workspace.catalog_text();
    assert_eq!(text, workspace.catalog().serialize().unwrap());
    assert_eq!(
        file_names(workspace.catalog.parent().unwrap()),
        vec!["Localizable.xcstrings", "project.pbxproj"]
    );
}

#[test]
fn test_service_failure_leaves_file_untouched() {
    let original = r#"{"strings": {"hello": {}}}"#;
    let workspace = Workspace::new(original, PROJECT_FR_DE);
    let translator = ScriptedTranslator::failing("503 Service Unavailable");

    let err = run_with(&workspace.config(), &translator).unwrap_err();
    assert!(matches!(err, LocalizerError::ExternalService(_)));
    assert_eq!(workspace.catalog_text(), original);
}

#[test]
fn test_malformed_response_leaves_file_untouched() {
    let original = r#"{"strings": {"hello": {}}}"#;
    let workspace = Workspace::new(original, PROJECT_FR_DE);
    let translator = ScriptedTranslator::answering(r#"{"hello": "Bonjour"}"#);

    let err = run_with(&workspace.config(), &translator).unwrap_err();
    assert!(matches!(err, LocalizerError::Format { .. }));
    assert_eq!(workspace.catalog_text(), original);
}

#[test]
fn test_malformed_catalog_is_format_error() {
    let original = r#"{"strings": {"hello": {"localizations": {
        "fr": {"stringUnit": {"state": "stale", "value": "x"}}}}}}"#;
    let workspace = Workspace::new(original, PROJECT_FR_DE);
    let translator = ScriptedTranslator::answering("[]");

    let err = run_with(&workspace.config(), &translator).unwrap_err();
    assert!(matches!(err, LocalizerError::Format { .. }));
    assert_eq!(translator.call_count(), 0);
    assert_eq!(workspace.catalog_text(), original);
}

#[test]
fn test_missing_paths_are_configuration_errors() {
    let workspace = Workspace::new(r#"{"strings": {}}"#, PROJECT_FR_DE);

    let no_catalog = LocalizerConfig {
        catalog_path: None,
        ..workspace.config()
    };
    let err = localizer::pending(&no_catalog).unwrap_err();
    assert!(err.is_configuration_missing());
    assert!(err.to_string().contains(".xcstrings"));

    let no_project = LocalizerConfig {
        project_path: None,
        ..workspace.config()
    };
    let err = localizer::pending(&no_project).unwrap_err();
    assert!(err.is_configuration_missing());
    assert!(err.to_string().contains(".pbxproj"));
}

#[test]
fn test_missing_catalog_file_is_io_error() {
    let workspace = Workspace::new(r#"{"strings": {}}"#, PROJECT_FR_DE);
    let config = LocalizerConfig {
        catalog_path: Some(workspace.catalog.with_file_name("Missing.xcstrings")),
        ..workspace.config()
    };
    let err = localizer::pending(&config).unwrap_err();
    assert!(matches!(err, LocalizerError::Io { .. }));
}
