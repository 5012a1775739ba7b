// Shared test helpers for integration tests
#![allow(dead_code)]

use locale_sync::catalog::Catalog;
use locale_sync::config::ImportantFieldSet;
use locale_sync::core::provider::{ProviderError, ReviewProvider, TranslationProvider};
use locale_sync::orchestrator::Workspace;
use locale_sync::infra::backup::BackupStore;
use locale_sync::infra::store::CatalogStore;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::{TempDir, tempdir};

pub fn catalog(json: &str) -> Catalog {
    Catalog::from_json_str(json).expect("test catalog must be a JSON object")
}

pub fn fields(keys: &[&str]) -> ImportantFieldSet {
    ImportantFieldSet::new(keys.iter().copied())
}

/// A work area with `locales/` and `work/` directories inside a temp dir.
pub fn setup_workspace() -> (TempDir, Workspace) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let root = temp_dir.path();
    let workspace = Workspace {
        locales: CatalogStore::new(root.join("locales")),
        extracted: CatalogStore::new(root.join("work/important_fields")),
        reviewed: CatalogStore::new(root.join("work/reviewed_fields")),
        backups: BackupStore::new(root.join("work/backups")),
    };
    (temp_dir, workspace)
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write test file");
}

pub fn write_locale(workspace: &Workspace, language: &str, json: &str) {
    write_file(&workspace.locales.path(language), json);
}

pub fn read_locale(workspace: &Workspace, language: &str) -> Catalog {
    workspace
        .locales
        .load(language)
        .expect("Failed to load locale")
}

/// Translates by wrapping the text, failing for texts listed in `failing`.
/// Records every call so tests can check what was sent.
#[derive(Default)]
pub struct TaggingTranslator {
    pub failing: Vec<String>,
    pub calls: Mutex<Vec<String>>,
}

impl TaggingTranslator {
    pub fn failing_on(texts: &[&str]) -> Self {
        Self {
            failing: texts.iter().map(|t| t.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TranslationProvider for TaggingTranslator {
    fn name(&self) -> &str {
        "tagging"
    }

    async fn translate(
        &self,
        text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(text.to_string());
        if self.failing.iter().any(|f| f == text) {
            return Err(ProviderError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(format!("<{target}:{text}>"))
    }
}

/// Returns a fixed reviewed subset per language; unknown languages fail.
#[derive(Default)]
pub struct ScriptedReviewer {
    pub responses: Vec<(String, Catalog)>,
}

impl ScriptedReviewer {
    pub fn with(mut self, language: &str, reviewed: Catalog) -> Self {
        self.responses.push((language.to_string(), reviewed));
        self
    }
}

impl ReviewProvider for ScriptedReviewer {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn review(&self, _subset: &Catalog, target: &str) -> Result<Catalog, ProviderError> {
        self.responses
            .iter()
            .find(|(language, _)| language == target)
            .map(|(_, reviewed)| reviewed.clone())
            .ok_or_else(|| ProviderError::MalformedResponse(format!("no script for {target}")))
    }
}
