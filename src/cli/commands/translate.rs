//! # Translate Command Module / 翻译命令模块
//!
//! Fills in keys that target catalogs lack (the default) or rewrites them
//! completely with `--full`, using the configured translation backend.
//!
//! 使用配置的翻译后端补全目标目录缺少的键（默认），或通过 `--full` 完全重写。

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

use crate::cli::commands::{load_config, workspace};
use crate::core::orchestrator::{Orchestrator, TranslationMode};
use crate::infra::rate_limit::FixedIntervalGate;
use crate::infra::store::CatalogStore;
use crate::infra::t;
use crate::providers::AnyTranslator;
use crate::reporting::print_summary;

/// Arguments of the `translate` subcommand.
#[derive(Debug, Clone, Default)]
pub struct TranslateArgs {
    /// Source language; defaults to `source_language` from the config.
    pub source: Option<String>,
    /// Target languages; empty means `target_languages` from the config.
    pub targets: Vec<String>,
    /// Read the source catalog from this file instead of the locales dir.
    pub source_file: Option<PathBuf>,
    /// Replace target catalogs instead of adding missing keys.
    pub full: bool,
}

pub async fn execute(
    config_path: &Path,
    lang_override: Option<&str>,
    args: TranslateArgs,
) -> Result<()> {
    let config = load_config(config_path, lang_override)?;
    let translator = AnyTranslator::from_env(&config)?;

    let source_language = args.source.unwrap_or_else(|| config.source_language.clone());
    let targets = if args.targets.is_empty() {
        config.target_languages.clone()
    } else {
        args.targets
    };
    let mode = if args.full {
        TranslationMode::Full
    } else {
        TranslationMode::MissingOnly
    };

    let workspace = workspace(&config);
    let source_path = args
        .source_file
        .unwrap_or_else(|| workspace.locales.path(&source_language));
    let source = CatalogStore::load_file(&source_path)
        .with_context(|| t!("translate.source_missing", path = source_path.display()).to_string())?;

    let mode_label = match mode {
        TranslationMode::MissingOnly => t!("translate.mode_missing"),
        TranslationMode::Full => t!("translate.mode_full"),
    };
    println!("{}", t!("translate.start", mode = mode_label).blue());
    println!("{}", t!("extract.locales_dir", path = workspace.locales.dir().display()));
    println!(
        "{}",
        t!("translate.source_loaded", count = source.len(), path = source_path.display())
    );

    let limiter = FixedIntervalGate::from_millis(config.translation.delay_ms);
    let report = Orchestrator::new(&workspace, &config.important_fields)
        .translate(&translator, &limiter, &source_language, &source, &targets, mode)
        .await;

    print_summary(&report, workspace.backups.dir());

    if !report.outcomes.is_empty() && report.failures().count() == report.outcomes.len() {
        anyhow::bail!(t!("pipeline.all_failed").to_string());
    }
    println!(
        "\n{}",
        t!("translate.complete", langs = targets.join(", ")).green().bold()
    );
    Ok(())
}
