//! # Orchestrator Module / 编排模块
//!
//! Sequences the synchronization steps over a list of languages:
//!
//! - review pipeline: extract all, then `Reviewing(lang) → Merging(lang) → Done`
//! - missing-key pipeline: `Resolving(lang)`, per-string translation, then `Merging(lang)`
//!
//! Languages are handled one after another. A failure while reviewing,
//! resolving or merging one language is recorded in the [`RunReport`] and the
//! run moves on to the next language. Only extraction failures end a run.
//!
//! 按语言列表依次编排同步步骤：审校流程与缺失键翻译流程。
//! 各语言依次处理。某一语言在审校、翻译或合并时出错会记录到 [`RunReport`] 中，
//! 然后继续处理下一种语言。只有提取失败会终止整个运行。

use anyhow::{Context, Result};
use colored::*;

use crate::core::catalog::Catalog;
use crate::core::config::{ImportantFieldSet, SyncConfig};
use crate::core::lang::region_tag;
use crate::core::merge::{self, ChangeSet, MergeEngine, MergeReport};
use crate::core::missing::{merge_missing, resolve};
use crate::core::models::{LanguageOutcome, RunReport, Stage};
use crate::core::provider::{ReviewProvider, TranslationJob, TranslationProvider};
use crate::core::subset::extract;
use crate::infra::backup::BackupStore;
use crate::infra::rate_limit::RateLimiter;
use crate::infra::store::CatalogStore;
use crate::infra::t;
use crate::reporting::print_changes;

/// The stores one run reads from and writes to.
/// 一次运行所读写的各个存储。
#[derive(Debug, Clone)]
pub struct Workspace {
    /// The live `<lang>.json` catalogs.
    pub locales: CatalogStore,
    /// Subsets produced by extraction.
    pub extracted: CatalogStore,
    /// Subsets returned by the reviewer.
    pub reviewed: CatalogStore,
    pub backups: BackupStore,
}

impl Workspace {
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            locales: CatalogStore::new(&config.locales_dir),
            extracted: CatalogStore::new(config.important_dir()),
            reviewed: CatalogStore::new(config.reviewed_dir()),
            backups: BackupStore::new(config.backup_dir()),
        }
    }

    fn merge_engine(&self) -> MergeEngine<'_> {
        MergeEngine::new(&self.locales, &self.backups)
    }
}

/// Whether a translation run fills gaps or rewrites the whole target catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationMode {
    /// Translate only keys the target lacks; existing entries are kept.
    #[default]
    MissingOnly,
    /// Translate every source key and replace the target catalog.
    Full,
}

pub struct Orchestrator<'a> {
    workspace: &'a Workspace,
    fields: &'a ImportantFieldSet,
}

impl<'a> Orchestrator<'a> {
    pub fn new(workspace: &'a Workspace, fields: &'a ImportantFieldSet) -> Self {
        Self { workspace, fields }
    }

    /// Writes the important-field subset of every catalog in the locales
    /// directory. Returns each language with the number of fields saved.
    ///
    /// 为语言目录中的每个目录写出重要字段子集。返回每种语言及其保存的字段数。
    pub fn extract_all(&self) -> Result<Vec<(String, usize)>> {
        println!("{}", t!("extract.start").blue());
        println!(
            "{}",
            t!("extract.locales_dir", path = self.workspace.locales.dir().display())
        );
        println!(
            "{}",
            t!("extract.output_dir", path = self.workspace.extracted.dir().display())
        );

        let mut extracted = Vec::new();
        for language in self.workspace.locales.languages()? {
            println!("{}", t!("extract.processing", lang = &language));
            let catalog = self.workspace.locales.load(&language)?;
            let subset = extract(&catalog, self.fields);
            let path = self.workspace.extracted.save(&language, &subset)?;
            println!(
                "  {}",
                t!("extract.saved", count = subset.len(), path = path.display())
            );
            extracted.push((language, subset.len()));
        }

        println!("{}", t!("extract.complete").green());
        Ok(extracted)
    }

    /// Sends the extracted subset of `language` to the reviewer, stores the
    /// reviewed subset and returns how it differs from the extracted one.
    /// The extracted subset must exist.
    ///
    /// 将 `language` 的提取子集发送给审校者，保存审校结果，并返回其与提取子集的差异。
    /// 提取子集必须存在。
    pub async fn review_language<R: ReviewProvider>(
        &self,
        reviewer: &R,
        language: &str,
    ) -> Result<ChangeSet> {
        println!("{}", t!("review.start", lang = language, provider = reviewer.name()).blue());
        let subset = self.workspace.extracted.load_required(language)?;

        let reviewed = reviewer
            .review(&subset, language)
            .await
            .with_context(|| t!("review.failed", lang = language).to_string())?;

        let path = self.workspace.reviewed.save(language, &reviewed)?;
        let changes = merge::merge(&subset, &reviewed);
        if changes.is_empty() {
            println!("  {}", t!("review.no_changes").green());
        } else {
            print_changes(&changes);
            println!("  {}", t!("review.changes_made", count = changes.len()));
        }
        println!("{}", t!("review.saved", path = path.display()).green());
        Ok(changes)
    }

    /// Merges the reviewed subset of `language` back into its catalog. Both
    /// the catalog and the reviewed subset must exist.
    ///
    /// 将 `language` 的审校子集合并回其目录。目录和审校子集都必须存在。
    pub fn merge_language(&self, language: &str) -> Result<MergeReport> {
        println!("{}", t!("merge.start", lang = language).blue());
        let original = self.workspace.locales.load_required(language)?;
        let reviewed = self.workspace.reviewed.load_required(language)?;

        let changes = merge::merge(&original, &reviewed);
        let report = self.workspace.merge_engine().apply(language, &changes)?;

        if report.is_noop() {
            println!("  {}", t!("merge.no_changes").green());
        } else {
            if let Some(backup) = &report.backup {
                println!("{}", t!("merge.backup_created", path = backup.display()));
            }
            print_changes(&report.applied);
            println!(
                "{}",
                t!(
                    "merge.merged",
                    count = report.count(),
                    path = self.workspace.locales.path(language).display()
                )
                .green()
            );
        }
        Ok(report)
    }

    /// Runs the full review pipeline. Extraction failing is fatal; a review or
    /// merge failure only skips that language.
    ///
    /// 运行完整的审校流程。提取失败是致命错误；审校或合并失败只跳过该语言。
    pub async fn run_pipeline<R: ReviewProvider>(
        &self,
        reviewer: &R,
        languages: &[String],
    ) -> Result<RunReport> {
        println!("\n{}", t!("pipeline.step_extract").bold());
        self.extract_all().context(t!("pipeline.extract_failed").to_string())?;

        let mut report = RunReport::default();
        for language in languages {
            println!("\n{}", t!("pipeline.step_language", lang = language).bold());

            if let Err(e) = self.review_language(reviewer, language).await {
                eprintln!("{}", t!("pipeline.language_failed", lang = language, error = format!("{e:#}")).red());
                report.push(LanguageOutcome::failed(language, Stage::Reviewing, &e));
                continue;
            }

            match self.merge_language(language) {
                Ok(merged) => {
                    report.push(LanguageOutcome::completed(language, merged.count(), merged.backup))
                }
                Err(e) => {
                    eprintln!("{}", t!("pipeline.language_failed", lang = language, error = format!("{e:#}")).red());
                    report.push(LanguageOutcome::failed(language, Stage::Merging, &e));
                }
            }
        }
        Ok(report)
    }

    /// Translates `source` into each target language, either filling in the
    /// keys a target lacks or rewriting it entirely. Languages are isolated:
    /// an I/O error on one does not stop the others.
    ///
    /// 将 `source` 翻译为每种目标语言，可以只补全目标缺少的键，也可以整体重写。
    /// 各语言相互隔离：一种语言的 I/O 错误不会影响其他语言。
    pub async fn translate<P, L>(
        &self,
        provider: &P,
        limiter: &L,
        source_language: &str,
        source: &Catalog,
        targets: &[String],
        mode: TranslationMode,
    ) -> RunReport
    where
        P: TranslationProvider,
        L: RateLimiter,
    {
        let mut report = RunReport::default();
        for target in targets {
            println!("\n{}", "=".repeat(40));
            println!(
                "{}",
                t!(
                    "translate.header",
                    source = region_tag(source_language),
                    target = region_tag(target),
                    provider = provider.name()
                )
                .bold()
            );
            println!("{}", t!("translate.output", path = self.workspace.locales.path(target).display()));
            println!("{}", "=".repeat(40));

            let job = TranslationJob::new(provider, limiter, source_language, target);
            let outcome = match mode {
                TranslationMode::MissingOnly => self.translate_missing(&job, source, target).await,
                TranslationMode::Full => self.translate_full(&job, source, target).await,
            };
            match outcome {
                Ok(outcome) => report.push(outcome),
                Err((stage, e)) => {
                    eprintln!("{}", t!("pipeline.language_failed", lang = target, error = format!("{e:#}")).red());
                    report.push(LanguageOutcome::failed(target, stage, &e));
                }
            }
        }
        report
    }

    async fn translate_missing<P, L>(
        &self,
        job: &TranslationJob<'_, P, L>,
        source: &Catalog,
        target: &str,
    ) -> Result<LanguageOutcome, (Stage, anyhow::Error)>
    where
        P: TranslationProvider,
        L: RateLimiter,
    {
        let existing = self
            .workspace
            .locales
            .load(target)
            .map_err(|e| (Stage::Resolving, e))?;
        println!("{}", t!("translate.existing_loaded", count = existing.len()));

        let missing = resolve(source, &existing);
        if missing.is_empty() {
            println!("{}", t!("translate.up_to_date", lang = target).green());
            return Ok(LanguageOutcome::up_to_date(target));
        }
        for key in missing.keys() {
            println!("  {}", t!("translate.missing_key", field = key).dimmed());
        }
        println!("{}", t!("translate.missing_found", count = missing.len()));

        let translated = translate_entries(job, &missing).await;

        // The file may have changed while the provider was busy.
        let current = self
            .workspace
            .locales
            .load(target)
            .map_err(|e| (Stage::Merging, e))?;
        let merged = merge_missing(&current, &translated);
        let written = self
            .workspace
            .merge_engine()
            .replace(target, &merged)
            .map_err(|e| (Stage::Merging, e))?;
        println!(
            "{}",
            t!(
                "translate.merged",
                count = translated.len(),
                existing = current.len()
            )
        );
        report_written(&written);
        Ok(LanguageOutcome::completed(target, translated.len(), written.backup))
    }

    async fn translate_full<P, L>(
        &self,
        job: &TranslationJob<'_, P, L>,
        source: &Catalog,
        target: &str,
    ) -> Result<LanguageOutcome, (Stage, anyhow::Error)>
    where
        P: TranslationProvider,
        L: RateLimiter,
    {
        let translated = translate_entries(job, source).await;
        let written = self
            .workspace
            .merge_engine()
            .replace(target, &translated)
            .map_err(|e| (Stage::Merging, e))?;
        report_written(&written);
        Ok(LanguageOutcome::completed(target, translated.len(), written.backup))
    }
}

/// Translates every entry of `entries` in order, printing `[i/total] key`.
async fn translate_entries<P, L>(job: &TranslationJob<'_, P, L>, entries: &Catalog) -> Catalog
where
    P: TranslationProvider,
    L: RateLimiter,
{
    let total = entries.len();
    let mut translated = Catalog::new();
    for (index, (key, value)) in entries.iter().enumerate() {
        println!("[{}/{}] {}", index + 1, total, key);
        translated.insert(key.clone(), job.translate_value(key, value).await);
    }
    translated
}

fn report_written(report: &MergeReport) {
    if let Some(backup) = &report.backup {
        println!("{}", t!("merge.backup_created", path = backup.display()));
    }
    if let Some(path) = &report.written {
        println!("{}", t!("translate.saved", path = path.display()).green());
    }
}
