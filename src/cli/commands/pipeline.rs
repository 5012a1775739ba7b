//! # Pipeline Command Module / 流水线命令模块
//!
//! Runs extraction, then review and merge for each language. A language that
//! fails is reported and skipped; the run only fails when no language
//! succeeded.
//!
//! 先执行提取，再对每种语言执行审校和合并。失败的语言会被报告并跳过；
//! 只有在没有任何语言成功时运行才会失败。

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::cli::commands::{load_config, workspace};
use crate::core::orchestrator::Orchestrator;
use crate::infra::t;
use crate::providers::OpenAiProvider;
use crate::reporting::print_summary;

pub async fn execute(
    config_path: &Path,
    lang_override: Option<&str>,
    languages: Vec<String>,
) -> Result<()> {
    let config = load_config(config_path, lang_override)?;
    let reviewer = OpenAiProvider::from_env(&config.review, &config.context)?;

    let languages = if languages.is_empty() {
        config.target_languages.clone()
    } else {
        languages
    };

    println!("{}", t!("pipeline.banner").bold());
    println!("{}", "=".repeat(35));
    println!("{}", t!("pipeline.languages", langs = languages.join(", ")));

    let workspace = workspace(&config);
    let report = Orchestrator::new(&workspace, &config.important_fields)
        .run_pipeline(&reviewer, &languages)
        .await?;

    print_summary(&report, workspace.backups.dir());

    if !report.outcomes.is_empty() && report.failures().count() == report.outcomes.len() {
        anyhow::bail!(t!("pipeline.all_failed").to_string());
    }
    println!("\n{}", t!("pipeline.complete").green().bold());
    Ok(())
}
