//! # Console Reporting Module / 控制台报告模块
//!
//! Progress lines, per-change summaries and the end-of-run table, colored and
//! localized.
//!
//! 进度行、逐项变更摘要以及运行结束时的汇总表，带颜色并支持国际化。

use colored::*;
use std::path::Path;

use crate::core::catalog::display_value;
use crate::core::merge::Change;
use crate::core::models::{LanguageStatus, RunReport};
use crate::infra::t;

/// Prints one line per change: `key: 'old' → 'new'`.
/// 每个变更打印一行：`key: 'old' → 'new'`。
pub fn print_changes<'a>(changes: impl IntoIterator<Item = &'a Change>) {
    for change in changes {
        println!(
            "  {}: '{}' → '{}'",
            change.key.cyan(),
            display_value(&change.old).dimmed(),
            display_value(&change.new).green()
        );
    }
}

/// Prints a formatted summary of a run.
///
/// 打印一次运行的格式化摘要。
///
/// # Output Format / 输出格式
/// ```text
/// --- Summary ---
///   - Completed        | es       |   3 changes
///   - Up to date       | it       |
///   - Failed (Review)  | fr       | request failed: ...
/// ```
pub fn print_summary(report: &RunReport, backup_dir: &Path) {
    println!("\n{}", t!("summary_banner").bold());

    for outcome in &report.outcomes {
        let status_str = outcome.status_str();
        let (status_colored, detail) = match &outcome.status {
            LanguageStatus::Completed { changes, .. } => (
                status_str.green(),
                t!("report.changes", count = changes).to_string(),
            ),
            LanguageStatus::UpToDate => (status_str.dimmed(), String::new()),
            LanguageStatus::Failed { error, .. } => (status_str.red(), error.clone()),
        };
        println!(
            "  - {:<22} | {:<8} | {}",
            status_colored, outcome.language, detail
        );
    }

    if report.has_failures() {
        let failed: Vec<&str> = report.failures().map(|o| o.language.as_str()).collect();
        println!(
            "\n{}",
            t!("report.retry_hint", langs = failed.join(",")).yellow()
        );
    }
    println!(
        "{}",
        t!("report.backups_location", path = backup_dir.display()).dimmed()
    );
}
