//! # Merge Command Module / 合并命令模块
//!
//! Merges one language's reviewed subset back into its catalog.
//!
//! 将某一语言的审校子集合并回其目录。

use anyhow::Result;
use std::path::Path;

use crate::cli::commands::{load_config, workspace};
use crate::core::orchestrator::Orchestrator;

pub fn execute(config_path: &Path, lang_override: Option<&str>, language: &str) -> Result<()> {
    let config = load_config(config_path, lang_override)?;
    let workspace = workspace(&config);
    Orchestrator::new(&workspace, &config.important_fields).merge_language(language)?;
    Ok(())
}
