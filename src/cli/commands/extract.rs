//! # Extract Command Module / 提取命令模块
//!
//! Writes the important-field subset of every catalog to the work directory.
//!
//! 将每个目录的重要字段子集写入工作目录。

use anyhow::Result;
use std::path::Path;

use crate::cli::commands::{load_config, workspace};
use crate::core::orchestrator::Orchestrator;

pub fn execute(config_path: &Path, lang_override: Option<&str>) -> Result<()> {
    let config = load_config(config_path, lang_override)?;
    let workspace = workspace(&config);
    Orchestrator::new(&workspace, &config.important_fields).extract_all()?;
    Ok(())
}
