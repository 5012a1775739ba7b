//! # Review Command Module / 审校命令模块
//!
//! Sends one language's extracted subset to the review provider and stores
//! the corrected subset next to it.
//!
//! 将某一语言的提取子集发送给审校提供者，并保存修正后的子集。

use anyhow::Result;
use std::path::Path;

use crate::cli::commands::{load_config, workspace};
use crate::core::orchestrator::Orchestrator;
use crate::providers::OpenAiProvider;

pub async fn execute(config_path: &Path, lang_override: Option<&str>, language: &str) -> Result<()> {
    let config = load_config(config_path, lang_override)?;
    // Credentials are checked before anything is read or written.
    let reviewer = OpenAiProvider::from_env(&config.review, &config.context)?;

    let workspace = workspace(&config);
    Orchestrator::new(&workspace, &config.important_fields)
        .review_language(&reviewer, language)
        .await?;
    Ok(())
}
