//! # Commands Module / 命令模块
//!
//! One module per subcommand, plus the setup every command shares: loading
//! the configuration and choosing the message language.
//!
//! 每个子命令一个模块，以及所有命令共享的准备工作：加载配置并选择消息语言。

pub mod extract;
pub mod init;
pub mod merge;
pub mod pipeline;
pub mod review;
pub mod translate;

use anyhow::Result;
use std::path::Path;

use crate::core::config::SyncConfig;
use crate::core::orchestrator::Workspace;
use crate::infra::t;

/// Loads the configuration and, unless `--lang` was given, switches the
/// message language to the one it names.
pub(crate) fn load_config(config_path: &Path, lang_override: Option<&str>) -> Result<SyncConfig> {
    let config = SyncConfig::load(config_path)?;
    if lang_override.is_none() {
        crate::set_ui_locale(&config.language);
    }
    println!(
        "{}",
        t!("loading_config", path = config_path.display())
    );
    Ok(config)
}

pub(crate) fn workspace(config: &SyncConfig) -> Workspace {
    Workspace::from_config(config)
}

/// Splits a comma-separated language list, dropping blanks: `"es, it,"` → `["es", "it"]`.
pub fn parse_language_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
        .collect()
}
