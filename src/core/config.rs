//! # Configuration Module / 配置模块
//!
//! Loads the `Localization.toml` run configuration: directories, languages,
//! the set of important fields and provider settings. The loaded value is
//! immutable and passed by reference to every component.
//!
//! 加载 `Localization.toml` 运行配置：目录、语言、重要字段集合以及提供者设置。
//! 加载后的值不可变，并以引用方式传递给各个组件。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Sub-directory of the work dir holding extracted subsets.
pub const IMPORTANT_FIELDS_DIR: &str = "important_fields";
/// Sub-directory of the work dir holding reviewed subsets.
pub const REVIEWED_FIELDS_DIR: &str = "reviewed_fields";
/// Sub-directory of the work dir holding backup snapshots.
pub const BACKUPS_DIR: &str = "backups";

/// The fixed set of keys that are extracted for review.
/// Membership is what matters; the list order only decides the order of
/// keys in an extracted subset. Duplicates are dropped on construction.
///
/// 提取以供审校的固定键集合。
/// 关键在于成员关系；列表顺序只决定提取子集中键的顺序。构造时会去除重复项。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ImportantFieldSet(Vec<String>);

impl ImportantFieldSet {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !unique.contains(&field) {
                unique.push(field);
            }
        }
        Self(unique)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|field| field == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for ImportantFieldSet {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl From<ImportantFieldSet> for Vec<String> {
    fn from(set: ImportantFieldSet) -> Self {
        set.0
    }
}

/// Which backend translates individual strings.
/// 由哪个后端翻译单个字符串。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorKind {
    #[default]
    Deepl,
    Openai,
}

/// Settings for the AI review backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewSettings {
    pub model: String,
    pub temperature: f64,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.1,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Settings for the per-string translation backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationSettings {
    pub provider: TranslatorKind,
    /// Overrides the backend's default endpoint.
    pub endpoint: Option<String>,
    pub timeout_ms: u64,
    /// Minimum spacing between two translation calls, in milliseconds.
    pub delay_ms: u64,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            provider: TranslatorKind::default(),
            endpoint: None,
            timeout_ms: 5000,
            delay_ms: 100,
        }
    }
}

/// The complete run configuration, loaded from a TOML file.
/// 从 TOML 文件加载的完整运行配置。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// The language for the tool's own output messages (e.g., "en", "zh-CN").
    /// 工具自身输出消息的语言（例如 "en", "zh-CN"）。
    #[serde(default = "default_language")]
    pub language: String,

    /// Directory holding one `<lang>.json` catalog per language.
    /// 存放每种语言 `<lang>.json` 目录文件的目录。
    #[serde(default = "default_locales_dir")]
    pub locales_dir: PathBuf,

    /// Directory for extracted subsets, reviewed subsets and backups.
    /// 存放提取子集、审校子集和备份的目录。
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    #[serde(default = "default_language")]
    pub source_language: String,

    /// Languages processed when none are given on the command line.
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,

    pub important_fields: ImportantFieldSet,

    /// Free text that tells the reviewer about tone and domain.
    /// 向审校者说明语气和领域的自由文本。
    #[serde(default)]
    pub context: String,

    #[serde(default)]
    pub review: ReviewSettings,

    #[serde(default)]
    pub translation: TranslationSettings,
}

impl SyncConfig {
    /// Reads and parses a configuration file, then resolves its relative
    /// directories against the directory that contains the file.
    ///
    /// 读取并解析配置文件，然后以配置文件所在目录为基准解析相对目录。
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: SyncConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.locales_dir = resolve_dir(base, &config.locales_dir)?;
        config.work_dir = resolve_dir(base, &config.work_dir)?;
        Ok(config)
    }

    pub fn important_dir(&self) -> PathBuf {
        self.work_dir.join(IMPORTANT_FIELDS_DIR)
    }

    pub fn reviewed_dir(&self) -> PathBuf {
        self.work_dir.join(REVIEWED_FIELDS_DIR)
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.work_dir.join(BACKUPS_DIR)
    }
}

/// Expands `~` and environment variables, then anchors relative paths at `base`.
fn resolve_dir(base: &Path, dir: &Path) -> Result<PathBuf> {
    let raw = dir.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path: {raw}"))?;
    let expanded = PathBuf::from(expanded.as_ref());
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base.join(expanded))
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_locales_dir() -> PathBuf {
    PathBuf::from("assets/js/i18n/locales")
}

fn default_work_dir() -> PathBuf {
    PathBuf::from("localization")
}

fn default_target_languages() -> Vec<String> {
    ["es", "it", "fr", "de"].iter().map(|s| s.to_string()).collect()
}
