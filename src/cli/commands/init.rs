//! # Init Command Module / 初始化命令模块
//!
//! Writes a starter `Localization.toml`. By default a short wizard asks for
//! the directories, languages and translation backend; `--non-interactive`
//! writes the defaults straight away.
//!
//! 生成初始的 `Localization.toml`。默认通过简短的向导询问目录、语言和翻译后端；
//! 使用 `--non-interactive` 时直接写入默认值。

use anyhow::{Context, Result, bail};
use colored::*;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

use crate::cli::commands::parse_language_list;
use crate::core::config::{ImportantFieldSet, ReviewSettings, SyncConfig, TranslationSettings, TranslatorKind};
use crate::infra::fs::{ensure_dir, write_atomic};
use crate::infra::t;

const CONFIG_HEADER: &str = "# Localization sync configuration / 本地化同步配置\n\
# Paths are relative to this file. / 路径相对于本文件。\n\n";

/// Fields that usually deserve a human look; edit the list after init.
const STARTER_FIELDS: [&str; 4] = ["app_title", "app_description", "welcome_message", "error_generic"];

/// Executes the init command.
///
/// # Arguments
/// * `output` - Path of the configuration file to create
/// * `force` - Overwrite an existing file without asking
/// * `non_interactive` - Skip the prompts and write the defaults
pub fn execute(output: &Path, force: bool, non_interactive: bool) -> Result<()> {
    let theme = ColorfulTheme::default();

    if output.exists() && !force {
        if non_interactive {
            bail!(
                "{}\n{}",
                t!("init.file_exists", path = output.display()),
                t!("init.use_force")
            );
        }
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", path = output.display()).to_string())
            .default(false)
            .interact()
            .context(t!("init.prompt_failed").to_string())?;
        if !overwrite {
            println!("{}", t!("init.aborted").yellow());
            return Ok(());
        }
    }

    let config = if non_interactive {
        starter_config()
    } else {
        println!("\n{}", t!("init.welcome").bold().cyan());
        println!("{}\n", t!("init.description"));
        prompt_for_config(&theme)?
    };

    let body = toml::to_string_pretty(&config).context(t!("init.serialize_failed").to_string())?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    write_atomic(output, format!("{CONFIG_HEADER}{body}").as_bytes())
        .with_context(|| t!("init.write_failed", path = output.display()).to_string())?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init.success", path = output.display()).bold()
    );
    println!("{}", t!("init.next_steps"));
    Ok(())
}

/// The configuration written by `init --non-interactive`.
pub fn starter_config() -> SyncConfig {
    SyncConfig {
        language: "en".to_string(),
        locales_dir: PathBuf::from("assets/js/i18n/locales"),
        work_dir: PathBuf::from("localization"),
        source_language: "en".to_string(),
        target_languages: ["es", "it", "fr", "de"].iter().map(|s| s.to_string()).collect(),
        important_fields: ImportantFieldSet::new(STARTER_FIELDS),
        context: "Describe your product, audience and tone here.".to_string(),
        review: ReviewSettings::default(),
        translation: TranslationSettings::default(),
    }
}

fn prompt_for_config(theme: &ColorfulTheme) -> Result<SyncConfig> {
    let mut config = starter_config();

    config.locales_dir = PathBuf::from(ask(
        theme,
        t!("init.prompt_locales_dir").to_string(),
        config.locales_dir.display().to_string(),
    )?);
    config.work_dir = PathBuf::from(ask(
        theme,
        t!("init.prompt_work_dir").to_string(),
        config.work_dir.display().to_string(),
    )?);
    config.source_language = ask(
        theme,
        t!("init.prompt_source_language").to_string(),
        config.source_language,
    )?;

    let targets = ask(
        theme,
        t!("init.prompt_target_languages").to_string(),
        config.target_languages.join(","),
    )?;
    config.target_languages = parse_language_list(&targets);

    let fields = ask(
        theme,
        t!("init.prompt_important_fields").to_string(),
        STARTER_FIELDS.join(","),
    )?;
    config.important_fields = ImportantFieldSet::new(parse_language_list(&fields));

    let backends = ["DeepL", "OpenAI"];
    let choice = Select::with_theme(theme)
        .with_prompt(t!("init.prompt_provider").to_string())
        .items(&backends)
        .default(0)
        .interact()
        .context(t!("init.prompt_failed").to_string())?;
    config.translation.provider = if choice == 0 {
        TranslatorKind::Deepl
    } else {
        TranslatorKind::Openai
    };

    let ui_languages = ["en", "zh-CN"];
    let choice = Select::with_theme(theme)
        .with_prompt(t!("init.prompt_ui_language").to_string())
        .items(&ui_languages)
        .default(0)
        .interact()
        .context(t!("init.prompt_failed").to_string())?;
    config.language = ui_languages[choice].to_string();

    Ok(config)
}

fn ask(theme: &ColorfulTheme, prompt: String, default: String) -> Result<String> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact_text()
        .context(t!("init.prompt_failed").to_string())
}
