// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf};

use crate::infra::t;

pub mod commands;

use commands::translate::TranslateArgs;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "Localization.toml";

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang="))
        .map(str::to_string)
}

fn build_cli(locale: &str) -> Command {
    Command::new("locale-sync")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .default_value(DEFAULT_CONFIG_FILE)
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("extract").about(t!("cmd_extract_about", locale = locale).to_string()),
        )
        .subcommand(
            Command::new("review")
                .about(t!("cmd_review_about", locale = locale).to_string())
                .arg(
                    Arg::new("language")
                        .help(t!("arg_language", locale = locale).to_string())
                        .value_name("LANGUAGE")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("merge")
                .about(t!("cmd_merge_about", locale = locale).to_string())
                .arg(
                    Arg::new("language")
                        .help(t!("arg_language", locale = locale).to_string())
                        .value_name("LANGUAGE")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("translate")
                .about(t!("cmd_translate_about", locale = locale).to_string())
                .arg(
                    Arg::new("source")
                        .long("source")
                        .help(t!("arg_source", locale = locale).to_string())
                        .value_name("SOURCE")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .help(t!("arg_target", locale = locale).to_string())
                        .value_name("TARGET")
                        .conflicts_with("languages")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("languages")
                        .long("languages")
                        .help(t!("arg_languages", locale = locale).to_string())
                        .value_name("LANGUAGES")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("source-file")
                        .long("source-file")
                        .help(t!("arg_source_file", locale = locale).to_string())
                        .value_name("SOURCE_FILE")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("full")
                        .long("full")
                        .help(t!("arg_full", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(
                    Arg::new("languages")
                        .help(t!("arg_languages", locale = locale).to_string())
                        .value_name("LANGUAGES"),
                ),
        )
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    match &language {
        Some(lang) => crate::set_ui_locale(lang),
        None => crate::init(),
    }
    let ui_locale = rust_i18n::locale().to_string();

    let matches = build_cli(&ui_locale).get_matches();
    let config = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let lang_override = language.as_deref();

    match matches.subcommand() {
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| config.clone());
            let force = init_matches.get_flag("force");
            let non_interactive = init_matches.get_flag("non-interactive");
            commands::init::execute(&output, force, non_interactive)?;
        }
        Some(("extract", _)) => {
            commands::extract::execute(&config, lang_override)?;
        }
        Some(("review", review_matches)) => {
            let target = required_string(review_matches, "language");
            commands::review::execute(&config, lang_override, &target).await?;
        }
        Some(("merge", merge_matches)) => {
            let target = required_string(merge_matches, "language");
            commands::merge::execute(&config, lang_override, &target)?;
        }
        Some(("translate", translate_matches)) => {
            let targets = match (
                translate_matches.get_one::<String>("target"),
                translate_matches.get_one::<String>("languages"),
            ) {
                (Some(target), _) => vec![target.trim().to_string()],
                (None, Some(list)) => commands::parse_language_list(list),
                (None, None) => Vec::new(),
            };
            let args = TranslateArgs {
                source: translate_matches.get_one::<String>("source").cloned(),
                targets,
                source_file: translate_matches.get_one::<PathBuf>("source-file").cloned(),
                full: translate_matches.get_flag("full"),
            };
            commands::translate::execute(&config, lang_override, args).await?;
        }
        Some(("run", run_matches)) => {
            let languages = run_matches
                .get_one::<String>("languages")
                .map(|list| commands::parse_language_list(list))
                .unwrap_or_default();
            commands::pipeline::execute(&config, lang_override, languages).await?;
        }
        _ => {
            // subcommand_required makes clap print help and exit before this point.
        }
    }
    Ok(())
}

fn required_string(matches: &clap::ArgMatches, id: &str) -> String {
    matches
        .get_one::<String>(id)
        .cloned()
        .unwrap_or_default()
}
