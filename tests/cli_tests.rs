//! # CLI Tests / 命令行测试
//!
//! Runs the `locale-sync` binary against temporary projects.
//!
//! 针对临时项目运行 `locale-sync` 可执行文件。

mod common;

use assert_cmd::prelude::*;
use common::write_file;
use locale_sync::catalog::Catalog;
use locale_sync::infra::store::CatalogStore;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::{TempDir, tempdir};

const CONFIG: &str = r#"
source_language = "en"
target_languages = ["es", "it"]
locales_dir = "locales"
work_dir = "work"
important_fields = ["nav-home"]
"#;

/// A project with a config file and `en`/`es` catalogs.
fn setup_project(extra_config: &str) -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let root = temp_dir.path();
    write_file(&root.join("Localization.toml"), &format!("{CONFIG}{extra_config}"));
    write_file(
        &root.join("locales/en.json"),
        r#"{"nav-home": "Home", "nav-about": "About"}"#,
    );
    write_file(&root.join("locales/es.json"), r#"{"nav-home": "Home"}"#);
    temp_dir
}

fn locale_sync(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("locale-sync").unwrap();
    cmd.current_dir(root)
        .arg("--lang")
        .arg("en")
        .env_remove("OPENAI_API_KEY")
        .env_remove("DEEPL_AUTH_KEY");
    cmd
}

fn load(path: &Path) -> Catalog {
    CatalogStore::load_file(path).unwrap()
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp_dir = tempdir().unwrap();
    locale_sync(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_init_writes_a_loadable_config() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("config/Localization.toml");

    locale_sync(temp_dir.path())
        .args(["init", "--non-interactive", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("important_fields"));
    assert!(content.contains("[translation]"));
}

#[test]
fn test_init_refuses_to_overwrite_without_force() {
    let project = setup_project("");
    let config = project.path().join("Localization.toml");
    let before = fs::read_to_string(&config).unwrap();

    locale_sync(project.path())
        .args(["init", "--non-interactive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    assert_eq!(fs::read_to_string(&config).unwrap(), before);

    locale_sync(project.path())
        .args(["init", "--non-interactive", "--force"])
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&config).unwrap(), before);
}

#[test]
fn test_extract_writes_subsets() {
    let project = setup_project("");

    locale_sync(project.path())
        .arg("extract")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete."));

    let subset = load(&project.path().join("work/important_fields/es.json"));
    assert_eq!(subset, Catalog::from_json_str(r#"{"nav-home": "Home"}"#).unwrap());
    assert!(project.path().join("work/important_fields/en.json").is_file());
}

#[test]
fn test_messages_follow_the_lang_flag() {
    let project = setup_project("");
    let mut cmd = Command::cargo_bin("locale-sync").unwrap();
    cmd.current_dir(project.path())
        .args(["--lang", "zh-CN", "extract"])
        .assert()
        .success()
        .stdout(predicate::str::contains("提取完成"));
}

#[test]
fn test_merge_applies_reviewed_fields_once() {
    let project = setup_project("");
    let root = project.path();
    write_file(
        &root.join("work/reviewed_fields/es.json"),
        r#"{"nav-home": "Inicio", "extra-key": "X"}"#,
    );

    locale_sync(root)
        .args(["merge", "es"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nav-home"))
        .stdout(predicate::str::contains("Backup created"));
    assert_eq!(
        load(&root.join("locales/es.json")),
        Catalog::from_json_str(r#"{"nav-home": "Inicio"}"#).unwrap()
    );

    locale_sync(root)
        .args(["merge", "es"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to merge"));
    assert_eq!(fs::read_dir(root.join("work/backups")).unwrap().count(), 1);
}

#[test]
fn test_merge_without_reviewed_file_fails() {
    let project = setup_project("");
    locale_sync(project.path())
        .args(["merge", "es"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_review_without_api_key_fails_before_any_io() {
    let project = setup_project("");
    locale_sync(project.path())
        .args(["review", "es"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
    assert!(!project.path().join("work").exists());
}

#[test]
fn test_translate_without_deepl_key_fails() {
    let project = setup_project("");
    locale_sync(project.path())
        .args(["translate", "--target", "es"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DEEPL_AUTH_KEY"));
    assert_eq!(
        fs::read_to_string(project.path().join("locales/es.json")).unwrap(),
        r#"{"nav-home": "Home"}"#
    );
}

#[test]
fn test_translate_fills_missing_keys_through_chat_backend() {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("http server");
    let addr = server.server_addr().to_ip().expect("ip listener");
    let handle = std::thread::spawn(move || {
        let request = server.recv().expect("request");
        let reply = r#"{"choices":[{"message":{"content":"Acerca de"}}]}"#;
        request
            .respond(tiny_http::Response::from_string(reply))
            .expect("respond");
    });

    let project = setup_project(&format!(
        "\n[translation]\nprovider = \"openai\"\nendpoint = \"http://{addr}/v1/chat/completions\"\ndelay_ms = 0\n"
    ));
    locale_sync(project.path())
        .env("OPENAI_API_KEY", "sk-test")
        .args(["translate", "--target", "es"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/1] nav-about"));
    handle.join().expect("server thread");

    assert_eq!(
        load(&project.path().join("locales/es.json")),
        Catalog::from_json_str(r#"{"nav-home": "Home", "nav-about": "Acerca de"}"#).unwrap()
    );
}
