//! # I18n Unit Tests / I18n 单元测试
//!
//! Message language selection and fallback. The locale is process-wide, so
//! every check runs inside one test.
//!
//! 消息语言的选择与回退。语言设置是进程级的，因此所有检查都在同一个测试中运行。

use locale_sync::core::models::Stage;
use locale_sync::set_ui_locale;

#[test]
fn test_ui_locale_selection_and_fallback() {
    set_ui_locale("en");
    assert_eq!(rust_i18n::locale().to_string(), "en");
    assert_eq!(Stage::Merging.label(), "merge");

    set_ui_locale("zh-CN");
    assert_eq!(rust_i18n::locale().to_string(), "zh-CN");
    assert_eq!(Stage::Merging.label(), "合并");

    // Region variants fall back to the language, unknown languages to English.
    set_ui_locale("en_GB");
    assert_eq!(rust_i18n::locale().to_string(), "en");
    set_ui_locale("tlh");
    assert_eq!(rust_i18n::locale().to_string(), "en");
    assert_eq!(Stage::Reviewing.to_string(), "review");
}

#[test]
fn test_every_english_key_has_a_chinese_translation() {
    let english = flatten(include_str!("../locales/en.toml"));
    let chinese = flatten(include_str!("../locales/zh-CN.toml"));
    for key in &english {
        assert!(chinese.contains(key), "zh-CN is missing {key}");
    }
    assert_eq!(english.len(), chinese.len());
}

fn flatten(source: &str) -> Vec<String> {
    let table: toml::Table = toml::from_str(source).expect("locale file must be valid TOML");
    let mut keys = Vec::new();
    for (name, value) in table {
        match value {
            toml::Value::Table(inner) => {
                keys.extend(inner.keys().map(|k| format!("{name}.{k}")));
            }
            _ => keys.push(name),
        }
    }
    keys
}
