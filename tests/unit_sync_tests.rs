//! # Sync Engine Unit Tests / 同步引擎单元测试
//!
//! Subset extraction, missing-key resolution and merging, including the
//! idempotence and backup guarantees of the merge engine.
//!
//! 子集提取、缺失键解析与合并，包括合并引擎的幂等性与备份保证。

mod common;

use common::{catalog, fields, read_locale, setup_workspace, write_locale};
use locale_sync::core::merge::{MergeEngine, merge};
use locale_sync::core::missing::{merge_missing, resolve};
use locale_sync::core::subset::extract;
use serde_json::json;
use std::fs;

#[cfg(test)]
mod subset_tests {
    use super::*;

    #[test]
    fn test_extracts_only_important_keys() {
        let source = catalog(r#"{"nav-home": "Home", "nav-about": "About"}"#);
        let subset = extract(&source, &fields(&["nav-home"]));
        assert_eq!(subset, catalog(r#"{"nav-home": "Home"}"#));
    }

    #[test]
    fn test_important_keys_absent_from_catalog_are_skipped() {
        let source = catalog(r#"{"a": "A", "b": ["B1", "B2"]}"#);
        let subset = extract(&source, &fields(&["missing", "b"]));
        assert_eq!(subset.len(), 1);
        assert_eq!(subset.get("b"), Some(&json!(["B1", "B2"])));
    }

    #[test]
    fn test_subset_follows_field_order() {
        let source = catalog(r#"{"a": "A", "b": "B", "c": "C"}"#);
        let subset = extract(&source, &fields(&["c", "a"]));
        let keys: Vec<&String> = subset.keys().collect();
        assert_eq!(keys, ["c", "a"]);
    }

    #[test]
    fn test_empty_inputs_give_empty_subset() {
        assert!(extract(&catalog("{}"), &fields(&["a"])).is_empty());
        assert!(extract(&catalog(r#"{"a": "A"}"#), &fields(&[])).is_empty());
    }
}

#[cfg(test)]
mod missing_tests {
    use super::*;

    #[test]
    fn test_resolves_keys_absent_from_target() {
        let source = catalog(r#"{"a": "1", "b": "2"}"#);
        let target = catalog(r#"{"a": "1"}"#);
        assert_eq!(resolve(&source, &target), catalog(r#"{"b": "2"}"#));
    }

    #[test]
    fn test_missing_keys_never_overlap_target() {
        let source = catalog(r#"{"a": "1", "b": "2", "c": "3", "d": "4"}"#);
        let target = catalog(r#"{"b": "x", "d": "", "z": "extra"}"#);
        let missing = resolve(&source, &target);
        assert!(missing.keys().all(|k| !target.contains_key(k)));
        assert!(missing.keys().all(|k| source.contains_key(k)));
        assert_eq!(missing.keys().collect::<Vec<_>>(), ["a", "c"]);
    }

    #[test]
    fn test_merge_missing_never_overwrites_existing_values() {
        let existing = catalog(r#"{"a": "reviewed"}"#);
        let translated = catalog(r#"{"a": "machine", "b": "<2>"}"#);
        let merged = merge_missing(&existing, &translated);
        assert_eq!(merged, catalog(r#"{"a": "reviewed", "b": "<2>"}"#));
    }

    #[test]
    fn test_second_resolution_after_merge_is_empty() {
        let source = catalog(r#"{"a": "1", "b": "2"}"#);
        let target = catalog(r#"{"a": "1"}"#);
        let missing = resolve(&source, &target);
        let merged = merge_missing(&target, &missing);
        assert!(resolve(&source, &merged).is_empty());
    }
}

#[cfg(test)]
mod merge_tests {
    use super::*;

    #[test]
    fn test_changes_cover_existing_keys_only() {
        let original = catalog(r#"{"nav-home": "Home"}"#);
        let reviewed = catalog(r#"{"nav-home": "Inicio", "extra-key": "X"}"#);

        let changes = merge(&original, &reviewed);
        let changes: Vec<_> = changes.iter().collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].key, "nav-home");
        assert_eq!(changes[0].old, json!("Home"));
        assert_eq!(changes[0].new, json!("Inicio"));
    }

    #[test]
    fn test_equal_values_are_not_changes() {
        let original = catalog(r#"{"a": "A", "b": ["x"]}"#);
        let reviewed = catalog(r#"{"a": "A", "b": ["x"]}"#);
        assert!(merge(&original, &reviewed).is_empty());
    }

    #[test]
    fn test_apply_writes_changes_behind_a_backup() {
        let (_temp, workspace) = setup_workspace();
        write_locale(&workspace, "es", r#"{"nav-home": "Home", "other": "Otro"}"#);
        let engine = MergeEngine::new(&workspace.locales, &workspace.backups);

        let original = read_locale(&workspace, "es");
        let reviewed = catalog(r#"{"nav-home": "Inicio", "extra-key": "X"}"#);
        let report = engine.apply("es", &merge(&original, &reviewed)).unwrap();

        assert_eq!(report.count(), 1);
        assert_eq!(
            read_locale(&workspace, "es"),
            catalog(r#"{"nav-home": "Inicio", "other": "Otro"}"#)
        );
        let backup = report.backup.expect("a backup must be taken");
        assert_eq!(
            fs::read_to_string(backup).unwrap(),
            r#"{"nav-home": "Home", "other": "Otro"}"#
        );
    }

    #[test]
    fn test_second_apply_is_a_noop_without_backup() {
        let (_temp, workspace) = setup_workspace();
        write_locale(&workspace, "es", r#"{"nav-home": "Home"}"#);
        let engine = MergeEngine::new(&workspace.locales, &workspace.backups);
        let changes = merge(
            &read_locale(&workspace, "es"),
            &catalog(r#"{"nav-home": "Inicio"}"#),
        );

        let first = engine.apply("es", &changes).unwrap();
        let after_first = fs::read(workspace.locales.path("es")).unwrap();
        // Same change set again, computed against the stale original.
        let second = engine.apply("es", &changes).unwrap();

        assert!(!first.is_noop());
        assert!(second.is_noop());
        assert!(second.backup.is_none());
        assert_eq!(fs::read(workspace.locales.path("es")).unwrap(), after_first);
        assert_eq!(workspace.backups.list("es").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_change_set_touches_nothing() {
        let (_temp, workspace) = setup_workspace();
        write_locale(&workspace, "it", r#"{"a": "A"}"#);
        let engine = MergeEngine::new(&workspace.locales, &workspace.backups);

        let report = engine
            .apply("it", &merge(&catalog(r#"{"a": "A"}"#), &catalog(r#"{"a": "A"}"#)))
            .unwrap();

        assert!(report.is_noop());
        assert!(workspace.backups.list("it").unwrap().is_empty());
        assert_eq!(
            fs::read_to_string(workspace.locales.path("it")).unwrap(),
            r#"{"a": "A"}"#
        );
    }

    #[test]
    fn test_replace_backs_up_only_existing_files() {
        let (_temp, workspace) = setup_workspace();
        let engine = MergeEngine::new(&workspace.locales, &workspace.backups);

        let created = engine.replace("fr", &catalog(r#"{"a": "un"}"#)).unwrap();
        assert!(created.backup.is_none());

        let replaced = engine.replace("fr", &catalog(r#"{"a": "une"}"#)).unwrap();
        assert!(replaced.backup.is_some());
        assert_eq!(read_locale(&workspace, "fr"), catalog(r#"{"a": "une"}"#));
    }
}
