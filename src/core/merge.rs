//! # Merge Engine Module / 合并引擎模块
//!
//! Turns a reviewed subset into a change set against the original catalog and
//! writes it back. Merging corrects existing values only: a key the original
//! catalog does not have is never added through this path.
//!
//! Every in-place write is preceded by a backup of the file as it was on disk.
//! Applying a change set whose values are already in effect does no I/O at
//! all, which makes repeated merges idempotent.
//!
//! 将审校后的子集与原始目录比较生成变更集并写回。合并只修正已有的值：
//! 原始目录中没有的键永远不会通过此路径加入。
//!
//! 每次原地写入之前都会备份磁盘上的原文件。应用一个其值已经生效的变更集
//! 不会产生任何 I/O，因此重复合并是幂等的。

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;

use crate::core::catalog::Catalog;
use crate::infra::backup::BackupStore;
use crate::infra::store::CatalogStore;

/// One corrected value.
/// 一个被修正的值。
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub key: String,
    pub old: Value,
    pub new: Value,
}

/// Ordered corrections to apply to one catalog.
/// 需要应用到某个目录的有序修正列表。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Computes the corrections `reviewed` makes to `original`, in reviewed order.
/// Keys that only exist in `reviewed` are ignored.
///
/// 按审校子集的顺序计算 `reviewed` 对 `original` 所做的修正。
/// 仅存在于 `reviewed` 中的键会被忽略。
pub fn merge(original: &Catalog, reviewed: &Catalog) -> ChangeSet {
    let changes = reviewed
        .iter()
        .filter_map(|(key, new)| match original.get(key) {
            Some(old) if old != new => Some(Change {
                key: key.clone(),
                old: old.clone(),
                new: new.clone(),
            }),
            _ => None,
        })
        .collect();
    ChangeSet { changes }
}

/// The outcome of writing to one catalog file.
/// 写入单个目录文件的结果。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// Changes that were written, with `old` taken from the file on disk.
    pub applied: Vec<Change>,
    /// Backup taken before the write, if a file existed.
    pub backup: Option<PathBuf>,
    /// The catalog file written, `None` when nothing was written.
    pub written: Option<PathBuf>,
}

impl MergeReport {
    pub fn count(&self) -> usize {
        self.applied.len()
    }

    pub fn is_noop(&self) -> bool {
        self.written.is_none()
    }
}

/// Applies change sets and whole-catalog replacements to a store, taking a
/// backup first.
pub struct MergeEngine<'a> {
    store: &'a CatalogStore,
    backups: &'a BackupStore,
}

impl<'a> MergeEngine<'a> {
    pub fn new(store: &'a CatalogStore, backups: &'a BackupStore) -> Self {
        Self { store, backups }
    }

    /// Applies `changes` to the catalog of `language` as it currently is on
    /// disk. Changes whose key is missing or whose value is already in place
    /// are dropped; if none remain, nothing is backed up or written.
    ///
    /// 将 `changes` 应用到磁盘上 `language` 的当前目录。键不存在或值已生效的变更
    /// 会被丢弃；若没有剩余变更，则不备份也不写入。
    pub fn apply(&self, language: &str, changes: &ChangeSet) -> Result<MergeReport> {
        let Some(raw) = self.store.read_raw(language)? else {
            return Ok(MergeReport::default());
        };
        let path = self.store.path(language);
        let text = std::str::from_utf8(&raw)
            .with_context(|| format!("Catalog is not UTF-8: {}", path.display()))?;
        let mut current = Catalog::from_json_str(text)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

        let applied: Vec<Change> = changes
            .iter()
            .filter_map(|change| match current.get(&change.key) {
                Some(old) if *old != change.new => Some(Change {
                    key: change.key.clone(),
                    old: old.clone(),
                    new: change.new.clone(),
                }),
                _ => None,
            })
            .collect();

        if applied.is_empty() {
            return Ok(MergeReport::default());
        }

        let backup = self.backups.snapshot(language, &raw)?;
        for change in &applied {
            current.insert(change.key.clone(), change.new.clone());
        }
        let written = self.store.save(language, &current)?;

        Ok(MergeReport {
            applied,
            backup: Some(backup),
            written: Some(written),
        })
    }

    /// Replaces the whole catalog of `language`, backing up the previous file
    /// when there is one. Used by the missing-key and full-translation flows.
    ///
    /// 替换 `language` 的整个目录，若存在旧文件则先备份。
    /// 供缺失键翻译和全量翻译流程使用。
    pub fn replace(&self, language: &str, catalog: &Catalog) -> Result<MergeReport> {
        let backup = match self.store.read_raw(language)? {
            Some(raw) => Some(self.backups.snapshot(language, &raw)?),
            None => None,
        };
        let written = self.store.save(language, catalog)?;
        Ok(MergeReport {
            applied: Vec::new(),
            backup,
            written: Some(written),
        })
    }
}
