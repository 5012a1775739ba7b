//! # Missing Key Resolver Module / 缺失键解析模块
//!
//! Finds the keys a target catalog lacks compared to its source, and adds
//! translated values for them without touching what is already there.
//!
//! 找出目标目录相对于源目录缺少的键，并在不改动已有内容的前提下为其添加译文。

use crate::core::catalog::Catalog;

/// Keys present in the source catalog but absent in the target, mapped to
/// their source values. Never cached; resolve again for every run.
pub type MissingKeySet = Catalog;

/// Returns the source entries whose keys the target does not contain, in
/// source order. Neither catalog is modified.
///
/// 按源顺序返回目标中不存在的源条目。两个目录都不会被修改。
pub fn resolve(source: &Catalog, target: &Catalog) -> MissingKeySet {
    source
        .iter()
        .filter(|(key, _)| !target.contains_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Adds the translated entries to a copy of `existing`. A key that already
/// exists keeps its current value.
///
/// 将译文条目添加到 `existing` 的副本中。已存在的键保留其当前值。
pub fn merge_missing(existing: &Catalog, translated: &Catalog) -> Catalog {
    let mut merged = existing.clone();
    for (key, value) in translated {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
