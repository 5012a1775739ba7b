//! # Field Subset Module / 字段子集模块
//!
//! Projects a catalog onto the configured set of important fields.
//!
//! 将目录投影到配置的重要字段集合上。

use crate::core::catalog::Catalog;
use crate::core::config::ImportantFieldSet;

/// Copies every important field that exists in `catalog` into a new catalog,
/// in field-set order. Fields the catalog does not have yet are skipped.
///
/// 将 `catalog` 中存在的每个重要字段按字段集顺序复制到新目录中。
/// 目录中尚不存在的字段会被跳过。
pub fn extract(catalog: &Catalog, fields: &ImportantFieldSet) -> Catalog {
    fields
        .iter()
        .filter_map(|key| {
            catalog
                .get(key)
                .map(|value| (key.to_string(), value.clone()))
        })
        .collect()
}
