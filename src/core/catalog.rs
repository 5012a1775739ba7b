//! # Catalog Model Module / 目录模型模块
//!
//! A catalog is the key → value mapping of one language. Values are JSON values,
//! normally a string or a list of strings. Key order is the file order and is
//! preserved on every round trip.
//!
//! 目录是单一语言的键 → 值映射。值是 JSON 值，通常为字符串或字符串列表。
//! 键的顺序即文件中的顺序，并在每次读写时保持不变。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key whose value is never handed to a provider and is copied verbatim.
/// 其值从不交给提供者处理、按原样复制的保留键。
pub const MULTILINGUAL_KEY: &str = "multilingual-typed";

/// An ordered mapping of translation keys to values for a single language.
/// 单一语言的有序翻译键值映射。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Map<String, Value>);

impl Catalog {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Parses a catalog from JSON text. The document must be a JSON object.
    /// 从 JSON 文本解析目录。文档必须是 JSON 对象。
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).context("catalog is not valid JSON")?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => anyhow::bail!(
                "catalog must be a JSON object, found {}",
                json_kind(&other)
            ),
        }
    }

    /// Serializes the catalog with two-space indentation, keys in insertion
    /// order and non-ASCII characters written literally.
    ///
    /// 以两个空格缩进序列化目录，键保持插入顺序，非 ASCII 字符按原样写出。
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0).context("failed to serialize catalog")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts or replaces a value. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Catalog {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Renders a value for one-line change summaries: strings without quotes,
/// everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
