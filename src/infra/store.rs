//! # Catalog Store Module / 目录存储模块
//!
//! Loads and saves `<lang>.json` catalogs inside one directory. The same type
//! backs the locale files, the extracted subsets and the reviewed subsets.
//!
//! 在单个目录中加载和保存 `<lang>.json` 目录文件。同一类型同时用于语言文件、
//! 提取的子集和审校后的子集。

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::catalog::Catalog;
use crate::infra::fs::write_atomic;

const CATALOG_EXTENSION: &str = "json";

/// A directory of per-language catalog files.
/// 按语言存放目录文件的目录。
#[derive(Debug, Clone)]
pub struct CatalogStore {
    dir: PathBuf,
}

impl CatalogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds the catalog of `language`.
    pub fn path(&self, language: &str) -> PathBuf {
        self.dir.join(format!("{language}.{CATALOG_EXTENSION}"))
    }

    pub fn exists(&self, language: &str) -> bool {
        self.path(language).is_file()
    }

    /// Loads the catalog of `language`. A language without a file yet has an
    /// empty catalog; a file that cannot be parsed is an error.
    ///
    /// 加载 `language` 的目录。尚无文件的语言返回空目录；无法解析的文件视为错误。
    pub fn load(&self, language: &str) -> Result<Catalog> {
        let path = self.path(language);
        match fs::read_to_string(&path) {
            Ok(content) => Catalog::from_json_str(&content)
                .with_context(|| format!("Failed to parse catalog: {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Catalog::new()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read catalog: {}", path.display())),
        }
    }

    /// Like [`CatalogStore::load`], but a missing file is an error.
    pub fn load_required(&self, language: &str) -> Result<Catalog> {
        let path = self.path(language);
        if !path.is_file() {
            anyhow::bail!("File not found: {}", path.display());
        }
        self.load(language)
    }

    /// Loads a catalog from an arbitrary file outside any store.
    pub fn load_file(path: &Path) -> Result<Catalog> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        Catalog::from_json_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))
    }

    /// The persisted bytes of a catalog, or `None` when it has no file.
    pub fn read_raw(&self, language: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(language);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read catalog: {}", path.display())),
        }
    }

    /// Writes the whole catalog, replacing any previous file atomically.
    /// Returns the path that was written.
    ///
    /// 写入整个目录，以原子方式替换之前的文件。返回写入的路径。
    pub fn save(&self, language: &str, catalog: &Catalog) -> Result<PathBuf> {
        let path = self.path(language);
        let content = catalog.to_pretty_json()?;
        write_atomic(&path, content.as_bytes())?;
        Ok(path)
    }

    /// Language codes of every catalog file in the directory, sorted.
    /// A directory that does not exist has no languages.
    pub fn languages(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to list directory: {}", self.dir.display())
                });
            }
        };

        let mut languages: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(CATALOG_EXTENSION)
            })
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();
        languages.sort();
        Ok(languages)
    }
}
