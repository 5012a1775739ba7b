//! # Backup Snapshot Module / 备份快照模块
//!
//! Append-only store of catalog snapshots named `<lang>_<YYYYMMDD_HHMMSS>.json`.
//! Snapshots are written before a catalog file is changed in place and are
//! never deleted or read back by the tool.
//!
//! 仅追加的目录快照存储，文件名为 `<lang>_<YYYYMMDD_HHMMSS>.json`。
//! 快照在目录文件被原地修改之前写入，工具本身从不删除或读取它们。

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::infra::fs::ensure_dir;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes a snapshot stamped with the current local time.
    pub fn snapshot(&self, language: &str, contents: &[u8]) -> Result<PathBuf> {
        self.snapshot_at(language, contents, Local::now().naive_local())
    }

    /// Writes a snapshot stamped with `at`. Existing snapshots are never
    /// overwritten: a second snapshot in the same second gets a `_2`, `_3`, ...
    /// suffix.
    ///
    /// 写入以 `at` 为时间戳的快照。已有快照永不覆盖：同一秒内的第二个快照
    /// 会带上 `_2`、`_3` 等后缀。
    pub fn snapshot_at(
        &self,
        language: &str,
        contents: &[u8],
        at: NaiveDateTime,
    ) -> Result<PathBuf> {
        ensure_dir(&self.dir)?;
        let stem = format!("{}_{}", language, at.format(TIMESTAMP_FORMAT));

        for attempt in 1u32.. {
            let name = if attempt == 1 {
                format!("{stem}.json")
            } else {
                format!("{stem}_{attempt}.json")
            };
            let path = self.dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(contents)
                        .and_then(|_| file.sync_all())
                        .with_context(|| format!("Failed to write backup: {}", path.display()))?;
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to create backup: {}", path.display()));
                }
            }
        }
        unreachable!("backup suffixes are unbounded")
    }

    /// Every snapshot of `language`, sorted by file name.
    pub fn list(&self, language: &str) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to list backups: {}", self.dir.display()));
            }
        };

        let prefix = format!("{language}_");
        let mut snapshots: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| is_snapshot_of(name, &prefix))
            })
            .collect();
        snapshots.sort();
        Ok(snapshots)
    }
}

/// `es_20250101_120000.json` belongs to `es`; `es-MX_...` does not.
fn is_snapshot_of(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| rest.ends_with(".json") && rest.starts_with(|c: char| c.is_ascii_digit()))
}
