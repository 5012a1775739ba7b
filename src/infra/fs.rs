//! # File System Operations Module / 文件系统操作模块
//!
//! Whole-file atomic writes and directory helpers shared by the stores.
//!
//! 各存储共用的整文件原子写入和目录辅助函数。

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Replaces `path` with `contents` in one step.
/// The data is written to a temporary file in the same directory and renamed
/// over the target, so readers never see a partially written file.
///
/// # Arguments
/// * `path` - Destination file; missing parent directories are created
/// * `contents` - The complete new file content
///
/// 一步替换 `path` 的内容。
/// 数据先写入同一目录中的临时文件，再重命名覆盖目标文件，读者永远不会看到写了一半的文件。
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = parent_dir(path);
    ensure_dir(&parent)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".locale_sync_")
        .suffix(".tmp")
        .tempfile_in(&parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    temp.write_all(contents)
        .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to flush temporary file for {}", path.display()))?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Creates `dir` and its parents if they do not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
