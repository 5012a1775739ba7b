//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for locale-sync: catalog
//! storage, backup snapshots, atomic file writes and rate limiting.
//!
//! 此模块为 locale-sync 提供基础设施服务：目录存储、备份快照、原子文件写入和限流。

pub mod backup;
pub mod fs;
pub mod rate_limit;
pub mod store;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
