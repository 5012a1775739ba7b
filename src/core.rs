//! # Core Module / 核心模块
//!
//! This module contains the catalog synchronization engine: the catalog model,
//! configuration, subset extraction, missing-key resolution, merging, the
//! provider capability and the orchestrator that sequences them.
//!
//! 此模块包含目录同步引擎：目录模型、配置、子集提取、缺失键解析、合并、
//! 提供者能力以及对它们进行编排的编排器。

pub mod catalog;
pub mod config;
pub mod lang;
pub mod merge;
pub mod missing;
pub mod models;
pub mod orchestrator;
pub mod provider;
pub mod subset;

// Re-exports
pub use catalog::Catalog;
pub use config::{ImportantFieldSet, SyncConfig};
pub use orchestrator::{Orchestrator, TranslationMode, Workspace};
