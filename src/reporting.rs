//! # Reporting Module / 报告模块
//!
//! This module prints progress, per-change summaries and run summaries to the
//! console with internationalization support.
//!
//! 此模块在控制台打印进度、逐项变更摘要和运行摘要，支持国际化。

pub mod console;

// Re-export common reporting functions
pub use console::{print_changes, print_summary};
