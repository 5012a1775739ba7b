//! # Data Models Module / 数据模型模块
//!
//! Per-language outcomes of a run and the stages a language moves through.
//! A run that fails for some languages and succeeds for others is a normal
//! result, not an error.
//!
//! 一次运行中每种语言的结果以及语言所经历的阶段。
//! 部分语言失败、部分语言成功的运行属于正常结果，而不是错误。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::infra::t;

/// The step a language was in when its outcome was decided.
/// 决定某语言结果时所处的步骤。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Stage {
    /// The extracted subset is with the review provider.
    /// 提取的子集正在由审校提供者处理。
    Reviewing,
    /// Reviewed or translated values are being written back.
    /// 正在写回审校或翻译后的值。
    Merging,
    /// The target catalog is being compared with the source.
    /// 正在将目标目录与源目录比较。
    Resolving,
}

impl Stage {
    /// Localized stage name for display.
    /// 用于显示的本地化阶段名称。
    pub fn label(&self) -> String {
        match self {
            Stage::Reviewing => t!("stage.reviewing").to_string(),
            Stage::Merging => t!("stage.merging").to_string(),
            Stage::Resolving => t!("stage.resolving").to_string(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// How processing ended for one language.
/// 单个语言的处理结束方式。
#[derive(Debug, Clone, PartialEq)]
pub enum LanguageStatus {
    /// Values were written.
    /// 已写入值。
    Completed {
        /// Number of values changed or added.
        /// 修改或新增的值的数量。
        changes: usize,
        /// Backup taken before the write, if the file already existed.
        /// 写入前创建的备份（若文件已存在）。
        backup: Option<PathBuf>,
    },
    /// Nothing needed to change.
    /// 无需任何更改。
    UpToDate,
    /// The language was skipped after an error; other languages went on.
    /// 出错后跳过该语言；其他语言继续处理。
    Failed {
        stage: Stage,
        /// The full error chain, suitable for showing to the user.
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageOutcome {
    pub language: String,
    pub status: LanguageStatus,
}

impl LanguageOutcome {
    pub fn completed(language: &str, changes: usize, backup: Option<PathBuf>) -> Self {
        let status = if changes == 0 && backup.is_none() {
            LanguageStatus::UpToDate
        } else {
            LanguageStatus::Completed { changes, backup }
        };
        Self {
            language: language.to_string(),
            status,
        }
    }

    pub fn up_to_date(language: &str) -> Self {
        Self {
            language: language.to_string(),
            status: LanguageStatus::UpToDate,
        }
    }

    pub fn failed(language: &str, stage: Stage, error: &anyhow::Error) -> Self {
        Self {
            language: language.to_string(),
            status: LanguageStatus::Failed {
                stage,
                error: format!("{error:#}"),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, LanguageStatus::Failed { .. })
    }

    /// Number of values written for this language.
    pub fn changes(&self) -> usize {
        match &self.status {
            LanguageStatus::Completed { changes, .. } => *changes,
            _ => 0,
        }
    }

    /// Gets the status of the outcome as a string for display.
    /// 以字符串形式获取结果状态以供显示。
    pub fn status_str(&self) -> String {
        match &self.status {
            LanguageStatus::Completed { .. } => t!("report.status_completed").to_string(),
            LanguageStatus::UpToDate => t!("report.status_up_to_date").to_string(),
            LanguageStatus::Failed { stage, .. } => {
                t!("report.status_failed", stage = stage.label()).to_string()
            }
        }
    }
}

/// Outcomes of one run, in processing order.
/// 一次运行的结果，按处理顺序排列。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub outcomes: Vec<LanguageOutcome>,
}

impl RunReport {
    pub fn push(&mut self, outcome: LanguageOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcome(&self, language: &str) -> Option<&LanguageOutcome> {
        self.outcomes.iter().find(|o| o.language == language)
    }

    pub fn failures(&self) -> impl Iterator<Item = &LanguageOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(LanguageOutcome::is_failure)
    }

    pub fn total_changes(&self) -> usize {
        self.outcomes.iter().map(LanguageOutcome::changes).sum()
    }
}
