//! 診断メッセージ
//!
//! 各ステージは警告を戻り値として返し、パイプラインが順番に連結する。
//! 表示側（CLIなど）は重大度と文脈で描画方法を選ぶ。

use crate::types::{Field, Theme};
use serde::Serialize;
use std::fmt;

/// 重大度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// 続行可能
    Warning,
    /// 変換中止
    Error,
}

/// 診断の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    StructuralNotFound,
    RegionMissing,
    EmptyRegion,
    GlobalPreconditionViolation,
    FieldValidation,
    DuplicateNegativeKeyword,
    UnresolvedColumn,
    MalformedValue,
    DefaultApplied,
    NoKeywords,
}

/// 構造化された診断
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub theme: Option<Theme>,
    pub campaign: Option<String>,
    pub field: Option<Field>,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            theme: None,
            campaign: None,
            field: None,
            message: message.into(),
        }
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            ..Self::warning(kind, message)
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_campaign(mut self, campaign: impl Into<String>) -> Self {
        self.campaign = Some(campaign.into());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.field = Some(field);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "警告",
            Severity::Error => "错误",
        };
        write!(f, "[{}]", level)?;
        if let Some(theme) = &self.theme {
            write!(f, " [{}]", theme)?;
        }
        if let Some(campaign) = &self.campaign {
            write!(f, " 活动 [{}]", campaign)?;
        }
        if let Some(field) = &self.field {
            write!(f, " '{}'", field)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// 値と、その算出中に出た警告
#[derive(Debug, Clone)]
pub struct Checked<T> {
    pub value: T,
    pub warnings: Vec<Diagnostic>,
}

impl<T> Checked<T> {
    pub fn new(value: T, warnings: Vec<Diagnostic>) -> Self {
        Self { value, warnings }
    }

    pub fn clean(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// 警告を `sink` に移して値を取り出す
    pub fn drain_into(self, sink: &mut Vec<Diagnostic>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}
