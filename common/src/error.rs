//! エラー型定義

use crate::diagnostics::Diagnostic;
use crate::types::{Field, MatchType, Theme};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 必須項目違反1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub theme: Theme,
    pub campaign: String,
    pub field: Field,
    pub rule: ViolationRule,
}

/// 違反したルール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationRule {
    /// 必須項目が空
    Required,
    /// ASIN投放なのに同名列がない、または列が空
    AsinTargetColumn,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            ViolationRule::Required if self.field == Field::Asins => write!(
                f,
                "活动 [{}]: 缺少 '{}' (请检查 D、E、F 列是否填写)",
                self.campaign, self.field
            ),
            ViolationRule::Required => {
                write!(f, "活动 [{}]: 缺少 '{}'", self.campaign, self.field)
            }
            ViolationRule::AsinTargetColumn => write!(
                f,
                "活动 [{}]: 是 ASIN 投放，但在表头未找到对应列或列下无数据！",
                self.campaign
            ),
        }
    }
}

/// 否定キーワードの取得元列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegativeSource {
    /// 元シートでの列記号（W, X, AA ...）
    pub label: &'static str,
    /// 列名
    pub column: &'static str,
    /// 否定精准匹配 / 否定词组
    pub subtype: &'static str,
}

impl fmt::Display for NegativeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.column, self.subtype)
    }
}

/// 否定キーワードが複数列に重複していた
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateNegative {
    pub campaign: String,
    pub match_type: MatchType,
    pub keyword: String,
    pub sources: Vec<NegativeSource>,
}

impl fmt::Display for DuplicateNegative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<String> = self.sources.iter().map(|s| s.to_string()).collect();
        write!(
            f,
            "活动: {}, 类型: {}, 重复关键词: '{}', 来源列: {}",
            self.campaign,
            self.match_type,
            self.keyword,
            sources.join(", ")
        )
    }
}

/// 変換を中止させる致命的エラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("未找到任何支持的主题区域")]
    StructuralNotFound,

    #[error("全局设置缺失！'{theme}' 区域里有有效活动，但缺少: {}", join_fields(.missing))]
    GlobalPrecondition { theme: Theme, missing: Vec<Field> },

    #[error("检测到 Excel 模版填写不完整，已停止生成（{} 项）", .0.len())]
    FieldValidation(Vec<FieldViolation>),

    #[error("检测到重复否定关键词，暂停生成 header 表。{0}")]
    DuplicateNegativeKeyword(DuplicateNegative),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 中止した変換: 原因と、それまでに集めた全診断
#[derive(Error, Debug, Clone)]
#[error("{error}")]
pub struct ConversionFailure {
    pub error: ConversionError,
    pub diagnostics: Vec<Diagnostic>,
}

/// 設定読み込みなどの一般エラー
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
