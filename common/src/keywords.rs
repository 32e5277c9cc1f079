//! キーワード列の解決
//!
//! (カテゴリ系統, マッチタイプ, 出力種別) から正のキーワード列を決める。
//! 列名で見つからなければ固定の列位置にフォールバックする。

use crate::diagnostics::{Checked, Diagnostic, DiagnosticKind};
use crate::grid::Grid;
use crate::types::{CategoryFamily, Field, MatchType, ThemeKind};

/// キーワード列の定義: 列名と、見つからないときの列位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordColumn {
    pub name: &'static str,
    pub fallback_index: usize,
}

/// 解決テーブル
pub fn keyword_column(family: &CategoryFamily, match_type: MatchType, kind: ThemeKind) -> Option<KeywordColumn> {
    let column = |name, fallback_index| Some(KeywordColumn { name, fallback_index });
    match (family, match_type, kind) {
        (CategoryFamily::Host, MatchType::Exact, _) => column("suzhu/宿主/host-精准词", 11),
        (CategoryFamily::Case, MatchType::Exact, _) => column("case/包-精准词", 14),
        (CategoryFamily::Host, MatchType::Broad, ThemeKind::Sponsored) => column("suzhu/宿主/host-广泛词", 12),
        (CategoryFamily::Host, MatchType::Broad, ThemeKind::Brand) => column("suzhu/宿主/host-广泛词带加号", 13),
        (CategoryFamily::Case, MatchType::Broad, ThemeKind::Sponsored) => column("case/包-广泛词", 15),
        (CategoryFamily::Case, MatchType::Broad, ThemeKind::Brand) => column("case/包-广泛词带加号", 16),
        (CategoryFamily::Other, _, _) => None,
    }
}

/// 解決したキーワード
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedKeywords {
    /// 実際に読んだ列位置
    pub column: Option<usize>,
    pub keywords: Vec<String>,
}

/// 活動のキーワードを解決する
///
/// 解決できない場合は空を返し警告を添える（検証エラーにはしない）。
pub fn resolve(
    grid: &Grid,
    family: Option<&CategoryFamily>,
    match_type: MatchType,
    kind: ThemeKind,
) -> Checked<ResolvedKeywords> {
    let mut warnings = Vec::new();

    let Some(spec) = family.and_then(|f| keyword_column(f, match_type, kind)) else {
        warnings.push(
            Diagnostic::warning(
                DiagnosticKind::UnresolvedColumn,
                format!("无匹配列 for {:?} {}", family, match_type),
            )
            .with_field(Field::Keywords),
        );
        return Checked::new(ResolvedKeywords::default(), warnings);
    };

    let column = match grid.column_index(spec.name) {
        Some(idx) => Some(idx),
        None => {
            warnings.push(
                Diagnostic::warning(
                    DiagnosticKind::UnresolvedColumn,
                    format!("列 '{}' 未找到，fallback到第 {} 列", spec.name, spec.fallback_index + 1),
                )
                .with_field(Field::Keywords),
            );
            (spec.fallback_index < grid.width()).then_some(spec.fallback_index)
        }
    };

    let Some(column) = column else {
        warnings.push(
            Diagnostic::warning(
                DiagnosticKind::UnresolvedColumn,
                format!("无匹配列 for {:?} {}", family, match_type),
            )
            .with_field(Field::Keywords),
        );
        return Checked::new(ResolvedKeywords::default(), warnings);
    };

    let keywords = grid.column_values(column);
    tracing::debug!("  匹配的列: {} (idx={}), 关键词数量: {}", spec.name, column, keywords.len());
    if keywords.is_empty() {
        warnings.push(
            Diagnostic::warning(DiagnosticKind::NoKeywords, "无关键词数据，跳过生成关键词层级")
                .with_field(Field::Keywords),
        );
    }

    Checked::new(
        ResolvedKeywords {
            column: Some(column),
            keywords,
        },
        warnings,
    )
}

/// ASIN投放の対象ASIN（活動名と同名の列の値）
pub fn asin_targets(grid: &Grid, campaign_name: &str) -> Vec<String> {
    let targets = grid
        .column_index_trimmed(campaign_name)
        .map(|col| grid.column_values(col))
        .unwrap_or_default();
    tracing::debug!("  商品定向 ASIN 数量: {} (活动: {})", targets.len(), campaign_name);
    targets
}

/// シート全体から拾う否定ASIN・否品牌
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct GlobalNegativeLists {
    pub neg_asin: Vec<String>,
    pub neg_brand: Vec<String>,
}

impl GlobalNegativeLists {
    /// 列名（小文字）に 否定asin / 否品牌 を含む最初の列を読む
    ///
    /// 否品牌 は整数表記に揃え、数値でない値は警告して読み飛ばす。
    pub fn scan(grid: &Grid) -> Checked<Self> {
        let mut warnings = Vec::new();
        let mut asin_col = None;
        let mut brand_col = None;

        for (idx, name) in grid.column_names().iter().enumerate() {
            let lowered = name.to_lowercase();
            if lowered.contains("否定asin") {
                asin_col.get_or_insert(idx);
            } else if lowered.contains("否品牌") {
                brand_col.get_or_insert(idx);
            }
        }

        let neg_asin = asin_col.map(|c| grid.column_values(c)).unwrap_or_default();

        let mut neg_brand = Vec::new();
        if let Some(col) = brand_col {
            for value in grid.column_values(col) {
                match crate::activity::integer_text(&value) {
                    Some(id) if !neg_brand.contains(&id) => neg_brand.push(id),
                    Some(_) => {}
                    None => warnings.push(
                        Diagnostic::warning(
                            DiagnosticKind::MalformedValue,
                            format!("否品牌 '{}' 不是数字，跳过", value),
                        )
                        .with_field(Field::NegativeBrands),
                    ),
                }
            }
        }

        tracing::debug!("否定ASIN: {:?}", neg_asin);
        tracing::debug!("否品牌: {:?}", neg_brand);
        Checked::new(Self { neg_asin, neg_brand }, warnings)
    }
}
