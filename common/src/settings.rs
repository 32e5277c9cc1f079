//! 全体設定の抽出と厳格主題の事前チェック

use crate::diagnostics::{Checked, Diagnostic, DiagnosticKind};
use crate::error::ConversionError;
use crate::grid::Grid;
use crate::region::SheetLayout;
use crate::types::{GlobalSettings, Theme};

/// 全体設定を抽出する
///
/// 1行目から `limit_row` の手前まで（最大 `max_rows` 行）を、
/// A列をラベル・B列を値として読む。ラベルは部分一致。
pub fn extract(grid: &Grid, limit_row: usize, max_rows: usize) -> GlobalSettings {
    let mut settings = GlobalSettings::default();
    let end = limit_row.min(max_rows + 1).min(grid.row_count());

    for row in 1..end {
        let label = grid.cell(row, 0).trim();
        let value = grid.cell(row, 1).trim().to_string();
        tracing::debug!("Row {}: label='{}', value='{}'", row + 1, label, value);

        if label.contains("品牌实体编号") || label.to_uppercase().contains("ENTITY") {
            settings.entity_id = Some(value);
        } else if label.contains("品牌名称") {
            settings.brand_name = Some(value);
        } else if label.contains("预算类型") {
            settings.budget_type = Some(if value.is_empty() {
                GlobalSettings::DEFAULT_BUDGET_TYPE.to_string()
            } else {
                value
            });
        } else if label.contains("创意素材标题") {
            settings.creative_title = Some(value);
        } else if label.contains("落地页 URL") {
            settings.landing_url = Some(value);
        }
    }

    settings
}

/// 厳格主題（旗舰店・商品集）に活動があるのに全体設定が欠けていないか
///
/// 最初に活動が見つかった主題で判定する。
pub fn check_strict_themes(
    grid: &Grid,
    layout: &SheetLayout,
    settings: &GlobalSettings,
) -> Result<Checked<()>, ConversionError> {
    let mut warnings = Vec::new();

    for theme in Theme::STRICT {
        let Some(region) = layout.get(theme) else {
            continue;
        };
        if !region.has_data() {
            continue;
        }

        let slice = grid.slice(region.header_row, region.data_len());
        let Some(col) = slice.header().find_containing("广告活动名称") else {
            warnings.push(
                Diagnostic::warning(
                    DiagnosticKind::UnresolvedColumn,
                    "区域里没找到“广告活动名称”这一列，跳过检测",
                )
                .with_theme(theme),
            );
            continue;
        };

        let active_rows: Vec<usize> = slice
            .row_indices()
            .filter(|&r| !slice.value(r, col).is_empty())
            .collect();
        if active_rows.is_empty() {
            tracing::debug!("'{}' 区域的“广告活动名称”列是空的（检测通过）", theme);
            continue;
        }

        tracing::debug!("在 '{}' 发现有效活动，行: {:?}", theme, active_rows);
        let missing = settings.missing_creative_keys();
        if !missing.is_empty() {
            return Err(ConversionError::GlobalPrecondition { theme, missing });
        }
        break;
    }

    Ok(Checked::new((), warnings))
}
