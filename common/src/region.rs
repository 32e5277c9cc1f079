//! 主題ブロックの検出
//!
//! A列を上から走査して主題マーカーを探し、ヘッダー行と最終行を決める。
//! 終端は「自分以外の主題マーカーが現れる直前の行」またはシート末尾。

use crate::diagnostics::{Checked, Diagnostic, DiagnosticKind};
use crate::grid::Grid;
use crate::types::Theme;
use serde::Serialize;

/// 1つの主題ブロック
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub theme: Theme,
    pub marker_row: usize,
    pub header_row: usize,
    pub end_row: usize,
}

impl Region {
    /// データ行があるか
    pub fn has_data(&self) -> bool {
        self.end_row > self.header_row
    }

    /// データ行数
    pub fn data_len(&self) -> usize {
        self.end_row.saturating_sub(self.header_row)
    }
}

/// A列のセルが主題マーカーを含むか
fn marker_at(grid: &Grid, row: usize, theme: Theme) -> bool {
    grid.cell(row, 0).trim().contains(theme.marker())
}

/// 主題ブロックを検出する（見つからなければ None）
///
/// 走査は1行目から（0行目はシートの列名行）。
pub fn locate(grid: &Grid, theme: Theme) -> Option<Region> {
    let marker_row = (1..grid.row_count()).find(|&row| marker_at(grid, row, theme))?;

    let next_marker = (marker_row + 1..grid.row_count()).find(|&row| {
        Theme::ALL
            .iter()
            .filter(|&&other| other != theme)
            .any(|&other| marker_at(grid, row, other))
    });

    let end_row = match next_marker {
        Some(row) => row - 1,
        None => grid.row_count() - 1,
    };

    Some(Region {
        theme,
        marker_row,
        header_row: marker_row + 1,
        end_row,
    })
}

/// シート内の主題ブロック一覧（優先順位順）
#[derive(Debug, Clone, Default, Serialize)]
pub struct SheetLayout {
    pub regions: Vec<Region>,
}

impl SheetLayout {
    pub fn get(&self, theme: Theme) -> Option<&Region> {
        self.regions.iter().find(|r| r.theme == theme)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// 全体設定の読み取り上限（最も上にあるマーカー行）
    pub fn settings_boundary(&self) -> Option<usize> {
        self.regions.iter().map(|r| r.marker_row).min()
    }
}

/// 全主題を優先順位順に検出する
///
/// 見つからない主題は警告のみで読み飛ばす。
pub fn locate_all(grid: &Grid) -> Checked<SheetLayout> {
    let mut regions = Vec::new();
    let mut warnings = Vec::new();

    for theme in Theme::ALL {
        match locate(grid, theme) {
            Some(region) => {
                tracing::debug!(
                    "找到 '{}' 区域: 主题行 {}, header行 {}, 数据到行 {}",
                    theme,
                    region.marker_row + 1,
                    region.header_row + 1,
                    region.end_row + 1
                );
                regions.push(region);
            }
            None => {
                warnings.push(
                    Diagnostic::warning(
                        DiagnosticKind::RegionMissing,
                        format!("未找到主题 '{}' 在A列，跳过", theme),
                    )
                    .with_theme(theme),
                );
            }
        }
    }

    Checked::new(SheetLayout { regions }, warnings)
}
