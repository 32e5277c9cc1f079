//! ワークブック読み込み
//!
//! calamine でシートを読み、セルを文字列化して `Grid` にする。
//! 0行目はシートの1行目（列名行）。

use crate::error::{AdHeaderError, Result};
use ad_header_common::Grid;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// セルを文字列にする
///
/// 整数値の小数は整数表記（10.0 → "10"）、真偽値は True/False、エラーは空。
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_text(*f),
        Data::Bool(b) => if *b { "True".into() } else { "False".into() },
        Data::DateTime(dt) => float_text(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

fn float_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Range を Grid に変換（A1 起点に揃える）
pub fn range_to_grid(range: &Range<Data>) -> Grid {
    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }
    Grid::from_rows(rows)
}

/// ワークブックの指定シートを読む
pub fn read_sheet(path: &Path, sheet: &str) -> Result<Grid> {
    if !path.exists() {
        return Err(AdHeaderError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();
    if !names.iter().any(|n| n == sheet) {
        return Err(AdHeaderError::SheetNotFound {
            sheet: sheet.to_string(),
            available: names.join(", "),
        });
    }

    let range = workbook.worksheet_range(sheet)?;
    let grid = range_to_grid(&range);
    tracing::debug!("シート '{}' 読み込み: {}行 x {}列", sheet, grid.row_count(), grid.width());
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(10.0)), "10");
        assert_eq!(cell_text(&Data::Float(0.45)), "0.45");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Bool(true)), "True");
        assert_eq!(cell_text(&Data::String(" x ".into())), " x ");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    /// 左上が空のシートでもA1起点になる
    #[test]
    fn test_range_offset() {
        let mut range: Range<Data> = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("SP-商品推广".into()));
        range.set_value((2, 2), Data::Float(3.0));

        let grid = range_to_grid(&range);
        assert_eq!(grid.cell(1, 1), "SP-商品推广");
        assert_eq!(grid.cell(2, 2), "3");
        assert_eq!(grid.cell(0, 0), "");
    }
}
