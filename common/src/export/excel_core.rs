//! Excel生成（共通ライブラリ）
//!
//! schema.rs の列定義を使用して header テーブルのExcelを生成

use crate::schema::{HeaderTables, OutputCell, OutputRow};
use rust_xlsxwriter::*;

/// 列幅（文字数換算）
const MIN_COL_WIDTH: f64 = 10.0;
const MAX_COL_WIDTH: f64 = 40.0;

/// 列名と値から列幅を決める
fn column_width(header: &str, rows: &[OutputRow], col: usize) -> f64 {
    let longest = rows
        .iter()
        .map(|row| row.text(col).chars().count())
        .chain(std::iter::once(header.chars().count() * 2))
        .max()
        .unwrap_or(0);
    (longest as f64 + 2.0).clamp(MIN_COL_WIDTH, MAX_COL_WIDTH)
}

/// 1シート分を書き込む
fn write_sheet(
    worksheet: &mut Worksheet,
    columns: &[&str],
    rows: &[OutputRow],
    header_format: &Format,
) -> Result<(), String> {
    for (col, name) in columns.iter().enumerate() {
        let col_u16 = col as u16;
        worksheet.write_string_with_format(0, col_u16, *name, header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
        worksheet.set_column_width(col_u16, column_width(name, rows, col))
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }
    worksheet.set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    for (idx, row) in rows.iter().enumerate() {
        let excel_row = idx as u32 + 1;
        for (col, cell) in row.cells.iter().enumerate() {
            let col_u16 = col as u16;
            match cell {
                OutputCell::Empty => {}
                OutputCell::Text(text) => {
                    worksheet.write_string(excel_row, col_u16, text)
                        .map_err(|e| format!("値書き込みエラー: {}", e))?;
                }
                OutputCell::Number(value) => {
                    worksheet.write_number(excel_row, col_u16, *value)
                        .map_err(|e| format!("数値書き込みエラー: {}", e))?;
                }
            }
        }
    }

    Ok(())
}

/// header テーブルのExcelをバッファに生成
///
/// 行のないテーブルのシートは作らない。両方空ならエラー。
pub fn generate_header_buffer(tables: &HeaderTables) -> Result<Vec<u8>, String> {
    let sheets = tables.sheets();
    if sheets.is_empty() {
        return Err("出力する行がありません".to_string());
    }

    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    for (sheet_name, columns, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        write_sheet(worksheet, columns, rows, &header_format)?;
    }

    // バッファに書き出し
    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
