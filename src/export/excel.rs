//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書き出す

use crate::error::{AdHeaderError, Result};
use ad_header_common::export::excel_core;
use ad_header_common::HeaderTables;
use std::path::Path;

pub fn generate_excel(tables: &HeaderTables, output_path: &Path) -> Result<()> {
    if tables.is_empty() {
        return Err(AdHeaderError::NothingToWrite);
    }

    let buffer = excel_core::generate_header_buffer(tables)
        .map_err(AdHeaderError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;
    Ok(())
}
