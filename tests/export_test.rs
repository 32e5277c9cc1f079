//! ワークブック入出力の統合テスト
//!
//! 广告模版を xlsx で作成 → 読み込み → 変換 → header 出力 → 読み戻し

use ad_header_common::schema::{BRAND_COLUMNS, SPONSORED_COLUMNS};
use ad_header_common::{convert, ConversionOptions, HeaderTables};
use ad_header_rust::error::AdHeaderError;
use ad_header_rust::export::excel;
use ad_header_rust::reader;
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;

/// SP ブロックだけの广告模版を書く
fn write_survey(path: &Path, sheet: &str) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).unwrap();

    worksheet.write_string(0, 11, "suzhu/宿主/host-精准词").unwrap();
    worksheet.write_string(1, 0, "SP-商品推广").unwrap();
    for (col, name) in ["广告活动名称", "CPC", "预算", "SKU", "广告组默认竞价"].iter().enumerate() {
        worksheet.write_string(2, col as u16 + 1, *name).unwrap();
    }
    worksheet.write_string(3, 1, "Host_Exact").unwrap();
    worksheet.write_number(3, 2, 0.5).unwrap();
    worksheet.write_number(3, 3, 10.0).unwrap();
    worksheet.write_string(3, 4, "SKU1").unwrap();
    worksheet.write_number(3, 5, 0.4).unwrap();
    worksheet.write_string(3, 11, "phone case").unwrap();
    worksheet.write_string(4, 11, "phone holder").unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn test_read_convert_write_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let survey = dir.path().join("survey.xlsx");
    write_survey(&survey, "广告模版");

    let grid = reader::read_sheet(&survey, "广告模版").expect("シート読み込み失敗");
    assert_eq!(grid.cell(3, 3), "10");
    assert_eq!(grid.cell(3, 2), "0.5");

    let conversion = convert(&grid, &ConversionOptions::default()).expect("変換失敗");
    assert_eq!(conversion.sponsored_rows(), 5);
    assert_eq!(conversion.brand_rows(), 0);

    let output = dir.path().join("out").join("header.xlsx");
    excel::generate_excel(&conversion.tables, &output).expect("Excel生成に失敗");
    assert!(output.exists(), "Excelファイルが作成されていない");

    let mut workbook = open_workbook_auto(&output).expect("出力の読み込み失敗");
    // 行のない 品牌广告 シートは作られない
    assert_eq!(workbook.sheet_names(), vec!["SP-商品推广".to_string()]);

    let range = workbook.worksheet_range("SP-商品推广").unwrap();
    assert_eq!(range.height(), 1 + 5);
    assert_eq!(range.width(), SPONSORED_COLUMNS.len());
    for (col, name) in SPONSORED_COLUMNS.iter().enumerate() {
        assert_eq!(range.get((0, col)), Some(&Data::String(name.to_string())));
    }
    assert_eq!(range.get((1, 1)), Some(&Data::String("广告活动".into())));
    assert_eq!(range.get((1, 15)), Some(&Data::Float(10.0)));
    assert_eq!(range.get((4, 19)), Some(&Data::String("phone case".into())));
    assert_eq!(range.get((5, 20)), Some(&Data::String("精准".into())));
}

#[test]
fn test_brand_sheet_header_row() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("brand.xlsx");

    let mut tables = HeaderTables::default();
    tables.brand.push(ad_header_common::OutputRow::new(
        ad_header_common::ThemeKind::Brand,
        ad_header_common::schema::EntityLevel::Campaign,
    ));
    excel::generate_excel(&tables, &output).expect("Excel生成に失敗");

    let mut workbook = open_workbook_auto(&output).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["品牌广告".to_string()]);
    let range = workbook.worksheet_range("品牌广告").unwrap();
    assert_eq!(range.width(), BRAND_COLUMNS.len());
    assert_eq!(range.get((0, 27)), Some(&Data::String("落地页 ASIN".into())));
    assert_eq!(range.get((1, 0)), Some(&Data::String("品牌推广".into())));
}

#[test]
fn test_empty_tables_write_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("empty.xlsx");

    let result = excel::generate_excel(&HeaderTables::default(), &output);
    assert!(matches!(result, Err(AdHeaderError::NothingToWrite)));
    assert!(!output.exists());
}
