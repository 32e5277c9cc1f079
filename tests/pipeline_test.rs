//! 変換パイプラインの統合テスト
//!
//! メモリ上のシートで主要シナリオを通しで検証

use ad_header_common::error::ConversionError;
use ad_header_common::schema::{brand_col, sp_col, EntityLevel, OutputCell, OutputRow};
use ad_header_common::types::{Field, Theme};
use ad_header_common::{convert, ConversionOptions, Grid};

/// 指定列だけ値を持つ行
fn sparse(width: usize, cells: &[(usize, &str)]) -> Vec<String> {
    let mut row = vec![String::new(); width];
    for &(col, value) in cells {
        row[col] = value.to_string();
    }
    row
}

fn entities(rows: &[OutputRow]) -> Vec<EntityLevel> {
    rows.iter().map(|r| r.entity).collect()
}

fn sp_header(width: usize) -> Vec<String> {
    sparse(
        width,
        &[(1, "广告活动名称"), (2, "CPC"), (3, "预算"), (4, "SKU"), (5, "广告组默认竞价")],
    )
}

/// SP のみ、精准キーワード3件
#[test]
fn test_scenario_sponsored_exact_keywords() {
    let w = 14;
    let grid = Grid::from_rows(vec![
        sparse(w, &[(11, "suzhu/宿主/host-精准词")]),
        sparse(w, &[(0, "SP-商品推广")]),
        sp_header(w),
        sparse(
            w,
            &[(1, "Host_Exact_Campaign"), (2, "0.5"), (3, "10"), (4, "SKU1"), (5, "0.4"), (11, "phone case")],
        ),
        sparse(w, &[(11, "phone holder")]),
        sparse(w, &[(11, "phone stand")]),
    ]);

    let conversion = convert(&grid, &ConversionOptions::default()).expect("conversion should succeed");
    let rows = &conversion.tables.sponsored;

    assert!(conversion.tables.brand.is_empty());
    assert_eq!(rows.len(), 3 + 3);
    assert_eq!(&entities(rows)[..3], &[EntityLevel::Campaign, EntityLevel::AdGroup, EntityLevel::ProductAd]);

    let keywords: Vec<String> = rows[3..].iter().map(|r| r.text(sp_col::KEYWORD_TEXT)).collect();
    assert_eq!(keywords, vec!["phone case", "phone holder", "phone stand"]);
    assert!(rows[3..].iter().all(|r| r.text(sp_col::MATCH_TYPE) == "精准"));
    assert!(rows[3..].iter().all(|r| r.cell(sp_col::BID) == &OutputCell::Number(0.5)));
    assert_eq!(rows[0].cell(sp_col::DAILY_BUDGET), &OutputCell::Number(10.0));
    assert_eq!(rows[1].cell(sp_col::AD_GROUP_DEFAULT_BID), &OutputCell::Number(0.4));
}

/// 商品集に活動があるのに全体設定が空なら中止
#[test]
fn test_scenario_collection_without_global_settings() {
    let w = 12;
    let grid = Grid::from_rows(vec![
        sparse(w, &[]),
        sparse(w, &[(0, "品牌实体编号"), (1, "E1")]),
        sparse(w, &[(0, "SB落地页：商品集")]),
        sparse(w, &[(1, "广告活动名称"), (2, "CPC")]),
        sparse(w, &[(1, "Collection_1"), (2, "0.6")]),
    ]);

    let failure = convert(&grid, &ConversionOptions::default()).unwrap_err();
    match &failure.error {
        ConversionError::GlobalPrecondition { theme, missing } => {
            assert_eq!(*theme, Theme::ProductCollection);
            assert_eq!(missing, &vec![Field::CreativeTitle, Field::LandingUrl]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(failure.to_string().contains("SB落地页：商品集"));
}

/// 否精准・否词组の両方にある否定キーワードで中止
#[test]
fn test_scenario_duplicate_negative_keyword() {
    let w = 14;
    let grid = Grid::from_rows(vec![
        sparse(w, &[(11, "suzhu/宿主/host-精准词"), (12, "宿主精准-否精准"), (13, "宿主精准-否词组")]),
        sparse(w, &[(0, "SP-商品推广")]),
        sp_header(w),
        sparse(
            w,
            &[(1, "Host_Exact"), (2, "0.5"), (3, "10"), (4, "SKU1"), (5, "0.4"), (11, "shoes"), (12, "鞋子"), (13, "袜子")],
        ),
        sparse(w, &[(13, "鞋子")]),
    ]);

    let failure = convert(&grid, &ConversionOptions::default()).unwrap_err();
    let ConversionError::DuplicateNegativeKeyword(duplicate) = &failure.error else {
        panic!("unexpected error: {:?}", failure.error);
    };
    assert_eq!(duplicate.keyword, "鞋子");
    assert_eq!(duplicate.campaign, "Host_Exact");
    let labels: Vec<&str> = duplicate.sources.iter().map(|s| s.label).collect();
    assert_eq!(labels, vec!["W", "X"]);
    assert!(failure.to_string().contains("宿主精准-否精准"));
    assert!(failure.to_string().contains("宿主精准-否词组"));
}

/// ASIN投放: 同名列の値ごとに商品定向、否定ASINごとに否定商品定向
#[test]
fn test_scenario_asin_targeting() {
    let w = 8;
    let grid = Grid::from_rows(vec![
        sparse(w, &[(6, "ASIN_Target_1"), (7, "否定ASIN")]),
        sparse(w, &[(0, "SP-商品推广")]),
        sp_header(w),
        sparse(
            w,
            &[(1, "ASIN_Target_1"), (2, "0.5"), (3, "10"), (4, "SKU1"), (5, "0.4"), (6, "B0A"), (7, "B0NEG")],
        ),
        sparse(w, &[(6, "B0B")]),
    ]);

    let conversion = convert(&grid, &ConversionOptions::default()).unwrap();
    let rows = &conversion.tables.sponsored;
    assert_eq!(
        entities(&rows[3..]),
        vec![
            EntityLevel::ProductTarget,
            EntityLevel::ProductTarget,
            EntityLevel::NegativeProductTarget,
        ]
    );
    let expressions: Vec<String> = rows[3..].iter().map(|r| r.text(sp_col::TARGETING_EXPRESSION)).collect();
    assert_eq!(expressions, vec!["asin=\"B0A\"", "asin=\"B0B\"", "asin=\"B0NEG\""]);
}

/// ASIN投放なのに同名列がなければ検証エラー
#[test]
fn test_asin_campaign_without_column() {
    let w = 8;
    let grid = Grid::from_rows(vec![
        sparse(w, &[]),
        sparse(w, &[(0, "SP-商品推广")]),
        sp_header(w),
        sparse(w, &[(1, "ASIN_Target_9"), (2, "0.5"), (3, "10"), (4, "SKU1"), (5, "0.4")]),
    ]);

    let failure = convert(&grid, &ConversionOptions::default()).unwrap_err();
    let ConversionError::FieldValidation(violations) = &failure.error else {
        panic!("unexpected error: {:?}", failure.error);
    };
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, Field::AsinTargets);
}

fn mixed_sheet() -> Grid {
    let w = 14;
    Grid::from_rows(vec![
        sparse(
            w,
            &[(11, "suzhu/宿主/host-精准词"), (12, "suzhu/宿主/host-广泛词"), (13, "suzhu/宿主/host-广泛词带加号")],
        ),
        sparse(w, &[(0, "品牌实体编号"), (1, "E1")]),
        sparse(w, &[(0, "品牌名称"), (1, "Acme")]),
        sparse(w, &[(0, "预算类型"), (1, "")]),
        sparse(w, &[(0, "创意素材标题"), (1, "Best Cases")]),
        sparse(w, &[(0, "落地页 URL"), (1, "https://example.com/store")]),
        sparse(w, &[(0, "SBV落地页：品牌旗舰店")]),
        sparse(
            w,
            &[
                (1, "广告活动名称"),
                (2, "CPC"),
                (3, "ASIN1"),
                (4, "ASIN2"),
                (5, "ASIN3"),
                (6, "预算"),
                (7, "视频媒体编号"),
                (8, "自定义图片"),
                (9, "品牌徽标素材编号"),
                (10, "落地页类型"),
            ],
        ),
        sparse(
            w,
            &[
                (1, "Store_Host_Broad"),
                (2, "0.7"),
                (3, "B01,B02"),
                (4, "B02"),
                (6, "20"),
                (7, "V1"),
                (8, "IMG1"),
                (9, "LOGO1"),
                (10, "品牌旗舰店"),
                (12, "phone case"),
                (13, "+phone +case"),
            ],
        ),
        sparse(w, &[(0, "SP-商品推广")]),
        sparse(
            w,
            &[(1, "广告活动名称"), (2, "CPC"), (3, "预算"), (4, "SKU"), (5, "广告组默认竞价"), (6, "广告位"), (7, "百分比")],
        ),
        sparse(
            w,
            &[(1, "Host_Broad_SP"), (2, "0.5"), (3, "10"), (4, "SKU1"), (5, "0.4"), (6, "商品页面"), (7, "30.0")],
        ),
    ])
}

/// 品牌とSPが同じシートにある場合、それぞれのテーブルに出る
#[test]
fn test_brand_and_sponsored_in_one_sheet() {
    let conversion = convert(&mixed_sheet(), &ConversionOptions::default()).unwrap();

    let brand = &conversion.tables.brand;
    assert_eq!(
        entities(brand),
        vec![EntityLevel::Campaign, EntityLevel::AdGroup, EntityLevel::BrandVideoAd, EntityLevel::Keyword]
    );
    assert_eq!(brand[0].text(brand_col::ENTITY_ID), "E1");
    assert_eq!(brand[0].text(brand_col::BUDGET_TYPE), "每日");
    assert_eq!(brand[2].text(brand_col::CREATIVE_ASINS), "B01, B02");
    assert_eq!(brand[2].text(brand_col::LOGO_ASSET), "LOGO1");
    assert_eq!(brand[2].text(brand_col::CREATIVE_TITLE), "Best Cases");
    assert_eq!(brand[3].text(brand_col::KEYWORD_TEXT), "+phone +case");
    assert_eq!(brand[3].text(brand_col::MATCH_TYPE), "广泛");

    let sponsored = &conversion.tables.sponsored;
    assert_eq!(
        entities(sponsored),
        vec![
            EntityLevel::Campaign,
            EntityLevel::AdGroup,
            EntityLevel::ProductAd,
            EntityLevel::Keyword,
            EntityLevel::BidAdjustment,
        ]
    );
    assert_eq!(sponsored[3].text(sp_col::KEYWORD_TEXT), "phone case");
    assert_eq!(sponsored[4].cell(sp_col::PERCENTAGE), &OutputCell::Number(30.0));
    assert!(brand.iter().all(|r| r.width() == 28));
    assert!(sponsored.iter().all(|r| r.width() == 25));
}

/// 同じ入力からは同じテーブル
#[test]
fn test_conversion_is_idempotent() {
    let grid = mixed_sheet();
    let options = ConversionOptions::default();
    let first = convert(&grid, &options).unwrap();
    let second = convert(&grid, &options).unwrap();
    assert_eq!(first.tables, second.tables);
    assert_eq!(first.diagnostics, second.diagnostics);
}
