//! 出力テーブルの列定義と行型
//!
//! 品牌广告 は28列、SP-商品推广 は25列の固定幅。
//! 列位置は `brand_col` / `sp_col` の定数で参照する。

use crate::types::ThemeKind;
use serde::Serialize;

pub const BRAND_SHEET: &str = "品牌广告";
pub const SPONSORED_SHEET: &str = "SP-商品推广";

pub const BRAND_COLUMNS: [&str; 28] = [
    "产品",
    "实体层级",
    "操作",
    "广告活动编号",
    "广告组编号",
    "广告编号",
    "广告活动名称",
    "广告组名称",
    "广告名称",
    "状态",
    "品牌实体编号",
    "预算类型",
    "预算",
    "商品位置",
    "竞价",
    "关键词文本",
    "匹配类型",
    "拓展商品投放编号",
    "落地页 URL",
    "落地页类型",
    "品牌名称",
    "同意翻译",
    "品牌徽标素材编号",
    "创意素材标题",
    "创意素材 ASIN",
    "视频素材编号",
    "自定义图片",
    "落地页 ASIN",
];

pub const SPONSORED_COLUMNS: [&str; 25] = [
    "产品",
    "实体层级",
    "操作",
    "广告活动编号",
    "广告组编号",
    "广告组合编号",
    "广告编号",
    "关键词编号",
    "商品投放 ID",
    "广告活动名称",
    "广告组名称",
    "开始日期",
    "结束日期",
    "投放类型",
    "状态",
    "每日预算",
    "SKU",
    "广告组默认竞价",
    "竞价",
    "关键词文本",
    "匹配类型",
    "竞价方案",
    "广告位",
    "百分比",
    "拓展商品投放编号",
];

/// 品牌广告 の列位置
pub mod brand_col {
    pub const PRODUCT: usize = 0;
    pub const ENTITY: usize = 1;
    pub const OPERATION: usize = 2;
    pub const CAMPAIGN_ID: usize = 3;
    pub const AD_GROUP_ID: usize = 4;
    pub const AD_ID: usize = 5;
    pub const CAMPAIGN_NAME: usize = 6;
    pub const AD_GROUP_NAME: usize = 7;
    pub const AD_NAME: usize = 8;
    pub const STATUS: usize = 9;
    pub const ENTITY_ID: usize = 10;
    pub const BUDGET_TYPE: usize = 11;
    pub const BUDGET: usize = 12;
    pub const PRODUCT_LOCATION: usize = 13;
    pub const BID: usize = 14;
    pub const KEYWORD_TEXT: usize = 15;
    pub const MATCH_TYPE: usize = 16;
    pub const TARGETING_EXPRESSION: usize = 17;
    pub const LANDING_URL: usize = 18;
    pub const LANDING_TYPE: usize = 19;
    pub const BRAND_NAME: usize = 20;
    pub const CONSENT_TRANSLATION: usize = 21;
    pub const LOGO_ASSET: usize = 22;
    pub const CREATIVE_TITLE: usize = 23;
    pub const CREATIVE_ASINS: usize = 24;
    pub const VIDEO_ASSET: usize = 25;
    pub const CUSTOM_IMAGE: usize = 26;
    pub const LANDING_ASINS: usize = 27;
}

/// SP-商品推广 の列位置
pub mod sp_col {
    pub const PRODUCT: usize = 0;
    pub const ENTITY: usize = 1;
    pub const OPERATION: usize = 2;
    pub const CAMPAIGN_ID: usize = 3;
    pub const AD_GROUP_ID: usize = 4;
    pub const CAMPAIGN_NAME: usize = 9;
    pub const AD_GROUP_NAME: usize = 10;
    pub const TARGETING_TYPE: usize = 13;
    pub const STATUS: usize = 14;
    pub const DAILY_BUDGET: usize = 15;
    pub const SKU: usize = 16;
    pub const AD_GROUP_DEFAULT_BID: usize = 17;
    pub const BID: usize = 18;
    pub const KEYWORD_TEXT: usize = 19;
    pub const MATCH_TYPE: usize = 20;
    pub const BIDDING_STRATEGY: usize = 21;
    pub const PLACEMENT: usize = 22;
    pub const PERCENTAGE: usize = 23;
    pub const TARGETING_EXPRESSION: usize = 24;
}

pub const OPERATION_CREATE: &str = "Create";
pub const STATUS_ENABLED: &str = "已启用";
pub const BRAND_PRODUCT_LOCATION: &str = "在亚马逊上出售";
pub const SP_TARGETING_MANUAL: &str = "手动";
pub const SP_BIDDING_STRATEGY: &str = "动态竞价 - 仅降低";
pub const TRANSLATION_CONSENT: &str = "False";
/// 商品集 の落地页类型 がこの値なら ASIN を 落地页 ASIN 列へ移す
pub const LANDING_TYPE_PRODUCT_LIST: &str = "商品列表";

/// 出力行の実体層級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityLevel {
    Campaign,
    AdGroup,
    /// 品牌旗舰店
    BrandVideoAd,
    /// 商品详情页
    VideoAd,
    /// 商品集
    ProductCollectionAd,
    /// SP
    ProductAd,
    Keyword,
    NegativeKeyword,
    ProductTarget,
    NegativeProductTarget,
    BidAdjustment,
}

impl EntityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            EntityLevel::Campaign => "广告活动",
            EntityLevel::AdGroup => "广告组",
            EntityLevel::BrandVideoAd => "品牌视频广告",
            EntityLevel::VideoAd => "视频广告",
            EntityLevel::ProductCollectionAd => "商品集广告",
            EntityLevel::ProductAd => "商品广告",
            EntityLevel::Keyword => "关键词",
            EntityLevel::NegativeKeyword => "否定关键词",
            EntityLevel::ProductTarget => "商品定向",
            EntityLevel::NegativeProductTarget => "否定商品定向",
            EntityLevel::BidAdjustment => "竞价调整",
        }
    }
}

/// 出力セル
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputCell {
    Empty,
    Text(String),
    Number(f64),
}

impl OutputCell {
    pub fn as_text(&self) -> String {
        match self {
            OutputCell::Empty => String::new(),
            OutputCell::Text(s) => s.clone(),
            OutputCell::Number(n) => n.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            OutputCell::Empty => true,
            OutputCell::Text(s) => s.is_empty(),
            OutputCell::Number(_) => false,
        }
    }
}

impl From<&str> for OutputCell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            OutputCell::Empty
        } else {
            OutputCell::Text(value.to_string())
        }
    }
}

impl From<String> for OutputCell {
    fn from(value: String) -> Self {
        OutputCell::from(value.as_str())
    }
}

impl From<f64> for OutputCell {
    fn from(value: f64) -> Self {
        OutputCell::Number(value)
    }
}

/// 固定幅の出力行
///
/// 产品・实体层级・操作 の3列は生成時に埋まる。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub entity: EntityLevel,
    pub cells: Vec<OutputCell>,
}

impl OutputRow {
    pub fn new(kind: ThemeKind, entity: EntityLevel) -> Self {
        let (width, product) = match kind {
            ThemeKind::Brand => (BRAND_COLUMNS.len(), "品牌推广"),
            ThemeKind::Sponsored => (SPONSORED_COLUMNS.len(), "商品推广"),
        };
        let mut row = Self {
            entity,
            cells: vec![OutputCell::Empty; width],
        };
        row.cells[0] = product.into();
        row.cells[1] = entity.label().into();
        row.cells[2] = OPERATION_CREATE.into();
        row
    }

    /// セルを設定する（連結して書けるよう self を返す）
    pub fn set(mut self, col: usize, value: impl Into<OutputCell>) -> Self {
        if let Some(cell) = self.cells.get_mut(col) {
            *cell = value.into();
        }
        self
    }

    /// 複数列に同じ値を設定する
    pub fn set_all(mut self, cols: &[usize], value: &str) -> Self {
        for &col in cols {
            self = self.set(col, value);
        }
        self
    }

    pub fn cell(&self, col: usize) -> &OutputCell {
        &self.cells[col]
    }

    pub fn text(&self, col: usize) -> String {
        self.cells.get(col).map(OutputCell::as_text).unwrap_or_default()
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

/// 変換結果の2テーブル
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeaderTables {
    pub brand: Vec<OutputRow>,
    pub sponsored: Vec<OutputRow>,
}

impl HeaderTables {
    pub fn is_empty(&self) -> bool {
        self.brand.is_empty() && self.sponsored.is_empty()
    }

    pub fn push(&mut self, kind: ThemeKind, rows: Vec<OutputRow>) {
        match kind {
            ThemeKind::Brand => self.brand.extend(rows),
            ThemeKind::Sponsored => self.sponsored.extend(rows),
        }
    }

    /// 書き出し対象のシート（行がないシートは除く）
    pub fn sheets(&self) -> Vec<(&'static str, &'static [&'static str], &[OutputRow])> {
        let mut sheets: Vec<(&'static str, &'static [&'static str], &[OutputRow])> = Vec::new();
        if !self.brand.is_empty() {
            sheets.push((BRAND_SHEET, &BRAND_COLUMNS[..], self.brand.as_slice()));
        }
        if !self.sponsored.is_empty() {
            sheets.push((SPONSORED_SHEET, &SPONSORED_COLUMNS[..], self.sponsored.as_slice()));
        }
        sheets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_width_and_prefix() {
        let row = OutputRow::new(ThemeKind::Brand, EntityLevel::Campaign);
        assert_eq!(row.width(), 28);
        assert_eq!(row.text(brand_col::PRODUCT), "品牌推广");
        assert_eq!(row.text(brand_col::ENTITY), "广告活动");
        assert_eq!(row.text(brand_col::OPERATION), "Create");

        let row = OutputRow::new(ThemeKind::Sponsored, EntityLevel::BidAdjustment);
        assert_eq!(row.width(), 25);
        assert_eq!(row.text(sp_col::ENTITY), "竞价调整");
    }

    /// 範囲外の列は無視され、幅は変わらない
    #[test]
    fn test_set_out_of_range() {
        let row = OutputRow::new(ThemeKind::Sponsored, EntityLevel::Keyword).set(99, "x");
        assert_eq!(row.width(), 25);
    }

    #[test]
    fn test_column_constants_match_headers() {
        assert_eq!(BRAND_COLUMNS[brand_col::LANDING_ASINS], "落地页 ASIN");
        assert_eq!(BRAND_COLUMNS[brand_col::TARGETING_EXPRESSION], "拓展商品投放编号");
        assert_eq!(SPONSORED_COLUMNS[sp_col::PERCENTAGE], "百分比");
        assert_eq!(SPONSORED_COLUMNS[sp_col::BIDDING_STRATEGY], "竞价方案");
    }

    #[test]
    fn test_sheets_skip_empty() {
        let mut tables = HeaderTables::default();
        assert!(tables.sheets().is_empty());
        tables.push(
            ThemeKind::Sponsored,
            vec![OutputRow::new(ThemeKind::Sponsored, EntityLevel::Campaign)],
        );
        let sheets = tables.sheets();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].0, SPONSORED_SHEET);
    }

    #[test]
    fn test_empty_text_is_empty_cell() {
        assert_eq!(OutputCell::from(""), OutputCell::Empty);
        assert!(OutputCell::from(String::new()).is_empty());
        assert!(!OutputCell::from(0.0).is_empty());
    }
}
