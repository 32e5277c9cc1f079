//! 変換で使う型定義
//!
//! - Theme: シート内に縦積みされた主題ブロックの種類
//! - GlobalSettings: 最初の主題より前の行にある品牌共通設定
//! - Activity: 主題ブロックの1行（広告活動1件）
//! - Classification: 活動名から推定したマッチタイプ・カテゴリ

use serde::{Deserialize, Serialize};
use std::fmt;

/// 主題（広告テーマ）
///
/// 宣言順がそのまま優先順位。ブロック検出と厳格チェックの両方で使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Theme {
    BrandFlagshipStore,
    ProductCollection,
    ProductDetailPage,
    SponsoredProducts,
}

impl Theme {
    /// 優先順位順の全主題
    pub const ALL: [Theme; 4] = [
        Theme::BrandFlagshipStore,
        Theme::ProductCollection,
        Theme::ProductDetailPage,
        Theme::SponsoredProducts,
    ];

    /// 全体設定が必須になる主題
    pub const STRICT: [Theme; 2] = [Theme::BrandFlagshipStore, Theme::ProductCollection];

    /// A列に書かれる主題マーカー
    pub fn marker(&self) -> &'static str {
        match self {
            Theme::BrandFlagshipStore => "SBV落地页：品牌旗舰店",
            Theme::ProductCollection => "SB落地页：商品集",
            Theme::ProductDetailPage => "SBV落地页：商品详情页",
            Theme::SponsoredProducts => "SP-商品推广",
        }
    }

    pub fn kind(&self) -> ThemeKind {
        match self {
            Theme::SponsoredProducts => ThemeKind::Sponsored,
            _ => ThemeKind::Brand,
        }
    }

    pub fn is_brand(&self) -> bool {
        self.kind() == ThemeKind::Brand
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// 出力先テーブルの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeKind {
    /// 品牌广告 (SB/SBV)
    Brand,
    /// SP-商品推广
    Sponsored,
}

/// キーワードのマッチタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    Exact,
    Broad,
}

impl MatchType {
    /// 出力シートに書く表記
    pub fn label(&self) -> &'static str {
        match self {
            MatchType::Exact => "精准",
            MatchType::Broad => "广泛",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// キーワードカテゴリの系統
///
/// キーワード列を持つのは Host と Case だけ。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryFamily {
    Host,
    Case,
    Other,
}

/// 活動名から一致したカテゴリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// 一致したトークン（小文字）
    pub token: String,
    pub family: CategoryFamily,
}

/// 活動の分類結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub match_type: MatchType,
    pub is_asin_targeted: bool,
    pub category: Option<Category>,
}

/// 診断・検証で参照するフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    CampaignName,
    Cpc,
    Budget,
    Sku,
    GroupBid,
    AdPosition,
    Percentage,
    VideoAsset,
    CustomImage,
    LogoAsset,
    LandingType,
    Asins,
    AsinTargets,
    Keywords,
    NegativeKeywords,
    NegativeBrands,
    CreativeTitle,
    LandingUrl,
}

impl Field {
    /// 利用者向けの列名
    pub fn label(&self) -> &'static str {
        match self {
            Field::CampaignName => "广告活动名称",
            Field::Cpc => "CPC",
            Field::Budget => "预算",
            Field::Sku => "SKU",
            Field::GroupBid => "广告组默认竞价",
            Field::AdPosition => "广告位",
            Field::Percentage => "百分比",
            Field::VideoAsset => "视频媒体编号",
            Field::CustomImage => "自定义图片",
            Field::LogoAsset => "品牌徽标素材编号",
            Field::LandingType => "落地页类型",
            Field::Asins => "创意素材 ASIN",
            Field::AsinTargets => "商品定向 ASIN",
            Field::Keywords => "关键词",
            Field::NegativeKeywords => "否定关键词",
            Field::NegativeBrands => "否品牌",
            Field::CreativeTitle => "创意素材标题",
            Field::LandingUrl => "落地页 URL",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 全体設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub entity_id: Option<String>,
    pub brand_name: Option<String>,
    pub budget_type: Option<String>,
    pub creative_title: Option<String>,
    pub landing_url: Option<String>,
}

impl GlobalSettings {
    pub const DEFAULT_BUDGET_TYPE: &'static str = "每日";

    pub fn entity_id(&self) -> &str {
        self.entity_id.as_deref().unwrap_or("")
    }

    pub fn brand_name(&self) -> &str {
        self.brand_name.as_deref().unwrap_or("")
    }

    /// 未設定・空欄なら「每日」
    pub fn budget_type(&self) -> &str {
        match self.budget_type.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => Self::DEFAULT_BUDGET_TYPE,
        }
    }

    pub fn creative_title(&self) -> &str {
        self.creative_title.as_deref().unwrap_or("")
    }

    pub fn landing_url(&self) -> &str {
        self.landing_url.as_deref().unwrap_or("")
    }

    /// 厳格主題で必須となる項目のうち空のもの
    pub fn missing_creative_keys(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if self.creative_title().is_empty() {
            missing.push(Field::CreativeTitle);
        }
        if self.landing_url().is_empty() {
            missing.push(Field::LandingUrl);
        }
        missing
    }
}

/// 品牌系主題の固有フィールド
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandFields {
    /// D/E/F列を結合・重複除去したASIN（", "区切り）
    pub asins: String,
    pub video_asset: String,
    pub custom_image: String,
    pub logo_asset: String,
    pub landing_type: String,
}

/// SP主題の固有フィールド
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SponsoredFields {
    pub sku: String,
    pub group_bid: Option<f64>,
    pub ad_position: String,
    /// 整数化済みの百分比
    pub percentage: Option<String>,
}

/// 主題ごとに異なるフィールド集合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivityDetails {
    Brand(BrandFields),
    Sponsored(SponsoredFields),
}

/// 主題ブロックの1行（活動名が空でない行のみ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub theme: Theme,
    pub campaign_name: String,
    pub cpc: Option<f64>,
    pub budget: Option<f64>,
    /// シート上の行番号（0始まり）
    pub source_row: usize,
    pub details: ActivityDetails,
}

impl Activity {
    pub fn brand(&self) -> Option<&BrandFields> {
        match &self.details {
            ActivityDetails::Brand(b) => Some(b),
            ActivityDetails::Sponsored(_) => None,
        }
    }

    pub fn sponsored(&self) -> Option<&SponsoredFields> {
        match &self.details {
            ActivityDetails::Sponsored(s) => Some(s),
            ActivityDetails::Brand(_) => None,
        }
    }
}
