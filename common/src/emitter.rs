//! 出力行の生成
//!
//! 1件の活動から、広告活動 → 广告组 → 広告実体 → 关键词 → 否定关键词
//! → 商品定向 → 否定商品定向 → 竞价调整(SPのみ) の順で行を作る。

use crate::keywords::GlobalNegativeLists;
use crate::negatives::NegativeKeywordIndex;
use crate::options::ConversionOptions;
use crate::schema::{
    brand_col, sp_col, EntityLevel, OutputCell, OutputRow, BRAND_PRODUCT_LOCATION,
    LANDING_TYPE_PRODUCT_LIST, SP_BIDDING_STRATEGY, SP_TARGETING_MANUAL, STATUS_ENABLED,
    TRANSLATION_CONSENT,
};
use crate::types::{Activity, ActivityDetails, BrandFields, Classification, GlobalSettings, SponsoredFields, Theme, ThemeKind};

/// 活動ごとに解決済みの入力
#[derive(Debug, Clone)]
pub struct ResolvedActivity {
    pub classification: Classification,
    pub keywords: Vec<String>,
    pub negatives: NegativeKeywordIndex,
    /// 活動名と同名の列の値（ASIN投放のみ）
    pub asin_targets: Vec<String>,
}

fn asin_expression(asin: &str) -> String {
    format!("asin=\"{}\"", asin)
}

fn brand_expression(brand: &str) -> String {
    format!("brand=\"{}\"", brand)
}

/// 広告実体行の層級
pub fn ad_entity(theme: Theme) -> EntityLevel {
    match theme {
        Theme::BrandFlagshipStore => EntityLevel::BrandVideoAd,
        Theme::ProductDetailPage => EntityLevel::VideoAd,
        Theme::ProductCollection => EntityLevel::ProductCollectionAd,
        Theme::SponsoredProducts => EntityLevel::ProductAd,
    }
}

/// 行生成器（シート全体の共通値を保持）
pub struct RowEmitter<'a> {
    settings: &'a GlobalSettings,
    global_negatives: &'a GlobalNegativeLists,
    options: &'a ConversionOptions,
}

impl<'a> RowEmitter<'a> {
    pub fn new(
        settings: &'a GlobalSettings,
        global_negatives: &'a GlobalNegativeLists,
        options: &'a ConversionOptions,
    ) -> Self {
        Self { settings, global_negatives, options }
    }

    /// 1件の活動の行を生成する
    pub fn emit(&self, activity: &Activity, resolved: &ResolvedActivity) -> Vec<OutputRow> {
        match &activity.details {
            ActivityDetails::Brand(brand) => self.emit_brand(activity, brand, resolved),
            ActivityDetails::Sponsored(sp) => self.emit_sponsored(activity, sp, resolved),
        }
    }

    fn emit_brand(&self, activity: &Activity, brand: &BrandFields, resolved: &ResolvedActivity) -> Vec<OutputRow> {
        use brand_col::*;
        let kind = ThemeKind::Brand;
        let name = activity.campaign_name.as_str();
        let cpc = activity.cpc.unwrap_or(self.options.default_cpc);
        let budget = activity.budget.unwrap_or(self.options.default_brand_budget);
        let group = [CAMPAIGN_ID, AD_GROUP_ID];

        let mut rows = vec![
            OutputRow::new(kind, EntityLevel::Campaign)
                .set_all(&[CAMPAIGN_ID, CAMPAIGN_NAME], name)
                .set(STATUS, STATUS_ENABLED)
                .set(ENTITY_ID, self.settings.entity_id())
                .set(BUDGET_TYPE, self.settings.budget_type())
                .set(BUDGET, budget)
                .set(PRODUCT_LOCATION, BRAND_PRODUCT_LOCATION),
            OutputRow::new(kind, EntityLevel::AdGroup)
                .set_all(&[CAMPAIGN_ID, AD_GROUP_ID, CAMPAIGN_NAME, AD_GROUP_NAME], name)
                .set(STATUS, STATUS_ENABLED),
            self.brand_ad(activity.theme, name, brand),
        ];

        if !resolved.classification.is_asin_targeted {
            rows.extend(resolved.keywords.iter().map(|kw| {
                OutputRow::new(kind, EntityLevel::Keyword)
                    .set_all(&group, name)
                    .set(STATUS, STATUS_ENABLED)
                    .set(BID, cpc)
                    .set(KEYWORD_TEXT, kw.as_str())
                    .set(MATCH_TYPE, resolved.classification.match_type.label())
            }));
            rows.extend(resolved.negatives.rows().into_iter().map(|(kw, subtype)| {
                OutputRow::new(kind, EntityLevel::NegativeKeyword)
                    .set_all(&group, name)
                    .set(STATUS, STATUS_ENABLED)
                    .set(KEYWORD_TEXT, kw)
                    .set(MATCH_TYPE, subtype.label())
            }));
        } else {
            let target = [CAMPAIGN_ID, AD_GROUP_ID, AD_GROUP_NAME];
            rows.extend(resolved.asin_targets.iter().map(|asin| {
                OutputRow::new(kind, EntityLevel::ProductTarget)
                    .set_all(&target, name)
                    .set(STATUS, STATUS_ENABLED)
                    .set(BID, cpc)
                    .set(TARGETING_EXPRESSION, asin_expression(asin))
            }));
            let negatives = self
                .global_negatives
                .neg_asin
                .iter()
                .map(|asin| asin_expression(asin))
                .chain(self.global_negatives.neg_brand.iter().map(|b| brand_expression(b)));
            rows.extend(negatives.map(|expression| {
                OutputRow::new(kind, EntityLevel::NegativeProductTarget)
                    .set_all(&target, name)
                    .set(STATUS, STATUS_ENABLED)
                    .set(TARGETING_EXPRESSION, expression)
            }));
        }

        rows
    }

    /// 主題ごとの広告実体行
    fn brand_ad(&self, theme: Theme, name: &str, brand: &BrandFields) -> OutputRow {
        use brand_col::*;
        let row = OutputRow::new(ThemeKind::Brand, ad_entity(theme))
            .set_all(&[CAMPAIGN_ID, AD_GROUP_ID, AD_ID, AD_NAME], name)
            .set(STATUS, STATUS_ENABLED)
            .set(LANDING_TYPE, brand.landing_type.as_str())
            .set(CONSENT_TRANSLATION, TRANSLATION_CONSENT)
            .set(VIDEO_ASSET, brand.video_asset.as_str());

        match theme {
            Theme::BrandFlagshipStore => row
                .set(LANDING_URL, self.settings.landing_url())
                .set(BRAND_NAME, self.settings.brand_name())
                .set(LOGO_ASSET, brand.logo_asset.as_str())
                .set(CREATIVE_TITLE, self.settings.creative_title())
                .set(CREATIVE_ASINS, brand.asins.as_str())
                .set(CUSTOM_IMAGE, brand.custom_image.as_str()),
            Theme::ProductDetailPage => row.set(CREATIVE_ASINS, brand.asins.as_str()),
            Theme::ProductCollection => {
                let row = row
                    .set(BRAND_NAME, self.settings.brand_name())
                    .set(LOGO_ASSET, brand.logo_asset.as_str())
                    .set(CREATIVE_TITLE, self.settings.creative_title())
                    .set(CUSTOM_IMAGE, brand.custom_image.as_str());
                // 商品列表: URL と創意素材ASINを空にし、ASINは落地页 ASIN へ
                if brand.landing_type == LANDING_TYPE_PRODUCT_LIST {
                    row.set(LANDING_ASINS, brand.asins.as_str())
                } else {
                    row.set(LANDING_URL, self.settings.landing_url())
                        .set(CREATIVE_ASINS, brand.asins.as_str())
                }
            }
            Theme::SponsoredProducts => row,
        }
    }

    fn emit_sponsored(&self, activity: &Activity, sp: &SponsoredFields, resolved: &ResolvedActivity) -> Vec<OutputRow> {
        use sp_col::*;
        let kind = ThemeKind::Sponsored;
        let name = activity.campaign_name.as_str();
        let cpc = activity.cpc.unwrap_or(self.options.default_cpc);
        let budget = activity.budget.unwrap_or(self.options.default_sp_budget);
        let group_bid = sp.group_bid.unwrap_or(self.options.default_cpc);
        let group = [CAMPAIGN_ID, AD_GROUP_ID, CAMPAIGN_NAME, AD_GROUP_NAME];
        let base = |entity| {
            OutputRow::new(kind, entity)
                .set_all(&group, name)
                .set(STATUS, STATUS_ENABLED)
        };

        let mut rows = vec![
            OutputRow::new(kind, EntityLevel::Campaign)
                .set_all(&[CAMPAIGN_ID, CAMPAIGN_NAME], name)
                .set(TARGETING_TYPE, SP_TARGETING_MANUAL)
                .set(STATUS, STATUS_ENABLED)
                .set(DAILY_BUDGET, budget)
                .set(BIDDING_STRATEGY, SP_BIDDING_STRATEGY),
            base(EntityLevel::AdGroup).set(AD_GROUP_DEFAULT_BID, group_bid),
            base(EntityLevel::ProductAd).set(SKU, sp.sku.as_str()),
        ];

        if !resolved.classification.is_asin_targeted {
            rows.extend(resolved.keywords.iter().map(|kw| {
                base(EntityLevel::Keyword)
                    .set(BID, cpc)
                    .set(KEYWORD_TEXT, kw.as_str())
                    .set(MATCH_TYPE, resolved.classification.match_type.label())
            }));
            rows.extend(resolved.negatives.rows().into_iter().map(|(kw, subtype)| {
                base(EntityLevel::NegativeKeyword)
                    .set(KEYWORD_TEXT, kw)
                    .set(MATCH_TYPE, subtype.label())
            }));
        } else {
            rows.extend(resolved.asin_targets.iter().map(|asin| {
                base(EntityLevel::ProductTarget)
                    .set(BID, cpc)
                    .set(TARGETING_EXPRESSION, asin_expression(asin))
            }));
            rows.extend(self.global_negatives.neg_asin.iter().map(|asin| {
                base(EntityLevel::NegativeProductTarget).set(TARGETING_EXPRESSION, asin_expression(asin))
            }));
            if self.options.sp_negative_brand {
                rows.extend(self.global_negatives.neg_brand.iter().map(|b| {
                    base(EntityLevel::NegativeProductTarget).set(TARGETING_EXPRESSION, brand_expression(b))
                }));
            }
        }

        match (sp.ad_position.as_str(), sp.percentage.as_deref()) {
            (position, Some(percentage)) if !position.is_empty() => {
                let percentage = percentage
                    .parse::<f64>()
                    .map(OutputCell::Number)
                    .unwrap_or_else(|_| OutputCell::from(percentage));
                rows.push(
                    OutputRow::new(kind, EntityLevel::BidAdjustment)
                        .set_all(&[CAMPAIGN_ID, CAMPAIGN_NAME, AD_GROUP_NAME], name)
                        .set(TARGETING_TYPE, SP_TARGETING_MANUAL)
                        .set(STATUS, STATUS_ENABLED)
                        .set(BIDDING_STRATEGY, SP_BIDDING_STRATEGY)
                        .set(PLACEMENT, position)
                        .set(PERCENTAGE, percentage),
                );
            }
            _ => tracing::debug!("  跳过竞价调整行 (活动: {})：广告位或百分比为空", name),
        }

        rows
    }
}
