//! 必須項目の検証
//!
//! 全主題・全活動を検査し、違反をすべて集めてから返す（最初の1件で止まらない）。

use crate::classifier::is_asin_campaign;
use crate::error::{FieldViolation, ViolationRule};
use crate::grid::Grid;
use crate::types::{Activity, ActivityDetails, Field, Theme};

/// 主題ごとの必須フィールド
fn required_fields(theme: Theme) -> &'static [Field] {
    match theme {
        Theme::SponsoredProducts => &[Field::Sku, Field::GroupBid],
        Theme::BrandFlagshipStore => &[Field::VideoAsset, Field::LogoAsset, Field::LandingType, Field::Asins],
        Theme::ProductDetailPage => &[Field::VideoAsset, Field::LandingType, Field::Asins],
        Theme::ProductCollection => &[Field::LogoAsset, Field::LandingType, Field::Asins],
    }
}

/// フィールドが埋まっているか
fn is_present(activity: &Activity, field: Field) -> bool {
    match (field, &activity.details) {
        (Field::Cpc, _) => activity.cpc.is_some(),
        (Field::Budget, _) => activity.budget.is_some(),
        (Field::Sku, ActivityDetails::Sponsored(sp)) => !sp.sku.is_empty(),
        (Field::GroupBid, ActivityDetails::Sponsored(sp)) => sp.group_bid.is_some(),
        (Field::VideoAsset, ActivityDetails::Brand(b)) => !b.video_asset.is_empty(),
        (Field::LogoAsset, ActivityDetails::Brand(b)) => !b.logo_asset.is_empty(),
        (Field::LandingType, ActivityDetails::Brand(b)) => !b.landing_type.is_empty(),
        (Field::Asins, ActivityDetails::Brand(b)) => !b.asins.is_empty(),
        _ => false,
    }
}

/// ASIN投放の活動名と同名の列があり、値が1つ以上あるか
pub fn has_asin_target_column(grid: &Grid, campaign_name: &str) -> bool {
    grid.column_index_trimmed(campaign_name)
        .map(|col| !grid.column_values(col).is_empty())
        .unwrap_or(false)
}

/// 1件の活動を検証する
pub fn validate_activity(grid: &Grid, activity: &Activity) -> Vec<FieldViolation> {
    let violation = |field: Field, rule: ViolationRule| FieldViolation {
        theme: activity.theme,
        campaign: activity.campaign_name.clone(),
        field,
        rule,
    };

    let mut violations: Vec<FieldViolation> = [Field::Cpc, Field::Budget]
        .iter()
        .chain(required_fields(activity.theme))
        .filter(|&&field| !is_present(activity, field))
        .map(|&field| violation(field, ViolationRule::Required))
        .collect();

    if is_asin_campaign(&activity.campaign_name)
        && !has_asin_target_column(grid, &activity.campaign_name)
    {
        violations.push(violation(Field::AsinTargets, ViolationRule::AsinTargetColumn));
    }

    violations
}

/// 全活動を検証する（入力順に決定的）
pub fn validate(grid: &Grid, activities: &[Activity]) -> Vec<FieldViolation> {
    activities
        .iter()
        .flat_map(|activity| validate_activity(grid, activity))
        .collect()
}
