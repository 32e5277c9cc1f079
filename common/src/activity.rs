//! 主題ブロックから活動を抽出する
//!
//! ブロックのヘッダー行を列名として読み直し、各フィールドを列名の部分一致で解決する。
//! 列の並びが主題ごとに違っても、区別できる部分文字列さえあれば読める。

use crate::diagnostics::{Checked, Diagnostic, DiagnosticKind};
use crate::grid::{dedup_preserving_order, Grid, GridSlice, HeaderIndex};
use crate::options::ConversionOptions;
use crate::region::Region;
use crate::types::{Activity, ActivityDetails, BrandFields, Field, SponsoredFields, ThemeKind};
use std::collections::HashMap;

/// 列名にすべて含まれていればそのフィールドの列とみなす
struct FieldRule {
    field: Field,
    needles: &'static [&'static str],
}

const SPONSORED_RULES: &[FieldRule] = &[
    FieldRule { field: Field::CampaignName, needles: &["广告活动名称"] },
    FieldRule { field: Field::Cpc, needles: &["cpc"] },
    FieldRule { field: Field::Sku, needles: &["sku"] },
    FieldRule { field: Field::Budget, needles: &["预算"] },
    FieldRule { field: Field::GroupBid, needles: &["广告组默认竞价"] },
    FieldRule { field: Field::AdPosition, needles: &["广告位"] },
    FieldRule { field: Field::Percentage, needles: &["百分比"] },
];

const BRAND_RULES: &[FieldRule] = &[
    FieldRule { field: Field::CampaignName, needles: &["广告活动名称"] },
    FieldRule { field: Field::Cpc, needles: &["cpc"] },
    FieldRule { field: Field::Budget, needles: &["预算"] },
    FieldRule { field: Field::VideoAsset, needles: &["视频媒体", "编号"] },
    FieldRule { field: Field::CustomImage, needles: &["自定义图片"] },
    FieldRule { field: Field::LandingType, needles: &["落地页类型"] },
];

/// 品牌系の創意素材 ASIN 列（D/E/F）
pub const BRAND_ASIN_COLUMNS: [usize; 3] = [3, 4, 5];
/// 品牌徽标素材编号 の列名が見つからないときの固定列（J）
pub const LOGO_FALLBACK_COLUMN: usize = 9;
const LOGO_COLUMN_NAME: &str = "品牌徽标素材编号";

/// ブロック内のフィールド→列位置
///
/// 各列は最初に一致したルールのフィールドにだけ割り当て、
/// 同じフィールドに複数列が一致した場合は最初の列を採る。
#[derive(Debug, Clone, Default)]
pub struct FieldColumns {
    columns: HashMap<Field, usize>,
}

impl FieldColumns {
    fn resolve(header: &HeaderIndex, rules: &[FieldRule]) -> Self {
        let mut columns = HashMap::new();
        for (idx, name) in header.lowered().iter().enumerate() {
            let matched = rules
                .iter()
                .find(|rule| rule.needles.iter().all(|n| name.contains(n)));
            if let Some(rule) = matched {
                columns.entry(rule.field).or_insert(idx);
            }
        }
        Self { columns }
    }

    pub fn get(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}

/// 数値セルを読む。空なら None、解釈できなければ None と警告
fn parse_number(text: &str) -> Result<Option<f64>, ()> {
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(()),
    }
}

/// 小数を切り捨てた整数表記（"25.0" → "25"）
pub fn integer_text(text: &str) -> Option<String> {
    let value = text.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(format!("{}", value.trunc() as i64))
}

/// D/E/F列のASINをカンマ分割・重複除去して ", " で結合
pub fn merge_asins<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
    let asins = cells
        .into_iter()
        .flat_map(|cell| cell.split(','))
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(|a| a.to_string());
    dedup_preserving_order(asins).join(", ")
}

struct RowReader<'s, 'g> {
    slice: &'s GridSlice<'g>,
    columns: &'s FieldColumns,
    row: usize,
}

impl<'s, 'g> RowReader<'s, 'g> {
    fn text(&self, field: Field) -> String {
        self.columns
            .get(field)
            .map(|col| self.slice.value(self.row, col).to_string())
            .unwrap_or_default()
    }

    fn number(&self, field: Field, campaign: &str, warnings: &mut Vec<Diagnostic>) -> Option<f64> {
        let text = self.text(field);
        parse_number(&text).unwrap_or_else(|_| {
            warnings.push(
                Diagnostic::warning(
                    DiagnosticKind::MalformedValue,
                    format!("无法解析数值 '{}'，按空值处理", text),
                )
                .with_campaign(campaign)
                .with_field(field),
            );
            None
        })
    }
}

/// ブロックの活動一覧を抽出する
///
/// 活動名が空の行は黙って読み飛ばす。
pub fn extract(grid: &Grid, region: &Region, options: &ConversionOptions) -> Checked<Vec<Activity>> {
    let theme = region.theme;
    let mut warnings = Vec::new();

    if !region.has_data() {
        warnings.push(
            Diagnostic::warning(DiagnosticKind::EmptyRegion, "无活动数据行").with_theme(theme),
        );
        return Checked::new(Vec::new(), warnings);
    }

    let slice = grid.slice(region.header_row, region.data_len());
    let header = slice.header();
    tracing::debug!("活动列名 ({}): {:?}", theme, header.names());

    let rules = match theme.kind() {
        ThemeKind::Sponsored => SPONSORED_RULES,
        ThemeKind::Brand => BRAND_RULES,
    };
    let columns = FieldColumns::resolve(header, rules);

    // 品牌: 予算列がなければ既定値
    let budget_fallback = if theme.is_brand() && columns.get(Field::Budget).is_none() {
        warnings.push(
            Diagnostic::warning(
                DiagnosticKind::DefaultApplied,
                format!("未找到预算列，使用默认预算 {}", options.default_brand_budget),
            )
            .with_theme(theme)
            .with_field(Field::Budget),
        );
        Some(options.default_brand_budget)
    } else {
        None
    };

    let logo_column = if theme.is_brand() {
        header
            .find_containing(LOGO_COLUMN_NAME)
            .or_else(|| (header.len() > LOGO_FALLBACK_COLUMN).then_some(LOGO_FALLBACK_COLUMN))
    } else {
        None
    };

    let mut activities = Vec::new();

    for row in slice.row_indices() {
        let reader = RowReader { slice: &slice, columns: &columns, row };
        let campaign_name = reader.text(Field::CampaignName);
        if campaign_name.is_empty() {
            continue;
        }

        let cpc = reader.number(Field::Cpc, &campaign_name, &mut warnings);
        let budget = reader
            .number(Field::Budget, &campaign_name, &mut warnings)
            .or(budget_fallback);

        let details = match theme.kind() {
            ThemeKind::Sponsored => {
                let percentage_text = reader.text(Field::Percentage);
                let percentage = integer_text(&percentage_text);
                if percentage.is_none() && !percentage_text.is_empty() {
                    warnings.push(
                        Diagnostic::warning(
                            DiagnosticKind::MalformedValue,
                            format!("无法解析百分比 '{}'，按空值处理", percentage_text),
                        )
                        .with_theme(theme)
                        .with_campaign(&campaign_name)
                        .with_field(Field::Percentage),
                    );
                }
                ActivityDetails::Sponsored(SponsoredFields {
                    sku: reader.text(Field::Sku),
                    group_bid: reader.number(Field::GroupBid, &campaign_name, &mut warnings),
                    ad_position: reader.text(Field::AdPosition),
                    percentage,
                })
            }
            ThemeKind::Brand => {
                let logo_asset = match logo_column {
                    Some(col) => slice.value(row, col).to_string(),
                    None => {
                        warnings.push(
                            Diagnostic::warning(
                                DiagnosticKind::UnresolvedColumn,
                                "数据列不足10列，无法读取品牌徽标素材编号",
                            )
                            .with_theme(theme)
                            .with_campaign(&campaign_name)
                            .with_field(Field::LogoAsset),
                        );
                        String::new()
                    }
                };
                ActivityDetails::Brand(BrandFields {
                    asins: merge_asins(BRAND_ASIN_COLUMNS.iter().map(|&c| slice.value(row, c))),
                    video_asset: reader.text(Field::VideoAsset),
                    custom_image: reader.text(Field::CustomImage),
                    logo_asset,
                    landing_type: reader.text(Field::LandingType),
                })
            }
        };

        tracing::debug!("  {} 活动: {}, CPC={:?}, 预算={:?}", theme, campaign_name, cpc, budget);
        activities.push(Activity {
            theme,
            campaign_name,
            cpc,
            budget,
            source_row: row,
            details,
        });
    }

    for warning in &mut warnings {
        warning.theme.get_or_insert(theme);
    }
    Checked::new(activities, warnings)
}
