//! 変換パイプライン
//!
//! ブロック検出 → 全体設定 → 厳格チェック → カテゴリ導出 → 活動抽出
//! → 必須項目検証 → キーワード・否定解決 → 行生成 の順に1回だけ走る。
//! 致命的エラーは行を1行も返さずに中止し、それまでの診断をすべて添える。

use crate::activity;
use crate::classifier::classify;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::emitter::{ResolvedActivity, RowEmitter};
use crate::error::{ConversionError, ConversionFailure, FieldViolation};
use crate::grid::Grid;
use crate::keywords::{self, GlobalNegativeLists};
use crate::negatives::{self, NegativeKeywordIndex};
use crate::options::ConversionOptions;
use crate::region::{self, SheetLayout};
use crate::schema::HeaderTables;
use crate::settings;
use crate::taxonomy::{CategoryRule, Taxonomy};
use crate::types::{Activity, Classification, Field, GlobalSettings};
use serde::Serialize;

/// 成功した変換
#[derive(Debug, Clone)]
pub struct Conversion {
    pub tables: HeaderTables,
    /// 警告のみ
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    pub fn brand_rows(&self) -> usize {
        self.tables.brand.len()
    }

    pub fn sponsored_rows(&self) -> usize {
        self.tables.sponsored.len()
    }
}

/// 変換前の共通段階の結果
struct Prepared {
    layout: SheetLayout,
    settings: GlobalSettings,
    taxonomy: Taxonomy,
    global_negatives: GlobalNegativeLists,
    activities: Vec<Activity>,
}

fn abort(error: ConversionError, mut diagnostics: Vec<Diagnostic>, diagnostic: Diagnostic) -> ConversionFailure {
    tracing::error!("{}", diagnostic);
    diagnostics.push(diagnostic);
    ConversionFailure { error, diagnostics }
}

fn violation_diagnostic(violation: &FieldViolation) -> Diagnostic {
    Diagnostic::error(DiagnosticKind::FieldValidation, violation.to_string())
        .with_theme(violation.theme)
        .with_campaign(&violation.campaign)
        .with_field(violation.field)
}

/// 検証前までの段階（検出・設定・厳格チェック・抽出）
///
/// `strict` が偽なら厳格チェックの失敗を警告として記録し続行する。
fn prepare(
    grid: &Grid,
    options: &ConversionOptions,
    diagnostics: &mut Vec<Diagnostic>,
    strict: bool,
) -> Result<Prepared, ConversionError> {
    let layout = region::locate_all(grid).drain_into(diagnostics);
    if layout.is_empty() {
        return Err(ConversionError::StructuralNotFound);
    }

    let boundary = layout.settings_boundary().unwrap_or(grid.row_count());
    let settings = settings::extract(grid, boundary, options.global_scan_rows);
    tracing::debug!("全局设置: {:?}", settings);

    match settings::check_strict_themes(grid, &layout, &settings) {
        Ok(checked) => checked.drain_into(diagnostics),
        Err(error) if strict => return Err(error),
        Err(error) => diagnostics.push(Diagnostic::warning(
            DiagnosticKind::GlobalPreconditionViolation,
            error.to_string(),
        )),
    }

    let taxonomy = Taxonomy::build(grid.column_names());
    let global_negatives = GlobalNegativeLists::scan(grid).drain_into(diagnostics);

    let mut activities = Vec::new();
    for region in &layout.regions {
        activities.extend(activity::extract(grid, region, options).drain_into(diagnostics));
    }
    tracing::debug!("提取到活动数量: {}", activities.len());

    Ok(Prepared {
        layout,
        settings,
        taxonomy,
        global_negatives,
        activities,
    })
}

/// 活動1件のキーワード・否定・ASIN対象を解決する
fn resolve_activity(
    grid: &Grid,
    activity: &Activity,
    taxonomy: &Taxonomy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ResolvedActivity, ConversionError> {
    let classification = classify(&activity.campaign_name, taxonomy);
    let family = classification.category.as_ref().map(|c| &c.family);
    tracing::debug!(
        "活动 {}: 类别={:?}, 匹配类型={}, ASIN={}",
        activity.campaign_name,
        classification.category,
        classification.match_type,
        classification.is_asin_targeted
    );

    if classification.is_asin_targeted {
        return Ok(ResolvedActivity {
            asin_targets: keywords::asin_targets(grid, &activity.campaign_name),
            classification,
            keywords: Vec::new(),
            negatives: NegativeKeywordIndex::default(),
        });
    }

    let resolved = keywords::resolve(grid, family, classification.match_type, activity.theme.kind());
    for warning in resolved.warnings {
        diagnostics.push(
            warning
                .with_theme(activity.theme)
                .with_campaign(&activity.campaign_name),
        );
    }

    let negatives = negatives::resolve(grid, &activity.campaign_name, family, classification.match_type)
        .map_err(ConversionError::DuplicateNegativeKeyword)?;

    Ok(ResolvedActivity {
        classification,
        keywords: resolved.value.keywords,
        negatives,
        asin_targets: Vec::new(),
    })
}

/// シートを2つの出力テーブルに変換する
///
/// 成功時は警告のみ、失敗時は中止理由とそれまでの全診断を返す。
/// 失敗時に部分的な出力は返さない。
pub fn convert(grid: &Grid, options: &ConversionOptions) -> Result<Conversion, ConversionFailure> {
    let mut diagnostics = Vec::new();

    let prepared = match prepare(grid, options, &mut diagnostics, true) {
        Ok(prepared) => prepared,
        Err(error) => {
            let diagnostic = match &error {
                ConversionError::StructuralNotFound => {
                    Diagnostic::error(DiagnosticKind::StructuralNotFound, error.to_string())
                }
                ConversionError::GlobalPrecondition { theme, missing } => {
                    let mut d = Diagnostic::error(DiagnosticKind::GlobalPreconditionViolation, error.to_string())
                        .with_theme(*theme);
                    if let [field] = missing.as_slice() {
                        d = d.with_field(*field);
                    }
                    d
                }
                _ => Diagnostic::error(DiagnosticKind::FieldValidation, error.to_string()),
            };
            return Err(abort(error, diagnostics, diagnostic));
        }
    };

    let violations = crate::validator::validate(grid, &prepared.activities);
    if !violations.is_empty() {
        let count = violations.len();
        diagnostics.extend(violations.iter().map(violation_diagnostic));
        let error = ConversionError::FieldValidation(violations);
        let summary = Diagnostic::error(DiagnosticKind::FieldValidation, format!("共 {} 项，请补全后重新上传", count));
        return Err(abort(error, diagnostics, summary));
    }

    // 重複否定の検査を全活動ぶん終えてから行を作る
    let mut resolved = Vec::with_capacity(prepared.activities.len());
    for activity in &prepared.activities {
        match resolve_activity(grid, activity, &prepared.taxonomy, &mut diagnostics) {
            Ok(r) => resolved.push(r),
            Err(error) => {
                let diagnostic = Diagnostic::error(DiagnosticKind::DuplicateNegativeKeyword, error.to_string())
                    .with_theme(activity.theme)
                    .with_campaign(&activity.campaign_name)
                    .with_field(Field::NegativeKeywords);
                return Err(abort(error, diagnostics, diagnostic));
            }
        }
    }

    let emitter = RowEmitter::new(&prepared.settings, &prepared.global_negatives, options);
    let mut tables = HeaderTables::default();
    for (activity, resolved) in prepared.activities.iter().zip(&resolved) {
        tables.push(activity.theme.kind(), emitter.emit(activity, resolved));
    }

    for warning in &diagnostics {
        tracing::warn!("{}", warning);
    }
    tracing::info!(
        "生成完成: 品牌广告 {} 行, SP-商品推广 {} 行",
        tables.brand.len(),
        tables.sponsored.len()
    );

    Ok(Conversion { tables, diagnostics })
}

/// 活動と分類結果
#[derive(Debug, Clone, Serialize)]
pub struct ActivityReport {
    pub activity: Activity,
    pub classification: Classification,
}

/// 行を生成せずにシートの読み取り結果をまとめたもの
#[derive(Debug, Clone, Default, Serialize)]
pub struct Inspection {
    pub layout: SheetLayout,
    pub settings: GlobalSettings,
    pub categories: Vec<CategoryRule>,
    pub global_negatives: GlobalNegativeLists,
    pub activities: Vec<ActivityReport>,
    pub violations: Vec<FieldViolation>,
    pub diagnostics: Vec<Diagnostic>,
}

/// シートを読み取り結果だけ返す（中止しない）
pub fn inspect(grid: &Grid, options: &ConversionOptions) -> Inspection {
    let mut diagnostics = Vec::new();
    let prepared = match prepare(grid, options, &mut diagnostics, false) {
        Ok(prepared) => prepared,
        Err(error) => {
            diagnostics.push(Diagnostic::error(DiagnosticKind::StructuralNotFound, error.to_string()));
            return Inspection {
                diagnostics,
                ..Default::default()
            };
        }
    };

    let violations = crate::validator::validate(grid, &prepared.activities);
    let activities = prepared
        .activities
        .into_iter()
        .map(|activity| ActivityReport {
            classification: classify(&activity.campaign_name, &prepared.taxonomy),
            activity,
        })
        .collect();

    Inspection {
        layout: prepared.layout,
        settings: prepared.settings,
        categories: prepared.taxonomy.rules().to_vec(),
        global_negatives: prepared.global_negatives,
        activities,
        violations,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::schema::EntityLevel;

    fn sponsored_sheet(extra_header: &[&str], extra_rows: &[&[&str]]) -> Grid {
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut header: Vec<String> = vec!["".into(); 12];
        header[11] = "suzhu/宿主/host-精准词".into();
        header.extend(extra_header.iter().map(|s| s.to_string()));
        rows.push(header);
        rows.push(vec!["SP-商品推广".into()]);
        rows.push(
            ["", "广告活动名称", "CPC", "预算", "SKU", "广告组默认竞价"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        rows.push(
            ["", "Host_Exact", "0.5", "10", "SKU1", "0.4", "", "", "", "", "", "phone case"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        for extra in extra_rows {
            rows.push(extra.iter().map(|s| s.to_string()).collect());
        }
        Grid::from_rows(rows)
    }

    #[test]
    fn test_convert_structural_not_found() {
        let grid = Grid::from_str_rows(&[&["a"], &["nothing here"]]);
        let failure = convert(&grid, &ConversionOptions::default()).unwrap_err();
        assert_eq!(failure.error, ConversionError::StructuralNotFound);
        assert!(failure.diagnostics.iter().any(|d| d.kind == DiagnosticKind::StructuralNotFound));
    }

    #[test]
    fn test_convert_sponsored_only() {
        let grid = sponsored_sheet(&[], &[]);
        let conversion = convert(&grid, &ConversionOptions::default()).unwrap();
        assert!(conversion.tables.brand.is_empty());
        let entities: Vec<EntityLevel> = conversion.tables.sponsored.iter().map(|r| r.entity).collect();
        assert_eq!(
            entities,
            vec![EntityLevel::Campaign, EntityLevel::AdGroup, EntityLevel::ProductAd, EntityLevel::Keyword]
        );
        // 他の3主題は見つからない
        let missing = conversion
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::RegionMissing)
            .count();
        assert_eq!(missing, 3);
        assert!(conversion.diagnostics.iter().all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn test_convert_duplicate_negative_aborts() {
        let mut grid_rows: Vec<Vec<String>> = Vec::new();
        let header: Vec<&str> = vec!["", "", "", "", "", "", "", "", "", "", "", "suzhu/宿主/host-精准词", "宿主精准-否精准", "宿主精准-否词组"];
        grid_rows.push(header.iter().map(|s| s.to_string()).collect());
        grid_rows.push(vec!["SP-商品推广".into()]);
        grid_rows.push(
            ["", "广告活动名称", "CPC", "预算", "SKU", "广告组默认竞价"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let mut row: Vec<String> = ["", "Host_Exact", "0.5", "10", "SKU1", "0.4"].iter().map(|s| s.to_string()).collect();
        row.resize(12, String::new());
        row.extend(["kw".to_string(), "鞋子".to_string(), "鞋子".to_string()]);
        grid_rows.push(row);
        let grid = Grid::from_rows(grid_rows);

        let failure = convert(&grid, &ConversionOptions::default()).unwrap_err();
        match &failure.error {
            ConversionError::DuplicateNegativeKeyword(dup) => assert_eq!(dup.keyword, "鞋子"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(failure.diagnostics.iter().any(|d| d.is_error()));
    }

    /// 必須項目違反はすべて診断に載る
    #[test]
    fn test_convert_validation_collects_all() {
        let grid = sponsored_sheet(
            &[],
            &[&["", "Second", "", "10", "", "0.4"]],
        );
        let failure = convert(&grid, &ConversionOptions::default()).unwrap_err();
        let ConversionError::FieldValidation(violations) = &failure.error else {
            panic!("expected field validation");
        };
        let fields: Vec<Field> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec![Field::Cpc, Field::Sku]);
        let errors = failure
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::FieldValidation)
            .count();
        assert_eq!(errors, 3);
    }

    #[test]
    fn test_inspect_reports_without_aborting() {
        let grid = sponsored_sheet(&[], &[&["", "Second", "", "10", "", "0.4"]]);
        let inspection = inspect(&grid, &ConversionOptions::default());
        assert_eq!(inspection.layout.regions.len(), 1);
        assert_eq!(inspection.activities.len(), 2);
        assert_eq!(inspection.violations.len(), 2);
        assert!(inspection.categories.iter().any(|c| c.token == "host"));
    }

    #[test]
    fn test_inspect_empty_sheet() {
        let grid = Grid::from_str_rows(&[&["a"]]);
        let inspection = inspect(&grid, &ConversionOptions::default());
        assert!(inspection.activities.is_empty());
        assert!(inspection.diagnostics.iter().any(|d| d.is_error()));
    }
}
