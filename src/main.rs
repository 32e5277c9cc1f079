use ad_header_common::{convert, inspect, Diagnostic, Severity};
use ad_header_rust::{cli, config, export, reader};
use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message.to_string());
    spinner
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.severity {
            Severity::Warning => println!("  ⚠ {}", diagnostic),
            Severity::Error => eprintln!("  ✖ {}", diagnostic),
        }
    }
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Convert { input, output, sheet } => {
            println!("📊 ad-header - header 生成\n");
            let sheet = sheet.unwrap_or_else(|| config.sheet_name.clone());

            // 1. 読み込み
            println!("[1/3] シート '{}' を読み込み中...", sheet);
            let grid = reader::read_sheet(&input, &sheet)
                .with_context(|| format!("{} を読み込めませんでした", input.display()))?;
            println!("✔ {}行 x {}列\n", grid.row_count(), grid.width());

            // 2. 変換
            println!("[2/3] 変換中...");
            let progress = spinner("主題ブロックを解析中...");
            let result = convert(&grid, &config.options);
            progress.finish_and_clear();

            let conversion = match result {
                Ok(conversion) => conversion,
                Err(failure) => {
                    eprintln!("✖ {}", failure.error);
                    print_diagnostics(&failure.diagnostics);
                    return Err(failure).context("変換を中止しました（ファイルは生成されていません）");
                }
            };
            print_diagnostics(&conversion.diagnostics);
            println!(
                "✔ 品牌广告: {}行, SP-商品推广: {}行\n",
                conversion.brand_rows(),
                conversion.sponsored_rows()
            );

            if conversion.tables.is_empty() {
                println!("⚠ 出力する行がないため、ファイルは生成しません");
                return Ok(());
            }

            // 3. 書き出し
            println!("[3/3] Excelを生成中...");
            let output_dir = output
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| default_output_dir(&input));
            let output_path = export::output_path(&output_dir, &chrono::Local::now());
            export::excel::generate_excel(&conversion.tables, &output_path)
                .with_context(|| format!("{} に書き込めませんでした", output_path.display()))?;
            println!("✔ Excel出力: {}", output_path.display());

            println!("\n✅ 完了");
        }

        Commands::Inspect { input, sheet, json } => {
            let sheet = sheet.unwrap_or_else(|| config.sheet_name.clone());
            let grid = reader::read_sheet(&input, &sheet)
                .with_context(|| format!("{} を読み込めませんでした", input.display()))?;
            let inspection = inspect(&grid, &config.options);

            if json {
                println!("{}", serde_json::to_string_pretty(&inspection)?);
                return Ok(());
            }

            println!("主題ブロック:");
            for region in &inspection.layout.regions {
                println!(
                    "  {}: 主题行 {}, header行 {}, 数据到行 {}",
                    region.theme,
                    region.marker_row + 1,
                    region.header_row + 1,
                    region.end_row + 1
                );
            }

            let settings = &inspection.settings;
            println!("全体設定:");
            println!("  品牌实体编号: {}", settings.entity_id());
            println!("  品牌名称: {}", settings.brand_name());
            println!("  预算类型: {}", settings.budget_type());
            println!("  创意素材标题: {}", settings.creative_title());
            println!("  落地页 URL: {}", settings.landing_url());

            let tokens: Vec<&str> = inspection.categories.iter().map(|c| c.token.as_str()).collect();
            println!("カテゴリ: {:?}", tokens);
            println!("否定ASIN: {:?}", inspection.global_negatives.neg_asin);
            println!("否品牌: {:?}", inspection.global_negatives.neg_brand);

            println!("活動 ({}件):", inspection.activities.len());
            for report in &inspection.activities {
                let category = report
                    .classification
                    .category
                    .as_ref()
                    .map(|c| c.token.as_str())
                    .unwrap_or("-");
                println!(
                    "  [{}] {} (行 {}): 类别={}, 匹配类型={}, ASIN={}",
                    report.activity.theme,
                    report.activity.campaign_name,
                    report.activity.source_row + 1,
                    category,
                    report.classification.match_type,
                    report.classification.is_asin_targeted
                );
            }

            if !inspection.violations.is_empty() {
                println!("必須項目の不足 ({}件):", inspection.violations.len());
                for violation in &inspection.violations {
                    println!("  - [{}] {}", violation.theme, violation);
                }
            }
            print_diagnostics(&inspection.diagnostics);
        }

        Commands::Config { set_sheet, show } => {
            let mut config = config;

            if let Some(sheet) = set_sheet {
                config.set_sheet_name(sheet)?;
                println!("✔ シート名を設定しました");
            }

            if show {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  シート名: {}", config.sheet_name);
                println!(
                    "  出力先: {}",
                    config
                        .output_dir
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "入力ファイルと同じ場所".into())
                );
                println!("  既定CPC: {}", config.options.default_cpc);
                println!("  既定SP予算: {}", config.options.default_sp_budget);
                println!("  既定品牌予算: {}", config.options.default_brand_budget);
                println!("  全体設定の走査行数: {}", config.options.global_scan_rows);
                println!("  SP否品牌: {}", if config.options.sp_negative_brand { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}
