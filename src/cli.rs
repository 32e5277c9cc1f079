use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ad-header")]
#[command(about = "广告模版から bulk header（品牌广告 / SP-商品推广）を生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 广告模版を header ファイルに変換
    Convert {
        /// 入力ワークブック (.xlsx/.xls/.ods)
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: 設定の出力先、なければ入力と同じ場所）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 読み込むシート名（デフォルト: 設定値）
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// 検出した主題ブロック・全体設定・活動を表示（行は生成しない）
    Inspect {
        /// 入力ワークブック
        #[arg(required = true)]
        input: PathBuf,

        /// 読み込むシート名
        #[arg(short, long)]
        sheet: Option<String>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 既定のシート名を設定
        #[arg(long)]
        set_sheet: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
