//! 广告模版 → bulk header 変換ツール（CLI側）
//!
//! 変換ロジックは ad_header_common、こちらはファイル入出力と設定を担う

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod reader;
