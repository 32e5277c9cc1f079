use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdHeaderError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ワークブック読み込みエラー: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("シート '{sheet}' が見つかりません（存在するシート: {available}）")]
    SheetNotFound { sheet: String, available: String },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Conversion(#[from] ad_header_common::ConversionFailure),

    #[error("出力する行がありません（品牌广告・SP-商品推广 ともに空）")]
    NothingToWrite,

    #[error(transparent)]
    Common(#[from] ad_header_common::Error),
}

pub type Result<T> = std::result::Result<T, AdHeaderError>;
