use crate::error::{AdHeaderError, Result};
use ad_header_common::ConversionOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SHEET: &str = "广告模版";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 読み込むシート名
    pub sheet_name: String,
    /// 出力先ディレクトリ（未設定なら入力ファイルと同じ場所）
    pub output_dir: Option<PathBuf>,
    pub options: ConversionOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET.into(),
            output_dir: None,
            options: ConversionOptions::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.options.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AdHeaderError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ad-header").join("config.json"))
    }

    pub fn set_sheet_name(&mut self, sheet: String) -> Result<()> {
        if sheet.trim().is_empty() {
            return Err(AdHeaderError::Config("シート名が空です".into()));
        }
        self.sheet_name = sheet;
        self.save()
    }
}
