//! 変換オプション
//!
//! 空欄時の既定値など、シートに依存しない設定。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// CPC・広告組竞价が空のときの既定値
    pub default_cpc: f64,
    /// SP 予算の既定値
    pub default_sp_budget: f64,
    /// 品牌予算の既定値
    pub default_brand_budget: f64,
    /// 全体設定を読む最大行数
    pub global_scan_rows: usize,
    /// SP の ASIN 投放にも否品牌の否定商品定向を出す
    pub sp_negative_brand: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            default_cpc: 0.6,
            default_sp_budget: 12.0,
            default_brand_budget: 12.0,
            global_scan_rows: 20,
            sp_negative_brand: false,
        }
    }
}

impl ConversionOptions {
    /// JSON文字列から読み込み（欠けた項目は既定値）
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("default_cpc", self.default_cpc),
            ("default_sp_budget", self.default_sp_budget),
            ("default_brand_budget", self.default_brand_budget),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{} は正の数である必要があります: {}", name, value)));
            }
        }
        Ok(())
    }
}
