//! キーワードカテゴリの導出
//!
//! シート列名（精准词・广泛词・否 を含む列）からカテゴリトークンを取り出し、
//! 組み込みの別名リストと合わせて順序付きのルール列にする。
//! 活動名との照合はこの順序で最初に一致したものを採る。

use crate::types::{Category, CategoryFamily};
use regex::Regex;
use serde::Serialize;

/// Host 系の別名
pub const HOST_ALIASES: &[&str] = &["suzhu", "宿主", "host"];
/// Case 系の別名
pub const CASE_ALIASES: &[&str] = &["case", "包"];
/// キーワード列を持たない組み込みカテゴリ
pub const OTHER_BUILTINS: &[&str] = &["对手", "tape"];

/// トークンと系統の組
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRule {
    pub token: String,
    pub family: CategoryFamily,
}

/// 順序付きカテゴリルール
#[derive(Debug, Clone, Default, Serialize)]
pub struct Taxonomy {
    rules: Vec<CategoryRule>,
}

/// トークンの系統
pub fn family_of(token: &str) -> CategoryFamily {
    if HOST_ALIASES.contains(&token) {
        CategoryFamily::Host
    } else if CASE_ALIASES.contains(&token) {
        CategoryFamily::Case
    } else {
        CategoryFamily::Other
    }
}

/// キーワード関連の列か
fn is_keyword_column(name: &str) -> bool {
    name.contains("精准词") || name.contains("广泛词") || name.contains('否')
}

/// 1つの列名からトークンを取り出す
fn tokens_from_column(name: &str) -> Vec<String> {
    lazy_static::lazy_static! {
        static ref SUFFIX_RE: Regex = Regex::new(r"^(.*?)(精准词|广泛词|精准|广泛)$").unwrap();
    }

    let lowered = name.to_lowercase();
    let mut tokens = Vec::new();

    if lowered.contains('/') {
        let parts: Vec<&str> = lowered.split('/').collect();
        if let Some(first) = parts.first() {
            tokens.push(first.trim().to_string());
        }
        if let Some(second) = parts.get(1) {
            let second = second.split('-').next().unwrap_or("");
            tokens.push(second.trim().to_string());
        }
    } else if let Some(cap) = SUFFIX_RE.captures(&lowered) {
        tokens.push(cap[1].trim().to_string());
    }

    tokens.retain(|t| !t.is_empty());
    tokens
}

impl Taxonomy {
    /// 列名一覧からカテゴリルールを構築
    ///
    /// 組み込み別名（Host → Case → その他）が先、列名由来のトークンが後。
    pub fn build(column_names: &[String]) -> Self {
        let mut taxonomy = Self::default();

        for token in HOST_ALIASES.iter().chain(CASE_ALIASES).chain(OTHER_BUILTINS) {
            taxonomy.push(token);
        }

        for name in column_names.iter().filter(|n| is_keyword_column(n)) {
            for token in tokens_from_column(name) {
                taxonomy.push(&token);
            }
        }

        tracing::debug!("识别到的关键词类别: {:?}", taxonomy.tokens());
        taxonomy
    }

    fn push(&mut self, token: &str) {
        if token.is_empty() || self.rules.iter().any(|r| r.token == token) {
            return;
        }
        self.rules.push(CategoryRule {
            token: token.to_string(),
            family: family_of(token),
        });
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.token.as_str()).collect()
    }

    /// 小文字化した活動名に最初に含まれるカテゴリ
    pub fn match_name(&self, lowered_name: &str) -> Option<Category> {
        self.rules
            .iter()
            .find(|r| lowered_name.contains(r.token.as_str()))
            .map(|r| Category {
                token: r.token.clone(),
                family: r.family.clone(),
            })
    }
}
