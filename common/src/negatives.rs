//! 否定キーワードの解決と重複検出
//!
//! (カテゴリ系統, マッチタイプ) ごとに否精准・否词组の2列を選び、
//! シート全体の値を集める。同じキーワードが2列の両方にあれば
//! 入力データの不備として変換全体を中止する。

use crate::error::{DuplicateNegative, NegativeSource};
use crate::grid::Grid;
use crate::types::{CategoryFamily, MatchType};
use std::collections::HashMap;

/// 否定のマッチ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegativeMatch {
    ExactNegative,
    PhraseNegative,
}

impl NegativeMatch {
    pub fn label(&self) -> &'static str {
        match self {
            NegativeMatch::ExactNegative => "否定精准匹配",
            NegativeMatch::PhraseNegative => "否定词组",
        }
    }
}

/// 否定キーワード列の定義
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegativeColumn {
    pub label: &'static str,
    pub name: &'static str,
    pub subtype: NegativeMatch,
}

impl NegativeColumn {
    const fn exact(label: &'static str, name: &'static str) -> Self {
        Self { label, name, subtype: NegativeMatch::ExactNegative }
    }

    const fn phrase(label: &'static str, name: &'static str) -> Self {
        Self { label, name, subtype: NegativeMatch::PhraseNegative }
    }

    pub fn source(&self) -> NegativeSource {
        NegativeSource {
            label: self.label,
            column: self.name,
            subtype: self.subtype.label(),
        }
    }
}

const HOST_EXACT: [NegativeColumn; 2] = [
    NegativeColumn::exact("W", "宿主精准-否精准"),
    NegativeColumn::phrase("X", "宿主精准-否词组"),
];
const HOST_BROAD: [NegativeColumn; 2] = [
    NegativeColumn::exact("AA", "宿主广泛-否精准"),
    NegativeColumn::phrase("AB", "宿主广泛-否词组"),
];
const CASE_EXACT: [NegativeColumn; 2] = [
    NegativeColumn::exact("Y", "case精准-否精准"),
    NegativeColumn::phrase("Z", "case精准-否词组"),
];
const CASE_BROAD: [NegativeColumn; 2] = [
    NegativeColumn::exact("AC", "case广泛-否精准"),
    NegativeColumn::phrase("AD", "case广泛-否词组"),
];

/// (系統, マッチタイプ) に対応する否定列の組
pub fn negative_columns(family: &CategoryFamily, match_type: MatchType) -> Option<&'static [NegativeColumn; 2]> {
    match (family, match_type) {
        (CategoryFamily::Host, MatchType::Exact) => Some(&HOST_EXACT),
        (CategoryFamily::Host, MatchType::Broad) => Some(&HOST_BROAD),
        (CategoryFamily::Case, MatchType::Exact) => Some(&CASE_EXACT),
        (CategoryFamily::Case, MatchType::Broad) => Some(&CASE_BROAD),
        (CategoryFamily::Other, _) => None,
    }
}

/// 否定キーワード → 取得元列 の索引（出現順を保持）
#[derive(Debug, Clone, Default)]
pub struct NegativeKeywordIndex {
    entries: Vec<(String, NegativeMatch, Vec<NegativeColumn>)>,
    positions: HashMap<String, usize>,
}

impl NegativeKeywordIndex {
    fn insert(&mut self, keyword: String, column: NegativeColumn) {
        match self.positions.get(&keyword) {
            Some(&pos) => self.entries[pos].2.push(column),
            None => {
                self.positions.insert(keyword.clone(), self.entries.len());
                self.entries.push((keyword, column.subtype, vec![column]));
            }
        }
    }

    /// 複数列に現れたキーワードのうち最初のもの
    fn first_duplicate(&self) -> Option<&(String, NegativeMatch, Vec<NegativeColumn>)> {
        self.entries.iter().find(|(_, _, sources)| sources.len() > 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 出力順: 否定精准匹配 → 否定词组、それぞれ出現順
    pub fn rows(&self) -> Vec<(&str, NegativeMatch)> {
        [NegativeMatch::ExactNegative, NegativeMatch::PhraseNegative]
            .into_iter()
            .flat_map(|subtype| {
                self.entries
                    .iter()
                    .filter(move |(_, s, _)| *s == subtype)
                    .map(move |(kw, _, _)| (kw.as_str(), subtype))
            })
            .collect()
    }
}

/// 否定キーワードを解決する
///
/// 存在しない列は黙って読み飛ばす。キーワードが2列にまたがれば `DuplicateNegative`。
pub fn resolve(
    grid: &Grid,
    campaign: &str,
    family: Option<&CategoryFamily>,
    match_type: MatchType,
) -> Result<NegativeKeywordIndex, DuplicateNegative> {
    let mut index = NegativeKeywordIndex::default();
    let Some(columns) = family.and_then(|f| negative_columns(f, match_type)) else {
        return Ok(index);
    };

    for column in columns {
        let Some(col) = grid.column_index(column.name) else {
            continue;
        };
        for keyword in grid.column_values(col) {
            index.insert(keyword, *column);
        }
    }

    if let Some((keyword, _, sources)) = index.first_duplicate() {
        return Err(DuplicateNegative {
            campaign: campaign.to_string(),
            match_type,
            keyword: keyword.clone(),
            sources: sources.iter().map(|c| c.source()).collect(),
        });
    }

    tracing::debug!("  否定关键词数量: {} (活动: {})", index.len(), campaign);
    Ok(index)
}
