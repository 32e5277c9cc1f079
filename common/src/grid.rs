//! セルグリッド
//!
//! ワークブック読み込み側が1シートを文字列の2次元配列に変換したもの。
//! 0行目はシート全体の列名行として扱い、列全体の走査は1行目以降を読む。

use std::collections::HashMap;

/// 読み取り専用の矩形グリッド
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Grid {
    /// 行の長さを最大幅に揃えて構築
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows, width }
    }

    /// `&str` の行リストから構築（テスト・組み込み用）
    pub fn from_str_rows(rows: &[&[&str]]) -> Self {
        Self::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 範囲外は空文字
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn row(&self, row: usize) -> &[String] {
        self.rows.get(row).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// シート全体の列名（0行目）
    pub fn column_names(&self) -> &[String] {
        self.row(0)
    }

    /// 列名の完全一致（大文字小文字を区別）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names().iter().position(|c| c == name)
    }

    /// 前後空白を除いた列名で完全一致
    pub fn column_index_trimmed(&self, name: &str) -> Option<usize> {
        self.column_names().iter().position(|c| c.trim() == name)
    }

    /// 列全体の値（1行目以降、trim済み・空除去・出現順で重複除去）
    pub fn column_values(&self, col: usize) -> Vec<String> {
        if col >= self.width {
            return Vec::new();
        }
        dedup_preserving_order(
            self.rows
                .iter()
                .skip(1)
                .map(|r| r[col].trim())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string()),
        )
    }

    /// 指定行をヘッダーとし、続く `row_count` 行をデータ行とする切り出し
    pub fn slice(&self, header_row: usize, row_count: usize) -> GridSlice<'_> {
        let start = (header_row + 1).min(self.rows.len());
        let end = (start + row_count).min(self.rows.len());
        GridSlice {
            grid: self,
            header: HeaderIndex::new(self.row(header_row)),
            start,
            end,
        }
    }
}

/// 出現順を保ったまま重複を除去
pub fn dedup_preserving_order<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// ヘッダー行の列名→位置の索引（ブロックごとに1回だけ構築）
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    names: Vec<String>,
    lowered: Vec<String>,
    exact: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new(names: &[String]) -> Self {
        let names: Vec<String> = names.iter().map(|n| n.trim().to_string()).collect();
        let lowered = names.iter().map(|n| n.to_lowercase()).collect();
        let mut exact = HashMap::new();
        for (idx, name) in names.iter().enumerate() {
            exact.entry(name.clone()).or_insert(idx);
        }
        Self { names, lowered, exact }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// trim済み列名の完全一致
    pub fn position(&self, name: &str) -> Option<usize> {
        self.exact.get(name).copied()
    }

    /// 列名に `needle` を含む最初の列（大文字小文字を区別しない）
    pub fn find_containing(&self, needle: &str) -> Option<usize> {
        let needle = needle.to_lowercase();
        self.lowered.iter().position(|n| n.contains(&needle))
    }

    /// 小文字化済みの列名
    pub fn lowered(&self) -> &[String] {
        &self.lowered
    }
}

/// ヘッダー付きのグリッド切り出し
#[derive(Debug, Clone)]
pub struct GridSlice<'a> {
    grid: &'a Grid,
    header: HeaderIndex,
    start: usize,
    end: usize,
}

impl<'a> GridSlice<'a> {
    pub fn header(&self) -> &HeaderIndex {
        &self.header
    }

    /// データ行の行番号（グリッド上の絶対位置）
    pub fn row_indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// 絶対行番号・列位置で読む（前後空白除去）
    pub fn value(&self, row: usize, col: usize) -> &'a str {
        self.grid.cell(row, col).trim()
    }

    /// 指定列のデータ行の値（trim済み）
    pub fn column(&self, col: usize) -> impl Iterator<Item = &'a str> + '_ {
        self.row_indices().map(move |r| self.value(r, col))
    }
}
