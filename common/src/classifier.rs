//! 活動名からの分類（マッチタイプ・ASIN投放・カテゴリ）

use crate::taxonomy::Taxonomy;
use crate::types::{Classification, MatchType};

const EXACT_MARKERS: &[&str] = &["精准", "exact"];
const BROAD_MARKERS: &[&str] = &["广泛", "broad"];
const ASIN_MARKER: &str = "asin";

/// 活動名がASIN投放を示すか（大文字小文字を区別しない）
pub fn is_asin_campaign(campaign_name: &str) -> bool {
    campaign_name.to_lowercase().contains(ASIN_MARKER)
}

/// 活動名を分類する
///
/// マッチタイプは 精准/exact → Exact、广泛/broad → Broad、どちらもなければ Exact。
pub fn classify(campaign_name: &str, taxonomy: &Taxonomy) -> Classification {
    let lowered = campaign_name.to_lowercase();

    let match_type = if EXACT_MARKERS.iter().any(|m| lowered.contains(m)) {
        MatchType::Exact
    } else if BROAD_MARKERS.iter().any(|m| lowered.contains(m)) {
        MatchType::Broad
    } else {
        MatchType::Exact
    };

    Classification {
        match_type,
        is_asin_targeted: lowered.contains(ASIN_MARKER),
        category: taxonomy.match_name(&lowered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryFamily;

    #[test]
    fn test_classify_exact_host() {
        let result = classify("Host_Exact_Campaign", &Taxonomy::build(&[]));
        assert_eq!(result.match_type, MatchType::Exact);
        assert!(!result.is_asin_targeted);
        assert_eq!(result.category.unwrap().family, CategoryFamily::Host);
    }

    #[test]
    fn test_classify_broad_chinese() {
        let result = classify("包-广泛-01", &Taxonomy::build(&[]));
        assert_eq!(result.match_type, MatchType::Broad);
        assert_eq!(result.category.unwrap().token, "包");
    }

    #[test]
    fn test_classify_exact_wins_over_broad() {
        let result = classify("host exact broad", &Taxonomy::build(&[]));
        assert_eq!(result.match_type, MatchType::Exact);
    }

    #[test]
    fn test_classify_defaults_to_exact() {
        let result = classify("Summer Sale", &Taxonomy::build(&[]));
        assert_eq!(result.match_type, MatchType::Exact);
        assert!(result.category.is_none());
    }

    #[test]
    fn test_classify_asin() {
        let result = classify("SP_ASIN_Target_1", &Taxonomy::build(&[]));
        assert!(result.is_asin_targeted);
        assert!(is_asin_campaign("ASIN_Target_1"));
        assert!(!is_asin_campaign("Host_Exact"));
    }
}
