//! 列表筛选模块
//!
//! 各列表页共用的筛选谓词：关键词搜索 + 分类过滤，全部条件取逻辑与。
//! 谓词是纯函数，重复应用同一组条件得到同一结果集。

/// 大小写不敏感的子串搜索
///
/// 空搜索词匹配一切；多个字段中任一命中即算匹配。
pub fn matches_search(term: &str, fields: &[&str]) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// 分类筛选，哨兵值 "all" 匹配任意字段值
pub fn matches_choice(selected: &str, value: &str) -> bool {
    selected == "all" || selected == value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_term_matches_everything() {
        assert!(matches_search("", &["Festival Savings Circle"]));
        assert!(matches_search("", &[]));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        assert!(matches_search("festival", &["Festival Savings Circle"]));
        assert!(matches_search("FUND", &["Emergency Fund Group"]));
        assert!(!matches_search("festival", &["Emergency Fund Group"]));
    }

    #[test]
    fn search_matches_any_field() {
        // 名称不命中但描述命中
        assert!(matches_search(
            "diwali",
            &["Festival Savings Circle", "Save for Diwali celebrations"]
        ));
    }

    #[test]
    fn all_sentinel_matches_any_value() {
        assert!(matches_choice("all", "active"));
        assert!(matches_choice("all", "completed"));
        assert!(matches_choice("active", "active"));
        assert!(!matches_choice("active", "paused"));
    }

    #[test]
    fn filtering_is_subset_and_idempotent() {
        let names = [
            "Festival Savings Circle",
            "Emergency Fund Group",
            "Business Investment Circle",
            "Education Fund",
            "Wedding Savings Group",
        ];
        let once: Vec<&&str> = names
            .iter()
            .filter(|n| matches_search("circle", &[n]))
            .collect();
        let twice: Vec<&&&str> = once
            .iter()
            .filter(|n| matches_search("circle", &[**n]))
            .collect();

        // 结果集是原集合的子集，且重复筛选不改变结果
        assert_eq!(once.len(), 2);
        assert_eq!(twice.len(), once.len());
        assert!(once.iter().all(|n| names.contains(*n)));
    }
}
