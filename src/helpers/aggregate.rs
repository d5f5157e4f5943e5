//! 列表聚合模块
//!
//! 对集合按某个字段取值统计数量，另以 "all" 键记录总数。
//! 集合在本系统中不可变，因此每次调用都直接重算，无缓存一致性问题。

use std::collections::HashMap;

/// 聚合结果里的总数键
pub const ALL_KEY: &str = "all";

/// 按 key_of 提取的字段值分组计数，并附带 "all" 总数
pub fn count_by<T, F>(items: &[T], key_of: F) -> HashMap<String, usize>
where
    F: Fn(&T) -> &str,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for item in items {
        *counts.entry(key_of(item).to_string()).or_insert(0) += 1;
    }
    counts.insert(ALL_KEY.to_string(), items.len());
    counts
}

/// 读取某个取值的数量，缺失按 0 处理
pub fn count_for(counts: &HashMap<String, usize>, key: &str) -> usize {
    counts.get(key).copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_statuses_with_all_total() {
        let statuses = ["active", "active", "forming", "paused", "completed"];
        let counts = count_by(&statuses, |s| s);

        assert_eq!(count_for(&counts, "active"), 2);
        assert_eq!(count_for(&counts, "forming"), 1);
        assert_eq!(count_for(&counts, "paused"), 1);
        assert_eq!(count_for(&counts, "completed"), 1);
        assert_eq!(count_for(&counts, ALL_KEY), 5);
    }

    #[test]
    fn per_value_counts_sum_to_total() {
        let statuses = ["active", "warning", "active", "warning", "active"];
        let counts = count_by(&statuses, |s| s);

        let sum: usize = counts
            .iter()
            .filter(|(k, _)| k.as_str() != ALL_KEY)
            .map(|(_, v)| v)
            .sum();
        assert_eq!(sum, statuses.len());
        assert_eq!(count_for(&counts, ALL_KEY), statuses.len());
    }

    #[test]
    fn empty_collection_yields_zero_total() {
        let empty: [&str; 0] = [];
        let counts = count_by(&empty, |s| s);
        assert_eq!(count_for(&counts, ALL_KEY), 0);
        assert_eq!(count_for(&counts, "active"), 0);
    }

    #[test]
    fn missing_value_counts_as_zero() {
        let statuses = ["active"];
        let counts = count_by(&statuses, |s| s);
        assert_eq!(count_for(&counts, "paused"), 0);
    }
}
