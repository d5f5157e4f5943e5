//! 分页模块
//!
//! 成员列表等长列表页共用的分页参数处理与页码信息计算。

use serde::{Deserialize, Serialize};

/// 分页查询参数
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// 页码，默认为 1
    pub page: Option<i64>,
    /// 每页数量，默认为 10，范围 1-100
    pub per_page: Option<i64>,
}

impl PageQuery {
    // 非法页码统一按第 1 页处理
    pub fn page(&self) -> i64 {
        self.page.filter(|&p| p > 0).unwrap_or(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> usize {
        ((self.page() - 1) * self.per_page()) as usize
    }
}

/// 分页信息
#[derive(Clone, Debug, Serialize)]
pub struct Pagination {
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            (total as f64 / per_page as f64).ceil() as i64
        };

        Self {
            current_page: page,
            per_page,
            total,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        }
    }

    /// 当前页展示的条目区间（含两端），当前页为空时起点大于终点
    pub fn display_range(&self, current_count: usize) -> (i64, i64) {
        let start = (self.current_page - 1) * self.per_page + 1;
        let end = start - 1 + current_count as i64;
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamping() {
        let query = PageQuery {
            page: None,
            per_page: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 10);
        assert_eq!(query.offset(), 0);

        let query = PageQuery {
            page: Some(-3),
            per_page: Some(500),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 100);
    }

    #[test]
    fn offset_from_page() {
        let query = PageQuery {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn pagination_page_counts() {
        let p = Pagination::new(2, 10, 15);
        assert_eq!(p.total_pages, 2);
        assert!(p.has_prev);
        assert!(!p.has_next);

        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_prev);
        assert!(!p.has_next);
    }

    #[test]
    fn display_range_of_last_partial_page() {
        let p = Pagination::new(2, 10, 15);
        assert_eq!(p.display_range(5), (11, 15));
    }
}
