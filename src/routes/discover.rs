//! 发现页路由模块
//!
//! 成员端的可加入小组列表：关键词搜索 + 分类标签，
//! 每个分类的数量由聚合器从集合推导而非写死。

use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Extension, Query};
use axum::response::Html;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::CONFIG;
use crate::domain::{progress_percent, trust_score_class, DiscoverGroup};
use crate::helpers::aggregate::{count_by, count_for, ALL_KEY};
use crate::helpers::cache::{get_cached_fragment, put_cached_fragment};
use crate::helpers::filter::{matches_choice, matches_search};
use crate::helpers::format::format_currency;
use crate::store::DataStore;

/// 默认（全部分类、空搜索）片段的缓存键
pub const CACHE_KEY_DISCOVER_DEFAULT: &str = "member:discover:default";

/// 可加入小组卡片的展示数据
pub struct DiscoverView {
    pub name: String,
    pub description: String,
    pub trust_score: u8,
    pub trust_class: &'static str,
    pub admin_rating: f64,
    pub monthly_display: String,
    pub duration_months: u32,
    pub members: u32,
    pub max_members: u32,
    pub fill_percent: u8,
    pub admin_name: String,
    pub next_start: String,
    pub tags: Vec<String>,
}

/// 分类标签
pub struct CategoryChip {
    pub id: String,
    pub name: String,
    pub count: usize,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "member/discover_results.html")]
pub struct DiscoverResultsTemplate {
    pub chips: Vec<CategoryChip>,
    pub groups: Vec<DiscoverView>,
    pub q: String,
    pub category: String,
}

#[derive(Template)]
#[template(path = "member/discover.html")]
pub struct DiscoverPageTemplate {
    pub chips: Vec<CategoryChip>,
    pub groups: Vec<DiscoverView>,
    pub q: String,
    pub category: String,
}

#[derive(Deserialize)]
pub struct DiscoverQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

impl DiscoverQuery {
    fn q(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("all")
    }

    fn is_default(&self) -> bool {
        self.q().is_empty() && self.category() == "all"
    }
}

fn filter_discover<'a>(groups: &'a [DiscoverGroup], query: &DiscoverQuery) -> Vec<&'a DiscoverGroup> {
    groups
        .iter()
        .filter(|g| {
            matches_search(query.q(), &[&g.name, &g.description])
                && matches_choice(query.category(), &g.category)
        })
        .collect()
}

fn discover_view(group: &DiscoverGroup, currency: &str) -> DiscoverView {
    DiscoverView {
        name: group.name.clone(),
        description: group.description.clone(),
        trust_score: group.trust_score,
        trust_class: trust_score_class(group.trust_score),
        admin_rating: group.admin_rating,
        monthly_display: format_currency(group.monthly_amount, currency),
        duration_months: group.duration_months,
        members: group.members,
        max_members: group.max_members,
        fill_percent: progress_percent(group.members, group.max_members),
        admin_name: group.admin_name.clone(),
        next_start: group.next_start.clone(),
        tags: group.tags.clone(),
    }
}

/// 分类标签条，含 "All Groups" 与各分类的实际数量
fn category_chips(store: &DataStore, selected: &str) -> Vec<CategoryChip> {
    let counts = count_by(store.discover_groups(), |g| g.category.as_str());

    let mut chips = vec![CategoryChip {
        id: ALL_KEY.to_string(),
        name: "All Groups".to_string(),
        count: count_for(&counts, ALL_KEY),
        selected: selected == ALL_KEY,
    }];

    chips.extend(store.categories().iter().map(|c| CategoryChip {
        id: c.id.clone(),
        name: c.name.clone(),
        count: count_for(&counts, &c.id),
        selected: selected == c.id,
    }));

    chips
}

fn build_results(store: &DataStore, query: &DiscoverQuery) -> DiscoverResultsTemplate {
    let currency = &CONFIG.display.currency;
    DiscoverResultsTemplate {
        chips: category_chips(store, query.category()),
        groups: filter_discover(store.discover_groups(), query)
            .iter()
            .map(|g| discover_view(g, currency))
            .collect(),
        q: query.q().to_string(),
        category: query.category().to_string(),
    }
}

/// 渲染默认片段，供缓存预热使用
pub fn render_default_fragment(store: &DataStore) -> Result<String, askama::Error> {
    let query = DiscoverQuery {
        q: None,
        category: None,
    };
    build_results(store, &query).render()
}

/// 发现页完整页面
pub async fn discover_page(
    Extension(store): Extension<Arc<DataStore>>,
    Query(query): Query<DiscoverQuery>,
) -> impl IntoResponse {
    let results = build_results(&store, &query);
    DiscoverPageTemplate {
        chips: results.chips,
        groups: results.groups,
        q: results.q,
        category: results.category,
    }
}

/// 筛选结果片段（htmx 目标）
pub async fn discover_results(
    Extension(store): Extension<Arc<DataStore>>,
    Query(query): Query<DiscoverQuery>,
) -> impl IntoResponse {
    if query.is_default() {
        if let Some(html) = get_cached_fragment(CACHE_KEY_DISCOVER_DEFAULT) {
            return Html(html);
        }
    }

    match build_results(&store, &query).render() {
        Ok(html) => {
            if query.is_default() {
                put_cached_fragment(CACHE_KEY_DISCOVER_DEFAULT, html.clone(), None);
            }
            Html(html)
        }
        Err(e) => {
            tracing::error!("渲染发现页列表失败: {}", e);
            Html(String::new())
        }
    }
}
