//! 小组管理页路由模块
//!
//! 管理端小组列表：关键词搜索 + 状态/风险筛选 + 状态计数条。
//! 筛选是纯谓词的合取，计数由聚合器从当前集合重算。

use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Extension, Query};
use axum::response::Html;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::CONFIG;
use crate::domain::{progress_percent, Group};
use crate::helpers::aggregate::{count_by, count_for, ALL_KEY};
use crate::helpers::cache::{get_cached_fragment, put_cached_fragment};
use crate::helpers::filter::{matches_choice, matches_search};
use crate::helpers::format::{format_currency, format_date, format_relative_days};
use crate::store::DataStore;

/// 默认（无筛选）片段的缓存键
pub const CACHE_KEY_GROUPS_DEFAULT: &str = "admin:groups:default";

/// 小组卡片的展示数据，全部字段已格式化
pub struct GroupView {
    pub name: String,
    pub description: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub risk_label: &'static str,
    pub risk_class: &'static str,
    pub member_count: u32,
    pub max_members: u32,
    pub fill_percent: u8,
    pub contribution_display: String,
    pub collection_rate: u8,
    pub fund_display: String,
    pub cycles_completed: u32,
    pub total_cycles: u32,
    pub cycle_percent: u8,
    pub next_payout: String,
    pub created_display: String,
}

/// 状态计数条
pub struct StatusCounts {
    pub all: usize,
    pub active: usize,
    pub forming: usize,
    pub paused: usize,
    pub completed: usize,
}

#[derive(Template)]
#[template(path = "admin/groups_results.html")]
pub struct GroupsResultsTemplate {
    pub groups: Vec<GroupView>,
    pub counts: StatusCounts,
    pub has_filters: bool,
}

#[derive(Template)]
#[template(path = "admin/groups.html")]
pub struct GroupsPageTemplate {
    pub groups: Vec<GroupView>,
    pub counts: StatusCounts,
    pub has_filters: bool,
    pub q: String,
    pub status: String,
    pub risk: String,
}

/// 筛选查询参数，缺省值等价于 "all"
#[derive(Deserialize)]
pub struct GroupFilterQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub risk: Option<String>,
}

impl GroupFilterQuery {
    fn q(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    fn status(&self) -> &str {
        self.status.as_deref().unwrap_or("all")
    }

    fn risk(&self) -> &str {
        self.risk.as_deref().unwrap_or("all")
    }

    fn is_default(&self) -> bool {
        self.q().is_empty() && self.status() == "all" && self.risk() == "all"
    }
}

/// 应用搜索与分类筛选，返回原集合的子集
fn filter_groups<'a>(groups: &'a [Group], query: &GroupFilterQuery) -> Vec<&'a Group> {
    groups
        .iter()
        .filter(|g| {
            matches_search(query.q(), &[&g.name, &g.description])
                && matches_choice(query.status(), g.status.as_str())
                && matches_choice(query.risk(), g.risk_level.as_str())
        })
        .collect()
}

fn status_counts(groups: &[Group]) -> StatusCounts {
    let counts = count_by(groups, |g| g.status.as_str());
    StatusCounts {
        all: count_for(&counts, ALL_KEY),
        active: count_for(&counts, "active"),
        forming: count_for(&counts, "forming"),
        paused: count_for(&counts, "paused"),
        completed: count_for(&counts, "completed"),
    }
}

fn group_view(group: &Group, currency: &str, now: chrono::DateTime<Utc>) -> GroupView {
    let next_payout = match (&group.next_payout_date, &group.next_payout_member) {
        (Some(date), Some(member)) => format!(
            "{} • {} ({})",
            member,
            format_date(*date),
            format_relative_days(*date, now)
        ),
        _ => String::new(),
    };

    GroupView {
        name: group.name.clone(),
        description: group.description.clone(),
        status_label: group.status.label(),
        status_class: group.status.badge_class(),
        risk_label: group.risk_level.label(),
        risk_class: group.risk_level.text_class(),
        member_count: group.member_count,
        max_members: group.max_members,
        fill_percent: progress_percent(group.member_count, group.max_members),
        contribution_display: format_currency(group.contribution_amount, currency),
        collection_rate: group.collection_rate,
        fund_display: format_currency(group.total_fund, currency),
        cycles_completed: group.cycles_completed,
        total_cycles: group.total_cycles,
        cycle_percent: progress_percent(group.cycles_completed, group.total_cycles),
        next_payout,
        created_display: format_date(group.created_date),
    }
}

fn build_results(store: &DataStore, query: &GroupFilterQuery) -> GroupsResultsTemplate {
    let now = Utc::now();
    let currency = &CONFIG.display.currency;
    let filtered = filter_groups(store.groups(), query);

    GroupsResultsTemplate {
        groups: filtered
            .iter()
            .map(|g| group_view(g, currency, now))
            .collect(),
        counts: status_counts(store.groups()),
        has_filters: !query.is_default(),
    }
}

/// 渲染默认片段，供缓存预热使用
pub fn render_default_fragment(store: &DataStore) -> Result<String, askama::Error> {
    let query = GroupFilterQuery {
        q: None,
        status: None,
        risk: None,
    };
    build_results(store, &query).render()
}

/// 小组管理完整页面
pub async fn groups_page(
    Extension(store): Extension<Arc<DataStore>>,
    Query(query): Query<GroupFilterQuery>,
) -> impl IntoResponse {
    let results = build_results(&store, &query);
    GroupsPageTemplate {
        q: query.q().to_string(),
        status: query.status().to_string(),
        risk: query.risk().to_string(),
        groups: results.groups,
        counts: results.counts,
        has_filters: results.has_filters,
    }
}

/// 筛选结果片段（htmx 目标）
pub async fn groups_results(
    Extension(store): Extension<Arc<DataStore>>,
    Query(query): Query<GroupFilterQuery>,
) -> impl IntoResponse {
    // 默认片段走缓存；相对日期展示粒度是"天"，短 TTL 内不会漂移
    if query.is_default() {
        if let Some(html) = get_cached_fragment(CACHE_KEY_GROUPS_DEFAULT) {
            return Html(html);
        }
    }

    match build_results(&store, &query).render() {
        Ok(html) => {
            if query.is_default() {
                put_cached_fragment(CACHE_KEY_GROUPS_DEFAULT, html.clone(), None);
            }
            Html(html)
        }
        Err(e) => {
            tracing::error!("渲染小组列表失败: {}", e);
            Html(String::new())
        }
    }
}
