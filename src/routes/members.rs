//! 成员管理页路由模块
//!
//! 管理端成员列表：按姓名或邮箱搜索 + 分页 + 详情片段。

use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::CONFIG;
use crate::domain::{trust_score_class, Member};
use crate::helpers::cache::{get_cached_fragment, put_cached_fragment};
use crate::helpers::filter::matches_search;
use crate::helpers::format::format_currency;
use crate::helpers::pagination::{PageQuery, Pagination};
use crate::store::DataStore;

/// 默认（空搜索、首页）片段的缓存键
pub const CACHE_KEY_MEMBERS_DEFAULT: &str = "admin:members:default";

/// 成员行的展示数据
pub struct MemberView {
    pub id: String,
    pub initials: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub trust_score: u8,
    pub trust_class: &'static str,
    pub active_groups: u32,
    pub savings_display: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub joined_display: String,
    pub risk_label: &'static str,
    pub risk_class: &'static str,
}

#[derive(Template)]
#[template(path = "admin/members_results.html")]
pub struct MembersResultsTemplate {
    pub members: Vec<MemberView>,
    pub query: String,
    pub pagination: Pagination,
    pub start_item: i64,
    pub end_item: i64,
}

#[derive(Template)]
#[template(path = "admin/members.html")]
pub struct MembersPageTemplate {
    pub members: Vec<MemberView>,
    pub query: String,
    pub pagination: Pagination,
    pub start_item: i64,
    pub end_item: i64,
}

#[derive(Template)]
#[template(path = "admin/member_detail.html")]
pub struct MemberDetailTemplate {
    pub member: MemberView,
}

#[derive(Deserialize)]
pub struct MemberSearchQuery {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

fn member_view(member: &Member, currency: &str) -> MemberView {
    MemberView {
        id: member.id.clone(),
        initials: member.initials(),
        name: member.name.clone(),
        email: member.email.clone(),
        phone: member.phone.clone(),
        trust_score: member.trust_score,
        trust_class: trust_score_class(member.trust_score),
        active_groups: member.active_groups,
        savings_display: format_currency(member.total_savings, currency),
        status_label: member.status.label(),
        status_class: member.status.badge_class(),
        joined_display: member.joined_date.format("%b %-d, %Y").to_string(),
        risk_label: member.risk_level.label(),
        risk_class: member.risk_level.text_class(),
    }
}

fn build_results(store: &DataStore, search: &MemberSearchQuery) -> MembersResultsTemplate {
    let currency = &CONFIG.display.currency;
    let term = search.q.as_deref().unwrap_or("");

    let matched: Vec<&Member> = store
        .members()
        .iter()
        .filter(|m| matches_search(term, &[&m.name, &m.email]))
        .collect();

    let page_query = PageQuery {
        page: search.page,
        per_page: search.per_page,
    };
    let page = page_query.page();
    let per_page = page_query.per_page();
    let offset = page_query.offset();

    let page_members: Vec<MemberView> = matched
        .iter()
        .skip(offset)
        .take(per_page as usize)
        .map(|m| member_view(m, currency))
        .collect();

    let pagination = Pagination::new(page, per_page, matched.len() as i64);
    let (start_item, end_item) = pagination.display_range(page_members.len());

    MembersResultsTemplate {
        members: page_members,
        query: term.to_string(),
        pagination,
        start_item,
        end_item,
    }
}

fn is_default(search: &MemberSearchQuery) -> bool {
    search.q.as_deref().unwrap_or("").is_empty()
        && search.page.unwrap_or(1) == 1
        && search.per_page.is_none()
}

/// 渲染默认片段，供缓存预热使用
pub fn render_default_fragment(store: &DataStore) -> Result<String, askama::Error> {
    let search = MemberSearchQuery {
        q: None,
        page: None,
        per_page: None,
    };
    build_results(store, &search).render()
}

/// 成员管理完整页面
pub async fn members_page(
    Extension(store): Extension<Arc<DataStore>>,
    Query(search): Query<MemberSearchQuery>,
) -> impl IntoResponse {
    let results = build_results(&store, &search);
    MembersPageTemplate {
        members: results.members,
        query: results.query,
        pagination: results.pagination,
        start_item: results.start_item,
        end_item: results.end_item,
    }
}

/// 搜索结果片段（htmx 目标）
pub async fn search(
    Extension(store): Extension<Arc<DataStore>>,
    Query(search): Query<MemberSearchQuery>,
) -> impl IntoResponse {
    if is_default(&search) {
        if let Some(html) = get_cached_fragment(CACHE_KEY_MEMBERS_DEFAULT) {
            return Html(html);
        }
    }

    match build_results(&store, &search).render() {
        Ok(html) => {
            if is_default(&search) {
                put_cached_fragment(CACHE_KEY_MEMBERS_DEFAULT, html.clone(), None);
            }
            Html(html)
        }
        Err(e) => {
            tracing::error!("渲染成员列表失败: {}", e);
            Html(String::new())
        }
    }
}

/// 成员详情片段
pub async fn detail(
    Extension(store): Extension<Arc<DataStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match store.member_by_id(&id) {
        Some(member) => MemberDetailTemplate {
            member: member_view(member, &CONFIG.display.currency),
        }
        .into_response(),
        None => {
            tracing::debug!("成员不存在: id={}", id);
            (StatusCode::NOT_FOUND, "Member not found").into_response()
        }
    }
}
