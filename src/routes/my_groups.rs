//! 我的小组页路由模块
//!
//! 成员端参与中的小组列表：顶部统计卡 + 每组一张进度卡。
//! 没有筛选条件，整页渲染，不走片段缓存。

use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::Extension;
use std::sync::Arc;

use crate::config::CONFIG;
use crate::domain::{GroupMembership, GroupStatus};
use crate::helpers::aggregate::{count_by, count_for};
use crate::helpers::format::format_currency;
use crate::store::DataStore;

/// 头像条最多显示的成员数，超出部分折叠成 "+N"
const AVATAR_LIMIT: u32 = 6;

/// 参与小组卡片的展示数据
pub struct MyGroupView {
    pub name: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub is_active: bool,
    pub members: u32,
    pub pool_display: String,
    pub position_display: String,
    pub next_payout: String,
    pub completion_rate: u8,
    pub avatar_letters: Vec<String>,
    pub avatar_overflow: u32,
}

#[derive(Template)]
#[template(path = "member/my_groups.html")]
pub struct MyGroupsTemplate {
    pub groups: Vec<MyGroupView>,
    pub total_groups: usize,
    pub active_groups: usize,
    pub completed_groups: usize,
    pub monthly_total_display: String,
}

fn my_group_view(group: &GroupMembership, currency: &str) -> MyGroupView {
    let shown = group.members.min(AVATAR_LIMIT);
    // 占位头像按 A、B、C… 排，与真实成员无关
    let avatar_letters = (0..shown)
        .map(|i| char::from(b'A' + i as u8).to_string())
        .collect();

    MyGroupView {
        name: group.name.clone(),
        status_label: group.status.label(),
        status_class: group.status.badge_class(),
        is_active: group.status == GroupStatus::Active,
        members: group.members,
        pool_display: format_currency(group.total_pool, currency),
        position_display: format!("#{}", group.my_position),
        next_payout: group.next_payout.clone(),
        completion_rate: group.completion_rate,
        avatar_letters,
        avatar_overflow: group.members.saturating_sub(AVATAR_LIMIT),
    }
}

fn build_page(store: &DataStore) -> MyGroupsTemplate {
    let currency = &CONFIG.display.currency;
    let groups = store.my_groups();
    let counts = count_by(groups, |g| g.status.as_str());
    let monthly_total: i64 = groups.iter().map(|g| g.monthly_contribution).sum();

    MyGroupsTemplate {
        groups: groups.iter().map(|g| my_group_view(g, currency)).collect(),
        total_groups: groups.len(),
        active_groups: count_for(&counts, "active"),
        completed_groups: count_for(&counts, "completed"),
        monthly_total_display: format_currency(monthly_total, currency),
    }
}

/// 我的小组完整页面
pub async fn my_groups_page(Extension(store): Extension<Arc<DataStore>>) -> impl IntoResponse {
    build_page(&store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn store() -> DataStore {
        DataStore::seed(Utc::now())
    }

    #[test]
    fn stats_derive_from_membership_statuses() {
        let page = build_page(&store());
        assert_eq!(page.total_groups, 3);
        assert_eq!(page.active_groups, 2);
        assert_eq!(page.completed_groups, 1);
        assert_eq!(page.monthly_total_display, "₹15,000");
    }

    #[test]
    fn view_formats_pool_and_position() {
        let store = store();
        let view = my_group_view(&store.my_groups()[0], "INR");
        assert_eq!(view.pool_display, "₹60,000");
        assert_eq!(view.position_display, "#8");
        assert!(view.is_active);
        assert_eq!(view.next_payout, "₹60,000 in 3 months");
    }

    #[test]
    fn avatar_bar_caps_at_six_with_overflow() {
        let store = store();
        // 12 名成员：显示 A-F，折叠 +6
        let large = my_group_view(&store.my_groups()[0], "INR");
        assert_eq!(large.avatar_letters, ["A", "B", "C", "D", "E", "F"]);
        assert_eq!(large.avatar_overflow, 6);

        // 恰好 6 名以内则全部显示，无折叠（此处 8 人折叠 +2）
        let medium = my_group_view(&store.my_groups()[1], "INR");
        assert_eq!(medium.avatar_letters.len(), 6);
        assert_eq!(medium.avatar_overflow, 2);
    }

    #[test]
    fn completed_group_is_not_payable() {
        let store = store();
        let view = my_group_view(&store.my_groups()[2], "INR");
        assert!(!view.is_active);
        assert_eq!(view.completion_rate, 100);
    }
}
