//! 仪表盘路由模块
//!
//! 管理端与成员端仪表盘，指标全部来自种子数据，仅做格式化。

use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::Extension;
use std::sync::Arc;

use crate::config::CONFIG;
use crate::helpers::format::{format_currency, format_currency_compact};
use crate::store::DataStore;

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub total_members: String,
    pub active_groups: u32,
    pub total_funds_display: String,
    pub monthly_volume_display: String,
    pub pending_approvals: u32,
    pub risk_alerts: u32,
    pub system_health_display: String,
    pub avg_trust_score_display: String,
}

#[derive(Template)]
#[template(path = "member/dashboard.html")]
pub struct MemberDashboardTemplate {
    pub name: String,
    pub total_savings_display: String,
    pub active_groups: u32,
    pub next_payment_display: String,
    pub reliability_score: u8,
    pub completed_cycles: u32,
}

/// 管理端仪表盘
pub async fn admin_dashboard(Extension(store): Extension<Arc<DataStore>>) -> impl IntoResponse {
    let kpis = store.admin_kpis();
    let currency = &CONFIG.display.currency;

    AdminDashboardTemplate {
        total_members: group_count_display(kpis.total_members),
        active_groups: kpis.active_groups,
        total_funds_display: format_currency_compact(kpis.total_funds, currency),
        monthly_volume_display: format_currency_compact(kpis.monthly_volume, currency),
        pending_approvals: kpis.pending_approvals,
        risk_alerts: kpis.risk_alerts,
        system_health_display: format!("{:.1}%", kpis.system_health),
        avg_trust_score_display: format!("{:.1}%", kpis.avg_trust_score),
    }
}

/// 成员仪表盘
pub async fn member_dashboard(Extension(store): Extension<Arc<DataStore>>) -> impl IntoResponse {
    let profile = store.member_profile();
    let currency = &CONFIG.display.currency;

    MemberDashboardTemplate {
        name: profile.name.clone(),
        total_savings_display: format_currency(profile.total_savings, currency),
        active_groups: profile.active_groups,
        next_payment_display: format!(
            "{} due in {} days",
            format_currency(profile.next_payment_amount, currency),
            profile.next_payment_in_days
        ),
        reliability_score: profile.reliability_score,
        completed_cycles: profile.completed_cycles,
    }
}

/// 人数的千位分组展示
fn group_count_display(count: u32) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
