//! 支付页路由模块
//!
//! 成员端支付页：待缴列表、逾期计数、支付方式及手续费、
//! 历史记录，以及快捷支付的汇总片段。全部为展示数据。

use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Extension, Query};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::CONFIG;
use crate::domain::{DueStatus, PaymentDue, PaymentMethod, PaymentRecord};
use crate::helpers::format::{format_currency, format_date, format_relative_days};
use crate::store::DataStore;

/// 待缴款行
pub struct DueView {
    pub group_name: String,
    pub amount_display: String,
    pub due_display: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

/// 支付方式行
pub struct MethodView {
    pub id: String,
    pub kind_label: &'static str,
    pub name: String,
    pub identifier: String,
    pub is_default: bool,
    pub is_verified: bool,
    pub fee_text: String,
}

/// 历史记录行
pub struct HistoryView {
    pub group_name: String,
    pub amount_display: String,
    pub date_display: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub method: String,
    pub transaction_id: String,
}

#[derive(Template)]
#[template(path = "member/payments.html")]
pub struct PaymentsPageTemplate {
    pub dues: Vec<DueView>,
    pub overdue_count: usize,
    pub total_due_display: String,
    pub methods: Vec<MethodView>,
    pub history: Vec<HistoryView>,
}

/// 快捷支付汇总片段
#[derive(Template)]
#[template(path = "member/quickpay.html")]
pub struct QuickPayTemplate {
    pub dues: Vec<DueView>,
    pub method_name: String,
    pub total_due_display: String,
    pub fee_display: String,
    pub grand_total_display: String,
}

/// 管理端支付页，原型中只有一张占位卡
#[derive(Template)]
#[template(path = "admin/payments.html")]
pub struct AdminPaymentsTemplate;

#[derive(Deserialize)]
pub struct QuickPayQuery {
    /// 选中的支付方式，缺省用默认方式
    pub method: Option<String>,
}

fn due_view(due: &PaymentDue, currency: &str, now: DateTime<Utc>) -> DueView {
    DueView {
        group_name: due.group_name.clone(),
        amount_display: format_currency(due.amount, currency),
        due_display: format_relative_days(due.due_date, now),
        status_label: due.status.label(),
        status_class: due.status.badge_class(),
    }
}

fn method_view(method: &PaymentMethod, currency: &str) -> MethodView {
    let fee_text = if method.fee_fixed == 0 && method.fee_percent == 0.0 {
        "No fees".to_string()
    } else {
        format!(
            "{} + {}%",
            format_currency(method.fee_fixed, currency),
            method.fee_percent
        )
    };

    MethodView {
        id: method.id.clone(),
        kind_label: method.kind.label(),
        name: method.name.clone(),
        identifier: method.identifier.clone(),
        is_default: method.is_default,
        is_verified: method.is_verified,
        fee_text,
    }
}

fn history_view(record: &PaymentRecord, currency: &str) -> HistoryView {
    HistoryView {
        group_name: record.group_name.clone(),
        amount_display: format_currency(record.amount, currency),
        date_display: format_date(record.date),
        status_label: record.status.label(),
        status_class: record.status.badge_class(),
        method: record.method.clone(),
        transaction_id: record.transaction_id.clone(),
    }
}

fn total_due(dues: &[PaymentDue]) -> i64 {
    dues.iter().map(|d| d.amount).sum()
}

fn overdue_count(dues: &[PaymentDue]) -> usize {
    dues.iter().filter(|d| d.status == DueStatus::Overdue).count()
}

/// 支付完整页面
pub async fn payments_page(Extension(store): Extension<Arc<DataStore>>) -> impl IntoResponse {
    let now = Utc::now();
    let currency = &CONFIG.display.currency;
    let dues = store.payments_due();

    PaymentsPageTemplate {
        dues: dues.iter().map(|d| due_view(d, currency, now)).collect(),
        overdue_count: overdue_count(dues),
        total_due_display: format_currency(total_due(dues), currency),
        methods: store
            .payment_methods()
            .iter()
            .map(|m| method_view(m, currency))
            .collect(),
        history: store
            .payment_history()
            .iter()
            .map(|r| history_view(r, currency))
            .collect(),
    }
}

/// 管理端支付页
pub async fn admin_payments_page() -> impl IntoResponse {
    AdminPaymentsTemplate
}

/// 快捷支付汇总片段（htmx 目标）
///
/// 按选中的支付方式计算手续费后的合计；未知方式退回默认方式。
pub async fn quickpay(
    Extension(store): Extension<Arc<DataStore>>,
    Query(query): Query<QuickPayQuery>,
) -> impl IntoResponse {
    let now = Utc::now();
    let currency = &CONFIG.display.currency;
    let dues = store.payments_due();
    let total = total_due(dues);

    let method = query
        .method
        .as_deref()
        .and_then(|id| store.payment_method_by_id(id))
        .or_else(|| store.payment_methods().iter().find(|m| m.is_default));

    let (method_name, fee) = match method {
        Some(m) => (m.name.clone(), m.fee_for(total)),
        None => (String::new(), 0),
    };

    QuickPayTemplate {
        dues: dues.iter().map(|d| due_view(d, currency, now)).collect(),
        method_name,
        total_due_display: format_currency(total, currency),
        fee_display: format_currency(fee, currency),
        grand_total_display: format_currency(total + fee, currency),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DataStore;

    fn store() -> DataStore {
        DataStore::seed(Utc::now())
    }

    #[test]
    fn totals_and_overdue_count() {
        let store = store();
        let dues = store.payments_due();
        assert_eq!(total_due(dues), 2_250);
        assert_eq!(overdue_count(dues), 1);
    }

    #[test]
    fn due_view_relative_days() {
        let store = store();
        let now = Utc::now();
        let views: Vec<DueView> = store
            .payments_due()
            .iter()
            .map(|d| due_view(d, "INR", now))
            .collect();

        assert_eq!(views[0].due_display, "2 days");
        assert_eq!(views[1].due_display, "7 days");
        // 历史行为：逾期一天也是复数
        assert_eq!(views[2].due_display, "1 days overdue");
    }

    #[test]
    fn method_fee_text() {
        let store = store();
        let views: Vec<MethodView> = store
            .payment_methods()
            .iter()
            .map(|m| method_view(m, "INR"))
            .collect();

        assert_eq!(views[0].fee_text, "No fees");
        assert_eq!(views[1].fee_text, "₹2 + 0.5%");
        assert_eq!(views[2].fee_text, "₹1 + 0.2%");
    }

    #[test]
    fn bank_method_fee_on_total() {
        let store = store();
        let bank = store.payment_method_by_id("2").unwrap();
        // 0.5% of 2250 = 11.25 -> 12, 加固定 2
        assert_eq!(bank.fee_for(total_due(store.payments_due())), 14);
    }
}
