//! 领域数据类型模块
//!
//! 定义平台演示所用的全部实体类型。注意：状态和风险等级只是
//! 展示用的标签，不携带任何状态机语义，也不会发生转移。

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// 小组状态标签
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    Active,
    Paused,
    Completed,
    Forming,
}

impl GroupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupStatus::Active => "active",
            GroupStatus::Paused => "paused",
            GroupStatus::Completed => "completed",
            GroupStatus::Forming => "forming",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupStatus::Active => "Active",
            GroupStatus::Paused => "Paused",
            GroupStatus::Completed => "Completed",
            GroupStatus::Forming => "Forming",
        }
    }

    /// 状态徽章的样式类名
    pub fn badge_class(&self) -> &'static str {
        match self {
            GroupStatus::Active => "badge badge-green",
            GroupStatus::Paused => "badge badge-yellow",
            GroupStatus::Completed => "badge badge-blue",
            GroupStatus::Forming => "badge badge-purple",
        }
    }
}

/// 风险等级标签
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "text-green",
            RiskLevel::Medium => "text-yellow",
            RiskLevel::High => "text-red",
        }
    }
}

/// ROSCA 小组
///
/// 金额一律以整数卢比存储，展示时零小数位。
/// member_count <= max_members 由种子数据保证，不在类型层强制。
#[derive(Clone, Debug, Serialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: GroupStatus,
    pub member_count: u32,
    pub max_members: u32,
    pub contribution_amount: i64,
    pub collection_rate: u8,
    pub next_payout_date: Option<DateTime<Utc>>,
    pub next_payout_member: Option<String>,
    pub risk_level: RiskLevel,
    pub total_fund: i64,
    pub cycles_completed: u32,
    pub total_cycles: u32,
    pub created_date: DateTime<Utc>,
}

/// 当前成员参与中的小组
///
/// 与管理端的 Group 不同：这里是"我的视角"，带轮转位置和
/// 完成进度，payout 是一段现成的展示文案。
#[derive(Clone, Debug, Serialize)]
pub struct GroupMembership {
    pub id: String,
    pub name: String,
    pub members: u32,
    pub total_pool: i64,
    pub monthly_contribution: i64,
    pub next_payout: String,
    pub status: GroupStatus,
    pub my_position: u32,
    pub completion_rate: u8,
}

/// 成员状态标签
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Warning,
    Suspended,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Warning => "warning",
            MemberStatus::Suspended => "suspended",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::Warning => "Warning",
            MemberStatus::Suspended => "Suspended",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            MemberStatus::Active => "badge badge-green",
            MemberStatus::Warning => "badge badge-yellow",
            MemberStatus::Suspended => "badge badge-red",
        }
    }
}

/// 平台成员
#[derive(Clone, Debug, Serialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub trust_score: u8,
    pub active_groups: u32,
    pub total_savings: i64,
    pub joined_date: NaiveDate,
    pub status: MemberStatus,
    pub risk_level: RiskLevel,
}

impl Member {
    /// 头像徽章用的姓名首字母，如 "Priya Sharma" -> "PS"
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// 信任分档位，仅用于选择展示颜色
pub fn trust_score_class(score: u8) -> &'static str {
    if score >= 95 {
        "text-green"
    } else if score >= 90 {
        "text-gold"
    } else if score >= 85 {
        "text-yellow"
    } else {
        "text-red"
    }
}

/// 发现页展示的可加入小组
#[derive(Clone, Debug, Serialize)]
pub struct DiscoverGroup {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub members: u32,
    pub max_members: u32,
    pub monthly_amount: i64,
    pub duration_months: u32,
    pub trust_score: u8,
    pub admin_name: String,
    pub admin_rating: f64,
    pub next_start: String,
    pub tags: Vec<String>,
}

/// 发现页的分类条目，数量由聚合器从集合推导
#[derive(Clone, Debug, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// 待缴款状态
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DueStatus {
    Due,
    Overdue,
}

impl DueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Due => "Due",
            DueStatus::Overdue => "Overdue",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            DueStatus::Due => "badge badge-blue",
            DueStatus::Overdue => "badge badge-red",
        }
    }
}

/// 待缴款项
#[derive(Clone, Debug, Serialize)]
pub struct PaymentDue {
    pub id: String,
    pub group_name: String,
    pub amount: i64,
    pub due_date: DateTime<Utc>,
    pub status: DueStatus,
}

/// 支付方式类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodKind {
    Upi,
    Bank,
    Wallet,
    Card,
}

impl PaymentMethodKind {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethodKind::Upi => "UPI",
            PaymentMethodKind::Bank => "Bank Transfer",
            PaymentMethodKind::Wallet => "Wallet",
            PaymentMethodKind::Card => "Card",
        }
    }
}

/// 支付方式
///
/// 手续费模型：固定费用 + 金额百分比，展示用，不做真实扣费。
#[derive(Clone, Debug, Serialize)]
pub struct PaymentMethod {
    pub id: String,
    pub kind: PaymentMethodKind,
    pub name: String,
    pub identifier: String,
    pub is_default: bool,
    pub is_verified: bool,
    pub fee_fixed: i64,
    pub fee_percent: f64,
}

impl PaymentMethod {
    /// 按金额计算手续费，向上取整到整数卢比
    pub fn fee_for(&self, amount: i64) -> i64 {
        let percent_part = (amount as f64 * self.fee_percent / 100.0).ceil() as i64;
        self.fee_fixed + percent_part
    }
}

/// 历史支付状态
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
    Completed,
    Pending,
    Failed,
}

impl PaymentOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentOutcome::Completed => "Completed",
            PaymentOutcome::Pending => "Pending",
            PaymentOutcome::Failed => "Failed",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            PaymentOutcome::Completed => "badge badge-green",
            PaymentOutcome::Pending => "badge badge-yellow",
            PaymentOutcome::Failed => "badge badge-red",
        }
    }
}

/// 历史支付记录
#[derive(Clone, Debug, Serialize)]
pub struct PaymentRecord {
    pub id: String,
    pub group_name: String,
    pub amount: i64,
    pub date: DateTime<Utc>,
    pub status: PaymentOutcome,
    pub method: String,
    pub transaction_id: String,
}

/// 管理端仪表盘的关键指标，全部为静态展示值
#[derive(Clone, Debug, Serialize)]
pub struct AdminKpis {
    pub total_members: u32,
    pub active_groups: u32,
    pub total_funds: i64,
    pub monthly_volume: i64,
    pub pending_approvals: u32,
    pub risk_alerts: u32,
    pub system_health: f64,
    pub avg_trust_score: f64,
}

/// 成员仪表盘数据
#[derive(Clone, Debug, Serialize)]
pub struct MemberProfile {
    pub name: String,
    pub total_savings: i64,
    pub active_groups: u32,
    pub next_payment_amount: i64,
    pub next_payment_in_days: i64,
    pub reliability_score: u8,
    pub completed_cycles: u32,
}

/// 百分比进度，分母为零或缺失时按 0 处理，结果压到 0..=100
pub fn progress_percent(part: u32, whole: u32) -> u8 {
    if whole == 0 {
        return 0;
    }
    let pct = (part as f64 / whole as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}
