//! 内存数据仓库模块
//!
//! 演示数据的唯一来源。启动时一次性生成种子数据，之后只读，
//! 各页面通过仓库接口取类型化集合，筛选聚合逻辑可以脱离 Web
//! 层独立测试。没有持久化，也没有写入方。

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::{
    AdminKpis, Category, DiscoverGroup, DueStatus, Group, GroupMembership, GroupStatus, Member,
    MemberProfile, MemberStatus, PaymentDue, PaymentMethod, PaymentMethodKind, PaymentOutcome,
    PaymentRecord, RiskLevel,
};

/// 只读数据仓库
pub struct DataStore {
    groups: Vec<Group>,
    members: Vec<Member>,
    my_groups: Vec<GroupMembership>,
    discover_groups: Vec<DiscoverGroup>,
    categories: Vec<Category>,
    payments_due: Vec<PaymentDue>,
    payment_methods: Vec<PaymentMethod>,
    payment_history: Vec<PaymentRecord>,
    admin_kpis: AdminKpis,
    member_profile: MemberProfile,
}

impl DataStore {
    /// 以 now 为基准生成种子数据
    ///
    /// 日期字段按相对偏移生成，保证演示页面上的"N 天后"之类
    /// 的展示在任何启动时刻都合理。
    pub fn seed(now: DateTime<Utc>) -> Self {
        Self {
            groups: seed_groups(now),
            members: seed_members(),
            my_groups: seed_my_groups(),
            discover_groups: seed_discover_groups(),
            categories: seed_categories(),
            payments_due: seed_payments_due(now),
            payment_methods: seed_payment_methods(),
            payment_history: seed_payment_history(now),
            admin_kpis: AdminKpis {
                total_members: 1_247,
                active_groups: 89,
                total_funds: 12_500_000,
                monthly_volume: 2_800_000,
                pending_approvals: 15,
                risk_alerts: 3,
                system_health: 98.5,
                avg_trust_score: 91.2,
            },
            member_profile: MemberProfile {
                name: "Priya Sharma".to_string(),
                total_savings: 45_000,
                active_groups: 3,
                next_payment_amount: 5_000,
                next_payment_in_days: 3,
                reliability_score: 92,
                completed_cycles: 8,
            },
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member_by_id(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn my_groups(&self) -> &[GroupMembership] {
        &self.my_groups
    }

    pub fn discover_groups(&self) -> &[DiscoverGroup] {
        &self.discover_groups
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn payments_due(&self) -> &[PaymentDue] {
        &self.payments_due
    }

    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    pub fn payment_method_by_id(&self, id: &str) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.id == id)
    }

    pub fn payment_history(&self) -> &[PaymentRecord] {
        &self.payment_history
    }

    pub fn admin_kpis(&self) -> &AdminKpis {
        &self.admin_kpis
    }

    pub fn member_profile(&self) -> &MemberProfile {
        &self.member_profile
    }
}

fn seed_groups(now: DateTime<Utc>) -> Vec<Group> {
    vec![
        Group {
            id: "1".into(),
            name: "Festival Savings Circle".into(),
            description: "Save for Diwali celebrations and gifts".into(),
            status: GroupStatus::Active,
            member_count: 12,
            max_members: 12,
            contribution_amount: 500,
            collection_rate: 92,
            next_payout_date: Some(now + Duration::days(5)),
            next_payout_member: Some("Priya Sharma".into()),
            risk_level: RiskLevel::Low,
            total_fund: 6_000,
            cycles_completed: 3,
            total_cycles: 12,
            created_date: now - Duration::days(90),
        },
        Group {
            id: "2".into(),
            name: "Emergency Fund Group".into(),
            description: "Building emergency funds for unexpected expenses".into(),
            status: GroupStatus::Active,
            member_count: 8,
            max_members: 10,
            contribution_amount: 1_000,
            collection_rate: 75,
            next_payout_date: Some(now + Duration::days(12)),
            next_payout_member: Some("Raj Kumar".into()),
            risk_level: RiskLevel::Medium,
            total_fund: 8_000,
            cycles_completed: 2,
            total_cycles: 10,
            created_date: now - Duration::days(60),
        },
        Group {
            id: "3".into(),
            name: "Business Investment Circle".into(),
            description: "Funding small business ventures and startups".into(),
            status: GroupStatus::Forming,
            member_count: 6,
            max_members: 15,
            contribution_amount: 2_000,
            collection_rate: 100,
            next_payout_date: None,
            next_payout_member: None,
            risk_level: RiskLevel::High,
            total_fund: 12_000,
            cycles_completed: 0,
            total_cycles: 15,
            created_date: now - Duration::days(30),
        },
        Group {
            id: "4".into(),
            name: "Education Fund".into(),
            description: "Supporting children's education expenses".into(),
            status: GroupStatus::Completed,
            member_count: 10,
            max_members: 10,
            contribution_amount: 750,
            collection_rate: 100,
            next_payout_date: None,
            next_payout_member: None,
            risk_level: RiskLevel::Low,
            total_fund: 7_500,
            cycles_completed: 10,
            total_cycles: 10,
            created_date: now - Duration::days(365),
        },
        Group {
            id: "5".into(),
            name: "Wedding Savings Group".into(),
            description: "Saving for wedding expenses and celebrations".into(),
            status: GroupStatus::Paused,
            member_count: 8,
            max_members: 12,
            contribution_amount: 1_500,
            collection_rate: 60,
            next_payout_date: None,
            next_payout_member: None,
            risk_level: RiskLevel::High,
            total_fund: 9_000,
            cycles_completed: 4,
            total_cycles: 12,
            created_date: now - Duration::days(120),
        },
    ]
}

fn seed_members() -> Vec<Member> {
    // (姓名, 邮箱前缀, 信任分, 活跃组数, 总储蓄, 入会日期, 状态, 风险)
    let rows: &[(&str, &str, u8, u32, i64, (i32, u32, u32), MemberStatus, RiskLevel)] = &[
        ("Priya Sharma", "priya", 92, 3, 45_000, (2023, 3, 15), MemberStatus::Active, RiskLevel::Low),
        ("Rajesh Kumar", "rajesh", 88, 2, 32_000, (2023, 1, 20), MemberStatus::Active, RiskLevel::Low),
        ("Amit Singh", "amit", 75, 1, 15_000, (2023, 6, 10), MemberStatus::Warning, RiskLevel::Medium),
        ("Meera Patel", "meera", 96, 4, 68_000, (2022, 11, 5), MemberStatus::Active, RiskLevel::Low),
        ("Suresh Reddy", "suresh", 91, 2, 54_000, (2022, 8, 17), MemberStatus::Active, RiskLevel::Low),
        ("Kavita Joshi", "kavita", 83, 1, 21_000, (2023, 9, 2), MemberStatus::Active, RiskLevel::Medium),
        ("Vikram Malhotra", "vikram", 70, 1, 9_500, (2024, 1, 12), MemberStatus::Warning, RiskLevel::High),
        ("Anita Desai", "anita", 94, 3, 51_000, (2022, 5, 30), MemberStatus::Active, RiskLevel::Low),
        ("Rohan Gupta", "rohan", 87, 2, 28_000, (2023, 4, 25), MemberStatus::Active, RiskLevel::Low),
        ("Sneha Iyer", "sneha", 90, 2, 36_500, (2023, 2, 8), MemberStatus::Active, RiskLevel::Low),
        ("Deepak Verma", "deepak", 64, 0, 4_000, (2024, 3, 19), MemberStatus::Suspended, RiskLevel::High),
        ("Lakshmi Nair", "lakshmi", 97, 5, 82_000, (2021, 12, 1), MemberStatus::Active, RiskLevel::Low),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let (name, alias, trust, groups, savings, (y, m, d), status, risk) = *row;
            Member {
                id: (i + 1).to_string(),
                name: name.to_string(),
                email: format!("{alias}@email.com"),
                phone: format!("+91 9{:04} {:05}", 8765 - i as u32 * 7, 43210 + i as u32 * 101),
                trust_score: trust,
                active_groups: groups,
                total_savings: savings,
                joined_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
                status,
                risk_level: risk,
            }
        })
        .collect()
}

fn seed_my_groups() -> Vec<GroupMembership> {
    vec![
        GroupMembership {
            id: "1".into(),
            name: "Tech Professionals Circle".into(),
            members: 12,
            total_pool: 60_000,
            monthly_contribution: 5_000,
            next_payout: "₹60,000 in 3 months".into(),
            status: GroupStatus::Active,
            my_position: 8,
            completion_rate: 67,
        },
        GroupMembership {
            id: "2".into(),
            name: "Festival Savings Group".into(),
            members: 8,
            total_pool: 40_000,
            monthly_contribution: 5_000,
            next_payout: "₹40,000 in 1 month".into(),
            status: GroupStatus::Active,
            my_position: 2,
            completion_rate: 88,
        },
        GroupMembership {
            id: "3".into(),
            name: "Emergency Fund ROSCA".into(),
            members: 15,
            total_pool: 75_000,
            monthly_contribution: 5_000,
            next_payout: "Completed".into(),
            status: GroupStatus::Completed,
            my_position: 5,
            completion_rate: 100,
        },
    ]
}

fn seed_discover_groups() -> Vec<DiscoverGroup> {
    vec![
        DiscoverGroup {
            id: "1".into(),
            name: "Startup Founders Circle".into(),
            category: "business".into(),
            description: "Monthly savings for business expansion and emergency funds".into(),
            members: 8,
            max_members: 12,
            monthly_amount: 10_000,
            duration_months: 12,
            trust_score: 95,
            admin_name: "Rajesh Kumar".into(),
            admin_rating: 4.8,
            next_start: "Starting in 5 days".into(),
            tags: vec!["Business".into(), "High Amount".into(), "Verified Admin".into()],
        },
        DiscoverGroup {
            id: "2".into(),
            name: "Women Entrepreneurs Fund".into(),
            category: "business".into(),
            description: "Supporting women-led businesses with collective savings".into(),
            members: 15,
            max_members: 20,
            monthly_amount: 5_000,
            duration_months: 10,
            trust_score: 98,
            admin_name: "Priya Patel".into(),
            admin_rating: 4.9,
            next_start: "Starting next month".into(),
            tags: vec!["Women Only".into(), "Business".into(), "High Trust".into()],
        },
        DiscoverGroup {
            id: "3".into(),
            name: "Tech Professionals Savings".into(),
            category: "tech".into(),
            description: "IT professionals saving for gadgets and skill development".into(),
            members: 10,
            max_members: 15,
            monthly_amount: 7_500,
            duration_months: 8,
            trust_score: 92,
            admin_name: "Amit Singh".into(),
            admin_rating: 4.7,
            next_start: "Open for joining".into(),
            tags: vec!["Tech".into(), "Skill Development".into(), "Flexible".into()],
        },
        DiscoverGroup {
            id: "4".into(),
            name: "Festival Celebration Fund".into(),
            category: "festival".into(),
            description: "Save together for grand festival celebrations".into(),
            members: 12,
            max_members: 25,
            monthly_amount: 3_000,
            duration_months: 6,
            trust_score: 89,
            admin_name: "Meera Sharma".into(),
            admin_rating: 4.6,
            next_start: "Starting in 2 weeks".into(),
            tags: vec!["Festival".into(), "Community".into(), "Low Amount".into()],
        },
        DiscoverGroup {
            id: "5".into(),
            name: "Emergency Support Network".into(),
            category: "emergency".into(),
            description: "Quick access fund for medical and family emergencies".into(),
            members: 18,
            max_members: 30,
            monthly_amount: 2_000,
            duration_months: 12,
            trust_score: 96,
            admin_name: "Dr. Suresh Reddy".into(),
            admin_rating: 4.9,
            next_start: "Always open".into(),
            tags: vec!["Emergency".into(), "Medical".into(), "Community Support".into()],
        },
    ]
}

fn seed_categories() -> Vec<Category> {
    // 分类数量不在这里写死，由聚合器从集合推导
    vec![
        Category { id: "tech".into(), name: "Technology".into() },
        Category { id: "business".into(), name: "Business".into() },
        Category { id: "personal".into(), name: "Personal".into() },
        Category { id: "emergency".into(), name: "Emergency".into() },
        Category { id: "festival".into(), name: "Festival".into() },
    ]
}

fn seed_payments_due(now: DateTime<Utc>) -> Vec<PaymentDue> {
    vec![
        PaymentDue {
            id: "1".into(),
            group_name: "Festival Savings Circle".into(),
            amount: 500,
            due_date: now + Duration::days(2),
            status: DueStatus::Due,
        },
        PaymentDue {
            id: "2".into(),
            group_name: "Emergency Fund Group".into(),
            amount: 1_000,
            due_date: now + Duration::days(7),
            status: DueStatus::Due,
        },
        PaymentDue {
            id: "3".into(),
            group_name: "Education Fund".into(),
            amount: 750,
            due_date: now - Duration::days(1),
            status: DueStatus::Overdue,
        },
    ]
}

fn seed_payment_methods() -> Vec<PaymentMethod> {
    vec![
        PaymentMethod {
            id: "1".into(),
            kind: PaymentMethodKind::Upi,
            name: "Google Pay".into(),
            identifier: "user@okaxis".into(),
            is_default: true,
            is_verified: true,
            fee_fixed: 0,
            fee_percent: 0.0,
        },
        PaymentMethod {
            id: "2".into(),
            kind: PaymentMethodKind::Bank,
            name: "HDFC Bank".into(),
            identifier: "1234567890".into(),
            is_default: false,
            is_verified: true,
            fee_fixed: 2,
            fee_percent: 0.5,
        },
        PaymentMethod {
            id: "3".into(),
            kind: PaymentMethodKind::Wallet,
            name: "Paytm Wallet".into(),
            identifier: "+91 9876543210".into(),
            is_default: false,
            is_verified: true,
            fee_fixed: 1,
            fee_percent: 0.2,
        },
    ]
}

fn seed_payment_history(now: DateTime<Utc>) -> Vec<PaymentRecord> {
    vec![
        PaymentRecord {
            id: "1".into(),
            group_name: "Festival Savings Circle".into(),
            amount: 500,
            date: now - Duration::days(30),
            status: PaymentOutcome::Completed,
            method: "Google Pay".into(),
            transaction_id: "TXN123456789".into(),
        },
        PaymentRecord {
            id: "2".into(),
            group_name: "Emergency Fund Group".into(),
            amount: 1_000,
            date: now - Duration::days(35),
            status: PaymentOutcome::Completed,
            method: "HDFC Bank".into(),
            transaction_id: "TXN123456788".into(),
        },
        PaymentRecord {
            id: "3".into(),
            group_name: "Education Fund".into(),
            amount: 750,
            date: now - Duration::days(40),
            status: PaymentOutcome::Completed,
            method: "Google Pay".into(),
            transaction_id: "TXN123456787".into(),
        },
    ]
}
