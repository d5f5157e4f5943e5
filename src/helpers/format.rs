//! 展示格式化模块
//!
//! 货币、日期与相对天数的格式化。相对天数依赖"当前时刻"，
//! 参考时间一律由调用方注入，保证可测试。

use chrono::{DateTime, Utc};

/// 货币代码到符号的映射，未知代码退回 "代码 + 空格" 前缀
fn currency_symbol(code: &str) -> &str {
    match code {
        "INR" => "₹",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        _ => "",
    }
}

/// 千位分组，仅处理非负部分，符号由调用方拼接
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// 格式化整数金额：符号 + 千位分组，零小数位
///
/// `format_currency(0, "USD")` 返回 "$0"，不会失败。
pub fn format_currency(amount: i64, code: &str) -> String {
    let symbol = currency_symbol(code);
    let sign = if amount < 0 { "-" } else { "" };
    let grouped = group_digits(amount.unsigned_abs());
    if symbol.is_empty() {
        format!("{sign}{code} {grouped}")
    } else {
        format!("{sign}{symbol}{grouped}")
    }
}

/// 大额金额的紧凑展示：千万以上记 Cr，十万以上记 L，其余千位分组
pub fn format_currency_compact(amount: i64, code: &str) -> String {
    let symbol = currency_symbol(code);
    let prefix = if symbol.is_empty() {
        format!("{code} ")
    } else {
        symbol.to_string()
    };
    if amount >= 10_000_000 {
        format!("{prefix}{:.1}Cr", amount as f64 / 10_000_000.0)
    } else if amount >= 100_000 {
        format!("{prefix}{:.1}L", amount as f64 / 100_000.0)
    } else {
        format_currency(amount, code)
    }
}

/// 相对天数展示："Today"、"Tomorrow"、"N days" 或 "N days overdue"
///
/// 未来的秒差向上取整，不足一天也按 1 天（"Tomorrow"）计；
/// 过去的秒差向零截断，不足一天仍是 "Today"。
/// 历史行为保留复数形式，逾期一天也是 "1 days overdue"。
pub fn format_relative_days(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (date - now).num_seconds();
    // 向上取整：过去不足一天仍算今天
    let days = if seconds >= 0 {
        (seconds + 86_399) / 86_400
    } else {
        -(-seconds / 86_400)
    };

    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d if d < 0 => format!("{} days overdue", -d),
        d => format!("{d} days"),
    }
}

/// 日历日期展示，如 "Mar 15, 2023"
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn currency_zero_amount() {
        assert_eq!(format_currency(0, "USD"), "$0");
        assert_eq!(format_currency(0, "INR"), "₹0");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(500, "INR"), "₹500");
        assert_eq!(format_currency(45_000, "INR"), "₹45,000");
        assert_eq!(format_currency(12_500_000, "USD"), "$12,500,000");
    }

    #[test]
    fn currency_negative_amount() {
        assert_eq!(format_currency(-1_500, "INR"), "-₹1,500");
    }

    #[test]
    fn currency_unknown_code_uses_prefix() {
        assert_eq!(format_currency(1_000, "JPY"), "JPY 1,000");
    }

    #[test]
    fn compact_currency_bands() {
        assert_eq!(format_currency_compact(12_600_000, "INR"), "₹1.3Cr");
        assert_eq!(format_currency_compact(2_800_000, "INR"), "₹28.0L");
        assert_eq!(format_currency_compact(45_000, "INR"), "₹45,000");
    }

    #[test]
    fn relative_days_today_and_tomorrow() {
        let now = reference();
        assert_eq!(format_relative_days(now, now), "Today");
        assert_eq!(format_relative_days(now + Duration::days(1), now), "Tomorrow");
    }

    #[test]
    fn relative_days_future_and_overdue() {
        let now = reference();
        assert_eq!(format_relative_days(now + Duration::days(5), now), "5 days");
        // 历史行为：单数也用复数形式
        assert_eq!(
            format_relative_days(now - Duration::days(1), now),
            "1 days overdue"
        );
        assert_eq!(
            format_relative_days(now - Duration::days(3), now),
            "3 days overdue"
        );
    }

    #[test]
    fn relative_days_rounds_partial_day_up() {
        let now = reference();
        // 未来 36 小时按 2 天展示，与原有向上取整一致
        assert_eq!(
            format_relative_days(now + Duration::hours(36), now),
            "2 days"
        );
        // 过去不足一天仍是今天
        assert_eq!(format_relative_days(now - Duration::hours(12), now), "Today");
    }

    #[test]
    fn calendar_date() {
        let date = Utc.with_ymd_and_hms(2023, 3, 15, 0, 0, 0).unwrap();
        assert_eq!(format_date(date), "Mar 15, 2023");
    }
}
