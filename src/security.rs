//! 安全模块
//!
//! 提供输入验证和日志脱敏功能。演示系统没有真实认证后端，
//! 但日志里仍然不应出现明文邮箱、手机号或令牌。

use thiserror::Error;
use validator::Validate;

/// 安全错误类型
#[derive(Error, Debug)]
pub enum SecurityError {
    #[error("输入验证失败: {0}")]
    ValidationFailed(String),
}

/// 输入验证工具
pub mod validation {
    use super::*;
    use validator::ValidationErrors;

    /// 验证输入数据并返回友好的错误消息
    pub fn validate_input<T: Validate>(input: &T) -> Result<(), SecurityError> {
        match input.validate() {
            Ok(_) => Ok(()),
            Err(errors) => {
                let error_message = format_validation_errors(&errors);
                Err(SecurityError::ValidationFailed(error_message))
            }
        }
    }

    /// 格式化验证错误为友好的错误消息
    fn format_validation_errors(errors: &ValidationErrors) -> String {
        let mut messages = Vec::new();

        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(msg) => msg.to_string(),
                    None => format!("字段 '{}' 验证失败: {}", field, error.code),
                };
                messages.push(message);
            }
        }

        messages.join(", ")
    }
}

/// 日志脱敏工具
pub mod sanitization {
    lazy_static::lazy_static! {
        static ref EMAIL_RE: regex::Regex =
            regex::Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
                .expect("邮箱脱敏正则不合法");
        static ref PHONE_RE: regex::Regex =
            regex::Regex::new(r"\+?\d[\d ]{8,14}\d").expect("手机号脱敏正则不合法");
        static ref TOKEN_RE: regex::Regex =
            regex::Regex::new(r#"(?i)(token|password)\s*=\s*[^\s&;]+"#)
                .expect("令牌脱敏正则不合法");
    }

    /// 脱敏敏感信息：邮箱、手机号（含印度 +91 空格分组写法）、令牌与密码
    pub fn sanitize_log_message(message: &str) -> String {
        let result = EMAIL_RE.replace_all(message, "***@***.***");
        let result = PHONE_RE.replace_all(&result, "***********");
        let result = TOKEN_RE.replace_all(&result, "$1=***");
        result.to_string()
    }
}

pub use self::sanitization::sanitize_log_message;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(email(message = "Please enter a valid email address"))]
        email: String,
        #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
        password: String,
    }

    #[test]
    fn validation_passes_and_fails() {
        let good = Probe {
            email: "member@demo.com".into(),
            password: "demo123".into(),
        };
        assert!(validation::validate_input(&good).is_ok());

        let bad = Probe {
            email: "not-an-email".into(),
            password: "123".into(),
        };
        let err = validation::validate_input(&bad).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("valid email"));
        assert!(message.contains("at least 6"));
    }

    #[test]
    fn sanitizes_emails_and_phones() {
        let sanitized = sanitize_log_message("login email=priya@email.com phone=+91 98765 43210");
        assert!(!sanitized.contains("priya@email.com"));
        assert!(!sanitized.contains("98765 43210"));
    }

    #[test]
    fn sanitizes_tokens_and_passwords() {
        let sanitized = sanitize_log_message("password=demo123&token=abcdef123456");
        assert!(!sanitized.contains("demo123"));
        assert!(!sanitized.contains("abcdef123456"));
    }
}
