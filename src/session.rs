//! 会话标志仓库模块
//!
//! 原型里登录状态只是两个标志：一个不透明令牌和一个用户类型。
//! 这里把它收敛成显式的会话对象（set / get / remove），令牌放在
//! Cookie 里，映射关系存进程内。不是认证系统，只是演示用的开关。

use axum::http::HeaderMap;
use rand::{distributions::Alphanumeric, Rng};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// 会话令牌 Cookie 名
pub const AUTH_COOKIE: &str = "auth_token";

/// 登录错误，只区分"凭据无效"和"输入不合法"两种结果
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Validation(String),
}

/// 用户类型标志
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserType {
    Admin,
    Member,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Member => "member",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(UserType::Admin),
            "member" => Some(UserType::Member),
            _ => None,
        }
    }

    /// 登录后跳转的仪表盘路径
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            UserType::Admin => "/admin",
            UserType::Member => "/member",
        }
    }
}

/// 进程内会话仓库：令牌 -> 用户类型
pub struct SessionStore {
    sessions: RwLock<HashMap<String, UserType>>,
    token_length: usize,
}

impl SessionStore {
    pub fn new(token_length: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            token_length,
        }
    }

    /// 建立新会话并返回令牌
    pub fn create(&self, user_type: UserType) -> String {
        let token = generate_token(self.token_length);
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(token.clone(), user_type);
        }
        token
    }

    /// 按令牌取用户类型
    pub fn get(&self, token: &str) -> Option<UserType> {
        self.sessions
            .read()
            .ok()
            .and_then(|sessions| sessions.get(token).copied())
    }

    /// 移除会话，幂等
    pub fn remove(&self, token: &str) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(token);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

/// 生成随机会话令牌
pub fn generate_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// 从请求头的 Cookie 中提取指定项的值
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie_header = headers
        .get(axum::http::header::COOKIE)
        .and_then(|h| h.to_str().ok())?;

    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if let Some((key, value)) = cookie.split_once('=') {
            if key == name {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// 设置会话 Cookie 的值
pub fn session_cookie(token: &str) -> String {
    format!("{AUTH_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// 清除会话 Cookie 的值
pub fn clear_session_cookie() -> String {
    format!("{AUTH_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn create_get_remove_round_trip() {
        let store = SessionStore::new(32);
        let token = store.create(UserType::Admin);

        assert_eq!(token.len(), 32);
        assert_eq!(store.get(&token), Some(UserType::Admin));
        assert_eq!(store.len(), 1);

        store.remove(&token);
        assert_eq!(store.get(&token), None);
        // 重复移除无副作用
        store.remove(&token);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn unknown_token_yields_none() {
        let store = SessionStore::new(32);
        assert_eq!(store.get("not-a-token"), None);
    }

    #[test]
    fn tokens_are_unique() {
        let store = SessionStore::new(32);
        let a = store.create(UserType::Member);
        let b = store.create(UserType::Member);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn cookie_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            "theme=dark; auth_token=abc123; lang=en".parse().unwrap(),
        );
        assert_eq!(cookie_value(&headers, AUTH_COOKIE).as_deref(), Some("abc123"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn user_type_parse_and_paths() {
        assert_eq!(UserType::parse("admin"), Some(UserType::Admin));
        assert_eq!(UserType::parse("member"), Some(UserType::Member));
        assert_eq!(UserType::parse("root"), None);
        assert_eq!(UserType::Admin.dashboard_path(), "/admin");
    }
}
