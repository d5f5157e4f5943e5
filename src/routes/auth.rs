//! 登录登出路由模块
//!
//! 演示登录只有两种结果：凭据匹配则建立会话并跳转对应仪表盘，
//! 否则返回一条静态错误信息。没有真实认证后端。

use askama::Template;
use askama_axum::IntoResponse;
use axum::{
    extract::{Extension, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::config::CONFIG;
use crate::helpers::monitoring::AppState;
use crate::security::{sanitize_log_message, validation};
use crate::session::{
    clear_session_cookie, cookie_value, session_cookie, AuthError, SessionStore, UserType,
    AUTH_COOKIE,
};

/// 登录页模板
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate {
    pub user_type: String,
    pub error: String,
}

/// 登录失败提示片段
#[derive(Template)]
#[template(path = "auth/login_error.html")]
pub struct LoginErrorTemplate {
    pub message: String,
}

#[derive(Deserialize)]
pub struct LoginPageQuery {
    /// 登录身份，admin 或 member，默认 member
    #[serde(rename = "as")]
    pub as_type: Option<String>,
}

/// 登录表单
#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub user_type: String,
    /// 原型接受该标志但不改变行为
    #[allow(dead_code)]
    pub remember_me: Option<String>,
}

/// 登录页
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> impl IntoResponse {
    let user_type = match query.as_type.as_deref() {
        Some("admin") => "admin",
        _ => "member",
    };
    LoginPageTemplate {
        user_type: user_type.to_string(),
        error: String::new(),
    }
}

/// 校验演示凭据，两种结果：成功或"凭据无效"
fn authenticate(user_type: UserType, email: &str, password: &str) -> Result<(), AuthError> {
    let demo = &CONFIG.demo;
    let (expected_email, expected_password) = match user_type {
        UserType::Admin => (&demo.admin_email, &demo.admin_password),
        UserType::Member => (&demo.member_email, &demo.member_password),
    };

    if email == expected_email && password == expected_password {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

/// 处理登录提交
///
/// 成功时设置会话 Cookie 并通过 HX-Redirect 跳转到对应仪表盘，
/// 失败时返回错误提示片段替换表单上方的告警区。
pub async fn login(
    Extension(sessions): Extension<Arc<SessionStore>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let user_type = match UserType::parse(&form.user_type) {
        Some(user_type) => user_type,
        None => {
            return error_fragment("Unknown user type");
        }
    };

    if let Err(e) = validation::validate_input(&form) {
        return error_fragment(&e.to_string());
    }

    match authenticate(user_type, &form.email, &form.password) {
        Ok(()) => {
            let token = sessions.create(user_type);
            tracing::info!("登录成功: 身份={}", user_type.as_str());

            let mut response = StatusCode::OK.into_response();
            if let Ok(cookie) = session_cookie(&token).parse() {
                response.headers_mut().insert(header::SET_COOKIE, cookie);
            }
            if let Ok(target) = user_type.dashboard_path().parse() {
                response.headers_mut().insert("HX-Redirect", target);
            }
            response
        }
        Err(e) => {
            tracing::warn!(
                "登录失败: {}",
                sanitize_log_message(&format!("email={}", form.email))
            );
            error_fragment(&e.to_string())
        }
    }
}

fn error_fragment(message: &str) -> Response {
    LoginErrorTemplate {
        message: message.to_string(),
    }
    .into_response()
}

/// 登出：移除会话并清掉 Cookie
pub async fn logout(
    Extension(sessions): Extension<Arc<SessionStore>>,
    headers: HeaderMap,
) -> Response {
    if let Some(token) = cookie_value(&headers, AUTH_COOKIE) {
        sessions.remove(&token);
    }

    let mut response = StatusCode::OK.into_response();
    if let Ok(cookie) = clear_session_cookie().parse() {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    if let Ok(target) = "/login".parse::<header::HeaderValue>() {
        response.headers_mut().insert("HX-Redirect", target);
    }
    response
}

/// 会话校验中间件
///
/// /admin 与 /member 前缀的页面要求对应身份的会话，其余路径放行。
/// 未登录或身份不符一律跳回登录页。
pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path();
    let required = if path == "/admin" || path.starts_with("/admin/") || path.starts_with("/block/admin/") {
        Some(UserType::Admin)
    } else if path == "/member" || path.starts_with("/member/") || path.starts_with("/block/member/") {
        Some(UserType::Member)
    } else {
        None
    };

    let Some(required) = required else {
        return next.run(req).await;
    };

    let session = cookie_value(req.headers(), AUTH_COOKIE)
        .and_then(|token| state.sessions.get(&token));

    match session {
        Some(user_type) if user_type == required => next.run(req).await,
        Some(_) | None => {
            tracing::debug!("未授权访问: 路径={}", path);
            Redirect::to("/login").into_response()
        }
    }
}
