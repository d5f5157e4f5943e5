//! 页面路由处理模块
//!
//! 落地页与 404 页面。

use askama::Template;
use askama_axum::IntoResponse;
use axum::http::StatusCode;

/// 落地页模板
#[derive(Template)]
#[template(path = "home/index.html")]
pub struct IndexTemplate;

/// 404 页面模板
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;

/// 落地页
pub async fn index() -> impl IntoResponse {
    IndexTemplate
}

/// 未匹配路由统一返回 404 页面
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate)
}
