mod config;
mod domain;
mod helpers;
mod routes;
mod security;
mod services;
mod session;
mod store;

use axum::{middleware, routing::get, routing::post, Extension, Router};
use chrono::Utc;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::CONFIG;
use crate::helpers::monitoring::{self, AppState};
use crate::session::SessionStore;
use crate::store::DataStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rosca_demo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 生成种子数据
    tracing::info!("🔧 正在生成演示数据...");
    let store = Arc::new(DataStore::seed(Utc::now()));
    tracing::info!(
        "✅ 演示数据就绪: {} 个小组, {} 名成员",
        store.groups().len(),
        store.members().len()
    );

    let sessions = Arc::new(SessionStore::new(CONFIG.security.session_token_length));
    let state = AppState::new(store.clone(), sessions.clone(), Arc::new(CONFIG.clone()));

    // 指标与片段预热
    monitoring::init_metrics(&store);
    services::warmup::warmup_default_fragments(&store);

    let app = build_router(store, sessions, state);

    let addr = CONFIG.server.server_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("无法绑定地址 {}: {}", addr, e);
            return;
        }
    };

    tracing::info!("🚀 ROSCA 演示服务监听于 http://{}", addr);
    tracing::info!("📊 健康检查: /health, 指标: /metrics");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("服务异常退出: {}", e);
    }
}

/// 组装全部路由和中间件
fn build_router(store: Arc<DataStore>, sessions: Arc<SessionStore>, state: AppState) -> Router {
    Router::new()
        // 落地页与登录
        .route("/", get(routes::pages::index))
        .route("/login", get(routes::auth::login_page))
        // 管理端页面
        .route("/admin", get(routes::dashboard::admin_dashboard))
        .route("/admin/groups", get(routes::groups::groups_page))
        .route("/admin/members", get(routes::members::members_page))
        .route("/admin/payments", get(routes::payments::admin_payments_page))
        // 成员端页面
        .route("/member", get(routes::dashboard::member_dashboard))
        .route("/member/groups", get(routes::my_groups::my_groups_page))
        .route("/member/discover", get(routes::discover::discover_page))
        .route("/member/payments", get(routes::payments::payments_page))
        // /block 开头 - 返回 HTML 片段
        .route("/block/admin/groups", get(routes::groups::groups_results))
        .route("/block/admin/members/search", get(routes::members::search))
        .route(
            "/block/admin/members/:id/detail",
            get(routes::members::detail),
        )
        .route(
            "/block/member/discover",
            get(routes::discover::discover_results),
        )
        .route(
            "/block/member/payments/quickpay",
            get(routes::payments::quickpay),
        )
        // /api 开头 - 执行操作
        .route("/api/login", post(routes::auth::login))
        .route("/api/logout", post(routes::auth::logout))
        // 静态文件（嵌入式）
        .route("/static/*path", get(routes::static_assets::static_handler))
        .fallback(routes::pages::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::require_auth,
        ))
        .layer(middleware::from_fn(monitoring::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(CONFIG.security.max_request_bytes))
        .layer(build_cors_layer())
        .layer(Extension(store))
        .layer(Extension(sessions))
        .merge(monitoring::create_monitoring_routes(state))
}

/// 按配置构建 CORS 层，来源不合法时只记日志不中断启动
fn build_cors_layer() -> CorsLayer {
    let mut cors = CorsLayer::new();
    for origin in &CONFIG.security.cors_allow_origins {
        match origin.parse::<axum::http::HeaderValue>() {
            Ok(value) => {
                cors = cors.allow_origin(value);
            }
            Err(e) => {
                tracing::warn!("忽略不合法的 CORS 来源 {}: {}", origin, e);
            }
        }
    }
    cors
}

/// 等待 Ctrl+C 信号后优雅停机
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听停机信号: {}", e);
        return;
    }
    tracing::info!(
        "收到停机信号，{} 秒内完成收尾",
        CONFIG.server.graceful_shutdown_timeout_seconds
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserType;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<SessionStore>) {
        let store = Arc::new(DataStore::seed(Utc::now()));
        let sessions = Arc::new(SessionStore::new(32));
        let state = AppState::new(store.clone(), sessions.clone(), Arc::new(CONFIG.clone()));
        (build_router(store, sessions.clone(), state), sessions)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("读取响应体失败")
            .to_bytes();
        String::from_utf8_lossy(&bytes).to_string()
    }

    #[tokio::test]
    async fn unauthenticated_admin_page_redirects_to_login() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login"
        );
    }

    #[tokio::test]
    async fn cross_role_session_is_rejected() {
        let (app, sessions) = app();
        let token = sessions.create(UserType::Member);

        // 成员会话访问管理端页面
        let response = app
            .oneshot(
                Request::get("/admin/groups")
                    .header(header::COOKIE, format!("auth_token={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login"
        );
    }

    #[tokio::test]
    async fn valid_session_reaches_its_dashboard() {
        let (app, sessions) = app();
        let token = sessions.create(UserType::Admin);

        let response = app
            .oneshot(
                Request::get("/admin")
                    .header(header::COOKIE, format!("auth_token={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Admin Dashboard"));
    }

    #[tokio::test]
    async fn member_pages_render_with_member_session() {
        let (app, sessions) = app();
        let token = sessions.create(UserType::Member);

        for path in ["/member", "/member/groups", "/member/payments"] {
            let response = app
                .clone()
                .oneshot(
                    Request::get(path)
                        .header(header::COOKIE, format!("auth_token={token}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "path={path}");
        }
    }

    #[tokio::test]
    async fn login_sets_cookie_and_hx_redirect() {
        let (app, _) = app();
        let response = app
            .oneshot(
                Request::post("/api/login")
                    .header(
                        header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(Body::from(
                        "user_type=admin&email=admin%40demo.com&password=demo123",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(cookie.starts_with("auth_token="));
        assert!(cookie.contains("HttpOnly"));

        assert_eq!(response.headers().get("HX-Redirect").unwrap(), "/admin");
    }

    #[tokio::test]
    async fn failed_login_returns_error_fragment() {
        let (app, _) = app();
        let response = app
            .oneshot(
                Request::post("/api/login")
                    .header(
                        header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(Body::from(
                        "user_type=member&email=member%40demo.com&password=wrong1",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("HX-Redirect").is_none());
        let body = body_text(response).await;
        assert!(body.contains("Invalid email or password"));
    }

    #[tokio::test]
    async fn unknown_route_falls_back_to_404_page() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::get("/no-such-page").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_text(response).await;
        assert!(body.contains("404"));
    }

    #[tokio::test]
    async fn health_endpoint_is_public() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("\"status\":\"ok\""));
    }
}
