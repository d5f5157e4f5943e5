//! 监控和运维功能模块
//!
//! 提供健康检查、Prometheus 指标暴露和 HTTP 请求指标收集。

use axum::{extract::State, http::StatusCode, response::IntoResponse, Router};
use metrics::{counter, gauge, histogram, increment_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::session::SessionStore;
use crate::store::DataStore;

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: u64,
    pub groups: usize,
    pub members: usize,
}

/// 应用状态，包含启动时间、数据仓库与会话仓库
#[derive(Clone)]
pub struct AppState {
    pub start_time: Instant,
    pub store: Arc<DataStore>,
    pub sessions: Arc<SessionStore>,
    #[allow(dead_code)]
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<DataStore>, sessions: Arc<SessionStore>, config: Arc<AppConfig>) -> Self {
        Self {
            start_time: Instant::now(),
            store,
            sessions,
            config,
        }
    }

    /// 应用运行时间（秒）
    pub fn uptime(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

lazy_static::lazy_static! {
    static ref PROMETHEUS: PrometheusHandle = PrometheusBuilder::new()
        .install_recorder()
        .expect("无法安装 Prometheus 指标收集器");
}

/// 初始化指标收集器并注册基础指标
pub fn init_metrics(store: &DataStore) {
    lazy_static::initialize(&PROMETHEUS);

    // HTTP 请求指标
    counter!("http_requests_total", 0);
    counter!("http_requests_errors_total", 0);
    histogram!("http_request_duration_seconds", 0.0);
    gauge!("app_uptime_seconds", 0.0);

    // 片段缓存指标
    counter!("fragment_cache_hits_total", 0);
    counter!("fragment_cache_misses_total", 0);
    counter!("fragment_cache_sets_total", 0);
    gauge!("fragment_cache_size_items", 0.0);

    // 业务指标：种子数据规模
    gauge!("groups_count_total", store.groups().len() as f64);
    gauge!("members_count_total", store.members().len() as f64);
    gauge!("discover_groups_count_total", store.discover_groups().len() as f64);
    gauge!("active_sessions", 0.0);
}

/// 健康检查处理器
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    increment_counter!("http_requests_total");
    gauge!("app_uptime_seconds", state.uptime() as f64);
    gauge!("active_sessions", state.sessions.len() as f64);

    let response = HealthCheckResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.uptime(),
        groups: state.store.groups().len(),
        members: state.store.members().len(),
    };

    (StatusCode::OK, axum::Json(response)).into_response()
}

/// 指标收集中间件
pub async fn metrics_middleware(
    req: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> impl IntoResponse {
    let start = Instant::now();
    let path = req.uri().path().to_string();
    let method = req.method().to_string();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status().as_u16().to_string();

    if response.status().is_success() || response.status().is_redirection() {
        increment_counter!("http_requests_total", "status" => status.clone(), "method" => method.clone(), "path" => path.clone());
    } else {
        increment_counter!("http_requests_errors_total", "status" => status.clone(), "method" => method.clone(), "path" => path.clone());
    }

    histogram!("http_request_duration_seconds", duration.as_secs_f64(),
        "status" => status,
        "method" => method,
        "path" => path
    );

    response
}

/// 指标处理器，按 Prometheus 文本格式暴露
pub async fn metrics_handler() -> impl IntoResponse {
    let body = PROMETHEUS.render();
    (
        StatusCode::OK,
        [("Content-Type", "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

/// 创建监控路由
pub fn create_monitoring_routes(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serializes_expected_fields() {
        let response = HealthCheckResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime: 42,
            groups: 5,
            members: 12,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["uptime"], 42);
        assert_eq!(value["groups"], 5);
    }
}
