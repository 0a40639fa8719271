//! Gateway 中间件

use axum::{
    extract::Request,
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use std::sync::atomic::{AtomicU64, Ordering};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::Instrument;

/// 全局请求计数器，用于生成 request_id
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// CORS 中间件
///
/// 回显请求的 Origin，只允许 POST / OPTIONS 和 Content-Type 头，预检请求直接在此应答
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// 请求日志中间件
pub async fn request_logger(request: Request, next: Next) -> Response {
    let request_id = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "req",
        id = request_id,
        %method,
        %path,
    );

    async move {
        let start = std::time::Instant::now();
        let response = next.run(request).await;
        let latency_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        tracing::info!(status, latency_ms, "done");

        response
    }
    .instrument(span)
    .await
}
