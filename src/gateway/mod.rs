//! Gateway 应用层
//!
//! HTTP 服务器、路由和请求处理

mod assets;
mod error;
mod handlers;
mod middleware;
mod state;


pub use state::AppState;

use anyhow::{Context, Result};
use axum::{middleware as axum_middleware, routing::post, Router};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::providers::GeminiClient;
use crate::utils::build_http_client;

/// 中继端点路径
pub const RELAY_PATH: &str = "/api/gemini";

pub async fn serve(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    let app = build_router(state, &config.static_dir);
    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.host))?;
    let addr = SocketAddr::new(ip, config.port);

    if !config.static_dir.join(assets::INDEX_DOCUMENT).is_file() {
        tracing::warn!(
            "{} not found in {}, frontend routes will return 404",
            assets::INDEX_DOCUMENT,
            config.static_dir.display()
        );
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("AI proxy listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 根据配置构造应用状态
///
/// 密钥缺失不阻止启动，中继端点会对每个请求返回配置错误
pub fn build_state(config: &Config) -> Result<AppState> {
    let gemini = match &config.api_key {
        Some(api_key) => Some(GeminiClient::new(
            build_http_client()?,
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            api_key.clone(),
        )),
        None => {
            tracing::warn!("API_KEY is not set, {} will answer 500", RELAY_PATH);
            None
        }
    };

    Ok(AppState::new(gemini))
}

pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        // GET 同一路径仍交给前端路由
        .route(
            RELAY_PATH,
            post(handlers::handle_generate).get_service(assets::spa_service(static_dir)),
        )
        .fallback_service(assets::spa_service(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_logger))
                .layer(TraceLayer::new_for_http())
                .layer(middleware::cors_layer()),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    tokio::select! {
        _ = ctrl_c => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
