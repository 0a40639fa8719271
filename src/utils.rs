use anyhow::{Context, Result};
use reqwest::Client;

/// 是否禁用 TLS 验证（用于调试 mitmproxy 等场景）
pub fn should_disable_tls_verify() -> bool {
    std::env::var("RELAY_DISABLE_TLS_VERIFY")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// 创建上游请求使用的 HTTP 客户端
///
/// 不设置超时，沿用客户端默认行为
pub fn build_http_client() -> Result<Client> {
    let mut builder = Client::builder().user_agent(user_agent());

    if should_disable_tls_verify() {
        tracing::warn!("TLS certificate verification is DISABLED - for debugging only!");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build().context("Failed to create HTTP client")
}

fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
