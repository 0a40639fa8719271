//! Serve 命令 - 启动中继服务器
//!
//! 此模块实现 `serve` 命令，启动 HTTP 服务器，转发 `/api/gemini` 请求并托管前端静态资源。

use anyhow::Result;

use crate::config::Config;
use crate::gateway;

/// 执行服务器启动命令
///
/// # 功能
///
/// - 根据配置创建上游客户端（未配置密钥时仍然启动）
/// - 初始化路由、CORS 和日志中间件
/// - 启动服务器并等待关闭信号（Ctrl+C 或 SIGTERM）
pub async fn serve_command(config: Config) -> Result<()> {
    gateway::serve(config).await
}
