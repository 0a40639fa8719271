//! Gemini Relay - Gemini API 中继服务
//!
//! 一个轻量级的中继服务：接收前端的 prompt，携带服务端持有的密钥转发给 Gemini API，
//! 同时托管前端构建产物。
//!
//! # 功能特性
//!
//! - `POST /api/gemini` 中继端点，密钥只保存在服务端
//! - CORS 预检处理，回显请求 Origin
//! - 静态资源托管，未匹配的路径回退到 `index.html`
//!
//! # 命令行接口
//!
//! - `serve`: 启动中继服务器
//! - `test`: 向本地服务器发送测试请求

mod commands;
mod config;
mod gateway;
mod providers;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Gemini Relay CLI
#[derive(Parser)]
#[command(name = "gemini-relay")]
#[command(about = "Gemini API Relay Service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 可用的命令
#[derive(Subcommand)]
enum Commands {
    /// 启动中继服务器
    Serve,
    /// 向本地服务器发送测试请求
    Test {
        /// 发送的 prompt
        #[arg(short, long)]
        prompt: Option<String>,
        /// 可选的 system prompt
        #[arg(short, long)]
        system_prompt: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件（如果存在）
    if let Ok(dotenv_path) = std::env::var("RELAY_ENV_FILE") {
        dotenvy::from_path(&dotenv_path).ok();
    } else {
        dotenvy::dotenv().ok();
    }

    // 初始化日志系统
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_relay=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    // 解析命令行参数和配置
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // 执行相应的命令
    match cli.command {
        Commands::Serve => commands::serve_command(config).await,
        Commands::Test {
            prompt,
            system_prompt,
        } => commands::test_command(config, prompt, system_prompt).await,
    }
}
