//! 应用配置模块
//!
//! 负责从环境变量加载应用配置，包括：
//! - 服务器监听地址和端口
//! - 上游 Gemini API 密钥、地址和模型
//! - 前端静态资源目录

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Gemini API 默认地址
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// 默认使用的 Gemini 模型
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

const DEFAULT_PORT: u16 = 8787;

/// 应用配置
///
/// 进程启动时加载一次，之后只读
#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器监听地址（如 "0.0.0.0" 或 "127.0.0.1"）
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 上游 API 密钥，未配置时中继端点对每个请求返回 500
    pub api_key: Option<String>,
    /// 上游 API 地址
    pub gemini_base_url: String,
    /// 上游模型名称
    pub gemini_model: String,
    /// 前端构建产物目录
    pub static_dir: PathBuf,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    ///
    /// - `HOST`: 服务器监听地址（默认: "0.0.0.0"）
    /// - `PORT`: 服务器监听端口（默认: 8787）
    /// - `API_KEY`: 上游 API 密钥，未设置时回退到 `GEMINI_API_KEY`
    /// - `GEMINI_BASE_URL` / `GEMINI_MODEL`: 上游地址和模型
    /// - `STATIC_DIR`: 静态资源目录（默认: "public"）
    ///
    /// # 错误
    ///
    /// - 如果 `PORT` 不是有效的端口号
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 使用给定的查找函数加载配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        // 空字符串视为未配置
        let api_key = lookup("API_KEY")
            .filter(|key| !key.is_empty())
            .or_else(|| lookup("GEMINI_API_KEY").filter(|key| !key.is_empty()));

        let gemini_base_url = lookup("GEMINI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

        let gemini_model =
            lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let static_dir = PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| "public".to_string()));

        Ok(Self {
            host,
            port,
            api_key,
            gemini_base_url,
            gemini_model,
            static_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8787);
        assert!(config.api_key.is_none());
        assert_eq!(config.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn reads_port_and_api_key() {
        let config =
            Config::from_lookup(lookup_from(&[("PORT", "9000"), ("API_KEY", "secret")])).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn falls_back_to_gemini_api_key() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "legacy")])).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("legacy"));

        let config = Config::from_lookup(lookup_from(&[
            ("API_KEY", "primary"),
            ("GEMINI_API_KEY", "legacy"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn empty_api_key_is_unset() {
        let config = Config::from_lookup(lookup_from(&[("API_KEY", "")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let config =
            Config::from_lookup(lookup_from(&[("GEMINI_BASE_URL", "http://localhost:1234/")]))
                .unwrap();
        assert_eq!(config.gemini_base_url, "http://localhost:1234");
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "not-a-port")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("PORT", "70000")])).is_err());
    }
}
