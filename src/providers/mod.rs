//! 上游 Provider
//!
//! 目前只有 Gemini 一个上游

pub mod gemini;

pub use gemini::{extract_text, GeminiClient};

use reqwest::StatusCode;

/// 上游调用错误
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// 上游返回了非成功状态码
    #[error("API Error: {} - {message}", .status.as_u16())]
    Api { status: StatusCode, message: String },

    /// 网络错误、响应无法解析等
    #[error(transparent)]
    Request(#[from] anyhow::Error),
}
