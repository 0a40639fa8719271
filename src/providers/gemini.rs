//! Gemini Provider
//!
//! 封装 `generateContent` 调用：构造请求体、携带服务端密钥发送、解析响应

use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::providers::ProviderError;

/// 生成参数，固定值，不接受客户端覆盖
const TEMPERATURE: f64 = 0.5;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.9;
const MAX_OUTPUT_TOKENS: u32 = 4096;

/// 上游未返回错误信息时使用的文本
const UNKNOWN_ERROR: &str = "Unknown error";

/// `generateContent` 请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

impl GenerateContentRequest {
    /// 将文本包装为单个 content / part
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: text.into() }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

/// 上游错误响应 `{ "error": { "message": ... } }`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// 从成功响应中提取第一个候选的第一段文本
///
/// 每一层只看第一个元素，其余候选和片段的形状不影响结果；
/// 路径上任一环节缺失或 text 不是字符串时返回空字符串，不视为错误
pub fn extract_text(raw: &Value) -> String {
    raw.get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.get(0))
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// 从错误响应体中提取错误信息
///
/// 仅在 `error.message` 缺失或为空时使用默认文本
fn extract_error_message(body: Value) -> String {
    serde_json::from_value::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|error| error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

/// Gemini API 客户端
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: Client, base_url: String, model: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            model,
            api_key,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 带密钥的请求地址，不能写入日志
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            urlencoding::encode(&self.api_key)
        )
    }

    /// 发送一次 `generateContent` 请求并返回完整的原始响应
    ///
    /// 不重试，不设置额外超时，响应体完整读入后返回
    pub async fn generate_content(&self, text: &str) -> Result<Value, ProviderError> {
        let body = GenerateContentRequest::from_text(text);

        let response = self
            .http
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            // 错误响应体不是 JSON 时按内部错误处理
            let error_body = response
                .json::<Value>()
                .await
                .map_err(reqwest::Error::without_url)
                .context("Failed to parse Gemini API error response")?;
            let message = extract_error_message(error_body);
            tracing::warn!(status = status.as_u16(), error = %message, "upstream error");
            return Err(ProviderError::Api { status, message });
        }

        let raw = response
            .json::<Value>()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to parse Gemini API response")?;

        Ok(raw)
    }
}
