//! Gemini 中继处理器

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::gateway::{error::RelayError, state::AppState};
use crate::providers::extract_text;

/// 客户端请求 `{ "prompt": string, "systemPrompt"?: string }`
#[derive(Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
}

impl GenerationRequest {
    /// 从请求体解析
    ///
    /// 请求体不是 JSON 对象时按缺少 prompt 处理
    pub fn from_body(body: &[u8]) -> Result<Self, RelayError> {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

        let prompt = value
            .get("prompt")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .ok_or(RelayError::InvalidPrompt)?
            .to_string();

        let system_prompt = value
            .get("systemPrompt")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            prompt,
            system_prompt,
        })
    }

    /// 发往上游的文本，system prompt 与 prompt 之间空一行
    pub fn combined_text(&self) -> String {
        match &self.system_prompt {
            Some(system) => format!("{}\n\n{}", system, self.prompt),
            None => self.prompt.clone(),
        }
    }
}

/// 成功响应
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
    pub raw: Value,
}

/// POST /api/gemini 处理器
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, RelayError> {
    // 密钥检查先于请求体校验
    let client = state.gemini().ok_or(RelayError::Configuration)?;
    let request = GenerationRequest::from_body(&body)?;

    tracing::info!(
        model = client.model(),
        prompt_len = request.prompt.len(),
        system_prompt = request.system_prompt.is_some(),
        "request"
    );

    let raw = client.generate_content(&request.combined_text()).await?;
    let text = extract_text(&raw);

    tracing::info!(model = client.model(), text_len = text.len(), "response");

    Ok(Json(GenerateResponse { text, raw }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<GenerationRequest, RelayError> {
        GenerationRequest::from_body(body.as_bytes())
    }

    #[test]
    fn prompt_alone_is_sent_verbatim() {
        let request = parse(r#"{"prompt": "  hello\nworld "}"#).unwrap();
        assert_eq!(request.system_prompt, None);
        assert_eq!(request.combined_text(), "  hello\nworld ");
    }

    #[test]
    fn system_prompt_is_prepended_with_blank_line() {
        let request = parse(r#"{"prompt": "question", "systemPrompt": "be brief"}"#).unwrap();
        assert_eq!(request.combined_text(), "be brief\n\nquestion");
    }

    #[test]
    fn empty_or_non_string_system_prompt_is_ignored() {
        for body in [
            r#"{"prompt": "q", "systemPrompt": ""}"#,
            r#"{"prompt": "q", "systemPrompt": null}"#,
            r#"{"prompt": "q", "systemPrompt": 7}"#,
        ] {
            assert_eq!(parse(body).unwrap().combined_text(), "q", "body: {body}");
        }
    }

    #[test]
    fn rejects_missing_or_invalid_prompt() {
        for body in [
            "{}",
            r#"{"prompt": ""}"#,
            r#"{"prompt": 42}"#,
            r#"{"prompt": null}"#,
            r#"{"prompt": ["a"]}"#,
            r#"{"prompt": {"text": "a"}}"#,
            r#"["prompt"]"#,
            "not json",
            "",
        ] {
            assert!(
                matches!(parse(body), Err(RelayError::InvalidPrompt)),
                "body: {body}"
            );
        }
    }
}
