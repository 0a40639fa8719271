//! 中继端点错误
//!
//! 所有错误在端点边界转换为 `{ "error": string }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::providers::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// 服务端未配置上游密钥
    #[error("Server API key not configured")]
    Configuration,

    /// 客户端请求缺少有效的 prompt
    #[error("Invalid prompt")]
    InvalidPrompt,

    /// 上游返回非成功状态，状态码原样透传
    #[error("API Error: {} - {message}", .status.as_u16())]
    Upstream { status: StatusCode, message: String },

    /// 其他未预期的错误，细节只写日志
    #[error("Server error")]
    Internal(#[source] anyhow::Error),
}

impl From<ProviderError> for RelayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Api { status, message } => RelayError::Upstream { status, message },
            ProviderError::Request(err) => RelayError::Internal(err),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Configuration | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::InvalidPrompt => StatusCode::BAD_REQUEST,
            RelayError::Upstream { status, .. } => *status,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        if let RelayError::Internal(err) = &self {
            tracing::error!("relay failed: {:#}", err);
        }

        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
