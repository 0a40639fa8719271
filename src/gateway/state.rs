//! Gateway 应用状态

use std::sync::Arc;

use crate::providers::GeminiClient;

/// Gateway 应用状态
///
/// 启动时构造，请求之间只读共享
#[derive(Clone)]
pub struct AppState {
    gemini: Option<Arc<GeminiClient>>,
}

impl AppState {
    /// `gemini` 为 `None` 表示未配置上游密钥
    pub fn new(gemini: Option<GeminiClient>) -> Self {
        Self {
            gemini: gemini.map(Arc::new),
        }
    }

    pub fn gemini(&self) -> Option<&GeminiClient> {
        self.gemini.as_deref()
    }
}
