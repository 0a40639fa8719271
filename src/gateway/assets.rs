//! 前端静态资源
//!
//! 未匹配到文件的路径返回入口文档，交给前端路由处理

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// 前端入口文档
pub const INDEX_DOCUMENT: &str = "index.html";

/// 构建带 SPA 回退的静态资源服务
///
/// 回退时保留入口文档自身的状态码（存在为 200，缺失为 404）
pub fn spa_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join(INDEX_DOCUMENT)))
}
