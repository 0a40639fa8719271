//! HTTP 请求处理器

pub mod generate;

pub use generate::handle_generate;
