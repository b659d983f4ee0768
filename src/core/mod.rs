//! 核心层：统一错误、响应包装、请求提取器与中间件

pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
