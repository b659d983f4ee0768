//! # 商品目录服务
//!
//! 基于 Axum 的内存商品目录 REST API，包括：
//! - 商品的增删改查 (`/api/products`)
//! - 按名称、分类、价格区间搜索
//! - 根路径下的静态文件服务
//!
//! 分层结构：`app` 为业务层，`core` 为错误/响应/中间件等核心层，
//! `infrastructure` 为日志等基础设施，`config` 为配置加载。

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::product::service::ProductService;
pub use app::routes::create_router;
