//! 商品目录服务入口

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;

use product_catalog::app::product::{handler::AppState, seed, service::ProductService};
use product_catalog::config::load_config;
use product_catalog::create_router;
use product_catalog::infrastructure::logger::Logger;

/// 内存商品目录 REST API 服务
#[derive(Parser, Debug)]
#[command(name = "product_catalog")]
#[command(version)]
struct Args {
    /// 配置文件路径，默认依次查找 config.toml、config/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖配置中的监听端口
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, source) = load_config(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.http.port = port;
    }
    config.validate()?;

    // 文件日志需要一直持有 guard
    let _guard = Logger::init(&config.logging)?;

    match &source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let products = seed::load_products(&config.store)?;
    let state = AppState {
        product_service: ProductService::with_products(products, config.store.id_strategy),
    };
    let app = create_router(state, &config.http.static_dir);

    let addr = (config.http.bind_address.as_str(), config.http.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}:{}", addr.0, addr.1))?;

    info!("🚀 服务器运行在 http://{}", listener.local_addr()?);
    info!("📖 API 端点:");
    info!("   GET    /api/products         - 获取所有商品");
    info!("   GET    /api/products/search  - 搜索商品 (name, category, minPrice, maxPrice)");
    info!("   GET    /api/products/:id     - 获取特定商品");
    info!("   POST   /api/products         - 创建商品");
    info!("   PUT    /api/products/:id     - 更新商品");
    info!("   DELETE /api/products/:id     - 删除商品");
    info!("   静态文件目录: {}", config.http.static_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务器已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("监听退出信号失败: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在关闭服务器...");
}
