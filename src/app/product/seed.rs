//! 初始商品数据

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::model::Product;
use crate::config::StoreConfig;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("读取初始数据失败 {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("解析初始数据失败 {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// 按配置加载初始商品
///
/// 指定的文件存在时从文件读取，否则使用内置示例数据。文件存在但无法读取或解析时返回错误。
pub fn load_products(config: &StoreConfig) -> Result<Vec<Product>, SeedError> {
    match &config.seed_file {
        Some(path) if path.exists() => {
            let products = load_from_file(path)?;
            info!("从 {} 加载了 {} 个商品", path.display(), products.len());
            return Ok(products);
        }
        Some(path) => warn!("初始数据文件不存在: {}，改用内置示例数据", path.display()),
        None => {}
    }

    let products = sample_products();
    info!("使用内置示例数据，共 {} 个商品", products.len());
    Ok(products)
}

/// 从 JSON 数组文件读取商品
pub fn load_from_file(path: &Path) -> Result<Vec<Product>, SeedError> {
    let content = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// 内置示例数据
pub fn sample_products() -> Vec<Product> {
    [
        (1, "Laptop", "Electronics", 999.99, 10),
        (2, "Smartphone", "Electronics", 699.99, 25),
        (3, "Coffee Maker", "Home Appliances", 89.99, 15),
        (4, "Desk Chair", "Furniture", 149.5, 8),
        (5, "Running Shoes", "Sports", 79.95, 30),
    ]
    .into_iter()
    .map(|(id, name, category, price, stock)| Product {
        id,
        name: Some(name.to_string()),
        category: Some(category.to_string()),
        price,
        stock: Some(stock),
    })
    .collect()
}
