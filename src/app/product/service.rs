//! 商品业务服务
//!
//! [`ProductService`] 持有唯一的商品列表，所有读写都经过它。每个操作在一次加锁内
//! 完成，"查找下标再替换/删除" 这类组合操作不会被其他请求打断。

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

use super::model::{Product, ProductInput, SearchCriteria};
use crate::core::error::CoreError;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const NO_MATCHING_PRODUCTS: &str = "No products found matching the search criteria";

/// 新商品 id 的分配方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// 当前商品数 + 1，删除后可能与已有 id 重复
    #[default]
    Length,
    /// 单调递增，已用过的 id 不会再分配
    Sequence,
}

pub fn product_not_found() -> CoreError {
    CoreError::NotFound(PRODUCT_NOT_FOUND.to_string())
}

#[derive(Debug)]
struct Catalog {
    products: Vec<Product>,
    id_strategy: IdStrategy,
    /// 分配过的最大 id
    last_id: i64,
}

impl Catalog {
    fn next_id(&mut self) -> i64 {
        let id = match self.id_strategy {
            IdStrategy::Length => self.products.len() as i64 + 1,
            IdStrategy::Sequence => self.last_id + 1,
        };
        self.last_id = self.last_id.max(id);
        id
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

#[derive(Debug, Clone)]
pub struct ProductService {
    catalog: Arc<Mutex<Catalog>>,
}

impl ProductService {
    pub fn new(id_strategy: IdStrategy) -> Self {
        Self::with_products(Vec::new(), id_strategy)
    }

    /// 使用初始数据创建服务，初始商品保留原有 id
    pub fn with_products(products: Vec<Product>, id_strategy: IdStrategy) -> Self {
        let last_id = products.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            catalog: Arc::new(Mutex::new(Catalog {
                products,
                id_strategy,
                last_id,
            })),
        }
    }

    fn catalog(&self) -> MutexGuard<'_, Catalog> {
        self.catalog.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn count(&self) -> usize {
        self.catalog().products.len()
    }

    /// 按插入顺序返回全部商品
    pub fn list_products(&self) -> Vec<Product> {
        self.catalog().products.clone()
    }

    pub fn get_product(&self, id: i64) -> Result<Product, CoreError> {
        self.catalog()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(product_not_found)
    }

    /// 依次按名称、分类、最低价、最高价过滤，结果为空时返回 `NotFound`
    pub fn search_products(&self, criteria: &SearchCriteria) -> Result<Vec<Product>, CoreError> {
        let mut filtered = self.list_products();
        if criteria.is_empty() {
            debug!("未指定过滤条件，返回全部商品");
        }

        if let Some(name) = &criteria.name {
            debug!("按名称过滤: {}", name);
            let needle = name.to_lowercase();
            filtered.retain(|p| {
                p.name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
            });
        }

        if let Some(category) = &criteria.category {
            debug!("按分类过滤: {}", category);
            let wanted = category.to_lowercase();
            filtered.retain(|p| {
                p.category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase() == wanted)
            });
        }

        if let Some(min_price) = criteria.min_price {
            debug!("按最低价过滤: {}", min_price);
            filtered.retain(|p| p.price >= min_price);
        }

        if let Some(max_price) = criteria.max_price {
            debug!("按最高价过滤: {}", max_price);
            filtered.retain(|p| p.price <= max_price);
        }

        if filtered.is_empty() {
            return Err(CoreError::NotFound(NO_MATCHING_PRODUCTS.to_string()));
        }

        Ok(filtered)
    }

    /// 创建商品并追加到列表末尾
    pub fn create_product(&self, input: ProductInput) -> Product {
        let mut catalog = self.catalog();

        let product = Product {
            id: catalog.next_id(),
            name: input.name.map(|v| v.to_text()),
            category: input.category.map(|v| v.to_text()),
            price: input.price.map_or(f64::NAN, |v| v.to_float()),
            stock: input.stock.and_then(|v| v.to_int()),
        };

        catalog.products.push(product.clone());
        info!("商品已创建: id={}, 当前共 {} 个", product.id, catalog.products.len());

        product
    }

    /// 部分更新：只有真值字段覆盖原值，id 不变
    pub fn update_product(&self, id: i64, input: ProductInput) -> Result<Product, CoreError> {
        let mut catalog = self.catalog();
        let index = catalog.position(id).ok_or_else(product_not_found)?;
        let current = &catalog.products[index];

        let updated = Product {
            id,
            name: match input.name.filter(|v| v.is_truthy()) {
                Some(v) => Some(v.to_text()),
                None => current.name.clone(),
            },
            category: match input.category.filter(|v| v.is_truthy()) {
                Some(v) => Some(v.to_text()),
                None => current.category.clone(),
            },
            price: input
                .price
                .filter(|v| v.is_truthy())
                .map_or(current.price, |v| v.to_float()),
            stock: match input.stock.filter(|v| v.is_truthy()) {
                Some(v) => v.to_int(),
                None => current.stock,
            },
        };

        catalog.products[index] = updated.clone();
        info!("商品已更新: id={}", id);

        Ok(updated)
    }

    /// 删除第一个 id 匹配的商品并返回它
    pub fn delete_product(&self, id: i64) -> Result<Product, CoreError> {
        let mut catalog = self.catalog();
        let index = catalog.position(id).ok_or_else(product_not_found)?;
        let removed = catalog.products.remove(index);
        info!("商品已删除: id={}, 剩余 {} 个", id, catalog.products.len());

        Ok(removed)
    }
}
