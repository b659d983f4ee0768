//! 商品数据模型

use serde::{Deserialize, Serialize};

use super::coerce::{parse_float, FieldValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// 无法解析的价格为 NaN，序列化为 `null`
    pub price: f64,
    /// 无法解析的库存为 `None`，序列化为 `null`
    pub stock: Option<i64>,
}

/// 创建/更新商品的请求体
///
/// 字段都是可选的：创建时缺失的字段按无法解析处理，更新时只有真值字段会生效。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<FieldValue>,
    #[serde(default)]
    pub category: Option<FieldValue>,
    #[serde(default)]
    pub price: Option<FieldValue>,
    #[serde(default)]
    pub stock: Option<FieldValue>,
}

/// 搜索查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
}

/// 解析后的搜索条件，`None` 表示跳过该过滤器
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl From<SearchQuery> for SearchCriteria {
    fn from(query: SearchQuery) -> Self {
        // 空字符串与缺失参数等价
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());

        Self {
            name: present(query.name),
            category: present(query.category),
            min_price: present(query.min_price).map(|v| parse_float(&v)),
            max_price: present(query.max_price).map(|v| parse_float(&v)),
        }
    }
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_serialization() {
        let product = Product {
            id: 1,
            name: Some("Laptop".to_string()),
            category: Some("Electronics".to_string()),
            price: 999.99,
            stock: Some(10),
        };
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({ "id": 1, "name": "Laptop", "category": "Electronics", "price": 999.99, "stock": 10 })
        );
    }

    #[test]
    fn test_unparsable_numbers_serialize_as_null() {
        let product = Product {
            id: 2,
            name: None,
            category: None,
            price: f64::NAN,
            stock: None,
        };
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({ "id": 2, "price": null, "stock": null })
        );
    }

    #[test]
    fn test_search_criteria_skips_empty_params() {
        let query = SearchQuery {
            name: Some(String::new()),
            category: Some("Books".to_string()),
            min_price: Some("10".to_string()),
            max_price: None,
        };
        let criteria = SearchCriteria::from(query);
        assert_eq!(criteria.name, None);
        assert_eq!(criteria.category.as_deref(), Some("Books"));
        assert_eq!(criteria.min_price, Some(10.0));
        assert_eq!(criteria.max_price, None);
        assert!(SearchCriteria::from(SearchQuery::default()).is_empty());
    }
}
