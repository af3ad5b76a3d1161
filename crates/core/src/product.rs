use serde::{Deserialize, Serialize};

/// Product rating as reported by the store API
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// Product record from the store API
///
/// Records are immutable once fetched. Fields the API sends that are not
/// listed here are ignored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parse a page of products from a JSON array body
pub fn parse_product_page(body: &str) -> Result<Vec<Product>, serde_json::Error> {
    serde_json::from_str(body)
}

/// Parse a single product from a JSON object body
pub fn parse_product(body: &str) -> Result<Product, serde_json::Error> {
    serde_json::from_str(body)
}
