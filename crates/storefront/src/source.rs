use std::future::Future;

use storefront_core::product::{parse_product, parse_product_page, Product};

use crate::error::FetchError;

pub const DEFAULT_API_BASE: &str = "https://fakestoreapi.com";
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Where product records come from
///
/// Implementations report failures as [`FetchError`] and never retry.
pub trait ProductSource: Clone + Send + Sync + 'static {
    /// Fetch one page of the product collection (1-indexed)
    fn fetch_page(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<Vec<Product>, FetchError>> + Send;

    /// Fetch a single product by id
    fn fetch_product(&self, id: u64) -> impl Future<Output = Result<Product, FetchError>> + Send;
}

/// Product source backed by the store REST API
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    page_size: usize,
}

impl HttpSource {
    pub fn new(base_url: &str, page_size: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: page_size.max(1),
        }
    }

    pub fn from_global(global: &crate::Global) -> Self {
        Self::new(&global.api_base, global.page_size)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/products?limit={}&page={page}",
            self.base_url, self.page_size
        )
    }

    pub fn product_url(&self, id: u64) -> String {
        format!("{}/products/{id}", self.base_url)
    }

    async fn get_body(&self, url: &str) -> Result<String, FetchError> {
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

impl ProductSource for HttpSource {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Product>, FetchError> {
        let url = self.page_url(page);
        let body = self.get_body(&url).await?;

        parse_product_page(&body).map_err(|e| FetchError::Malformed {
            url,
            message: e.to_string(),
        })
    }

    async fn fetch_product(&self, id: u64) -> Result<Product, FetchError> {
        let url = self.product_url(id);
        let body = self.get_body(&url).await?;

        parse_product(&body).map_err(|e| FetchError::Malformed {
            url,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        let source = HttpSource::new(DEFAULT_API_BASE, 10);
        assert_eq!(
            source.page_url(3),
            "https://fakestoreapi.com/products?limit=10&page=3"
        );
    }

    #[test]
    fn test_product_url() {
        let source = HttpSource::new(DEFAULT_API_BASE, 10);
        assert_eq!(source.product_url(7), "https://fakestoreapi.com/products/7");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let source = HttpSource::new("http://localhost:8080/", 5);
        assert_eq!(source.base_url(), "http://localhost:8080");
        assert_eq!(
            source.page_url(1),
            "http://localhost:8080/products?limit=5&page=1"
        );
    }

    #[test]
    fn test_page_size_at_least_one() {
        let source = HttpSource::new(DEFAULT_API_BASE, 0);
        assert!(source.page_url(1).contains("limit=1&"));
    }
}
