//! Shared test doubles for the shell

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use storefront_core::product::{Product, Rating};
use storefront_core::view::ListView;

use crate::error::FetchError;
use crate::render::Render;
use crate::source::ProductSource;

/// Records every view it is asked to render
impl Render for Vec<ListView> {
    fn render(&mut self, view: &ListView) {
        self.push(view.clone());
    }
}

/// In-memory product source with a fixed answer per page
#[derive(Clone)]
pub struct FakeSource {
    pages: Arc<HashMap<u32, Result<Vec<Product>, FetchError>>>,
    calls: Arc<Mutex<Vec<u32>>>,
    latency: Duration,
}

impl FakeSource {
    pub fn new(pages: Vec<(u32, Result<Vec<Product>, FetchError>)>) -> Self {
        Self {
            pages: Arc::new(pages.into_iter().collect()),
            calls: Arc::default(),
            latency: Duration::from_millis(50),
        }
    }

    /// Pages requested so far, in request order
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProductSource for FakeSource {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Product>, FetchError> {
        self.calls.lock().unwrap().push(page);
        tokio::time::sleep(self.latency).await;
        self.pages.get(&page).cloned().unwrap_or_else(|| Ok(vec![]))
    }

    async fn fetch_product(&self, id: u64) -> Result<Product, FetchError> {
        self.pages
            .values()
            .filter_map(|page| page.as_ref().ok())
            .flatten()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: format!("/products/{id}"),
            })
    }
}

pub fn create_test_product(id: u64, title: &str, price: f64, category: &str) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        category: category.to_string(),
        image: format!("https://fakestoreapi.com/img/{id}.jpg"),
        rating: Rating {
            rate: 4.0,
            count: 10,
        },
        description: None,
    }
}
