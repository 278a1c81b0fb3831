//! Product Endpoints

use super::{ApiClient, Navigator};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::Product;
use crate::storage::KeyValueStore;

/// Image endpoint for a product; usable in `<img src>` without a client
pub fn product_image_url(config: &AppConfig, id: i64) -> String {
    format!("{}?id={}", config.endpoint("product/displayproductimage"), id)
}

impl<S: KeyValueStore, N: Navigator> ApiClient<S, N> {
    pub async fn view_all_products(&self) -> Result<Vec<Product>, ApiError> {
        let products: Vec<Product> = self.get_json("product/viewallproducts").await?;
        log::info!("[api] fetched {} products", products.len());
        Ok(products)
    }
}
