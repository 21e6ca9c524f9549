//! Product types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Catalog product entity
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    /// Price in minor currency units
    pub price: i64,
    pub description: String,
    pub available: bool,
    /// Presigned retrieval URL for the product image
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a product
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub title: String,
    pub price: i64,
    pub description: String,
    pub available: bool,
    pub image_url: String,
}

/// Partial update for a product; `None` means leave unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub title: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
}
