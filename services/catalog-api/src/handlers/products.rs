//! Product catalog handlers
//!
//! Mutations arrive as multipart forms so an image can ride along with the
//! scalar fields. The image never touches the database; it goes through the
//! upload pipeline and only the resulting presigned URL is stored.

use axum::extract::multipart::Multipart;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use shelf_auth_core::policy;
use shelf_db::{CreateProduct, ProductRepository, ProductRow, UpdateProduct};
use shelf_storage::IncomingFile;
use shelf_types::Product;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub id: i64,
}

/// Scalar and file fields collected from a multipart form
#[derive(Debug, Default)]
struct ProductForm {
    title: Option<String>,
    price: Option<i64>,
    description: Option<String>,
    available: Option<bool>,
    image: Option<IncomingFile>,
}

async fn read_form(mut multipart: Multipart) -> ApiResult<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        match name.as_str() {
            "title" => form.title = Some(read_text(&name, field).await?),
            "description" => form.description = Some(read_text(&name, field).await?),
            "price" => {
                let text = read_text(&name, field).await?;
                let price = text.parse::<i64>().map_err(|_| {
                    ApiError::Validation("price must be an integer in minor units".to_string())
                })?;
                form.price = Some(price);
            }
            "available" => {
                let text = read_text(&name, field).await?;
                let available = text
                    .parse::<bool>()
                    .map_err(|_| ApiError::Validation("available must be a boolean".to_string()))?;
                form.available = Some(available);
            }
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data: Bytes = field.bytes().await.map_err(multipart_error)?;
                let declared_size = data.len() as u64;
                form.image = Some(IncomingFile {
                    data,
                    declared_size,
                    filename,
                });
            }
            // Unknown fields are ignored, not rejected
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(
    name: &str,
    field: axum::extract::multipart::Field<'_>,
) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|_| ApiError::Validation(format!("field '{name}' must be text")))
}

/// Map a multipart read failure to its HTTP class
///
/// A body that blows through the request size limit errors out mid-stream;
/// that is the same oversize condition the pipeline checks, so it gets the
/// same 413, not a generic 400.
fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if hit_length_limit(&err) {
        return ApiError::PayloadTooLarge;
    }
    ApiError::Validation(err.to_string())
}

fn hit_length_limit(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(inner) = source {
        if inner.downcast_ref::<http_body_util::LengthLimitError>().is_some() {
            return true;
        }
        source = inner.source();
    }
    false
}

/// GET /api/v1/products - public
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let rows = state.products.list().await?;
    Ok(Json(rows.into_iter().map(to_product).collect()))
}

/// GET /api/v1/products/:id - public
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Product>> {
    let row = state
        .products
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(to_product(row)))
}

/// POST /api/v1/products
///
/// Multipart form: `title`, `price`, optional `description` and
/// `available`, plus an `image` file that must pass the upload pipeline.
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<CreateProductResponse>)> {
    policy::can_mutate_catalog(auth.identity)?;

    let form = read_form(multipart).await?;

    let title = form
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("title is required".to_string()))?;
    let price = form
        .price
        .ok_or_else(|| ApiError::Validation("price is required".to_string()))?;
    let image = form
        .image
        .ok_or_else(|| ApiError::Validation("image is required".to_string()))?;

    let image_url = state.uploads.ingest(image).await?;

    let id = state
        .products
        .create(CreateProduct {
            title,
            price,
            description: form.description.unwrap_or_default(),
            available: form.available.unwrap_or(true),
            image_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreateProductResponse { id })))
}

/// PUT /api/v1/products/:id
///
/// Multipart form with any subset of the creation fields; a supplied
/// `image` replaces the stored URL, an absent one leaves it untouched.
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<StatusCode> {
    policy::can_mutate_catalog(auth.identity)?;

    let form = read_form(multipart).await?;

    let current = state
        .products
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let image_url = match form.image {
        Some(image) => state.uploads.ingest(image).await?,
        None => current.image_url,
    };

    state
        .products
        .update(
            id,
            UpdateProduct {
                title: form.title.unwrap_or(current.title),
                price: form.price.unwrap_or(current.price),
                description: form.description.unwrap_or(current.description),
                available: form.available.unwrap_or(current.available),
                image_url,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    policy::can_mutate_catalog(auth.identity)?;
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn to_product(row: ProductRow) -> Product {
    Product {
        id: row.id,
        title: row.title,
        price: row.price,
        description: row.description,
        available: row.available,
        image_url: row.image_url,
        created_at: row.created_at,
    }
}
