use crate::domain::{ObjectId, Product};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::debug;

pub const PRODUCTS_PATH: &str = "/api/product";

/// Shape check on a path id, before any storage call.
fn parse_id(id: &str) -> Result<ObjectId, ApiError> {
    id.parse::<ObjectId>().map_err(|_| ApiError::invalid_id())
}

/// Unwraps the JSON extractor. `Ok(None)` means the body was a literal `null`.
fn read_body(
    body: Result<Json<Option<Product>>, JsonRejection>,
) -> Result<Option<Product>, ApiError> {
    match body {
        Ok(Json(p)) => Ok(p),
        Err(e) => Err(ApiError::InvalidJson(e.body_text())),
    }
}

fn validate(product: &Product) -> Result<(), ApiError> {
    product.validate().map_err(|errors| {
        debug!(?errors, "product failed validation");
        ApiError::Validation(errors)
    })
}

#[utoipa::path(
    get,
    path = "/api/product",
    responses(
        (status = 200, description = "All products", body = [Product]),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .products
        .list_all()
        .await
        .map_err(|e| ApiError::storage("Error retrieving products", e))?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/product/{id}",
    params(
        ("id" = String, Path, description = "24-character hex product id")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Invalid product ID format", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let object_id = parse_id(&id)?;
    let product = state
        .products
        .get_by_id(&object_id)
        .await
        .map_err(|e| ApiError::storage(format!("Error retrieving product {}", id), e))?;

    match product {
        Some(p) => Ok(Json(p)),
        None => Err(ApiError::not_found(id)),
    }
}

#[utoipa::path(
    post,
    path = "/api/product",
    request_body = Product,
    responses(
        (status = 201, description = "Product created", body = Product,
            headers(("location" = String, description = "URL of the created product"))),
        (status = 400, description = "Missing body or validation failure", body = ValidationErrorResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    body: Result<Json<Option<Product>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(mut product) = read_body(body)? else {
        return Err(ApiError::bad_request("Product data is required"));
    };
    validate(&product)?;

    // Ids are store-assigned.
    product.id = None;

    let created = state
        .products
        .create(product)
        .await
        .map_err(|e| ApiError::storage("Error creating product", e))?;

    let location = format!("{}/{}", PRODUCTS_PATH, created.id.as_deref().unwrap_or_default());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

#[utoipa::path(
    put,
    path = "/api/product/{id}",
    params(
        ("id" = String, Path, description = "24-character hex product id")
    ),
    request_body = Product,
    responses(
        (status = 200, description = "Product replaced", body = Product),
        (status = 400, description = "Missing body, invalid id, or validation failure", body = ValidationErrorResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Option<Product>>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let product = read_body(body)?;
    let Some(product) = product.filter(|_| !id.trim().is_empty()) else {
        return Err(ApiError::bad_request("Product data and ID are required"));
    };
    let object_id = parse_id(&id)?;
    validate(&product)?;

    // The path id always wins over whatever the body carries.
    let product = product.with_id(id.clone());

    let updated = state
        .products
        .update(&object_id, product)
        .await
        .map_err(|e| ApiError::storage(format!("Error updating product {}", id), e))?;

    match updated {
        Some(p) => Ok(Json(p)),
        None => Err(ApiError::not_found(id)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/product/{id}",
    params(
        ("id" = String, Path, description = "24-character hex product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Missing or invalid product id", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::bad_request("Product ID is required"));
    }
    let object_id = parse_id(&id)?;

    let deleted = state
        .products
        .delete(&object_id)
        .await
        .map_err(|e| ApiError::storage(format!("Error deleting product {}", id), e))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(id))
    }
}
