//! Product catalog API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ValidatedJson};
use crate::domain::product::{Product, ProductDraft, ProductId, ProductPatch};

/// Create the product router
pub fn create_products_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
}

/// Request body for create and full update
#[derive(Debug, Deserialize, Validate)]
pub struct ProductRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Product name must be between 1 and 100 characters."
    ))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters."))]
    pub description: String,
    #[validate(range(min = 0.01, message = "Price must be greater than 0."))]
    pub price: f64,
    #[serde(default, alias = "stockQuantity")]
    #[validate(range(min = 0, message = "Stock quantity cannot be negative."))]
    pub stock_quantity: i32,
}

impl From<ProductRequest> for ProductDraft {
    fn from(request: ProductRequest) -> Self {
        ProductDraft::new(request.name, request.price)
            .with_description(request.description)
            .with_stock_quantity(request.stock_quantity)
    }
}

/// Request body for partial update
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PatchProductRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Product name must be between 1 and 100 characters."
    ))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters."))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Product price cannot be negative."))]
    pub price: Option<f64>,
    #[serde(alias = "stockQuantity")]
    #[validate(range(min = 0, message = "Stock quantity cannot be negative."))]
    pub stock_quantity: Option<i32>,
}

impl From<PatchProductRequest> for ProductPatch {
    fn from(request: PatchProductRequest) -> Self {
        ProductPatch {
            name: request.name,
            description: request.description,
            price: request.price,
            stock_quantity: request.stock_quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// Product response
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub created_date: String,
    pub updated_date: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id().value(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            price: product.price(),
            stock_quantity: product.stock_quantity(),
            created_date: product.created_date().to_rfc3339(),
            updated_date: product.updated_date().map(|d| d.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub message: String,
}

fn to_responses(products: Vec<Product>) -> Vec<ProductResponse> {
    products.into_iter().map(ProductResponse::from).collect()
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.product_service.list().await?;
    Ok(Json(to_responses(products)))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    debug!(product_id = id, "Getting product");

    let product = state.product_service.get(ProductId::new(id)).await?;
    Ok(Json(product.into()))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = state.product_service.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .product_service
        .update(ProductId::new(id), request.into())
        .await?;
    Ok(Json(product.into()))
}

/// PATCH /api/products/{id}
pub async fn patch_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<PatchProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .product_service
        .patch(ProductId::new(id), request.into())
        .await?;
    Ok(Json(product.into()))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteProductResponse>, ApiError> {
    state.product_service.delete(ProductId::new(id)).await?;

    Ok(Json(DeleteProductResponse {
        message: format!("Product with ID {} has been deleted successfully.", id),
    }))
}

/// GET /api/products/search?name=
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let term = params.name.unwrap_or_default();
    let products = state.product_service.search(&term).await?;
    Ok(Json(to_responses(products)))
}
