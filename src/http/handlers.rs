//! Product endpoint handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::query::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::catalog::validation::validate_input;
use crate::catalog::{mapper, CatalogError, PagedResponse, Product, ProductInput, ProductQuery};
use crate::http::error::ApiError;
use crate::http::extract::ProductId;
use crate::http::server::AppState;

/// Query string of `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub query: Option<String>,
    pub category: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Body of a successful create.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreatedResponse {
    pub message: String,
    pub data: Product,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub local_products: usize,
}

/// `GET /api/products`: upstream listing, filtered and paginated.
pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PagedResponse<Product>>, ApiError> {
    let Query(params) = params?;

    // Pagination is checked before the upstream is touched.
    let query = ProductQuery::new(
        params.query,
        params.category,
        params.page.unwrap_or(DEFAULT_PAGE),
        params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    )?;

    let external = state.catalog.list_products().await?;
    let products = mapper::map_products(external, Utc::now());
    let page = query.apply(products);

    tracing::debug!(
        total = page.total,
        returned = page.items.len(),
        page = page.page,
        page_size = page.page_size,
        "Listed upstream products"
    );
    Ok(Json(page))
}

/// `GET /api/products/{id}`: one upstream product.
pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Json<Product>, ApiError> {
    let external = state
        .catalog
        .get_product(id)
        .await
        .map_err(|e| ApiError::from_lookup(e, id))?;

    Ok(Json(mapper::map_product(external, Utc::now())))
}

/// `GET /api/categories`: upstream category names.
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.catalog.list_categories().await?))
}

/// `GET /api/local-products`
pub async fn list_local_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.list())
}

/// `GET /api/local-products/{id}`
pub async fn get_local_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .store
        .get(id)
        .ok_or_else(|| CatalogError::NotFound(format!("Local product with ID {} not found.", id)))?;
    Ok(Json(product))
}

/// `POST /api/products`: validate, then store locally.
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    validate_input(&input)?;

    let created = state.store.create(input);
    let location = format!("/api/local-products/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreatedResponse {
            message: "Product created successfully.".to_string(),
            data: created,
        }),
    ))
}

/// `DELETE /api/products/{id}`: remove a local product.
pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete(id) {
        return Err(CatalogError::NotFound(format!("Product with id {} not found.", id)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "operational".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        local_products: state.store.len(),
    })
}

/// Any path no route claims.
pub async fn fallback(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}.", uri.path()))
}
