//! `/api/v1/products` handlers.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{IdPath, ValidJson};
use crate::model::{ProductCreate, ProductRead};
use crate::service::ProductService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

#[utoipa::path(
    get,
    path = "/api/v1/products/",
    tag = "Products",
    responses((status = 200, description = "All products", body = Vec<ProductRead>))
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductRead>>, AppError> {
    let mut session = state.gateway.session().await?;
    let products = ProductService::list(session.as_mut()).await?;
    session.commit().await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ProductRead),
        (status = 404, description = "Product not found", body = ErrorBody)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<Json<ProductRead>, AppError> {
    let id = id.row_id(AppError::product_not_found)?;
    let mut session = state.gateway.session().await?;
    let product = ProductService::get(session.as_mut(), id).await?;
    session.commit().await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/v1/products/",
    tag = "Products",
    request_body = ProductCreate,
    responses(
        (status = 201, description = "Product created", body = ProductRead),
        (status = 422, description = "Invalid body or price not greater than 0", body = ErrorBody)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<ProductCreate>,
) -> Result<(StatusCode, Json<ProductRead>), AppError> {
    let mut session = state.gateway.session().await?;
    let product = ProductService::create(session.as_mut(), input).await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductCreate,
    responses(
        (status = 200, description = "Product replaced", body = ProductRead),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 422, description = "Invalid body", body = ErrorBody)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    id: IdPath,
    ValidJson(input): ValidJson<ProductCreate>,
) -> Result<Json<ProductRead>, AppError> {
    let id = id.row_id(AppError::product_not_found)?;
    let mut session = state.gateway.session().await?;
    let product = ProductService::update(session.as_mut(), id, input).await?;
    session.commit().await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorBody)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<StatusCode, AppError> {
    let id = id.row_id(AppError::product_not_found)?;
    let mut session = state.gateway.session().await?;
    ProductService::delete(session.as_mut(), id).await?;
    session.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
