//! OpenAPI document for every route, served as JSON.

use crate::error::ErrorBody;
use crate::handlers::{health, products, users};
use crate::model::{ProductCreate, ProductRead, UserCreate, UserRead};
use axum::Json;
use utoipa::OpenApi;

pub const DOCS_PATH: &str = "/docs";

#[derive(OpenApi)]
#[openapi(
    info(title = "Microservice API", description = "Users and products backed by PostgreSQL"),
    paths(
        health::health,
        health::readiness,
        health::root,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
    ),
    components(schemas(
        UserCreate,
        UserRead,
        ProductCreate,
        ProductRead,
        ErrorBody,
        health::HealthBody,
        health::ReadyBody,
        health::RootBody,
    )),
    tags(
        (name = "Health"),
        (name = "Users"),
        (name = "Products")
    )
)]
pub struct ApiDoc;

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
