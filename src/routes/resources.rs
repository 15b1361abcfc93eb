//! CRUD routes. Collections answer with and without the trailing slash.

use crate::handlers::{products, users};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/users", get(users::list_users).post(users::create_user))
        .route("/api/v1/users/", get(users::list_users).post(users::create_user))
        .route(
            "/api/v1/users/:id",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/products", get(products::list_products).post(products::create_product))
        .route("/api/v1/products/", get(products::list_products).post(products::create_product))
        .route(
            "/api/v1/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
