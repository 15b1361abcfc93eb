//! Persistence gateway: scoped sessions over the relational store.
//!
//! A [`Session`] wraps one transaction. Call [`Session::commit`] on success;
//! dropping a session without committing rolls every write back.

mod memory;
mod postgres;

use crate::error::AppError;
use crate::model::{NewProduct, NewUser, Product, User};
use crate::settings::Settings;
use async_trait::async_trait;
use std::sync::Arc;

pub use memory::MemoryGateway;
pub use postgres::PgGateway;

/// `DATABASE_URL` prefix that selects [`MemoryGateway`].
pub const MEMORY_URL_SCHEME: &str = "memory:";

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Begin a new scoped session.
    async fn session(&self) -> Result<Box<dyn Session>, AppError>;

    /// Create the `users` and `products` tables if they do not exist yet.
    async fn ensure_schema(&self) -> Result<(), AppError>;

    /// Label reported by the root endpoint.
    fn backend(&self) -> &'static str;
}

#[async_trait]
pub trait Session: Send {
    async fn get_user(&mut self, id: i32) -> Result<Option<User>, AppError>;
    /// All users in primary key order.
    async fn list_users(&mut self) -> Result<Vec<User>, AppError>;
    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, AppError>;
    async fn insert_user(&mut self, user: NewUser) -> Result<User, AppError>;
    async fn update_user(&mut self, user: &User) -> Result<(), AppError>;
    async fn delete_user(&mut self, id: i32) -> Result<(), AppError>;

    async fn get_product(&mut self, id: i32) -> Result<Option<Product>, AppError>;
    async fn list_products(&mut self) -> Result<Vec<Product>, AppError>;
    async fn insert_product(&mut self, product: NewProduct) -> Result<Product, AppError>;
    async fn update_product(&mut self, product: &Product) -> Result<(), AppError>;
    async fn delete_product(&mut self, id: i32) -> Result<(), AppError>;

    /// Make every write of this session durable.
    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}

/// Open the gateway named by `settings.database_url`. Postgres pools connect lazily.
pub fn connect(settings: &Settings) -> Result<Arc<dyn Gateway>, AppError> {
    if settings.database_url.starts_with(MEMORY_URL_SCHEME) {
        tracing::warn!("using the in-memory store; data is lost on exit");
        return Ok(Arc::new(MemoryGateway::new(settings.email_collation)));
    }
    Ok(Arc::new(PgGateway::connect_lazy(settings)?))
}
