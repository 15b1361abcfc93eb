//! PostgreSQL gateway. One `Transaction` per session; sqlx rolls it back on drop.

use super::{Gateway, Session};
use crate::error::AppError;
use crate::model::{NewProduct, NewUser, Product, User};
use crate::settings::{EmailCollation, Settings};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres, Transaction};
use std::str::FromStr;

const SCHEMA_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS ix_users_email ON users (email)",
    "CREATE INDEX IF NOT EXISTS ix_users_name ON users (name)",
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        price DOUBLE PRECISION NOT NULL CHECK (price > 0),
        in_stock BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_products_name ON products (name)",
];

const CASE_INSENSITIVE_EMAIL_DDL: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS ix_users_email_lower ON users (lower(email))";

pub struct PgGateway {
    pool: PgPool,
    collation: EmailCollation,
}

impl PgGateway {
    pub fn new(pool: PgPool, collation: EmailCollation) -> Self {
        Self { pool, collation }
    }

    /// Build the pool without opening a connection; the first session connects.
    pub fn connect_lazy(settings: &Settings) -> Result<Self, AppError> {
        let options = PgConnectOptions::from_str(&settings.database_url)?;
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .test_before_acquire(true)
            .connect_lazy_with(options);
        Ok(Self::new(pool, settings.email_collation))
    }
}

#[async_trait]
impl Gateway for PgGateway {
    async fn session(&self) -> Result<Box<dyn Session>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgSession {
            tx,
            collation: self.collation,
        }))
    }

    async fn ensure_schema(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for ddl in SCHEMA_DDL {
            sqlx::query(ddl).execute(&mut *tx).await?;
        }
        if self.collation == EmailCollation::CaseInsensitive {
            sqlx::query(CASE_INSENSITIVE_EMAIL_DDL).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        tracing::info!("database schema ready");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "PostgreSQL"
    }
}

struct PgSession {
    tx: Transaction<'static, Postgres>,
    collation: EmailCollation,
}

/// Constraint violations surface as the client errors the service would have raised.
fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return AppError::email_taken();
        }
        if db.is_check_violation() {
            return AppError::Validation("price must be greater than 0".into());
        }
    }
    AppError::Db(e)
}

#[async_trait]
impl Session for PgSession {
    async fn get_user(&mut self, id: i32) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, active, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(user)
    }

    async fn list_users(&mut self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, active, created_at, updated_at FROM users ORDER BY id",
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(users)
    }

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, AppError> {
        let sql = match self.collation {
            EmailCollation::CaseSensitive => {
                "SELECT id, name, email, active, created_at, updated_at FROM users WHERE email = $1 ORDER BY id LIMIT 1"
            }
            EmailCollation::CaseInsensitive => {
                "SELECT id, name, email, active, created_at, updated_at FROM users WHERE lower(email) = lower($1) ORDER BY id LIMIT 1"
            }
        };
        let user = sqlx::query_as::<_, User>(sql)
            .bind(email)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(user)
    }

    async fn insert_user(&mut self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, active, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_write_error)
    }

    async fn update_user(&mut self, user: &User) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET name = $1, email = $2, active = $3, updated_at = $4 WHERE id = $5")
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.active)
            .bind(user.updated_at)
            .bind(user.id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_write_error)?;
        Ok(())
    }

    async fn delete_user(&mut self, id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn get_product(&mut self, id: i32) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, in_stock, created_at, updated_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(product)
    }

    async fn list_products(&mut self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, in_stock, created_at, updated_at FROM products ORDER BY id",
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(products)
    }

    async fn insert_product(&mut self, product: NewProduct) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, in_stock, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, price, in_stock, created_at, updated_at
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.in_stock)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_write_error)
    }

    async fn update_product(&mut self, product: &Product) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE products SET name = $1, description = $2, price = $3, in_stock = $4, updated_at = $5 WHERE id = $6",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.in_stock)
        .bind(product.updated_at)
        .bind(product.id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_write_error)?;
        Ok(())
    }

    async fn delete_product(&mut self, id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}
