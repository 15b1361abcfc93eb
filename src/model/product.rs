use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/v1/products/` and `PUT /api/v1/products/{id}`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    /// Must be greater than 0.
    pub price: f64,
}

/// Row of the `products` table.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductRead {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewProduct {
    pub fn from_create(input: ProductCreate, now: DateTime<Utc>) -> Self {
        Self {
            name: input.name,
            description: input.description,
            price: input.price,
            in_stock: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(self, id: i32) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            in_stock: self.in_stock,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Product {
    /// `in_stock` is not client-writable.
    pub fn overwrite(&mut self, input: ProductCreate) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
    }
}

impl From<Product> for ProductRead {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            in_stock: p.in_stock,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
