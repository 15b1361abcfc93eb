//! Entity shapes: client input, stored row and read view, one independent struct each.

mod product;
mod user;

pub use product::{NewProduct, Product, ProductCreate, ProductRead};
pub use user::{NewUser, User, UserCreate, UserRead};
