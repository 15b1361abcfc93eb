//! Resource services: business rules between the HTTP surface and a store session.

mod products;
mod users;
mod validation;
pub use products::ProductService;
pub use users::UserService;
pub use validation::Validate;
