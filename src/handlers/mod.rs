//! Route handlers: one session per request, committed only when the service succeeds.

pub mod health;
pub mod products;
pub mod users;
