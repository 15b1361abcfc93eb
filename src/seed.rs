//! Sample rows for a fresh database.

use crate::error::AppError;
use crate::model::{NewProduct, NewUser};
use crate::store::Gateway;
use chrono::Utc;

const SAMPLE_USERS: &[(&str, &str, bool)] = &[
    ("John Doe", "john@example.com", true),
    ("Jane Smith", "jane@example.com", true),
    ("Bob Johnson", "bob@example.com", false),
];

const SAMPLE_PRODUCTS: &[(&str, &str, f64, bool)] = &[
    ("Laptop", "High-performance laptop for development", 1299.99, true),
    ("Monitor", "4K Ultra HD Monitor", 499.99, true),
    ("Keyboard", "Mechanical RGB Keyboard", 149.99, false),
    ("Mouse", "Wireless Mouse with ergonomic design", 79.99, true),
];

#[derive(Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    /// At least one user already existed; nothing was written.
    Skipped,
    Seeded { users: usize, products: usize },
}

/// Insert the sample users and products in one session, unless users already exist.
pub async fn seed_sample_data(gateway: &dyn Gateway) -> Result<SeedOutcome, AppError> {
    let mut session = gateway.session().await?;
    if !session.list_users().await?.is_empty() {
        return Ok(SeedOutcome::Skipped);
    }

    let now = Utc::now();
    for &(name, email, active) in SAMPLE_USERS {
        session
            .insert_user(NewUser {
                name: name.into(),
                email: email.into(),
                active,
                created_at: now,
                updated_at: now,
            })
            .await?;
    }
    for &(name, description, price, in_stock) in SAMPLE_PRODUCTS {
        session
            .insert_product(NewProduct {
                name: name.into(),
                description: description.into(),
                price,
                in_stock,
                created_at: now,
                updated_at: now,
            })
            .await?;
    }
    session.commit().await?;

    Ok(SeedOutcome::Seeded {
        users: SAMPLE_USERS.len(),
        products: SAMPLE_PRODUCTS.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryGateway;

    #[tokio::test]
    async fn seeds_once() {
        let gw = MemoryGateway::default();
        assert_eq!(
            seed_sample_data(&gw).await.unwrap(),
            SeedOutcome::Seeded { users: 3, products: 4 }
        );
        assert_eq!(seed_sample_data(&gw).await.unwrap(), SeedOutcome::Skipped);

        let mut s = gw.session().await.unwrap();
        let users = s.list_users().await.unwrap();
        assert_eq!(users.len(), 3);
        assert!(users.iter().any(|u| u.email == "bob@example.com" && !u.active));
        let products = s.list_products().await.unwrap();
        assert!(products.iter().any(|p| p.name == "Keyboard" && !p.in_stock));
    }
}
