//! In-process gateway for tests and local runs (`DATABASE_URL=memory:`).
//!
//! A session holds the table lock for its whole lifetime and works on a copy;
//! commit publishes the copy, drop discards it.

use super::{Gateway, Session};
use crate::error::AppError;
use crate::model::{NewProduct, NewUser, Product, User};
use crate::settings::EmailCollation;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Debug, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    products: BTreeMap<i32, Product>,
    last_user_id: i32,
    last_product_id: i32,
}

#[derive(Clone, Default)]
pub struct MemoryGateway {
    tables: Arc<Mutex<Tables>>,
    collation: EmailCollation,
}

impl MemoryGateway {
    pub fn new(collation: EmailCollation) -> Self {
        Self {
            tables: Arc::default(),
            collation,
        }
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn session(&self) -> Result<Box<dyn Session>, AppError> {
        let committed = self.tables.clone().lock_owned().await;
        let work = (*committed).clone();
        Ok(Box::new(MemorySession {
            committed,
            work,
            collation: self.collation,
        }))
    }

    async fn ensure_schema(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "in-memory"
    }
}

struct MemorySession {
    committed: OwnedMutexGuard<Tables>,
    work: Tables,
    collation: EmailCollation,
}

impl MemorySession {
    /// Mirrors the unique index on `users.email`.
    fn check_email_free(&self, email: &str, except: Option<i32>) -> Result<(), AppError> {
        let taken = self
            .work
            .users
            .values()
            .any(|u| Some(u.id) != except && self.collation.matches(&u.email, email));
        if taken {
            return Err(AppError::email_taken());
        }
        Ok(())
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn get_user(&mut self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.work.users.get(&id).cloned())
    }

    async fn list_users(&mut self) -> Result<Vec<User>, AppError> {
        Ok(self.work.users.values().cloned().collect())
    }

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .work
            .users
            .values()
            .find(|u| self.collation.matches(&u.email, email))
            .cloned())
    }

    async fn insert_user(&mut self, user: NewUser) -> Result<User, AppError> {
        self.check_email_free(&user.email, None)?;
        self.work.last_user_id += 1;
        let user = user.with_id(self.work.last_user_id);
        self.work.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&mut self, user: &User) -> Result<(), AppError> {
        self.check_email_free(&user.email, Some(user.id))?;
        if let Some(row) = self.work.users.get_mut(&user.id) {
            *row = user.clone();
        }
        Ok(())
    }

    async fn delete_user(&mut self, id: i32) -> Result<(), AppError> {
        self.work.users.remove(&id);
        Ok(())
    }

    async fn get_product(&mut self, id: i32) -> Result<Option<Product>, AppError> {
        Ok(self.work.products.get(&id).cloned())
    }

    async fn list_products(&mut self) -> Result<Vec<Product>, AppError> {
        Ok(self.work.products.values().cloned().collect())
    }

    async fn insert_product(&mut self, product: NewProduct) -> Result<Product, AppError> {
        self.work.last_product_id += 1;
        let product = product.with_id(self.work.last_product_id);
        self.work.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(&mut self, product: &Product) -> Result<(), AppError> {
        if let Some(row) = self.work.products.get_mut(&product.id) {
            *row = product.clone();
        }
        Ok(())
    }

    async fn delete_product(&mut self, id: i32) -> Result<(), AppError> {
        self.work.products.remove(&id);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemorySession {
            mut committed, work, ..
        } = *self;
        *committed = work;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_user(email: &str) -> NewUser {
        let now = Utc::now();
        NewUser {
            name: "Test".into(),
            email: email.into(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn dropped_session_rolls_back() {
        let gw = MemoryGateway::default();
        {
            let mut s = gw.session().await.unwrap();
            s.insert_user(new_user("a@x.com")).await.unwrap();
        }
        let mut s = gw.session().await.unwrap();
        assert!(s.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn committed_writes_are_visible_to_later_sessions() {
        let gw = MemoryGateway::default();
        let mut s = gw.session().await.unwrap();
        let first = s.insert_user(new_user("a@x.com")).await.unwrap();
        let second = s.insert_user(new_user("b@x.com")).await.unwrap();
        s.commit().await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        let mut s = gw.session().await.unwrap();
        let ids: Vec<i32> = s.list_users().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let gw = MemoryGateway::default();
        let mut s = gw.session().await.unwrap();
        let first = s.insert_user(new_user("a@x.com")).await.unwrap();
        s.delete_user(first.id).await.unwrap();
        let second = s.insert_user(new_user("a@x.com")).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn email_index_rejects_duplicates_on_insert_and_update() {
        let gw = MemoryGateway::default();
        let mut s = gw.session().await.unwrap();
        s.insert_user(new_user("a@x.com")).await.unwrap();
        let mut b = s.insert_user(new_user("b@x.com")).await.unwrap();
        assert!(matches!(
            s.insert_user(new_user("a@x.com")).await,
            Err(AppError::Conflict(_))
        ));
        b.email = "a@x.com".into();
        assert!(matches!(s.update_user(&b).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn case_insensitive_collation_finds_mixed_case_email() {
        let gw = MemoryGateway::new(EmailCollation::CaseInsensitive);
        let mut s = gw.session().await.unwrap();
        s.insert_user(new_user("Alice@X.com")).await.unwrap();
        assert!(s.find_user_by_email("alice@x.com").await.unwrap().is_some());

        let gw = MemoryGateway::default();
        let mut s = gw.session().await.unwrap();
        s.insert_user(new_user("Alice@X.com")).await.unwrap();
        assert!(s.find_user_by_email("alice@x.com").await.unwrap().is_none());
    }
}
