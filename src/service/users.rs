//! User rules: email must be unused at creation, lookups by id fail with `NotFound`.

use crate::error::AppError;
use crate::model::{NewUser, UserCreate, UserRead};
use crate::store::Session;
use chrono::Utc;

pub struct UserService;

impl UserService {
    pub async fn list(session: &mut dyn Session) -> Result<Vec<UserRead>, AppError> {
        let users = session.list_users().await?;
        tracing::debug!(count = users.len(), "listed users");
        Ok(users.into_iter().map(UserRead::from).collect())
    }

    pub async fn get(session: &mut dyn Session, id: i32) -> Result<UserRead, AppError> {
        let user = session
            .get_user(id)
            .await?
            .ok_or_else(AppError::user_not_found)?;
        Ok(user.into())
    }

    #[tracing::instrument(name = "Create user", skip(session, input), fields(email = %input.email))]
    pub async fn create(session: &mut dyn Session, input: UserCreate) -> Result<UserRead, AppError> {
        if session.find_user_by_email(&input.email).await?.is_some() {
            return Err(AppError::email_taken());
        }
        let user = session
            .insert_user(NewUser::from_create(input, Utc::now()))
            .await?;
        tracing::info!(user_id = user.id, "user created");
        Ok(user.into())
    }

    /// Overwrites `name` and `email`. Neither `updated_at` nor email uniqueness is
    /// handled here; the store's unique index still rejects a taken email.
    #[tracing::instrument(name = "Update user", skip(session, input))]
    pub async fn update(
        session: &mut dyn Session,
        id: i32,
        input: UserCreate,
    ) -> Result<UserRead, AppError> {
        let mut user = session
            .get_user(id)
            .await?
            .ok_or_else(AppError::user_not_found)?;
        user.overwrite(input);
        session.update_user(&user).await?;
        tracing::info!(user_id = id, "user updated");
        Ok(user.into())
    }

    #[tracing::instrument(name = "Delete user", skip(session))]
    pub async fn delete(session: &mut dyn Session, id: i32) -> Result<(), AppError> {
        let user = session
            .get_user(id)
            .await?
            .ok_or_else(AppError::user_not_found)?;
        session.delete_user(user.id).await?;
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}
