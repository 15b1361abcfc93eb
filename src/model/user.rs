use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/v1/users/` and `PUT /api/v1/users/{id}`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
}

/// Row of the `users` table.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user row before the store has assigned its id.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserRead {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    /// New users start active.
    pub fn from_create(input: UserCreate, now: DateTime<Utc>) -> Self {
        Self {
            name: input.name,
            email: input.email,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(self, id: i32) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl User {
    /// Full replace of the client-writable fields. `active` and the timestamps are left alone.
    pub fn overwrite(&mut self, input: UserCreate) {
        self.name = input.name;
        self.email = input.email;
    }
}

impl From<User> for UserRead {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            active: u.active,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
