//! Integer record id from the last path segment.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Any integer the URL carries. Ids outside the `i32` key range cannot name a
/// row, so they resolve to the entity's `NotFound` rather than a parse error.
#[derive(Clone, Copy, Debug)]
pub struct IdPath(pub i64);

impl IdPath {
    pub fn row_id(self, not_found: fn() -> AppError) -> Result<i32, AppError> {
        i32::try_from(self.0).map_err(|_| not_found())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Validation("id must be an integer".into()))?;
        Ok(IdPath(id))
    }
}
