//! `/api/v1/users` handlers.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{IdPath, ValidJson};
use crate::model::{UserCreate, UserRead};
use crate::service::UserService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

#[utoipa::path(
    get,
    path = "/api/v1/users/",
    tag = "Users",
    responses((status = 200, description = "All users", body = Vec<UserRead>))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRead>>, AppError> {
    let mut session = state.gateway.session().await?;
    let users = UserService::list(session.as_mut()).await?;
    session.commit().await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserRead),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<Json<UserRead>, AppError> {
    let id = id.row_id(AppError::user_not_found)?;
    let mut session = state.gateway.session().await?;
    let user = UserService::get(session.as_mut(), id).await?;
    session.commit().await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/",
    tag = "Users",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created", body = UserRead),
        (status = 400, description = "Email already registered", body = ErrorBody),
        (status = 422, description = "Invalid body", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<UserCreate>,
) -> Result<(StatusCode, Json<UserRead>), AppError> {
    let mut session = state.gateway.session().await?;
    let user = UserService::create(session.as_mut(), input).await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserCreate,
    responses(
        (status = 200, description = "User replaced", body = UserRead),
        (status = 400, description = "Email already registered", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 422, description = "Invalid body", body = ErrorBody)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    id: IdPath,
    ValidJson(input): ValidJson<UserCreate>,
) -> Result<Json<UserRead>, AppError> {
    let id = id.row_id(AppError::user_not_found)?;
    let mut session = state.gateway.session().await?;
    let user = UserService::update(session.as_mut(), id, input).await?;
    session.commit().await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<StatusCode, AppError> {
    let id = id.row_id(AppError::user_not_found)?;
    let mut session = state.gateway.session().await?;
    UserService::delete(session.as_mut(), id).await?;
    session.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
