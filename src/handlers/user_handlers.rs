use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    db,
    error::{ApiError, ApiResult},
    handlers::extractors::UserId,
    handlers::user_dtos::{
        parse_body, ConnectionCheckResponse, CreateUserRequest, MessageResponse,
        UpdateUserRequest,
    },
    models::user_models::{NewUser, User, UserChangeset},
    repositories::user_repository::UserRepository,
    state::AppState,
};

/// `SELECT 1` round trip.
pub async fn test_connection(
    State(state): State<AppState>,
) -> ApiResult<Json<ConnectionCheckResponse>> {
    let result = db::run(&state.pool, UserRepository::ping).await?;

    Ok(Json(ConnectionCheckResponse {
        message: "Database connection successful!",
        result,
    }))
}

/// Every row, unfiltered.
pub async fn get_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = db::run(&state.pool, UserRepository::list).await?;
    Ok(Json(users))
}

pub async fn add_user(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let req: CreateUserRequest = parse_body(payload)?;
    let new_user = NewUser::try_from(req)?;

    db::run(&state.pool, move |conn| {
        UserRepository::insert(conn, &new_user)
    })
    .await?;

    tracing::info!("user added");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User added successfully!",
        }),
    ))
}

/// First row whose `StudentName` matches.
pub async fn get_user(
    State(state): State<AppState>,
    Path(student_name): Path<String>,
) -> ApiResult<Json<User>> {
    let user = db::run(&state.pool, move |conn| {
        UserRepository::find_by_student_name(conn, &student_name)
    })
    .await?;

    user.map(Json).ok_or(ApiError::NotFound)
}

/// First row whose `Email` matches.
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<User>> {
    let user = db::run(&state.pool, move |conn| {
        UserRepository::find_by_email(conn, &email)
    })
    .await?;

    user.map(Json).ok_or(ApiError::NotFound)
}

pub async fn get_user_id(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> ApiResult<Json<User>> {
    let user = db::run(&state.pool, move |conn| UserRepository::find_by_id(conn, id)).await?;

    user.map(Json).ok_or(ApiError::NotFound)
}

/// Writes only the truthy fields of the body. Succeeds whether or not a row
/// with this name exists.
pub async fn update_user(
    State(state): State<AppState>,
    Path(student_name): Path<String>,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<MessageResponse>> {
    let req: UpdateUserRequest = parse_body(payload)?;
    let changes = UserChangeset::try_from(req)?;

    let updated = db::run(&state.pool, move |conn| {
        UserRepository::update_by_student_name(conn, &student_name, &changes)
    })
    .await?;

    tracing::info!(rows = updated, "user update applied");
    Ok(Json(MessageResponse {
        message: "User updated successfully!",
    }))
}

/// 404 when no row had this id.
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = db::run(&state.pool, move |conn| UserRepository::delete_by_id(conn, id)).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound);
    }

    tracing::info!(id, "user deleted");
    Ok(Json(MessageResponse {
        message: "User deleted successfully!",
    }))
}
