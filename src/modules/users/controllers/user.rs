use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use super::dto::{self, UserDto};
use super::services::UserService;
use super::validations::{CreateUser, ListQuery, UpdateUser};
use crate::errors::ApiError;
use crate::response::{Meta, Paginated, Success};

pub async fn get_all(
    State(service): State<UserService>,
    Query(query): Query<ListQuery>,
) -> Result<Paginated<UserDto>, ApiError> {
    let (users, total) = service.get_all(&query).await?;
    Ok(Paginated::new(
        StatusCode::OK,
        "Get all users successfully",
        Meta::new(query.page, query.limit, total),
        dto::to_dtos(users),
    ))
}

pub async fn get_one(
    State(service): State<UserService>,
    Path(id): Path<i32>,
) -> Result<Success<UserDto>, ApiError> {
    let user = service.get_one(id).await?;
    Ok(Success::new(
        StatusCode::OK,
        "Get user successfully",
        UserDto::from(user),
    ))
}

pub async fn create_one(
    State(service): State<UserService>,
    Json(req): Json<CreateUser>,
) -> Result<Success<UserDto>, ApiError> {
    let user = service.create_one(req).await?;
    Ok(Success::new(
        StatusCode::CREATED,
        "Create user successfully",
        UserDto::from(user),
    ))
}

pub async fn update_one(
    State(service): State<UserService>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateUser>,
) -> Result<Success<UserDto>, ApiError> {
    let user = service.update_one(id, req).await?;
    Ok(Success::new(
        StatusCode::OK,
        "Update user successfully",
        UserDto::from(user),
    ))
}

pub async fn delete_one(
    State(service): State<UserService>,
    Path(id): Path<i32>,
) -> Result<Success<serde_json::Value>, ApiError> {
    service.delete_one(id).await?;
    Ok(Success::new(
        StatusCode::OK,
        "Delete user successfully",
        serde_json::Value::Null,
    ))
}
