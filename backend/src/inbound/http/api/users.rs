//! Users API handlers. Responses never include credential material.

use actix_web::{delete, get, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{DomainError, UserProfile};
use crate::inbound::http::api::Message;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

pub(crate) const USER_NOT_FOUND: &str = "User not found";

/// Request body for updating a user's profile fields.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

/// Listing users is intentionally unimplemented.
#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 501, description = "Not implemented", body = ErrorBody)),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users() -> ApiResult<web::Json<Vec<UserProfile>>> {
    Err(DomainError::not_implemented("Not implemented"))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user, without credentials", body = UserProfile),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<UserProfile>> {
    let user = state
        .users
        .user_by_id(path.into_inner())
        .await?
        .ok_or_else(|| DomainError::not_found(USER_NOT_FOUND))?;
    Ok(web::Json(user))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "The updated user", body = UserProfile),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<UserProfile>> {
    let id = path.into_inner();
    state
        .users
        .update_user(id, &payload.name, &payload.email)
        .await?;
    let updated = state
        .users
        .user_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(USER_NOT_FOUND))?;
    Ok(web::Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted (idempotent)", body = Message),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Message>> {
    state.users.delete_user(path.into_inner()).await?;
    Ok(web::Json(Message::new("User deleted successfully")))
}
