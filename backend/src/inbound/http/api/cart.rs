//! Cart API handlers. All routes require a signed-in user and answer
//! `401 {"error": "Please login first"}` otherwise.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{CartLine, DomainError};
use crate::inbound::http::api::courses::COURSE_NOT_FOUND;
use crate::inbound::http::api::Message;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for setting a cart line's quantity.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuantityPayload {
    pub quantity: i32,
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "The signed-in user's cart", body = [CartLine]),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["cart"],
    operation_id = "getCart"
)]
#[get("/cart")]
pub async fn get_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CartLine>>> {
    let user = session.require_user()?;
    Ok(web::Json(state.carts.cart_for_user(user.id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart emptied", body = Message),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["cart"],
    operation_id = "clearCart"
)]
#[delete("/cart")]
pub async fn clear_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Message>> {
    let user = session.require_user()?;
    state.carts.clear_cart(user.id).await?;
    Ok(web::Json(Message::new("Cart cleared successfully")))
}

#[utoipa::path(
    post,
    path = "/api/cart/{courseId}",
    params(("courseId" = i32, Path, description = "Course id")),
    responses(
        (status = 201, description = "Course added", body = Message),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 404, description = "No such course", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["cart"],
    operation_id = "addToCart"
)]
#[post("/cart/{course_id}")]
pub async fn add_to_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user()?;
    let course_id = path.into_inner();
    if state.courses.course_by_id(course_id).await?.is_none() {
        return Err(DomainError::not_found(COURSE_NOT_FOUND));
    }
    state.carts.add_to_cart(user.id, course_id, 1).await?;
    Ok(HttpResponse::Created().json(Message::new("Course added to cart")))
}

#[utoipa::path(
    put,
    path = "/api/cart/{courseId}",
    params(("courseId" = i32, Path, description = "Course id")),
    request_body = QuantityPayload,
    responses(
        (status = 200, description = "Quantity updated", body = Message),
        (status = 400, description = "Quantity below 1", body = ErrorBody),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["cart"],
    operation_id = "setCartQuantity"
)]
#[put("/cart/{course_id}")]
pub async fn set_quantity(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<QuantityPayload>,
) -> ApiResult<web::Json<Message>> {
    let user = session.require_user()?;
    if payload.quantity < 1 {
        return Err(DomainError::invalid_request("Quantity must be at least 1"));
    }
    state
        .carts
        .set_quantity(user.id, path.into_inner(), payload.quantity)
        .await?;
    Ok(web::Json(Message::new("Cart updated successfully")))
}
