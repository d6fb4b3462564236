//! Contact messages API handlers.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{ContactMessage, DomainError, NewContactMessage};
use crate::inbound::http::api::Message;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

pub(crate) const CONTACT_NOT_FOUND: &str = "Contact not found";

/// Request body for creating or updating a contact message.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl From<ContactPayload> for NewContactMessage {
    fn from(payload: ContactPayload) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            message: payload.message,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/contacts",
    responses(
        (status = 200, description = "All messages, newest first", body = [ContactMessage]),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ContactMessage>>> {
    Ok(web::Json(state.contacts.contacts().await?))
}

#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = ContactPayload,
    responses(
        (status = 201, description = "Message stored", body = ContactMessage),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactPayload>,
) -> ApiResult<HttpResponse> {
    let created = state
        .contacts
        .create_contact(&payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    params(("id" = i32, Path, description = "Contact message id")),
    responses(
        (status = 200, description = "The message", body = ContactMessage),
        (status = 404, description = "No such message", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ContactMessage>> {
    let contact = state
        .contacts
        .contact_by_id(path.into_inner())
        .await?
        .ok_or_else(|| DomainError::not_found(CONTACT_NOT_FOUND))?;
    Ok(web::Json(contact))
}

#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    params(("id" = i32, Path, description = "Contact message id")),
    request_body = ContactPayload,
    responses(
        (status = 200, description = "The updated message", body = ContactMessage),
        (status = 404, description = "No such message", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<ContactPayload>,
) -> ApiResult<web::Json<ContactMessage>> {
    let id = path.into_inner();
    state
        .contacts
        .update_contact(id, &payload.into_inner().into())
        .await?;
    let updated = state
        .contacts
        .contact_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(CONTACT_NOT_FOUND))?;
    Ok(web::Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    params(("id" = i32, Path, description = "Contact message id")),
    responses(
        (status = 200, description = "Deleted (idempotent)", body = Message),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Message>> {
    state.contacts.delete_contact(path.into_inner()).await?;
    Ok(web::Json(Message::new("Contact deleted successfully")))
}
