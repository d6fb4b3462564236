//! JSON API handlers mirroring the page flows as plain CRUD.
//!
//! Every endpoint answers JSON; failures share the `{"error": <message>}`
//! shape produced by the error mapping.

use actix_web::web;
use serde::Serialize;
use utoipa::ToSchema;

pub mod cart;
pub mod contacts;
pub mod courses;
pub mod storage;
pub mod users;

/// JSON acknowledgement body for mutations without a resource to return.
#[derive(Debug, Serialize, ToSchema)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Register every API route on the given scope config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(courses::list_courses)
        .service(courses::create_course)
        .service(courses::get_course)
        .service(courses::update_course)
        .service(courses::delete_course)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(contacts::list_contacts)
        .service(contacts::create_contact)
        .service(contacts::get_contact)
        .service(contacts::update_contact)
        .service(contacts::delete_contact)
        .service(cart::get_cart)
        .service(cart::clear_cart)
        .service(cart::add_to_cart)
        .service(cart::set_quantity)
        .service(storage::storage_status)
        .service(storage::reprobe);
}
