//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the JSON API. The
//! document is served at `/api/openapi.json` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{CartLine, ContactMessage, Course, UserProfile};
use crate::inbound::http::api::cart::QuantityPayload;
use crate::inbound::http::api::contacts::ContactPayload;
use crate::inbound::http::api::courses::CoursePayload;
use crate::inbound::http::api::storage::StorageStatusBody;
use crate::inbound::http::api::users::UserPayload;
use crate::inbound::http::api::Message;
use crate::inbound::http::error::ErrorBody;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login or /register.",
            ))),
        );
    }
}

/// OpenAPI document for the JSON API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Restaurant ordering API",
        description = "JSON CRUD surface for courses, users, contact messages, and carts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::api::courses::list_courses,
        crate::inbound::http::api::courses::create_course,
        crate::inbound::http::api::courses::get_course,
        crate::inbound::http::api::courses::update_course,
        crate::inbound::http::api::courses::delete_course,
        crate::inbound::http::api::users::list_users,
        crate::inbound::http::api::users::get_user,
        crate::inbound::http::api::users::update_user,
        crate::inbound::http::api::users::delete_user,
        crate::inbound::http::api::contacts::list_contacts,
        crate::inbound::http::api::contacts::create_contact,
        crate::inbound::http::api::contacts::get_contact,
        crate::inbound::http::api::contacts::update_contact,
        crate::inbound::http::api::contacts::delete_contact,
        crate::inbound::http::api::cart::get_cart,
        crate::inbound::http::api::cart::clear_cart,
        crate::inbound::http::api::cart::add_to_cart,
        crate::inbound::http::api::cart::set_quantity,
        crate::inbound::http::api::storage::storage_status,
        crate::inbound::http::api::storage::reprobe,
    ),
    components(schemas(
        Course,
        CoursePayload,
        UserProfile,
        UserPayload,
        ContactMessage,
        ContactPayload,
        CartLine,
        QuantityPayload,
        StorageStatusBody,
        Message,
        ErrorBody,
    )),
    tags(
        (name = "courses", description = "Menu item CRUD"),
        (name = "users", description = "User profile CRUD"),
        (name = "contacts", description = "Contact message CRUD"),
        (name = "cart", description = "Session-scoped cart operations"),
        (name = "storage", description = "Backend selection status")
    )
)]
pub struct ApiDoc;
