//! Storage status endpoints: which backend is live, and a manual re-probe.

use actix_web::{get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Which backend currently serves requests.
#[derive(Debug, Serialize, ToSchema)]
pub struct StorageStatusBody {
    /// Human-readable backend name, as shown on the home page.
    pub selected: &'static str,
    pub relational: bool,
}

impl StorageStatusBody {
    fn current(state: &HttpState) -> Self {
        let relational = state.storage.is_relational();
        Self {
            selected: if relational {
                "PostgreSQL"
            } else {
                "File Storage"
            },
            relational,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/storage",
    responses((status = 200, description = "Current backend", body = StorageStatusBody)),
    tags = ["storage"],
    operation_id = "storageStatus"
)]
#[get("/storage")]
pub async fn storage_status(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<StorageStatusBody>> {
    Ok(web::Json(StorageStatusBody::current(&state)))
}

/// Re-run the connectivity probe and report the resulting selection.
#[utoipa::path(
    post,
    path = "/api/storage/reprobe",
    responses((status = 200, description = "Backend after the probe", body = StorageStatusBody)),
    tags = ["storage"],
    operation_id = "reprobeStorage"
)]
#[post("/storage/reprobe")]
pub async fn reprobe(state: web::Data<HttpState>) -> ApiResult<web::Json<StorageStatusBody>> {
    state.storage.reprobe().await;
    Ok(web::Json(StorageStatusBody::current(&state)))
}
