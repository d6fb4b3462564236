//! Cart entities: raw rows and the course-joined view served to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A cart row as persisted: one per (user, course) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// A cart row joined with the referenced course's display fields.
///
/// When the course no longer exists the file backend substitutes
/// "Unknown"/0/"" rather than failing the whole fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub quantity: i32,
    pub name: String,
    pub price: i32,
    pub image: String,
}

impl CartLine {
    /// Placeholder fields for a line whose course was deleted.
    pub fn orphaned(item: &CartItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            course_id: item.course_id,
            quantity: item.quantity,
            name: "Unknown".to_owned(),
            price: 0,
            image: String::new(),
        }
    }
}
