//! Course (menu item) entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalogue entry users can order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Course {
    /// Backend-assigned identifier, immutable once assigned.
    pub id: i32,
    pub name: String,
    /// Whole currency units, never negative.
    pub price: i32,
    /// Reference or path to the item's picture.
    pub image: String,
}

/// Validation failures for course input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    #[error("course name must not be empty")]
    EmptyName,
    #[error("course price must not be negative")]
    NegativePrice,
}

/// Validated fields for creating or updating a course.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub price: i32,
    pub image: String,
}

impl NewCourse {
    /// Validate raw input into a course payload.
    pub fn try_from_parts(
        name: &str,
        price: i32,
        image: &str,
    ) -> Result<Self, CourseValidationError> {
        if name.trim().is_empty() {
            return Err(CourseValidationError::EmptyName);
        }
        if price < 0 {
            return Err(CourseValidationError::NegativePrice);
        }
        Ok(Self {
            name: name.to_owned(),
            price,
            image: image.to_owned(),
        })
    }
}
