//! On-disk record shapes for the JSON document store.
//!
//! Each collection file is a JSON array of these records. They mirror the
//! domain entities field for field so documents stay readable and diffable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CartItem, ContactMessage, Course, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            password: record.password,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub image: String,
}

impl From<CourseRecord> for Course {
    fn from(record: CourseRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            price: record.price,
            image: record.image,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemRecord {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CartItemRecord> for CartItem {
    fn from(record: CartItemRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            course_id: record.course_id,
            quantity: record.quantity,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessageRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessageRecord> for ContactMessage {
    fn from(record: ContactMessageRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            message: record.message,
            created_at: record.created_at,
        }
    }
}

/// The three starter menu entries seeded the first time any operation
/// touches a missing courses file.
pub fn seed_courses() -> Vec<CourseRecord> {
    vec![
        CourseRecord {
            id: 1,
            name: "Margherita Pizza".to_owned(),
            price: 299,
            image: "/images/pizza.jpg".to_owned(),
        },
        CourseRecord {
            id: 2,
            name: "Pasta Alfredo".to_owned(),
            price: 249,
            image: "/images/pasta.jpg".to_owned(),
        },
        CourseRecord {
            id: 3,
            name: "Garlic Bread".to_owned(),
            price: 149,
            image: "/images/garlic.jpg".to_owned(),
        },
    ]
}
