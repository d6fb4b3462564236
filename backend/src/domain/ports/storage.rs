//! Ports for the four entity collections and the backend selector.
//!
//! Each backend (relational, file) implements all four store traits; the
//! storage adapter implements them too by delegating to whichever backend
//! the connectivity probe selected.

use async_trait::async_trait;

use crate::domain::{
    CartLine, ContactMessage, Course, NewContactMessage, NewCourse, NewUser, User, UserProfile,
};

/// Persistence errors raised by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backend could not be reached.
    #[error("storage connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("storage query failed: {message}")]
    Query { message: String },
}

impl StorageError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<StorageError> for crate::domain::DomainError {
    fn from(err: StorageError) -> Self {
        crate::domain::DomainError::internal(err.to_string())
    }
}

/// User persistence operations. There is deliberately no list-all: the
/// corresponding API endpoint answers 501.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return the stored record with its assigned id.
    async fn create_user(&self, user: &NewUser) -> Result<User, StorageError>;

    /// Fetch a user by email, hash included (login verification only).
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Fetch a caller-safe user view by id.
    async fn user_by_id(&self, id: i32) -> Result<Option<UserProfile>, StorageError>;

    /// Update name and email; silently succeeds when the id is absent.
    async fn update_user(&self, id: i32, name: &str, email: &str) -> Result<(), StorageError>;

    /// Delete by id; idempotent.
    async fn delete_user(&self, id: i32) -> Result<(), StorageError>;
}

/// Course catalogue operations.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Insert a course and return the stored record with its assigned id.
    async fn create_course(&self, course: &NewCourse) -> Result<Course, StorageError>;

    /// All courses, id ascending.
    async fn courses(&self) -> Result<Vec<Course>, StorageError>;

    /// Fetch by id; `None` when no such course.
    async fn course_by_id(&self, id: i32) -> Result<Option<Course>, StorageError>;

    /// Update all mutable fields; silently succeeds when the id is absent.
    async fn update_course(&self, id: i32, course: &NewCourse) -> Result<(), StorageError>;

    /// Delete by id; idempotent.
    async fn delete_course(&self, id: i32) -> Result<(), StorageError>;
}

/// Per-user cart operations.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Add a course to the user's cart. Adding an already-present course
    /// increments the existing row's quantity instead of inserting.
    async fn add_to_cart(
        &self,
        user_id: i32,
        course_id: i32,
        quantity: i32,
    ) -> Result<(), StorageError>;

    /// The user's cart joined with course display fields, id ascending.
    async fn cart_for_user(&self, user_id: i32) -> Result<Vec<CartLine>, StorageError>;

    /// Set the quantity of an existing row; silent when absent.
    async fn set_quantity(
        &self,
        user_id: i32,
        course_id: i32,
        quantity: i32,
    ) -> Result<(), StorageError>;

    /// Remove one course from the cart; no-op when absent.
    async fn remove_from_cart(&self, user_id: i32, course_id: i32) -> Result<(), StorageError>;

    /// Remove every row belonging to the user.
    async fn clear_cart(&self, user_id: i32) -> Result<(), StorageError>;
}

/// Contact message operations.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Insert a message and return the stored record with its assigned id.
    async fn create_contact(
        &self,
        contact: &NewContactMessage,
    ) -> Result<ContactMessage, StorageError>;

    /// All messages, newest first.
    async fn contacts(&self) -> Result<Vec<ContactMessage>, StorageError>;

    /// Fetch by id; `None` when no such message.
    async fn contact_by_id(&self, id: i32) -> Result<Option<ContactMessage>, StorageError>;

    /// Update all mutable fields; silently succeeds when the id is absent.
    async fn update_contact(
        &self,
        id: i32,
        contact: &NewContactMessage,
    ) -> Result<(), StorageError>;

    /// Delete by id; idempotent.
    async fn delete_contact(&self, id: i32) -> Result<(), StorageError>;
}

/// Anything that can serve all four collections.
pub trait Storage: UserStore + CourseStore + CartStore + ContactStore {}

impl<T: UserStore + CourseStore + CartStore + ContactStore> Storage for T {}

/// Observability port over the backend selection.
#[async_trait]
pub trait StorageStatus: Send + Sync {
    /// Whether the relational backend is currently selected.
    fn is_relational(&self) -> bool;

    /// Re-run the connectivity probe and return the new outcome.
    async fn reprobe(&self) -> bool;
}
