//! Domain layer: entities, validation, use-case services, and ports.

pub mod accounts;
pub mod cart;
pub mod contact;
pub mod course;
pub mod error;
pub mod password;
pub mod ports;
pub mod user;

pub use accounts::{
    AccountService, LoginError, RegisterError, Registration, INVALID_CREDENTIALS,
};
pub use cart::{CartItem, CartLine};
pub use contact::{ContactMessage, NewContactMessage};
pub use course::{Course, CourseValidationError, NewCourse};
pub use error::{DomainError, ErrorCode};
pub use ports::StorageError;
pub use user::{NewUser, User, UserProfile};
