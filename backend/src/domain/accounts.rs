//! Registration and login use-cases.
//!
//! Holds the credential rules so HTTP handlers only map requests and
//! responses: password confirmation, required fields, email uniqueness,
//! hashing before persistence, and enumeration-resistant login failures.

use std::sync::Arc;

use crate::domain::password::{hash_password, verify_password};
use crate::domain::ports::{StorageError, UserStore};
use crate::domain::{NewUser, UserProfile};

/// The one message both unknown-email and wrong-password logins produce.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Raw registration form fields, unvalidated.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration failures. The first three map to re-rendered form
/// messages; storage failures surface as a generic page error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("All fields are required")]
    MissingField,
    #[error("Email already registered")]
    EmailTaken,
    #[error("registration failed: {0}")]
    Storage(StorageError),
}

/// Login failures. `InvalidCredentials` deliberately does not say which
/// part was wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Email and password are required")]
    MissingField,
    #[error("{INVALID_CREDENTIALS}")]
    InvalidCredentials,
    #[error("login failed: {0}")]
    Storage(StorageError),
}

/// Use-case service over whichever user store the adapter selected.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
}

impl AccountService {
    /// Create a service over the given user store.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Validate the form, hash the password, and create the user.
    ///
    /// The email uniqueness check happens before the insert; the caller
    /// authenticates the session with the returned profile (registration
    /// implies login).
    pub async fn register(&self, form: &Registration) -> Result<UserProfile, RegisterError> {
        if form.password != form.confirm_password {
            return Err(RegisterError::PasswordMismatch);
        }
        if form.name.trim().is_empty()
            || form.email.trim().is_empty()
            || form.password.is_empty()
        {
            return Err(RegisterError::MissingField);
        }

        let existing = self
            .users
            .user_by_email(&form.email)
            .await
            .map_err(RegisterError::Storage)?;
        if existing.is_some() {
            return Err(RegisterError::EmailTaken);
        }

        let password = hash_password(&form.password)
            .map_err(|err| RegisterError::Storage(StorageError::query(err.to_string())))?;
        let user = self
            .users
            .create_user(&NewUser {
                name: form.name.clone(),
                email: form.email.clone(),
                password,
            })
            .await
            .map_err(RegisterError::Storage)?;
        Ok(user.profile())
    }

    /// Authenticate credentials and return the user's profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, LoginError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(LoginError::MissingField);
        }

        let user = self
            .users
            .user_by_email(email)
            .await
            .map_err(LoginError::Storage)?
            .ok_or(LoginError::InvalidCredentials)?;

        if !verify_password(password, &user.password) {
            return Err(LoginError::InvalidCredentials);
        }
        Ok(user.profile())
    }
}
