//! Storage adapter: routes every entity operation to the live backend.
//!
//! The adapter owns both backends and a process-wide selection: an
//! `Arc<dyn Storage>` behind a lock, swapped wholesale by the
//! connectivity probe. Until the first probe completes the file backend
//! is selected, so no call ever rides an unconfirmed database. A failure
//! inside a routed operation does not change the selection (fail-fast);
//! only `probe` does.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    CartStore, ContactStore, CourseStore, Storage, StorageError, StorageStatus, UserStore,
};
use crate::domain::{
    CartLine, ContactMessage, Course, NewContactMessage, NewCourse, NewUser, User, UserProfile,
};
use crate::outbound::file::FileStore;
use crate::outbound::persistence::DieselStorage;

/// Process-wide backend selection over Backend A (relational) and
/// Backend B (file).
pub struct StorageAdapter {
    relational: Option<Arc<DieselStorage>>,
    file: Arc<FileStore>,
    active: RwLock<Arc<dyn Storage>>,
    relational_selected: AtomicBool,
}

impl StorageAdapter {
    /// Create an adapter. The file backend serves until a probe confirms
    /// the relational one.
    pub fn new(relational: Option<DieselStorage>, file: FileStore) -> Self {
        let file = Arc::new(file);
        Self {
            relational: relational.map(Arc::new),
            active: RwLock::new(file.clone()),
            file,
            relational_selected: AtomicBool::new(false),
        }
    }

    /// Run the connectivity check and swap the selection accordingly.
    ///
    /// Returns whether the relational backend is now selected. Safe to
    /// call repeatedly; this is both the startup probe and the re-probe.
    pub async fn probe(&self) -> bool {
        let reachable = match &self.relational {
            Some(storage) => match storage.ping().await {
                Ok(()) => true,
                Err(err) => {
                    warn!(error = %err, "relational backend unreachable, using file storage");
                    false
                }
            },
            None => false,
        };
        self.select(reachable);
        if reachable {
            info!("relational backend selected");
        }
        reachable
    }

    fn select(&self, relational: bool) {
        let target: Arc<dyn Storage> = match (&self.relational, relational) {
            (Some(storage), true) => storage.clone(),
            _ => self.file.clone(),
        };
        let mut active = self.active.write().unwrap_or_else(|err| err.into_inner());
        *active = target;
        self.relational_selected
            .store(relational && self.relational.is_some(), Ordering::Release);
    }

    /// The currently selected backend. Cloned out so no lock is held
    /// across the delegated call.
    fn current(&self) -> Arc<dyn Storage> {
        self.active
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }
}

#[async_trait]
impl StorageStatus for StorageAdapter {
    fn is_relational(&self) -> bool {
        self.relational_selected.load(Ordering::Acquire)
    }

    async fn reprobe(&self) -> bool {
        self.probe().await
    }
}

#[async_trait]
impl UserStore for StorageAdapter {
    async fn create_user(&self, user: &NewUser) -> Result<User, StorageError> {
        self.current().create_user(user).await
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        self.current().user_by_email(email).await
    }

    async fn user_by_id(&self, id: i32) -> Result<Option<UserProfile>, StorageError> {
        self.current().user_by_id(id).await
    }

    async fn update_user(&self, id: i32, name: &str, email: &str) -> Result<(), StorageError> {
        self.current().update_user(id, name, email).await
    }

    async fn delete_user(&self, id: i32) -> Result<(), StorageError> {
        self.current().delete_user(id).await
    }
}

#[async_trait]
impl CourseStore for StorageAdapter {
    async fn create_course(&self, course: &NewCourse) -> Result<Course, StorageError> {
        self.current().create_course(course).await
    }

    async fn courses(&self) -> Result<Vec<Course>, StorageError> {
        self.current().courses().await
    }

    async fn course_by_id(&self, id: i32) -> Result<Option<Course>, StorageError> {
        self.current().course_by_id(id).await
    }

    async fn update_course(&self, id: i32, course: &NewCourse) -> Result<(), StorageError> {
        self.current().update_course(id, course).await
    }

    async fn delete_course(&self, id: i32) -> Result<(), StorageError> {
        self.current().delete_course(id).await
    }
}

#[async_trait]
impl CartStore for StorageAdapter {
    async fn add_to_cart(
        &self,
        user_id: i32,
        course_id: i32,
        quantity: i32,
    ) -> Result<(), StorageError> {
        self.current().add_to_cart(user_id, course_id, quantity).await
    }

    async fn cart_for_user(&self, user_id: i32) -> Result<Vec<CartLine>, StorageError> {
        self.current().cart_for_user(user_id).await
    }

    async fn set_quantity(
        &self,
        user_id: i32,
        course_id: i32,
        quantity: i32,
    ) -> Result<(), StorageError> {
        self.current().set_quantity(user_id, course_id, quantity).await
    }

    async fn remove_from_cart(&self, user_id: i32, course_id: i32) -> Result<(), StorageError> {
        self.current().remove_from_cart(user_id, course_id).await
    }

    async fn clear_cart(&self, user_id: i32) -> Result<(), StorageError> {
        self.current().clear_cart(user_id).await
    }
}

#[async_trait]
impl ContactStore for StorageAdapter {
    async fn create_contact(
        &self,
        contact: &NewContactMessage,
    ) -> Result<ContactMessage, StorageError> {
        self.current().create_contact(contact).await
    }

    async fn contacts(&self) -> Result<Vec<ContactMessage>, StorageError> {
        self.current().contacts().await
    }

    async fn contact_by_id(&self, id: i32) -> Result<Option<ContactMessage>, StorageError> {
        self.current().contact_by_id(id).await
    }

    async fn update_contact(
        &self,
        id: i32,
        contact: &NewContactMessage,
    ) -> Result<(), StorageError> {
        self.current().update_contact(id, contact).await
    }

    async fn delete_contact(&self, id: i32) -> Result<(), StorageError> {
        self.current().delete_contact(id).await
    }
}
