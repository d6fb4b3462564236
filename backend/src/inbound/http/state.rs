//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only
//! on domain ports and stay testable against stub stores.

use std::sync::Arc;

use crate::domain::ports::{CartStore, ContactStore, CourseStore, StorageStatus, UserStore};
use crate::domain::AccountService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<AccountService>,
    pub users: Arc<dyn UserStore>,
    pub courses: Arc<dyn CourseStore>,
    pub carts: Arc<dyn CartStore>,
    pub contacts: Arc<dyn ContactStore>,
    pub storage: Arc<dyn StorageStatus>,
}

impl HttpState {
    /// Build state from one backing store that also reports its status.
    ///
    /// The production wiring passes the storage adapter here; tests pass
    /// a plain backend plus a stub status.
    pub fn new<S>(storage: Arc<S>) -> Self
    where
        S: UserStore + CourseStore + CartStore + ContactStore + StorageStatus + 'static,
    {
        let users: Arc<dyn UserStore> = storage.clone();
        Self {
            accounts: Arc::new(AccountService::new(users.clone())),
            users,
            courses: storage.clone(),
            carts: storage.clone(),
            contacts: storage.clone(),
            storage,
        }
    }
}
