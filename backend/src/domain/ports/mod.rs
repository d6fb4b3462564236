//! Domain ports: traits the inbound adapters drive and the outbound
//! adapters implement.

mod storage;

pub use storage::{
    CartStore, ContactStore, CourseStore, Storage, StorageError, StorageStatus, UserStore,
};
