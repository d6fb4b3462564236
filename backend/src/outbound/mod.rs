//! Outbound adapters: the concrete storage backends and the selector
//! that routes between them.

pub mod adapter;
pub mod file;
pub mod persistence;

pub use adapter::StorageAdapter;
pub use file::FileStore;
