//! Relational storage adapter (Backend A): Diesel over PostgreSQL.

mod diesel_storage;
mod models;
mod pool;
pub mod schema;

pub use diesel_storage::DieselStorage;
pub use pool::{DbPool, PoolConfig, PoolError};
