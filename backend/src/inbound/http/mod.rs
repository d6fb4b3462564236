//! HTTP inbound adapter: HTML pages and the JSON API.

pub mod api;
pub mod error;
pub mod pages;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
