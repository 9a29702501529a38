//! API layer - HTTP entry points.

pub mod error;
pub mod http;
pub mod json;

pub use error::ApiError;
