//! Theatrebase Shared - wire types for the HTTP API.
//!
//! - `views` - records rendered for subject pages and listings
//! - `requests` - write payloads
//! - `responses` - structured error payloads
//!
//! # Design Principles
//!
//! 1. **No business logic** - pure data types and serialization
//! 2. **No domain IDs** - raw `uuid::Uuid` in every record
//! 3. **Stable keys** - absent relations serialize as `null`, never omitted

pub mod model;
pub mod requests;
pub mod responses;
pub mod views;

pub use model::Model;
pub use responses::{ErrorKind, ErrorResponse};
