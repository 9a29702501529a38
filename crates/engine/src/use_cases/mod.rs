//! Use cases - the archive's read and write paths.
//!
//! `identity` and `surrogates` are the primitives; `credits`, `roles` and
//! `awards` build on them; `projection` composes those into subject pages
//! and `management` into write commands.

pub mod awards;
pub mod credits;
pub mod identity;
pub mod management;
pub mod projection;
pub mod roles;
pub mod surrogates;
pub mod validation;

pub use identity::IdentityResolver;
pub use management::{KeyedSubject, Management, WriteError};
pub use projection::{Listing, Page, ProjectionError, Projector, Subject, SubjectKind};
pub use surrogates::SurrogateWalker;
