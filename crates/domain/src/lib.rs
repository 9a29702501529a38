//! Theatrebase domain model.
//!
//! Pure types and rules for the theatre graph: typed ids, identity keys,
//! materials, productions, venues, credits, characters and awards. No I/O.

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{
    check_sub_entities, retain_most_specific, AwardCeremony, AwardRef, CastMember, Category,
    CharacterGroup, CharacterRef, CompanyRef, Credit, CreditKind, CreditedEntity, Depiction,
    EntityKey, Material, MaterialRef, Named, Nomination, NodeLabel, PersonRef, Production,
    ProductionRef, Role, SurrogateViolation, Venue, VenueRef, NOMINATION_LABEL, WINNER_LABEL,
};
pub use error::DomainError;
pub use ids::{
    AwardCeremonyId, AwardId, CharacterId, CompanyId, MaterialId, PersonId, ProductionId,
    VenueId,
};
