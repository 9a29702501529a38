//! Domain entities - the theatre graph's nodes and the edges they own.

mod award;
mod character;
mod credit;
mod key;
mod material;
mod production;
mod surrogate;
mod venue;

pub use award::{
    AwardCeremony, AwardRef, Category, Nomination, NOMINATION_LABEL, WINNER_LABEL,
};
pub use character::{CharacterGroup, CharacterRef, Depiction};
pub use credit::{CompanyRef, Credit, CreditKind, CreditedEntity, PersonRef};
pub use key::{EntityKey, Named, NodeLabel};
pub use material::{Material, MaterialRef};
pub use production::{CastMember, Production, ProductionRef, Role};
pub use surrogate::{check_sub_entities, retain_most_specific, SurrogateViolation};
pub use venue::{Venue, VenueRef};
