//! Venue entity - a theatre, or an auditorium within one.
//!
//! ```cypher
//! (sur:Venue)-[:HAS_SUB_VENUE {position: 0}]->(sub:Venue)
//! ```

use serde::{Deserialize, Serialize};

use super::key::{EntityKey, Named};
use crate::ids::VenueId;

pub type VenueRef = Named<VenueId>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub differentiator: String,
    pub sub_venues: Vec<VenueRef>,
}

impl Venue {
    pub fn new(id: VenueId, key: &EntityKey) -> Self {
        Self {
            id,
            name: key.name().to_string(),
            differentiator: key.differentiator().to_string(),
            sub_venues: Vec::new(),
        }
    }

    pub fn to_ref(&self) -> VenueRef {
        Named {
            id: self.id,
            name: self.name.clone(),
            differentiator: self.differentiator.clone(),
        }
    }
}
