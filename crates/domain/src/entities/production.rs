//! Production entity - one staging of a material at a venue.
//!
//! # Graph Design
//!
//! Productions are not keyed by name; they are addressed by uuid only.
//!
//! ```cypher
//! (p:Production)-[:PRODUCTION_OF]->(m:Material)
//! (p:Production)-[:PLAYS_AT]->(v:Venue)
//! (sur:Production)-[:HAS_SUB_PRODUCTION {position: 0}]->(sub:Production)
//! (p:Production)-[:HAS_CAST_MEMBER {castMemberPosition: 0, rolePosition: 1, roleName: "Volumnius",
//!                                   characterDifferentiator: null, qualifier: null,
//!                                   isAlternate: false}]->(:Person)
//! ```
//!
//! A cast member with no roles still gets one edge, with a null `rolePosition`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::credit::{Credit, CreditKind, PersonRef};
use super::material::MaterialRef;
use super::venue::VenueRef;
use crate::ids::{PersonId, ProductionId};

/// Productions have no differentiator, so references carry only uuid and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductionRef {
    pub id: ProductionId,
    pub name: String,
}

/// A role as cast, before it is matched against the material's characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// The name the production gives the role.
    pub name: String,
    /// Character to link to when it is named differently from the role.
    pub character_name: Option<String>,
    pub character_differentiator: Option<String>,
    pub qualifier: Option<String>,
    pub is_alternate: bool,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            character_name: None,
            character_differentiator: None,
            qualifier: None,
            is_alternate: false,
        }
    }

    /// Name used to find the character this role portrays.
    pub fn lookup_name(&self) -> &str {
        self.character_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub person: PersonRef,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub id: ProductionId,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub press_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub material: Option<MaterialRef>,
    pub venue: Option<VenueRef>,
    pub sub_productions: Vec<ProductionRef>,
    pub producer_credits: Vec<Credit>,
    pub creative_credits: Vec<Credit>,
    pub crew_credits: Vec<Credit>,
    pub cast: Vec<CastMember>,
}

impl Production {
    pub fn new(id: ProductionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            start_date: None,
            press_date: None,
            end_date: None,
            material: None,
            venue: None,
            sub_productions: Vec::new(),
            producer_credits: Vec::new(),
            creative_credits: Vec::new(),
            crew_credits: Vec::new(),
            cast: Vec::new(),
        }
    }

    pub fn to_ref(&self) -> ProductionRef {
        ProductionRef {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// Credit groups of one kind. Productions carry no writing credits.
    pub fn credits(&self, kind: CreditKind) -> &[Credit] {
        match kind {
            CreditKind::Producer => &self.producer_credits,
            CreditKind::Creative => &self.creative_credits,
            CreditKind::Crew => &self.crew_credits,
            CreditKind::Writing => &[],
        }
    }

    pub fn cast_member(&self, person: PersonId) -> Option<&CastMember> {
        self.cast.iter().find(|member| member.person.id == person)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn lookup_name_falls_back_to_role_name() {
        let mut role = Role::new("Young Hamlet");
        assert_eq!(role.lookup_name(), "Young Hamlet");

        role.character_name = Some("Hamlet".to_string());
        assert_eq!(role.lookup_name(), "Hamlet");
    }

    #[test]
    fn productions_have_no_writing_credits() {
        let mut production = Production::new(ProductionId::from_uuid(Uuid::from_u128(1)), "Hamlet");
        production.producer_credits.push(Credit {
            name: "produced by".to_string(),
            entities: Vec::new(),
        });

        assert_eq!(production.credits(CreditKind::Producer).len(), 1);
        assert!(production.credits(CreditKind::Writing).is_empty());
    }
}
