//! Credits - labelled, ordered groups of people and companies.
//!
//! # Graph Design
//!
//! One edge per credited entity, carrying its group and position:
//!
//! ```cypher
//! (m:Material)-[:HAS_WRITING_ENTITY {creditPosition: 0, creditName: "by", entityPosition: 0}]->(p:Person)
//! (p:Production)-[:HAS_CREATIVE_ENTITY {creditPosition: 1, creditName: "Design", entityPosition: 0}]->(c:Company)
//! ```
//!
//! Company members are credited per group, with an extra `memberPosition` and
//! the `entityPosition` of the company they were credited under.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::key::Named;
use crate::ids::{CompanyId, PersonId};

pub type PersonRef = Named<PersonId>;
pub type CompanyRef = Named<CompanyId>;

/// Which group of credits an entity appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditKind {
    Writing,
    Producer,
    Creative,
    Crew,
}

impl CreditKind {
    /// Label applied when the author leaves the credit name blank.
    ///
    /// Creative and crew credits have no sensible default and must be named.
    pub fn default_label(&self) -> Option<&'static str> {
        match self {
            CreditKind::Writing => Some("by"),
            CreditKind::Producer => Some("produced by"),
            CreditKind::Creative | CreditKind::Crew => None,
        }
    }

    /// Relationship type linking the credited subject to its entities.
    pub fn relationship(&self) -> &'static str {
        match self {
            CreditKind::Writing => "HAS_WRITING_ENTITY",
            CreditKind::Producer => "HAS_PRODUCER_ENTITY",
            CreditKind::Creative => "HAS_CREATIVE_ENTITY",
            CreditKind::Crew => "HAS_CREW_ENTITY",
        }
    }
}

/// An entity listed inside a credit group or a nomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditedEntity {
    Person(PersonRef),
    Company {
        company: CompanyRef,
        /// Members credited alongside the company, in author order.
        members: Vec<PersonRef>,
    },
}

impl CreditedEntity {
    pub fn uuid(&self) -> Uuid {
        match self {
            CreditedEntity::Person(person) => person.id.to_uuid(),
            CreditedEntity::Company { company, .. } => company.id.to_uuid(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CreditedEntity::Person(person) => &person.name,
            CreditedEntity::Company { company, .. } => &company.name,
        }
    }

    pub fn members(&self) -> &[PersonRef] {
        match self {
            CreditedEntity::Person(_) => &[],
            CreditedEntity::Company { members, .. } => members,
        }
    }

    /// True when the entity is this person, either directly or as a company member.
    pub fn involves_person(&self, person: PersonId) -> bool {
        match self {
            CreditedEntity::Person(p) => p.id == person,
            CreditedEntity::Company { members, .. } => members.iter().any(|m| m.id == person),
        }
    }

    /// Every uuid this entry would match in a reverse lookup.
    pub fn uuids(&self) -> Vec<Uuid> {
        let mut uuids = vec![self.uuid()];
        uuids.extend(self.members().iter().map(|m| m.id.to_uuid()));
        uuids
    }
}

/// A labelled group of credited entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub name: String,
    pub entities: Vec<CreditedEntity>,
}

impl Credit {
    pub fn involves(&self, uuid: Uuid) -> bool {
        self.entities.iter().any(|e| e.uuids().contains(&uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EntityKey;

    fn person(n: u128, name: &str) -> PersonRef {
        Named::new(
            PersonId::from_uuid(Uuid::from_u128(n)),
            &EntityKey::new(name, None).expect("key"),
        )
    }

    #[test]
    fn default_labels_per_kind() {
        assert_eq!(CreditKind::Writing.default_label(), Some("by"));
        assert_eq!(CreditKind::Producer.default_label(), Some("produced by"));
        assert_eq!(CreditKind::Creative.default_label(), None);
        assert_eq!(CreditKind::Crew.default_label(), None);
    }

    #[test]
    fn company_involves_its_credited_members() {
        let member = person(2, "Tom Stoppard");
        let company = CreditedEntity::Company {
            company: Named::new(
                CompanyId::from_uuid(Uuid::from_u128(1)),
                &EntityKey::new("National Theatre Company", None).expect("key"),
            ),
            members: vec![member.clone()],
        };

        assert!(company.involves_person(member.id));
        assert!(!company.involves_person(PersonId::from_uuid(Uuid::from_u128(3))));
        assert_eq!(company.uuids(), vec![Uuid::from_u128(1), Uuid::from_u128(2)]);
    }

    #[test]
    fn credit_involves_direct_and_member_entities() {
        let credit = Credit {
            name: "by".to_string(),
            entities: vec![CreditedEntity::Person(person(5, "Caryl Churchill"))],
        };
        assert!(credit.involves(Uuid::from_u128(5)));
        assert!(!credit.involves(Uuid::from_u128(6)));
    }
}
