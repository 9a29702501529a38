//! Awards, their ceremonies, categories and nominations.
//!
//! # Graph Design
//!
//! An award is a keyed node; each ceremony belongs to exactly one award and is
//! unique by name within it. Categories are owned nodes of the ceremony, and
//! nominations exist only as edge properties on the category's nominees:
//!
//! ```cypher
//! (a:Award)-[:PRESENTED_AT]->(ac:AwardCeremony {name: "2020"})
//! (ac)-[:PRESENTS_CATEGORY {position: 0}]->(cat:AwardCeremonyCategory {name: "Best New Play"})
//! (cat)-[:HAS_NOMINEE {nominationPosition: 0, isWinner: true, customType: null,
//!                      entityPosition: 0}]->(:Person|Company)
//! (cat)-[:HAS_NOMINEE {nominationPosition: 0, productionPosition: 0, ...}]->(:Production)
//! (cat)-[:HAS_NOMINEE {nominationPosition: 0, materialPosition: 0, ...}]->(:Material)
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::credit::CreditedEntity;
use super::key::Named;
use super::material::MaterialRef;
use super::production::ProductionRef;
use crate::ids::{AwardCeremonyId, AwardId};

pub type AwardRef = Named<AwardId>;

pub const WINNER_LABEL: &str = "Winner";
pub const NOMINATION_LABEL: &str = "Nomination";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nomination {
    pub is_winner: bool,
    /// Ceremony-specific label such as "Shortlisted"; replaces the default label.
    pub custom_type: Option<String>,
    pub entities: Vec<CreditedEntity>,
    pub productions: Vec<ProductionRef>,
    pub materials: Vec<MaterialRef>,
}

impl Nomination {
    /// "Winner"/"Nomination", unless the ceremony supplied its own label.
    pub fn type_label(&self) -> &str {
        match (&self.custom_type, self.is_winner) {
            (Some(custom), _) => custom,
            (None, true) => WINNER_LABEL,
            (None, false) => NOMINATION_LABEL,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.productions.is_empty() && self.materials.is_empty()
    }

    /// True when any entity, company member, production or material has this uuid.
    pub fn references(&self, uuid: Uuid) -> bool {
        self.entities.iter().any(|e| e.uuids().contains(&uuid))
            || self.productions.iter().any(|p| p.id.to_uuid() == uuid)
            || self.materials.iter().any(|m| m.id.to_uuid() == uuid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub nominations: Vec<Nomination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardCeremony {
    pub id: AwardCeremonyId,
    pub name: String,
    pub award: Option<AwardRef>,
    pub categories: Vec<Category>,
}

impl AwardCeremony {
    pub fn new(id: AwardCeremonyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            award: None,
            categories: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nomination(is_winner: bool, custom_type: Option<&str>) -> Nomination {
        Nomination {
            is_winner,
            custom_type: custom_type.map(str::to_string),
            entities: Vec::new(),
            productions: Vec::new(),
            materials: Vec::new(),
        }
    }

    #[test]
    fn default_type_labels() {
        assert_eq!(nomination(true, None).type_label(), "Winner");
        assert_eq!(nomination(false, None).type_label(), "Nomination");
    }

    #[test]
    fn custom_type_replaces_default_label() {
        assert_eq!(nomination(false, Some("Shortlisted")).type_label(), "Shortlisted");
        assert_eq!(nomination(true, Some("Joint Winner")).type_label(), "Joint Winner");
    }

    #[test]
    fn nomination_without_nominees_is_empty() {
        assert!(nomination(true, None).is_empty());
    }
}
