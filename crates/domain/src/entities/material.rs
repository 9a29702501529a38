//! Material entity - a play, libretto or other text that productions stage.
//!
//! # Graph Design
//!
//! ```cypher
//! (sur:Material)-[:HAS_SUB_MATERIAL {position: 0}]->(sub:Material)
//! (adaptation:Material)-[:SUBSEQUENT_VERSION_OF]->(original:Material)
//! (m:Material)-[:HAS_WRITING_ENTITY {...}]->(:Person|Company)
//! (m:Material)-[:DEPICTS {...}]->(:Character)
//! ```
//!
//! The sur-material is not stored on the sub-material: it is the owner of the
//! incoming `HAS_SUB_MATERIAL` edge and is resolved one level at a time.

use serde::{Deserialize, Serialize};

use super::character::{CharacterGroup, Depiction};
use super::credit::Credit;
use super::key::{EntityKey, Named};
use crate::ids::{CharacterId, MaterialId};

pub type MaterialRef = Named<MaterialId>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub differentiator: String,
    pub format: Option<String>,
    pub year: Option<i64>,
    pub original_version: Option<MaterialRef>,
    pub sub_materials: Vec<MaterialRef>,
    pub writing_credits: Vec<Credit>,
    pub character_groups: Vec<CharacterGroup>,
}

impl Material {
    /// A bare material with no relationships, as created by a name-only reference.
    pub fn new(id: MaterialId, key: &EntityKey) -> Self {
        Self {
            id,
            name: key.name().to_string(),
            differentiator: key.differentiator().to_string(),
            format: None,
            year: None,
            original_version: None,
            sub_materials: Vec::new(),
            writing_credits: Vec::new(),
            character_groups: Vec::new(),
        }
    }

    pub fn to_ref(&self) -> MaterialRef {
        Named {
            id: self.id,
            name: self.name.clone(),
            differentiator: self.differentiator.clone(),
        }
    }

    /// Every depiction across all character groups, in list order.
    pub fn depictions(&self) -> impl Iterator<Item = &Depiction> {
        self.character_groups
            .iter()
            .flat_map(|group| group.depictions.iter())
    }

    /// Depictions of one character, paired with the group they appear in.
    pub fn depictions_of(
        &self,
        character: CharacterId,
    ) -> impl Iterator<Item = (&CharacterGroup, &Depiction)> {
        self.character_groups.iter().flat_map(move |group| {
            group
                .depictions
                .iter()
                .filter(move |d| d.character.id == character)
                .map(move |d| (group, d))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn character(n: u128, name: &str, differentiator: Option<&str>) -> Depiction {
        Depiction {
            character: Named::new(
                CharacterId::from_uuid(Uuid::from_u128(n)),
                &EntityKey::new(name, differentiator).expect("key"),
            ),
            display_name: None,
            qualifier: None,
        }
    }

    #[test]
    fn depictions_flatten_groups_in_order() {
        let key = EntityKey::new("Julius Caesar", None).expect("key");
        let mut material = Material::new(MaterialId::from_uuid(Uuid::from_u128(1)), &key);
        material.character_groups = vec![
            CharacterGroup {
                name: Some("Romans".to_string()),
                depictions: vec![character(10, "Cinna", Some("1")), character(11, "Brutus", None)],
            },
            CharacterGroup {
                name: None,
                depictions: vec![character(12, "Cinna", Some("2"))],
            },
        ];

        let names: Vec<String> = material
            .depictions()
            .map(|d| format!("{}/{}", d.character.name, d.character.differentiator))
            .collect();
        assert_eq!(names, vec!["Cinna/1", "Brutus/", "Cinna/2"]);

        let cinna_two: Vec<_> = material
            .depictions_of(CharacterId::from_uuid(Uuid::from_u128(12)))
            .collect();
        assert_eq!(cinna_two.len(), 1);
        assert_eq!(cinna_two[0].0.name, None);
    }
}
