//! Flat row records returned by read queries, and their assembly into aggregates.
//!
//! Ordered edges carry position properties, so every list is rebuilt from
//! positions rather than from the order rows arrive in. Slots whose node has
//! since been deleted simply leave a gap.

use std::collections::BTreeMap;

use serde::Deserialize;
use theatrebase_domain::{
    CastMember, Category, CharacterGroup, CharacterId, CompanyId, Credit, CreditedEntity,
    Depiction, MaterialId, Named, Nomination, NodeLabel, PersonId, ProductionId, ProductionRef,
    Role,
};
use uuid::Uuid;

use super::helpers::parse_uuid;
use crate::infrastructure::ports::RepoError;

/// Any keyed node: `uuid`, `name`, `differentiator` columns.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRow {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub differentiator: Option<String>,
}

impl NamedRow {
    pub fn into_named(self) -> Result<Named<Uuid>, RepoError> {
        Ok(Named {
            id: parse_uuid(&self.uuid)?,
            name: self.name,
            differentiator: self.differentiator.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRow {
    pub credit_position: i64,
    pub credit_name: String,
    pub entity_position: i64,
    pub member_position: Option<i64>,
    pub label: String,
    pub uuid: String,
    pub name: String,
    pub differentiator: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepictionRow {
    pub group_position: i64,
    pub group_name: Option<String>,
    pub character_position: i64,
    pub display_name: Option<String>,
    pub qualifier: Option<String>,
    pub uuid: String,
    pub name: String,
    pub differentiator: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastRow {
    pub cast_member_position: i64,
    pub role_position: Option<i64>,
    pub role_name: Option<String>,
    pub character_name: Option<String>,
    pub character_differentiator: Option<String>,
    pub qualifier: Option<String>,
    pub is_alternate: Option<bool>,
    pub uuid: String,
    pub name: String,
    pub differentiator: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRow {
    pub position: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NomineeRow {
    pub category_position: i64,
    pub nomination_position: i64,
    pub is_winner: Option<bool>,
    pub custom_type: Option<String>,
    pub entity_position: Option<i64>,
    pub member_position: Option<i64>,
    pub production_position: Option<i64>,
    pub material_position: Option<i64>,
    pub label: String,
    pub uuid: String,
    pub name: String,
    pub differentiator: Option<String>,
}

// =============================================================================
// Credited entities (shared by credits and nominations)
// =============================================================================

#[derive(Default)]
struct EntitySlot {
    entity: Option<(NodeLabel, Named<Uuid>)>,
    members: BTreeMap<i64, Named<PersonId>>,
}

impl EntitySlot {
    fn accept(
        &mut self,
        member_position: Option<i64>,
        label: &str,
        named: Named<Uuid>,
    ) -> Result<(), RepoError> {
        let label: NodeLabel = label.parse().map_err(RepoError::decode)?;
        match member_position {
            Some(position) => {
                self.members
                    .insert(position, named.map_id(PersonId::from_uuid));
            }
            None => self.entity = Some((label, named)),
        }
        Ok(())
    }

    fn build(self) -> Result<Option<CreditedEntity>, RepoError> {
        let Some((label, named)) = self.entity else {
            return Ok(None);
        };
        let entity = match label {
            NodeLabel::Person => CreditedEntity::Person(named.map_id(PersonId::from_uuid)),
            NodeLabel::Company => CreditedEntity::Company {
                company: named.map_id(CompanyId::from_uuid),
                members: self.members.into_values().collect(),
            },
            other => {
                return Err(RepoError::decode(format!(
                    "{other} cannot be a credited entity"
                )))
            }
        };
        Ok(Some(entity))
    }
}

fn build_entities(slots: BTreeMap<i64, EntitySlot>) -> Result<Vec<CreditedEntity>, RepoError> {
    let mut entities = Vec::new();
    for slot in slots.into_values() {
        if let Some(entity) = slot.build()? {
            entities.push(entity);
        }
    }
    Ok(entities)
}

fn named(uuid: &str, name: String, differentiator: Option<String>) -> Result<Named<Uuid>, RepoError> {
    Ok(Named {
        id: parse_uuid(uuid)?,
        name,
        differentiator: differentiator.unwrap_or_default(),
    })
}

pub fn assemble_credits(rows: Vec<CreditRow>) -> Result<Vec<Credit>, RepoError> {
    let mut credits: BTreeMap<i64, (String, BTreeMap<i64, EntitySlot>)> = BTreeMap::new();

    for row in rows {
        let (_, slots) = credits
            .entry(row.credit_position)
            .or_insert_with(|| (row.credit_name.clone(), BTreeMap::new()));
        let node = named(&row.uuid, row.name, row.differentiator)?;
        slots
            .entry(row.entity_position)
            .or_default()
            .accept(row.member_position, &row.label, node)?;
    }

    let mut assembled = Vec::new();
    for (name, slots) in credits.into_values() {
        let entities = build_entities(slots)?;
        if !entities.is_empty() {
            assembled.push(Credit { name, entities });
        }
    }
    Ok(assembled)
}

// =============================================================================
// Depictions
// =============================================================================

pub fn assemble_character_groups(rows: Vec<DepictionRow>) -> Result<Vec<CharacterGroup>, RepoError> {
    let mut groups: BTreeMap<i64, (Option<String>, BTreeMap<i64, Depiction>)> = BTreeMap::new();

    for row in rows {
        let character = named(&row.uuid, row.name, row.differentiator)?.map_id(CharacterId::from_uuid);
        let (_, depictions) = groups
            .entry(row.group_position)
            .or_insert_with(|| (row.group_name.clone(), BTreeMap::new()));
        depictions.insert(
            row.character_position,
            Depiction {
                character,
                display_name: row.display_name,
                qualifier: row.qualifier,
            },
        );
    }

    Ok(groups
        .into_values()
        .map(|(name, depictions)| CharacterGroup {
            name,
            depictions: depictions.into_values().collect(),
        })
        .collect())
}

// =============================================================================
// Cast
// =============================================================================

pub fn assemble_cast(rows: Vec<CastRow>) -> Result<Vec<CastMember>, RepoError> {
    let mut members: BTreeMap<i64, (Named<PersonId>, BTreeMap<i64, Role>)> = BTreeMap::new();

    for row in rows {
        let person = named(&row.uuid, row.name, row.differentiator)?.map_id(PersonId::from_uuid);
        let (_, roles) = members
            .entry(row.cast_member_position)
            .or_insert_with(|| (person, BTreeMap::new()));

        // A cast member without roles is stored as a single edge with no role.
        if let (Some(position), Some(name)) = (row.role_position, row.role_name) {
            roles.insert(
                position,
                Role {
                    name,
                    character_name: row.character_name,
                    character_differentiator: row.character_differentiator,
                    qualifier: row.qualifier,
                    is_alternate: row.is_alternate.unwrap_or(false),
                },
            );
        }
    }

    Ok(members
        .into_values()
        .map(|(person, roles)| CastMember {
            person,
            roles: roles.into_values().collect(),
        })
        .collect())
}

// =============================================================================
// Nominations
// =============================================================================

#[derive(Default)]
struct NominationSlot {
    is_winner: bool,
    custom_type: Option<String>,
    entities: BTreeMap<i64, EntitySlot>,
    productions: BTreeMap<i64, ProductionRef>,
    materials: BTreeMap<i64, Named<MaterialId>>,
}

pub fn assemble_categories(
    categories: Vec<CategoryRow>,
    nominees: Vec<NomineeRow>,
) -> Result<Vec<Category>, RepoError> {
    let mut slots: BTreeMap<i64, BTreeMap<i64, NominationSlot>> = BTreeMap::new();

    for row in nominees {
        let slot = slots
            .entry(row.category_position)
            .or_default()
            .entry(row.nomination_position)
            .or_default();
        slot.is_winner = row.is_winner.unwrap_or(false);
        slot.custom_type = row.custom_type.clone();

        let node = named(&row.uuid, row.name, row.differentiator)?;
        if let Some(position) = row.entity_position {
            slot.entities
                .entry(position)
                .or_default()
                .accept(row.member_position, &row.label, node)?;
        } else if let Some(position) = row.production_position {
            slot.productions.insert(
                position,
                ProductionRef {
                    id: ProductionId::from_uuid(node.id),
                    name: node.name,
                },
            );
        } else if let Some(position) = row.material_position {
            slot.materials
                .insert(position, node.map_id(MaterialId::from_uuid));
        }
    }

    let mut assembled = Vec::new();
    for category in categories {
        let mut nominations = Vec::new();
        for slot in slots
            .remove(&category.position)
            .unwrap_or_default()
            .into_values()
        {
            let nomination = Nomination {
                is_winner: slot.is_winner,
                custom_type: slot.custom_type,
                entities: build_entities(slot.entities)?,
                productions: slot.productions.into_values().collect(),
                materials: slot.materials.into_values().collect(),
            };
            if !nomination.is_empty() {
                nominations.push(nomination);
            }
        }
        assembled.push(Category {
            name: category.name,
            nominations,
        });
    }
    Ok(assembled)
}
