//! Edge-creating queries for aggregate saves.
//!
//! Each builder returns one query per edge with scalar parameters only; the
//! caller runs them in the same transaction as the statement that cleared the
//! aggregate's previous edges.

use neo4rs::{query, Query};
use theatrebase_domain::{CastMember, CharacterGroup, Credit, CreditKind, CreditedEntity, NodeLabel};
use uuid::Uuid;

use super::helpers::{nullable, position};

fn entity_label(entity: &CreditedEntity) -> NodeLabel {
    match entity {
        CreditedEntity::Person(_) => NodeLabel::Person,
        CreditedEntity::Company { .. } => NodeLabel::Company,
    }
}

/// Ordered `HAS_SUB_*` edges from `owner` to each child.
pub fn sub_entity_queries(label: &str, relationship: &str, owner: Uuid, children: &[Uuid]) -> Vec<Query> {
    children
        .iter()
        .enumerate()
        .map(|(index, child)| {
            query(&format!(
                "MATCH (owner:{label} {{uuid: $owner}}), (child:{label} {{uuid: $child}})
                CREATE (owner)-[:{relationship} {{position: $position}}]->(child)"
            ))
            .param("owner", owner.to_string())
            .param("child", child.to_string())
            .param("position", position(index))
        })
        .collect()
}

/// Credit edges: one per credited entity, plus one per company member
/// carrying the member position and the company it was credited under.
pub fn credit_queries(owner_label: &str, owner: Uuid, kind: CreditKind, credits: &[Credit]) -> Vec<Query> {
    let relationship = kind.relationship();
    let mut queries = Vec::new();

    for (credit_index, credit) in credits.iter().enumerate() {
        for (entity_index, entity) in credit.entities.iter().enumerate() {
            queries.push(
                query(&format!(
                    "MATCH (owner:{owner_label} {{uuid: $owner}}), (entity:{} {{uuid: $entity}})
                    CREATE (owner)-[:{relationship} {{
                        creditPosition: $creditPosition,
                        creditName: $creditName,
                        entityPosition: $entityPosition
                    }}]->(entity)",
                    entity_label(entity)
                ))
                .param("owner", owner.to_string())
                .param("entity", entity.uuid().to_string())
                .param("creditPosition", position(credit_index))
                .param("creditName", credit.name.clone())
                .param("entityPosition", position(entity_index)),
            );

            for (member_index, member) in entity.members().iter().enumerate() {
                queries.push(
                    query(&format!(
                        "MATCH (owner:{owner_label} {{uuid: $owner}}), (member:Person {{uuid: $member}})
                        CREATE (owner)-[:{relationship} {{
                            creditPosition: $creditPosition,
                            creditName: $creditName,
                            entityPosition: $entityPosition,
                            memberPosition: $memberPosition,
                            creditedCompanyUuid: $company
                        }}]->(member)"
                    ))
                    .param("owner", owner.to_string())
                    .param("member", member.id.to_string())
                    .param("creditPosition", position(credit_index))
                    .param("creditName", credit.name.clone())
                    .param("entityPosition", position(entity_index))
                    .param("memberPosition", position(member_index))
                    .param("company", entity.uuid().to_string()),
                );
            }
        }
    }

    queries
}

pub fn depiction_queries(material: Uuid, groups: &[CharacterGroup]) -> Vec<Query> {
    let mut queries = Vec::new();
    for (group_index, group) in groups.iter().enumerate() {
        for (character_index, depiction) in group.depictions.iter().enumerate() {
            queries.push(
                query(
                    "MATCH (m:Material {uuid: $material}), (c:Character {uuid: $character})
                    CREATE (m)-[:DEPICTS {
                        groupPosition: $groupPosition,
                        groupName: $groupName,
                        characterPosition: $characterPosition,
                        displayName: $displayName,
                        qualifier: $qualifier
                    }]->(c)",
                )
                .param("material", material.to_string())
                .param("character", depiction.character.id.to_string())
                .param("groupPosition", position(group_index))
                .param("groupName", nullable(group.name.clone()))
                .param("characterPosition", position(character_index))
                .param("displayName", nullable(depiction.display_name.clone()))
                .param("qualifier", nullable(depiction.qualifier.clone())),
            );
        }
    }
    queries
}

pub fn cast_queries(production: Uuid, cast: &[CastMember]) -> Vec<Query> {
    let mut queries = Vec::new();
    for (member_index, member) in cast.iter().enumerate() {
        if member.roles.is_empty() {
            queries.push(
                query(
                    "MATCH (p:Production {uuid: $production}), (person:Person {uuid: $person})
                    CREATE (p)-[:HAS_CAST_MEMBER {castMemberPosition: $castMemberPosition}]->(person)",
                )
                .param("production", production.to_string())
                .param("person", member.person.id.to_string())
                .param("castMemberPosition", position(member_index)),
            );
            continue;
        }

        for (role_index, role) in member.roles.iter().enumerate() {
            queries.push(
                query(
                    "MATCH (p:Production {uuid: $production}), (person:Person {uuid: $person})
                    CREATE (p)-[:HAS_CAST_MEMBER {
                        castMemberPosition: $castMemberPosition,
                        rolePosition: $rolePosition,
                        roleName: $roleName,
                        characterName: $characterName,
                        characterDifferentiator: $characterDifferentiator,
                        qualifier: $qualifier,
                        isAlternate: $isAlternate
                    }]->(person)",
                )
                .param("production", production.to_string())
                .param("person", member.person.id.to_string())
                .param("castMemberPosition", position(member_index))
                .param("rolePosition", position(role_index))
                .param("roleName", role.name.clone())
                .param("characterName", nullable(role.character_name.clone()))
                .param(
                    "characterDifferentiator",
                    nullable(role.character_differentiator.clone()),
                )
                .param("qualifier", nullable(role.qualifier.clone()))
                .param("isAlternate", role.is_alternate),
            );
        }
    }
    queries
}
