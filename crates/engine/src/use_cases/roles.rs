//! Role and qualifier disambiguation.
//!
//! A role links to a character when exactly one distinct character depicted
//! by the production's material answers to the role's lookup name. The
//! character's differentiator is the only thing that can split same-named
//! characters; a qualifier never does.

use std::collections::{BTreeSet, HashSet};

use theatrebase_domain::common::trimmed_or_none;
use theatrebase_domain::{CharacterId, CharacterRef, Depiction, EntityKey, Production, Role};
use theatrebase_shared::requests::{
    CastMemberRequest, CharacterGroupRequest, CharacterRequest, RoleRequest,
};
use theatrebase_shared::views::{PerformerView, RoleView};
use theatrebase_shared::Model;

use crate::use_cases::validation::{FieldErrors, DUPLICATE_IN_GROUP};

pub const AMBIGUOUS_CHARACTER: &str =
    "Multiple characters share this name; a differentiator is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleLink<'a> {
    Linked(&'a CharacterRef),
    Unlinked,
    Ambiguous,
}

impl RoleLink<'_> {
    pub fn character_id(&self) -> Option<CharacterId> {
        match self {
            RoleLink::Linked(character) => Some(character.id),
            RoleLink::Unlinked | RoleLink::Ambiguous => None,
        }
    }
}

pub fn link_role<'a>(role: &Role, depictions: &[&'a Depiction]) -> RoleLink<'a> {
    let lookup = role.lookup_name().trim();
    let differentiator = role
        .character_differentiator
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let mut seen = HashSet::new();
    let candidates: Vec<&'a CharacterRef> = depictions
        .iter()
        .copied()
        .filter(|d| d.character.name == lookup || d.display_name.as_deref() == Some(lookup))
        .filter(|d| !differentiator.is_some_and(|diff| d.character.differentiator != diff))
        .map(|d| &d.character)
        .filter(|character| seen.insert(character.id))
        .collect();

    match candidates.as_slice() {
        [] => RoleLink::Unlinked,
        [character] => RoleLink::Linked(*character),
        _ => RoleLink::Ambiguous,
    }
}

pub fn role_from_request(request: &RoleRequest) -> Role {
    Role {
        name: request.name.trim().to_string(),
        character_name: trimmed_or_none(request.character_name.as_deref()),
        character_differentiator: trimmed_or_none(request.character_differentiator.as_deref()),
        qualifier: trimmed_or_none(request.qualifier.as_deref()),
        is_alternate: request.is_alternate.unwrap_or(false),
    }
}

/// Reports roles that cannot be linked without a differentiator.
pub fn validate_cast_links(
    errors: &mut FieldErrors,
    depictions: &[&Depiction],
    cast: &[CastMemberRequest],
) {
    for (member_index, member) in cast.iter().enumerate() {
        for (role_index, request) in member.roles.iter().enumerate() {
            if request.is_blank() {
                continue;
            }
            if link_role(&role_from_request(request), depictions) == RoleLink::Ambiguous {
                errors.add_ambiguity(
                    format!("cast[{member_index}].roles[{role_index}].characterDifferentiator"),
                    AMBIGUOUS_CHARACTER,
                );
            }
        }
    }
}

pub fn role_view(role: &Role, depictions: &[&Depiction]) -> RoleView {
    RoleView {
        model: Model::Character,
        uuid: link_role(role, depictions)
            .character_id()
            .map(CharacterId::to_uuid),
        name: role.name.clone(),
        qualifier: role.qualifier.clone(),
        is_alternate: role.is_alternate,
    }
}

// =============================================================================
// Character pages
// =============================================================================

/// Cast members playing `character`, each with the rest of their roles.
pub fn performers(
    character: CharacterId,
    production: &Production,
    depictions: &[&Depiction],
) -> Vec<PerformerView> {
    let mut performers = Vec::new();
    for member in &production.cast {
        for (index, role) in member.roles.iter().enumerate() {
            if link_role(role, depictions).character_id() != Some(character) {
                continue;
            }
            performers.push(PerformerView {
                model: Model::Person,
                uuid: member.person.id.to_uuid(),
                name: member.person.name.clone(),
                role_name: role.name.clone(),
                qualifier: role.qualifier.clone(),
                is_alternate: role.is_alternate,
                other_roles: member
                    .roles
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .map(|(_, other)| role_view(other, depictions))
                    .collect(),
            });
        }
    }
    performers
}

/// Distinct display names, other than the canonical one, sorted.
pub fn variant_named_depictions<'a>(
    canonical: &str,
    depictions: impl IntoIterator<Item = &'a Depiction>,
) -> Vec<String> {
    depictions
        .into_iter()
        .filter_map(|d| d.display_name.as_deref())
        .filter(|name| *name != canonical)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Role names used for `character` in one production that differ from both
/// the canonical name and every name the material displays for it.
pub fn variant_role_names(
    character: CharacterId,
    canonical: &str,
    production: &Production,
    depictions: &[&Depiction],
) -> BTreeSet<String> {
    let displayed: HashSet<&str> = depictions
        .iter()
        .filter(|d| d.character.id == character)
        .filter_map(|d| d.display_name.as_deref())
        .collect();

    production
        .cast
        .iter()
        .flat_map(|member| member.roles.iter())
        .filter(|role| link_role(role, depictions).character_id() == Some(character))
        .map(|role| role.name.as_str())
        .filter(|name| *name != canonical && !displayed.contains(name))
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Material writes
// =============================================================================

/// The character a row names, its display name in this material, and its qualifier.
pub struct DepictionRequest {
    pub key: EntityKey,
    pub display_name: Option<String>,
    pub qualifier: Option<String>,
}

/// `name` is what the material calls the character; `underlyingName`, when
/// given, is the character's own name.
pub fn depiction_request(request: &CharacterRequest) -> Option<DepictionRequest> {
    let display = request.name.trim();
    let underlying = trimmed_or_none(request.underlying_name.as_deref());
    let canonical = underlying.as_deref().unwrap_or(display);
    let key = EntityKey::new(canonical, request.differentiator.as_deref()).ok()?;

    Some(DepictionRequest {
        display_name: (!display.is_empty() && display != key.name()).then(|| display.to_string()),
        qualifier: trimmed_or_none(request.qualifier.as_deref()),
        key,
    })
}

/// The same character with the same qualifier twice in one group is an error.
pub fn validate_character_groups(errors: &mut FieldErrors, groups: &[CharacterGroupRequest]) {
    for (group_index, group) in groups.iter().enumerate() {
        let mut seen = HashSet::new();
        for (index, character) in group.characters.iter().enumerate() {
            let Some(depiction) = depiction_request(character) else {
                continue;
            };
            if !seen.insert((depiction.key, depiction.qualifier)) {
                errors.add(
                    format!("characterGroups[{group_index}].characters[{index}].name"),
                    DUPLICATE_IN_GROUP,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theatrebase_domain::{CastMember, Named, PersonId, ProductionId};
    use uuid::Uuid;

    fn depiction(n: u128, name: &str, differentiator: Option<&str>, display: Option<&str>) -> Depiction {
        Depiction {
            character: Named::new(
                CharacterId::from_uuid(Uuid::from_u128(n)),
                &EntityKey::new(name, differentiator).expect("key"),
            ),
            display_name: display.map(str::to_string),
            qualifier: None,
        }
    }

    /// Julius Caesar: Cinna the conspirator and Cinna the poet.
    fn julius_caesar() -> Vec<Depiction> {
        vec![
            depiction(1, "Julius Caesar", None, None),
            depiction(2, "Cinna", Some("1"), None),
            depiction(3, "Cinna", Some("2"), Some("Cinna the Poet")),
        ]
    }

    fn role(name: &str, differentiator: Option<&str>) -> Role {
        Role {
            character_differentiator: differentiator.map(str::to_string),
            ..Role::new(name)
        }
    }

    #[test]
    fn same_named_characters_need_a_differentiator() {
        let depictions = julius_caesar();
        let refs: Vec<&Depiction> = depictions.iter().collect();

        assert_eq!(link_role(&role("Cinna", None), &refs), RoleLink::Ambiguous);
        assert_eq!(
            link_role(&role("Cinna", Some("2")), &refs).character_id(),
            Some(CharacterId::from_uuid(Uuid::from_u128(3)))
        );
        assert_eq!(
            link_role(&role("Cinna the Poet", None), &refs).character_id(),
            Some(CharacterId::from_uuid(Uuid::from_u128(3)))
        );
        assert_eq!(link_role(&role("Cinna", Some("3")), &refs), RoleLink::Unlinked);
    }

    #[test]
    fn qualifier_never_resolves_ambiguity() {
        let depictions = julius_caesar();
        let refs: Vec<&Depiction> = depictions.iter().collect();
        let mut qualified = role("Cinna", None);
        qualified.qualifier = Some("the conspirator".to_string());

        assert_eq!(link_role(&qualified, &refs), RoleLink::Ambiguous);
        assert_eq!(role_view(&qualified, &refs).uuid, None);
    }

    #[test]
    fn ambiguous_roles_are_reported_against_the_differentiator_field() {
        let depictions = julius_caesar();
        let refs: Vec<&Depiction> = depictions.iter().collect();
        let cast = vec![CastMemberRequest {
            name: "Jonathan Dryden Taylor".to_string(),
            differentiator: None,
            roles: vec![
                RoleRequest::new("Julius Caesar"),
                RoleRequest::new("Cinna"),
            ],
        }];

        let mut errors = FieldErrors::new();
        validate_cast_links(&mut errors, &refs, &cast);

        assert!(errors.is_ambiguity_only());
        assert!(errors
            .get("cast[0].roles[1].characterDifferentiator")
            .is_some());
    }

    #[test]
    fn other_roles_exclude_the_current_role_in_alternating_casts() {
        let depictions = vec![
            depiction(1, "Brutus", None, None),
            depiction(2, "Cassius", None, None),
        ];
        let refs: Vec<&Depiction> = depictions.iter().collect();
        let mut production = Production::new(ProductionId::from_uuid(Uuid::from_u128(9)), "Julius Caesar");
        production.cast = vec![CastMember {
            person: Named::new(
                PersonId::from_uuid(Uuid::from_u128(20)),
                &EntityKey::new("Harriet Walter", None).expect("key"),
            ),
            roles: vec![
                Role::new("Brutus"),
                Role {
                    is_alternate: true,
                    ..Role::new("Cassius")
                },
            ],
        }];

        let brutus = performers(CharacterId::from_uuid(Uuid::from_u128(1)), &production, &refs);
        assert_eq!(brutus.len(), 1);
        assert_eq!(brutus[0].role_name, "Brutus");
        assert_eq!(brutus[0].other_roles.len(), 1);
        assert_eq!(brutus[0].other_roles[0].name, "Cassius");
        assert!(brutus[0].other_roles[0].is_alternate);

        let cassius = performers(CharacterId::from_uuid(Uuid::from_u128(2)), &production, &refs);
        assert!(cassius[0].is_alternate);
        assert_eq!(cassius[0].other_roles[0].name, "Brutus");
    }

    #[test]
    fn variant_names_skip_canonical_and_displayed_names() {
        let depictions = vec![
            depiction(1, "Hamlet", None, Some("Prince Hamlet")),
            depiction(1, "Hamlet", None, Some("Prince Hamlet")),
        ];
        assert_eq!(
            variant_named_depictions("Hamlet", depictions.iter()),
            vec!["Prince Hamlet".to_string()]
        );

        let refs: Vec<&Depiction> = depictions.iter().collect();
        let mut production = Production::new(ProductionId::from_uuid(Uuid::from_u128(9)), "Hamlet");
        production.cast = vec![CastMember {
            person: Named::new(
                PersonId::from_uuid(Uuid::from_u128(20)),
                &EntityKey::new("Andrew Scott", None).expect("key"),
            ),
            roles: vec![
                Role {
                    character_name: Some("Hamlet".to_string()),
                    ..Role::new("Young Hamlet")
                },
                Role::new("Prince Hamlet"),
            ],
        }];

        let names = variant_role_names(CharacterId::from_uuid(Uuid::from_u128(1)), "Hamlet", &production, &refs);
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["Young Hamlet".to_string()]);
    }

    #[test]
    fn duplicate_depictions_in_one_group_are_flagged() {
        let character = |name: &str, qualifier: Option<&str>| CharacterRequest {
            name: name.to_string(),
            underlying_name: None,
            differentiator: None,
            qualifier: qualifier.map(str::to_string),
        };
        let groups = vec![CharacterGroupRequest {
            name: None,
            characters: vec![
                character("Marlow", Some("younger")),
                character("Marlow", Some("older")),
                character("Marlow", Some("younger")),
            ],
        }];

        let mut errors = FieldErrors::new();
        validate_character_groups(&mut errors, &groups);

        assert_eq!(errors.clone().into_map().len(), 1);
        assert!(errors.get("characterGroups[0].characters[2].name").is_some());
    }

    #[test]
    fn underlying_name_becomes_the_character_key() {
        let request = CharacterRequest {
            name: "Young Cato".to_string(),
            underlying_name: Some("Cato".to_string()),
            differentiator: None,
            qualifier: None,
        };
        let depiction = depiction_request(&request).expect("depiction");
        assert_eq!(depiction.key.name(), "Cato");
        assert_eq!(depiction.display_name.as_deref(), Some("Young Cato"));
    }
}
