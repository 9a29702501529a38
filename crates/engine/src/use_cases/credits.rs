//! Credit grouping: writing, producer, creative and crew credits.
//!
//! Groups and the entities inside them keep author order on both paths.
//! Reads from a person's or company's page trim each group to what that
//! entity shares it with.

use std::collections::HashSet;

use theatrebase_domain::{
    CompanyId, Credit, CreditKind, CreditedEntity, EntityKey, Named, NodeLabel, PersonId,
};
use theatrebase_shared::requests::{CreditRequest, CreditedEntityRequest, CreditedModel};
use theatrebase_shared::views::{
    CompanyCreditView, CompanyEntityView, CreditView, CreditedEntityView, EmployerCompanyView,
    EntityView, PersonCreditView,
};
use theatrebase_shared::Model;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::identity::IdentityResolver;
use crate::use_cases::validation::{FieldErrors, DUPLICATE_IN_GROUP, NAME_REQUIRED};

pub fn credit_model(kind: CreditKind) -> Model {
    match kind {
        CreditKind::Writing => Model::WritingCredit,
        CreditKind::Producer => Model::ProducerCredit,
        CreditKind::Creative => Model::CreativeCredit,
        CreditKind::Crew => Model::CrewCredit,
    }
}

// =============================================================================
// Write path
// =============================================================================

fn entity_label(model: CreditedModel) -> NodeLabel {
    match model {
        CreditedModel::Person => NodeLabel::Person,
        CreditedModel::Company => NodeLabel::Company,
    }
}

fn entity_key(request: &CreditedEntityRequest) -> Option<EntityKey> {
    EntityKey::new(&request.name, request.differentiator.as_deref()).ok()
}

/// Flags duplicated entities (and duplicated company members) within one list.
pub fn validate_entities(errors: &mut FieldErrors, prefix: &str, entities: &[CreditedEntityRequest]) {
    let mut seen = HashSet::new();
    for (index, entity) in entities.iter().enumerate() {
        let Some(key) = entity_key(entity) else {
            continue;
        };
        if !seen.insert((entity.model, key)) {
            errors.add(format!("{prefix}[{index}].name"), DUPLICATE_IN_GROUP);
        }

        if entity.model == CreditedModel::Company {
            let mut members = HashSet::new();
            for (member_index, member) in entity.members.iter().enumerate() {
                let Ok(key) = EntityKey::new(&member.name, member.differentiator.as_deref()) else {
                    continue;
                };
                if !members.insert(key) {
                    errors.add(
                        format!("{prefix}[{index}].members[{member_index}].name"),
                        DUPLICATE_IN_GROUP,
                    );
                }
            }
        }
    }
}

/// Credit groups with no named entity are blank rows and are ignored.
fn has_entities(credit: &CreditRequest) -> bool {
    credit.entities.iter().any(|e| !e.is_blank())
}

fn credit_name(kind: CreditKind, credit: &CreditRequest) -> Option<String> {
    credit
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| kind.default_label().map(str::to_string))
}

pub fn validate_credits(
    errors: &mut FieldErrors,
    prefix: &str,
    kind: CreditKind,
    credits: &[CreditRequest],
) {
    for (index, credit) in credits.iter().enumerate() {
        if !has_entities(credit) {
            continue;
        }
        if credit_name(kind, credit).is_none() {
            errors.add(format!("{prefix}[{index}].name"), NAME_REQUIRED);
        }
        validate_entities(errors, &format!("{prefix}[{index}].entities"), &credit.entities);
    }
}

/// Resolves every named entity, skipping blank rows. Members of a company
/// are only kept on company entries.
pub async fn resolve_entities(
    resolver: &IdentityResolver,
    entities: &[CreditedEntityRequest],
) -> Result<Vec<CreditedEntity>, RepoError> {
    let mut resolved = Vec::new();
    for request in entities {
        let Some(key) = entity_key(request) else {
            continue;
        };
        let label = entity_label(request.model);
        let entity = match request.model {
            CreditedModel::Person => {
                CreditedEntity::Person(resolver.resolve_named::<PersonId>(label, &key).await?)
            }
            CreditedModel::Company => {
                let company = resolver.resolve_named::<CompanyId>(label, &key).await?;
                let mut members = Vec::new();
                for member in &request.members {
                    let Ok(member_key) =
                        EntityKey::new(&member.name, member.differentiator.as_deref())
                    else {
                        continue;
                    };
                    members.push(
                        resolver
                            .resolve_named::<PersonId>(NodeLabel::Person, &member_key)
                            .await?,
                    );
                }
                CreditedEntity::Company { company, members }
            }
        };
        resolved.push(entity);
    }
    Ok(resolved)
}

pub async fn resolve_credits(
    resolver: &IdentityResolver,
    kind: CreditKind,
    credits: &[CreditRequest],
) -> Result<Vec<Credit>, RepoError> {
    let mut resolved = Vec::new();
    for credit in credits {
        if !has_entities(credit) {
            continue;
        }
        let Some(name) = credit_name(kind, credit) else {
            continue;
        };
        resolved.push(Credit {
            name,
            entities: resolve_entities(resolver, &credit.entities).await?,
        });
    }
    Ok(resolved)
}

// =============================================================================
// Read path
// =============================================================================

pub fn person_view<I: Copy + Into<uuid::Uuid>>(person: &Named<I>) -> EntityView {
    EntityView::new(Model::Person, person.id.into(), person.name.clone())
}

pub fn entity_view(entity: &CreditedEntity) -> CreditedEntityView {
    match entity {
        CreditedEntity::Person(person) => CreditedEntityView::Person(person_view(person)),
        CreditedEntity::Company { company, members } => {
            CreditedEntityView::Company(CompanyEntityView {
                model: Model::Company,
                uuid: company.id.to_uuid(),
                name: company.name.clone(),
                members: members.iter().map(person_view).collect(),
            })
        }
    }
}

pub fn entity_views(entities: &[CreditedEntity]) -> Vec<CreditedEntityView> {
    entities.iter().map(entity_view).collect()
}

pub fn credit_views(kind: CreditKind, credits: &[Credit]) -> Vec<CreditView> {
    credits
        .iter()
        .map(|credit| CreditView {
            model: credit_model(kind),
            name: credit.name.clone(),
            entities: entity_views(&credit.entities),
        })
        .collect()
}

/// A credited entity list as seen by one person in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonSlice {
    pub employer_company: Option<EmployerCompanyView>,
    pub co_entities: Vec<CreditedEntityView>,
}

/// Returns `None` when the person is not in the list, directly or as a member.
pub fn person_slice(entities: &[CreditedEntity], person: PersonId) -> Option<PersonSlice> {
    if !entities.iter().any(|e| e.involves_person(person)) {
        return None;
    }

    let employer = entities.iter().find_map(|entity| match entity {
        CreditedEntity::Company { company, members }
            if members.iter().any(|m| m.id == person) =>
        {
            Some((company, members))
        }
        _ => None,
    });

    let employer_uuid = employer.map(|(company, _)| company.id.to_uuid());
    let co_entities = entities
        .iter()
        .filter(|entity| entity.uuid() != person.to_uuid())
        .filter(|entity| Some(entity.uuid()) != employer_uuid)
        .map(entity_view)
        .collect();

    Some(PersonSlice {
        employer_company: employer.map(|(company, members)| EmployerCompanyView {
            model: Model::Company,
            uuid: company.id.to_uuid(),
            name: company.name.clone(),
            co_members: members
                .iter()
                .filter(|m| m.id != person)
                .map(person_view)
                .collect(),
        }),
        co_entities,
    })
}

/// A credited entity list as seen by one company in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySlice {
    pub credited_members: Vec<EntityView>,
    pub co_entities: Vec<CreditedEntityView>,
}

pub fn company_slice(entities: &[CreditedEntity], company: CompanyId) -> Option<CompanySlice> {
    let members = entities.iter().find_map(|entity| match entity {
        CreditedEntity::Company { company: c, members } if c.id == company => Some(members),
        _ => None,
    })?;

    Some(CompanySlice {
        credited_members: members.iter().map(person_view).collect(),
        co_entities: entities
            .iter()
            .filter(|entity| entity.uuid() != company.to_uuid())
            .map(entity_view)
            .collect(),
    })
}

pub fn person_credit_views(
    kind: CreditKind,
    credits: &[Credit],
    person: PersonId,
) -> Vec<PersonCreditView> {
    credits
        .iter()
        .filter_map(|credit| {
            let slice = person_slice(&credit.entities, person)?;
            Some(PersonCreditView {
                model: credit_model(kind),
                name: credit.name.clone(),
                employer_company: slice.employer_company,
                co_entities: slice.co_entities,
            })
        })
        .collect()
}

pub fn company_credit_views(
    kind: CreditKind,
    credits: &[Credit],
    company: CompanyId,
) -> Vec<CompanyCreditView> {
    credits
        .iter()
        .filter_map(|credit| {
            let slice = company_slice(&credit.entities, company)?;
            Some(CompanyCreditView {
                model: credit_model(kind),
                name: credit.name.clone(),
                credited_members: slice.credited_members,
                co_entities: slice.co_entities,
            })
        })
        .collect()
}
