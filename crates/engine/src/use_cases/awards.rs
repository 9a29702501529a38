//! Award nomination assembly.
//!
//! One stored nomination is rendered differently per page: unredacted on
//! award and ceremony pages, and trimmed to the subject's point of view on
//! person, company, production and material pages. Every page groups by
//! award, then ceremony (newest first), then category and nomination in
//! ceremony order.

use std::collections::{BTreeMap, HashMap};

use theatrebase_domain::{
    AwardCeremony, AwardId, Category, CompanyId, EntityKey, MaterialId, MaterialRef, Nomination,
    NodeLabel, PersonId, ProductionId, ProductionRef,
};
use theatrebase_shared::requests::{AwardCeremonyRequest, NominationRequest};
use theatrebase_shared::views::{
    AwardNominationsView, CategoryNominationsView, CeremonyNominationsView,
    CompanyNominationView, MaterialNominationView, MaterialSummary, NominationView,
    PersonNominationView, ProductionNominationView, ProductionSummary,
};
use theatrebase_shared::Model;
use uuid::Uuid;

use crate::infrastructure::ports::{ProductionRepo, RepoError};
use crate::use_cases::credits::{
    company_slice, entity_views, person_slice, resolve_entities, validate_entities,
};
use crate::use_cases::identity::IdentityResolver;
use crate::use_cases::validation::{FieldErrors, NAME_REQUIRED};

/// Pre-rendered summaries for every production and material a page's
/// nominations mention.
#[derive(Debug, Clone, Default)]
pub struct NomineeSummaries {
    pub productions: HashMap<ProductionId, ProductionSummary>,
    pub materials: HashMap<MaterialId, MaterialSummary>,
}

impl NomineeSummaries {
    fn productions<'a>(&self, refs: impl IntoIterator<Item = &'a ProductionRef>) -> Vec<ProductionSummary> {
        refs.into_iter()
            .filter_map(|p| self.productions.get(&p.id).cloned())
            .collect()
    }

    fn materials<'a>(&self, refs: impl IntoIterator<Item = &'a MaterialRef>) -> Vec<MaterialSummary> {
        refs.into_iter()
            .filter_map(|m| self.materials.get(&m.id).cloned())
            .collect()
    }
}

// =============================================================================
// Perspectives
// =============================================================================

pub fn nomination_view(nomination: &Nomination, summaries: &NomineeSummaries) -> NominationView {
    NominationView {
        model: Model::Nomination,
        is_winner: nomination.is_winner,
        nomination_type: nomination.type_label().to_string(),
        entities: entity_views(&nomination.entities),
        productions: summaries.productions(&nomination.productions),
        materials: summaries.materials(&nomination.materials),
    }
}

pub fn person_nomination_view(
    nomination: &Nomination,
    person: PersonId,
    summaries: &NomineeSummaries,
) -> Option<PersonNominationView> {
    let slice = person_slice(&nomination.entities, person)?;
    Some(PersonNominationView {
        model: Model::Nomination,
        is_winner: nomination.is_winner,
        nomination_type: nomination.type_label().to_string(),
        employer_company: slice.employer_company,
        co_entities: slice.co_entities,
        productions: summaries.productions(&nomination.productions),
        materials: summaries.materials(&nomination.materials),
    })
}

pub fn company_nomination_view(
    nomination: &Nomination,
    company: CompanyId,
    summaries: &NomineeSummaries,
) -> Option<CompanyNominationView> {
    let slice = company_slice(&nomination.entities, company)?;
    Some(CompanyNominationView {
        model: Model::Nomination,
        is_winner: nomination.is_winner,
        nomination_type: nomination.type_label().to_string(),
        credited_members: slice.credited_members,
        co_entities: slice.co_entities,
        productions: summaries.productions(&nomination.productions),
        materials: summaries.materials(&nomination.materials),
    })
}

/// Nominations of the production or of one of its immediate sub-productions.
/// `recipientProduction` is null when the production itself was nominated.
pub fn production_nomination_view(
    nomination: &Nomination,
    production: ProductionId,
    subs: &[ProductionId],
    summaries: &NomineeSummaries,
) -> Option<ProductionNominationView> {
    let mentions_self = nomination.productions.iter().any(|p| p.id == production);
    let sub_recipient = nomination.productions.iter().find(|p| subs.contains(&p.id));
    if !mentions_self && sub_recipient.is_none() {
        return None;
    }

    Some(ProductionNominationView {
        model: Model::Nomination,
        is_winner: nomination.is_winner,
        nomination_type: nomination.type_label().to_string(),
        recipient_production: if mentions_self {
            None
        } else {
            sub_recipient.and_then(|p| summaries.productions.get(&p.id).cloned())
        },
        entities: entity_views(&nomination.entities),
        co_productions: summaries.productions(
            nomination
                .productions
                .iter()
                .filter(|p| p.id != production && !subs.contains(&p.id)),
        ),
        materials: summaries.materials(&nomination.materials),
    })
}

pub fn material_nomination_view(
    nomination: &Nomination,
    material: MaterialId,
    subs: &[MaterialId],
    summaries: &NomineeSummaries,
) -> Option<MaterialNominationView> {
    let mentions_self = nomination.materials.iter().any(|m| m.id == material);
    let sub_recipient = nomination.materials.iter().find(|m| subs.contains(&m.id));
    if !mentions_self && sub_recipient.is_none() {
        return None;
    }

    Some(MaterialNominationView {
        model: Model::Nomination,
        is_winner: nomination.is_winner,
        nomination_type: nomination.type_label().to_string(),
        recipient_material: if mentions_self {
            None
        } else {
            sub_recipient.and_then(|m| summaries.materials.get(&m.id).cloned())
        },
        entities: entity_views(&nomination.entities),
        productions: summaries.productions(&nomination.productions),
        co_materials: summaries.materials(
            nomination
                .materials
                .iter()
                .filter(|m| m.id != material && !subs.contains(&m.id)),
        ),
    })
}

// =============================================================================
// Grouping
// =============================================================================

fn category_views<N>(
    categories: &[Category],
    project: &impl Fn(&Nomination) -> Option<N>,
    keep_empty: bool,
) -> Vec<CategoryNominationsView<N>> {
    categories
        .iter()
        .map(|category| CategoryNominationsView {
            model: Model::AwardCeremonyCategory,
            name: category.name.clone(),
            nominations: category.nominations.iter().filter_map(project).collect(),
        })
        .filter(|category| keep_empty || !category.nominations.is_empty())
        .collect()
}

/// Ceremony names are years or editions, so name-descending is newest first.
fn newest_first(ceremonies: &mut [&AwardCeremony]) {
    ceremonies.sort_by(|a, b| b.name.cmp(&a.name).then(a.id.cmp(&b.id)));
}

/// Every category of one ceremony, including those without nominations.
pub fn ceremony_categories(
    ceremony: &AwardCeremony,
    summaries: &NomineeSummaries,
) -> Vec<CategoryNominationsView<NominationView>> {
    let project = |n: &Nomination| Some(nomination_view(n, summaries));
    category_views(&ceremony.categories, &project, true)
}

/// An award page's ceremonies, newest first, with full nominations.
pub fn award_ceremonies(
    ceremonies: &[AwardCeremony],
    summaries: &NomineeSummaries,
) -> Vec<CeremonyNominationsView<NominationView>> {
    let mut ordered: Vec<&AwardCeremony> = ceremonies.iter().collect();
    newest_first(&mut ordered);
    ordered
        .into_iter()
        .map(|ceremony| CeremonyNominationsView {
            model: Model::AwardCeremony,
            uuid: ceremony.id.to_uuid(),
            name: ceremony.name.clone(),
            categories: ceremony_categories(ceremony, summaries),
        })
        .collect()
}

/// Groups the nominations `project` keeps into award → ceremony → category.
/// Awards are ordered by name; categories and ceremonies without a kept
/// nomination are dropped.
pub fn group_by_award<N>(
    ceremonies: &[AwardCeremony],
    project: impl Fn(&Nomination) -> Option<N>,
) -> Vec<AwardNominationsView<N>> {
    let mut by_award: BTreeMap<(String, AwardId), Vec<&AwardCeremony>> = BTreeMap::new();
    for ceremony in ceremonies {
        if let Some(award) = &ceremony.award {
            by_award
                .entry((award.name.clone(), award.id))
                .or_default()
                .push(ceremony);
        }
    }

    by_award
        .into_iter()
        .filter_map(|((name, award), mut ceremonies)| {
            newest_first(&mut ceremonies);
            let ceremonies: Vec<CeremonyNominationsView<N>> = ceremonies
                .into_iter()
                .filter_map(|ceremony| {
                    let categories = category_views(&ceremony.categories, &project, false);
                    (!categories.is_empty()).then(|| CeremonyNominationsView {
                        model: Model::AwardCeremony,
                        uuid: ceremony.id.to_uuid(),
                        name: ceremony.name.clone(),
                        categories,
                    })
                })
                .collect();
            (!ceremonies.is_empty()).then(|| AwardNominationsView {
                model: Model::Award,
                uuid: award.to_uuid(),
                name,
                ceremonies,
            })
        })
        .collect()
}

// =============================================================================
// Write path
// =============================================================================

fn nomination_is_blank(nomination: &NominationRequest) -> bool {
    nomination.entities.iter().all(|e| e.is_blank())
        && nomination.productions.iter().all(|p| p.is_blank())
        && nomination.materials.iter().all(|m| m.is_blank())
}

pub fn validate_ceremony(errors: &mut FieldErrors, request: &AwardCeremonyRequest) {
    if request.name.trim().is_empty() {
        errors.add("name", NAME_REQUIRED);
    }

    for (category_index, category) in request.categories.iter().enumerate() {
        let nominated = category.nominations.iter().any(|n| !nomination_is_blank(n));
        if nominated && category.name.trim().is_empty() {
            errors.add(format!("categories[{category_index}].name"), NAME_REQUIRED);
        }

        for (index, nomination) in category.nominations.iter().enumerate() {
            let prefix = format!("categories[{category_index}].nominations[{index}]");
            validate_entities(errors, &format!("{prefix}.entities"), &nomination.entities);

            for (production_index, production) in nomination.productions.iter().enumerate() {
                let Some(uuid) = production.uuid.as_deref().map(str::trim) else {
                    continue;
                };
                if !uuid.is_empty() && Uuid::parse_str(uuid).is_err() {
                    errors.add(
                        format!("{prefix}.productions[{production_index}].uuid"),
                        "Value must be a valid uuid",
                    );
                }
            }
        }
    }
}

/// Resolves nominees. Productions must already exist; unknown ones are
/// recorded in `errors`.
pub async fn resolve_categories(
    resolver: &IdentityResolver,
    productions: &dyn ProductionRepo,
    request: &AwardCeremonyRequest,
    errors: &mut FieldErrors,
) -> Result<Vec<Category>, RepoError> {
    let mut categories = Vec::new();

    for (category_index, category) in request.categories.iter().enumerate() {
        let name = category.name.trim();
        if name.is_empty() {
            continue;
        }

        let mut nominations = Vec::new();
        for (index, request) in category.nominations.iter().enumerate() {
            if nomination_is_blank(request) {
                continue;
            }

            let mut nominated_productions = Vec::new();
            for (production_index, production) in request.productions.iter().enumerate() {
                let Some(uuid) = production
                    .uuid
                    .as_deref()
                    .and_then(|u| Uuid::parse_str(u.trim()).ok())
                else {
                    continue;
                };
                match productions.get(ProductionId::from_uuid(uuid)).await? {
                    Some(found) => nominated_productions.push(found.to_ref()),
                    None => errors.add(
                        format!(
                            "categories[{category_index}].nominations[{index}].productions[{production_index}].uuid"
                        ),
                        "Production not found",
                    ),
                }
            }

            let mut materials = Vec::new();
            for material in &request.materials {
                let Ok(key) = EntityKey::new(&material.name, material.differentiator.as_deref())
                else {
                    continue;
                };
                materials.push(resolver.resolve_named(NodeLabel::Material, &key).await?);
            }

            nominations.push(Nomination {
                is_winner: request.is_winner.unwrap_or(false),
                custom_type: request
                    .custom_type
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
                entities: resolve_entities(resolver, &request.entities).await?,
                productions: nominated_productions,
                materials,
            });
        }

        categories.push(Category {
            name: name.to_string(),
            nominations,
        });
    }

    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use theatrebase_domain::{AwardCeremonyId, CreditedEntity, Named};

    fn named<I: From<Uuid>>(n: u128, name: &str) -> Named<I> {
        Named::new(I::from(Uuid::from_u128(n)), &EntityKey::new(name, None).expect("key"))
    }

    fn production_ref(n: u128, name: &str) -> ProductionRef {
        ProductionRef {
            id: ProductionId::from_uuid(Uuid::from_u128(n)),
            name: name.to_string(),
        }
    }

    fn summary(n: u128, name: &str) -> ProductionSummary {
        ProductionSummary {
            model: Model::Production,
            uuid: Uuid::from_u128(n),
            name: name.to_string(),
            start_date: None,
            end_date: None,
            venue: None,
            sur_production: None,
        }
    }

    fn summaries() -> NomineeSummaries {
        let mut summaries = NomineeSummaries::default();
        for (n, name) in [(30, "The Lehman Trilogy"), (31, "Part One"), (32, "Leopoldstadt")] {
            summaries
                .productions
                .insert(ProductionId::from_uuid(Uuid::from_u128(n)), summary(n, name));
        }
        summaries
    }

    fn ceremony(n: u128, name: &str, award: Option<(u128, &str)>, nominations: Vec<Nomination>) -> AwardCeremony {
        AwardCeremony {
            id: AwardCeremonyId::from_uuid(Uuid::from_u128(n)),
            name: name.to_string(),
            award: award.map(|(id, name)| named(id, name)),
            categories: vec![
                Category {
                    name: "Best Director".to_string(),
                    nominations,
                },
                Category {
                    name: "Best Costume Design".to_string(),
                    nominations: Vec::new(),
                },
            ],
        }
    }

    fn nomination(entities: Vec<CreditedEntity>, productions: Vec<ProductionRef>) -> Nomination {
        Nomination {
            is_winner: false,
            custom_type: None,
            entities,
            productions,
            materials: Vec::new(),
        }
    }

    #[test]
    fn production_recipient_is_null_for_the_subject_itself() {
        let subject = ProductionId::from_uuid(Uuid::from_u128(30));
        let sub = ProductionId::from_uuid(Uuid::from_u128(31));

        let own = nomination(Vec::new(), vec![production_ref(30, "The Lehman Trilogy"), production_ref(32, "Leopoldstadt")]);
        let view = production_nomination_view(&own, subject, &[sub], &summaries()).expect("view");
        assert_eq!(view.recipient_production, None);
        let co: Vec<&str> = view.co_productions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(co, vec!["Leopoldstadt"]);

        let of_sub = nomination(Vec::new(), vec![production_ref(31, "Part One")]);
        let view = production_nomination_view(&of_sub, subject, &[sub], &summaries()).expect("view");
        assert_eq!(view.recipient_production.map(|p| p.name), Some("Part One".to_string()));
        assert!(view.co_productions.is_empty());

        let unrelated = nomination(Vec::new(), vec![production_ref(32, "Leopoldstadt")]);
        assert!(production_nomination_view(&unrelated, subject, &[sub], &summaries()).is_none());
    }

    #[test]
    fn grouping_orders_awards_by_name_and_ceremonies_newest_first() {
        let director = PersonId::from_uuid(Uuid::from_u128(1));
        let nominated = || nomination(vec![CreditedEntity::Person(named(1, "Sam Mendes"))], Vec::new());
        let ceremonies = vec![
            ceremony(10, "2019", Some((100, "Laurence Olivier Awards")), vec![nominated()]),
            ceremony(11, "2020", Some((100, "Laurence Olivier Awards")), vec![nominated()]),
            ceremony(12, "2019", Some((101, "Evening Standard Theatre Awards")), vec![nominated()]),
            ceremony(13, "2021", Some((100, "Laurence Olivier Awards")), Vec::new()),
        ];

        let grouped = group_by_award(&ceremonies, |n| person_nomination_view(n, director, &summaries()));

        let awards: Vec<&str> = grouped.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(awards, vec!["Evening Standard Theatre Awards", "Laurence Olivier Awards"]);
        let olivier: Vec<&str> = grouped[1].ceremonies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(olivier, vec!["2020", "2019"]);
        assert_eq!(grouped[1].ceremonies[0].categories.len(), 1);
    }

    #[test]
    fn ceremony_pages_keep_empty_categories_and_default_type() {
        let won = Nomination {
            is_winner: true,
            ..nomination(vec![CreditedEntity::Person(named(1, "Sam Mendes"))], Vec::new())
        };
        let ceremony = ceremony(10, "2019", None, vec![won]);

        let categories = ceremony_categories(&ceremony, &summaries());

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].nominations[0].nomination_type, "Winner");
        assert!(categories[1].nominations.is_empty());
    }

    #[test]
    fn invalid_production_uuids_are_field_errors() {
        let request: AwardCeremonyRequest = serde_json::from_value(serde_json::json!({
            "name": "2020",
            "categories": [{
                "name": "Best Revival",
                "nominations": [{ "productions": [{ "uuid": "not-a-uuid" }] }]
            }]
        }))
        .expect("deserialize");

        let mut errors = FieldErrors::new();
        validate_ceremony(&mut errors, &request);

        assert!(errors
            .get("categories[0].nominations[0].productions[0].uuid")
            .is_some());
    }
}
