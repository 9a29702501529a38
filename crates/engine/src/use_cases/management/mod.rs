//! Write commands: create, update and delete for every subject type.
//!
//! Every write follows the same sequence: validate the payload, claim or
//! re-key the subject's identity, resolve referenced entities, check
//! surrogate invariants, then save the aggregate in one store transaction.
//! The response is the subject's freshly projected page.

mod award;
mod keyed;
mod material;
mod production;
mod venue;

pub use award::CEREMONY_TAKEN;
pub use keyed::{KeyedSubject, HAS_DEPENDENTS};

use std::collections::BTreeMap;
use std::sync::Arc;

use theatrebase_domain::{EntityKey, NodeLabel, SurrogateViolation};
use theatrebase_shared::views::EntityView;
use theatrebase_shared::Model;
use uuid::Uuid;

use crate::app::Repositories;
use crate::infrastructure::ports::{RepoError, UuidPort};
use crate::use_cases::identity::{Claim, IdentityResolver, Rekey};
use crate::use_cases::projection::{Page, ProjectionError, Projector, Subject, SubjectKind};
use crate::use_cases::surrogates::{Hierarchy, SurrogateWalker};
use crate::use_cases::validation::FieldErrors;

pub const KEY_TAKEN: &str = "Name and differentiator combination already exists";

pub type FieldMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("{kind} not found: {uuid}")]
    NotFound { kind: SubjectKind, uuid: Uuid },
    #[error("Uniqueness conflict")]
    UniquenessConflict(FieldMap),
    #[error("Ambiguous reference")]
    AmbiguousReference(FieldMap),
    #[error("Validation failed")]
    Validation(FieldMap),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl WriteError {
    pub fn not_found(kind: SubjectKind, uuid: impl Into<Uuid>) -> Self {
        Self::NotFound {
            kind,
            uuid: uuid.into(),
        }
    }

    /// The field-path map carried by input errors.
    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            WriteError::UniquenessConflict(fields)
            | WriteError::AmbiguousReference(fields)
            | WriteError::Validation(fields) => Some(fields),
            WriteError::NotFound { .. } | WriteError::Repo(_) => None,
        }
    }

    fn key_taken() -> Self {
        let mut fields = FieldMap::new();
        for field in ["name", "differentiator"] {
            fields.insert(field.to_string(), vec![KEY_TAKEN.to_string()]);
        }
        Self::UniquenessConflict(fields)
    }
}

impl From<FieldErrors> for WriteError {
    fn from(errors: FieldErrors) -> Self {
        if errors.is_ambiguity_only() {
            Self::AmbiguousReference(errors.into_map())
        } else {
            Self::Validation(errors.into_map())
        }
    }
}

impl From<ProjectionError> for WriteError {
    fn from(error: ProjectionError) -> Self {
        match error {
            ProjectionError::NotFound { kind, uuid } => Self::NotFound { kind, uuid },
            ProjectionError::Repo(e) => Self::Repo(e),
        }
    }
}

/// Fails with the collected errors, if any.
fn check(errors: FieldErrors) -> Result<(), WriteError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}

fn label_model(label: NodeLabel) -> Model {
    match label {
        NodeLabel::Material => Model::Material,
        NodeLabel::Venue => Model::Venue,
        NodeLabel::Person => Model::Person,
        NodeLabel::Company => Model::Company,
        NodeLabel::Character => Model::Character,
        NodeLabel::Award => Model::Award,
    }
}

#[derive(Clone)]
pub struct Management {
    repos: Repositories,
    resolver: IdentityResolver,
    walker: SurrogateWalker,
    projector: Projector,
    uuids: Arc<dyn UuidPort>,
}

impl Management {
    pub fn new(repos: Repositories, uuids: Arc<dyn UuidPort>, projector: Projector) -> Self {
        Self {
            resolver: IdentityResolver::new(repos.identity.clone(), uuids.clone()),
            walker: SurrogateWalker::new(repos.clone()),
            repos,
            projector,
            uuids,
        }
    }

    async fn page(&self, subject: Subject) -> Result<Page, WriteError> {
        Ok(self.projector.project(subject).await?)
    }

    /// Claims `key` for a new keyed subject and runs `write` against the new
    /// id. The node is removed again if `write` fails.
    async fn create_keyed<F, Fut>(
        &self,
        label: NodeLabel,
        key: &EntityKey,
        write: F,
    ) -> Result<Uuid, WriteError>
    where
        F: FnOnce(Uuid) -> Fut,
        Fut: std::future::Future<Output = Result<(), WriteError>>,
    {
        let id = match self.resolver.claim(label, key).await? {
            Claim::Created(id) => id,
            Claim::Conflict(_) => return Err(WriteError::key_taken()),
        };

        if let Err(e) = write(id).await {
            tracing::debug!(%label, %id, error = %e, "Write failed; releasing claimed key");
            if let Err(cleanup) = self.resolver.delete(label, id).await {
                tracing::warn!(%label, %id, error = %cleanup, "Failed to release claimed key");
            }
            return Err(e);
        }

        tracing::info!(%label, %id, key = %key, "Created");
        Ok(id)
    }

    /// Moves an existing subject onto `key`.
    async fn rekey(
        &self,
        label: NodeLabel,
        id: Uuid,
        key: &EntityKey,
    ) -> Result<(), WriteError> {
        match self.resolver.reclaim(label, id, key).await? {
            Rekey::Applied => Ok(()),
            Rekey::Conflict(_) => Err(WriteError::key_taken()),
        }
    }

    /// Records each surrogate violation against `field(index)`.
    async fn check_subs(
        &self,
        errors: &mut FieldErrors,
        hierarchy: Hierarchy,
        owner: Uuid,
        children: &[(usize, Uuid)],
        field: impl Fn(usize) -> String,
    ) -> Result<(), RepoError> {
        let ids: Vec<Uuid> = children.iter().map(|(_, id)| *id).collect();
        for (position, violation) in self.walker.check_subs(hierarchy, owner, &ids).await? {
            let index = children[position].0;
            errors.add(field(index), violation.to_string());
        }
        Ok(())
    }

    async fn delete_keyed(
        &self,
        kind: SubjectKind,
        label: NodeLabel,
        id: Uuid,
    ) -> Result<EntityView, WriteError> {
        let existing = self
            .resolver
            .get(label, id)
            .await?
            .ok_or_else(|| WriteError::not_found(kind, id))?;
        self.resolver.delete(label, id).await?;
        tracing::info!(%label, %id, "Deleted");
        Ok(EntityView::new(label_model(label), id, existing.name))
    }
}

fn self_reference_message() -> String {
    SurrogateViolation::SelfReference.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use theatrebase_domain::{CharacterId, CompanyId, MaterialId, PersonId, ProductionId, VenueId};
    use theatrebase_shared::requests::{
        AwardCeremonyRequest, KeyedEntityRequest, MaterialRequest, ProductionRequest, VenueRequest,
    };
    use theatrebase_shared::views::{CreditedEntityView, MaterialView, ProductionView};

    use crate::infrastructure::ids::SequentialUuids;
    use crate::test_fixtures::memory_repositories;
    use crate::use_cases::projection::Listing;

    fn management() -> Management {
        let repos = memory_repositories();
        Management::new(
            repos.clone(),
            Arc::new(SequentialUuids::new()),
            Projector::new(repos),
        )
    }

    fn request<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).expect("request")
    }

    async fn material(management: &Management, value: serde_json::Value) -> MaterialView {
        let request: MaterialRequest = request(value);
        match management.create_material(&request).await.expect("material") {
            Page::Material(view) => view,
            other => panic!("expected material page, got {other:?}"),
        }
    }

    async fn production(management: &Management, value: serde_json::Value) -> ProductionView {
        let request: ProductionRequest = request(value);
        match management.create_production(&request).await.expect("production") {
            Page::Production(view) => view,
            other => panic!("expected production page, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_keys_conflict_and_differentiators_split_them() {
        let management = management();
        material(&management, json!({ "name": "Hamlet" })).await;

        let duplicate: MaterialRequest = request(json!({ "name": "Hamlet", "differentiator": "" }));
        let err = management.create_material(&duplicate).await.unwrap_err();
        match err {
            WriteError::UniquenessConflict(fields) => {
                assert_eq!(fields["name"], vec![KEY_TAKEN.to_string()]);
                assert_eq!(fields["differentiator"], vec![KEY_TAKEN.to_string()]);
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        let split = material(&management, json!({ "name": "Hamlet", "differentiator": "2" })).await;
        assert_eq!(split.differentiator, "2");
    }

    #[tokio::test]
    async fn concurrent_creates_of_one_key_yield_one_subject() {
        let management = management();
        let request: MaterialRequest = request(json!({ "name": "The Seagull" }));

        let (a, b) = tokio::join!(
            management.create_material(&request),
            management.create_material(&request)
        );

        let created = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(created, 1);
        assert!([a, b]
            .into_iter()
            .any(|r| matches!(r, Err(WriteError::UniquenessConflict(_)))));
    }

    #[tokio::test]
    async fn failed_create_releases_the_claimed_key() {
        let management = management();
        let self_sub: MaterialRequest = request(json!({
            "name": "The Coast of Utopia",
            "subMaterials": [{ "name": "The Coast of Utopia" }]
        }));

        match management.create_material(&self_sub).await.unwrap_err() {
            WriteError::Validation(fields) => {
                assert!(fields.contains_key("subMaterials[0].name"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let created = material(&management, json!({ "name": "The Coast of Utopia" })).await;
        assert_eq!(created.name, "The Coast of Utopia");
    }

    #[tokio::test]
    async fn a_sub_material_cannot_have_two_sur_materials() {
        let management = management();
        material(&management, json!({
            "name": "The Lehman Trilogy",
            "subMaterials": [{ "name": "Three Brothers" }]
        }))
        .await;

        let second: MaterialRequest = request(json!({
            "name": "Another Trilogy",
            "subMaterials": [{ "name": "Other Part" }, { "name": "Three Brothers" }]
        }));
        match management.create_material(&second).await.unwrap_err() {
            WriteError::Validation(fields) => {
                assert!(fields.contains_key("subMaterials[1].name"));
                assert!(!fields.contains_key("subMaterials[0].name"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn same_named_characters_need_a_differentiator_when_cast() {
        let management = management();
        let play = material(&management, json!({
            "name": "Julius Caesar",
            "characterGroups": [{ "characters": [
                { "name": "Cinna", "differentiator": "1" },
                { "name": "Cinna", "differentiator": "2", "qualifier": "the poet" }
            ] }]
        }))
        .await;
        let poet = play.character_groups[0].characters[1].uuid;

        let ambiguous: ProductionRequest = request(json!({
            "name": "Julius Caesar",
            "material": { "name": "Julius Caesar" },
            "cast": [{ "name": "Ray Fearon", "roles": [{ "name": "Cinna", "qualifier": "the poet" }] }]
        }));
        match management.create_production(&ambiguous).await.unwrap_err() {
            WriteError::AmbiguousReference(fields) => {
                assert!(fields.contains_key("cast[0].roles[0].characterDifferentiator"));
            }
            other => panic!("expected ambiguous reference, got {other:?}"),
        }

        let staged = production(&management, json!({
            "name": "Julius Caesar",
            "material": { "name": "Julius Caesar" },
            "cast": [{ "name": "Ray Fearon", "roles": [
                { "name": "Cinna", "characterDifferentiator": "2", "qualifier": "the poet" }
            ] }]
        }))
        .await;
        assert_eq!(staged.cast[0].roles[0].uuid, Some(poet));
        assert_eq!(staged.cast[0].roles[0].qualifier.as_deref(), Some("the poet"));
    }

    #[tokio::test]
    async fn alternating_cast_keeps_assignment_order() {
        let management = management();
        let staged = production(&management, json!({
            "name": "Othello",
            "cast": [
                { "name": "Adrian Lester", "roles": [{ "name": "Othello" }, { "name": "Iago", "isAlternate": true }] },
                { "name": "Rory Kinnear", "roles": [{ "name": "Iago" }, { "name": "Othello", "isAlternate": true }] }
            ]
        }))
        .await;

        let names: Vec<Vec<(&str, bool)>> = staged
            .cast
            .iter()
            .map(|m| m.roles.iter().map(|r| (r.name.as_str(), r.is_alternate)).collect())
            .collect();
        assert_eq!(
            names,
            vec![
                vec![("Othello", false), ("Iago", true)],
                vec![("Iago", false), ("Othello", true)],
            ]
        );
    }

    #[tokio::test]
    async fn person_page_shows_employer_company_and_co_entities() {
        let management = management();
        let staged = production(&management, json!({
            "name": "War Horse",
            "creativeCredits": [{
                "name": "Puppetry",
                "entities": [
                    { "model": "COMPANY", "name": "Handspring Puppet Company",
                      "members": [{ "name": "Basil Jones" }, { "name": "Adrian Kohler" }] },
                    { "name": "Toby Sedgwick" }
                ]
            }]
        }))
        .await;

        let CreditedEntityView::Company(company) = &staged.creative_credits[0].entities[0] else {
            panic!("expected a company");
        };
        let basil = PersonId::from_uuid(company.members[0].uuid);

        let Page::Person(person) = management
            .projector
            .project(Subject::Person(basil))
            .await
            .expect("person page")
        else {
            panic!("expected person page");
        };

        let credit = &person.creative_productions[0].credits[0];
        assert_eq!(credit.name, "Puppetry");
        let employer = credit.employer_company.as_ref().expect("employer");
        assert_eq!(employer.name, "Handspring Puppet Company");
        let co_members: Vec<&str> = employer.co_members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(co_members, vec!["Adrian Kohler"]);
        let co_entities: Vec<Uuid> = credit.co_entities.iter().map(|e| e.uuid()).collect();
        assert_eq!(co_entities.len(), 1);
        assert_ne!(co_entities[0], company.uuid);
    }

    #[tokio::test]
    async fn creative_credits_need_a_label() {
        let management = management();
        let unlabelled: ProductionRequest = request(json!({
            "name": "Cyprus Avenue",
            "creativeCredits": [{ "entities": [{ "name": "Vicky Featherstone" }] }],
            "producerCredits": [{ "entities": [{ "name": "Royal Court Theatre", "model": "COMPANY" }] }]
        }));

        match management.create_production(&unlabelled).await.unwrap_err() {
            WriteError::Validation(fields) => {
                assert!(fields.contains_key("creativeCredits[0].name"));
                assert!(!fields.contains_key("producerCredits[0].name"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn production_awards_name_the_nominated_sub_production() {
        let management = management();
        let part_one = production(&management, json!({ "name": "Part One" })).await;
        let trilogy = production(&management, json!({
            "name": "The Lehman Trilogy",
            "subProductions": [{ "uuid": part_one.uuid.to_string() }]
        }))
        .await;

        let ceremony = |name: &str, nominee: Uuid| -> AwardCeremonyRequest {
            request(json!({
                "name": name,
                "award": { "name": "Laurence Olivier Awards" },
                "categories": [{
                    "name": "Best New Play",
                    "nominations": [{ "isWinner": true, "productions": [{ "uuid": nominee.to_string() }] }]
                }]
            }))
        };
        management
            .create_ceremony(&ceremony("2019", part_one.uuid))
            .await
            .expect("2019");
        let Page::AwardCeremony(latest) = management
            .create_ceremony(&ceremony("2020", trilogy.uuid))
            .await
            .expect("2020")
        else {
            panic!("expected ceremony page");
        };

        let Page::Production(page) = management
            .projector
            .project(Subject::Production(ProductionId::from_uuid(trilogy.uuid)))
            .await
            .expect("production page")
        else {
            panic!("expected production page");
        };
        let ceremonies = &page.awards[0].ceremonies;
        assert_eq!(ceremonies[0].name, "2020");
        assert_eq!(ceremonies[0].categories[0].nominations[0].recipient_production, None);
        assert_eq!(ceremonies[1].name, "2019");
        let recipient = ceremonies[1].categories[0].nominations[0]
            .recipient_production
            .as_ref()
            .expect("recipient");
        assert_eq!(recipient.uuid, part_one.uuid);
        assert_eq!(ceremonies[1].categories[0].nominations[0].nomination_type, "Winner");

        let award = latest.award.expect("award");
        let rejected = management
            .delete_keyed_subject(KeyedSubject::Award, award.uuid)
            .await
            .unwrap_err();
        assert!(matches!(rejected, WriteError::Validation(fields) if fields.contains_key("associations")));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_ceremony_creates_yield_one_ceremony() {
        let management = management();

        for round in 0..25 {
            let request: AwardCeremonyRequest = request(json!({
                "name": format!("{}", 1990 + round),
                "award": { "name": "Laurence Olivier Awards" }
            }));
            let tasks = [0, 1].map(|_| {
                let management = management.clone();
                let request = request.clone();
                tokio::spawn(async move { management.create_ceremony(&request).await })
            });

            let mut created = 0;
            let mut conflicts = 0;
            for task in tasks {
                match task.await.expect("task") {
                    Ok(_) => created += 1,
                    Err(WriteError::UniquenessConflict(fields)) => {
                        assert_eq!(fields["name"], vec![CEREMONY_TAKEN.to_string()]);
                        conflicts += 1;
                    }
                    Err(other) => panic!("unexpected error: {other:?}"),
                }
            }
            assert_eq!((created, conflicts), (1, 1), "round {round}");
        }

        let Listing::AwardCeremonies(ceremonies) = management
            .projector
            .list(SubjectKind::AwardCeremony)
            .await
            .expect("listing")
        else {
            panic!("expected ceremony listing");
        };
        assert_eq!(ceremonies.len(), 25);
    }

    #[tokio::test]
    async fn ceremony_names_are_unique_within_an_award() {
        let management = management();
        let ceremony: AwardCeremonyRequest = request(json!({
            "name": "2019",
            "award": { "name": "Evening Standard Theatre Awards" }
        }));
        management.create_ceremony(&ceremony).await.expect("first");

        assert!(matches!(
            management.create_ceremony(&ceremony).await,
            Err(WriteError::UniquenessConflict(_))
        ));
    }

    #[tokio::test]
    async fn character_page_collects_variant_names() {
        let management = management();
        let henry_iv = material(&management, json!({
            "name": "Henry IV, Part 1",
            "characterGroups": [{ "characters": [
                { "name": "Prince Hal", "underlyingName": "Henry V" }
            ] }]
        }))
        .await;
        production(&management, json!({
            "name": "Henry IV, Part 1",
            "material": { "name": "Henry IV, Part 1" },
            "cast": [{ "name": "Alex Hassell", "roles": [{ "name": "Hal", "characterName": "Henry V" }] }]
        }))
        .await;

        let character = henry_iv.character_groups[0].characters[0].uuid;
        let Page::Character(page) = management
            .projector
            .project(Subject::Character(theatrebase_domain::CharacterId::from_uuid(character)))
            .await
            .expect("character page")
        else {
            panic!("expected character page");
        };

        assert_eq!(page.name, "Henry V");
        assert_eq!(page.variant_named_depictions, vec!["Prince Hal"]);
        assert_eq!(page.variant_named_portrayals, vec!["Hal"]);
        assert_eq!(page.productions[0].performers[0].role_name, "Hal");
    }

    #[tokio::test]
    async fn same_named_characters_keep_separate_performers() {
        let management = management();
        let play = material(&management, json!({
            "name": "Julius Caesar",
            "characterGroups": [{ "characters": [
                { "name": "Cinna", "differentiator": "1" },
                { "name": "Cinna", "differentiator": "2" },
                { "name": "Volumnius" }
            ] }]
        }))
        .await;
        production(&management, json!({
            "name": "Julius Caesar",
            "material": { "name": "Julius Caesar" },
            "cast": [
                { "name": "Person A", "roles": [
                    { "name": "Cinna", "characterDifferentiator": "1" },
                    { "name": "Volumnius" }
                ] },
                { "name": "Person B", "roles": [{ "name": "Cinna", "characterDifferentiator": "2" }] }
            ]
        }))
        .await;

        let mut performers = Vec::new();
        for character in &play.character_groups[0].characters[..2] {
            let Page::Character(page) = management
                .page(Subject::Character(CharacterId::from_uuid(character.uuid)))
                .await
                .expect("character page")
            else {
                panic!("expected character page");
            };
            assert_eq!(page.productions.len(), 1);
            let listed: Vec<(String, Vec<String>)> = page.productions[0]
                .performers
                .iter()
                .map(|p| (p.name.clone(), p.other_roles.iter().map(|r| r.name.clone()).collect()))
                .collect();
            performers.push(listed);
        }

        assert_eq!(
            performers[0],
            vec![("Person A".to_string(), vec!["Volumnius".to_string()])]
        );
        assert_eq!(performers[1], vec![("Person B".to_string(), Vec::new())]);
    }

    #[tokio::test]
    async fn nominees_are_left_out_of_their_own_nomination() {
        let management = management();
        material(&management, json!({ "name": "Jerusalem" })).await;
        material(&management, json!({ "name": "Enron" })).await;

        let ceremony: AwardCeremonyRequest = request(json!({
            "name": "2010",
            "award": { "name": "Laurence Olivier Awards" },
            "categories": [{
                "name": "Best New Play",
                "nominations": [{
                    "entities": [
                        { "name": "Mark Rylance" },
                        { "model": "COMPANY", "name": "Royal Court Theatre",
                          "members": [{ "name": "Jez Butterworth" }] }
                    ],
                    "materials": [{ "name": "Jerusalem" }, { "name": "Enron" }]
                }]
            }]
        }));
        let Page::AwardCeremony(page) = management.create_ceremony(&ceremony).await.expect("ceremony")
        else {
            panic!("expected ceremony page");
        };

        // The ceremony page itself lists every nominee.
        let nomination = &page.categories[0].nominations[0];
        assert_eq!(nomination.entities.len(), 2);
        let materials: Vec<&str> = nomination.materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(materials, vec!["Jerusalem", "Enron"]);

        let rylance = nomination.entities[0].uuid();
        let CreditedEntityView::Company(company) = &nomination.entities[1] else {
            panic!("expected a company");
        };
        let butterworth = company.members[0].uuid;
        let jerusalem = nomination.materials[0].uuid;

        let Page::Person(person) = management
            .page(Subject::Person(PersonId::from_uuid(rylance)))
            .await
            .expect("person page")
        else {
            panic!("expected person page");
        };
        let own = &person.awards[0].ceremonies[0].categories[0].nominations[0];
        assert_eq!(own.employer_company, None);
        let co_entities: Vec<Uuid> = own.co_entities.iter().map(|e| e.uuid()).collect();
        assert_eq!(co_entities, vec![company.uuid]);

        let Page::Person(member) = management
            .page(Subject::Person(PersonId::from_uuid(butterworth)))
            .await
            .expect("member page")
        else {
            panic!("expected person page");
        };
        let own = &member.awards[0].ceremonies[0].categories[0].nominations[0];
        let employer = own.employer_company.as_ref().expect("employer");
        assert_eq!(employer.name, "Royal Court Theatre");
        assert!(employer.co_members.is_empty());
        let co_entities: Vec<Uuid> = own.co_entities.iter().map(|e| e.uuid()).collect();
        assert_eq!(co_entities, vec![rylance]);

        let Page::Company(company_page) = management
            .page(Subject::Company(CompanyId::from_uuid(company.uuid)))
            .await
            .expect("company page")
        else {
            panic!("expected company page");
        };
        let own = &company_page.awards[0].ceremonies[0].categories[0].nominations[0];
        let members: Vec<&str> = own.credited_members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(members, vec!["Jez Butterworth"]);
        let co_entities: Vec<Uuid> = own.co_entities.iter().map(|e| e.uuid()).collect();
        assert_eq!(co_entities, vec![rylance]);

        let Page::Material(material_page) = management
            .page(Subject::Material(MaterialId::from_uuid(jerusalem)))
            .await
            .expect("material page")
        else {
            panic!("expected material page");
        };
        let own = &material_page.awards[0].ceremonies[0].categories[0].nominations[0];
        assert_eq!(own.recipient_material, None);
        assert_eq!(own.entities.len(), 2);
        let co_materials: Vec<&str> = own.co_materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(co_materials, vec!["Enron"]);
    }

    #[tokio::test]
    async fn venue_page_drops_sur_productions_of_listed_sub_productions() {
        let management = management();
        let venue: VenueRequest = request(json!({
            "name": "National Theatre",
            "subVenues": [{ "name": "Olivier Theatre" }]
        }));
        let Page::Venue(national) = management.create_venue(&venue).await.expect("venue") else {
            panic!("expected venue page");
        };

        let part_one = production(&management, json!({
            "name": "Part One",
            "venue": { "name": "Olivier Theatre" }
        }))
        .await;
        production(&management, json!({
            "name": "The Lehman Trilogy",
            "venue": { "name": "National Theatre" },
            "subProductions": [{ "uuid": part_one.uuid.to_string() }]
        }))
        .await;
        let standalone = production(&management, json!({
            "name": "Small Island",
            "venue": { "name": "National Theatre" }
        }))
        .await;

        let Page::Venue(page) = management
            .page(Subject::Venue(VenueId::from_uuid(national.uuid)))
            .await
            .expect("venue page")
        else {
            panic!("expected venue page");
        };

        let mut listed: Vec<Uuid> = page.productions.iter().map(|p| p.uuid).collect();
        listed.sort();
        let mut expected = vec![part_one.uuid, standalone.uuid];
        expected.sort();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn material_page_drops_sur_productions_of_listed_sub_productions() {
        let management = management();
        let trilogy = material(&management, json!({
            "name": "The Lehman Trilogy",
            "subMaterials": [{ "name": "Three Brothers" }]
        }))
        .await;

        let part_one = production(&management, json!({
            "name": "Three Brothers",
            "material": { "name": "Three Brothers" }
        }))
        .await;
        production(&management, json!({
            "name": "The Lehman Trilogy",
            "material": { "name": "The Lehman Trilogy" },
            "subProductions": [{ "uuid": part_one.uuid.to_string() }]
        }))
        .await;

        let Page::Material(page) = management
            .page(Subject::Material(MaterialId::from_uuid(trilogy.uuid)))
            .await
            .expect("material page")
        else {
            panic!("expected material page");
        };

        let listed: Vec<Uuid> = page.productions.iter().map(|p| p.uuid).collect();
        assert_eq!(listed, vec![part_one.uuid]);
        let sur = page.productions[0].sur_production.as_ref().expect("sur-production");
        assert_eq!(sur.name, "The Lehman Trilogy");
    }

    #[tokio::test]
    async fn keyed_subjects_rename_and_delete() {
        let management = management();
        let Page::Person(person) = management
            .create_keyed_subject(KeyedSubject::Person, &KeyedEntityRequest::new("Judi Dench"))
            .await
            .expect("create")
        else {
            panic!("expected person page");
        };

        let renamed = management
            .update_keyed_subject(
                KeyedSubject::Person,
                person.uuid,
                &KeyedEntityRequest::new("Judi Dench").with_differentiator("1"),
            )
            .await
            .expect("rename");
        assert!(matches!(renamed, Page::Person(p) if p.differentiator == "1"));

        let deleted = management
            .delete_keyed_subject(KeyedSubject::Person, person.uuid)
            .await
            .expect("delete");
        assert_eq!(deleted.name, "Judi Dench");
        assert!(matches!(
            management
                .delete_keyed_subject(KeyedSubject::Person, person.uuid)
                .await,
            Err(WriteError::NotFound { .. })
        ));
    }
}
