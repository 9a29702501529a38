//! Catalogue round trips through the Neo4j repositories.

use serde_json::json;
use theatrebase_shared::requests::{
    AwardCeremonyRequest, KeyedEntityRequest, MaterialRequest, ProductionRequest, VenueRequest,
};

use super::Neo4jTestHarness;
use crate::use_cases::{KeyedSubject, Listing, Page, SubjectKind, WriteError};

fn request<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).expect("request")
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn material_with_credits_and_characters_round_trips() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let app = harness.app();

    let created = app
        .management
        .create_material(&request::<MaterialRequest>(json!({
            "name": "The Cherry Orchard",
            "format": "play",
            "year": 1904,
            "writingCredits": [{ "entities": [{ "name": "Anton Chekhov" }] }],
            "characterGroups": [{ "characters": [
                { "name": "Lyubov Andreyevna Ranevskaya", "underlyingName": "Ranevskaya" },
                { "name": "Lopakhin" }
            ] }]
        })))
        .await
        .expect("create");

    let Page::Material(material) = created else {
        panic!("expected material page");
    };
    assert_eq!(material.year, Some(1904));
    assert_eq!(material.writing_credits[0].name, "by");
    assert_eq!(material.character_groups[0].characters.len(), 2);

    let Page::Material(reread) = app
        .projector
        .project(SubjectKind::Material.subject(material.uuid))
        .await
        .expect("project")
    else {
        panic!("expected material page");
    };
    assert_eq!(reread, material);

    let people = app.projector.list(SubjectKind::Person).await.expect("list");
    let Listing::Entities(people) = people else {
        panic!("expected entity listing");
    };
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name, "Anton Chekhov");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn keyed_uniqueness_is_enforced_by_the_store() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let app = harness.app();
    let person = KeyedEntityRequest::new("Judi Dench");

    app.management
        .create_keyed_subject(KeyedSubject::Person, &person)
        .await
        .expect("first create");
    let err = app
        .management
        .create_keyed_subject(KeyedSubject::Person, &person)
        .await
        .unwrap_err();
    assert!(matches!(err, WriteError::UniquenessConflict(_)));

    app.management
        .create_keyed_subject(
            KeyedSubject::Person,
            &KeyedEntityRequest::new("Judi Dench").with_differentiator("2"),
        )
        .await
        .expect("differentiated create");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn venue_page_includes_productions_at_sub_venues() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let app = harness.app();

    let Page::Venue(national) = app
        .management
        .create_venue(&request::<VenueRequest>(json!({
            "name": "National Theatre",
            "subVenues": [{ "name": "Olivier Theatre" }, { "name": "Lyttelton Theatre" }]
        })))
        .await
        .expect("venue")
    else {
        panic!("expected venue page");
    };

    app.management
        .create_production(&request::<ProductionRequest>(json!({
            "name": "The Cherry Orchard",
            "startDate": "2011-05-24",
            "endDate": "2011-08-16",
            "venue": { "name": "Olivier Theatre" }
        })))
        .await
        .expect("production");

    let Page::Venue(page) = app
        .projector
        .project(SubjectKind::Venue.subject(national.uuid))
        .await
        .expect("project")
    else {
        panic!("expected venue page");
    };
    assert_eq!(page.sub_venues.len(), 2);
    assert_eq!(page.productions.len(), 1);

    let venue = page.productions[0].venue.as_ref().expect("venue summary");
    assert_eq!(venue.name, "Olivier Theatre");
    assert_eq!(
        venue.sur_venue.as_ref().map(|v| v.name.as_str()),
        Some("National Theatre")
    );

    harness.clean().await.expect("clean");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn ceremony_nominations_reach_the_award_page() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let app = harness.app();

    let Page::AwardCeremony(ceremony) = app
        .management
        .create_ceremony(&request::<AwardCeremonyRequest>(json!({
            "name": "2020",
            "award": { "name": "Laurence Olivier Awards" },
            "categories": [{
                "name": "Best Actress",
                "nominations": [
                    { "isWinner": true, "entities": [{ "name": "Sharon D Clarke" }] },
                    { "entities": [{ "name": "Juliet Stevenson" }] }
                ]
            }]
        })))
        .await
        .expect("ceremony")
    else {
        panic!("expected ceremony page");
    };

    let award = ceremony.award.as_ref().expect("award");
    let Page::Award(page) = app
        .projector
        .project(SubjectKind::Award.subject(award.uuid))
        .await
        .expect("project")
    else {
        panic!("expected award page");
    };
    let nominations = &page.ceremonies[0].categories[0].nominations;
    assert_eq!(nominations.len(), 2);
    assert_eq!(nominations[0].nomination_type, "Winner");
    assert_eq!(nominations[1].nomination_type, "Nomination");

    let err = app
        .management
        .delete_keyed_subject(KeyedSubject::Award, award.uuid)
        .await
        .unwrap_err();
    assert!(matches!(err, WriteError::Validation(_)));
}
