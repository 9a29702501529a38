//! Perspective projection - one nested page per subject.
//!
//! The same stored graph renders differently depending on whose page is
//! being assembled. Every subject type has its own module; `project` is an
//! exhaustive dispatch over [`Subject`], so a new subject type cannot be
//! added without a page.

mod award;
mod character;
mod entity;
mod listings;
mod material;
mod production;
mod summaries;
mod venue;

use serde::Serialize;
use theatrebase_domain::{
    AwardCeremonyId, AwardId, CharacterId, CompanyId, MaterialId, PersonId, ProductionId, VenueId,
};
use theatrebase_shared::views::{
    AwardCeremonySummary, AwardCeremonyView, AwardView, CharacterView, CompanyView, EntityView,
    MaterialSummary, MaterialView, PersonView, ProductionSummary, ProductionView, VenueSummary,
    VenueView,
};
use uuid::Uuid;

use crate::app::Repositories;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::surrogates::SurrogateWalker;

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("{kind} not found: {uuid}")]
    NotFound { kind: SubjectKind, uuid: Uuid },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl ProjectionError {
    fn not_found(kind: SubjectKind, uuid: impl Into<Uuid>) -> Self {
        Self::NotFound {
            kind,
            uuid: uuid.into(),
        }
    }
}

/// The collections the archive serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    Material,
    Production,
    Venue,
    Person,
    Company,
    Character,
    Award,
    AwardCeremony,
}

impl SubjectKind {
    pub const ALL: [SubjectKind; 8] = [
        SubjectKind::Material,
        SubjectKind::Production,
        SubjectKind::Venue,
        SubjectKind::Person,
        SubjectKind::Company,
        SubjectKind::Character,
        SubjectKind::Award,
        SubjectKind::AwardCeremony,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Material => "Material",
            SubjectKind::Production => "Production",
            SubjectKind::Venue => "Venue",
            SubjectKind::Person => "Person",
            SubjectKind::Company => "Company",
            SubjectKind::Character => "Character",
            SubjectKind::Award => "Award",
            SubjectKind::AwardCeremony => "AwardCeremony",
        }
    }

    /// Path segment under `/api`.
    pub fn collection(&self) -> &'static str {
        match self {
            SubjectKind::Material => "materials",
            SubjectKind::Production => "productions",
            SubjectKind::Venue => "venues",
            SubjectKind::Person => "people",
            SubjectKind::Company => "companies",
            SubjectKind::Character => "characters",
            SubjectKind::Award => "awards",
            SubjectKind::AwardCeremony => "award-ceremonies",
        }
    }

    pub fn subject(self, uuid: Uuid) -> Subject {
        match self {
            SubjectKind::Material => Subject::Material(MaterialId::from_uuid(uuid)),
            SubjectKind::Production => Subject::Production(ProductionId::from_uuid(uuid)),
            SubjectKind::Venue => Subject::Venue(VenueId::from_uuid(uuid)),
            SubjectKind::Person => Subject::Person(PersonId::from_uuid(uuid)),
            SubjectKind::Company => Subject::Company(CompanyId::from_uuid(uuid)),
            SubjectKind::Character => Subject::Character(CharacterId::from_uuid(uuid)),
            SubjectKind::Award => Subject::Award(AwardId::from_uuid(uuid)),
            SubjectKind::AwardCeremony => Subject::AwardCeremony(AwardCeremonyId::from_uuid(uuid)),
        }
    }
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Material(MaterialId),
    Production(ProductionId),
    Venue(VenueId),
    Person(PersonId),
    Company(CompanyId),
    Character(CharacterId),
    Award(AwardId),
    AwardCeremony(AwardCeremonyId),
}

impl Subject {
    pub fn kind(&self) -> SubjectKind {
        match self {
            Subject::Material(_) => SubjectKind::Material,
            Subject::Production(_) => SubjectKind::Production,
            Subject::Venue(_) => SubjectKind::Venue,
            Subject::Person(_) => SubjectKind::Person,
            Subject::Company(_) => SubjectKind::Company,
            Subject::Character(_) => SubjectKind::Character,
            Subject::Award(_) => SubjectKind::Award,
            Subject::AwardCeremony(_) => SubjectKind::AwardCeremony,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Page {
    Material(MaterialView),
    Production(ProductionView),
    Venue(VenueView),
    Person(PersonView),
    Company(CompanyView),
    Character(CharacterView),
    Award(AwardView),
    AwardCeremony(AwardCeremonyView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Listing {
    Materials(Vec<MaterialSummary>),
    Productions(Vec<ProductionSummary>),
    Venues(Vec<VenueSummary>),
    AwardCeremonies(Vec<AwardCeremonySummary>),
    /// People, companies, characters and awards.
    Entities(Vec<EntityView>),
}

#[derive(Clone)]
pub struct Projector {
    repos: Repositories,
    walker: SurrogateWalker,
}

impl Projector {
    pub fn new(repos: Repositories) -> Self {
        let walker = SurrogateWalker::new(repos.clone());
        Self { repos, walker }
    }

    pub async fn project(&self, subject: Subject) -> Result<Page, ProjectionError> {
        tracing::debug!(?subject, "Projecting page");
        Ok(match subject {
            Subject::Material(id) => Page::Material(self.material_page(id).await?),
            Subject::Production(id) => Page::Production(self.production_page(id).await?),
            Subject::Venue(id) => Page::Venue(self.venue_page(id).await?),
            Subject::Person(id) => Page::Person(self.person_page(id).await?),
            Subject::Company(id) => Page::Company(self.company_page(id).await?),
            Subject::Character(id) => Page::Character(self.character_page(id).await?),
            Subject::Award(id) => Page::Award(self.award_page(id).await?),
            Subject::AwardCeremony(id) => Page::AwardCeremony(self.ceremony_page(id).await?),
        })
    }

    pub async fn list(&self, kind: SubjectKind) -> Result<Listing, ProjectionError> {
        Ok(match kind {
            SubjectKind::Material => Listing::Materials(self.list_materials().await?),
            SubjectKind::Production => Listing::Productions(self.list_productions().await?),
            SubjectKind::Venue => Listing::Venues(self.list_venues().await?),
            SubjectKind::AwardCeremony => {
                Listing::AwardCeremonies(self.list_award_ceremonies().await?)
            }
            SubjectKind::Person
            | SubjectKind::Company
            | SubjectKind::Character
            | SubjectKind::Award => Listing::Entities(self.list_keyed(kind).await?),
        })
    }
}
