//! People, companies, characters and awards: subjects that are nothing but
//! their identity key. Everything else about them is owned by the
//! aggregates that reference them.

use theatrebase_domain::{AwardId, EntityKey, NodeLabel};
use theatrebase_shared::requests::KeyedEntityRequest;
use theatrebase_shared::views::EntityView;
use uuid::Uuid;

use super::{Management, WriteError};
use crate::use_cases::projection::{Page, SubjectKind};
use crate::use_cases::validation::{require_key, FieldErrors};

pub const HAS_DEPENDENTS: &str = "Dependent associations exist";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyedSubject {
    Person,
    Company,
    Character,
    Award,
}

impl KeyedSubject {
    pub fn label(self) -> NodeLabel {
        match self {
            KeyedSubject::Person => NodeLabel::Person,
            KeyedSubject::Company => NodeLabel::Company,
            KeyedSubject::Character => NodeLabel::Character,
            KeyedSubject::Award => NodeLabel::Award,
        }
    }

    pub fn kind(self) -> SubjectKind {
        match self {
            KeyedSubject::Person => SubjectKind::Person,
            KeyedSubject::Company => SubjectKind::Company,
            KeyedSubject::Character => SubjectKind::Character,
            KeyedSubject::Award => SubjectKind::Award,
        }
    }

    /// None for kinds that own an aggregate.
    pub fn from_kind(kind: SubjectKind) -> Option<Self> {
        match kind {
            SubjectKind::Person => Some(KeyedSubject::Person),
            SubjectKind::Company => Some(KeyedSubject::Company),
            SubjectKind::Character => Some(KeyedSubject::Character),
            SubjectKind::Award => Some(KeyedSubject::Award),
            SubjectKind::Material
            | SubjectKind::Production
            | SubjectKind::Venue
            | SubjectKind::AwardCeremony => None,
        }
    }
}

fn request_key(request: &KeyedEntityRequest) -> Result<EntityKey, WriteError> {
    let mut errors = FieldErrors::new();
    require_key(
        &mut errors,
        "name",
        Some(&request.name),
        request.differentiator.as_deref(),
    )
    .ok_or_else(|| errors.into())
}

impl Management {
    pub async fn create_keyed_subject(
        &self,
        subject: KeyedSubject,
        request: &KeyedEntityRequest,
    ) -> Result<Page, WriteError> {
        let key = request_key(request)?;
        let id = self
            .create_keyed(subject.label(), &key, |_| async { Ok(()) })
            .await?;
        self.page(subject.kind().subject(id)).await
    }

    pub async fn update_keyed_subject(
        &self,
        subject: KeyedSubject,
        id: Uuid,
        request: &KeyedEntityRequest,
    ) -> Result<Page, WriteError> {
        let label = subject.label();
        if self.resolver.get(label, id).await?.is_none() {
            return Err(WriteError::not_found(subject.kind(), id));
        }
        let key = request_key(request)?;

        self.rekey(label, id, &key).await?;
        tracing::info!(%label, %id, key = %key, "Updated");
        self.page(subject.kind().subject(id)).await
    }

    /// An award with ceremonies cannot be deleted.
    pub async fn delete_keyed_subject(
        &self,
        subject: KeyedSubject,
        id: Uuid,
    ) -> Result<EntityView, WriteError> {
        if subject == KeyedSubject::Award {
            let ceremonies = self
                .repos
                .award
                .list_ceremonies_of_award(AwardId::from_uuid(id))
                .await?;
            if !ceremonies.is_empty() {
                let mut errors = FieldErrors::new();
                errors.add("associations", HAS_DEPENDENTS);
                return Err(errors.into());
            }
        }
        self.delete_keyed(subject.kind(), subject.label(), id).await
    }
}
