use theatrebase_domain::{AwardCeremony, AwardCeremonyId, AwardId, EntityKey, NodeLabel};
use theatrebase_shared::requests::AwardCeremonyRequest;
use theatrebase_shared::views::EntityView;
use theatrebase_shared::Model;

use super::{check, FieldMap, Management, WriteError};
use crate::use_cases::awards::{resolve_categories, validate_ceremony};
use crate::use_cases::projection::{Page, Subject, SubjectKind};
use crate::use_cases::validation::FieldErrors;

pub const CEREMONY_TAKEN: &str = "Award ceremony already exists for this award";

fn ceremony_taken() -> WriteError {
    let mut fields = FieldMap::new();
    fields.insert("name".to_string(), vec![CEREMONY_TAKEN.to_string()]);
    WriteError::UniquenessConflict(fields)
}

impl Management {
    /// The store re-checks (award, name) atomically; a writer that passed the
    /// early check but lost the race gets the same conflict.
    async fn save_ceremony(&self, ceremony: &AwardCeremony) -> Result<(), WriteError> {
        match self.repos.award.save_ceremony(ceremony).await {
            Err(e) if e.is_key_taken() => Err(ceremony_taken()),
            result => Ok(result?),
        }
    }

    /// Ceremonies are unique by name within their award.
    async fn build_ceremony(
        &self,
        id: AwardCeremonyId,
        request: &AwardCeremonyRequest,
    ) -> Result<AwardCeremony, WriteError> {
        let mut errors = FieldErrors::new();
        validate_ceremony(&mut errors, request);
        check(errors)?;

        let name = request.name.trim();
        let award = match &request.award {
            Some(award) => match EntityKey::new(&award.name, award.differentiator.as_deref()) {
                Ok(key) => Some(
                    self.resolver
                        .resolve_named::<AwardId>(NodeLabel::Award, &key)
                        .await?,
                ),
                Err(_) => None,
            },
            None => None,
        };

        if let Some(award) = &award {
            if let Some(existing) = self.repos.award.find_ceremony(award.id, name).await? {
                if existing != id {
                    return Err(ceremony_taken());
                }
            }
        }

        let mut errors = FieldErrors::new();
        let categories =
            resolve_categories(&self.resolver, self.repos.production.as_ref(), request, &mut errors)
                .await?;
        check(errors)?;

        let mut ceremony = AwardCeremony::new(id, name);
        ceremony.award = award;
        ceremony.categories = categories;
        Ok(ceremony)
    }

    pub async fn create_ceremony(&self, request: &AwardCeremonyRequest) -> Result<Page, WriteError> {
        let id = AwardCeremonyId::from_uuid(self.uuids.new_uuid());
        let ceremony = self.build_ceremony(id, request).await?;
        self.save_ceremony(&ceremony).await?;
        tracing::info!(ceremony = %id, name = %ceremony.name, "Award ceremony created");
        self.page(Subject::AwardCeremony(id)).await
    }

    pub async fn update_ceremony(
        &self,
        id: AwardCeremonyId,
        request: &AwardCeremonyRequest,
    ) -> Result<Page, WriteError> {
        if self.repos.award.get_ceremony(id).await?.is_none() {
            return Err(WriteError::not_found(SubjectKind::AwardCeremony, id));
        }
        let ceremony = self.build_ceremony(id, request).await?;
        self.save_ceremony(&ceremony).await?;
        tracing::info!(ceremony = %id, "Award ceremony updated");
        self.page(Subject::AwardCeremony(id)).await
    }

    pub async fn delete_ceremony(&self, id: AwardCeremonyId) -> Result<EntityView, WriteError> {
        let ceremony = self
            .repos
            .award
            .get_ceremony(id)
            .await?
            .ok_or_else(|| WriteError::not_found(SubjectKind::AwardCeremony, id))?;
        self.repos.award.delete_ceremony(id).await?;
        tracing::info!(ceremony = %id, "Award ceremony deleted");
        Ok(EntityView::new(Model::AwardCeremony, id.to_uuid(), ceremony.name))
    }
}
