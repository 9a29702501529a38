use theatrebase_domain::{AwardCeremonyId, AwardId, NodeLabel};
use theatrebase_shared::views::{AwardCeremonyView, AwardView};
use theatrebase_shared::Model;

use super::summaries::ref_view;
use super::{ProjectionError, Projector, SubjectKind};
use crate::use_cases::awards::{award_ceremonies, ceremony_categories};

impl Projector {
    pub(super) async fn award_page(&self, id: AwardId) -> Result<AwardView, ProjectionError> {
        let award = self
            .repos
            .identity
            .get(NodeLabel::Award, id.to_uuid())
            .await?
            .ok_or_else(|| ProjectionError::not_found(SubjectKind::Award, id))?;

        let mut ceremonies = Vec::new();
        for ceremony in self.repos.award.list_ceremonies_of_award(id).await? {
            if let Some(ceremony) = self.repos.award.get_ceremony(ceremony).await? {
                ceremonies.push(ceremony);
            }
        }
        let summaries = self.nominee_summaries(&ceremonies).await?;

        Ok(AwardView {
            model: Model::Award,
            uuid: id.to_uuid(),
            name: award.name,
            differentiator: award.differentiator,
            ceremonies: award_ceremonies(&ceremonies, &summaries),
        })
    }

    pub(super) async fn ceremony_page(
        &self,
        id: AwardCeremonyId,
    ) -> Result<AwardCeremonyView, ProjectionError> {
        let ceremony = self
            .repos
            .award
            .get_ceremony(id)
            .await?
            .ok_or_else(|| ProjectionError::not_found(SubjectKind::AwardCeremony, id))?;

        let summaries = self.nominee_summaries(std::slice::from_ref(&ceremony)).await?;

        Ok(AwardCeremonyView {
            model: Model::AwardCeremony,
            uuid: id.to_uuid(),
            name: ceremony.name.clone(),
            award: ceremony.award.as_ref().map(|a| ref_view(Model::Award, a)),
            categories: ceremony_categories(&ceremony, &summaries),
        })
    }
}
