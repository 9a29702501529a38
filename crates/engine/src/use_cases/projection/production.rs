use theatrebase_domain::common::format_date;
use theatrebase_domain::{CastMember, CreditKind, Depiction, ProductionId};
use theatrebase_shared::views::{CastMemberView, ProductionView};
use theatrebase_shared::Model;

use super::{ProjectionError, Projector, SubjectKind};
use crate::use_cases::awards::{group_by_award, production_nomination_view};
use crate::use_cases::credits::credit_views;
use crate::use_cases::roles::role_view;

fn cast_member_view(member: &CastMember, depictions: &[&Depiction]) -> CastMemberView {
    CastMemberView {
        model: Model::Person,
        uuid: member.person.id.to_uuid(),
        name: member.person.name.clone(),
        roles: member
            .roles
            .iter()
            .map(|role| role_view(role, depictions))
            .collect(),
    }
}

impl Projector {
    pub(super) async fn production_page(
        &self,
        id: ProductionId,
    ) -> Result<ProductionView, ProjectionError> {
        let production = self
            .repos
            .production
            .get(id)
            .await?
            .ok_or_else(|| ProjectionError::not_found(SubjectKind::Production, id))?;

        let material = match &production.material {
            Some(material) => self.material_summaries([material.id]).await?.into_iter().next(),
            None => None,
        };
        let venue = match &production.venue {
            Some(venue) => Some(self.venue_summary(venue).await?),
            None => None,
        };

        let depictions = self.castable_depictions(production.material.as_ref()).await?;
        let depictions: Vec<&Depiction> = depictions.iter().collect();

        let sub_ids: Vec<ProductionId> = production.sub_productions.iter().map(|s| s.id).collect();
        let mut nominated = vec![id.to_uuid()];
        nominated.extend(sub_ids.iter().map(|s| s.to_uuid()));
        let ceremonies = self.ceremonies_nominating(nominated).await?;
        let summaries = self.nominee_summaries(&ceremonies).await?;
        let awards = group_by_award(&ceremonies, |n| {
            production_nomination_view(n, id, &sub_ids, &summaries)
        });

        Ok(ProductionView {
            model: Model::Production,
            uuid: id.to_uuid(),
            name: production.name.clone(),
            start_date: production.start_date.map(format_date),
            press_date: production.press_date.map(format_date),
            end_date: production.end_date.map(format_date),
            material,
            venue,
            sur_production: self.sur_production_view(id).await?,
            sub_productions: self.production_summaries(sub_ids.iter().copied()).await?,
            producer_credits: credit_views(CreditKind::Producer, &production.producer_credits),
            creative_credits: credit_views(CreditKind::Creative, &production.creative_credits),
            crew_credits: credit_views(CreditKind::Crew, &production.crew_credits),
            cast: production
                .cast
                .iter()
                .map(|member| cast_member_view(member, &depictions))
                .collect(),
            awards,
        })
    }
}
