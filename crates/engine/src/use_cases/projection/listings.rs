//! Collection listings.

use std::cmp::Ordering;

use theatrebase_domain::{MaterialId, NodeLabel, VenueId};
use theatrebase_shared::views::{
    AwardCeremonySummary, EntityView, MaterialSummary, ProductionSummary, VenueSummary,
};
use theatrebase_shared::Model;

use super::summaries::ref_view;
use super::{ProjectionError, Projector, SubjectKind};

fn venue_names(production: &ProductionSummary) -> (&str, &str) {
    match &production.venue {
        Some(venue) => (
            venue
                .sur_venue
                .as_ref()
                .map_or(venue.name.as_str(), |sur| sur.name.as_str()),
            venue.name.as_str(),
        ),
        None => ("", ""),
    }
}

/// Name, then sur-venue (or venue) name, then venue name.
pub(super) fn production_order(a: &ProductionSummary, b: &ProductionSummary) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| venue_names(a).cmp(&venue_names(b)))
        .then_with(|| a.uuid.cmp(&b.uuid))
}

pub(super) fn sort_productions(productions: &mut [ProductionSummary]) {
    productions.sort_by(production_order);
}

fn label_of(kind: SubjectKind) -> Option<(NodeLabel, Model)> {
    match kind {
        SubjectKind::Person => Some((NodeLabel::Person, Model::Person)),
        SubjectKind::Company => Some((NodeLabel::Company, Model::Company)),
        SubjectKind::Character => Some((NodeLabel::Character, Model::Character)),
        SubjectKind::Award => Some((NodeLabel::Award, Model::Award)),
        SubjectKind::Material
        | SubjectKind::Production
        | SubjectKind::Venue
        | SubjectKind::AwardCeremony => None,
    }
}

impl Projector {
    pub(super) async fn list_keyed(
        &self,
        kind: SubjectKind,
    ) -> Result<Vec<EntityView>, ProjectionError> {
        let Some((label, model)) = label_of(kind) else {
            return Ok(Vec::new());
        };
        Ok(self
            .repos
            .identity
            .list(label)
            .await?
            .iter()
            .map(|named| ref_view(model, named))
            .collect())
    }

    pub(super) async fn list_materials(&self) -> Result<Vec<MaterialSummary>, ProjectionError> {
        let ids = self
            .repos
            .identity
            .list(NodeLabel::Material)
            .await?
            .into_iter()
            .map(|named| MaterialId::from_uuid(named.id));
        Ok(self.material_summaries(ids).await?)
    }

    pub(super) async fn list_productions(
        &self,
    ) -> Result<Vec<ProductionSummary>, ProjectionError> {
        let ids = self.repos.production.list_all().await?;
        let mut productions = self.production_summaries(ids).await?;
        sort_productions(&mut productions);
        Ok(productions)
    }

    pub(super) async fn list_venues(&self) -> Result<Vec<VenueSummary>, ProjectionError> {
        let mut venues = Vec::new();
        for named in self.repos.identity.list(NodeLabel::Venue).await? {
            let venue = named.map_id(VenueId::from_uuid);
            venues.push(self.venue_summary(&venue).await?);
        }
        Ok(venues)
    }

    /// Ordered by award name, then newest ceremony first.
    pub(super) async fn list_award_ceremonies(
        &self,
    ) -> Result<Vec<AwardCeremonySummary>, ProjectionError> {
        let mut ceremonies = Vec::new();
        for id in self.repos.award.list_ceremonies().await? {
            if let Some(ceremony) = self.repos.award.get_ceremony(id).await? {
                ceremonies.push(AwardCeremonySummary {
                    model: Model::AwardCeremony,
                    uuid: ceremony.id.to_uuid(),
                    name: ceremony.name,
                    award: ceremony.award.as_ref().map(|a| ref_view(Model::Award, a)),
                });
            }
        }

        ceremonies.sort_by(|a, b| {
            let award = |c: &AwardCeremonySummary| c.award.as_ref().map(|a| a.name.clone());
            award(a)
                .cmp(&award(b))
                .then_with(|| b.name.cmp(&a.name))
                .then_with(|| a.uuid.cmp(&b.uuid))
        });
        Ok(ceremonies)
    }
}
