use theatrebase_domain::VenueId;
use theatrebase_shared::views::VenueView;
use theatrebase_shared::Model;

use super::listings::sort_productions;
use super::summaries::{ref_view, specific_productions};
use super::{ProjectionError, Projector, SubjectKind};
use crate::use_cases::surrogates::Hierarchy;

impl Projector {
    pub(super) async fn venue_page(&self, id: VenueId) -> Result<VenueView, ProjectionError> {
        let venue = self
            .repos
            .venue
            .get(id)
            .await?
            .ok_or_else(|| ProjectionError::not_found(SubjectKind::Venue, id))?;

        let sur_venue = self.walker.sur_venue(id).await?;

        // Productions at the venue and at each of its sub-venues.
        let mut production_ids = Vec::new();
        for member in self.walker.family(Hierarchy::Venue, id.to_uuid()).await? {
            production_ids.extend(
                self.repos
                    .production
                    .list_at_venue(VenueId::from_uuid(member))
                    .await?,
            );
        }
        let mut productions =
            specific_productions(self.production_summaries(production_ids).await?);
        sort_productions(&mut productions);

        Ok(VenueView {
            model: Model::Venue,
            uuid: id.to_uuid(),
            name: venue.name.clone(),
            differentiator: venue.differentiator.clone(),
            sur_venue: sur_venue.as_ref().map(|s| ref_view(Model::Venue, s)),
            sub_venues: venue
                .sub_venues
                .iter()
                .map(|s| ref_view(Model::Venue, s))
                .collect(),
            productions,
        })
    }
}
