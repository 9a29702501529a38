use theatrebase_domain::{EntityKey, NodeLabel, Venue, VenueId};
use theatrebase_shared::requests::VenueRequest;
use theatrebase_shared::views::EntityView;
use uuid::Uuid;

use super::{check, Management, WriteError};
use crate::use_cases::projection::{Page, Subject, SubjectKind};
use crate::use_cases::surrogates::Hierarchy;
use crate::use_cases::validation::{require_key, FieldErrors};

impl Management {
    async fn build_venue(
        &self,
        id: VenueId,
        key: &EntityKey,
        request: &VenueRequest,
    ) -> Result<Venue, WriteError> {
        let mut subs = Vec::new();
        for (index, sub) in request.sub_venues.iter().enumerate() {
            let Ok(sub_key) = EntityKey::new(&sub.name, sub.differentiator.as_deref()) else {
                continue;
            };
            subs.push((
                index,
                self.resolver
                    .resolve_named::<VenueId>(NodeLabel::Venue, &sub_key)
                    .await?,
            ));
        }

        let mut errors = FieldErrors::new();
        let children: Vec<(usize, Uuid)> = subs.iter().map(|(i, s)| (*i, s.id.to_uuid())).collect();
        self.check_subs(&mut errors, Hierarchy::Venue, id.to_uuid(), &children, |i| {
            format!("subVenues[{i}].name")
        })
        .await?;
        check(errors)?;

        let mut venue = Venue::new(id, key);
        venue.sub_venues = subs.into_iter().map(|(_, s)| s).collect();
        Ok(venue)
    }

    fn venue_key(request: &VenueRequest) -> Result<EntityKey, WriteError> {
        let mut errors = FieldErrors::new();
        let key = require_key(
            &mut errors,
            "name",
            Some(&request.name),
            request.differentiator.as_deref(),
        );
        key.ok_or_else(|| errors.into())
    }

    pub async fn create_venue(&self, request: &VenueRequest) -> Result<Page, WriteError> {
        let key = Self::venue_key(request)?;
        let id = self
            .create_keyed(NodeLabel::Venue, &key, |id| {
                let key = &key;
                async move {
                    let venue = self.build_venue(VenueId::from_uuid(id), key, request).await?;
                    Ok(self.repos.venue.save(&venue).await?)
                }
            })
            .await?;
        self.page(Subject::Venue(VenueId::from_uuid(id))).await
    }

    pub async fn update_venue(&self, id: VenueId, request: &VenueRequest) -> Result<Page, WriteError> {
        if self.repos.venue.get(id).await?.is_none() {
            return Err(WriteError::not_found(SubjectKind::Venue, id));
        }
        let key = Self::venue_key(request)?;

        let venue = self.build_venue(id, &key, request).await?;
        self.rekey(NodeLabel::Venue, id.to_uuid(), &key).await?;
        self.repos.venue.save(&venue).await?;
        tracing::info!(venue = %id, "Venue updated");
        self.page(Subject::Venue(id)).await
    }

    pub async fn delete_venue(&self, id: VenueId) -> Result<EntityView, WriteError> {
        self.delete_keyed(SubjectKind::Venue, NodeLabel::Venue, id.to_uuid())
            .await
    }
}
