use std::collections::HashSet;

use chrono::NaiveDate;
use theatrebase_domain::{
    CastMember, CreditKind, Depiction, EntityKey, NodeLabel, PersonId, Production, ProductionId,
    VenueId,
};
use theatrebase_shared::requests::{CreditRequest, ProductionRequest};
use theatrebase_shared::views::EntityView;
use theatrebase_shared::Model;
use uuid::Uuid;

use super::{check, Management, WriteError};
use crate::infrastructure::ports::RepoError;
use crate::use_cases::credits::{resolve_credits, validate_credits};
use crate::use_cases::projection::{Page, Subject, SubjectKind};
use crate::use_cases::roles::{role_from_request, validate_cast_links};
use crate::use_cases::surrogates::Hierarchy;
use crate::use_cases::validation::{optional_date, FieldErrors, DUPLICATE_IN_GROUP, NAME_REQUIRED};

const CREDIT_FIELDS: [(CreditKind, &str); 3] = [
    (CreditKind::Producer, "producerCredits"),
    (CreditKind::Creative, "creativeCredits"),
    (CreditKind::Crew, "crewCredits"),
];

fn credit_requests(request: &ProductionRequest, kind: CreditKind) -> &[CreditRequest] {
    match kind {
        CreditKind::Producer => &request.producer_credits,
        CreditKind::Creative => &request.creative_credits,
        CreditKind::Crew => &request.crew_credits,
        CreditKind::Writing => &[],
    }
}

#[derive(Debug, Default)]
struct Dates {
    start: Option<NaiveDate>,
    press: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

/// Payload checks that need no store access.
fn validate(request: &ProductionRequest, errors: &mut FieldErrors) -> Dates {
    if request.name.trim().is_empty() {
        errors.add("name", NAME_REQUIRED);
    }

    let dates = Dates {
        start: optional_date(errors, "startDate", request.start_date.as_deref()),
        press: optional_date(errors, "pressDate", request.press_date.as_deref()),
        end: optional_date(errors, "endDate", request.end_date.as_deref()),
    };
    if let (Some(start), Some(end)) = (dates.start, dates.end) {
        if end < start {
            errors.add("endDate", "End date must not be before start date");
        }
    }

    for (kind, field) in CREDIT_FIELDS {
        validate_credits(errors, field, kind, credit_requests(request, kind));
    }

    let mut cast = HashSet::new();
    for (index, member) in request.cast.iter().enumerate() {
        let Ok(key) = EntityKey::new(&member.name, member.differentiator.as_deref()) else {
            continue;
        };
        if !cast.insert(key) {
            errors.add(format!("cast[{index}].name"), DUPLICATE_IN_GROUP);
        }
    }

    dates
}

impl Management {
    async fn resolve_cast(&self, request: &ProductionRequest) -> Result<Vec<CastMember>, RepoError> {
        let mut cast = Vec::new();
        for member in &request.cast {
            let Ok(key) = EntityKey::new(&member.name, member.differentiator.as_deref()) else {
                continue;
            };
            cast.push(CastMember {
                person: self
                    .resolver
                    .resolve_named::<PersonId>(NodeLabel::Person, &key)
                    .await?,
                roles: member
                    .roles
                    .iter()
                    .filter(|role| !role.is_blank())
                    .map(role_from_request)
                    .collect(),
            });
        }
        Ok(cast)
    }

    async fn build_production(
        &self,
        id: ProductionId,
        request: &ProductionRequest,
    ) -> Result<Production, WriteError> {
        let mut errors = FieldErrors::new();
        let dates = validate(request, &mut errors);
        check(errors)?;

        let mut errors = FieldErrors::new();
        let material = match &request.material {
            Some(material) => self.resolve_material(material).await?,
            None => None,
        };
        let venue = match &request.venue {
            Some(venue) => match EntityKey::new(&venue.name, venue.differentiator.as_deref()) {
                Ok(key) => Some(
                    self.resolver
                        .resolve_named::<VenueId>(NodeLabel::Venue, &key)
                        .await?,
                ),
                Err(_) => None,
            },
            None => None,
        };

        let depictions = self.projector.castable_depictions(material.as_ref()).await?;
        let depictions: Vec<&Depiction> = depictions.iter().collect();
        validate_cast_links(&mut errors, &depictions, &request.cast);

        let mut subs = Vec::new();
        for (index, sub) in request.sub_productions.iter().enumerate() {
            if sub.is_blank() {
                continue;
            }
            let field = format!("subProductions[{index}].uuid");
            let Some(uuid) = sub
                .uuid
                .as_deref()
                .and_then(|u| Uuid::parse_str(u.trim()).ok())
            else {
                errors.add(field, "Value must be a valid uuid");
                continue;
            };
            match self.repos.production.get(ProductionId::from_uuid(uuid)).await? {
                Some(found) => subs.push((index, found.to_ref())),
                None => errors.add(field, "Production not found"),
            }
        }
        let children: Vec<(usize, Uuid)> = subs.iter().map(|(i, s)| (*i, s.id.to_uuid())).collect();
        self.check_subs(&mut errors, Hierarchy::Production, id.to_uuid(), &children, |i| {
            format!("subProductions[{i}].uuid")
        })
        .await?;
        check(errors)?;

        let mut production = Production::new(id, request.name.trim());
        production.start_date = dates.start;
        production.press_date = dates.press;
        production.end_date = dates.end;
        production.material = material;
        production.venue = venue;
        production.sub_productions = subs.into_iter().map(|(_, s)| s).collect();
        production.producer_credits =
            resolve_credits(&self.resolver, CreditKind::Producer, &request.producer_credits).await?;
        production.creative_credits =
            resolve_credits(&self.resolver, CreditKind::Creative, &request.creative_credits).await?;
        production.crew_credits =
            resolve_credits(&self.resolver, CreditKind::Crew, &request.crew_credits).await?;
        production.cast = self.resolve_cast(request).await?;
        Ok(production)
    }

    pub async fn create_production(&self, request: &ProductionRequest) -> Result<Page, WriteError> {
        let id = ProductionId::from_uuid(self.uuids.new_uuid());
        let production = self.build_production(id, request).await?;
        self.repos.production.save(&production).await?;
        tracing::info!(production = %id, name = %production.name, "Production created");
        self.page(Subject::Production(id)).await
    }

    pub async fn update_production(
        &self,
        id: ProductionId,
        request: &ProductionRequest,
    ) -> Result<Page, WriteError> {
        if self.repos.production.get(id).await?.is_none() {
            return Err(WriteError::not_found(SubjectKind::Production, id));
        }
        let production = self.build_production(id, request).await?;
        self.repos.production.save(&production).await?;
        tracing::info!(production = %id, "Production updated");
        self.page(Subject::Production(id)).await
    }

    pub async fn delete_production(&self, id: ProductionId) -> Result<EntityView, WriteError> {
        let production = self
            .repos
            .production
            .get(id)
            .await?
            .ok_or_else(|| WriteError::not_found(SubjectKind::Production, id))?;
        self.repos.production.delete(id).await?;
        tracing::info!(production = %id, "Production deleted");
        Ok(EntityView::new(Model::Production, id.to_uuid(), production.name))
    }
}
