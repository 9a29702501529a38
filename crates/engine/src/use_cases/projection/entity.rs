//! Person and company pages: everything they are credited on, seen from
//! their side of each credit.

use theatrebase_domain::{
    retain_most_specific, CompanyId, CreditKind, Depiction, Named, NodeLabel, PersonId, Production,
};
use theatrebase_shared::views::{
    CastProductionView, CompanyView, CreditedProductionView, MaterialSummary, PersonView,
};
use theatrebase_shared::Model;
use uuid::Uuid;

use super::listings::production_order;
use super::summaries::specific_materials;
use super::{ProjectionError, Projector, SubjectKind};
use crate::infrastructure::ports::RepoError;
use crate::use_cases::awards::{company_nomination_view, group_by_award, person_nomination_view};
use crate::use_cases::credits::{company_credit_views, person_credit_views};
use crate::use_cases::roles::role_view;

/// Keeps the most specific productions, then orders them like a listing.
fn tidy<C>(items: Vec<CreditedProductionView<C>>) -> Vec<CreditedProductionView<C>> {
    let mut items = retain_most_specific(
        items,
        |i| i.production.uuid,
        |i| i.production.sur_production.as_ref().map(|s| s.uuid),
    );
    items.sort_by(|a, b| production_order(&a.production, &b.production));
    items
}

impl Projector {
    async fn keyed_subject(
        &self,
        kind: SubjectKind,
        label: NodeLabel,
        uuid: Uuid,
    ) -> Result<Named<Uuid>, ProjectionError> {
        self.repos
            .identity
            .get(label, uuid)
            .await?
            .ok_or_else(|| ProjectionError::not_found(kind, uuid))
    }

    async fn written_materials(&self, uuid: Uuid) -> Result<Vec<MaterialSummary>, RepoError> {
        let ids = self.repos.material.list_written_by(uuid).await?;
        Ok(specific_materials(self.material_summaries(ids).await?))
    }

    /// Productions crediting `uuid` under `kind`, each rendered with `render`.
    async fn credited_productions<C>(
        &self,
        uuid: Uuid,
        kind: CreditKind,
        render: impl Fn(&Production) -> Vec<C>,
    ) -> Result<Vec<CreditedProductionView<C>>, RepoError> {
        let mut items = Vec::new();
        for id in self.repos.production.list_credited(uuid, kind).await? {
            let Some(production) = self.repos.production.get(id).await? else {
                continue;
            };
            let credits = render(&production);
            if credits.is_empty() {
                continue;
            }
            items.push(CreditedProductionView {
                production: self.production_summary(&production).await?,
                credits,
            });
        }
        Ok(tidy(items))
    }

    async fn cast_member_productions(
        &self,
        person: PersonId,
    ) -> Result<Vec<CastProductionView>, RepoError> {
        let mut items = Vec::new();
        for id in self.repos.production.list_with_cast_member(person).await? {
            let Some(production) = self.repos.production.get(id).await? else {
                continue;
            };
            let Some(member) = production.cast_member(person) else {
                continue;
            };
            let depictions = self.castable_depictions(production.material.as_ref()).await?;
            let depictions: Vec<&Depiction> = depictions.iter().collect();
            items.push(CastProductionView {
                production: self.production_summary(&production).await?,
                roles: member
                    .roles
                    .iter()
                    .map(|role| role_view(role, &depictions))
                    .collect(),
            });
        }

        let mut items = retain_most_specific(
            items,
            |i| i.production.uuid,
            |i| i.production.sur_production.as_ref().map(|s| s.uuid),
        );
        items.sort_by(|a, b| production_order(&a.production, &b.production));
        Ok(items)
    }

    pub(super) async fn person_page(&self, id: PersonId) -> Result<PersonView, ProjectionError> {
        let person = self
            .keyed_subject(SubjectKind::Person, NodeLabel::Person, id.to_uuid())
            .await?;
        let uuid = id.to_uuid();

        let producer_productions = self
            .credited_productions(uuid, CreditKind::Producer, |p| {
                person_credit_views(CreditKind::Producer, p.credits(CreditKind::Producer), id)
            })
            .await?;
        let creative_productions = self
            .credited_productions(uuid, CreditKind::Creative, |p| {
                person_credit_views(CreditKind::Creative, p.credits(CreditKind::Creative), id)
            })
            .await?;
        let crew_productions = self
            .credited_productions(uuid, CreditKind::Crew, |p| {
                person_credit_views(CreditKind::Crew, p.credits(CreditKind::Crew), id)
            })
            .await?;

        let ceremonies = self.ceremonies_nominating(vec![uuid]).await?;
        let summaries = self.nominee_summaries(&ceremonies).await?;

        Ok(PersonView {
            model: Model::Person,
            uuid,
            name: person.name,
            differentiator: person.differentiator,
            materials: self.written_materials(uuid).await?,
            producer_productions,
            creative_productions,
            crew_productions,
            cast_member_productions: self.cast_member_productions(id).await?,
            awards: group_by_award(&ceremonies, |n| person_nomination_view(n, id, &summaries)),
        })
    }

    pub(super) async fn company_page(&self, id: CompanyId) -> Result<CompanyView, ProjectionError> {
        let company = self
            .keyed_subject(SubjectKind::Company, NodeLabel::Company, id.to_uuid())
            .await?;
        let uuid = id.to_uuid();

        let producer_productions = self
            .credited_productions(uuid, CreditKind::Producer, |p| {
                company_credit_views(CreditKind::Producer, p.credits(CreditKind::Producer), id)
            })
            .await?;
        let creative_productions = self
            .credited_productions(uuid, CreditKind::Creative, |p| {
                company_credit_views(CreditKind::Creative, p.credits(CreditKind::Creative), id)
            })
            .await?;
        let crew_productions = self
            .credited_productions(uuid, CreditKind::Crew, |p| {
                company_credit_views(CreditKind::Crew, p.credits(CreditKind::Crew), id)
            })
            .await?;

        let ceremonies = self.ceremonies_nominating(vec![uuid]).await?;
        let summaries = self.nominee_summaries(&ceremonies).await?;

        Ok(CompanyView {
            model: Model::Company,
            uuid,
            name: company.name,
            differentiator: company.differentiator,
            materials: self.written_materials(uuid).await?,
            producer_productions,
            creative_productions,
            crew_productions,
            awards: group_by_award(&ceremonies, |n| company_nomination_view(n, id, &summaries)),
        })
    }
}
