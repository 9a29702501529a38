//! Listing summaries shared by every page, with one-level sur references.

use theatrebase_domain::common::format_date;
use theatrebase_domain::{
    retain_most_specific, AwardCeremony, CreditKind, Material, MaterialId, Named, Production,
    ProductionId, VenueRef,
};
use theatrebase_shared::views::{
    EntityView, MaterialSummary, ProductionSummary, SurProductionView, VenueSummary,
};
use theatrebase_shared::Model;
use uuid::Uuid;

use super::Projector;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::awards::NomineeSummaries;
use crate::use_cases::credits::credit_views;

pub(super) fn ref_view<I: Copy + Into<Uuid>>(model: Model, named: &Named<I>) -> EntityView {
    EntityView::new(model, named.id.into(), named.name.clone())
}

/// Drops every material whose sub-material is also listed.
pub(super) fn specific_materials(materials: Vec<MaterialSummary>) -> Vec<MaterialSummary> {
    retain_most_specific(materials, |m| m.uuid, |m| m.sur_material.as_ref().map(|s| s.uuid))
}

pub(super) fn specific_productions(productions: Vec<ProductionSummary>) -> Vec<ProductionSummary> {
    retain_most_specific(
        productions,
        |p| p.uuid,
        |p| p.sur_production.as_ref().map(|s| s.uuid),
    )
}

fn dedup_ids<I: Eq + Copy>(ids: impl IntoIterator<Item = I>) -> Vec<I> {
    let mut unique = Vec::new();
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

impl Projector {
    pub(super) async fn material_summary(
        &self,
        material: &Material,
    ) -> Result<MaterialSummary, RepoError> {
        let sur = self.walker.sur_material(material.id).await?;
        Ok(MaterialSummary {
            model: Model::Material,
            uuid: material.id.to_uuid(),
            name: material.name.clone(),
            format: material.format.clone(),
            year: material.year,
            sur_material: sur.as_ref().map(|s| ref_view(Model::Material, s)),
            writing_credits: credit_views(CreditKind::Writing, &material.writing_credits),
        })
    }

    /// Summaries in the given order; ids that no longer resolve are skipped.
    pub(super) async fn material_summaries(
        &self,
        ids: impl IntoIterator<Item = MaterialId>,
    ) -> Result<Vec<MaterialSummary>, RepoError> {
        let mut summaries = Vec::new();
        for id in dedup_ids(ids) {
            if let Some(material) = self.repos.material.get(id).await? {
                summaries.push(self.material_summary(&material).await?);
            }
        }
        Ok(summaries)
    }

    pub(super) async fn venue_summary(&self, venue: &VenueRef) -> Result<VenueSummary, RepoError> {
        let sur = self.walker.sur_venue(venue.id).await?;
        Ok(VenueSummary {
            model: Model::Venue,
            uuid: venue.id.to_uuid(),
            name: venue.name.clone(),
            sur_venue: sur.as_ref().map(|s| ref_view(Model::Venue, s)),
        })
    }

    async fn optional_venue_summary(
        &self,
        venue: Option<&VenueRef>,
    ) -> Result<Option<VenueSummary>, RepoError> {
        match venue {
            Some(venue) => Ok(Some(self.venue_summary(venue).await?)),
            None => Ok(None),
        }
    }

    /// The sur-production one level up, carrying its own venue.
    pub(super) async fn sur_production_view(
        &self,
        id: ProductionId,
    ) -> Result<Option<SurProductionView>, RepoError> {
        let Some(sur) = self.walker.sur_production(id).await? else {
            return Ok(None);
        };
        let venue = match self.repos.production.get(sur.id).await? {
            Some(parent) => self.optional_venue_summary(parent.venue.as_ref()).await?,
            None => None,
        };
        Ok(Some(SurProductionView {
            model: Model::Production,
            uuid: sur.id.to_uuid(),
            name: sur.name,
            venue,
        }))
    }

    pub(super) async fn production_summary(
        &self,
        production: &Production,
    ) -> Result<ProductionSummary, RepoError> {
        Ok(ProductionSummary {
            model: Model::Production,
            uuid: production.id.to_uuid(),
            name: production.name.clone(),
            start_date: production.start_date.map(format_date),
            end_date: production.end_date.map(format_date),
            venue: self.optional_venue_summary(production.venue.as_ref()).await?,
            sur_production: self.sur_production_view(production.id).await?,
        })
    }

    pub(super) async fn production_summaries(
        &self,
        ids: impl IntoIterator<Item = ProductionId>,
    ) -> Result<Vec<ProductionSummary>, RepoError> {
        let mut summaries = Vec::new();
        for id in dedup_ids(ids) {
            if let Some(production) = self.repos.production.get(id).await? {
                summaries.push(self.production_summary(&production).await?);
            }
        }
        Ok(summaries)
    }

    /// Summaries for every production and material nominated in `ceremonies`.
    pub(super) async fn nominee_summaries(
        &self,
        ceremonies: &[AwardCeremony],
    ) -> Result<NomineeSummaries, RepoError> {
        let nominations = ceremonies
            .iter()
            .flat_map(|c| c.categories.iter())
            .flat_map(|category| category.nominations.iter());

        let mut production_ids = Vec::new();
        let mut material_ids = Vec::new();
        for nomination in nominations {
            production_ids.extend(nomination.productions.iter().map(|p| p.id));
            material_ids.extend(nomination.materials.iter().map(|m| m.id));
        }

        let mut summaries = NomineeSummaries::default();
        for summary in self.production_summaries(production_ids).await? {
            summaries
                .productions
                .insert(ProductionId::from_uuid(summary.uuid), summary);
        }
        for summary in self.material_summaries(material_ids).await? {
            summaries
                .materials
                .insert(MaterialId::from_uuid(summary.uuid), summary);
        }
        Ok(summaries)
    }

    /// Loads ceremonies nominating any of `uuids`.
    pub(super) async fn ceremonies_nominating(
        &self,
        uuids: Vec<Uuid>,
    ) -> Result<Vec<AwardCeremony>, RepoError> {
        let mut ceremonies = Vec::new();
        for id in self.repos.award.list_ceremonies_nominating(uuids).await? {
            if let Some(ceremony) = self.repos.award.get_ceremony(id).await? {
                ceremonies.push(ceremony);
            }
        }
        Ok(ceremonies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(n: u128, sur: Option<u128>) -> MaterialSummary {
        MaterialSummary {
            model: Model::Material,
            uuid: Uuid::from_u128(n),
            name: format!("Material {n}"),
            format: None,
            year: None,
            sur_material: sur.map(|s| EntityView::new(Model::Material, Uuid::from_u128(s), "Sur")),
            writing_credits: Vec::new(),
        }
    }

    #[test]
    fn listed_sur_materials_give_way_to_their_subs() {
        let kept = specific_materials(vec![summary(1, None), summary(2, Some(1)), summary(3, Some(9))]);
        let uuids: Vec<Uuid> = kept.iter().map(|m| m.uuid).collect();
        assert_eq!(uuids, vec![Uuid::from_u128(2), Uuid::from_u128(3)]);
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        assert_eq!(dedup_ids([3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
