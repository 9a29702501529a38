//! Character pages: every material depicting the character and every
//! production portraying it, with the names each one uses.

use std::collections::BTreeSet;

use theatrebase_domain::{CharacterId, Depiction, NodeLabel, ProductionId};
use theatrebase_shared::views::{
    CharacterView, DepictingMaterialView, DepictionView, PortrayingProductionView,
};
use theatrebase_shared::Model;

use super::listings::production_order;
use super::{ProjectionError, Projector, SubjectKind};
use crate::use_cases::roles::{performers, variant_named_depictions, variant_role_names};

impl Projector {
    pub(super) async fn character_page(
        &self,
        id: CharacterId,
    ) -> Result<CharacterView, ProjectionError> {
        let character = self
            .repos
            .identity
            .get(NodeLabel::Character, id.to_uuid())
            .await?
            .ok_or_else(|| ProjectionError::not_found(SubjectKind::Character, id))?;

        let mut materials = Vec::new();
        let mut all_depictions: Vec<Depiction> = Vec::new();
        let mut production_ids: Vec<ProductionId> = Vec::new();

        for material_id in self.repos.material.list_depicting(id).await? {
            let Some(material) = self.repos.material.get(material_id).await? else {
                continue;
            };
            let depictions: Vec<DepictionView> = material
                .depictions_of(id)
                .map(|(group, depiction)| DepictionView {
                    display_name: depiction.display_name.clone(),
                    qualifier: depiction.qualifier.clone(),
                    group: group.name.clone(),
                })
                .collect();
            all_depictions.extend(material.depictions_of(id).map(|(_, d)| d.clone()));

            // Productions of a sur-material stage its sub-materials too.
            production_ids.extend(self.repos.production.list_of_material(material_id).await?);
            if let Some(sur) = self.walker.sur_material(material_id).await? {
                production_ids.extend(self.repos.production.list_of_material(sur.id).await?);
            }

            materials.push(DepictingMaterialView {
                material: self.material_summary(&material).await?,
                depictions,
            });
        }

        let mut productions = Vec::new();
        let mut variant_named_portrayals = BTreeSet::new();
        for production in self.production_summaries(production_ids).await? {
            let Some(staged) = self
                .repos
                .production
                .get(ProductionId::from_uuid(production.uuid))
                .await?
            else {
                continue;
            };
            let depictions = self.castable_depictions(staged.material.as_ref()).await?;
            let depictions: Vec<&Depiction> = depictions.iter().collect();

            let performers = performers(id, &staged, &depictions);
            if performers.is_empty() {
                continue;
            }
            variant_named_portrayals.extend(variant_role_names(
                id,
                &character.name,
                &staged,
                &depictions,
            ));
            productions.push(PortrayingProductionView {
                production,
                performers,
            });
        }
        productions.sort_by(|a, b| production_order(&a.production, &b.production));

        Ok(CharacterView {
            model: Model::Character,
            uuid: id.to_uuid(),
            variant_named_depictions: variant_named_depictions(&character.name, &all_depictions),
            variant_named_portrayals: variant_named_portrayals.into_iter().collect(),
            name: character.name,
            differentiator: character.differentiator,
            materials,
            productions,
        })
    }
}
