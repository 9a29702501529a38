use theatrebase_domain::{CreditKind, Depiction, Material, MaterialId, MaterialRef};
use theatrebase_shared::views::{CharacterGroupView, DepictedCharacterView, MaterialView};
use theatrebase_shared::Model;

use super::listings::sort_productions;
use super::summaries::{ref_view, specific_productions};
use super::{ProjectionError, Projector, SubjectKind};
use crate::infrastructure::ports::RepoError;
use crate::use_cases::awards::{group_by_award, material_nomination_view};
use crate::use_cases::credits::credit_views;
use crate::use_cases::surrogates::Hierarchy;

fn depicted_character(depiction: &Depiction) -> DepictedCharacterView {
    DepictedCharacterView {
        model: Model::Character,
        uuid: depiction.character.id.to_uuid(),
        name: depiction.shown_name().to_string(),
        underlying_name: depiction
            .display_name
            .is_some()
            .then(|| depiction.character.name.clone()),
        qualifier: depiction.qualifier.clone(),
    }
}

fn character_groups(material: &Material) -> Vec<CharacterGroupView> {
    material
        .character_groups
        .iter()
        .map(|group| CharacterGroupView {
            name: group.name.clone(),
            characters: group.depictions.iter().map(depicted_character).collect(),
        })
        .collect()
}

impl Projector {
    /// Every depiction in `material` and its immediate sub-materials, which is
    /// what a production of it can cast against.
    pub(crate) async fn castable_depictions(
        &self,
        material: Option<&MaterialRef>,
    ) -> Result<Vec<Depiction>, RepoError> {
        let Some(material) = material else {
            return Ok(Vec::new());
        };
        let Some(material) = self.repos.material.get(material.id).await? else {
            return Ok(Vec::new());
        };

        let mut depictions: Vec<Depiction> = material.depictions().cloned().collect();
        for sub in &material.sub_materials {
            if let Some(sub) = self.repos.material.get(sub.id).await? {
                depictions.extend(sub.depictions().cloned());
            }
        }
        Ok(depictions)
    }

    pub(super) async fn material_page(&self, id: MaterialId) -> Result<MaterialView, ProjectionError> {
        let material = self
            .repos
            .material
            .get(id)
            .await?
            .ok_or_else(|| ProjectionError::not_found(SubjectKind::Material, id))?;

        let sur_material = self.walker.sur_material(id).await?;
        let sub_ids: Vec<MaterialId> = material.sub_materials.iter().map(|s| s.id).collect();

        let original_version_material = match &material.original_version {
            Some(original) => self.material_summaries([original.id]).await?.into_iter().next(),
            None => None,
        };
        let subsequent = self.repos.material.list_subsequent_versions(id).await?;

        let mut production_ids = Vec::new();
        for member in self.walker.family(Hierarchy::Material, id.to_uuid()).await? {
            production_ids.extend(
                self.repos
                    .production
                    .list_of_material(MaterialId::from_uuid(member))
                    .await?,
            );
        }
        let mut productions =
            specific_productions(self.production_summaries(production_ids).await?);
        sort_productions(&mut productions);

        let mut nominated = vec![id.to_uuid()];
        nominated.extend(sub_ids.iter().map(|s| s.to_uuid()));
        let ceremonies = self.ceremonies_nominating(nominated).await?;
        let summaries = self.nominee_summaries(&ceremonies).await?;
        let awards = group_by_award(&ceremonies, |n| {
            material_nomination_view(n, id, &sub_ids, &summaries)
        });

        Ok(MaterialView {
            model: Model::Material,
            uuid: id.to_uuid(),
            name: material.name.clone(),
            differentiator: material.differentiator.clone(),
            format: material.format.clone(),
            year: material.year,
            sur_material: sur_material.as_ref().map(|s| ref_view(Model::Material, s)),
            sub_materials: self.material_summaries(sub_ids.iter().copied()).await?,
            original_version_material,
            subsequent_version_materials: self.material_summaries(subsequent).await?,
            writing_credits: credit_views(CreditKind::Writing, &material.writing_credits),
            character_groups: character_groups(&material),
            productions,
            awards,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theatrebase_domain::{CharacterGroup, CharacterId, EntityKey, Named};
    use uuid::Uuid;

    #[test]
    fn display_names_keep_the_underlying_character_name() {
        let mut material = Material::new(
            MaterialId::from_uuid(Uuid::from_u128(1)),
            &EntityKey::new("Henry IV, Part 1", None).expect("key"),
        );
        material.character_groups.push(CharacterGroup {
            name: None,
            depictions: vec![
                Depiction {
                    character: Named::new(
                        CharacterId::from_uuid(Uuid::from_u128(2)),
                        &EntityKey::new("Henry V", None).expect("key"),
                    ),
                    display_name: Some("Prince Hal".to_string()),
                    qualifier: Some("younger".to_string()),
                },
                Depiction {
                    character: Named::new(
                        CharacterId::from_uuid(Uuid::from_u128(3)),
                        &EntityKey::new("Falstaff", None).expect("key"),
                    ),
                    display_name: None,
                    qualifier: None,
                },
            ],
        });

        let groups = character_groups(&material);

        let hal = &groups[0].characters[0];
        assert_eq!(hal.name, "Prince Hal");
        assert_eq!(hal.underlying_name.as_deref(), Some("Henry V"));
        assert_eq!(hal.qualifier.as_deref(), Some("younger"));
        assert_eq!(groups[0].characters[1].underlying_name, None);
    }
}
