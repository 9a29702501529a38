use theatrebase_domain::{
    CharacterGroup, CharacterId, CreditKind, Depiction, EntityKey, Material, MaterialId,
    MaterialRef, NodeLabel,
};
use theatrebase_domain::common::trimmed_or_none;
use theatrebase_shared::requests::{KeyedEntityRequest, MaterialRequest};
use theatrebase_shared::views::EntityView;
use uuid::Uuid;

use super::{check, self_reference_message, Management, WriteError};
use crate::infrastructure::ports::RepoError;
use crate::use_cases::credits::{resolve_credits, validate_credits};
use crate::use_cases::projection::{Page, Subject, SubjectKind};
use crate::use_cases::roles::{depiction_request, validate_character_groups};
use crate::use_cases::surrogates::Hierarchy;
use crate::use_cases::validation::{require_key, FieldErrors};

fn optional_key(request: Option<&KeyedEntityRequest>) -> Option<EntityKey> {
    let request = request?;
    EntityKey::new(&request.name, request.differentiator.as_deref()).ok()
}

fn validate(request: &MaterialRequest) -> (FieldErrors, Option<EntityKey>) {
    let mut errors = FieldErrors::new();
    let key = require_key(
        &mut errors,
        "name",
        Some(&request.name),
        request.differentiator.as_deref(),
    );
    validate_credits(
        &mut errors,
        "writingCredits",
        CreditKind::Writing,
        &request.writing_credits,
    );
    validate_character_groups(&mut errors, &request.character_groups);
    (errors, key)
}

impl Management {
    pub(super) async fn resolve_material(
        &self,
        request: &KeyedEntityRequest,
    ) -> Result<Option<MaterialRef>, RepoError> {
        match optional_key(Some(request)) {
            Some(key) => Ok(Some(
                self.resolver.resolve_named(NodeLabel::Material, &key).await?,
            )),
            None => Ok(None),
        }
    }

    async fn resolve_character_groups(
        &self,
        request: &MaterialRequest,
    ) -> Result<Vec<CharacterGroup>, RepoError> {
        let mut groups = Vec::new();
        for group in &request.character_groups {
            let mut depictions = Vec::new();
            for character in &group.characters {
                let Some(depiction) = depiction_request(character) else {
                    continue;
                };
                depictions.push(Depiction {
                    character: self
                        .resolver
                        .resolve_named::<CharacterId>(NodeLabel::Character, &depiction.key)
                        .await?,
                    display_name: depiction.display_name,
                    qualifier: depiction.qualifier,
                });
            }

            let name = trimmed_or_none(group.name.as_deref());
            if depictions.is_empty() && name.is_none() {
                continue;
            }
            groups.push(CharacterGroup { name, depictions });
        }
        Ok(groups)
    }

    /// Resolves references and checks the hierarchy.
    async fn build_material(
        &self,
        id: MaterialId,
        key: &EntityKey,
        request: &MaterialRequest,
    ) -> Result<Material, WriteError> {
        let mut errors = FieldErrors::new();

        let original_version = match &request.original_version_material {
            Some(original) => self.resolve_material(original).await?,
            None => None,
        };
        if original_version.as_ref().is_some_and(|o| o.id == id) {
            errors.add("originalVersionMaterial.name", self_reference_message());
        }

        let mut subs = Vec::new();
        for (index, sub) in request.sub_materials.iter().enumerate() {
            if let Some(sub) = self.resolve_material(sub).await? {
                subs.push((index, sub));
            }
        }
        let children: Vec<(usize, Uuid)> = subs.iter().map(|(i, s)| (*i, s.id.to_uuid())).collect();
        self.check_subs(&mut errors, Hierarchy::Material, id.to_uuid(), &children, |i| {
            format!("subMaterials[{i}].name")
        })
        .await?;
        check(errors)?;

        let mut material = Material::new(id, key);
        material.format = trimmed_or_none(request.format.as_deref());
        material.year = request.year;
        material.original_version = original_version;
        material.sub_materials = subs.into_iter().map(|(_, s)| s).collect();
        material.writing_credits =
            resolve_credits(&self.resolver, CreditKind::Writing, &request.writing_credits).await?;
        material.character_groups = self.resolve_character_groups(request).await?;
        Ok(material)
    }

    pub async fn create_material(&self, request: &MaterialRequest) -> Result<Page, WriteError> {
        let (errors, key) = validate(request);
        let Some(key) = key.filter(|_| errors.is_empty()) else {
            return Err(errors.into());
        };

        let id = self
            .create_keyed(NodeLabel::Material, &key, |id| {
                let key = &key;
                async move {
                    let material = self
                        .build_material(MaterialId::from_uuid(id), key, request)
                        .await?;
                    Ok(self.repos.material.save(&material).await?)
                }
            })
            .await?;
        self.page(Subject::Material(MaterialId::from_uuid(id))).await
    }

    pub async fn update_material(
        &self,
        id: MaterialId,
        request: &MaterialRequest,
    ) -> Result<Page, WriteError> {
        if self.repos.material.get(id).await?.is_none() {
            return Err(WriteError::not_found(SubjectKind::Material, id));
        }
        let (errors, key) = validate(request);
        let Some(key) = key.filter(|_| errors.is_empty()) else {
            return Err(errors.into());
        };

        let material = self.build_material(id, &key, request).await?;
        self.rekey(NodeLabel::Material, id.to_uuid(), &key).await?;
        self.repos.material.save(&material).await?;
        tracing::info!(material = %id, "Material updated");
        self.page(Subject::Material(id)).await
    }

    pub async fn delete_material(&self, id: MaterialId) -> Result<EntityView, WriteError> {
        self.delete_keyed(SubjectKind::Material, NodeLabel::Material, id.to_uuid())
            .await
    }
}
