//! Volatile graph store implementing every repository port.
//!
//! Used for `STORE_BACKEND=memory` and by use-case tests. All state sits
//! behind one `RwLock`, so a merge is a single critical section and readers
//! never observe a half-written aggregate.
//!
//! References inside stored aggregates are refreshed from the keyed node
//! table on every read, so a rename shows up everywhere the node is listed.

use std::collections::HashMap;

use async_trait::async_trait;
use theatrebase_domain::{
    AwardCeremony, AwardCeremonyId, AwardId, CharacterId, Credit, CreditKind, CreditedEntity,
    EntityKey, Material, MaterialId, MaterialRef, Named, NodeLabel, PersonId, Production,
    ProductionId, ProductionRef, Venue, VenueId, VenueRef,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::infrastructure::ports::{
    AwardRepo, IdentityRepo, MaterialRepo, Merged, ProductionRepo, RepoError, VenueRepo,
};

#[derive(Debug, Clone)]
struct KeyedRecord {
    label: NodeLabel,
    key: EntityKey,
}

#[derive(Default)]
struct GraphState {
    keyed: HashMap<Uuid, KeyedRecord>,
    keys: HashMap<(NodeLabel, EntityKey), Uuid>,
    materials: HashMap<MaterialId, Material>,
    venues: HashMap<VenueId, Venue>,
    productions: HashMap<ProductionId, Production>,
    ceremonies: HashMap<AwardCeremonyId, AwardCeremony>,
}

#[derive(Default)]
pub struct InMemoryGraph {
    state: RwLock<GraphState>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted<I: Ord>(mut ids: Vec<I>) -> Vec<I> {
    ids.sort();
    ids.dedup();
    ids
}

// =============================================================================
// Reference refresh
// =============================================================================

impl GraphState {
    fn keyed_ref<I: Copy>(&self, named: &Named<I>, uuid: Uuid) -> Named<I> {
        match self.keyed.get(&uuid) {
            Some(record) => Named::new(named.id, &record.key),
            None => named.clone(),
        }
    }

    fn production_ref(&self, production: &ProductionRef) -> ProductionRef {
        match self.productions.get(&production.id) {
            Some(stored) => stored.to_ref(),
            None => production.clone(),
        }
    }

    fn refresh_entities(&self, entities: &mut [CreditedEntity]) {
        for entity in entities.iter_mut() {
            match entity {
                CreditedEntity::Person(person) => {
                    *person = self.keyed_ref(person, person.id.to_uuid());
                }
                CreditedEntity::Company { company, members } => {
                    *company = self.keyed_ref(company, company.id.to_uuid());
                    for member in members.iter_mut() {
                        *member = self.keyed_ref(member, member.id.to_uuid());
                    }
                }
            }
        }
    }

    fn refresh_credits(&self, credits: &mut [Credit]) {
        for credit in credits.iter_mut() {
            self.refresh_entities(&mut credit.entities);
        }
    }

    fn read_material(&self, id: MaterialId) -> Option<Material> {
        let record = self
            .keyed
            .get(&id.to_uuid())
            .filter(|r| r.label == NodeLabel::Material)?;

        let mut material = self
            .materials
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Material::new(id, &record.key));
        material.name = record.key.name().to_string();
        material.differentiator = record.key.differentiator().to_string();

        if let Some(original) = material.original_version.as_mut() {
            *original = self.keyed_ref(original, original.id.to_uuid());
        }
        for sub in material.sub_materials.iter_mut() {
            *sub = self.keyed_ref(sub, sub.id.to_uuid());
        }
        self.refresh_credits(&mut material.writing_credits);
        for group in material.character_groups.iter_mut() {
            for depiction in group.depictions.iter_mut() {
                depiction.character =
                    self.keyed_ref(&depiction.character, depiction.character.id.to_uuid());
            }
        }
        Some(material)
    }

    fn read_venue(&self, id: VenueId) -> Option<Venue> {
        let record = self
            .keyed
            .get(&id.to_uuid())
            .filter(|r| r.label == NodeLabel::Venue)?;

        let mut venue = self
            .venues
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Venue::new(id, &record.key));
        venue.name = record.key.name().to_string();
        venue.differentiator = record.key.differentiator().to_string();
        for sub in venue.sub_venues.iter_mut() {
            *sub = self.keyed_ref(sub, sub.id.to_uuid());
        }
        Some(venue)
    }

    fn read_production(&self, id: ProductionId) -> Option<Production> {
        let mut production = self.productions.get(&id).cloned()?;

        if let Some(material) = production.material.as_mut() {
            *material = self.keyed_ref(material, material.id.to_uuid());
        }
        if let Some(venue) = production.venue.as_mut() {
            *venue = self.keyed_ref(venue, venue.id.to_uuid());
        }
        production.sub_productions = production
            .sub_productions
            .iter()
            .map(|sub| self.production_ref(sub))
            .collect();
        self.refresh_credits(&mut production.producer_credits);
        self.refresh_credits(&mut production.creative_credits);
        self.refresh_credits(&mut production.crew_credits);
        for member in production.cast.iter_mut() {
            member.person = self.keyed_ref(&member.person, member.person.id.to_uuid());
        }
        Some(production)
    }

    fn read_ceremony(&self, id: AwardCeremonyId) -> Option<AwardCeremony> {
        let mut ceremony = self.ceremonies.get(&id).cloned()?;

        if let Some(award) = ceremony.award.as_mut() {
            *award = self.keyed_ref(award, award.id.to_uuid());
        }
        for category in ceremony.categories.iter_mut() {
            for nomination in category.nominations.iter_mut() {
                self.refresh_entities(&mut nomination.entities);
                nomination.productions = nomination
                    .productions
                    .iter()
                    .map(|p| self.production_ref(p))
                    .collect();
                for material in nomination.materials.iter_mut() {
                    *material = self.keyed_ref(material, material.id.to_uuid());
                }
            }
        }
        Some(ceremony)
    }
}

// =============================================================================
// Detaching deleted nodes
// =============================================================================

fn strip_entities(entities: &mut Vec<CreditedEntity>, uuid: Uuid) {
    entities.retain(|entity| entity.uuid() != uuid);
    for entity in entities.iter_mut() {
        if let CreditedEntity::Company { members, .. } = entity {
            members.retain(|member| member.id.to_uuid() != uuid);
        }
    }
}

fn strip_credits(credits: &mut Vec<Credit>, uuid: Uuid) {
    for credit in credits.iter_mut() {
        strip_entities(&mut credit.entities, uuid);
    }
    credits.retain(|credit| !credit.entities.is_empty());
}

impl GraphState {
    /// Removes every edge pointing at `uuid`, the way `DETACH DELETE` would.
    fn detach(&mut self, uuid: Uuid) {
        for material in self.materials.values_mut() {
            if material
                .original_version
                .as_ref()
                .is_some_and(|o| o.id.to_uuid() == uuid)
            {
                material.original_version = None;
            }
            material.sub_materials.retain(|s| s.id.to_uuid() != uuid);
            strip_credits(&mut material.writing_credits, uuid);
            for group in material.character_groups.iter_mut() {
                group
                    .depictions
                    .retain(|d| d.character.id.to_uuid() != uuid);
            }
            material
                .character_groups
                .retain(|group| !group.depictions.is_empty());
        }

        for venue in self.venues.values_mut() {
            venue.sub_venues.retain(|s| s.id.to_uuid() != uuid);
        }

        for production in self.productions.values_mut() {
            if production
                .material
                .as_ref()
                .is_some_and(|m| m.id.to_uuid() == uuid)
            {
                production.material = None;
            }
            if production
                .venue
                .as_ref()
                .is_some_and(|v| v.id.to_uuid() == uuid)
            {
                production.venue = None;
            }
            production
                .sub_productions
                .retain(|s| s.id.to_uuid() != uuid);
            strip_credits(&mut production.producer_credits, uuid);
            strip_credits(&mut production.creative_credits, uuid);
            strip_credits(&mut production.crew_credits, uuid);
            production.cast.retain(|m| m.person.id.to_uuid() != uuid);
        }

        for ceremony in self.ceremonies.values_mut() {
            if ceremony
                .award
                .as_ref()
                .is_some_and(|a| a.id.to_uuid() == uuid)
            {
                ceremony.award = None;
            }
            for category in ceremony.categories.iter_mut() {
                for nomination in category.nominations.iter_mut() {
                    strip_entities(&mut nomination.entities, uuid);
                    nomination.productions.retain(|p| p.id.to_uuid() != uuid);
                    nomination.materials.retain(|m| m.id.to_uuid() != uuid);
                }
                category.nominations.retain(|n| !n.is_empty());
            }
        }
    }
}

// =============================================================================
// Keyed nodes
// =============================================================================

#[async_trait]
impl IdentityRepo for InMemoryGraph {
    async fn get(&self, label: NodeLabel, id: Uuid) -> Result<Option<Named<Uuid>>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .keyed
            .get(&id)
            .filter(|record| record.label == label)
            .map(|record| Named::new(id, &record.key)))
    }

    async fn find(&self, label: NodeLabel, key: &EntityKey) -> Result<Option<Uuid>, RepoError> {
        let state = self.state.read().await;
        Ok(state.keys.get(&(label, key.clone())).copied())
    }

    async fn merge(
        &self,
        label: NodeLabel,
        key: &EntityKey,
        candidate: Uuid,
    ) -> Result<Merged, RepoError> {
        let mut state = self.state.write().await;
        if let Some(&id) = state.keys.get(&(label, key.clone())) {
            return Ok(Merged { id, created: false });
        }
        if state.keyed.contains_key(&candidate) {
            return Err(RepoError::key_taken(format!(
                "uuid {candidate} is already in use"
            )));
        }

        state.keys.insert((label, key.clone()), candidate);
        state.keyed.insert(
            candidate,
            KeyedRecord {
                label,
                key: key.clone(),
            },
        );
        tracing::debug!(%label, key = %key, uuid = %candidate, "Created node");
        Ok(Merged {
            id: candidate,
            created: true,
        })
    }

    async fn rename(&self, label: NodeLabel, id: Uuid, key: &EntityKey) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let Some(record) = state.keyed.get(&id).filter(|r| r.label == label).cloned() else {
            return Err(RepoError::not_found(label.as_str(), id));
        };
        match state.keys.get(&(label, key.clone())) {
            Some(&holder) if holder != id => {
                return Err(RepoError::key_taken(format!(
                    "{label} {key} already exists"
                )));
            }
            _ => {}
        }

        state.keys.remove(&(label, record.key));
        state.keys.insert((label, key.clone()), id);
        state.keyed.insert(
            id,
            KeyedRecord {
                label,
                key: key.clone(),
            },
        );
        Ok(())
    }

    async fn delete(&self, label: NodeLabel, id: Uuid) -> Result<bool, RepoError> {
        let mut state = self.state.write().await;
        let Some(record) = state.keyed.get(&id).filter(|r| r.label == label).cloned() else {
            return Ok(false);
        };

        state.keyed.remove(&id);
        state.keys.remove(&(label, record.key));
        match label {
            NodeLabel::Material => {
                state.materials.remove(&MaterialId::from_uuid(id));
            }
            NodeLabel::Venue => {
                state.venues.remove(&VenueId::from_uuid(id));
            }
            NodeLabel::Person | NodeLabel::Company | NodeLabel::Character | NodeLabel::Award => {}
        }
        state.detach(id);
        tracing::debug!(%label, uuid = %id, "Deleted node");
        Ok(true)
    }

    async fn list(&self, label: NodeLabel) -> Result<Vec<Named<Uuid>>, RepoError> {
        let state = self.state.read().await;
        let mut nodes: Vec<Named<Uuid>> = state
            .keyed
            .iter()
            .filter(|(_, record)| record.label == label)
            .map(|(&id, record)| Named::new(id, &record.key))
            .collect();
        nodes.sort_by(|a, b| {
            (&a.name, &a.differentiator).cmp(&(&b.name, &b.differentiator))
        });
        Ok(nodes)
    }
}

// =============================================================================
// Aggregates
// =============================================================================

#[async_trait]
impl MaterialRepo for InMemoryGraph {
    async fn get(&self, id: MaterialId) -> Result<Option<Material>, RepoError> {
        Ok(self.state.read().await.read_material(id))
    }

    async fn save(&self, material: &Material) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if !state.keyed.contains_key(&material.id.to_uuid()) {
            return Err(RepoError::not_found("Material", material.id));
        }
        state.materials.insert(material.id, material.clone());
        Ok(())
    }

    async fn sur_material(&self, id: MaterialId) -> Result<Option<MaterialRef>, RepoError> {
        let state = self.state.read().await;
        let sur = state
            .materials
            .values()
            .find(|m| m.sub_materials.iter().any(|s| s.id == id))
            .map(|m| m.id);
        Ok(sur
            .and_then(|sur| state.read_material(sur))
            .map(|m| m.to_ref()))
    }

    async fn list_subsequent_versions(
        &self,
        id: MaterialId,
    ) -> Result<Vec<MaterialId>, RepoError> {
        let state = self.state.read().await;
        Ok(sorted(
            state
                .materials
                .values()
                .filter(|m| m.original_version.as_ref().is_some_and(|o| o.id == id))
                .map(|m| m.id)
                .collect(),
        ))
    }

    async fn list_written_by(&self, entity: Uuid) -> Result<Vec<MaterialId>, RepoError> {
        let state = self.state.read().await;
        Ok(sorted(
            state
                .materials
                .values()
                .filter(|m| m.writing_credits.iter().any(|c| c.involves(entity)))
                .map(|m| m.id)
                .collect(),
        ))
    }

    async fn list_depicting(&self, character: CharacterId) -> Result<Vec<MaterialId>, RepoError> {
        let state = self.state.read().await;
        Ok(sorted(
            state
                .materials
                .values()
                .filter(|m| m.depictions_of(character).next().is_some())
                .map(|m| m.id)
                .collect(),
        ))
    }
}

#[async_trait]
impl ProductionRepo for InMemoryGraph {
    async fn get(&self, id: ProductionId) -> Result<Option<Production>, RepoError> {
        Ok(self.state.read().await.read_production(id))
    }

    async fn save(&self, production: &Production) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.productions.insert(production.id, production.clone());
        Ok(())
    }

    async fn delete(&self, id: ProductionId) -> Result<bool, RepoError> {
        let mut state = self.state.write().await;
        if state.productions.remove(&id).is_none() {
            return Ok(false);
        }
        state.detach(id.to_uuid());
        Ok(true)
    }

    async fn sur_production(&self, id: ProductionId) -> Result<Option<ProductionRef>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .productions
            .values()
            .find(|p| p.sub_productions.iter().any(|s| s.id == id))
            .map(Production::to_ref))
    }

    async fn list_all(&self) -> Result<Vec<ProductionId>, RepoError> {
        let state = self.state.read().await;
        Ok(sorted(state.productions.keys().copied().collect()))
    }

    async fn list_of_material(&self, material: MaterialId) -> Result<Vec<ProductionId>, RepoError> {
        let state = self.state.read().await;
        Ok(sorted(
            state
                .productions
                .values()
                .filter(|p| p.material.as_ref().is_some_and(|m| m.id == material))
                .map(|p| p.id)
                .collect(),
        ))
    }

    async fn list_at_venue(&self, venue: VenueId) -> Result<Vec<ProductionId>, RepoError> {
        let state = self.state.read().await;
        Ok(sorted(
            state
                .productions
                .values()
                .filter(|p| p.venue.as_ref().is_some_and(|v| v.id == venue))
                .map(|p| p.id)
                .collect(),
        ))
    }

    async fn list_credited(
        &self,
        entity: Uuid,
        kind: CreditKind,
    ) -> Result<Vec<ProductionId>, RepoError> {
        let state = self.state.read().await;
        Ok(sorted(
            state
                .productions
                .values()
                .filter(|p| p.credits(kind).iter().any(|c| c.involves(entity)))
                .map(|p| p.id)
                .collect(),
        ))
    }

    async fn list_with_cast_member(
        &self,
        person: PersonId,
    ) -> Result<Vec<ProductionId>, RepoError> {
        let state = self.state.read().await;
        Ok(sorted(
            state
                .productions
                .values()
                .filter(|p| p.cast_member(person).is_some())
                .map(|p| p.id)
                .collect(),
        ))
    }
}

#[async_trait]
impl VenueRepo for InMemoryGraph {
    async fn get(&self, id: VenueId) -> Result<Option<Venue>, RepoError> {
        Ok(self.state.read().await.read_venue(id))
    }

    async fn save(&self, venue: &Venue) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if !state.keyed.contains_key(&venue.id.to_uuid()) {
            return Err(RepoError::not_found("Venue", venue.id));
        }
        state.venues.insert(venue.id, venue.clone());
        Ok(())
    }

    async fn sur_venue(&self, id: VenueId) -> Result<Option<VenueRef>, RepoError> {
        let state = self.state.read().await;
        let sur = state
            .venues
            .values()
            .find(|v| v.sub_venues.iter().any(|s| s.id == id))
            .map(|v| v.id);
        Ok(sur.and_then(|sur| state.read_venue(sur)).map(|v| v.to_ref()))
    }
}

#[async_trait]
impl AwardRepo for InMemoryGraph {
    async fn get_ceremony(&self, id: AwardCeremonyId) -> Result<Option<AwardCeremony>, RepoError> {
        Ok(self.state.read().await.read_ceremony(id))
    }

    async fn save_ceremony(&self, ceremony: &AwardCeremony) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if let Some(award) = &ceremony.award {
            let taken = state.ceremonies.values().any(|other| {
                other.id != ceremony.id
                    && other.name == ceremony.name
                    && other.award.as_ref().is_some_and(|a| a.id == award.id)
            });
            if taken {
                return Err(RepoError::key_taken(format!(
                    "ceremony {} of award {} already exists",
                    ceremony.name, award.id
                )));
            }
        }
        state.ceremonies.insert(ceremony.id, ceremony.clone());
        Ok(())
    }

    async fn delete_ceremony(&self, id: AwardCeremonyId) -> Result<bool, RepoError> {
        let mut state = self.state.write().await;
        Ok(state.ceremonies.remove(&id).is_some())
    }

    async fn find_ceremony(
        &self,
        award: AwardId,
        name: &str,
    ) -> Result<Option<AwardCeremonyId>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .ceremonies
            .values()
            .find(|c| c.name == name && c.award.as_ref().is_some_and(|a| a.id == award))
            .map(|c| c.id))
    }

    async fn list_ceremonies(&self) -> Result<Vec<AwardCeremonyId>, RepoError> {
        let state = self.state.read().await;
        Ok(sorted(state.ceremonies.keys().copied().collect()))
    }

    async fn list_ceremonies_of_award(
        &self,
        award: AwardId,
    ) -> Result<Vec<AwardCeremonyId>, RepoError> {
        let state = self.state.read().await;
        Ok(sorted(
            state
                .ceremonies
                .values()
                .filter(|c| c.award.as_ref().is_some_and(|a| a.id == award))
                .map(|c| c.id)
                .collect(),
        ))
    }

    async fn list_ceremonies_nominating(
        &self,
        uuids: Vec<Uuid>,
    ) -> Result<Vec<AwardCeremonyId>, RepoError> {
        let state = self.state.read().await;
        Ok(sorted(
            state
                .ceremonies
                .values()
                .filter(|c| {
                    c.categories.iter().any(|category| {
                        category
                            .nominations
                            .iter()
                            .any(|n| uuids.iter().any(|&uuid| n.references(uuid)))
                    })
                })
                .map(|c| c.id)
                .collect(),
        ))
    }
}
