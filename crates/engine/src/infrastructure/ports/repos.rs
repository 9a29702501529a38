//! Repository port traits for graph access.
//!
//! Aggregates are read and written whole: a `save` replaces every edge the
//! aggregate owns. Reverse lookups return ids only; callers load what they render.

use async_trait::async_trait;
use theatrebase_domain::{
    AwardCeremony, AwardCeremonyId, AwardId, CharacterId, CreditKind, EntityKey, Material,
    MaterialId, MaterialRef, Named, NodeLabel, PersonId, Production, ProductionId, ProductionRef,
    Venue, VenueId, VenueRef,
};
use uuid::Uuid;

use super::error::RepoError;

/// Outcome of an atomic find-or-create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merged {
    pub id: Uuid,
    /// False when a node with the key already existed.
    pub created: bool,
}

// =============================================================================
// Keyed nodes
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityRepo: Send + Sync {
    async fn get(&self, label: NodeLabel, id: Uuid) -> Result<Option<Named<Uuid>>, RepoError>;
    async fn find(&self, label: NodeLabel, key: &EntityKey) -> Result<Option<Uuid>, RepoError>;

    /// Finds the node with this key or creates it with `candidate` as its uuid,
    /// as a single conditional upsert.
    async fn merge(
        &self,
        label: NodeLabel,
        key: &EntityKey,
        candidate: Uuid,
    ) -> Result<Merged, RepoError>;

    /// Re-keys an existing node. Fails with `KeyTaken` if the key is taken.
    async fn rename(&self, label: NodeLabel, id: Uuid, key: &EntityKey) -> Result<(), RepoError>;

    /// Detaches and deletes the node. Returns false if it did not exist.
    async fn delete(&self, label: NodeLabel, id: Uuid) -> Result<bool, RepoError>;

    async fn list(&self, label: NodeLabel) -> Result<Vec<Named<Uuid>>, RepoError>;
}

// =============================================================================
// Aggregates
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialRepo: Send + Sync {
    async fn get(&self, id: MaterialId) -> Result<Option<Material>, RepoError>;

    /// Writes attributes and replaces owned edges. The node must already exist.
    async fn save(&self, material: &Material) -> Result<(), RepoError>;

    async fn sur_material(&self, id: MaterialId) -> Result<Option<MaterialRef>, RepoError>;
    async fn list_subsequent_versions(&self, id: MaterialId)
        -> Result<Vec<MaterialId>, RepoError>;

    /// Materials whose writing credits name this person or company, directly or as a member.
    async fn list_written_by(&self, entity: Uuid) -> Result<Vec<MaterialId>, RepoError>;
    async fn list_depicting(&self, character: CharacterId) -> Result<Vec<MaterialId>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductionRepo: Send + Sync {
    async fn get(&self, id: ProductionId) -> Result<Option<Production>, RepoError>;

    /// Creates the node if needed, writes attributes and replaces owned edges.
    async fn save(&self, production: &Production) -> Result<(), RepoError>;
    async fn delete(&self, id: ProductionId) -> Result<bool, RepoError>;

    async fn sur_production(&self, id: ProductionId) -> Result<Option<ProductionRef>, RepoError>;
    async fn list_all(&self) -> Result<Vec<ProductionId>, RepoError>;
    async fn list_of_material(&self, material: MaterialId) -> Result<Vec<ProductionId>, RepoError>;
    async fn list_at_venue(&self, venue: VenueId) -> Result<Vec<ProductionId>, RepoError>;
    async fn list_credited(
        &self,
        entity: Uuid,
        kind: CreditKind,
    ) -> Result<Vec<ProductionId>, RepoError>;
    async fn list_with_cast_member(&self, person: PersonId)
        -> Result<Vec<ProductionId>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VenueRepo: Send + Sync {
    async fn get(&self, id: VenueId) -> Result<Option<Venue>, RepoError>;
    async fn save(&self, venue: &Venue) -> Result<(), RepoError>;
    async fn sur_venue(&self, id: VenueId) -> Result<Option<VenueRef>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AwardRepo: Send + Sync {
    async fn get_ceremony(&self, id: AwardCeremonyId) -> Result<Option<AwardCeremony>, RepoError>;
    /// Creates or replaces the ceremony. Fails with `KeyTaken`, writing nothing,
    /// when another ceremony of the same award already has this name.
    async fn save_ceremony(&self, ceremony: &AwardCeremony) -> Result<(), RepoError>;
    async fn delete_ceremony(&self, id: AwardCeremonyId) -> Result<bool, RepoError>;

    async fn find_ceremony(
        &self,
        award: AwardId,
        name: &str,
    ) -> Result<Option<AwardCeremonyId>, RepoError>;
    async fn list_ceremonies(&self) -> Result<Vec<AwardCeremonyId>, RepoError>;
    async fn list_ceremonies_of_award(
        &self,
        award: AwardId,
    ) -> Result<Vec<AwardCeremonyId>, RepoError>;

    /// Ceremonies with a nomination naming any of these entities, productions or materials.
    async fn list_ceremonies_nominating(
        &self,
        uuids: Vec<Uuid>,
    ) -> Result<Vec<AwardCeremonyId>, RepoError>;
}
