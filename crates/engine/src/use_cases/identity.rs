//! Identity resolution: which node a (label, name, differentiator) names.
//!
//! Every keyed node comes into existence here. Resolution is a single
//! conditional upsert in the store, so concurrent writers naming the same
//! key converge on one node.

use std::sync::Arc;

use theatrebase_domain::{EntityKey, Named, NodeLabel};
use uuid::Uuid;

use crate::infrastructure::ports::{IdentityRepo, RepoError, UuidPort};

/// Result of claiming a key for a new subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    Created(Uuid),
    /// The key already belongs to this node.
    Conflict(Uuid),
}

/// Result of moving an existing subject onto a (possibly new) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rekey {
    Applied,
    Conflict(Uuid),
}

#[derive(Clone)]
pub struct IdentityResolver {
    repo: Arc<dyn IdentityRepo>,
    uuids: Arc<dyn UuidPort>,
}

impl IdentityResolver {
    pub fn new(repo: Arc<dyn IdentityRepo>, uuids: Arc<dyn UuidPort>) -> Self {
        Self { repo, uuids }
    }

    /// Find-or-create. Used for every referenced entity in a write.
    pub async fn resolve(&self, label: NodeLabel, key: &EntityKey) -> Result<Uuid, RepoError> {
        let merged = self.repo.merge(label, key, self.uuids.new_uuid()).await?;
        Ok(merged.id)
    }

    /// `resolve`, typed for the label's id.
    pub async fn resolve_named<I: From<Uuid>>(
        &self,
        label: NodeLabel,
        key: &EntityKey,
    ) -> Result<Named<I>, RepoError> {
        let id = self.resolve(label, key).await?;
        Ok(Named::new(I::from(id), key))
    }

    /// Creates the node for a new subject, or reports who already holds the key.
    pub async fn claim(&self, label: NodeLabel, key: &EntityKey) -> Result<Claim, RepoError> {
        let merged = self.repo.merge(label, key, self.uuids.new_uuid()).await?;
        if merged.created {
            Ok(Claim::Created(merged.id))
        } else {
            tracing::debug!(%label, key = %key, holder = %merged.id, "Key already claimed");
            Ok(Claim::Conflict(merged.id))
        }
    }

    /// Re-keys `id`, unless another node of the label holds the key.
    pub async fn reclaim(
        &self,
        label: NodeLabel,
        id: Uuid,
        key: &EntityKey,
    ) -> Result<Rekey, RepoError> {
        match self.repo.find(label, key).await? {
            Some(holder) if holder != id => return Ok(Rekey::Conflict(holder)),
            Some(_) => return Ok(Rekey::Applied),
            None => {}
        }

        match self.repo.rename(label, id, key).await {
            Ok(()) => Ok(Rekey::Applied),
            // Another writer took the key after our lookup.
            Err(e) if e.is_key_taken() => match self.repo.find(label, key).await? {
                Some(holder) => Ok(Rekey::Conflict(holder)),
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    pub async fn get(&self, label: NodeLabel, id: Uuid) -> Result<Option<Named<Uuid>>, RepoError> {
        self.repo.get(label, id).await
    }

    pub async fn delete(&self, label: NodeLabel, id: Uuid) -> Result<bool, RepoError> {
        self.repo.delete(label, id).await
    }

    pub async fn list(&self, label: NodeLabel) -> Result<Vec<Named<Uuid>>, RepoError> {
        self.repo.list(label).await
    }
}
