//! Whole/part (sur/sub) hierarchy walking for materials, productions and venues.
//!
//! Reads only ever go one level up or down. The forest invariants are
//! enforced when a sub list is written, via `check_subs`.

use std::collections::HashSet;

use theatrebase_domain::{
    check_sub_entities, MaterialId, MaterialRef, ProductionId, ProductionRef, SurrogateViolation,
    VenueId, VenueRef,
};
use uuid::Uuid;

use crate::app::Repositories;
use crate::infrastructure::ports::RepoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hierarchy {
    Material,
    Production,
    Venue,
}

#[derive(Clone)]
pub struct SurrogateWalker {
    repos: Repositories,
}

impl SurrogateWalker {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn sur_material(&self, id: MaterialId) -> Result<Option<MaterialRef>, RepoError> {
        self.repos.material.sur_material(id).await
    }

    pub async fn sur_production(
        &self,
        id: ProductionId,
    ) -> Result<Option<ProductionRef>, RepoError> {
        self.repos.production.sur_production(id).await
    }

    pub async fn sur_venue(&self, id: VenueId) -> Result<Option<VenueRef>, RepoError> {
        self.repos.venue.sur_venue(id).await
    }

    /// The immediate sur-parent of `id`, if any.
    pub async fn sur(&self, hierarchy: Hierarchy, id: Uuid) -> Result<Option<Uuid>, RepoError> {
        Ok(match hierarchy {
            Hierarchy::Material => self
                .sur_material(MaterialId::from_uuid(id))
                .await?
                .map(|r| r.id.to_uuid()),
            Hierarchy::Production => self
                .sur_production(ProductionId::from_uuid(id))
                .await?
                .map(|r| r.id.to_uuid()),
            Hierarchy::Venue => self
                .sur_venue(VenueId::from_uuid(id))
                .await?
                .map(|r| r.id.to_uuid()),
        })
    }

    /// The immediate children of `id` in declared order.
    pub async fn subs(&self, hierarchy: Hierarchy, id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        Ok(match hierarchy {
            Hierarchy::Material => self
                .repos
                .material
                .get(MaterialId::from_uuid(id))
                .await?
                .map(|m| m.sub_materials.iter().map(|s| s.id.to_uuid()).collect())
                .unwrap_or_default(),
            Hierarchy::Production => self
                .repos
                .production
                .get(ProductionId::from_uuid(id))
                .await?
                .map(|p| p.sub_productions.iter().map(|s| s.id.to_uuid()).collect())
                .unwrap_or_default(),
            Hierarchy::Venue => self
                .repos
                .venue
                .get(VenueId::from_uuid(id))
                .await?
                .map(|v| v.sub_venues.iter().map(|s| s.id.to_uuid()).collect())
                .unwrap_or_default(),
        })
    }

    /// `id` followed by its immediate children.
    pub async fn family(&self, hierarchy: Hierarchy, id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let mut ids = vec![id];
        ids.extend(self.subs(hierarchy, id).await?);
        Ok(ids)
    }

    /// Sur-parent chain of `id`, nearest first.
    pub async fn ancestors(&self, hierarchy: Hierarchy, id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut current = id;
        while let Some(parent) = self.sur(hierarchy, current).await? {
            if !seen.insert(parent) {
                tracing::warn!(?hierarchy, %id, %parent, "Surrogate cycle found in store");
                break;
            }
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// Checks a proposed sub list for `owner`; returns offending indexes.
    pub async fn check_subs(
        &self,
        hierarchy: Hierarchy,
        owner: Uuid,
        children: &[Uuid],
    ) -> Result<Vec<(usize, SurrogateViolation)>, RepoError> {
        if children.is_empty() {
            return Ok(Vec::new());
        }

        let mut parents = std::collections::HashMap::new();
        for &child in children {
            if let Some(parent) = self.sur(hierarchy, child).await? {
                parents.insert(child, parent);
            }
        }
        let ancestors = self.ancestors(hierarchy, owner).await?;

        Ok(check_sub_entities(
            owner,
            children,
            |child| parents.get(&child).copied(),
            &ancestors,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use theatrebase_domain::{EntityKey, Named, NodeLabel, ProductionRef, Venue};

    use crate::infrastructure::ports::MockProductionRepo;
    use crate::test_fixtures::memory_repositories;

    async fn venue(repos: &Repositories, n: u128, name: &str) -> Named<VenueId> {
        let key = EntityKey::new(name, None).expect("key");
        let merged = repos
            .identity
            .merge(NodeLabel::Venue, &key, Uuid::from_u128(n))
            .await
            .expect("merge");
        Named::new(VenueId::from_uuid(merged.id), &key)
    }

    async fn attach(repos: &Repositories, parent: &Named<VenueId>, children: &[&Named<VenueId>]) {
        let mut stored = Venue::new(
            parent.id,
            &EntityKey::new(&parent.name, None).expect("key"),
        );
        stored.sub_venues = children.iter().map(|c| (*c).clone()).collect();
        repos.venue.save(&stored).await.expect("save");
    }

    #[tokio::test]
    async fn walks_one_level_at_a_time() {
        let repos = memory_repositories();
        let national = venue(&repos, 1, "National Theatre").await;
        let olivier = venue(&repos, 2, "Olivier Theatre").await;
        attach(&repos, &national, &[&olivier]).await;

        let walker = SurrogateWalker::new(repos);
        assert_eq!(
            walker.sur(Hierarchy::Venue, olivier.id.to_uuid()).await.expect("sur"),
            Some(national.id.to_uuid())
        );
        assert_eq!(
            walker.subs(Hierarchy::Venue, national.id.to_uuid()).await.expect("subs"),
            vec![olivier.id.to_uuid()]
        );
        assert_eq!(walker.sur(Hierarchy::Venue, national.id.to_uuid()).await.expect("sur"), None);
        assert_eq!(
            walker.family(Hierarchy::Venue, national.id.to_uuid()).await.expect("family"),
            vec![national.id.to_uuid(), olivier.id.to_uuid()]
        );
        assert_eq!(
            walker.sur_venue(olivier.id).await.expect("sur venue").map(|v| v.name),
            Some("National Theatre".to_string())
        );
    }

    #[tokio::test]
    async fn rejects_cycles_and_children_owned_elsewhere() {
        let repos = memory_repositories();
        let national = venue(&repos, 1, "National Theatre").await;
        let olivier = venue(&repos, 2, "Olivier Theatre").await;
        let almeida = venue(&repos, 3, "Almeida Theatre").await;
        let studio = venue(&repos, 4, "Almeida Studio").await;
        attach(&repos, &national, &[&olivier]).await;
        attach(&repos, &almeida, &[&studio]).await;

        let walker = SurrogateWalker::new(repos);
        let violations = walker
            .check_subs(
                Hierarchy::Venue,
                olivier.id.to_uuid(),
                &[national.id.to_uuid(), studio.id.to_uuid()],
            )
            .await
            .expect("check");

        assert_eq!(
            violations,
            vec![
                (0, SurrogateViolation::Cycle),
                (1, SurrogateViolation::AlreadyClaimed),
            ]
        );
    }

    #[tokio::test]
    async fn ancestor_walk_stops_at_a_stored_cycle() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);

        let mut production = MockProductionRepo::new();
        production.expect_sur_production().returning(move |id| {
            let parent = if id.to_uuid() == a { b } else { a };
            Ok(Some(ProductionRef {
                id: ProductionId::from_uuid(parent),
                name: "Looped".to_string(),
            }))
        });

        let mut repos = memory_repositories();
        repos.production = Arc::new(production);
        let walker = SurrogateWalker::new(repos);

        let chain = walker
            .ancestors(Hierarchy::Production, a)
            .await
            .expect("ancestors");
        assert_eq!(chain, vec![b]);
    }
}
