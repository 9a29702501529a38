//! Whole/part (sur/sub) hierarchy rules shared by materials, productions and venues.
//!
//! The hierarchy is a forest: every node has at most one sur-parent and no
//! node is its own ancestor. Both properties are checked whenever a sub list
//! is written, so reads can walk one level at a time without cycle guards.

use std::collections::HashSet;
use std::hash::Hash;

use thiserror::Error;

/// Why a proposed sub-entity cannot be attached to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurrogateViolation {
    #[error("Instance cannot form a surrogate association with itself")]
    SelfReference,
    #[error("This item has been duplicated within the group")]
    Duplicate,
    #[error("Instance is already assigned to another sur-instance")]
    AlreadyClaimed,
    #[error("Instance is an ancestor of this instance")]
    Cycle,
}

/// Checks a proposed list of sub-entities for `owner`.
///
/// `current_parent` gives each candidate's existing sur-parent and
/// `owner_ancestors` the owner's chain of sur-parents. Returns the index of
/// every offending entry with its violation, in list order.
pub fn check_sub_entities<I, F>(
    owner: I,
    children: &[I],
    current_parent: F,
    owner_ancestors: &[I],
) -> Vec<(usize, SurrogateViolation)>
where
    I: Copy + Eq + Hash,
    F: Fn(I) -> Option<I>,
{
    let mut seen = HashSet::new();
    let mut violations = Vec::new();

    for (index, &child) in children.iter().enumerate() {
        let violation = if child == owner {
            Some(SurrogateViolation::SelfReference)
        } else if !seen.insert(child) {
            Some(SurrogateViolation::Duplicate)
        } else if owner_ancestors.contains(&child) {
            Some(SurrogateViolation::Cycle)
        } else {
            match current_parent(child) {
                Some(parent) if parent != owner => Some(SurrogateViolation::AlreadyClaimed),
                _ => None,
            }
        };

        if let Some(violation) = violation {
            violations.push((index, violation));
        }
    }

    violations
}

/// Drops every item that is the sur-parent of another listed item.
///
/// A listing that contains both a sub-entity and its sur-entity keeps only
/// the more specific sub form. Order of the kept items is preserved.
pub fn retain_most_specific<T, I>(
    items: Vec<T>,
    id: impl Fn(&T) -> I,
    sur: impl Fn(&T) -> Option<I>,
) -> Vec<T>
where
    I: Eq + Hash,
{
    let listed_parents: HashSet<I> = items.iter().filter_map(&sur).collect();
    items
        .into_iter()
        .filter(|item| !listed_parents.contains(&id(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn accepts_unowned_and_already_owned_children() {
        let parents: HashMap<u32, u32> = [(3, 1)].into_iter().collect();
        let violations = check_sub_entities(1, &[2, 3], |c| parents.get(&c).copied(), &[]);
        assert!(violations.is_empty());
    }

    #[test]
    fn flags_each_violation_at_its_index() {
        let parents: HashMap<u32, u32> = [(5, 9)].into_iter().collect();
        let violations =
            check_sub_entities(1, &[2, 1, 2, 5, 7], |c| parents.get(&c).copied(), &[7]);

        assert_eq!(
            violations,
            vec![
                (1, SurrogateViolation::SelfReference),
                (2, SurrogateViolation::Duplicate),
                (3, SurrogateViolation::AlreadyClaimed),
                (4, SurrogateViolation::Cycle),
            ]
        );
    }

    #[test]
    fn retain_most_specific_drops_listed_ancestors_only() {
        // (id, sur)
        let items = vec![(1, None), (2, Some(1)), (3, Some(8)), (4, None)];
        let kept = retain_most_specific(items, |i| i.0, |i| i.1);
        assert_eq!(kept, vec![(2, Some(1)), (3, Some(8)), (4, None)]);
    }
}
