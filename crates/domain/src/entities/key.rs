//! Identity keys for nodes resolved by (name, differentiator).
//!
//! Every keyed node carries both properties and a uuid:
//!
//! ```cypher
//! (:Person {uuid: "...", name: "Ian McKellen", differentiator: ""})
//! ```
//!
//! The differentiator is never null. An absent differentiator and an empty
//! one are the same key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::trimmed_or_empty;
use crate::error::DomainError;

/// Labels whose nodes are unique by (name, differentiator).
///
/// Productions are deliberately absent: many productions share a name and
/// are addressed by uuid alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeLabel {
    Material,
    Venue,
    Person,
    Company,
    Character,
    Award,
}

impl NodeLabel {
    pub const ALL: [NodeLabel; 6] = [
        NodeLabel::Material,
        NodeLabel::Venue,
        NodeLabel::Person,
        NodeLabel::Company,
        NodeLabel::Character,
        NodeLabel::Award,
    ];

    /// The graph label, also used in log fields and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeLabel::Material => "Material",
            NodeLabel::Venue => "Venue",
            NodeLabel::Person => "Person",
            NodeLabel::Company => "Company",
            NodeLabel::Character => "Character",
            NodeLabel::Award => "Award",
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NodeLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown node label: {s}")))
    }
}

/// Normalised (name, differentiator) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    name: String,
    differentiator: String,
}

impl EntityKey {
    /// Builds a key from raw input, trimming both parts.
    ///
    /// Fails when the name is blank; a key without a name identifies nothing.
    pub fn new(name: &str, differentiator: Option<&str>) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Name cannot be empty"));
        }
        Ok(Self {
            name: name.to_string(),
            differentiator: trimmed_or_empty(differentiator),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn differentiator(&self) -> &str {
        &self.differentiator
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.differentiator.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.differentiator)
        }
    }
}

/// A reference to another node, carrying the identity fields needed to render it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Named<I> {
    pub id: I,
    pub name: String,
    pub differentiator: String,
}

impl<I> Named<I> {
    pub fn new(id: I, key: &EntityKey) -> Self {
        Self {
            id,
            name: key.name().to_string(),
            differentiator: key.differentiator().to_string(),
        }
    }

    /// Re-types the id, e.g. a raw uuid from an identity lookup into a typed id.
    pub fn map_id<J>(self, f: impl FnOnce(I) -> J) -> Named<J> {
        Named {
            id: f(self.id),
            name: self.name,
            differentiator: self.differentiator,
        }
    }
}
