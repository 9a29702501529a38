//! Characters and their depictions within a material.
//!
//! A character is a global keyed node. Materials depict it, possibly under a
//! different display name and with a qualifier marking a variant appearance:
//!
//! ```cypher
//! (m:Material)-[:DEPICTS {groupPosition: 0, groupName: "Part One", characterPosition: 2,
//!                         displayName: "Young Marlow", qualifier: "younger"}]->(c:Character)
//! ```

use serde::{Deserialize, Serialize};

use super::key::Named;
use crate::ids::CharacterId;

pub type CharacterRef = Named<CharacterId>;

/// One appearance of a character in a material's character list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Depiction {
    pub character: CharacterRef,
    /// Name shown in this material when it differs from the character's own name.
    pub display_name: Option<String>,
    pub qualifier: Option<String>,
}

impl Depiction {
    /// The name this material uses for the character.
    pub fn shown_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or(&self.character.name)
    }
}

/// An optionally named group of depictions (e.g. an act or an era).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterGroup {
    pub name: Option<String>,
    pub depictions: Vec<Depiction>,
}
