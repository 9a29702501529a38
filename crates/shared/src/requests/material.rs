use serde::{Deserialize, Serialize};

use super::common::{CreditRequest, KeyedEntityRequest};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRequest {
    /// The name shown in this material.
    #[serde(default)]
    pub name: String,
    /// The character's own name, when the material displays it differently.
    #[serde(default)]
    pub underlying_name: Option<String>,
    #[serde(default)]
    pub differentiator: Option<String>,
    #[serde(default)]
    pub qualifier: Option<String>,
}

impl CharacterRequest {
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterGroupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub characters: Vec<CharacterRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub differentiator: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub original_version_material: Option<KeyedEntityRequest>,
    #[serde(default)]
    pub sub_materials: Vec<KeyedEntityRequest>,
    #[serde(default)]
    pub writing_credits: Vec<CreditRequest>,
    #[serde(default)]
    pub character_groups: Vec<CharacterGroupRequest>,
}
