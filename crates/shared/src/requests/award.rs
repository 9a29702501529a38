use serde::{Deserialize, Serialize};

use super::common::{CreditedEntityRequest, KeyedEntityRequest, ProductionIdentifierRequest};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NominationRequest {
    #[serde(default)]
    pub is_winner: Option<bool>,
    /// Replaces the default "Winner"/"Nomination" label when present.
    #[serde(default)]
    pub custom_type: Option<String>,
    #[serde(default)]
    pub entities: Vec<CreditedEntityRequest>,
    #[serde(default)]
    pub productions: Vec<ProductionIdentifierRequest>,
    #[serde(default)]
    pub materials: Vec<KeyedEntityRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nominations: Vec<NominationRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardCeremonyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub award: Option<KeyedEntityRequest>,
    #[serde(default)]
    pub categories: Vec<CategoryRequest>,
}
