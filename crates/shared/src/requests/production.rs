use serde::{Deserialize, Serialize};

use super::common::{CreditRequest, KeyedEntityRequest, ProductionIdentifierRequest};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    #[serde(default)]
    pub name: String,
    /// Character portrayed, when the role is named differently.
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default)]
    pub character_differentiator: Option<String>,
    #[serde(default)]
    pub qualifier: Option<String>,
    #[serde(default)]
    pub is_alternate: Option<bool>,
}

impl RoleRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMemberRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub differentiator: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRequest {
    #[serde(default)]
    pub name: String,
    /// Dates as `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub press_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub material: Option<KeyedEntityRequest>,
    #[serde(default)]
    pub venue: Option<KeyedEntityRequest>,
    #[serde(default)]
    pub sub_productions: Vec<ProductionIdentifierRequest>,
    #[serde(default)]
    pub producer_credits: Vec<CreditRequest>,
    #[serde(default)]
    pub creative_credits: Vec<CreditRequest>,
    #[serde(default)]
    pub crew_credits: Vec<CreditRequest>,
    #[serde(default)]
    pub cast: Vec<CastMemberRequest>,
}
