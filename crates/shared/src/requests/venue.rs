use serde::{Deserialize, Serialize};

use super::common::KeyedEntityRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub differentiator: Option<String>,
    #[serde(default)]
    pub sub_venues: Vec<KeyedEntityRequest>,
}
