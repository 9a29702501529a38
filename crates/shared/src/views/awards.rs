//! Nomination trees: award, then ceremony, then category, then nomination.
//!
//! The tree shape is shared by every page; only the nomination record changes
//! with the perspective it is rendered from.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{CreditedEntityView, EntityView, MaterialSummary, ProductionSummary};
use super::perspectives::EmployerCompanyView;
use crate::model::Model;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNominationsView<N> {
    pub model: Model,
    pub name: String,
    pub nominations: Vec<N>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CeremonyNominationsView<N> {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub categories: Vec<CategoryNominationsView<N>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardNominationsView<N> {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub ceremonies: Vec<CeremonyNominationsView<N>>,
}

/// Unredacted nomination, as shown on award and ceremony pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NominationView {
    pub model: Model,
    pub is_winner: bool,
    #[serde(rename = "type")]
    pub nomination_type: String,
    pub entities: Vec<CreditedEntityView>,
    pub productions: Vec<ProductionSummary>,
    pub materials: Vec<MaterialSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonNominationView {
    pub model: Model,
    pub is_winner: bool,
    #[serde(rename = "type")]
    pub nomination_type: String,
    pub employer_company: Option<EmployerCompanyView>,
    pub co_entities: Vec<CreditedEntityView>,
    pub productions: Vec<ProductionSummary>,
    pub materials: Vec<MaterialSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyNominationView {
    pub model: Model,
    pub is_winner: bool,
    #[serde(rename = "type")]
    pub nomination_type: String,
    pub credited_members: Vec<EntityView>,
    pub co_entities: Vec<CreditedEntityView>,
    pub productions: Vec<ProductionSummary>,
    pub materials: Vec<MaterialSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionNominationView {
    pub model: Model,
    pub is_winner: bool,
    #[serde(rename = "type")]
    pub nomination_type: String,
    /// The nominated sub-production, or null when the page's production itself was nominated.
    pub recipient_production: Option<ProductionSummary>,
    pub entities: Vec<CreditedEntityView>,
    pub co_productions: Vec<ProductionSummary>,
    pub materials: Vec<MaterialSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialNominationView {
    pub model: Model,
    pub is_winner: bool,
    #[serde(rename = "type")]
    pub nomination_type: String,
    pub recipient_material: Option<MaterialSummary>,
    pub entities: Vec<CreditedEntityView>,
    pub productions: Vec<ProductionSummary>,
    pub co_materials: Vec<MaterialSummary>,
}

/// An award ceremony as listed, without its categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardCeremonySummary {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub award: Option<EntityView>,
}
