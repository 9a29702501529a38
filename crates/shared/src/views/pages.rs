//! One record per subject page.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::awards::{
    AwardNominationsView, CategoryNominationsView, CeremonyNominationsView, CompanyNominationView,
    MaterialNominationView, NominationView, PersonNominationView, ProductionNominationView,
};
use super::common::{
    CreditView, EntityView, MaterialSummary, ProductionSummary, RoleView, SurProductionView,
    VenueSummary,
};
use super::perspectives::{
    CastProductionView, CompanyCreditView, CreditedProductionView, DepictingMaterialView,
    PersonCreditView, PortrayingProductionView,
};
use crate::model::Model;

/// A character as listed in a material, under the name that material uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepictedCharacterView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    /// The character's own name, when the material displays it differently.
    pub underlying_name: Option<String>,
    pub qualifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterGroupView {
    pub name: Option<String>,
    pub characters: Vec<DepictedCharacterView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub differentiator: String,
    pub format: Option<String>,
    pub year: Option<i64>,
    pub sur_material: Option<EntityView>,
    pub sub_materials: Vec<MaterialSummary>,
    pub original_version_material: Option<MaterialSummary>,
    pub subsequent_version_materials: Vec<MaterialSummary>,
    pub writing_credits: Vec<CreditView>,
    pub character_groups: Vec<CharacterGroupView>,
    pub productions: Vec<ProductionSummary>,
    pub awards: Vec<AwardNominationsView<MaterialNominationView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMemberView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub roles: Vec<RoleView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub start_date: Option<String>,
    pub press_date: Option<String>,
    pub end_date: Option<String>,
    pub material: Option<MaterialSummary>,
    pub venue: Option<VenueSummary>,
    pub sur_production: Option<SurProductionView>,
    pub sub_productions: Vec<ProductionSummary>,
    pub producer_credits: Vec<CreditView>,
    pub creative_credits: Vec<CreditView>,
    pub crew_credits: Vec<CreditView>,
    pub cast: Vec<CastMemberView>,
    pub awards: Vec<AwardNominationsView<ProductionNominationView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub differentiator: String,
    pub sur_venue: Option<EntityView>,
    pub sub_venues: Vec<EntityView>,
    pub productions: Vec<ProductionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub differentiator: String,
    pub materials: Vec<MaterialSummary>,
    pub producer_productions: Vec<CreditedProductionView<PersonCreditView>>,
    pub creative_productions: Vec<CreditedProductionView<PersonCreditView>>,
    pub crew_productions: Vec<CreditedProductionView<PersonCreditView>>,
    pub cast_member_productions: Vec<CastProductionView>,
    pub awards: Vec<AwardNominationsView<PersonNominationView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub differentiator: String,
    pub materials: Vec<MaterialSummary>,
    pub producer_productions: Vec<CreditedProductionView<CompanyCreditView>>,
    pub creative_productions: Vec<CreditedProductionView<CompanyCreditView>>,
    pub crew_productions: Vec<CreditedProductionView<CompanyCreditView>>,
    pub awards: Vec<AwardNominationsView<CompanyNominationView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub differentiator: String,
    pub variant_named_depictions: Vec<String>,
    pub variant_named_portrayals: Vec<String>,
    pub materials: Vec<DepictingMaterialView>,
    pub productions: Vec<PortrayingProductionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub differentiator: String,
    pub ceremonies: Vec<CeremonyNominationsView<NominationView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardCeremonyView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub award: Option<EntityView>,
    pub categories: Vec<CategoryNominationsView<NominationView>>,
}
