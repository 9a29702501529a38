//! Credits and roles as seen from one person's, company's or character's page.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{CreditedEntityView, EntityView, MaterialSummary, ProductionSummary, RoleView};
use crate::model::Model;

/// The company a person was credited under, with the rest of its credited members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerCompanyView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub co_members: Vec<EntityView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonCreditView {
    pub model: Model,
    pub name: String,
    pub employer_company: Option<EmployerCompanyView>,
    pub co_entities: Vec<CreditedEntityView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCreditView {
    pub model: Model,
    pub name: String,
    pub credited_members: Vec<EntityView>,
    pub co_entities: Vec<CreditedEntityView>,
}

/// A production listed on an entity's page with the credits that put it there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditedProductionView<C> {
    #[serde(flatten)]
    pub production: ProductionSummary,
    pub credits: Vec<C>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastProductionView {
    #[serde(flatten)]
    pub production: ProductionSummary,
    pub roles: Vec<RoleView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepictionView {
    pub display_name: Option<String>,
    pub qualifier: Option<String>,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepictingMaterialView {
    #[serde(flatten)]
    pub material: MaterialSummary,
    pub depictions: Vec<DepictionView>,
}

/// A cast member portraying the page's character, with the rest of their roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub role_name: String,
    pub qualifier: Option<String>,
    pub is_alternate: bool,
    pub other_roles: Vec<RoleView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortrayingProductionView {
    #[serde(flatten)]
    pub production: ProductionSummary,
    pub performers: Vec<PerformerView>,
}
