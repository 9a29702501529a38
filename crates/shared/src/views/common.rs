//! Records reused across pages: entity references, credits and listing summaries.
//!
//! Absent relations serialize as `null`; keys are never omitted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Model;

/// The minimal rendering of any node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
}

impl EntityView {
    pub fn new(model: Model, uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            model,
            uuid,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyEntityView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub members: Vec<EntityView>,
}

/// A person, or a company with the members credited under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreditedEntityView {
    Company(CompanyEntityView),
    Person(EntityView),
}

impl CreditedEntityView {
    pub fn uuid(&self) -> Uuid {
        match self {
            CreditedEntityView::Company(company) => company.uuid,
            CreditedEntityView::Person(person) => person.uuid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditView {
    pub model: Model,
    pub name: String,
    pub entities: Vec<CreditedEntityView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueSummary {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub sur_venue: Option<EntityView>,
}

/// A sur-production, one level up, with the parent's own venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurProductionView {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub venue: Option<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionSummary {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub venue: Option<VenueSummary>,
    pub sur_production: Option<SurProductionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    pub model: Model,
    pub uuid: Uuid,
    pub name: String,
    pub format: Option<String>,
    pub year: Option<i64>,
    pub sur_material: Option<EntityView>,
    pub writing_credits: Vec<CreditView>,
}

/// A role as rendered in cast lists, linked to its character when one matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleView {
    pub model: Model,
    pub uuid: Option<Uuid>,
    pub name: String,
    pub qualifier: Option<String>,
    pub is_alternate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_relations_render_as_null() {
        let summary = ProductionSummary {
            model: Model::Production,
            uuid: Uuid::nil(),
            name: "Hamlet".to_string(),
            start_date: None,
            end_date: None,
            venue: None,
            sur_production: None,
        };

        let value = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(
            value,
            json!({
                "model": "PRODUCTION",
                "uuid": Uuid::nil(),
                "name": "Hamlet",
                "startDate": null,
                "endDate": null,
                "venue": null,
                "surProduction": null,
            })
        );
    }

    #[test]
    fn credited_companies_carry_members_and_people_do_not() {
        let person = CreditedEntityView::Person(EntityView::new(
            Model::Person,
            Uuid::from_u128(1),
            "Rae Smith",
        ));
        let company = CreditedEntityView::Company(CompanyEntityView {
            model: Model::Company,
            uuid: Uuid::from_u128(2),
            name: "Handspring Puppet Company".to_string(),
            members: vec![EntityView::new(Model::Person, Uuid::from_u128(3), "Basil Jones")],
        });

        let person_json = serde_json::to_value(&person).expect("serialize");
        let company_json = serde_json::to_value(&company).expect("serialize");
        assert!(person_json.get("members").is_none());
        assert_eq!(company_json["members"][0]["name"], "Basil Jones");

        let round_trip: CreditedEntityView =
            serde_json::from_value(company_json).expect("deserialize");
        assert_eq!(round_trip, company);
    }
}
