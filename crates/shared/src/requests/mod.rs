//! Write payloads, one per subject type.
//!
//! Every field defaults, so partially filled forms deserialize; blank rows are
//! skipped by the engine rather than rejected here.

mod award;
mod common;
mod material;
mod production;
mod venue;

pub use award::{AwardCeremonyRequest, CategoryRequest, NominationRequest};
pub use common::{
    CreditRequest, CreditedEntityRequest, CreditedModel, KeyedEntityRequest,
    ProductionIdentifierRequest,
};
pub use material::{CharacterGroupRequest, CharacterRequest, MaterialRequest};
pub use production::{CastMemberRequest, ProductionRequest, RoleRequest};
pub use venue::VenueRequest;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn material_request_accepts_camel_case_and_missing_fields() {
        let request: MaterialRequest = serde_json::from_value(json!({
            "name": "Julius Caesar",
            "writingCredits": [
                { "entities": [{ "name": "William Shakespeare" }] }
            ],
            "characterGroups": [
                { "characters": [
                    { "name": "Cinna", "differentiator": "1" },
                    { "name": "Young Cato", "underlyingName": "Cato" }
                ] }
            ]
        }))
        .expect("deserialize");

        assert_eq!(request.differentiator, None);
        assert_eq!(request.writing_credits[0].name, None);
        assert_eq!(request.writing_credits[0].entities[0].model, CreditedModel::Person);
        assert_eq!(
            request.character_groups[0].characters[1].underlying_name.as_deref(),
            Some("Cato")
        );
    }

    #[test]
    fn credited_company_members_deserialize() {
        let entity: CreditedEntityRequest = serde_json::from_value(json!({
            "model": "COMPANY",
            "name": "Told by an Idiot",
            "members": [{ "name": "Paul Hunter" }]
        }))
        .expect("deserialize");

        assert_eq!(entity.model, CreditedModel::Company);
        assert_eq!(entity.members, vec![KeyedEntityRequest::new("Paul Hunter")]);
    }

    #[test]
    fn blank_rows_are_detected() {
        assert!(KeyedEntityRequest::new("  ").is_blank());
        assert!(RoleRequest::default().is_blank());
        assert!(ProductionIdentifierRequest { uuid: Some(String::new()) }.is_blank());
        assert!(!CreditedEntityRequest::person("Ian Rickson").is_blank());
    }
}
