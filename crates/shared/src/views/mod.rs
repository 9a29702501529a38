//! Read-side records rendered for subject pages and listings.

mod awards;
mod common;
mod pages;
mod perspectives;

pub use awards::{
    AwardCeremonySummary, AwardNominationsView, CategoryNominationsView, CeremonyNominationsView,
    CompanyNominationView, MaterialNominationView, NominationView, PersonNominationView,
    ProductionNominationView,
};
pub use common::{
    CompanyEntityView, CreditView, CreditedEntityView, EntityView, MaterialSummary,
    ProductionSummary, RoleView, SurProductionView, VenueSummary,
};
pub use pages::{
    AwardCeremonyView, AwardView, CastMemberView, CharacterGroupView, CharacterView, CompanyView,
    DepictedCharacterView, MaterialView, PersonView, ProductionView, VenueView,
};
pub use perspectives::{
    CastProductionView, CompanyCreditView, CreditedProductionView, DepictingMaterialView,
    DepictionView, EmployerCompanyView, PerformerView, PersonCreditView, PortrayingProductionView,
};
