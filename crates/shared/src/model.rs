//! The `model` discriminator carried by every rendered record.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Model {
    Material,
    Production,
    Venue,
    Person,
    Company,
    Character,
    Award,
    AwardCeremony,
    AwardCeremonyCategory,
    Nomination,
    WritingCredit,
    ProducerCredit,
    CreativeCredit,
    CrewCredit,
}
