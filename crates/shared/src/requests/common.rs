use serde::{Deserialize, Serialize};

/// A reference to a keyed node by name and optional differentiator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedEntityRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub differentiator: Option<String>,
}

impl KeyedEntityRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            differentiator: None,
        }
    }

    pub fn with_differentiator(mut self, differentiator: impl Into<String>) -> Self {
        self.differentiator = Some(differentiator.into());
        self
    }

    /// Rows left blank in a form are skipped rather than rejected.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Which kind of entity a credit row names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditedModel {
    #[default]
    Person,
    Company,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditedEntityRequest {
    #[serde(default)]
    pub model: CreditedModel,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub differentiator: Option<String>,
    /// Company members credited under this company; ignored for people.
    #[serde(default)]
    pub members: Vec<KeyedEntityRequest>,
}

impl CreditedEntityRequest {
    pub fn person(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn company(name: impl Into<String>, members: Vec<KeyedEntityRequest>) -> Self {
        Self {
            model: CreditedModel::Company,
            name: name.into(),
            members,
            ..Self::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub entities: Vec<CreditedEntityRequest>,
}

/// Productions have no key, so they are referenced by uuid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionIdentifierRequest {
    #[serde(default)]
    pub uuid: Option<String>,
}

impl ProductionIdentifierRequest {
    pub fn is_blank(&self) -> bool {
        !self
            .uuid
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}
