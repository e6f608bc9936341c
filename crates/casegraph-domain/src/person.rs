//! Person module - the nodes of the relationship graph

use crate::{CaseId, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Role a person plays in the dataset
///
/// Victims are never ranked by risk: the scorer forces their score to 0 and
/// the view never hides them for falling under the risk threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    /// A person identified as a victim
    Victim,

    /// A person accused of wrongdoing
    Accused,

    /// Anyone else named in the material
    Other,
}

impl PersonType {
    /// All person types, in display order
    pub const ALL: [PersonType; 3] = [PersonType::Victim, PersonType::Accused, PersonType::Other];

    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonType::Victim => "victim",
            PersonType::Accused => "accused",
            PersonType::Other => "other",
        }
    }

    /// Parse a person type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "victim" => Some(PersonType::Victim),
            "accused" => Some(PersonType::Accused),
            "other" => Some(PersonType::Other),
            _ => None,
        }
    }

    /// Whether this type is exempt from risk scoring and risk filtering
    pub fn is_victim(&self) -> bool {
        matches!(self, PersonType::Victim)
    }
}

impl std::str::FromStr for PersonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid person type: {}", s))
    }
}

// Case-insensitive; unrecognised labels fall back to `Other`
impl<'de> Deserialize<'de> for PersonType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Self::parse(label.trim()).unwrap_or(PersonType::Other))
    }
}

/// A person in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,

    /// Display name
    pub name: String,

    /// Role in the dataset
    #[serde(rename = "type")]
    pub person_type: PersonType,

    /// Free-form labels
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub tags: BTreeSet<String>,

    /// Analyst notes
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub notes: String,

    /// Cases this person is listed under, in source order
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub case_ids: Vec<CaseId>,
}

impl Person {
    /// Create a person with no tags, notes or cases
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>, person_type: PersonType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            person_type,
            tags: BTreeSet::new(),
            notes: String::new(),
            case_ids: Vec::new(),
        }
    }

    /// Builder-style helper to attach case ids
    pub fn with_cases<I, C>(mut self, cases: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CaseId>,
    {
        self.case_ids = cases.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style helper to attach tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}
