//! Relationship module - typed edges between people

use crate::PersonId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of relationship between two people
///
/// The known kinds carry a fixed evidentiary weight used by the risk scorer.
/// Any other label is preserved verbatim and weighted as 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// Alleged abuse of the target by the source
    AllegedAbuse,

    /// Trafficking of the target by the source
    Trafficking,

    /// Procurement of the target by the source
    Procurement,

    /// Source facilitated contact with the target
    Facilitation,

    /// Source introduced the target
    Introduced,

    /// Plain association
    Association,

    /// Any label outside the weight table
    Other(String),
}

impl RelationshipKind {
    /// Weight applied to unlisted relationship kinds
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    /// Get the relationship label as it appears in the data
    pub fn as_str(&self) -> &str {
        match self {
            RelationshipKind::AllegedAbuse => "alleged_abuse",
            RelationshipKind::Trafficking => "trafficking",
            RelationshipKind::Procurement => "procurement",
            RelationshipKind::Facilitation => "facilitation",
            RelationshipKind::Introduced => "introduced",
            RelationshipKind::Association => "association",
            RelationshipKind::Other(label) => label,
        }
    }

    /// Parse a label; never fails, unknown labels become [`RelationshipKind::Other`]
    pub fn parse(s: &str) -> Self {
        match s {
            "alleged_abuse" => RelationshipKind::AllegedAbuse,
            "trafficking" => RelationshipKind::Trafficking,
            "procurement" => RelationshipKind::Procurement,
            "facilitation" => RelationshipKind::Facilitation,
            "introduced" => RelationshipKind::Introduced,
            "association" => RelationshipKind::Association,
            other => RelationshipKind::Other(other.to_string()),
        }
    }

    /// Evidentiary weight of this kind
    pub fn weight(&self) -> f64 {
        match self {
            RelationshipKind::AllegedAbuse | RelationshipKind::Trafficking => 5.0,
            RelationshipKind::Procurement => 4.0,
            RelationshipKind::Facilitation => 3.0,
            RelationshipKind::Introduced => 2.0,
            RelationshipKind::Association => 1.0,
            RelationshipKind::Other(_) => Self::DEFAULT_WEIGHT,
        }
    }
}

impl Default for RelationshipKind {
    fn default() -> Self {
        RelationshipKind::Other("unknown".to_string())
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RelationshipKind {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<RelationshipKind> for String {
    fn from(kind: RelationshipKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Serialize for RelationshipKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RelationshipKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// A relationship between two people
///
/// Directed for scoring (source and target are weighted differently),
/// undirected for reachability and display. Parallel edges are allowed and
/// each one counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Initiating person
    pub source: PersonId,

    /// Named party
    pub target: PersonId,

    /// Kind of relationship
    #[serde(default)]
    pub relationship: RelationshipKind,

    /// Edge weight (>= 0)
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Edge {
    /// Create an edge with the default weight of 1
    pub fn new(
        source: impl Into<PersonId>,
        target: impl Into<PersonId>,
        relationship: RelationshipKind,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationship,
            weight: default_weight(),
        }
    }

    /// Whether the edge touches the given person
    pub fn touches(&self, id: &str) -> bool {
        self.source.as_str() == id || self.target.as_str() == id
    }

    /// The endpoint opposite to `id`, if the edge touches it
    ///
    /// A self-loop returns the person itself.
    pub fn other_end(&self, id: &str) -> Option<&PersonId> {
        if self.source.as_str() == id {
            Some(&self.target)
        } else if self.target.as_str() == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// Position of an edge in the loaded edge list
///
/// Parallel edges share endpoints, so the rendering layer addresses edges by
/// position rather than by endpoint pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeKey(pub usize);

impl EdgeKey {
    /// Index into the dataset's edge list
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_table() {
        assert_eq!(RelationshipKind::AllegedAbuse.weight(), 5.0);
        assert_eq!(RelationshipKind::Trafficking.weight(), 5.0);
        assert_eq!(RelationshipKind::Procurement.weight(), 4.0);
        assert_eq!(RelationshipKind::Facilitation.weight(), 3.0);
        assert_eq!(RelationshipKind::Introduced.weight(), 2.0);
        assert_eq!(RelationshipKind::Association.weight(), 1.0);
        assert_eq!(RelationshipKind::parse("unknown_kind").weight(), 1.0);
    }

    #[test]
    fn test_label_preserved() {
        let kind = RelationshipKind::parse("employed_by");
        assert_eq!(kind.as_str(), "employed_by");
        assert_eq!(RelationshipKind::parse("trafficking"), RelationshipKind::Trafficking);
    }

    #[test]
    fn test_edge_defaults() {
        let edge: Edge = serde_json::from_str(r#"{"source": "a", "target": "b"}"#).unwrap();
        assert_eq!(edge.weight, 1.0);
        assert_eq!(edge.relationship.as_str(), "unknown");

        let edge: Edge = serde_json::from_str(
            r#"{"source": "a", "target": "b", "relationship": "introduced", "weight": 2.5}"#,
        )
        .unwrap();
        assert_eq!(edge.relationship, RelationshipKind::Introduced);
        assert_eq!(edge.weight, 2.5);
    }

    #[test]
    fn test_other_end() {
        let edge = Edge::new("a", "b", RelationshipKind::Association);
        assert_eq!(edge.other_end("a"), Some(&PersonId::from("b")));
        assert_eq!(edge.other_end("b"), Some(&PersonId::from("a")));
        assert_eq!(edge.other_end("c"), None);
        assert!(edge.touches("b"));
        assert!(!edge.touches("c"));

        let self_loop = Edge::new("a", "a", RelationshipKind::Association);
        assert_eq!(self_loop.other_end("a"), Some(&PersonId::from("a")));
    }

    #[test]
    fn test_edge_key_display() {
        assert_eq!(EdgeKey(7).to_string(), "edge-7");
    }
}
