//! Risk scoring module
//!
//! Derives a normalized risk score per person from four signals:
//! 1. Relationship weights (source and target weighted asymmetrically)
//! 2. Document mentions
//! 3. Case membership, counted from both the person and the case side
//! 4. Network degree
//!
//! Scores are recomputed from scratch on every call, so scoring the same
//! input twice yields identical tables.

use crate::{Case, Document, Edge, Person, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Multiplier applied to each document mention (default: 1.2)
pub const MENTION_WEIGHT: f64 = 1.2;

/// Multiplier applied to each case membership (default: 2.0)
pub const CASE_WEIGHT: f64 = 2.0;

/// Multiplier applied to the square root of degree (default: 0.8)
pub const DEGREE_WEIGHT: f64 = 0.8;

/// Share of an edge's weight credited to its target (default: 0.8)
pub const TARGET_FACTOR: f64 = 0.8;

/// Lower bound of the normalization divisor (default: 1.0)
pub const NORMALIZATION_FLOOR: f64 = 1.0;

/// Configuration for risk scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Multiplier for document mentions
    pub mention_weight: f64,
    /// Multiplier for case memberships
    pub case_weight: f64,
    /// Multiplier for sqrt(degree)
    pub degree_weight: f64,
    /// Share of relationship weight credited to the edge target
    pub target_factor: f64,
    /// Minimum divisor used when normalizing
    pub normalization_floor: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            mention_weight: MENTION_WEIGHT,
            case_weight: CASE_WEIGHT,
            degree_weight: DEGREE_WEIGHT,
            target_factor: TARGET_FACTOR,
            normalization_floor: NORMALIZATION_FLOOR,
        }
    }
}

impl RiskConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("mention_weight", self.mention_weight),
            ("case_weight", self.case_weight),
            ("degree_weight", self.degree_weight),
            ("target_factor", self.target_factor),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number", name));
            }
        }
        if !self.normalization_floor.is_finite() || self.normalization_floor <= 0.0 {
            return Err("normalization_floor must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Attributes derived for one person by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DerivedAttributes {
    /// Number of incident edges (parallel edges counted)
    pub degree: usize,
    /// Number of documents mentioning the person
    pub mention_count: usize,
    /// Case ids on the person plus cases listing the person
    pub case_count: usize,
    /// Accumulated relationship weight
    pub relationship_score: f64,
    /// Composite score before normalization
    pub composite: f64,
    /// Normalized risk in [0, 1]
    pub risk: f64,
}

/// Side table of derived attributes keyed by person id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskTable {
    entries: HashMap<PersonId, DerivedAttributes>,
}

impl RiskTable {
    /// Derived attributes for a person
    pub fn get(&self, id: &str) -> Option<&DerivedAttributes> {
        self.entries.get(id)
    }

    /// Risk of a person, 0 when unknown
    pub fn risk(&self, id: &str) -> f64 {
        self.get(id).map(|d| d.risk).unwrap_or(0.0)
    }

    /// Degree of a person, 0 when unknown
    pub fn degree(&self, id: &str) -> usize {
        self.get(id).map(|d| d.degree).unwrap_or(0)
    }

    /// Number of scored people
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, &DerivedAttributes)> {
        self.entries.iter()
    }
}

/// Computes risk tables
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    config: RiskConfig,
}

impl RiskScorer {
    /// Create a scorer with the given configuration
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Score every person
    ///
    /// References to people outside `people` are ignored. If an id appears
    /// more than once in `people`, the first occurrence is scored.
    pub fn score(
        &self,
        people: &[Person],
        edges: &[Edge],
        cases: &[Case],
        documents: &[Document],
    ) -> RiskTable {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(people.len());
        for (idx, person) in people.iter().enumerate() {
            index.entry(person.id.as_str()).or_insert(idx);
        }

        let mut attrs = vec![DerivedAttributes::default(); people.len()];

        // Step 1 & 4: degree and relationship weight
        for edge in edges {
            let weight = edge.relationship.weight();
            if let Some(&i) = index.get(edge.source.as_str()) {
                attrs[i].degree += 1;
                attrs[i].relationship_score += weight;
            }
            if let Some(&i) = index.get(edge.target.as_str()) {
                attrs[i].degree += 1;
                attrs[i].relationship_score += weight * self.config.target_factor;
            }
        }

        // Step 2: document mentions
        for document in documents {
            for mention in &document.mentions {
                if let Some(&i) = index.get(mention.as_str()) {
                    attrs[i].mention_count += 1;
                }
            }
        }

        // Step 3: case membership, both directions summed
        for (idx, person) in people.iter().enumerate() {
            if index.get(person.id.as_str()) == Some(&idx) {
                attrs[idx].case_count += person.case_ids.len();
            }
        }
        for case in cases {
            for member in &case.people_ids {
                if let Some(&i) = index.get(member.as_str()) {
                    attrs[i].case_count += 1;
                }
            }
        }

        // Step 5: composite
        for a in attrs.iter_mut() {
            a.composite = self.composite(a);
        }

        // Step 6: normalization
        let divisor = attrs
            .iter()
            .map(|a| a.composite)
            .fold(self.config.normalization_floor, f64::max);

        let mut entries = HashMap::with_capacity(index.len());
        for (id, &idx) in &index {
            let mut a = attrs[idx];
            a.risk = normalize(a.composite, divisor);

            // Step 7: victims are never ranked
            if people[idx].person_type.is_victim() {
                a.risk = 0.0;
            }
            entries.insert(PersonId::from(*id), a);
        }

        RiskTable { entries }
    }

    fn composite(&self, a: &DerivedAttributes) -> f64 {
        a.relationship_score
            + a.mention_count as f64 * self.config.mention_weight
            + a.case_count as f64 * self.config.case_weight
            + (a.degree as f64).sqrt() * self.config.degree_weight
    }
}

fn normalize(composite: f64, divisor: f64) -> f64 {
    let value = composite / divisor;
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::{PersonType, RelationshipKind};
    use proptest::prelude::*;

    const KINDS: [&str; 7] = [
        "alleged_abuse",
        "trafficking",
        "procurement",
        "facilitation",
        "introduced",
        "association",
        "employed_by",
    ];

    fn build(
        types: &[u8],
        edges: &[(usize, usize, usize)],
        mentions: &[Vec<usize>],
    ) -> (Vec<Person>, Vec<Edge>, Vec<Document>) {
        let people: Vec<Person> = types
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let person_type = match t % 3 {
                    0 => PersonType::Victim,
                    1 => PersonType::Accused,
                    _ => PersonType::Other,
                };
                Person::new(format!("p{}", i), format!("Person {}", i), person_type)
            })
            .collect();

        // Indices past the end become dangling references
        let edges = edges
            .iter()
            .map(|&(s, t, k)| {
                Edge::new(
                    format!("p{}", s),
                    format!("p{}", t),
                    RelationshipKind::parse(KINDS[k % KINDS.len()]),
                )
            })
            .collect();

        let documents = mentions
            .iter()
            .enumerate()
            .map(|(i, m)| {
                Document::new(format!("d{}", i), "doc").with_mentions(m.iter().map(|p| format!("p{}", p)))
            })
            .collect();

        (people, edges, documents)
    }

    proptest! {
        /// Property: risk is always within [0, 1] and victims are always 0
        #[test]
        fn test_risk_bounds_and_victim_policy(
            types in prop::collection::vec(0u8..3, 0..12),
            edges in prop::collection::vec((0usize..14, 0usize..14, 0usize..7), 0..30),
            mentions in prop::collection::vec(prop::collection::vec(0usize..14, 0..5), 0..6),
        ) {
            let (people, edges, documents) = build(&types, &edges, &mentions);
            let table = RiskScorer::default().score(&people, &edges, &[], &documents);

            for p in &people {
                let risk = table.risk(p.id.as_str());
                prop_assert!((0.0..=1.0).contains(&risk), "risk {} out of range", risk);
                if p.person_type == PersonType::Victim {
                    prop_assert_eq!(risk, 0.0);
                }
            }
        }

        /// Property: scoring is a pure function of its input
        #[test]
        fn test_scoring_is_repeatable(
            types in prop::collection::vec(0u8..3, 0..10),
            edges in prop::collection::vec((0usize..12, 0usize..12, 0usize..7), 0..20),
        ) {
            let (people, edges, documents) = build(&types, &edges, &[]);
            let scorer = RiskScorer::default();
            let first = scorer.score(&people, &edges, &[], &documents);
            let second = scorer.score(&people, &edges, &[], &documents);
            prop_assert_eq!(first, second);
        }

        /// Property: the sum of degrees is twice the number of fully resolved edges
        /// plus once per half-resolved edge
        #[test]
        fn test_degree_sum(
            n in 0usize..10,
            edges in prop::collection::vec((0usize..12, 0usize..12, 0usize..7), 0..20),
        ) {
            let types = vec![1u8; n];
            let (people, edges, _) = build(&types, &edges, &[]);
            let table = RiskScorer::default().score(&people, &edges, &[], &[]);

            let expected: usize = edges
                .iter()
                .map(|e| {
                    let s = people.iter().any(|p| p.id == e.source) as usize;
                    let t = people.iter().any(|p| p.id == e.target) as usize;
                    s + t
                })
                .sum();
            let actual: usize = people.iter().map(|p| table.degree(p.id.as_str())).sum();
            prop_assert_eq!(actual, expected);
        }
    }
}
