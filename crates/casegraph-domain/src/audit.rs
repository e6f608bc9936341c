//! Reference audit
//!
//! Counts ids that point at entities missing from the dataset. Such references
//! are ignored by scoring and reachability; the audit exists so they can be
//! reported.

use crate::Dataset;
use std::fmt;

/// Kind of dangling reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DanglingKind {
    /// Edge source or target with no matching person
    EdgeEndpoint,
    /// Document mention with no matching person
    DocumentMention,
    /// Case member with no matching person
    CaseMember,
    /// Person case id with no matching case
    PersonCase,
    /// Case document id with no matching document
    CaseDocument,
}

impl DanglingKind {
    /// All kinds, in report order
    pub const ALL: [DanglingKind; 5] = [
        DanglingKind::EdgeEndpoint,
        DanglingKind::DocumentMention,
        DanglingKind::CaseMember,
        DanglingKind::PersonCase,
        DanglingKind::CaseDocument,
    ];

    /// Human readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            DanglingKind::EdgeEndpoint => "edge endpoints",
            DanglingKind::DocumentMention => "document mentions",
            DanglingKind::CaseMember => "case members",
            DanglingKind::PersonCase => "person case ids",
            DanglingKind::CaseDocument => "case document ids",
        }
    }
}

impl fmt::Display for DanglingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dangling reference counts for a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceAudit {
    /// Edge endpoints referencing unknown people
    pub edge_endpoints: usize,
    /// Document mentions referencing unknown people
    pub document_mentions: usize,
    /// Case members referencing unknown people
    pub case_members: usize,
    /// Person case ids referencing unknown cases
    pub person_cases: usize,
    /// Case document ids referencing unknown documents
    pub case_documents: usize,
}

impl ReferenceAudit {
    /// Inspect a dataset
    pub fn inspect(dataset: &Dataset) -> Self {
        let mut audit = Self::default();

        for edge in dataset.edges() {
            if !dataset.contains_person(edge.source.as_str()) {
                audit.edge_endpoints += 1;
            }
            if !dataset.contains_person(edge.target.as_str()) {
                audit.edge_endpoints += 1;
            }
        }

        for document in dataset.documents() {
            audit.document_mentions += document
                .mentions
                .iter()
                .filter(|id| !dataset.contains_person(id.as_str()))
                .count();
        }

        for case in dataset.cases() {
            audit.case_members += case
                .people_ids
                .iter()
                .filter(|id| !dataset.contains_person(id.as_str()))
                .count();
            audit.case_documents += case
                .document_ids
                .iter()
                .filter(|id| dataset.document(id.as_str()).is_none())
                .count();
        }

        for person in dataset.people() {
            audit.person_cases += person
                .case_ids
                .iter()
                .filter(|id| dataset.case(id.as_str()).is_none())
                .count();
        }

        audit
    }

    /// Count for one kind
    pub fn count(&self, kind: DanglingKind) -> usize {
        match kind {
            DanglingKind::EdgeEndpoint => self.edge_endpoints,
            DanglingKind::DocumentMention => self.document_mentions,
            DanglingKind::CaseMember => self.case_members,
            DanglingKind::PersonCase => self.person_cases,
            DanglingKind::CaseDocument => self.case_documents,
        }
    }

    /// Non-zero counts, in report order
    pub fn findings(&self) -> Vec<(DanglingKind, usize)> {
        DanglingKind::ALL
            .iter()
            .map(|&kind| (kind, self.count(kind)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Total dangling references
    pub fn total(&self) -> usize {
        DanglingKind::ALL.iter().map(|&kind| self.count(kind)).sum()
    }

    /// Whether every reference resolves
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Reference Audit".to_string(),
            "===============".to_string(),
        ];
        for kind in DanglingKind::ALL {
            lines.push(format!("  {}: {}", kind, self.count(kind)));
        }
        lines.push(format!("  Total: {}", self.total()));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Case, Document, Edge, Person, PersonType, RelationshipKind};

    fn dataset() -> Dataset {
        let people = vec![
            Person::new("a", "A", PersonType::Accused).with_cases(["c1", "c-missing"]),
            Person::new("b", "B", PersonType::Victim),
        ];
        let edges = vec![
            Edge::new("a", "b", RelationshipKind::Association),
            Edge::new("a", "ghost", RelationshipKind::Association),
            Edge::new("ghost", "phantom", RelationshipKind::Association),
        ];
        let cases = vec![Case::new("c1", "One")
            .with_people(["a", "nobody"])
            .with_documents(["d1", "d-missing"])];
        let documents = vec![Document::new("d1", "Doc").with_mentions(["a", "b", "stranger"])];
        Dataset::new(people, edges, cases, documents)
    }

    #[test]
    fn test_counts_each_kind() {
        let audit = ReferenceAudit::inspect(&dataset());
        assert_eq!(audit.edge_endpoints, 3);
        assert_eq!(audit.document_mentions, 1);
        assert_eq!(audit.case_members, 1);
        assert_eq!(audit.person_cases, 1);
        assert_eq!(audit.case_documents, 1);
        assert_eq!(audit.total(), 7);
        assert!(!audit.is_clean());
    }

    #[test]
    fn test_clean_dataset() {
        let dataset = Dataset::new(
            vec![Person::new("a", "A", PersonType::Other)],
            vec![],
            vec![],
            vec![],
        );
        let audit = ReferenceAudit::inspect(&dataset);
        assert!(audit.is_clean());
        assert!(audit.findings().is_empty());
    }

    #[test]
    fn test_summary() {
        let audit = ReferenceAudit::inspect(&dataset());
        let summary = audit.summary();
        assert!(summary.contains("edge endpoints: 3"));
        assert!(summary.contains("Total: 7"));
        assert_eq!(audit.findings().len(), 5);
    }
}
