//! Dataset module - the immutable entity batch plus derived attributes

use crate::{
    Case, CaseId, DerivedAttributes, Document, DocumentId, Edge, EdgeKey, Person, RiskScorer,
    RiskTable,
};
use std::collections::{BTreeSet, HashMap};

/// All entities loaded at startup, with their derived attributes
///
/// Entities are never mutated after construction. Only the risk table is
/// replaced, and only through [`Dataset::rescore`].
#[derive(Debug, Clone)]
pub struct Dataset {
    people: Vec<Person>,
    edges: Vec<Edge>,
    cases: Vec<Case>,
    documents: Vec<Document>,
    person_index: HashMap<String, usize>,
    case_index: HashMap<String, usize>,
    document_index: HashMap<String, usize>,
    derived: RiskTable,
}

impl Dataset {
    /// Build a dataset and score it with the default configuration
    pub fn new(
        people: Vec<Person>,
        edges: Vec<Edge>,
        cases: Vec<Case>,
        documents: Vec<Document>,
    ) -> Self {
        Self::with_scorer(people, edges, cases, documents, &RiskScorer::default())
    }

    /// Build a dataset and score it with the given scorer
    pub fn with_scorer(
        people: Vec<Person>,
        edges: Vec<Edge>,
        cases: Vec<Case>,
        documents: Vec<Document>,
        scorer: &RiskScorer,
    ) -> Self {
        let person_index = first_index(people.iter().map(|p| p.id.as_str()));
        let case_index = first_index(cases.iter().map(|c| c.id.as_str()));
        let document_index = first_index(documents.iter().map(|d| d.id.as_str()));

        let mut dataset = Self {
            people,
            edges,
            cases,
            documents,
            person_index,
            case_index,
            document_index,
            derived: RiskTable::default(),
        };
        dataset.rescore(scorer);
        dataset
    }

    /// Recompute derived attributes from scratch
    pub fn rescore(&mut self, scorer: &RiskScorer) {
        self.derived = scorer.score(&self.people, &self.edges, &self.cases, &self.documents);
    }

    /// All people, in load order
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// All edges, in load order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All cases
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// All documents
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a person by id
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.person_index.get(id).map(|&i| &self.people[i])
    }

    /// Position of a person in [`Dataset::people`]
    pub fn person_position(&self, id: &str) -> Option<usize> {
        self.person_index.get(id).copied()
    }

    /// Whether a person id resolves
    pub fn contains_person(&self, id: &str) -> bool {
        self.person_index.contains_key(id)
    }

    /// Look up a case by id
    pub fn case(&self, id: &str) -> Option<&Case> {
        self.case_index.get(id).map(|&i| &self.cases[i])
    }

    /// Look up a document by id
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.document_index.get(id).map(|&i| &self.documents[i])
    }

    /// Look up an edge by key
    pub fn edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(key.index())
    }

    /// Edges with their keys
    pub fn keyed_edges(&self) -> impl Iterator<Item = (EdgeKey, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeKey(i), e))
    }

    /// Edges incident to a person
    pub fn edges_touching<'a, 'b>(
        &'a self,
        id: &'b str,
    ) -> impl Iterator<Item = (EdgeKey, &'a Edge)> + 'b
    where
        'a: 'b,
    {
        self.keyed_edges().filter(move |(_, e)| e.touches(id))
    }

    /// Current derived attribute table
    pub fn risk_table(&self) -> &RiskTable {
        &self.derived
    }

    /// Derived attributes of a person
    pub fn derived(&self, id: &str) -> Option<&DerivedAttributes> {
        self.derived.get(id)
    }

    /// Risk of a person, 0 when unknown
    pub fn risk(&self, id: &str) -> f64 {
        self.derived.risk(id)
    }

    /// Cases linked to a person from either side
    ///
    /// Union of the person's `caseIds` that resolve and the cases listing the
    /// person, in dataset order without duplicates.
    pub fn cases_for(&self, id: &str) -> Vec<&Case> {
        let mut wanted: BTreeSet<&str> = BTreeSet::new();
        if let Some(person) = self.person(id) {
            wanted.extend(person.case_ids.iter().map(CaseId::as_str));
        }
        self.cases
            .iter()
            .filter(|c| wanted.contains(c.id.as_str()) || c.people_ids.contains(id))
            .collect()
    }

    /// Documents linked to a person
    ///
    /// Documents that mention the person directly plus the documents of every
    /// linked case, in dataset order without duplicates.
    pub fn documents_for(&self, id: &str) -> Vec<&Document> {
        let via_cases: BTreeSet<&str> = self
            .cases_for(id)
            .into_iter()
            .flat_map(|c| c.document_ids.iter().map(DocumentId::as_str))
            .collect();
        self.documents
            .iter()
            .filter(|d| d.mentions.contains(id) || via_cases.contains(d.id.as_str()))
            .collect()
    }
}

fn first_index<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, id) in ids.enumerate() {
        index.entry(id.to_string()).or_insert(i);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PersonType, RelationshipKind};

    fn sample() -> Dataset {
        let people = vec![
            Person::new("a", "Alice", PersonType::Accused).with_cases(["c1"]),
            Person::new("b", "Bob", PersonType::Other),
            Person::new("v", "Vera", PersonType::Victim),
        ];
        let edges = vec![
            Edge::new("a", "b", RelationshipKind::Introduced),
            Edge::new("b", "v", RelationshipKind::Association),
        ];
        let cases = vec![
            Case::new("c1", "One").with_documents(["d2"]),
            Case::new("c2", "Two").with_people(["a", "v"]),
        ];
        let documents = vec![
            Document::new("d1", "Direct").with_mentions(["a"]),
            Document::new("d2", "Filed"),
            Document::new("d3", "Unrelated").with_mentions(["b"]),
        ];
        Dataset::new(people, edges, cases, documents)
    }

    #[test]
    fn test_lookup() {
        let dataset = sample();
        assert_eq!(dataset.person("b").unwrap().name, "Bob");
        assert!(dataset.person("nobody").is_none());
        assert_eq!(dataset.person_position("v"), Some(2));
        assert!(dataset.case("c2").is_some());
        assert!(dataset.document("d3").is_some());
        assert_eq!(dataset.edge(EdgeKey(1)).unwrap().target.as_str(), "v");
        assert!(dataset.edge(EdgeKey(9)).is_none());
    }

    #[test]
    fn test_scored_on_construction() {
        let dataset = sample();
        assert_eq!(dataset.risk_table().len(), 3);
        assert_eq!(dataset.derived("b").unwrap().degree, 2);
        assert_eq!(dataset.risk("v"), 0.0);
        assert!(dataset.risk("a") > 0.0);
    }

    #[test]
    fn test_cases_for_unions_both_directions() {
        let dataset = sample();
        let ids: Vec<&str> = dataset.cases_for("a").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);

        let ids: Vec<&str> = dataset.cases_for("v").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2"]);
    }

    #[test]
    fn test_documents_for_includes_case_documents() {
        let dataset = sample();
        let ids: Vec<&str> = dataset.documents_for("a").iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2"]);
    }

    #[test]
    fn test_edges_touching() {
        let dataset = sample();
        let keys: Vec<EdgeKey> = dataset.edges_touching("b").map(|(k, _)| k).collect();
        assert_eq!(keys, vec![EdgeKey(0), EdgeKey(1)]);
    }

    #[test]
    fn test_rescore_replaces_table() {
        let mut dataset = sample();
        let before = dataset.risk_table().clone();
        dataset.rescore(&RiskScorer::default());
        assert_eq!(&before, dataset.risk_table());
    }
}
