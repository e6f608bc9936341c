//! Case and document records

use crate::{CaseId, DocumentId, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A legal case grouping people and documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    /// Unique identifier
    pub id: CaseId,

    /// Case title
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub title: String,

    /// Short summary
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub summary: String,

    /// People named in the case
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub people_ids: BTreeSet<PersonId>,

    /// Documents filed under the case
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub document_ids: BTreeSet<DocumentId>,
}

impl Case {
    /// Create an empty case
    pub fn new(id: impl Into<CaseId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            people_ids: BTreeSet::new(),
            document_ids: BTreeSet::new(),
        }
    }

    /// Builder-style helper to attach people
    pub fn with_people<I, P>(mut self, people: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PersonId>,
    {
        self.people_ids = people.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style helper to attach documents
    pub fn with_documents<I, D>(mut self, documents: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DocumentId>,
    {
        self.document_ids = documents.into_iter().map(Into::into).collect();
        self
    }
}

/// A source document that mentions people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,

    /// Document title
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub title: String,

    /// Originating source (court, agency, ...)
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub source: String,

    /// Date as given in the source, unparsed
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub date: String,

    /// People mentioned in the document
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub mentions: BTreeSet<PersonId>,

    /// Path to the rendered file
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub file_path: String,
}

impl Document {
    /// Create a document with no mentions
    pub fn new(id: impl Into<DocumentId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            source: String::new(),
            date: String::new(),
            mentions: BTreeSet::new(),
            file_path: String::new(),
        }
    }

    /// Builder-style helper to attach mentions
    pub fn with_mentions<I, P>(mut self, mentions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PersonId>,
    {
        self.mentions = mentions.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_field_names() {
        let json = r#"{
            "id": "c1",
            "title": "State v. Doe",
            "summary": "",
            "peopleIds": ["p1", "p2", "p1"],
            "documentIds": ["d1"]
        }"#;
        let case: Case = serde_json::from_str(json).unwrap();
        assert_eq!(case.people_ids.len(), 2);
        assert!(case.document_ids.contains(&DocumentId::from("d1")));
    }

    #[test]
    fn test_document_field_names() {
        let json = r#"{
            "id": "d1",
            "title": "Deposition",
            "source": "SDNY",
            "date": "2016-04-22",
            "mentions": ["p1"],
            "filePath": "files/d1.pdf"
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.file_path, "files/d1.pdf");
        assert!(doc.mentions.contains(&PersonId::from("p1")));
    }
}
