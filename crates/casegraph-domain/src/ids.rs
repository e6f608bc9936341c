//! Identifier newtypes
//!
//! Ids come straight from the datasets as opaque strings. Wrapping them keeps a
//! person id from being passed where a case id is expected.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id from any string-like value
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw id
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Unique identifier of a person
    PersonId
);

string_id!(
    /// Unique identifier of a case
    CaseId
);

string_id!(
    /// Unique identifier of a document
    DocumentId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_display() {
        let id = PersonId::new("p-001");
        assert_eq!(id.to_string(), "p-001");
        assert_eq!(id.as_str(), "p-001");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id: CaseId = serde_json::from_str("\"c1\"").unwrap();
        assert_eq!(id, CaseId::from("c1"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c1\"");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut ids = HashSet::new();
        ids.insert(PersonId::from("alice"));
        assert!(ids.contains("alice"));
        assert!(!ids.contains("bob"));
    }
}
