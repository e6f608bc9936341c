//! Configuration for dataset loading

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One of the four required datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// people.json
    People,
    /// edges.json
    Edges,
    /// cases.json
    Cases,
    /// documents.json
    Documents,
}

impl DatasetKind {
    /// All datasets, in load order
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::People,
        DatasetKind::Edges,
        DatasetKind::Cases,
        DatasetKind::Documents,
    ];

    /// Dataset name as used for file names and wrapper keys
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::People => "people",
            DatasetKind::Edges => "edges",
            DatasetKind::Cases => "cases",
            DatasetKind::Documents => "documents",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the loader
///
/// # Examples
///
/// ```
/// use casegraph_loader::{DatasetKind, LoaderConfig};
///
/// let config = LoaderConfig::new("assets/data");
/// assert!(config.path_for(DatasetKind::Edges).ends_with("edges.json"));
/// assert!(!config.strict);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Directory holding the four files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// People file name
    #[serde(default = "default_people_file")]
    pub people_file: String,

    /// Edges file name
    #[serde(default = "default_edges_file")]
    pub edges_file: String,

    /// Cases file name
    #[serde(default = "default_cases_file")]
    pub cases_file: String,

    /// Documents file name
    #[serde(default = "default_documents_file")]
    pub documents_file: String,

    /// Reject duplicate person ids and negative weights instead of repairing them
    #[serde(default)]
    pub strict: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("assets/data")
}

fn default_people_file() -> String {
    "people.json".to_string()
}

fn default_edges_file() -> String {
    "edges.json".to_string()
}

fn default_cases_file() -> String {
    "cases.json".to_string()
}

fn default_documents_file() -> String {
    "documents.json".to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

impl LoaderConfig {
    /// Default file names under `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            people_file: default_people_file(),
            edges_file: default_edges_file(),
            cases_file: default_cases_file(),
            documents_file: default_documents_file(),
            strict: false,
        }
    }

    /// Builder-style strict mode toggle
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Full path of a dataset file
    pub fn path_for(&self, kind: DatasetKind) -> PathBuf {
        let file = match kind {
            DatasetKind::People => &self.people_file,
            DatasetKind::Edges => &self.edges_file,
            DatasetKind::Cases => &self.cases_file,
            DatasetKind::Documents => &self.documents_file,
        };
        self.data_dir.join(file)
    }

    /// Data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let files = [
            (DatasetKind::People, &self.people_file),
            (DatasetKind::Edges, &self.edges_file),
            (DatasetKind::Cases, &self.cases_file),
            (DatasetKind::Documents, &self.documents_file),
        ];
        for (kind, file) in files {
            if file.trim().is_empty() {
                return Err(format!("{} file name must not be empty", kind));
            }
        }
        Ok(())
    }
}
