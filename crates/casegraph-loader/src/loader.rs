//! Dataset loader
//!
//! Reads the four JSON files concurrently, repairs or rejects inconsistent
//! records, scores the result and reports dangling references.

use crate::config::{DatasetKind, LoaderConfig};
use crate::error::{DataLoadError, Result};
use casegraph_domain::{
    Case, Dataset, Document, Edge, Person, PersonId, ReferenceAudit, RelationshipKind, RiskScorer,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Edges come either one per record or grouped by endpoint pair
enum EdgeRecord {
    Grouped(GroupedEdge),
    Single(Edge),
}

#[derive(Deserialize)]
struct GroupedEdge {
    source: PersonId,
    target: PersonId,
    edges: Vec<GroupedEntry>,
}

#[derive(Deserialize)]
struct GroupedEntry {
    #[serde(default)]
    relationship: RelationshipKind,
    #[serde(default = "default_weight")]
    weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// What the loader repaired or found while loading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Person records dropped because their id was already taken
    pub duplicate_people: usize,
    /// Edges whose negative weight was raised to 0
    pub clamped_weights: usize,
    /// Grouped edge records expanded into individual edges
    pub grouped_edges: usize,
    /// Dangling reference counts
    pub audit: ReferenceAudit,
}

impl LoadReport {
    /// Generate a summary report
    pub fn summary(&self) -> String {
        let lines = vec![
            format!("Duplicate people dropped: {}", self.duplicate_people),
            format!("Negative weights clamped: {}", self.clamped_weights),
            format!("Grouped edge records expanded: {}", self.grouped_edges),
            String::new(),
            self.audit.summary(),
        ];
        lines.join("\n")
    }
}

/// A scored dataset plus the load report
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// The dataset
    pub dataset: Dataset,
    /// Repairs and audit findings
    pub report: LoadReport,
}

/// Loads the four datasets
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
    scorer: RiskScorer,
}

impl Loader {
    /// Create a loader with the default scorer
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            scorer: RiskScorer::default(),
        }
    }

    /// Use a specific scorer
    pub fn with_scorer(mut self, scorer: RiskScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Loader configuration
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load, repair, score and audit
    pub async fn load(&self) -> Result<LoadedDataset> {
        self.config.validate().map_err(DataLoadError::Config)?;

        info!(data_dir = %self.config.data_dir().display(), "Loading datasets");

        let (people, (edges, grouped_edges), cases, documents) = tokio::try_join!(
            self.read_listing::<Person>(DatasetKind::People),
            self.read_edges(),
            self.read_listing::<Case>(DatasetKind::Cases),
            self.read_listing::<Document>(DatasetKind::Documents),
        )?;

        let (people, duplicate_people) = dedupe_people(people, self.config.strict)?;
        let (edges, clamped_weights) = clamp_weights(edges, self.config.strict)?;

        let dataset = Dataset::with_scorer(people, edges, cases, documents, &self.scorer);
        let audit = ReferenceAudit::inspect(&dataset);
        for (kind, count) in audit.findings() {
            warn!(kind = %kind, count, "Dangling references ignored");
        }

        info!(
            people = dataset.people().len(),
            edges = dataset.edges().len(),
            cases = dataset.cases().len(),
            documents = dataset.documents().len(),
            "Datasets loaded"
        );

        Ok(LoadedDataset {
            dataset,
            report: LoadReport {
                duplicate_people,
                clamped_weights,
                grouped_edges,
                audit,
            },
        })
    }

    async fn read_listing<T: DeserializeOwned>(&self, kind: DatasetKind) -> Result<Vec<T>> {
        let (path, text) = self.read_file(kind).await?;
        parse_listing(kind, &path, &text)
    }

    async fn read_edges(&self) -> Result<(Vec<Edge>, usize)> {
        let (path, text) = self.read_file(DatasetKind::Edges).await?;
        let records = parse_edge_records(&path, &text)?;
        Ok(expand_edges(records))
    }

    async fn read_file(&self, kind: DatasetKind) -> Result<(PathBuf, String)> {
        let path = self.config.path_for(kind);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| DataLoadError::Io {
                dataset: kind,
                path: path.clone(),
                source,
            })?;
        debug!(dataset = %kind, bytes = text.len(), "Read dataset file");
        Ok((path, text))
    }
}

/// Load with default scoring
pub async fn load_dataset(config: LoaderConfig) -> Result<LoadedDataset> {
    Loader::new(config).load().await
}

fn parse_listing<T: DeserializeOwned>(kind: DatasetKind, path: &Path, text: &str) -> Result<Vec<T>> {
    listing_items(kind, path, text)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_record(kind, path, index, item))
        .collect()
}

fn parse_edge_records(path: &Path, text: &str) -> Result<Vec<EdgeRecord>> {
    let kind = DatasetKind::Edges;
    listing_items(kind, path, text)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if item.get("edges").is_some_and(Value::is_array) {
                decode_record(kind, path, index, item).map(EdgeRecord::Grouped)
            } else {
                decode_record(kind, path, index, item).map(EdgeRecord::Single)
            }
        })
        .collect()
}

fn decode_record<T: DeserializeOwned>(
    kind: DatasetKind,
    path: &Path,
    index: usize,
    item: Value,
) -> Result<T> {
    serde_json::from_value(item).map_err(|source| DataLoadError::Record {
        dataset: kind,
        path: path.to_path_buf(),
        index,
        source,
    })
}

/// Unwrap a file into its records
///
/// Accepts a bare array or an object holding the array under a dataset key.
/// Scalar fields next to the array (such as a source document id) are ignored.
fn listing_items(kind: DatasetKind, path: &Path, text: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(text).map_err(|source| DataLoadError::Parse {
        dataset: kind,
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            let key = wrapper_key(kind, &map).ok_or_else(|| DataLoadError::Invalid {
                dataset: kind,
                message: format!(
                    "expected an array or an object with a '{}' array, found keys {:?}",
                    kind,
                    map.keys().collect::<Vec<_>>()
                ),
            })?;
            match map.remove(&key) {
                Some(Value::Array(items)) => Ok(items),
                _ => Ok(Vec::new()),
            }
        }
        other => Err(DataLoadError::Invalid {
            dataset: kind,
            message: format!("expected an array or an object, found {}", json_type(&other)),
        }),
    }
}

fn wrapper_key(kind: DatasetKind, map: &Map<String, Value>) -> Option<String> {
    let is_array = |key: &str| map.get(key).is_some_and(Value::is_array);
    let found = match kind {
        DatasetKind::Edges => ["edges", "edge"].into_iter().find(|k| is_array(k)),
        other => Some(other.as_str()).filter(|k| is_array(k)),
    };
    if let Some(key) = found {
        return Some(key.to_string());
    }

    let mut arrays = map.iter().filter(|(_, v)| v.is_array()).map(|(k, _)| k);
    match (arrays.next(), arrays.next()) {
        (Some(key), None) => Some(key.clone()),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn expand_edges(records: Vec<EdgeRecord>) -> (Vec<Edge>, usize) {
    let mut edges = Vec::with_capacity(records.len());
    let mut grouped = 0;
    for record in records {
        match record {
            EdgeRecord::Single(edge) => edges.push(edge),
            EdgeRecord::Grouped(group) => {
                grouped += 1;
                for entry in group.edges {
                    edges.push(Edge {
                        source: group.source.clone(),
                        target: group.target.clone(),
                        relationship: entry.relationship,
                        weight: entry.weight,
                    });
                }
            }
        }
    }
    (edges, grouped)
}

fn dedupe_people(people: Vec<Person>, strict: bool) -> Result<(Vec<Person>, usize)> {
    let mut seen = HashSet::with_capacity(people.len());
    let mut kept = Vec::with_capacity(people.len());
    let mut dropped = 0;

    for person in people {
        if seen.insert(person.id.clone()) {
            kept.push(person);
            continue;
        }
        if strict {
            return Err(DataLoadError::Invalid {
                dataset: DatasetKind::People,
                message: format!("duplicate person id '{}'", person.id),
            });
        }
        warn!(person = %person.id, "Duplicate person id, keeping first occurrence");
        dropped += 1;
    }

    Ok((kept, dropped))
}

fn clamp_weights(mut edges: Vec<Edge>, strict: bool) -> Result<(Vec<Edge>, usize)> {
    let mut clamped = 0;
    for (idx, edge) in edges.iter_mut().enumerate() {
        if edge.weight >= 0.0 {
            continue;
        }
        if strict {
            return Err(DataLoadError::Invalid {
                dataset: DatasetKind::Edges,
                message: format!(
                    "edge {} ({} -> {}) has negative weight {}",
                    idx, edge.source, edge.target, edge.weight
                ),
            });
        }
        warn!(edge = idx, weight = edge.weight, "Negative edge weight, clamping to 0");
        edge.weight = 0.0;
        clamped += 1;
    }
    Ok((edges, clamped))
}
