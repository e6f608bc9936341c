//! Casegraph Domain Layer
//!
//! Core model and scoring logic for the casegraph explorer. This crate does no
//! I/O; loading lives in `casegraph-loader` and the interactive view in
//! `casegraph-view`.
//!
//! ## Key Concepts
//!
//! - **Person**: a node in the relationship graph (victim, accused or other)
//! - **Edge**: a typed, weighted relationship between two people
//! - **Case / Document**: evidence that references people
//! - **Risk**: a normalized [0, 1] score of evidentiary centrality, always 0
//!   for victims
//! - **Dataset**: the immutable entity batch plus its derived attributes
//!
//! ## Architecture
//!
//! - Entities are loaded once and never mutated
//! - Derived attributes (degree, risk) live in a side table keyed by person id
//! - Rendering is delegated through the [`traits::RenderDelegate`] trait

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audit;
pub mod case;
pub mod dataset;
pub mod ids;
mod lenient;
pub mod person;
pub mod relationship;
pub mod risk;
pub mod traits;

// Re-exports for convenience
pub use audit::ReferenceAudit;
pub use case::{Case, Document};
pub use dataset::Dataset;
pub use ids::{CaseId, DocumentId, PersonId};
pub use person::{Person, PersonType};
pub use relationship::{Edge, EdgeKey, RelationshipKind};
pub use risk::{DerivedAttributes, RiskConfig, RiskScorer, RiskTable};
pub use traits::{CenterDirective, RenderDelegate};
