//! Casegraph Loader
//!
//! One-time loading of the four JSON datasets (people, edges, cases,
//! documents) into a scored [`casegraph_domain::Dataset`].
//!
//! All four files must load; a failure in any of them is fatal. The files are
//! read concurrently.
//!
//! # Examples
//!
//! ```no_run
//! use casegraph_loader::{Loader, LoaderConfig};
//!
//! # async fn run() -> Result<(), casegraph_loader::DataLoadError> {
//! let loader = Loader::new(LoaderConfig::new("assets/data"));
//! let loaded = loader.load().await?;
//! println!("{} people", loaded.dataset.people().len());
//! println!("{}", loaded.report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Accepted shapes
//!
//! - each file may be a bare array or an object wrapping the array under the
//!   dataset name (`{"people": [...]}`; edges also accept `edge`)
//! - edges may be grouped per endpoint pair:
//!   `{"source", "target", "edges": [{"edge_id", "relationship", "weight"}], "avg_weight"}`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;

pub use config::{DatasetKind, LoaderConfig};
pub use error::{DataLoadError, Result};
pub use loader::{load_dataset, LoadReport, LoadedDataset, Loader};
