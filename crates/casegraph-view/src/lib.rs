//! Casegraph View
//!
//! Interactive filtering over a scored [`casegraph_domain::Dataset`].
//!
//! - [`GraphFilterEngine`] owns the filter state (type flags, risk threshold,
//!   hop radius, focus) and recomputes visible people and edges on every change
//! - [`Explorer`] wraps the engine for a user interface: it keeps a
//!   [`casegraph_domain::RenderDelegate`] in sync and answers search and
//!   detail-panel queries
//!
//! # Examples
//!
//! ```
//! use casegraph_domain::{Dataset, Edge, Person, PersonType, RelationshipKind};
//! use casegraph_view::{Explorer, FilterUpdate, VisibilityLedger};
//!
//! let people = vec![
//!     Person::new("a", "Anna", PersonType::Accused),
//!     Person::new("b", "Ben", PersonType::Other),
//! ];
//! let edges = vec![Edge::new("a", "b", RelationshipKind::Introduced)];
//! let dataset = Dataset::new(people, edges, vec![], vec![]);
//!
//! let mut explorer = Explorer::new(&dataset, VisibilityLedger::new());
//! let view = explorer.apply_filters(&FilterUpdate::new().risk_min(0.9));
//! assert!(view.contains_person("a"));
//! assert!(!view.contains_person("b"));
//! ```

#![warn(missing_docs)]

mod engine;
mod explorer;
mod filter;
mod ledger;
pub mod reachability;

pub use engine::{GraphFilterEngine, VisibleView};
pub use explorer::{Connection, Explorer, PersonDetail, SearchHit};
pub use filter::{FilterState, FilterUpdate, DEFAULT_DEGREE_LIMIT};
pub use ledger::{Centering, VisibilityLedger};
