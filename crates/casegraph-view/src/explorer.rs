//! Explorer facade
//!
//! The surface a user interface talks to. Every operation runs the engine,
//! pushes the new visibility to the rendering delegate and returns the view.

use crate::engine::{GraphFilterEngine, VisibleView};
use crate::filter::{FilterState, FilterUpdate};
use casegraph_domain::{
    Case, CenterDirective, Dataset, DerivedAttributes, Document, Edge, EdgeKey, Person, PersonId,
    RenderDelegate,
};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// A person matched by a search
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    /// Matched person
    pub person: &'a Person,
    /// Their risk
    pub risk: f64,
    /// Whether they are currently visible
    pub visible: bool,
}

/// One relationship as seen from a person
#[derive(Debug, Clone, Serialize)]
pub struct Connection<'a> {
    /// Edge key
    pub key: EdgeKey,
    /// The edge itself
    pub edge: &'a Edge,
    /// Person at the other end
    pub counterpart: &'a PersonId,
    /// Their name, when the id resolves
    pub counterpart_name: Option<&'a str>,
    /// Whether the person is the edge source
    pub outgoing: bool,
}

/// Everything the detail panel shows for a person
#[derive(Debug, Clone, Serialize)]
pub struct PersonDetail<'a> {
    /// The person
    pub person: &'a Person,
    /// Derived degree and risk
    pub derived: DerivedAttributes,
    /// Linked cases
    pub cases: Vec<&'a Case>,
    /// Linked documents
    pub documents: Vec<&'a Document>,
    /// Incident relationships
    pub connections: Vec<Connection<'a>>,
    /// Whether currently visible
    pub visible: bool,
    /// Hops from the focused person, if any
    pub hops_from_focus: Option<usize>,
}

/// Interactive explorer over a dataset
pub struct Explorer<'a, D: RenderDelegate> {
    engine: GraphFilterEngine<'a>,
    delegate: D,
}

impl<'a, D: RenderDelegate> Explorer<'a, D> {
    /// Create an explorer with everything visible
    pub fn new(dataset: &'a Dataset, delegate: D) -> Self {
        Self::with_state(dataset, FilterState::default(), delegate)
    }

    /// Create an explorer with an initial filter state
    pub fn with_state(dataset: &'a Dataset, state: FilterState, mut delegate: D) -> Self {
        delegate.load_graph(dataset.people(), dataset.edges());
        let mut explorer = Self {
            engine: GraphFilterEngine::with_state(dataset, state),
            delegate,
        };
        explorer.sync();
        explorer
    }

    /// Underlying dataset
    pub fn dataset(&self) -> &'a Dataset {
        self.engine.dataset()
    }

    /// Current filter state
    pub fn state(&self) -> &FilterState {
        self.engine.state()
    }

    /// Current visible sets
    pub fn view(&self) -> &VisibleView {
        self.engine.view()
    }

    /// Hops from the focused person, if one is focused and `id` is in reach
    pub fn hops_from_focus(&self, id: &str) -> Option<usize> {
        self.engine.hops_from_focus(id)
    }

    /// Rendering delegate
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Apply a partial filter update
    pub fn apply_filters(&mut self, update: &FilterUpdate) -> &VisibleView {
        self.engine.set_filters(update);
        self.sync();
        self.engine.view()
    }

    /// Change the hop radius
    pub fn set_degree_limit(&mut self, limit: usize) -> &VisibleView {
        self.engine.set_degree_limit(limit);
        self.sync();
        self.engine.view()
    }

    /// Focus on a person and center the viewport on them
    ///
    /// Returns the directive issued, if any. The viewport is only moved when
    /// the delegate knows where the person is.
    pub fn focus_person(&mut self, id: &str) -> Option<CenterDirective> {
        let (_, directive) = self.engine.focus_person(id);
        let directive = directive?;
        self.sync();

        match self.delegate.position_of(&directive.person_id) {
            Some((x, y)) => self.delegate.center_on(x, y, directive.scale),
            None => debug!(person = %directive.person_id, "No layout position, skipping centering"),
        }
        Some(directive)
    }

    /// Clear focus and type filters
    pub fn reset_view(&mut self) -> &VisibleView {
        self.engine.reset_view();
        self.sync();
        self.engine.view()
    }

    /// Case-insensitive search over names, ids and tags
    ///
    /// Hits are ordered by descending risk, then name.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'a>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let dataset = self.dataset();
        let mut hits: Vec<SearchHit<'a>> = dataset
            .people()
            .iter()
            .filter(|p| matches_query(p, &needle))
            .map(|p| SearchHit {
                person: p,
                risk: dataset.risk(p.id.as_str()),
                visible: self.view().contains_person(p.id.as_str()),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.risk
                .partial_cmp(&a.risk)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.person.name.cmp(&b.person.name))
        });
        hits
    }

    /// Detail panel contents for a person
    pub fn person_detail(&self, id: &str) -> Option<PersonDetail<'a>> {
        let dataset = self.dataset();
        let person = dataset.person(id)?;

        let connections = dataset
            .edges_touching(id)
            .filter_map(|(key, edge)| {
                let counterpart = edge.other_end(id)?;
                Some(Connection {
                    key,
                    edge,
                    counterpart,
                    counterpart_name: dataset.person(counterpart.as_str()).map(|p| p.name.as_str()),
                    outgoing: edge.source.as_str() == id,
                })
            })
            .collect();

        Some(PersonDetail {
            person,
            derived: dataset.derived(id).copied().unwrap_or_default(),
            cases: dataset.cases_for(id),
            documents: dataset.documents_for(id),
            connections,
            visible: self.view().contains_person(id),
            hops_from_focus: self.engine.hops_from_focus(id),
        })
    }

    /// Non-victims ranked by risk, highest first
    pub fn top_risk(&self, limit: usize) -> Vec<(&'a Person, DerivedAttributes)> {
        let dataset = self.dataset();
        let mut ranked: Vec<(&'a Person, DerivedAttributes)> = dataset
            .people()
            .iter()
            .filter(|p| !p.person_type.is_victim())
            .filter_map(|p| dataset.derived(p.id.as_str()).map(|d| (p, *d)))
            .collect();

        ranked.sort_by(|(pa, a), (pb, b)| {
            b.risk
                .partial_cmp(&a.risk)
                .unwrap_or(Ordering::Equal)
                .then_with(|| pa.name.cmp(&pb.name))
        });
        ranked.truncate(limit);
        ranked
    }

    /// Push the current visibility of every node and edge to the delegate
    fn sync(&mut self) {
        let dataset = self.engine.dataset();
        let view = self.engine.view();
        for person in dataset.people() {
            self.delegate
                .set_node_visibility(&person.id, view.contains_person(person.id.as_str()));
        }
        for (key, _) in dataset.keyed_edges() {
            self.delegate.set_edge_visibility(key, view.contains_edge(key));
        }
    }
}

fn matches_query(person: &Person, needle: &str) -> bool {
    person.name.to_lowercase().contains(needle)
        || person.id.as_str().to_lowercase().contains(needle)
        || person.tags.iter().any(|t| t.to_lowercase().contains(needle))
}
