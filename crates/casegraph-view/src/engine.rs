//! Graph filter engine
//!
//! Owns the filter state and recomputes the visible node and edge sets after
//! every state change. Recomputation is a full O(people + edges) pass.

use crate::filter::{clamp_threshold, FilterState, FilterUpdate};
use crate::reachability::{AdjacencyIndex, Reach};
use casegraph_domain::{CenterDirective, Dataset, EdgeKey, PersonId};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Currently visible people and edges
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibleView {
    /// Visible person ids
    pub people: BTreeSet<PersonId>,
    /// Visible edge keys
    pub edges: BTreeSet<EdgeKey>,
}

impl VisibleView {
    /// Whether a person is visible
    pub fn contains_person(&self, id: &str) -> bool {
        self.people.contains(id)
    }

    /// Whether an edge is visible
    pub fn contains_edge(&self, key: EdgeKey) -> bool {
        self.edges.contains(&key)
    }
}

/// Computes the visible subset of a dataset for the current filter state
#[derive(Debug, Clone)]
pub struct GraphFilterEngine<'a> {
    dataset: &'a Dataset,
    adjacency: AdjacencyIndex,
    state: FilterState,
    reach: Option<Reach>,
    view: VisibleView,
}

impl<'a> GraphFilterEngine<'a> {
    /// Create an engine with the default state (everything visible)
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_state(dataset, FilterState::default())
    }

    /// Create an engine with an initial state
    ///
    /// A focus on an unknown person is dropped.
    pub fn with_state(dataset: &'a Dataset, mut state: FilterState) -> Self {
        if let Some(id) = &state.focused {
            if !dataset.contains_person(id.as_str()) {
                warn!(person = %id, "Initial focus refers to an unknown person, ignoring");
                state.focused = None;
            }
        }
        state.risk_min = clamp_threshold(state.risk_min);

        let mut engine = Self {
            dataset,
            adjacency: AdjacencyIndex::build(dataset),
            state,
            reach: None,
            view: VisibleView::default(),
        };
        engine.recompute();
        engine
    }

    /// Dataset the engine filters
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Current filter state
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Current visible sets
    pub fn view(&self) -> &VisibleView {
        &self.view
    }

    /// Update type flags and/or the risk threshold
    pub fn set_filters(&mut self, update: &FilterUpdate) -> &VisibleView {
        self.state.apply(update);
        self.recompute();
        &self.view
    }

    /// Change the hop radius used while a person is focused
    pub fn set_degree_limit(&mut self, limit: usize) -> &VisibleView {
        self.state.degree_limit = limit;
        self.recompute();
        &self.view
    }

    /// Focus on a person and restrict the view to their ego network
    ///
    /// Focusing an unknown id changes nothing and yields no directive.
    pub fn focus_person(&mut self, id: &str) -> (&VisibleView, Option<CenterDirective>) {
        let dataset = self.dataset;
        let Some(person) = dataset.person(id) else {
            warn!(person = id, "Cannot focus unknown person, keeping current view");
            return (&self.view, None);
        };

        self.state.focused = Some(person.id.clone());
        self.recompute();
        (&self.view, Some(CenterDirective::focus(person.id.clone())))
    }

    /// Drop the focus and show every type again, keeping the risk threshold
    pub fn reset_view(&mut self) -> &VisibleView {
        self.state.reset();
        self.recompute();
        &self.view
    }

    /// Hop distance from the focused person, when focused and reached
    pub fn hops_from_focus(&self, id: &str) -> Option<usize> {
        let reach = self.reach.as_ref()?;
        reach.hops(self.dataset.person_position(id)?)
    }

    /// Whether the person at `position` passes every filter
    fn admits(&self, position: usize) -> bool {
        let person = &self.dataset.people()[position];
        let risk = self.dataset.risk(person.id.as_str());
        if !self.state.admits(person.person_type, risk) {
            return false;
        }
        match &self.reach {
            Some(reach) => reach.contains(position),
            None => true,
        }
    }

    fn recompute(&mut self) {
        self.reach = self
            .state
            .focused
            .as_ref()
            .and_then(|id| self.dataset.person_position(id.as_str()))
            .map(|start| self.adjacency.bounded_reach(start, self.state.degree_limit));

        let mut people = BTreeSet::new();
        for (position, person) in self.dataset.people().iter().enumerate() {
            // Later duplicates of an id are shadowed by the first occurrence
            if self.dataset.person_position(person.id.as_str()) != Some(position) {
                continue;
            }
            if self.admits(position) {
                people.insert(person.id.clone());
            }
        }

        let edges = self
            .dataset
            .keyed_edges()
            .filter(|(_, e)| people.contains(&e.source) && people.contains(&e.target))
            .map(|(key, _)| key)
            .collect();

        self.view = VisibleView { people, edges };

        debug!(
            people = self.view.people.len(),
            edges = self.view.edges.len(),
            focused = ?self.state.focused,
            degree_limit = self.state.degree_limit,
            risk_min = self.state.risk_min,
            "Recomputed visibility"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casegraph_domain::{Case, Edge, Person, PersonType, RelationshipKind};

    /// x - y - z chain with a victim v attached to z
    fn chain() -> Dataset {
        let people = vec![
            Person::new("x", "Xavier", PersonType::Accused).with_cases(["c1"]),
            Person::new("y", "Yolanda", PersonType::Other),
            Person::new("z", "Zed", PersonType::Accused),
            Person::new("v", "Vera", PersonType::Victim),
        ];
        let edges = vec![
            Edge::new("x", "y", RelationshipKind::Association),
            Edge::new("y", "z", RelationshipKind::Association),
            Edge::new("z", "v", RelationshipKind::AllegedAbuse),
        ];
        let cases = vec![Case::new("c1", "One").with_people(["x"])];
        Dataset::new(people, edges, cases, vec![])
    }

    fn ids(view: &VisibleView) -> Vec<&str> {
        view.people.iter().map(PersonId::as_str).collect()
    }

    #[test]
    fn test_everything_visible_by_default() {
        let dataset = chain();
        let engine = GraphFilterEngine::new(&dataset);
        assert_eq!(engine.view().people.len(), 4);
        assert_eq!(engine.view().edges.len(), 3);
    }

    #[test]
    fn test_type_filter_hides_edges() {
        let dataset = chain();
        let mut engine = GraphFilterEngine::new(&dataset);
        let view = engine.set_filters(&FilterUpdate::new().show(PersonType::Other, false));
        assert_eq!(ids(view), vec!["v", "x", "z"]);
        // Both edges through y disappear
        assert_eq!(view.edges.iter().copied().collect::<Vec<_>>(), vec![EdgeKey(2)]);
    }

    #[test]
    fn test_risk_threshold_exempts_victims() {
        let dataset = chain();
        let mut engine = GraphFilterEngine::new(&dataset);
        let view = engine.set_filters(&FilterUpdate::new().risk_min(0.99));
        assert!(view.contains_person("v"));
        assert!(!view.contains_person("y"));
    }

    #[test]
    fn test_focus_limits_radius() {
        let dataset = chain();
        let mut engine = GraphFilterEngine::new(&dataset);
        engine.set_degree_limit(1);
        let (view, directive) = engine.focus_person("x");
        assert_eq!(ids(view), vec!["x", "y"]);
        assert_eq!(directive.unwrap().person_id.as_str(), "x");
        assert_eq!(engine.hops_from_focus("y"), Some(1));
        assert_eq!(engine.hops_from_focus("z"), None);
    }

    #[test]
    fn test_degree_limit_zero() {
        let dataset = chain();
        let mut engine = GraphFilterEngine::new(&dataset);
        engine.focus_person("y");
        let view = engine.set_degree_limit(0);
        assert_eq!(ids(view), vec!["y"]);
        assert!(view.edges.is_empty());
    }

    #[test]
    fn test_degree_limit_without_focus_is_inert() {
        let dataset = chain();
        let mut engine = GraphFilterEngine::new(&dataset);
        let view = engine.set_degree_limit(0);
        assert_eq!(view.people.len(), 4);
    }

    #[test]
    fn test_path_through_hidden_person() {
        let dataset = chain();
        let mut engine = GraphFilterEngine::new(&dataset);
        engine.set_filters(&FilterUpdate::new().show(PersonType::Other, false));
        engine.set_degree_limit(2);
        let (view, _) = engine.focus_person("x");
        // y is hidden but still carries the path to z
        assert_eq!(ids(view), vec!["x", "z"]);
    }

    #[test]
    fn test_unknown_focus_is_noop() {
        let dataset = chain();
        let mut engine = GraphFilterEngine::new(&dataset);
        engine.set_degree_limit(1);
        engine.focus_person("z");
        let before_view = engine.view().clone();
        let before_state = engine.state().clone();

        let (view, directive) = engine.focus_person("nobody");
        assert!(directive.is_none());
        assert_eq!(view, &before_view);
        assert_eq!(engine.state(), &before_state);
    }

    #[test]
    fn test_reset_view() {
        let dataset = chain();
        let mut engine = GraphFilterEngine::new(&dataset);
        engine.set_filters(
            &FilterUpdate::new()
                .show(PersonType::Victim, false)
                .show(PersonType::Accused, false)
                .risk_min(0.3),
        );
        engine.focus_person("x");

        engine.reset_view();
        let state = engine.state();
        assert!(state.show_victim && state.show_accused && state.show_other);
        assert!(state.focused.is_none());
        assert_eq!(state.risk_min, 0.3);
    }

    #[test]
    fn test_initial_unknown_focus_dropped() {
        let dataset = chain();
        let state = FilterState {
            focused: Some(PersonId::from("ghost")),
            ..FilterState::default()
        };
        let engine = GraphFilterEngine::with_state(&dataset, state);
        assert!(engine.state().focused.is_none());
        assert_eq!(engine.view().people.len(), 4);
    }

    #[test]
    fn test_dangling_edge_never_visible() {
        let people = vec![Person::new("a", "A", PersonType::Other)];
        let edges = vec![Edge::new("a", "ghost", RelationshipKind::Association)];
        let dataset = Dataset::new(people, edges, vec![], vec![]);
        let engine = GraphFilterEngine::new(&dataset);
        assert!(engine.view().contains_person("a"));
        assert!(engine.view().edges.is_empty());
    }
}
