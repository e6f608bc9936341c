//! Integration tests for casegraph-view
//!
//! These tests drive scoring and filtering together through the public API.

use casegraph_domain::{Case, Dataset, Document, Edge, Person, PersonType, RelationshipKind};
use casegraph_view::{Explorer, FilterUpdate, GraphFilterEngine, VisibilityLedger};

fn network() -> Dataset {
    let people = vec![
        Person::new("boss", "The Boss", PersonType::Accused).with_cases(["c1"]),
        Person::new("fixer", "The Fixer", PersonType::Other),
        Person::new("driver", "The Driver", PersonType::Other),
        Person::new("victim", "A Victim", PersonType::Victim).with_cases(["c1"]),
        Person::new("loner", "The Loner", PersonType::Other),
    ];
    let edges = vec![
        Edge::new("boss", "fixer", RelationshipKind::Procurement),
        Edge::new("fixer", "driver", RelationshipKind::Introduced),
        Edge::new("boss", "victim", RelationshipKind::AllegedAbuse),
        Edge::new("driver", "nobody", RelationshipKind::Association),
    ];
    let cases = vec![Case::new("c1", "People v. Boss")
        .with_people(["boss", "victim"])
        .with_documents(["d1"])];
    let documents = vec![
        Document::new("d1", "Indictment").with_mentions(["boss", "fixer"]),
        Document::new("d2", "Flight log").with_mentions(["boss", "driver", "victim"]),
    ];
    Dataset::new(people, edges, cases, documents)
}

#[test]
fn test_scores_bounded_and_victims_zero() {
    let dataset = network();
    for person in dataset.people() {
        let risk = dataset.risk(person.id.as_str());
        assert!((0.0..=1.0).contains(&risk));
        if person.person_type == PersonType::Victim {
            assert_eq!(risk, 0.0);
        }
    }
    assert_eq!(dataset.risk("boss"), 1.0);
    assert_eq!(dataset.risk("loner"), 0.0);
}

#[test]
fn test_ego_network_grows_with_radius() {
    let dataset = network();
    let mut engine = GraphFilterEngine::new(&dataset);

    engine.set_degree_limit(0);
    engine.focus_person("boss");
    assert_eq!(engine.view().people.len(), 1);

    engine.set_degree_limit(1);
    let names: Vec<&str> = engine.view().people.iter().map(|p| p.as_str()).collect();
    assert_eq!(names, vec!["boss", "fixer", "victim"]);

    engine.set_degree_limit(2);
    assert!(engine.view().contains_person("driver"));
    assert!(!engine.view().contains_person("loner"));
}

#[test]
fn test_risk_threshold_and_victim_exemption() {
    let dataset = network();
    let mut engine = GraphFilterEngine::new(&dataset);
    let view = engine.set_filters(&FilterUpdate::new().risk_min(0.9));
    assert!(view.contains_person("victim"));
    assert!(view.contains_person("boss"));
    assert!(!view.contains_person("loner"));
}

#[test]
fn test_reset_restores_types_not_threshold() {
    let dataset = network();
    let mut explorer = Explorer::new(&dataset, VisibilityLedger::new());

    explorer.apply_filters(
        &FilterUpdate::new()
            .show(PersonType::Victim, false)
            .show(PersonType::Other, false)
            .risk_min(0.5),
    );
    explorer.focus_person("boss");
    assert!(!explorer.delegate().is_node_visible("victim"));

    explorer.reset_view();
    assert!(explorer.state().focused.is_none());
    assert_eq!(explorer.state().risk_min, 0.5);
    assert!(explorer.delegate().is_node_visible("victim"));
    assert!(!explorer.delegate().is_node_visible("loner"));
}

#[test]
fn test_unknown_focus_keeps_prior_view() {
    let dataset = network();
    let mut explorer = Explorer::new(&dataset, VisibilityLedger::new());
    explorer.set_degree_limit(1);
    explorer.focus_person("driver");
    let before = explorer.view().clone();

    assert!(explorer.focus_person("does-not-exist").is_none());
    assert_eq!(explorer.view(), &before);
    assert_eq!(explorer.state().focused.as_ref().map(|p| p.as_str()), Some("driver"));
}

#[test]
fn test_detail_panel_links_cases_and_documents() {
    let dataset = network();
    let explorer = Explorer::new(&dataset, VisibilityLedger::new());

    let detail = explorer.person_detail("victim").unwrap();
    assert_eq!(detail.cases.len(), 1);
    let docs: Vec<&str> = detail.documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(docs, vec!["d1", "d2"]);
    assert_eq!(detail.derived.case_count, 2);

    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["person"]["id"], "victim");
}
