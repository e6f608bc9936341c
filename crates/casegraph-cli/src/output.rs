//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use casegraph_domain::{DerivedAttributes, Person, RenderDelegate};
use casegraph_loader::LoadReport;
use casegraph_view::{Explorer, PersonDetail, SearchHit};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a risk ranking.
    pub fn format_ranking(&self, ranked: &[(&Person, DerivedAttributes)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = ranked
                    .iter()
                    .enumerate()
                    .map(|(i, (person, derived))| {
                        serde_json::json!({
                            "rank": i + 1,
                            "id": person.id,
                            "name": person.name,
                            "type": person.person_type,
                            "risk": derived.risk,
                            "composite": derived.composite,
                            "degree": derived.degree,
                            "mentions": derived.mention_count,
                            "cases": derived.case_count,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(join_ids(ranked.iter().map(|(p, _)| p.id.as_str()))),
            OutputFormat::Table => {
                if ranked.is_empty() {
                    return Ok(self.colorize("No people to rank.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "ID", "Name", "Type", "Risk", "Degree", "Mentions", "Cases"]);
                for (i, (person, derived)) in ranked.iter().enumerate() {
                    builder.push_record([
                        (i + 1).to_string(),
                        person.id.to_string(),
                        person.name.clone(),
                        person.person_type.as_str().to_string(),
                        format!("{:.3}", derived.risk),
                        derived.degree.to_string(),
                        derived.mention_count.to_string(),
                        derived.case_count.to_string(),
                    ]);
                }
                Ok(styled(builder.build()))
            }
        }
    }

    /// Format the explorer's current view.
    pub fn format_view<D: RenderDelegate>(
        &self,
        explorer: &Explorer<'_, D>,
        show_edges: bool,
    ) -> Result<String> {
        let dataset = explorer.dataset();
        let view = explorer.view();
        let visible: Vec<&Person> = dataset
            .people()
            .iter()
            .filter(|p| view.contains_person(p.id.as_str()))
            .collect();

        match self.format {
            OutputFormat::Json => {
                let people: Vec<serde_json::Value> = visible
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "id": p.id,
                            "name": p.name,
                            "type": p.person_type,
                            "risk": dataset.risk(p.id.as_str()),
                            "degree": dataset.risk_table().degree(p.id.as_str()),
                            "hops": explorer.hops_from_focus(p.id.as_str()),
                        })
                    })
                    .collect();
                let edges: Vec<serde_json::Value> = view
                    .edges
                    .iter()
                    .filter_map(|&key| dataset.edge(key).map(|e| (key, e)))
                    .map(|(key, edge)| {
                        serde_json::json!({
                            "key": key,
                            "source": edge.source,
                            "target": edge.target,
                            "relationship": edge.relationship,
                            "weight": edge.weight,
                        })
                    })
                    .collect();
                let output = serde_json::json!({
                    "state": explorer.state(),
                    "people": people,
                    "edges": edges,
                });
                Ok(serde_json::to_string_pretty(&output)?)
            }
            OutputFormat::Quiet => Ok(join_ids(visible.iter().map(|p| p.id.as_str()))),
            OutputFormat::Table => {
                let state = explorer.state();
                let mut out = vec![self.info(&format!(
                    "{} of {} people, {} of {} edges visible (risk >= {:.2}{})",
                    view.people.len(),
                    dataset.people().len(),
                    view.edges.len(),
                    dataset.edges().len(),
                    state.risk_min,
                    match &state.focused {
                        Some(id) => format!(", focus {} within {} hops", id, state.degree_limit),
                        None => String::new(),
                    }
                ))];

                if visible.is_empty() {
                    out.push(self.colorize("Nothing matches the current filters.", "yellow"));
                    return Ok(out.join("\n"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Type", "Risk", "Degree", "Hops"]);
                for person in &visible {
                    let id = person.id.as_str();
                    builder.push_record([
                        id.to_string(),
                        person.name.clone(),
                        person.person_type.as_str().to_string(),
                        format!("{:.3}", dataset.risk(id)),
                        dataset.risk_table().degree(id).to_string(),
                        explorer
                            .hops_from_focus(id)
                            .map(|h| h.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ]);
                }
                out.push(styled(builder.build()));

                if show_edges && !view.edges.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Edge", "Source", "Target", "Relationship", "Weight"]);
                    for &key in &view.edges {
                        if let Some(edge) = dataset.edge(key) {
                            builder.push_record([
                                key.to_string(),
                                edge.source.to_string(),
                                edge.target.to_string(),
                                edge.relationship.to_string(),
                                format!("{:.2}", edge.weight),
                            ]);
                        }
                    }
                    out.push(styled(builder.build()));
                }

                Ok(out.join("\n"))
            }
        }
    }

    /// Format the detail panel for a person.
    pub fn format_person(&self, detail: &PersonDetail<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(detail)?),
            OutputFormat::Quiet => Ok(detail.person.id.to_string()),
            OutputFormat::Table => {
                let person = detail.person;
                let derived = &detail.derived;
                let title = format!("{} ({})", person.name, person.id);
                let mut out = vec![self.colorize(&title, "cyan")];
                out.push(format!("  Type:      {}", person.person_type.as_str()));
                out.push(format!(
                    "  Risk:      {:.3} (composite {:.2})",
                    derived.risk, derived.composite
                ));
                out.push(format!(
                    "  Degree:    {}   Mentions: {}   Cases: {}",
                    derived.degree, derived.mention_count, derived.case_count
                ));
                if !person.tags.is_empty() {
                    let tags: Vec<&str> = person.tags.iter().map(String::as_str).collect();
                    out.push(format!("  Tags:      {}", tags.join(", ")));
                }
                if let Some(hops) = detail.hops_from_focus {
                    out.push(format!("  Hops:      {}", hops));
                }
                if !detail.visible {
                    out.push(self.warning("Hidden by the current filters"));
                }
                if !person.notes.is_empty() {
                    out.push(String::new());
                    out.push(person.notes.clone());
                }

                if !detail.connections.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Direction", "Person", "Relationship", "Weight"]);
                    for connection in &detail.connections {
                        let name = match connection.counterpart_name {
                            Some(name) => format!("{} ({})", name, connection.counterpart),
                            None => format!("{} (unknown)", connection.counterpart),
                        };
                        builder.push_record([
                            if connection.outgoing { "->" } else { "<-" }.to_string(),
                            name,
                            connection.edge.relationship.to_string(),
                            format!("{:.2}", connection.edge.weight),
                        ]);
                    }
                    out.push(String::new());
                    out.push(styled(builder.build()));
                }

                if !detail.cases.is_empty() {
                    out.push(String::new());
                    out.push(self.colorize("Cases", "cyan"));
                    for case in &detail.cases {
                        out.push(format!("  {}  {}", case.id, case.title));
                    }
                }

                if !detail.documents.is_empty() {
                    out.push(String::new());
                    out.push(self.colorize("Documents", "cyan"));
                    for document in &detail.documents {
                        let date = if document.date.is_empty() {
                            "undated"
                        } else {
                            document.date.as_str()
                        };
                        out.push(format!("  {}  {} [{}]", document.id, document.title, date));
                    }
                }

                Ok(out.join("\n"))
            }
        }
    }

    /// Format search hits.
    pub fn format_hits(&self, hits: &[SearchHit<'_>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(hits)?),
            OutputFormat::Quiet => Ok(join_ids(hits.iter().map(|h| h.person.id.as_str()))),
            OutputFormat::Table => {
                if hits.is_empty() {
                    return Ok(self.colorize("No people found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Type", "Risk", "Visible"]);
                for hit in hits {
                    builder.push_record([
                        hit.person.id.to_string(),
                        hit.person.name.clone(),
                        hit.person.person_type.as_str().to_string(),
                        format!("{:.3}", hit.risk),
                        if hit.visible { "yes" } else { "no" }.to_string(),
                    ]);
                }
                Ok(styled(builder.build()))
            }
        }
    }

    /// Format the load report.
    pub fn format_report(&self, report: &LoadReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let audit = &report.audit;
                let output = serde_json::json!({
                    "duplicate_people": report.duplicate_people,
                    "clamped_weights": report.clamped_weights,
                    "grouped_edges": report.grouped_edges,
                    "dangling": {
                        "edge_endpoints": audit.edge_endpoints,
                        "document_mentions": audit.document_mentions,
                        "case_members": audit.case_members,
                        "person_cases": audit.person_cases,
                        "case_documents": audit.case_documents,
                        "total": audit.total(),
                    },
                });
                Ok(serde_json::to_string_pretty(&output)?)
            }
            OutputFormat::Quiet => Ok(report.audit.total().to_string()),
            OutputFormat::Table => {
                let mut out = vec![report.summary()];
                out.push(String::new());
                if report.audit.is_clean() {
                    out.push(self.success("Every reference resolves"));
                } else {
                    out.push(self.warning(&format!(
                        "{} dangling reference(s) ignored by scoring",
                        report.audit.total()
                    )));
                }
                Ok(out.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.collect::<Vec<_>>().join("\n")
}
