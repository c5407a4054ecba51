/// Flow graph read from a Graphviz DOT file
///
/// Only two statement kinds matter here:
/// - node statements, `id [label="Title", ...]`, which give a node its title
/// - edge statements, `a -> b -> c [label="..."]`, which link nodes forward/backward
///
/// A line may hold several statements separated by `;`. Everything else
/// (graph attributes, comments, subgraph braces) is skipped.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::ViewerError;

/// Kind of node, inferred from its identifier prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Time,
    Place,
    Organization,
    Person,
    Concept,
    Course,
    Technology,
    Event,
    Achievement,
    Lesson,
}

impl Category {
    /// Display order of the category list
    pub const ALL: [Category; 10] = [
        Category::Time,
        Category::Place,
        Category::Organization,
        Category::Person,
        Category::Concept,
        Category::Course,
        Category::Technology,
        Category::Event,
        Category::Achievement,
        Category::Lesson,
    ];

    /// Category of a node identifier, if it follows a known naming scheme
    pub fn of(id: &str) -> Option<Self> {
        const PREFIXES: [(&str, Category); 7] = [
            ("place_", Category::Place),
            ("org_", Category::Organization),
            ("person_", Category::Person),
            ("concept_", Category::Concept),
            ("course_", Category::Course),
            ("tech_", Category::Technology),
            ("event_", Category::Event),
        ];

        if let Some(&(_, category)) = PREFIXES.iter().find(|(prefix, _)| id.starts_with(prefix)) {
            return Some(category);
        }

        // `t` last, it would otherwise swallow `tech_`
        if id == "achievement" {
            Some(Category::Achievement)
        } else if id.starts_with("lesson") {
            Some(Category::Lesson)
        } else if id.starts_with('t') {
            Some(Category::Time)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Time => "Time",
            Category::Place => "Place",
            Category::Organization => "Organization",
            Category::Person => "Person",
            Category::Concept => "Educational concept",
            Category::Course => "Course",
            Category::Technology => "Product / technology",
            Category::Event => "Event",
            Category::Achievement => "Achievement",
            Category::Lesson => "Lesson",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A link to a neighbouring node, with the edge's own label
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLink {
    pub id: String,
    pub label: Option<String>,
}

/// One node of the flow
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    pub id: String,
    pub label: String,
    /// Nodes this one points to
    pub forward: Vec<FlowLink>,
    /// Nodes pointing to this one
    pub backward: Vec<FlowLink>,
}

/// All nodes of a flow, in the order they were first mentioned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowGraph {
    nodes: Vec<FlowNode>,
    index: HashMap<String, usize>,
}

impl FlowGraph {
    /// Parse DOT source text
    pub fn parse(source: &str) -> Self {
        let mut graph = FlowGraph::default();

        for line in source.lines() {
            for statement in split_statements(line) {
                if !is_skipped(statement) {
                    graph.add_statement(statement);
                }
            }
        }

        graph
    }

    pub fn get(&self, id: &str) -> Option<&FlowNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Title of a node, if the flow defines one
    pub fn label(&self, id: &str) -> Option<&str> {
        self.get(id).map(|node| node.label.as_str())
    }

    /// Text for a link: the target's title, then the edge label in parentheses
    pub fn caption(&self, link: &FlowLink) -> String {
        let title = self.label(&link.id).unwrap_or(link.id.as_str());
        match &link.label {
            Some(edge) => format!("{title} ({edge})"),
            None => title.to_string(),
        }
    }

    /// Category of a node in this flow
    pub fn category(&self, id: &str) -> Option<Category> {
        self.get(id).and_then(|node| Category::of(&node.id))
    }

    /// Categories that have at least one node, in display order
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|&category| self.nodes.iter().any(|node| Category::of(&node.id) == Some(category)))
            .collect()
    }

    /// Nodes of one category, in flow order
    pub fn nodes_in(&self, category: Category) -> Vec<&FlowNode> {
        self.nodes
            .iter()
            .filter(|node| Category::of(&node.id) == Some(category))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn add_statement(&mut self, statement: &str) {
        let (statement, attrs) = split_attributes(statement);
        let label = attrs.and_then(|attrs| attribute(attrs, "label"));

        if statement.contains("->") {
            let chain: Vec<&str> = statement.split("->").map(str::trim).collect();
            let edge_label = label.filter(|label| !label.is_empty());

            // A quoted or otherwise unsupported id breaks the chain on both sides
            for pair in chain.windows(2) {
                if is_identifier(pair[0]) && is_identifier(pair[1]) {
                    self.add_edge(pair[0], pair[1], edge_label.as_deref());
                } else {
                    debug!(from = pair[0], to = pair[1], "skipped unsupported edge");
                }
            }
        } else if is_identifier(statement) {
            self.add_node(statement, label);
        }
    }

    fn entry(&mut self, id: &str) -> &mut FlowNode {
        let i = match self.index.get(id) {
            Some(&i) => i,
            None => {
                self.nodes.push(FlowNode {
                    id: id.to_string(),
                    label: id.to_string(),
                    forward: Vec::new(),
                    backward: Vec::new(),
                });
                self.index.insert(id.to_string(), self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[i]
    }

    fn add_node(&mut self, id: &str, label: Option<String>) {
        let node = self.entry(id);
        if let Some(label) = label {
            node.label = label;
        }
    }

    /// Link two nodes. A repeated edge keeps its place and takes the newer label.
    fn add_edge(&mut self, from: &str, to: &str, label: Option<&str>) {
        link(&mut self.entry(from).forward, to, label);
        link(&mut self.entry(to).backward, from, label);
    }
}

fn link(links: &mut Vec<FlowLink>, id: &str, label: Option<&str>) {
    let label = label.map(str::to_string);
    match links.iter_mut().find(|link| link.id == id) {
        Some(existing) => existing.label = label,
        None => links.push(FlowLink { id: id.to_string(), label }),
    }
}

/// Split a line on `;`, ignoring separators inside quotes or brackets
fn split_statements(line: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut depth = 0usize;

    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '[' if !quoted => depth += 1,
            ']' if !quoted => depth = depth.saturating_sub(1),
            ';' if !quoted && depth == 0 => {
                statements.push(line[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    statements.push(line[start..].trim());

    statements
}

fn is_skipped(line: &str) -> bool {
    const KEYWORDS: [&str; 6] = ["digraph", "graph", "subgraph", "node", "edge", "rankdir"];

    line.is_empty()
        || line.starts_with("//")
        || line.starts_with('#')
        || line.starts_with('}')
        || line.starts_with('{')
        || KEYWORDS.iter().any(|kw| {
            line.strip_prefix(*kw)
                .is_some_and(|rest| !rest.starts_with(|c: char| c == '_' || c.is_alphanumeric()))
        })
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c == '_' || c.is_alphanumeric())
}

/// Split `stmt [attrs]` into the statement and the attribute list
fn split_attributes(line: &str) -> (&str, Option<&str>) {
    match line.split_once('[') {
        Some((statement, rest)) => {
            let attrs = rest.rsplit_once(']').map_or(rest, |(attrs, _)| attrs);
            (statement.trim(), Some(attrs))
        }
        None => (line, None),
    }
}

/// Value of `key=...` in a DOT attribute list, quoted or bare
fn attribute(attrs: &str, key: &str) -> Option<String> {
    let mut rest = attrs;
    while let Some(pos) = rest.find(key) {
        let before_ok = rest[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !(c == '_' || c.is_alphanumeric()));
        let after = rest[pos + key.len()..].trim_start();

        if before_ok {
            if let Some(value) = after.strip_prefix('=') {
                let value = value.trim_start();
                return Some(match value.strip_prefix('"') {
                    Some(quoted) => quoted.split('"').next().unwrap_or_default().to_string(),
                    None => value
                        .split([',', ' '])
                        .next()
                        .unwrap_or_default()
                        .to_string(),
                });
            }
        }
        rest = &rest[pos + key.len()..];
    }
    None
}

/// Read and parse a DOT file without blocking the UI
pub async fn load_flow(path: PathBuf) -> Result<FlowGraph, String> {
    let source = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ViewerError::Io { path: path.clone(), source }.to_string())?;

    let graph = FlowGraph::parse(&source);
    info!(nodes = graph.len(), path = %path.display(), "🔗 Flow graph loaded");
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FLOW: &str = r#"
digraph hitsz {
    rankdir=LR;
    node [shape=box, style=filled];
    // founding
    t1999 [label="1999 Founded", shape=oval, fillcolor="lightgreen"];
    place_campus [label=Campus];
    org_school [fontcolor=red, label="Graduate School"];
    t1999 -> place_campus;
    place_campus -> org_school -> achievement;
    t1999 -> place_campus [label="located"];
    tech_robot [label="Robot"]; lesson_1 [label="Keep going"]
}
"#;

    fn ids(links: &[FlowLink]) -> Vec<&str> {
        links.iter().map(|link| link.id.as_str()).collect()
    }

    #[test]
    fn test_labels() {
        let graph = FlowGraph::parse(FLOW);

        assert_eq!(graph.label("t1999"), Some("1999 Founded"));
        assert_eq!(graph.label("place_campus"), Some("Campus"));
        assert_eq!(graph.label("org_school"), Some("Graduate School"));
        assert_eq!(graph.label("achievement"), Some("achievement"));
        assert_eq!(graph.label("tech_robot"), Some("Robot"));
        assert_eq!(graph.label("lesson_1"), Some("Keep going"));
        assert_eq!(graph.label("node"), None);
        assert_eq!(graph.len(), 6);
    }

    #[test]
    fn test_links_are_deduplicated_and_chained() {
        let graph = FlowGraph::parse(FLOW);

        let t1999 = graph.get("t1999").unwrap();
        assert_eq!(ids(&t1999.forward), vec!["place_campus"]);
        assert!(t1999.backward.is_empty());

        let campus = graph.get("place_campus").unwrap();
        assert_eq!(ids(&campus.backward), vec!["t1999"]);
        assert_eq!(ids(&campus.forward), vec!["org_school"]);

        let school = graph.get("org_school").unwrap();
        assert_eq!(ids(&school.forward), vec!["achievement"]);
        assert_eq!(ids(&graph.get("achievement").unwrap().backward), vec!["org_school"]);
    }

    #[test]
    fn test_edge_labels_and_captions() {
        let graph = FlowGraph::parse(FLOW);

        let located = &graph.get("t1999").unwrap().forward[0];
        assert_eq!(located.label.as_deref(), Some("located"));
        assert_eq!(graph.caption(located), "Campus (located)");

        let back = &graph.get("place_campus").unwrap().backward[0];
        assert_eq!(graph.caption(back), "1999 Founded (located)");

        let plain = &graph.get("place_campus").unwrap().forward[0];
        assert_eq!(plain.label, None);
        assert_eq!(graph.caption(plain), "Graduate School");
    }

    #[test]
    fn test_chain_label_applies_to_every_edge() {
        let graph = FlowGraph::parse("a -> b -> c [label=\"then\"]\nd -> e [label=\"\"]\n");

        assert_eq!(graph.get("a").unwrap().forward[0].label.as_deref(), Some("then"));
        assert_eq!(graph.get("b").unwrap().forward[0].label.as_deref(), Some("then"));
        assert_eq!(graph.get("d").unwrap().forward[0].label, None);
    }

    #[test]
    fn test_statements_on_one_line_are_separate() {
        let graph = FlowGraph::parse("a -> b; c -> d;\n");

        assert_eq!(ids(&graph.get("a").unwrap().forward), vec!["b"]);
        assert_eq!(ids(&graph.get("c").unwrap().forward), vec!["d"]);
        assert!(graph.get("b").unwrap().forward.is_empty());
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn test_semicolon_inside_label_does_not_split() {
        let graph = FlowGraph::parse("a [label=\"one; two\"]; a -> b [label=\"x;y\"]\n");

        assert_eq!(graph.label("a"), Some("one; two"));
        assert_eq!(graph.get("a").unwrap().forward[0].label.as_deref(), Some("x;y"));
    }

    #[test]
    fn test_unsupported_segment_breaks_chain() {
        let graph = FlowGraph::parse("a -> \"x y\" -> b\nc -> \"q\" -> d -> e\n");

        assert!(graph.get("a").is_none());
        assert!(graph.get("b").is_none());
        assert!(graph.get("c").is_none());
        assert_eq!(ids(&graph.get("d").unwrap().forward), vec!["e"]);
    }

    #[test]
    fn test_edge_before_definition_keeps_label() {
        let graph = FlowGraph::parse("a -> b\nb [label=\"Bee\"]\n");

        assert_eq!(graph.label("b"), Some("Bee"));
        assert_eq!(ids(&graph.get("a").unwrap().forward), vec!["b"]);
    }

    #[test]
    fn test_category_prefixes() {
        assert_eq!(Category::of("t1999"), Some(Category::Time));
        assert_eq!(Category::of("tech_robot"), Some(Category::Technology));
        assert_eq!(Category::of("place_campus"), Some(Category::Place));
        assert_eq!(Category::of("org_school"), Some(Category::Organization));
        assert_eq!(Category::of("person_li"), Some(Category::Person));
        assert_eq!(Category::of("concept_practice"), Some(Category::Concept));
        assert_eq!(Category::of("course_c"), Some(Category::Course));
        assert_eq!(Category::of("event_launch"), Some(Category::Event));
        assert_eq!(Category::of("achievement"), Some(Category::Achievement));
        assert_eq!(Category::of("lesson_1"), Some(Category::Lesson));
        assert_eq!(Category::of("misc"), None);
    }

    #[test]
    fn test_categories_group_flow_nodes() {
        let graph = FlowGraph::parse(FLOW);

        assert_eq!(
            graph.categories(),
            vec![
                Category::Time,
                Category::Place,
                Category::Organization,
                Category::Technology,
                Category::Achievement,
                Category::Lesson,
            ]
        );

        let time: Vec<&str> = graph.nodes_in(Category::Time).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(time, vec!["t1999"]);
        assert!(graph.nodes_in(Category::Person).is_empty());

        assert_eq!(graph.category("org_school"), Some(Category::Organization));
        assert_eq!(graph.category("person_absent"), None);
    }

    #[test]
    fn test_empty_source() {
        assert!(FlowGraph::parse("").is_empty());
        assert!(FlowGraph::parse("digraph g {\n}\n").is_empty());
        assert!(FlowGraph::parse("").categories().is_empty());
    }

    #[tokio::test]
    async fn test_load_flow_missing_file() {
        let result = load_flow(PathBuf::from("/nonexistent/flow.dot")).await;
        assert!(result.is_err());
    }
}
