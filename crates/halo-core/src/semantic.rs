//! Graph data model consumed by the layout engine.
//!
//! The data set is owned by the caller and handed to the engine wholesale on
//! every layout call. All types deserialize from the camelCase JSON shape the
//! web client stores use:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "word-1", "group": "central", "type": "word" },
//!     { "id": "def-1", "group": "live-definition", "type": "definition",
//!       "data": { "positiveVotes": 12, "negativeVotes": 2 } }
//!   ],
//!   "links": [ { "source": "word-1", "target": "def-1", "type": "live" } ]
//! }
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::Id;

/// Error returned when a group, mode or view name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseNameError {
    kind: &'static str,
    value: String,
}

/// Semantic group of a node; satellites of the same group form one
/// comparability class when ranking by votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeGroup {
    /// The focal node of the view.
    Central,
    /// The definition currently winning the vote for a word.
    LiveDefinition,
    /// A competing definition for a word.
    AlternativeDefinition,
    /// Links to other views; not ranked by votes.
    Navigation,
    /// A statement related to the central node.
    Statement,
    /// An answer to an open question.
    Answer,
    /// A discussion comment.
    Comment,
}

impl NodeGroup {
    /// Returns the kebab-case name used in data sets.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Central => "central",
            Self::LiveDefinition => "live-definition",
            Self::AlternativeDefinition => "alternative-definition",
            Self::Navigation => "navigation",
            Self::Statement => "statement",
            Self::Answer => "answer",
            Self::Comment => "comment",
        }
    }

    pub fn is_central(self) -> bool {
        self == Self::Central
    }

    /// Navigation nodes sit on a fixed ring instead of being ranked.
    pub fn is_navigation(self) -> bool {
        self == Self::Navigation
    }
}

impl fmt::Display for NodeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeGroup {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "central" => Ok(Self::Central),
            "live-definition" => Ok(Self::LiveDefinition),
            "alternative-definition" => Ok(Self::AlternativeDefinition),
            "navigation" => Ok(Self::Navigation),
            "statement" => Ok(Self::Statement),
            "answer" => Ok(Self::Answer),
            "comment" => Ok(Self::Comment),
            _ => Err(ParseNameError {
                kind: "node group",
                value: s.to_string(),
            }),
        }
    }
}

/// Vote totals carried by a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeData {
    positive_votes: i64,
    negative_votes: i64,
}

impl NodeData {
    pub fn new(positive_votes: i64, negative_votes: i64) -> Self {
        Self {
            positive_votes,
            negative_votes,
        }
    }

    pub fn positive_votes(&self) -> i64 {
        self.positive_votes
    }

    pub fn negative_votes(&self) -> i64 {
        self.negative_votes
    }

    /// Net votes, the ranking weight of a satellite.
    pub fn net_votes(&self) -> i64 {
        self.positive_votes.saturating_sub(self.negative_votes)
    }
}

/// A node of the graph data set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphNode {
    id: Id,
    group: NodeGroup,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    data: NodeData,
}

impl GraphNode {
    /// Creates a node with no type tag and zero votes.
    pub fn new(id: impl Into<Id>, group: NodeGroup) -> Self {
        Self {
            id: id.into(),
            group,
            kind: String::new(),
            data: NodeData::default(),
        }
    }

    /// Sets the free-form type tag (builder style).
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the vote totals (builder style).
    pub fn with_votes(mut self, positive_votes: i64, negative_votes: i64) -> Self {
        self.data = NodeData::new(positive_votes, negative_votes);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn group(&self) -> NodeGroup {
        self.group
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }
}

/// A relation between two nodes. Edges are advisory to placement.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphEdge {
    source: Id,
    target: Id,
    #[serde(rename = "type", default)]
    relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f32>,
}

impl GraphEdge {
    pub fn new(source: impl Into<Id>, target: impl Into<Id>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation: String::new(),
            value: None,
        }
    }

    /// Sets the relation tag (builder style).
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = relation.into();
        self
    }

    /// Sets the edge weight (builder style).
    pub fn with_value(mut self, value: f32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn value(&self) -> Option<f32> {
        self.value
    }
}

/// The full data set for one layout: ordered nodes plus their edges.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphData {
    #[serde(default)]
    nodes: Vec<GraphNode>,
    #[serde(default, alias = "edges")]
    links: Vec<GraphEdge>,
}

impl GraphData {
    pub fn new(nodes: Vec<GraphNode>, links: Vec<GraphEdge>) -> Self {
        Self { nodes, links }
    }

    /// Appends a node (builder style).
    pub fn with_node(mut self, node: GraphNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Appends an edge (builder style).
    pub fn with_edge(mut self, edge: GraphEdge) -> Self {
        self.links.push(edge);
        self
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Per-node display override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeMode {
    /// Follow the view's global mode.
    Preview,
    /// Enlarged, independent of the global mode.
    Detail,
}

impl FromStr for NodeMode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preview" => Ok(Self::Preview),
            "detail" => Ok(Self::Detail),
            _ => Err(ParseNameError {
                kind: "node mode",
                value: s.to_string(),
            }),
        }
    }
}

/// The kind of view a layout is computed for. It selects the placement
/// strategy and is fixed for the life of an engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewType {
    /// A word with its live and alternative definitions.
    Word,
    /// A statement with related statements.
    Statement,
    /// An open question with its answers.
    OpenQuestion,
    /// Any other view, kept by name.
    Other(String),
}

impl ViewType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Word => "word",
            Self::Statement => "statement",
            Self::OpenQuestion => "openquestion",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for ViewType {
    fn from(name: &str) -> Self {
        match name {
            "word" => Self::Word,
            "statement" => Self::Statement,
            "openquestion" | "question" => Self::OpenQuestion,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_votes() {
        assert_eq!(NodeData::new(10, 3).net_votes(), 7);
        assert_eq!(NodeData::new(0, 4).net_votes(), -4);
        assert_eq!(NodeData::new(i64::MIN, 1).net_votes(), i64::MIN);
    }

    #[test]
    fn test_group_names_roundtrip() {
        for group in [
            NodeGroup::Central,
            NodeGroup::LiveDefinition,
            NodeGroup::AlternativeDefinition,
            NodeGroup::Navigation,
            NodeGroup::Statement,
            NodeGroup::Answer,
            NodeGroup::Comment,
        ] {
            assert_eq!(group.as_str().parse::<NodeGroup>(), Ok(group));
        }
        let err = "satellite".parse::<NodeGroup>().unwrap_err();
        assert_eq!(err.to_string(), "unknown node group `satellite`");
    }

    #[test]
    fn test_view_type_from_str() {
        assert_eq!(ViewType::from("word"), ViewType::Word);
        assert_eq!(ViewType::from("question"), ViewType::OpenQuestion);
        assert_eq!(
            ViewType::from("dashboard"),
            ViewType::Other("dashboard".to_string())
        );
        assert_eq!(ViewType::from("dashboard").to_string(), "dashboard");
    }

    #[test]
    fn test_node_mode_from_str() {
        assert_eq!("detail".parse::<NodeMode>(), Ok(NodeMode::Detail));
        assert!("expanded".parse::<NodeMode>().is_err());
    }

    #[test]
    fn test_deserialize_graph_data() {
        let json = r#"{
            "nodes": [
                { "id": "word-1", "group": "central", "type": "word" },
                { "id": "def-1", "group": "live-definition", "type": "definition",
                  "data": { "positiveVotes": 12, "negativeVotes": 2 } },
                { "id": "nav-1", "group": "navigation" }
            ],
            "links": [
                { "source": "word-1", "target": "def-1", "type": "live", "value": 1.5 }
            ]
        }"#;

        let data: GraphData = serde_json::from_str(json).unwrap();
        assert_eq!(data.nodes().len(), 3);
        assert_eq!(data.nodes()[0].group(), NodeGroup::Central);
        assert_eq!(data.nodes()[0].kind(), "word");
        assert_eq!(data.nodes()[1].data().net_votes(), 10);
        assert_eq!(data.nodes()[2].data(), &NodeData::default());

        let edge = &data.edges()[0];
        assert_eq!(edge.source(), "word-1");
        assert_eq!(edge.target(), "def-1");
        assert_eq!(edge.relation(), "live");
        assert_eq!(edge.value(), Some(1.5));
    }

    #[test]
    fn test_deserialize_accepts_edges_alias() {
        let json = r#"{
            "nodes": [{ "id": "s-1", "group": "central" }],
            "edges": [{ "source": "s-1", "target": "s-1" }]
        }"#;

        let data: GraphData = serde_json::from_str(json).unwrap();
        assert_eq!(data.edges().len(), 1);
        assert_eq!(data.edges()[0].value(), None);
    }

    #[test]
    fn test_deserialize_rejects_unknown_group() {
        let json = r#"{ "nodes": [{ "id": "x", "group": "satellite" }] }"#;
        assert!(serde_json::from_str::<GraphData>(json).is_err());
    }

    #[test]
    fn test_builders() {
        let data = GraphData::default()
            .with_node(GraphNode::new("word-1", NodeGroup::Central).with_kind("word"))
            .with_node(GraphNode::new("def-1", NodeGroup::LiveDefinition).with_votes(3, 1))
            .with_edge(GraphEdge::new("word-1", "def-1").with_relation("live"));

        assert!(!data.is_empty());
        assert_eq!(data.nodes()[1].data().positive_votes(), 3);
        assert_eq!(data.nodes()[1].data().negative_votes(), 1);
        assert_eq!(data.edges()[0].relation(), "live");
    }
}
