//! Validated view over a graph data set.
//!
//! [`LayoutGraph`] is built once per layout call. Construction checks the data
//! set for the caller errors the engine refuses to guess around, so the later
//! placement stages can index nodes without re-checking.

use std::{cmp::Reverse, collections::HashSet};

use log::{debug, trace};

use halo_core::{
    identifier::Id,
    semantic::{GraphData, GraphNode, NodeGroup},
};

use crate::HaloError;

/// Satellites of one comparability class, ranked by descending net votes.
///
/// Equal weights keep their input order.
#[derive(Debug)]
pub(crate) struct SatelliteClass<'a> {
    group: NodeGroup,
    ranked: Vec<&'a GraphNode>,
}

impl<'a> SatelliteClass<'a> {
    fn new(group: NodeGroup, mut members: Vec<&'a GraphNode>) -> Self {
        // `sort_by_key` is stable, which keeps ties in input order.
        members.sort_by_key(|node| Reverse(node.data().net_votes()));
        Self {
            group,
            ranked: members,
        }
    }

    pub(crate) fn group(&self) -> NodeGroup {
        self.group
    }

    /// Members from highest to lowest weight.
    pub(crate) fn ranked(&self) -> &[&'a GraphNode] {
        &self.ranked
    }

    pub(crate) fn len(&self) -> usize {
        self.ranked.len()
    }
}

/// A graph data set that passed validation.
#[derive(Debug)]
pub(crate) struct LayoutGraph<'a> {
    central: &'a GraphNode,
    classes: Vec<SatelliteClass<'a>>,
    navigation: Vec<&'a GraphNode>,
}

impl<'a> LayoutGraph<'a> {
    /// Validates `data` and groups its satellites.
    ///
    /// # Errors
    ///
    /// - [`HaloError::EmptyGraph`] when there are no nodes.
    /// - [`HaloError::DuplicateNode`] for a repeated id.
    /// - [`HaloError::MultipleCentral`] when a second central node appears.
    /// - [`HaloError::MissingCentral`] when no node is central.
    /// - [`HaloError::DanglingEdge`] for an edge endpoint that is not a node.
    pub(crate) fn from_data(data: &'a GraphData) -> Result<Self, HaloError> {
        if data.is_empty() {
            return Err(HaloError::EmptyGraph);
        }

        let mut seen: HashSet<Id> = HashSet::with_capacity(data.nodes().len());
        let mut central: Option<&'a GraphNode> = None;
        // Groups in order of first appearance, members in input order.
        let mut grouped: Vec<(NodeGroup, Vec<&'a GraphNode>)> = Vec::new();
        let mut navigation = Vec::new();

        for node in data.nodes() {
            if !seen.insert(node.id()) {
                return Err(HaloError::DuplicateNode { id: node.id() });
            }

            match node.group() {
                NodeGroup::Central => {
                    if let Some(first) = central {
                        return Err(HaloError::MultipleCentral {
                            first: first.id(),
                            second: node.id(),
                        });
                    }
                    central = Some(node);
                }
                NodeGroup::Navigation => navigation.push(node),
                group => match grouped.iter_mut().find(|(g, _)| *g == group) {
                    Some((_, members)) => members.push(node),
                    None => grouped.push((group, vec![node])),
                },
            }
        }

        let central = central.ok_or(HaloError::MissingCentral)?;

        for edge in data.edges() {
            for endpoint in [edge.source(), edge.target()] {
                if !seen.contains(&endpoint) {
                    return Err(HaloError::DanglingEdge {
                        from: edge.source(),
                        to: edge.target(),
                        missing: endpoint,
                    });
                }
            }
        }

        let classes: Vec<SatelliteClass<'a>> = grouped
            .into_iter()
            .map(|(group, members)| SatelliteClass::new(group, members))
            .collect();

        for class in &classes {
            trace!(
                group = class.group().as_str(),
                ranked:? = class.ranked().iter().map(|n| n.id()).collect::<Vec<_>>();
                "Ranked satellite class"
            );
        }
        debug!(
            central:? = central.id(),
            class_count = classes.len(),
            navigation_count = navigation.len(),
            edge_count = data.edges().len();
            "Graph data validated"
        );

        Ok(Self {
            central,
            classes,
            navigation,
        })
    }

    pub(crate) fn central(&self) -> &'a GraphNode {
        self.central
    }

    /// Vote-ranked classes in order of first appearance, navigation excluded.
    pub(crate) fn classes(&self) -> &[SatelliteClass<'a>] {
        &self.classes
    }

    /// Navigation nodes in input order.
    pub(crate) fn navigation(&self) -> &[&'a GraphNode] {
        &self.navigation
    }

    /// Number of non-central nodes.
    pub(crate) fn satellite_count(&self) -> usize {
        self.classes.iter().map(SatelliteClass::len).sum::<usize>() + self.navigation.len()
    }
}

#[cfg(test)]
mod tests {
    use halo_core::semantic::GraphEdge;

    use super::*;

    fn word_data() -> GraphData {
        GraphData::default()
            .with_node(GraphNode::new("word-1", NodeGroup::Central))
            .with_node(GraphNode::new("alt-low", NodeGroup::AlternativeDefinition).with_votes(2, 0))
            .with_node(GraphNode::new("live", NodeGroup::LiveDefinition).with_votes(20, 1))
            .with_node(GraphNode::new("alt-high", NodeGroup::AlternativeDefinition).with_votes(9, 1))
            .with_node(GraphNode::new("nav-1", NodeGroup::Navigation))
            .with_edge(GraphEdge::new("word-1", "live"))
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let data = word_data();
        let graph = LayoutGraph::from_data(&data).unwrap();

        assert_eq!(graph.central().id(), "word-1");
        let groups: Vec<_> = graph.classes().iter().map(|c| c.group()).collect();
        assert_eq!(
            groups,
            vec![NodeGroup::AlternativeDefinition, NodeGroup::LiveDefinition]
        );
        assert_eq!(graph.navigation().len(), 1);
        assert_eq!(graph.satellite_count(), 4);
    }

    #[test]
    fn test_ranks_by_net_votes() {
        let data = word_data();
        let graph = LayoutGraph::from_data(&data).unwrap();

        let ranked: Vec<_> = graph.classes()[0].ranked().iter().map(|n| n.id()).collect();
        assert_eq!(ranked, vec![Id::new("alt-high"), Id::new("alt-low")]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let data = GraphData::default()
            .with_node(GraphNode::new("q", NodeGroup::Central))
            .with_node(GraphNode::new("a-1", NodeGroup::Answer).with_votes(5, 0))
            .with_node(GraphNode::new("a-2", NodeGroup::Answer).with_votes(7, 2))
            .with_node(GraphNode::new("a-3", NodeGroup::Answer).with_votes(5, 0));
        let graph = LayoutGraph::from_data(&data).unwrap();

        let ranked: Vec<_> = graph.classes()[0].ranked().iter().map(|n| n.id()).collect();
        assert_eq!(ranked, vec![Id::new("a-1"), Id::new("a-2"), Id::new("a-3")]);
    }

    #[test]
    fn test_central_only_is_valid() {
        let data = GraphData::default().with_node(GraphNode::new("lonely", NodeGroup::Central));
        let graph = LayoutGraph::from_data(&data).unwrap();
        assert_eq!(graph.satellite_count(), 0);
    }

    #[test]
    fn test_rejects_empty() {
        let data = GraphData::default();
        assert!(matches!(
            LayoutGraph::from_data(&data),
            Err(HaloError::EmptyGraph)
        ));
    }

    #[test]
    fn test_rejects_missing_central() {
        let data =
            GraphData::default().with_node(GraphNode::new("def", NodeGroup::LiveDefinition));
        assert!(matches!(
            LayoutGraph::from_data(&data),
            Err(HaloError::MissingCentral)
        ));
    }

    #[test]
    fn test_rejects_second_central() {
        let data = GraphData::default()
            .with_node(GraphNode::new("c-1", NodeGroup::Central))
            .with_node(GraphNode::new("c-2", NodeGroup::Central));
        match LayoutGraph::from_data(&data) {
            Err(HaloError::MultipleCentral { first, second }) => {
                assert_eq!(first, "c-1");
                assert_eq!(second, "c-2");
            }
            other => panic!("expected MultipleCentral, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let data = GraphData::default()
            .with_node(GraphNode::new("word-1", NodeGroup::Central))
            .with_node(GraphNode::new("def", NodeGroup::LiveDefinition))
            .with_node(GraphNode::new("def", NodeGroup::AlternativeDefinition));
        match LayoutGraph::from_data(&data) {
            Err(HaloError::DuplicateNode { id }) => assert_eq!(id, "def"),
            other => panic!("expected DuplicateNode, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_dangling_edge() {
        let data = word_data().with_edge(GraphEdge::new("live", "ghost"));
        match LayoutGraph::from_data(&data) {
            Err(HaloError::DanglingEdge { from, to, missing }) => {
                assert_eq!(from, "live");
                assert_eq!(to, "ghost");
                assert_eq!(missing, "ghost");
            }
            other => panic!("expected DanglingEdge, got {other:?}"),
        }
    }
}
