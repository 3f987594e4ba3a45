//! Halo - A vote-weighted radial layout engine for knowledge-graph views.
//!
//! A view shows one central node surrounded by satellites such as
//! definitions, answers or related statements. Halo places the central node at
//! the origin, ranks satellites of the same group by net votes so that better
//! voted nodes sit closer to the centre, keeps every pair of satellites a
//! minimum distance apart and scales nodes for preview and detail modes.
//!
//! The engine is a pure computation over `(state, data)`: equal inputs always
//! produce the same [`PositionMap`].
//!
//! # Examples
//!
//! ```
//! use halo::{
//!     LayoutEngine,
//!     identifier::Id,
//!     semantic::{GraphData, GraphEdge, GraphNode, NodeGroup},
//! };
//!
//! let mut engine = LayoutEngine::new(1000.0, 800.0, "word", false);
//!
//! let mut data = GraphData::default().with_node(GraphNode::new("word-1", NodeGroup::Central));
//! for (id, votes) in [("alt-1", 10), ("alt-2", 5), ("alt-3", 2)] {
//!     data = data
//!         .with_node(GraphNode::new(id, NodeGroup::AlternativeDefinition).with_votes(votes, 0))
//!         .with_edge(GraphEdge::new("word-1", id));
//! }
//!
//! let positions = engine.update_layout(&data)?;
//! let radius = |id: &str| positions[&Id::new(id)].point().hypot();
//! assert!(radius("alt-1") < radius("alt-2"));
//! assert!(radius("alt-2") < radius("alt-3"));
//! # Ok::<(), halo::HaloError>(())
//! ```

pub mod config;

mod engine;
mod error;
mod layout;
mod schedule;
mod structure;

pub use halo_core::{geometry, identifier, semantic};

pub use engine::{LayoutEngine, LayoutEngineBuilder};
pub use error::HaloError;
pub use layout::{Position, PositionMap, layout_bounds};
