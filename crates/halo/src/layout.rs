//! Layout pipeline stages and the finished position record.
//!
//! A layout runs in three stages: a [`placement`] strategy proposes a
//! candidate per satellite, the [`separation`] resolver relaxes candidates
//! until the minimum distance holds, and the [`scale`] rule assigns each node
//! its display scale. The result is a [`PositionMap`] keyed by node id.

pub(crate) mod placement;
pub(crate) mod scale;
pub(crate) mod separation;

use indexmap::IndexMap;
use serde::Serialize;

use halo_core::{
    geometry::{Bounds, Point},
    identifier::Id,
};

/// Finished layout, in input node order.
pub type PositionMap = IndexMap<Id, Position>;

/// Final placement of one node.
///
/// Coordinates are relative to the central node, which always sits at the
/// origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    x: f32,
    y: f32,
    scale: f32,
    transform: String,
}

impl Position {
    /// Creates a position and derives its transform descriptor.
    pub fn new(point: Point, scale: f32) -> Self {
        // Avoid printing `-0` in transforms.
        let x = point.x() + 0.0;
        let y = point.y() + 0.0;
        let transform = if scale == 1.0 {
            format!("translate({x},{y})")
        } else {
            format!("translate({x},{y}) scale({scale})")
        };
        Self {
            x,
            y,
            scale,
            transform,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Display scale: 1.0 normal, below 1.0 in preview, above 1.0 in detail.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Renderer-ready transform, e.g. `translate(10,20) scale(0.6)`.
    pub fn transform(&self) -> &str {
        &self.transform
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Euclidean distance between two positions.
    pub fn distance_to(&self, other: &Position) -> f32 {
        self.point().distance_to(other.point())
    }
}

/// Smallest box containing every node position, or `None` for an empty map.
///
/// Node extents are not included; callers pad the result for their node size.
pub fn layout_bounds(positions: &PositionMap) -> Option<Bounds> {
    let mut points = positions.values().map(Position::point);
    let first = Bounds::from_point(points.next()?);
    Some(points.fold(first, |bounds, point| bounds.include(point)))
}
