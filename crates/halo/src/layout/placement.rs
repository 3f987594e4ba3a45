//! Placement strategies
//!
//! A strategy turns the validated graph into one [`Candidate`] per satellite:
//! an initial position chosen from the node's group and vote rank. The
//! separation resolver refines these candidates afterwards.
//!
//! Both strategies share the ring rules implemented by [`RingPlacer`]: rank
//! `r` of a class sits at `ring_start + r * rank_increment`, classes stack
//! outwards one increment apart, and navigation nodes form the outermost ring.

mod radial;
mod word;

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use log::trace;

use halo_core::{
    geometry::{Point, Size},
    identifier::Id,
    semantic::{GraphNode, NodeGroup, ViewType},
};

use crate::{
    config::LayoutConfig,
    structure::{LayoutGraph, SatelliteClass},
};

pub(crate) use radial::Placement as RadialPlacement;
pub(crate) use word::Placement as WordPlacement;

/// Trait implemented by every placement variant
pub(crate) trait PlacementStrategy {
    /// Place every satellite of `graph`; the central node is not included.
    ///
    /// - `viewport`: current viewport size, bounding viewport-relative rings.
    fn place(&self, graph: &LayoutGraph<'_>, viewport: Size) -> Vec<Candidate>;
}

/// Select the placement strategy for a view.
pub(crate) fn strategy_for(
    view_type: &ViewType,
    config: &LayoutConfig,
) -> Box<dyn PlacementStrategy> {
    let placer = RingPlacer::new(config);
    match view_type {
        ViewType::Word => Box::new(WordPlacement::new(placer)),
        ViewType::Statement | ViewType::OpenQuestion | ViewType::Other(_) => {
            Box::new(RadialPlacement::new(placer))
        }
    }
}

/// Initial position of one satellite.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    id: Id,
    group: NodeGroup,
    rank: usize,
    angle: f32,
    point: Point,
}

impl Candidate {
    pub(crate) fn id(&self) -> Id {
        self.id
    }

    pub(crate) fn group(&self) -> NodeGroup {
        self.group
    }

    /// Position within the class ranking; input order for navigation nodes.
    pub(crate) fn rank(&self) -> usize {
        self.rank
    }

    /// Angle the node was placed at, in radians.
    pub(crate) fn angle(&self) -> f32 {
        self.angle
    }

    pub(crate) fn point(&self) -> Point {
        self.point
    }

    pub(crate) fn set_point(&mut self, point: Point) {
        self.point = point;
    }
}

/// Angular sector reserved for one class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Band {
    start: f32,
    span: f32,
}

impl Band {
    /// Create a band from angles in degrees
    pub(crate) fn from_degrees(start: f32, span: f32) -> Self {
        Self {
            start: start.to_radians(),
            span: span.to_radians(),
        }
    }

    /// The `index`-th of `count` sectors evenly dividing the full circle,
    /// starting at `offset` degrees.
    pub(crate) fn share(index: usize, count: usize, offset: f32) -> Self {
        let span = TAU / count.max(1) as f32;
        Self {
            start: offset.to_radians() + index as f32 * span,
            span,
        }
    }

    /// Angle of `index` among `count` nodes spread over the band.
    ///
    /// A lone node sits at the band start.
    pub(crate) fn angle(self, index: usize, count: usize) -> f32 {
        self.start + index as f32 * self.span / count.max(1) as f32
    }
}

/// Ring geometry shared by the strategies.
#[derive(Debug, Clone)]
pub(crate) struct RingPlacer {
    base_radius: f32,
    rank_increment: f32,
    min_separation: f32,
    navigation_ring_fraction: f32,
}

impl RingPlacer {
    pub(crate) fn new(config: &LayoutConfig) -> Self {
        Self {
            base_radius: config.base_radius(),
            rank_increment: config.rank_increment(),
            min_separation: config.min_separation(),
            navigation_ring_fraction: config.navigation_ring_fraction(),
        }
    }

    /// Ring where the next class starts, given the outermost ring used so far.
    pub(crate) fn next_ring(&self, outermost: Option<f32>) -> f32 {
        outermost.map_or(self.base_radius, |radius| radius + self.rank_increment)
    }

    /// Place a ranked class on consecutive rings starting at `ring_start`.
    ///
    /// Returns the radius of the outermost ring used.
    pub(crate) fn place_class(
        &self,
        class: &SatelliteClass<'_>,
        ring_start: f32,
        band: Band,
        out: &mut Vec<Candidate>,
    ) -> f32 {
        let count = class.len();
        for (rank, node) in class.ranked().iter().enumerate() {
            let radius = ring_start + rank as f32 * self.rank_increment;
            let angle = band.angle(rank, count);
            out.push(self.candidate(node, rank, radius, angle));
        }
        ring_start + count.saturating_sub(1) as f32 * self.rank_increment
    }

    /// Place navigation nodes evenly on the outermost ring, starting at the top.
    pub(crate) fn place_navigation(
        &self,
        nodes: &[&GraphNode],
        outermost: Option<f32>,
        viewport: Size,
        out: &mut Vec<Candidate>,
    ) {
        if nodes.is_empty() {
            return;
        }
        let radius = self.navigation_radius(nodes.len(), outermost, viewport);
        let band = Band {
            start: -FRAC_PI_2,
            span: TAU,
        };
        for (index, node) in nodes.iter().enumerate() {
            out.push(self.candidate(node, index, radius, band.angle(index, nodes.len())));
        }
    }

    /// Radius of the navigation ring.
    ///
    /// The ring clears the ranked rings by one increment, reaches the
    /// viewport-relative radius, and is wide enough for adjacent navigation
    /// nodes to keep the minimum separation.
    pub(crate) fn navigation_radius(
        &self,
        count: usize,
        outermost: Option<f32>,
        viewport: Size,
    ) -> f32 {
        let viewport_radius = viewport.min_dimension() / 2.0 * self.navigation_ring_fraction;
        let chord_radius = if count > 1 {
            self.min_separation / (2.0 * (PI / count as f32).sin())
        } else {
            0.0
        };
        self.next_ring(outermost)
            .max(viewport_radius)
            .max(chord_radius)
    }

    fn candidate(&self, node: &GraphNode, rank: usize, radius: f32, angle: f32) -> Candidate {
        let point = Point::from_polar(radius, angle);
        trace!(
            id:? = node.id(),
            group = node.group().as_str(),
            rank,
            radius,
            angle;
            "Placed satellite candidate"
        );
        Candidate {
            id: node.id(),
            group: node.group(),
            rank,
            angle,
            point,
        }
    }
}
