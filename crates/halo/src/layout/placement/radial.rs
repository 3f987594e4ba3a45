//! Radial placement for statement, question and other views
//!
//! Each satellite group reserves an equal sector of the circle, in order of
//! first appearance, starting at the top of the view. Groups stack outwards
//! ring by ring so that rank alone keeps siblings apart.

use halo_core::geometry::Size;

use super::{Band, Candidate, PlacementStrategy, RingPlacer};
use crate::structure::LayoutGraph;

/// Start of the first sector, in degrees (top of the view).
const FIRST_SECTOR_OFFSET: f32 = -90.0;

/// Radial placement strategy
pub struct Placement {
    placer: RingPlacer,
}

impl Placement {
    pub(crate) fn new(placer: RingPlacer) -> Self {
        Self { placer }
    }
}

impl PlacementStrategy for Placement {
    fn place(&self, graph: &LayoutGraph<'_>, viewport: Size) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(graph.satellite_count());
        let mut outermost = None;

        let class_count = graph.classes().len();
        for (index, class) in graph.classes().iter().enumerate() {
            let band = Band::share(index, class_count, FIRST_SECTOR_OFFSET);
            let ring_start = self.placer.next_ring(outermost);
            outermost = Some(self.placer.place_class(class, ring_start, band, &mut out));
        }

        self.placer
            .place_navigation(graph.navigation(), outermost, viewport, &mut out);
        out
    }
}
