//! Word-view placement
//!
//! The live definition sits on the innermost ring, slightly right of the
//! word. Alternative definitions fan out over the lower-left sector on the
//! rings beyond it, closest first by vote rank. Any other satellite group
//! shares the full circle further out, and navigation closes the layout.

use halo_core::{geometry::Size, semantic::NodeGroup};

use super::{Band, Candidate, PlacementStrategy, RingPlacer};
use crate::structure::{LayoutGraph, SatelliteClass};

/// Word-view placement strategy
pub struct Placement {
    placer: RingPlacer,
    live_band: Band,
    alternative_band: Band,
}

impl Placement {
    pub(crate) fn new(placer: RingPlacer) -> Self {
        Self {
            placer,
            live_band: Band::from_degrees(0.0, 60.0),
            alternative_band: Band::from_degrees(90.0, 240.0),
        }
    }
}

impl PlacementStrategy for Placement {
    fn place(&self, graph: &LayoutGraph<'_>, viewport: Size) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(graph.satellite_count());
        let mut outermost = None;

        let live = graph
            .classes()
            .iter()
            .find(|class| class.group() == NodeGroup::LiveDefinition);
        let alternative = graph
            .classes()
            .iter()
            .find(|class| class.group() == NodeGroup::AlternativeDefinition);

        for (class, band) in [(live, self.live_band), (alternative, self.alternative_band)] {
            if let Some(class) = class {
                let ring_start = self.placer.next_ring(outermost);
                outermost = Some(self.placer.place_class(class, ring_start, band, &mut out));
            }
        }

        let others: Vec<&SatelliteClass<'_>> = graph
            .classes()
            .iter()
            .filter(|class| {
                !matches!(
                    class.group(),
                    NodeGroup::LiveDefinition | NodeGroup::AlternativeDefinition
                )
            })
            .collect();
        for (index, class) in others.iter().enumerate() {
            let band = Band::share(index, others.len(), 0.0);
            let ring_start = self.placer.next_ring(outermost);
            outermost = Some(self.placer.place_class(class, ring_start, band, &mut out));
        }

        self.placer
            .place_navigation(graph.navigation(), outermost, viewport, &mut out);
        out
    }
}
