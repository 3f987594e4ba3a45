//! Separation resolver
//!
//! Iterative relaxation that pushes satellites apart until every pair is at
//! least `min_separation` apart. The node farther from the centre absorbs the
//! larger share of each correction, and after every pass the radial order of
//! each vote-ranked class is restored, so relaxation never reorders siblings.
//!
//! Separation is best effort: when the pass cap is reached the closest
//! configuration found is kept. Radial order is always restored.

use std::{collections::HashMap, f32::consts::FRAC_PI_2};

use log::{debug, warn};

use halo_core::{geometry::Point, semantic::NodeGroup};

use super::placement::Candidate;
use crate::config::LayoutConfig;

/// Distances within this tolerance of the minimum count as separated.
const TOLERANCE: f32 = 1e-3;

/// Extra distance added to each correction so float rounding cannot leave a
/// pair just short of the minimum.
const SLACK: f32 = 1e-2;

/// Radii closer than this count as equal when sharing a correction.
const RADIUS_EPSILON: f32 = 1e-4;

/// Outcome of a resolver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolution {
    passes: usize,
    violations: usize,
}

impl Resolution {
    /// Number of relaxation passes run.
    pub(crate) fn passes(&self) -> usize {
        self.passes
    }

    /// Pairs still closer than the minimum separation.
    pub(crate) fn violations(&self) -> usize {
        self.violations
    }
}

/// Separation resolver configured from [`LayoutConfig`].
#[derive(Debug, Clone)]
pub(crate) struct SeparationResolver {
    min_separation: f32,
    max_passes: usize,
    far_share: f32,
}

impl SeparationResolver {
    pub(crate) fn new(config: &LayoutConfig) -> Self {
        Self {
            min_separation: config.min_separation(),
            max_passes: config.max_passes(),
            far_share: config.far_share(),
        }
    }

    /// Relax `candidates` in place.
    pub(crate) fn resolve(&self, candidates: &mut [Candidate]) -> Resolution {
        let classes = ranked_classes(candidates);
        let mut passes = 0;

        let mut violations = self.count_violations(candidates);
        while violations > 0 && passes < self.max_passes {
            self.relax(candidates);
            restore_radial_order(candidates, &classes);
            passes += 1;
            violations = self.count_violations(candidates);
        }

        if violations > 0 {
            warn!(
                passes,
                violations,
                min_separation = self.min_separation;
                "Separation not satisfiable within pass budget, keeping best effort"
            );
        } else {
            debug!(passes; "Separation resolved");
        }

        Resolution { passes, violations }
    }

    fn is_violation(&self, distance: f32) -> bool {
        distance < self.min_separation - TOLERANCE
    }

    fn count_violations(&self, candidates: &[Candidate]) -> usize {
        let mut count = 0;
        for (i, a) in candidates.iter().enumerate() {
            for b in &candidates[i + 1..] {
                if self.is_violation(a.point().distance_to(b.point())) {
                    count += 1;
                }
            }
        }
        count
    }

    /// One pass over all pairs, in candidate order.
    fn relax(&self, candidates: &mut [Candidate]) {
        for i in 0..candidates.len() {
            for j in i + 1..candidates.len() {
                let (pi, pj) = (candidates[i].point(), candidates[j].point());
                let delta = pj.sub_point(pi);
                let distance = delta.hypot();
                if !self.is_violation(distance) {
                    continue;
                }

                let deficit = self.min_separation - distance + SLACK;
                // Coincident nodes separate tangentially to the second node's placement angle.
                let direction = delta
                    .normalize()
                    .unwrap_or_else(|| Point::from_polar(1.0, candidates[j].angle() + FRAC_PI_2));
                let (share_i, share_j) = self.shares(pi.hypot(), pj.hypot());

                candidates[i].set_point(pi.sub_point(direction.scale(deficit * share_i)));
                candidates[j].set_point(pj.add_point(direction.scale(deficit * share_j)));
            }
        }
    }

    /// Correction shares of a pair, the farther node taking `far_share`.
    fn shares(&self, radius_i: f32, radius_j: f32) -> (f32, f32) {
        let near_share = 1.0 - self.far_share;
        if radius_j > radius_i + RADIUS_EPSILON {
            (near_share, self.far_share)
        } else if radius_i > radius_j + RADIUS_EPSILON {
            (self.far_share, near_share)
        } else {
            (0.5, 0.5)
        }
    }
}

/// Candidate indices of each vote-ranked class, ordered by rank.
fn ranked_classes(candidates: &[Candidate]) -> Vec<Vec<usize>> {
    let mut by_group: HashMap<NodeGroup, usize> = HashMap::new();
    let mut classes: Vec<Vec<usize>> = Vec::new();

    for (index, candidate) in candidates.iter().enumerate() {
        if candidate.group().is_navigation() {
            continue;
        }
        let slot = *by_group.entry(candidate.group()).or_insert_with(|| {
            classes.push(Vec::new());
            classes.len() - 1
        });
        classes[slot].push(index);
    }

    for class in &mut classes {
        class.sort_by_key(|&index| candidates[index].rank());
    }
    classes
}

/// Push any node closer to the centre than its better-ranked sibling out to
/// the sibling's radius, along its own ray.
fn restore_radial_order(candidates: &mut [Candidate], classes: &[Vec<usize>]) {
    for class in classes {
        for pair in class.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let prev_radius = candidates[prev].point().hypot();
            let point = candidates[next].point();
            if point.hypot() < prev_radius {
                let angle = candidates[next].angle();
                candidates[next].set_point(point.with_radius(prev_radius, angle));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use halo_core::{
        geometry::Size,
        semantic::{GraphData, GraphNode},
    };

    use super::*;
    use crate::{
        layout::placement::{PlacementStrategy, RadialPlacement, RingPlacer, WordPlacement},
        structure::LayoutGraph,
    };

    fn min_pairwise(candidates: &[Candidate]) -> f32 {
        let mut min = f32::MAX;
        for (i, a) in candidates.iter().enumerate() {
            for b in &candidates[i + 1..] {
                min = min.min(a.point().distance_to(b.point()));
            }
        }
        min
    }

    fn assert_ranked_outwards(candidates: &[Candidate]) {
        for class in ranked_classes(candidates) {
            for pair in class.windows(2) {
                let inner = candidates[pair[0]].point().hypot();
                let outer = candidates[pair[1]].point().hypot();
                assert!(
                    inner <= outer + TOLERANCE,
                    "rank order broken: {inner} > {outer}"
                );
            }
        }
    }

    fn alternatives(count: usize) -> GraphData {
        let mut data = GraphData::default().with_node(GraphNode::new("word", NodeGroup::Central));
        for i in 0..count {
            data = data.with_node(
                GraphNode::new(format!("alt-{i}"), NodeGroup::AlternativeDefinition)
                    .with_votes((count - i) as i64, 0),
            );
        }
        data
    }

    #[test]
    fn test_already_separated_runs_no_pass() {
        let config = LayoutConfig::default();
        let data = alternatives(4);
        let graph = LayoutGraph::from_data(&data).unwrap();
        let mut candidates = WordPlacement::new(RingPlacer::new(&config))
            .place(&graph, Size::new(1000.0, 800.0));
        let before: Vec<Point> = candidates.iter().map(Candidate::point).collect();

        let resolution = SeparationResolver::new(&config).resolve(&mut candidates);

        assert_eq!(resolution.passes(), 0);
        assert_eq!(resolution.violations(), 0);
        let after: Vec<Point> = candidates.iter().map(Candidate::point).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_compact_rings_are_pushed_apart() {
        let config = LayoutConfig::default().with_rank_increment(40.0);
        let data = alternatives(12);
        let graph = LayoutGraph::from_data(&data).unwrap();
        let mut candidates = WordPlacement::new(RingPlacer::new(&config))
            .place(&graph, Size::new(1000.0, 800.0));
        assert!(min_pairwise(&candidates) < 150.0);

        let resolution = SeparationResolver::new(&config).resolve(&mut candidates);

        assert!(resolution.passes() > 0);
        assert_eq!(resolution.violations(), 0);
        assert!(min_pairwise(&candidates) >= 150.0 - TOLERANCE);
        assert_ranked_outwards(&candidates);
    }

    #[test]
    fn test_shared_rings_across_groups() {
        let config = LayoutConfig::default().with_rank_increment(60.0);
        let mut data = GraphData::default().with_node(GraphNode::new("s", NodeGroup::Central));
        for i in 0..5 {
            data = data
                .with_node(GraphNode::new(format!("st-{i}"), NodeGroup::Statement).with_votes(i, 0))
                .with_node(GraphNode::new(format!("c-{i}"), NodeGroup::Comment).with_votes(i, 0))
                .with_node(GraphNode::new(format!("n-{i}"), NodeGroup::Navigation));
        }
        let graph = LayoutGraph::from_data(&data).unwrap();
        let mut candidates = RadialPlacement::new(RingPlacer::new(&config))
            .place(&graph, Size::new(1000.0, 800.0));

        let resolution = SeparationResolver::new(&config).resolve(&mut candidates);

        assert_eq!(resolution.violations(), 0);
        assert!(min_pairwise(&candidates) >= 150.0 - TOLERANCE);
        assert_ranked_outwards(&candidates);
    }

    #[test]
    fn test_pass_cap_keeps_best_effort() {
        let config = LayoutConfig::default()
            .with_rank_increment(1.0)
            .with_max_passes(1);
        let data = alternatives(30);
        let graph = LayoutGraph::from_data(&data).unwrap();
        let mut candidates = WordPlacement::new(RingPlacer::new(&config))
            .place(&graph, Size::new(1000.0, 800.0));

        let resolution = SeparationResolver::new(&config).resolve(&mut candidates);

        assert_eq!(resolution.passes(), 1);
        assert!(resolution.violations() > 0);
        assert_ranked_outwards(&candidates);
        assert!(candidates.iter().all(|c| c.point().x().is_finite()));
    }

    #[test]
    fn test_coincident_pair_separates() {
        let config = LayoutConfig::default().with_rank_increment(1.0);
        let data = GraphData::default()
            .with_node(GraphNode::new("word", NodeGroup::Central))
            .with_node(GraphNode::new("a", NodeGroup::Comment))
            .with_node(GraphNode::new("b", NodeGroup::Answer));
        let graph = LayoutGraph::from_data(&data).unwrap();
        let placer = RingPlacer::new(&config);
        let mut candidates = RadialPlacement::new(placer).place(&graph, Size::default());
        let shared = candidates[0].point();
        candidates[1].set_point(shared);

        let resolution = SeparationResolver::new(&config).resolve(&mut candidates);

        assert_eq!(resolution.violations(), 0);
        assert_approx_eq!(
            f32,
            candidates[0].point().distance_to(candidates[1].point()),
            150.0 + SLACK,
            epsilon = 1e-2
        );
    }

    #[test]
    fn test_farther_node_moves_more() {
        let resolver = SeparationResolver::new(&LayoutConfig::default());
        assert_eq!(resolver.shares(100.0, 300.0), (0.25, 0.75));
        assert_eq!(resolver.shares(300.0, 100.0), (0.75, 0.25));
        assert_eq!(resolver.shares(200.0, 200.0), (0.5, 0.5));
    }
}
