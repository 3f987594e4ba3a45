//! Display scale of satellites.

use halo_core::semantic::NodeMode;

use crate::config::ScaleConfig;

/// Maps global preview state and per-node overrides to a scale factor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScaleRule {
    preview_scale: f32,
    detail_scale: f32,
}

impl ScaleRule {
    pub(crate) fn new(config: &ScaleConfig) -> Self {
        Self {
            preview_scale: config.preview_scale(),
            detail_scale: config.detail_scale(),
        }
    }

    /// Scale of a satellite.
    ///
    /// A detail override stays above 1.0 in preview mode, shrinking its
    /// enlargement by the preview factor. A preview override follows the
    /// global mode. The central node is not scaled and never reaches here.
    pub(crate) fn scale_for(&self, mode: Option<NodeMode>, preview: bool) -> f32 {
        match (mode, preview) {
            (Some(NodeMode::Detail), false) => self.detail_scale,
            (Some(NodeMode::Detail), true) => {
                1.0 + (self.detail_scale - 1.0) * self.preview_scale
            }
            (_, true) => self.preview_scale,
            (_, false) => 1.0,
        }
    }
}
