//! Configuration types for Halo layouts.
//!
//! This module provides configuration structures that control how satellites
//! are placed, spaced and scaled. All types implement [`serde::Deserialize`]
//! with every field defaulted, so a configuration file only needs to list the
//! values it overrides.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and scale settings.
//! - [`LayoutConfig`] - Radii, spacing and relaxation limits.
//! - [`ScaleConfig`] - Node scale factors for preview and detail modes.
//!
//! # Example
//!
//! ```
//! # use halo::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().min_separation(), 150.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use crate::HaloError;

/// Top-level configuration combining layout and scale settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Scale configuration section.
    #[serde(default)]
    scale: ScaleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and scale configurations.
    pub fn new(layout: LayoutConfig, scale: ScaleConfig) -> Self {
        Self { layout, scale }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the scale configuration.
    pub fn scale(&self) -> &ScaleConfig {
        &self.scale
    }

    /// Checks that every value is usable by the engine.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::Config`] naming the first offending value.
    pub fn validate(&self) -> Result<(), HaloError> {
        self.layout.validate()?;
        self.scale.validate()
    }
}

/// Radii, spacing and relaxation limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum distance between any two satellites.
    min_separation: f32,

    /// Distance of the innermost ring from the central node.
    base_radius: f32,

    /// Radial step between consecutive vote ranks.
    rank_increment: f32,

    /// Upper bound on relaxation passes.
    max_passes: usize,

    /// Share of a separation correction taken by the node farther from the centre.
    far_share: f32,

    /// Navigation ring radius as a fraction of half the smaller viewport side.
    navigation_ring_fraction: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_separation: 150.0,
            base_radius: 260.0,
            rank_increment: 150.0,
            max_passes: 200,
            far_share: 0.75,
            navigation_ring_fraction: 0.9,
        }
    }
}

impl LayoutConfig {
    pub fn min_separation(&self) -> f32 {
        self.min_separation
    }

    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    pub fn rank_increment(&self) -> f32 {
        self.rank_increment
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    pub fn far_share(&self) -> f32 {
        self.far_share
    }

    pub fn navigation_ring_fraction(&self) -> f32 {
        self.navigation_ring_fraction
    }

    /// Set the minimum distance between satellites
    pub fn with_min_separation(mut self, distance: f32) -> Self {
        self.min_separation = distance;
        self
    }

    /// Set the radius of the innermost ring
    pub fn with_base_radius(mut self, radius: f32) -> Self {
        self.base_radius = radius;
        self
    }

    /// Set the radial step between vote ranks
    pub fn with_rank_increment(mut self, increment: f32) -> Self {
        self.rank_increment = increment;
        self
    }

    /// Set the relaxation pass cap
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes;
        self
    }

    /// Set the correction share of the farther node
    pub fn with_far_share(mut self, share: f32) -> Self {
        self.far_share = share;
        self
    }

    /// Set the navigation ring fraction of the viewport
    pub fn with_navigation_ring_fraction(mut self, fraction: f32) -> Self {
        self.navigation_ring_fraction = fraction;
        self
    }

    fn validate(&self) -> Result<(), HaloError> {
        for (name, value) in [
            ("min_separation", self.min_separation),
            ("base_radius", self.base_radius),
            ("rank_increment", self.rank_increment),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(HaloError::Config(format!(
                    "layout.{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.max_passes == 0 {
            return Err(HaloError::Config(
                "layout.max_passes must be at least 1".to_string(),
            ));
        }
        if !(0.5..=1.0).contains(&self.far_share) {
            return Err(HaloError::Config(format!(
                "layout.far_share must be within [0.5, 1.0], got {}",
                self.far_share
            )));
        }
        if !(self.navigation_ring_fraction.is_finite() && self.navigation_ring_fraction >= 0.0) {
            return Err(HaloError::Config(format!(
                "layout.navigation_ring_fraction must be non-negative, got {}",
                self.navigation_ring_fraction
            )));
        }
        Ok(())
    }
}

/// Node scale factors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Scale of satellites while the whole view is in preview mode.
    preview_scale: f32,

    /// Scale of a satellite in individual detail mode.
    detail_scale: f32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            preview_scale: 0.6,
            detail_scale: 1.5,
        }
    }
}

impl ScaleConfig {
    /// Creates a new [`ScaleConfig`].
    ///
    /// # Arguments
    ///
    /// * `preview_scale` - Satellite scale in global preview mode, within `(0, 1)`.
    /// * `detail_scale` - Scale of a node in detail mode, greater than 1.
    pub fn new(preview_scale: f32, detail_scale: f32) -> Self {
        Self {
            preview_scale,
            detail_scale,
        }
    }

    pub fn preview_scale(&self) -> f32 {
        self.preview_scale
    }

    pub fn detail_scale(&self) -> f32 {
        self.detail_scale
    }

    fn validate(&self) -> Result<(), HaloError> {
        if !(self.preview_scale > 0.0 && self.preview_scale < 1.0) {
            return Err(HaloError::Config(format!(
                "scale.preview_scale must be within (0, 1), got {}",
                self.preview_scale
            )));
        }
        if !(self.detail_scale.is_finite() && self.detail_scale > 1.0) {
            return Err(HaloError::Config(format!(
                "scale.detail_scale must be greater than 1, got {}",
                self.detail_scale
            )));
        }
        Ok(())
    }
}
