//! The layout engine owned by one graph view.
//!
//! [`LayoutEngine`] keeps the view state (viewport, view type, preview flag and
//! per-node overrides) and turns graph data sets into [`PositionMap`]s. State
//! setters never recompute anything; the next [`LayoutEngine::update_layout`]
//! call reflects them, so a caller can batch a mode flip with a data change.

use std::collections::HashMap;

use log::{debug, info, warn};

use halo_core::{
    geometry::{Point, Size},
    identifier::Id,
    semantic::{GraphData, NodeMode, ViewType},
};

use crate::{
    HaloError,
    config::AppConfig,
    layout::{
        Position, PositionMap,
        placement::{self, Candidate},
        scale::ScaleRule,
        separation::SeparationResolver,
    },
    schedule::FrameScheduler,
    structure::LayoutGraph,
};

/// Computes vote-weighted radial layouts for one graph view.
///
/// # Examples
///
/// ```
/// use halo::{
///     LayoutEngine,
///     semantic::{GraphData, GraphNode, NodeGroup},
/// };
///
/// let mut engine = LayoutEngine::new(1000.0, 800.0, "word", false);
/// let data = GraphData::default()
///     .with_node(GraphNode::new("word-1", NodeGroup::Central))
///     .with_node(GraphNode::new("def-1", NodeGroup::LiveDefinition).with_votes(4, 1));
///
/// let positions = engine.update_layout(&data)?;
/// assert_eq!(positions.len(), 2);
/// assert_eq!(positions[0].transform(), "translate(0,0)");
/// # Ok::<(), halo::HaloError>(())
/// ```
#[derive(Debug)]
pub struct LayoutEngine {
    viewport: Size,
    view_type: ViewType,
    is_preview_mode: bool,
    definition_modes: HashMap<Id, NodeMode>,
    config: AppConfig,
    scheduler: FrameScheduler,
    positions: Option<PositionMap>,
}

impl LayoutEngine {
    /// Creates an engine with the default configuration.
    ///
    /// No positions exist until the first [`update_layout`](Self::update_layout).
    pub fn new(
        width: f32,
        height: f32,
        view_type: impl Into<ViewType>,
        is_preview_mode: bool,
    ) -> Self {
        Self::with_config(
            Size::new(width, height),
            view_type.into(),
            is_preview_mode,
            AppConfig::default(),
        )
    }

    /// Starts a builder for an engine with a custom configuration.
    pub fn builder(width: f32, height: f32, view_type: impl Into<ViewType>) -> LayoutEngineBuilder {
        LayoutEngineBuilder {
            viewport: Size::new(width, height),
            view_type: view_type.into(),
            is_preview_mode: false,
            config: AppConfig::default(),
        }
    }

    fn with_config(
        viewport: Size,
        view_type: ViewType,
        is_preview_mode: bool,
        config: AppConfig,
    ) -> Self {
        debug!(
            width = viewport.width(),
            height = viewport.height(),
            view = view_type.as_str(),
            is_preview_mode;
            "Layout engine created"
        );
        Self {
            viewport,
            view_type,
            is_preview_mode,
            definition_modes: HashMap::new(),
            config,
            scheduler: FrameScheduler::default(),
            positions: None,
        }
    }

    /// Lays out `data` and returns one position per node, in input order.
    ///
    /// The central node sits at the origin with scale 1.0. Satellites are
    /// placed by vote rank, pushed apart to the minimum separation and scaled
    /// for the current preview and detail modes. The result is also retained,
    /// see [`positions`](Self::positions).
    ///
    /// # Errors
    ///
    /// - [`HaloError::Stopped`] after [`stop`](Self::stop).
    /// - A validation error naming the offending node when `data` is empty,
    ///   lacks a single central node, repeats an id or has a dangling edge.
    ///
    /// A failed call leaves the retained layout untouched.
    pub fn update_layout(&mut self, data: &GraphData) -> Result<PositionMap, HaloError> {
        if self.is_stopped() {
            warn!("Layout requested after stop");
            return Err(HaloError::Stopped);
        }

        let graph = LayoutGraph::from_data(data)?;
        info!(
            view = self.view_type.as_str(),
            node_count = data.nodes().len(),
            is_preview_mode = self.is_preview_mode;
            "Computing layout"
        );

        let strategy = placement::strategy_for(&self.view_type, self.config.layout());
        let mut candidates = strategy.place(&graph, self.viewport);
        let resolution = SeparationResolver::new(self.config.layout()).resolve(&mut candidates);

        let positions = self.finish(data, &candidates)?;
        info!(
            node_count = positions.len(),
            satellite_count = graph.satellite_count(),
            passes = resolution.passes(),
            violations = resolution.violations();
            "Layout complete"
        );

        self.positions = Some(positions.clone());
        Ok(positions)
    }

    /// Scales the resolved candidates into the final map, in input order.
    fn finish(
        &self,
        data: &GraphData,
        candidates: &[Candidate],
    ) -> Result<PositionMap, HaloError> {
        let points: HashMap<Id, Point> = candidates
            .iter()
            .map(|candidate| (candidate.id(), candidate.point()))
            .collect();
        let rule = ScaleRule::new(self.config.scale());

        let mut positions = PositionMap::with_capacity(data.nodes().len());
        for node in data.nodes() {
            let id = node.id();
            let position = if node.group().is_central() {
                Position::new(Point::default(), 1.0)
            } else {
                let point = points.get(&id).copied().ok_or_else(|| {
                    HaloError::Layout(format!("no placement produced for node `{id}`"))
                })?;
                let mode = self.definition_modes.get(&id).copied();
                Position::new(point, rule.scale_for(mode, self.is_preview_mode))
            };
            positions.insert(id, position);
        }
        Ok(positions)
    }

    /// Sets the global preview flag for later layouts.
    pub fn update_preview_mode(&mut self, is_preview_mode: bool) {
        if self.ignore_after_stop("update_preview_mode") {
            return;
        }
        debug!(is_preview_mode; "Preview mode updated");
        self.is_preview_mode = is_preview_mode;
    }

    /// Replaces every per-node mode override for later layouts.
    ///
    /// Overrides for ids absent from a later data set are ignored.
    pub fn update_definition_modes(&mut self, modes: HashMap<Id, NodeMode>) {
        if self.ignore_after_stop("update_definition_modes") {
            return;
        }
        debug!(override_count = modes.len(); "Definition modes updated");
        self.definition_modes = modes;
    }

    /// Sets the viewport size used by later layouts.
    ///
    /// Already returned positions are not moved.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.ignore_after_stop("resize") {
            return;
        }
        debug!(width, height; "Viewport resized");
        self.viewport = Size::new(width, height);
    }

    /// Queues `data` to be laid out at the caller's next frame boundary.
    ///
    /// A later call replaces data that has not run yet.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::Stopped`] after [`stop`](Self::stop).
    pub fn schedule_layout(&mut self, data: GraphData) -> Result<(), HaloError> {
        if self.is_stopped() {
            warn!("Layout scheduled after stop");
            return Err(HaloError::Stopped);
        }
        let replaced = self.scheduler.schedule(data);
        debug!(replaced; "Layout scheduled");
        Ok(())
    }

    /// Whether scheduled data is waiting for [`run_scheduled`](Self::run_scheduled).
    pub fn has_pending(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Runs the pending scheduled layout, if any.
    ///
    /// Returns `Ok(None)` when nothing is pending, including after
    /// [`stop`](Self::stop).
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`update_layout`](Self::update_layout).
    pub fn run_scheduled(&mut self) -> Result<Option<PositionMap>, HaloError> {
        match self.scheduler.take() {
            Some(data) => self.update_layout(&data).map(Some),
            None => Ok(None),
        }
    }

    /// Cancels scheduled work and refuses later updates. Idempotent.
    pub fn stop(&mut self) {
        if self.scheduler.stop() {
            info!(view = self.view_type.as_str(); "Layout engine stopped");
        } else {
            debug!("Layout engine already stopped");
        }
    }

    fn ignore_after_stop(&self, operation: &str) -> bool {
        if self.is_stopped() {
            warn!(operation; "Ignoring update after stop");
        }
        self.is_stopped()
    }

    pub fn width(&self) -> f32 {
        self.viewport.width()
    }

    pub fn height(&self) -> f32 {
        self.viewport.height()
    }

    pub fn view_type(&self) -> &ViewType {
        &self.view_type
    }

    pub fn is_preview_mode(&self) -> bool {
        self.is_preview_mode
    }

    /// Current per-node mode overrides.
    pub fn definition_modes(&self) -> &HashMap<Id, NodeMode> {
        &self.definition_modes
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_stopped(&self) -> bool {
        self.scheduler.is_stopped()
    }

    /// The last successfully computed layout.
    pub fn positions(&self) -> Option<&PositionMap> {
        self.positions.as_ref()
    }
}

/// Builder for a [`LayoutEngine`] with non-default settings.
///
/// # Examples
///
/// ```
/// use halo::{
///     LayoutEngine,
///     config::{AppConfig, LayoutConfig, ScaleConfig},
/// };
///
/// let layout = LayoutConfig::default().with_rank_increment(200.0);
/// let engine = LayoutEngine::builder(1200.0, 900.0, "statement")
///     .preview_mode(true)
///     .config(AppConfig::new(layout, ScaleConfig::default()))
///     .build()?;
///
/// assert!(engine.is_preview_mode());
/// # Ok::<(), halo::HaloError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LayoutEngineBuilder {
    viewport: Size,
    view_type: ViewType,
    is_preview_mode: bool,
    config: AppConfig,
}

impl LayoutEngineBuilder {
    /// Start in global preview mode
    pub fn preview_mode(mut self, is_preview_mode: bool) -> Self {
        self.is_preview_mode = is_preview_mode;
        self
    }

    /// Use `config` instead of the defaults
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the configuration and creates the engine.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::Config`] when a configuration value is unusable.
    pub fn build(self) -> Result<LayoutEngine, HaloError> {
        self.config.validate()?;
        Ok(LayoutEngine::with_config(
            self.viewport,
            self.view_type,
            self.is_preview_mode,
            self.config,
        ))
    }
}
