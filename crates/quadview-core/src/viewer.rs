//! The synchronized four-pane viewer, independent of any UI toolkit.
//!
//! Owns the one [`ViewStore`], the set catalog, the pane slots and the redraw
//! throttle. Every state change requests a redraw; the caller drives the
//! throttle clock with [`Viewer::tick`] and paints [`Viewer::frame`].

use std::time::Instant;

use crate::catalog::{Direction, SetCatalog};
use crate::config::ViewerConfig;
use crate::interaction::{Interaction, Outcome, SurfaceSize, ViewerKey};
use crate::pane::ImageDimensions;
use crate::pipeline::{Applied, LoadEvent, LoadPipeline, LoadStatus};
use crate::render::{plan_frame, FramePlan};
use crate::throttle::RedrawThrottle;
use crate::token::LoadToken;
use crate::view::{SurfacePoint, ViewState, ViewStore};

/// A set load the caller must run (see [`crate::pipeline::run_set_load`]).
#[derive(Clone, Debug)]
pub struct LoadRequest {
    pub token: LoadToken,
    pub set: String,
}

pub struct Viewer {
    view: ViewStore,
    catalog: SetCatalog,
    pipeline: LoadPipeline,
    throttle: RedrawThrottle,
    interaction: Interaction,
    frame: FramePlan,
    frames_painted: u64,
}

impl Viewer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            view: ViewStore::new(config.view.zoom_limits(), config.layout.aspect_ratio()),
            catalog: SetCatalog::default(),
            pipeline: LoadPipeline::new(),
            throttle: RedrawThrottle::new(config.view.redraw_interval()),
            interaction: Interaction::new(config.view.zoom_step),
            frame: FramePlan::default(),
            frames_painted: 0,
        }
    }

    pub fn view_state(&self) -> ViewState {
        self.view.state()
    }

    pub fn catalog(&self) -> &SetCatalog {
        &self.catalog
    }

    pub fn pipeline(&self) -> &LoadPipeline {
        &self.pipeline
    }

    pub fn status(&self) -> &LoadStatus {
        self.pipeline.status()
    }

    pub fn reference_dims(&self) -> Option<ImageDimensions> {
        self.pipeline.reference_dims()
    }

    pub fn output_aspect(&self) -> f64 {
        self.view.output_aspect()
    }

    /// The most recently painted plan.
    pub fn frame(&self) -> &FramePlan {
        &self.frame
    }

    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    /// When the throttle's pending trailing paint is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.throttle.next_deadline()
    }

    // --- set navigation ---

    /// Replace the catalog.
    ///
    /// The current set stays selected, without reloading, when the new
    /// catalog still lists it. Otherwise the first set starts loading, or
    /// the viewer is cleared when the catalog is empty.
    pub fn set_catalog(&mut self, sets: Vec<String>, now: Instant) -> Option<LoadRequest> {
        let previous = self.catalog.current().map(str::to_string);
        self.catalog = SetCatalog::new(sets);

        if let Some(id) = previous {
            if self.catalog.select_id(&id).is_some() {
                return None;
            }
        }
        if let Some(set) = self.catalog.select(0) {
            let set = set.to_string();
            return Some(self.begin_load(set, now));
        }

        self.pipeline.cancel();
        self.view.reset_to_default();
        self.interaction.pointer_up();
        self.paint();
        self.throttle.request(now);
        None
    }

    pub fn navigate(&mut self, direction: Direction, now: Instant) -> Option<LoadRequest> {
        let set = self.catalog.step(direction)?.to_string();
        Some(self.begin_load(set, now))
    }

    pub fn select(&mut self, index: usize, now: Instant) -> Option<LoadRequest> {
        let set = self.catalog.select(index)?.to_string();
        Some(self.begin_load(set, now))
    }

    /// Load the current set again from scratch.
    pub fn reload(&mut self, now: Instant) -> Option<LoadRequest> {
        let set = self.catalog.current()?.to_string();
        Some(self.begin_load(set, now))
    }

    fn begin_load(&mut self, set: String, now: Instant) -> LoadRequest {
        let token = self.pipeline.begin(&set);
        self.view.reset_to_default();
        self.interaction.pointer_up();
        // The cleared grid is painted immediately, outside the throttle.
        self.paint();
        self.throttle.request(now);
        LoadRequest { token, set }
    }

    // --- pipeline results ---

    pub fn apply(&mut self, event: LoadEvent, now: Instant) -> Applied {
        let applied = self.pipeline.apply(event);
        if matches!(applied, Applied::Pane(_) | Applied::Status) {
            self.request_redraw(now);
        }
        applied
    }

    // --- input ---

    pub fn pointer_down(&mut self, pos: [f64; 2]) {
        self.interaction.pointer_down(pos, &self.view);
    }

    pub fn pointer_move(&mut self, pos: [f64; 2], surface: SurfaceSize, now: Instant) -> bool {
        let reference = self.reference_dims();
        let outcome = self
            .interaction
            .pointer_move(pos, surface, &mut self.view, reference);
        self.after_view_outcome(outcome, now)
    }

    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.is_dragging()
    }

    pub fn wheel(
        &mut self,
        delta_y: f64,
        pos: [f64; 2],
        surface: SurfaceSize,
        now: Instant,
    ) -> bool {
        let reference = self.reference_dims();
        let outcome = self
            .interaction
            .wheel(delta_y, pos, surface, &mut self.view, reference);
        self.after_view_outcome(outcome, now)
    }

    /// Handle a key. Returns a load request when the key navigated to another set.
    pub fn key(&mut self, key: ViewerKey, now: Instant) -> Option<LoadRequest> {
        let reference = self.reference_dims();
        match self.interaction.key(key, &mut self.view, reference) {
            Outcome::Navigate(direction) => self.navigate(direction, now),
            outcome => {
                self.after_view_outcome(outcome, now);
                None
            }
        }
    }

    /// Zoom by `factor` (> 1 zooms in), optionally anchored at a surface point.
    pub fn zoom(&mut self, factor: f64, anchor: Option<SurfacePoint>, now: Instant) -> bool {
        let reference = self.reference_dims();
        let changed = self.view.set_zoom(factor, anchor, reference);
        if changed {
            self.request_redraw(now);
        }
        changed
    }

    pub fn reset_view(&mut self, now: Instant) {
        self.view.reset_to_default();
        self.request_redraw(now);
    }

    fn after_view_outcome(&mut self, outcome: Outcome, now: Instant) -> bool {
        let changed = outcome == Outcome::ViewChanged;
        if changed {
            self.request_redraw(now);
        }
        changed
    }

    // --- rendering ---

    pub fn request_redraw(&mut self, now: Instant) {
        if self.throttle.request(now) {
            self.paint();
        }
    }

    /// Advance the throttle clock; paints if a trailing redraw is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self.throttle.poll(now);
        if due {
            self.paint();
        }
        due
    }

    fn paint(&mut self) {
        self.frame = plan_frame(
            self.pipeline.panes(),
            &self.view.state(),
            self.view.output_aspect(),
        );
        self.frames_painted += 1;
    }
}
