//! Click-to-zoom and pan state machine.
//!
//! The controller owns the group [`Transform`] and the [`InteractionMode`].
//! Which gestures it accepts is never stored: [`ZoomController::admits`]
//! derives it from the current transform and mode on every query.

use crate::animation::transitions::{Frame, Transition, TransitionSlot};
use crate::core::bounds::Bounds;
use crate::core::config::ZoomConfig;
use crate::core::geo::Point;
use crate::core::viewport::{Transform, Viewport};
use crate::input::events::{GestureKind, GestureSource, MouseButton};
use instant::Instant;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pixels of wheel delta per doubling of scale
const WHEEL_PIXELS_PER_OCTAVE: f64 = 500.0;

/// Externally toggled overlay mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Collapsed,
    Expanded,
}

/// Reported controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomState {
    Idle,
    ZoomedIn { node: usize },
    /// Expanded mode is on, whatever the zoom
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    ZoomedIn(usize),
}

/// What a cell click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    ZoomIn { node: usize },
    ZoomOut,
    /// The node has no usable position
    Ignored,
}

/// Side effect of a mode change the host has to carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    Unchanged,
    /// Lock page scrolling
    Entered,
    /// Release the scroll lock; the transform is animating back to identity
    Exited,
}

pub struct ZoomController {
    config: ZoomConfig,
    viewport: Viewport,
    positions: Vec<Point>,
    translate_extent: Bounds,
    transform: Transform,
    phase: Phase,
    mode: InteractionMode,
    transition: TransitionSlot<Transform, Phase>,
    last_tick: Option<Instant>,
}

impl ZoomController {
    pub fn new(config: ZoomConfig) -> Self {
        let viewport = Viewport::default();
        Self {
            config,
            viewport,
            positions: Vec::new(),
            translate_extent: viewport.bounds(),
            transform: Transform::identity(),
            phase: Phase::Idle,
            mode: InteractionMode::Collapsed,
            transition: TransitionSlot::new(),
            last_tick: None,
        }
    }

    /// Takes the node positions and viewport of a new layout pass.
    ///
    /// The translate extent becomes the node bounding box grown by the
    /// configured margin; with no nodes it falls back to the viewport.
    /// At low scale the extent can be smaller than the viewport, and a user
    /// gesture then centres it on that axis instead of moving by the delta.
    pub fn set_layout(&mut self, viewport: Viewport, positions: &[Point]) {
        self.viewport = viewport;
        self.positions = positions.to_vec();
        self.translate_extent = Bounds::from_points(positions.iter().filter(|p| p.is_finite()))
            .map(|bounds| bounds.expanded(self.config.translate_margin))
            .unwrap_or_else(|| viewport.bounds());

        if let Phase::ZoomedIn(node) = self.phase {
            if node >= self.positions.len() {
                self.phase = Phase::Idle;
            }
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn state(&self) -> ZoomState {
        match (self.mode, self.phase) {
            (InteractionMode::Expanded, _) => ZoomState::Expanded,
            (_, Phase::Idle) => ZoomState::Idle,
            (_, Phase::ZoomedIn(node)) => ZoomState::ZoomedIn { node },
        }
    }

    /// Node the map is zoomed into, if any, regardless of mode
    pub fn focused_node(&self) -> Option<usize> {
        match self.phase {
            Phase::ZoomedIn(node) => Some(node),
            Phase::Idle => None,
        }
    }

    pub fn translate_extent(&self) -> Bounds {
        self.translate_extent
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_active()
    }

    /// Gesture admission, derived from current state on every call
    pub fn admits(&self, kind: GestureKind, button: MouseButton, source: GestureSource) -> bool {
        match kind {
            GestureKind::Click => true,
            GestureKind::Pan | GestureKind::Wheel => {
                button == MouseButton::Primary
                    && (self.transform.k > 1.0
                        || self.mode == InteractionMode::Expanded
                        || source == GestureSource::Programmatic)
            }
        }
    }

    /// Transform that centres `node` at the configured magnification
    pub fn zoom_target(&self, node: usize) -> Option<Transform> {
        let position = self.positions.get(node).filter(|p| p.is_finite())?;
        Some(Transform::centered_on(
            *position,
            self.config.zoom_factor,
            self.viewport.center(),
        ))
    }

    /// Whether the current transform is (within tolerance) centred on `node`
    pub fn is_centered_on(&self, node: usize) -> bool {
        self.transform.k > 1.0
            && self.zoom_target(node).map_or(false, |target| {
                self.transform
                    .translate_near(&target, self.config.same_cell_tolerance)
            })
    }

    /// Click on a node's cell: zoom in, re-centre, or zoom back out when the
    /// cell is the one already centred
    pub fn click_cell(&mut self, node: usize) -> ClickOutcome {
        let Some(target) = self.zoom_target(node) else {
            log::warn!("click on node {} without a position", node);
            return ClickOutcome::Ignored;
        };

        if self.is_centered_on(node) {
            log::debug!("zooming out of node {}", node);
            self.animate_to(Transform::identity(), Phase::Idle);
            ClickOutcome::ZoomOut
        } else {
            log::debug!("zooming into node {}", node);
            self.phase = Phase::ZoomedIn(node);
            self.animate_to(target, Phase::ZoomedIn(node));
            ClickOutcome::ZoomIn { node }
        }
    }

    /// Click outside every cell
    pub fn click_background(&mut self) {
        log::debug!("background click, resetting zoom");
        self.animate_to(Transform::identity(), Phase::Idle);
    }

    /// Programmatic zoom to a node; same as a click that always zooms in
    pub fn zoom_to_node(&mut self, node: usize) -> bool {
        match self.zoom_target(node) {
            Some(target) => {
                self.phase = Phase::ZoomedIn(node);
                self.animate_to(target, Phase::ZoomedIn(node));
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.animate_to(Transform::identity(), Phase::Idle);
    }

    /// Drag by a screen-space delta. Returns whether the transform changed.
    pub fn pan(&mut self, delta: Point, button: MouseButton, source: GestureSource) -> bool {
        if !self.admits(GestureKind::Pan, button, source) {
            return false;
        }
        let next = self.transform.pan_by(&delta);
        self.apply_gesture(next, source)
    }

    /// Wheel zoom about `position`. Returns whether the transform changed.
    pub fn wheel(&mut self, delta: f64, position: Point, source: GestureSource) -> bool {
        if !self.admits(GestureKind::Wheel, MouseButton::Primary, source) {
            return false;
        }
        let factor = 2f64.powf(-delta / WHEEL_PIXELS_PER_OCTAVE);
        let next = self
            .transform
            .scale_about(factor, &position, self.config.scale_extent);
        self.apply_gesture(next, source)
    }

    /// Switches between collapsed and expanded mode
    pub fn set_mode(&mut self, mode: InteractionMode) -> ModeChange {
        if mode == self.mode {
            return ModeChange::Unchanged;
        }
        self.mode = mode;
        log::info!("interaction mode now {:?}", mode);

        match mode {
            InteractionMode::Expanded => ModeChange::Entered,
            InteractionMode::Collapsed => {
                self.animate_to(Transform::identity(), Phase::Idle);
                ModeChange::Exited
            }
        }
    }

    /// Advances the in-flight transition. Returns whether the transform changed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        match self.transition.advance(delta) {
            Frame::Idle => false,
            Frame::Running(transform) => {
                self.transform = transform;
                true
            }
            Frame::Finished(transform, phase) => {
                self.transform = transform;
                self.phase = phase;
                log::debug!("zoom transition finished in {:?}", phase);
                true
            }
        }
    }

    /// Like [`tick`](Self::tick), measuring the delta from the previous call
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let delta = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);
        self.tick(delta)
    }

    /// Starts a transition from the current transform, replacing any in flight
    fn animate_to(&mut self, target: Transform, on_complete: Phase) {
        let transition = Transition::new(
            self.transform,
            target,
            self.config.effective_zoom_duration(),
            self.config.easing,
        );
        self.transition.start(transition, on_complete);
    }

    fn apply_gesture(&mut self, next: Transform, source: GestureSource) -> bool {
        let next = match source {
            GestureSource::User => {
                let clamped = Transform::new(
                    next.k.clamp(self.config.scale_extent[0], self.config.scale_extent[1]),
                    next.x,
                    next.y,
                );
                clamped.constrain(&self.viewport.bounds(), &self.translate_extent)
            }
            GestureSource::Programmatic => next,
        };

        // a gesture interrupts any running zoom animation
        self.transition.cancel();
        if next == self.transform {
            return false;
        }
        self.transform = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn controller() -> ZoomController {
        let mut controller = ZoomController::new(ZoomConfig::default());
        controller.set_layout(
            Viewport::new(800.0, 1200.0),
            &[
                Point::new(200.0, 300.0),
                Point::new(600.0, 900.0),
                Point::new(400.0, 500.0),
            ],
        );
        controller
    }

    /// Nodes spread past the viewport so panning at scale 1 is not clamped away
    fn wide_controller() -> ZoomController {
        let mut controller = ZoomController::new(ZoomConfig::default());
        controller.set_layout(
            Viewport::new(800.0, 1200.0),
            &[Point::new(-200.0, -200.0), Point::new(1000.0, 1400.0)],
        );
        controller
    }

    fn settle(controller: &mut ZoomController) {
        for _ in 0..100 {
            controller.tick(FRAME);
        }
    }

    #[test]
    fn test_click_zooms_in_on_node() {
        let mut zoom = controller();
        assert_eq!(zoom.click_cell(0), ClickOutcome::ZoomIn { node: 0 });
        assert_eq!(zoom.state(), ZoomState::ZoomedIn { node: 0 });
        assert_eq!(zoom.focused_node(), Some(0));
        settle(&mut zoom);

        let transform = zoom.transform();
        assert_eq!(transform.k, 4.0);
        assert!((transform.x - (400.0 - 4.0 * 200.0)).abs() < 1e-9);
        assert!((transform.y - (600.0 - 4.0 * 300.0)).abs() < 1e-9);
        assert!(!zoom.is_animating());
    }

    #[test]
    fn test_second_click_on_same_cell_returns_to_identity() {
        let mut zoom = controller();
        zoom.zoom_to_node(1);
        settle(&mut zoom);
        assert!(zoom.is_centered_on(1));

        assert_eq!(zoom.click_cell(1), ClickOutcome::ZoomOut);
        settle(&mut zoom);
        let transform = zoom.transform();
        assert_eq!(transform.k, 1.0);
        assert!(transform.x.abs() < 1.0 && transform.y.abs() < 1.0);
        assert_eq!(zoom.state(), ZoomState::Idle);
    }

    #[test]
    fn test_click_other_cell_recenters() {
        let mut zoom = controller();
        zoom.click_cell(0);
        settle(&mut zoom);
        assert_eq!(zoom.click_cell(2), ClickOutcome::ZoomIn { node: 2 });
        settle(&mut zoom);
        assert!(zoom.is_centered_on(2));
        assert_eq!(zoom.state(), ZoomState::ZoomedIn { node: 2 });
    }

    #[test]
    fn test_background_click_resets() {
        let mut zoom = controller();
        zoom.click_cell(0);
        settle(&mut zoom);
        zoom.click_background();
        settle(&mut zoom);
        assert!(zoom.transform().is_identity());
        assert_eq!(zoom.state(), ZoomState::Idle);
        assert_eq!(zoom.focused_node(), None);

        zoom.zoom_to_node(1);
        zoom.reset();
        settle(&mut zoom);
        assert!(zoom.transform().is_identity());
    }

    #[test]
    fn test_new_request_supersedes_running_transition() {
        let mut zoom = controller();
        zoom.click_cell(0);
        zoom.tick(Duration::from_millis(300));
        let midway = zoom.transform();
        assert!(midway.k > 1.0 && midway.k < 4.0);

        zoom.click_cell(1);
        settle(&mut zoom);
        assert!(zoom.is_centered_on(1));
    }

    #[test]
    fn test_pan_is_gated_at_identity() {
        let mut zoom = wide_controller();
        let delta = Point::new(30.0, -20.0);
        assert!(!zoom.pan(delta, MouseButton::Primary, GestureSource::User));
        assert!(zoom.transform().is_identity());

        zoom.set_mode(InteractionMode::Expanded);
        assert!(zoom.pan(delta, MouseButton::Primary, GestureSource::User));
        assert!(!zoom.transform().is_identity());
    }

    #[test]
    fn test_admission_rules() {
        let mut zoom = controller();
        let user = GestureSource::User;
        assert!(zoom.admits(GestureKind::Click, MouseButton::Secondary, user));
        assert!(!zoom.admits(GestureKind::Wheel, MouseButton::Primary, user));
        assert!(zoom.admits(
            GestureKind::Pan,
            MouseButton::Primary,
            GestureSource::Programmatic
        ));

        zoom.click_cell(0);
        settle(&mut zoom);
        assert!(zoom.admits(GestureKind::Pan, MouseButton::Primary, user));
        assert!(!zoom.admits(GestureKind::Pan, MouseButton::Secondary, user));
    }

    #[test]
    fn test_user_pan_stays_in_translate_extent() {
        let mut zoom = controller();
        zoom.click_cell(0);
        settle(&mut zoom);
        zoom.pan(Point::new(1.0e6, 1.0e6), MouseButton::Primary, GestureSource::User);

        let transform = zoom.transform();
        let extent = zoom.translate_extent();
        let visible_min = transform.invert(&Point::new(0.0, 0.0));
        assert!(visible_min.x >= extent.min.x - 1e-9);
        assert!(visible_min.y >= extent.min.y - 1e-9);
    }

    #[test]
    fn test_wheel_respects_scale_extent() {
        let mut zoom = controller();
        zoom.set_mode(InteractionMode::Expanded);
        for _ in 0..50 {
            zoom.wheel(-500.0, Point::new(400.0, 600.0), GestureSource::User);
        }
        assert_eq!(zoom.transform().k, 8.0);
        for _ in 0..50 {
            zoom.wheel(500.0, Point::new(400.0, 600.0), GestureSource::User);
        }
        assert_eq!(zoom.transform().k, 1.0);
    }

    #[test]
    fn test_leaving_expanded_mode_resets() {
        let mut zoom = controller();
        assert_eq!(zoom.set_mode(InteractionMode::Expanded), ModeChange::Entered);
        assert_eq!(zoom.state(), ZoomState::Expanded);
        zoom.pan(Point::new(-50.0, 0.0), MouseButton::Primary, GestureSource::User);

        assert_eq!(zoom.set_mode(InteractionMode::Expanded), ModeChange::Unchanged);
        assert_eq!(zoom.set_mode(InteractionMode::Collapsed), ModeChange::Exited);
        settle(&mut zoom);
        assert!(zoom.transform().is_identity());
        assert_eq!(zoom.state(), ZoomState::Idle);
    }

    #[test]
    fn test_tick_at_measures_elapsed_time() {
        let mut zoom = controller();
        let start = Instant::now();
        zoom.click_cell(0);
        assert!(!zoom.tick_at(start) || zoom.transform().is_identity());
        zoom.tick_at(start + Duration::from_millis(800));
        assert_eq!(zoom.transform().k, 4.0);
    }
}
