//! The map session: one mounted map and everything it owns.
//!
//! A layout pass runs projection, tessellation and label placement in that
//! order and hands the resulting node positions to the zoom controller.
//! Pointer input is attributed against the last pass; zoom only changes the
//! group transform, never the pass itself.

use crate::core::config::MapConfig;
use crate::core::geo::Point;
use crate::core::host::HostPage;
use crate::core::viewport::{Transform, Viewport};
use crate::data::correction::RegionStore;
use crate::data::nodes::Node;
use crate::input::controller::{ClickOutcome, InteractionMode, ModeChange, ZoomController, ZoomState};
use crate::input::events::{Cursor, EventHandled, GestureSource, MouseButton, PointerEvent};
use crate::input::hover::Highlights;
use crate::labels::layout::LabelLayout;
use crate::labels::measure::TextMeasure;
use crate::projection::{PathGenerator, Projection};
use crate::rendering::path::PathData;
use crate::rendering::scene::{Scene, SceneGroup, SceneItem, Shape};
use crate::rendering::style::{Color, MapStyle, ShapeStyle};
use crate::spatial::tessellation::Tessellation;
use instant::Instant;
use std::time::Duration;

/// Output of one layout pass
pub struct Layout {
    pub projection: Projection,
    /// Region id and outline, in region order; regions with nothing
    /// drawable inside the bounds are absent
    pub regions: Vec<(String, PathData)>,
    /// Projected node positions, index-aligned with the session's nodes
    pub positions: Vec<Point>,
    pub tessellation: Tessellation,
    pub labels: LabelLayout,
}

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Label box of a node; navigates
    Label(usize),
    /// Node marker; navigates
    Marker(usize),
    Cell { node: usize, outcome: ClickOutcome },
    /// Outside the tessellated area
    Background,
}

/// What the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoverTarget {
    Node(usize),
    Cell(usize),
    Nothing,
}

pub struct MapSession {
    config: MapConfig,
    style: MapStyle,
    viewport: Viewport,
    regions: RegionStore,
    nodes: Vec<Node>,
    measure: Box<dyn TextMeasure>,
    host: Box<dyn HostPage>,
    layout: Option<Layout>,
    controller: ZoomController,
    hovered: Option<usize>,
    hovered_cell: Option<usize>,
    cursor: Cursor,
    node_highlights: Highlights,
    cell_flashes: Highlights,
    last_tick: Option<Instant>,
    layout_passes: usize,
}

impl MapSession {
    pub fn new(
        config: MapConfig,
        style: MapStyle,
        viewport: Viewport,
        regions: RegionStore,
        nodes: Vec<Node>,
        measure: Box<dyn TextMeasure>,
        host: Box<dyn HostPage>,
    ) -> Self {
        let hover_duration = config.zoom.effective_hover_duration();
        let count = nodes.len();
        Self {
            controller: ZoomController::new(config.zoom.clone()),
            config,
            style,
            viewport,
            regions,
            nodes,
            measure,
            host,
            layout: None,
            hovered: None,
            hovered_cell: None,
            cursor: Cursor::Default,
            node_highlights: Highlights::new(count, hover_duration),
            cell_flashes: Highlights::new(count, hover_duration),
            last_tick: None,
            layout_passes: 0,
        }
    }

    /// Full layout pass for the current viewport. Corrected region geometry
    /// is computed on the first pass and reused afterwards.
    pub fn relayout(&mut self) {
        if self.viewport.is_empty() {
            log::debug!(
                "skipping layout for empty viewport {}x{}",
                self.viewport.width,
                self.viewport.height
            );
            return;
        }

        let projection_config = &self.config.projection;
        let projection = Projection::from_config(projection_config, &self.viewport);
        let generator = PathGenerator::new(&projection, projection_config.bounds)
            .with_clip_mode(projection_config.clip_mode)
            .with_min_ring_points(projection_config.min_ring_points);

        let regions: Vec<(String, PathData)> = self
            .regions
            .iter()
            .filter_map(|region| {
                generator
                    .region_path(region)
                    .map(|path| (region.id.clone(), path))
            })
            .collect();

        let positions: Vec<Point> = self
            .nodes
            .iter()
            .map(|node| projection.project(&node.anchor))
            .collect();

        let tessellation = Tessellation::compute(&positions, self.viewport.bounds());
        let labels = LabelLayout::compute(
            &self.nodes,
            &positions,
            &self.viewport,
            &self.config.labels,
            self.measure.as_ref(),
        );

        self.controller.set_layout(self.viewport, &positions);
        self.node_highlights.resize(self.nodes.len());
        self.cell_flashes.resize(self.nodes.len());
        self.layout_passes += 1;

        log::debug!(
            "layout pass {}: {}x{}, {} of {} regions drawn, {} nodes, font {:.1}px",
            self.layout_passes,
            self.viewport.width,
            self.viewport.height,
            regions.len(),
            self.regions.len(),
            positions.len(),
            labels.font_size()
        );

        self.layout = Some(Layout {
            projection,
            regions,
            positions,
            tessellation,
            labels,
        });
    }

    /// New host size; always a full relayout
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.relayout();
    }

    /// Expanded-mode toggle from the host. Entering locks page scrolling,
    /// leaving releases it and zooms back out.
    pub fn set_mode(&mut self, mode: InteractionMode) -> ModeChange {
        let change = self.controller.set_mode(mode);
        match change {
            ModeChange::Entered => self.host.set_scroll_lock(true),
            ModeChange::Exited => self.host.set_scroll_lock(false),
            ModeChange::Unchanged => {}
        }
        self.relayout();
        change
    }

    /// Dispatches one pointer event
    pub fn handle(&mut self, event: PointerEvent) -> EventHandled {
        match event {
            PointerEvent::Click { position, .. } => {
                self.pointer_click(position);
                EventHandled::Handled
            }
            PointerEvent::Move { position } => {
                self.pointer_move(position);
                EventHandled::Handled
            }
            PointerEvent::Leave => {
                self.pointer_leave();
                EventHandled::Handled
            }
            PointerEvent::Drag { delta, button } => {
                EventHandled::from_bool(self.pointer_drag(delta, button))
            }
            PointerEvent::Wheel { delta, position } => {
                EventHandled::from_bool(self.wheel(delta, position))
            }
        }
    }

    /// Attributes a click in paint order: labels, markers, cells, background
    pub fn pointer_click(&mut self, screen: Point) -> ClickTarget {
        let target = match self.node_at(&screen) {
            Some((node, true)) => ClickTarget::Label(node),
            Some((node, false)) => ClickTarget::Marker(node),
            None => match self.cell_at(&screen) {
                Some(node) => {
                    if self.controller.transform().k > 1.0 {
                        self.cell_flashes
                            .fade_to(node, self.style.cell_flash_opacity);
                    }
                    let outcome = self.controller.click_cell(node);
                    ClickTarget::Cell { node, outcome }
                }
                None => {
                    self.controller.click_background();
                    ClickTarget::Background
                }
            },
        };

        if let ClickTarget::Label(node) | ClickTarget::Marker(node) = target {
            let url = self.nodes[node].link(self.config.link_prefix());
            log::info!("navigating to {}", url);
            self.host.navigate(&url);
        }
        target
    }

    /// Updates hover highlight and cursor; returns the cursor to show
    pub fn pointer_move(&mut self, screen: Point) -> Cursor {
        let target = match self.node_at(&screen) {
            Some((node, _)) => HoverTarget::Node(node),
            None => match self.cell_at(&screen) {
                Some(node) => HoverTarget::Cell(node),
                None => HoverTarget::Nothing,
            },
        };

        let (hovered, hovered_cell, cursor) = match target {
            HoverTarget::Node(node) => (Some(node), None, Cursor::Pointer),
            HoverTarget::Cell(node) if self.controller.is_centered_on(node) => {
                (None, Some(node), Cursor::ZoomOut)
            }
            HoverTarget::Cell(node) => (None, Some(node), Cursor::ZoomIn),
            HoverTarget::Nothing => (None, None, Cursor::Default),
        };

        self.set_hovered(hovered);
        if hovered_cell != self.hovered_cell {
            self.cell_flashes.clear_except(hovered_cell);
            self.hovered_cell = hovered_cell;
        }
        if cursor != self.cursor {
            self.cursor = cursor;
            self.host.set_cursor(cursor);
        }
        cursor
    }

    pub fn pointer_leave(&mut self) {
        self.set_hovered(None);
        self.cell_flashes.clear_except(None);
        self.hovered_cell = None;
        if self.cursor != Cursor::Default {
            self.cursor = Cursor::Default;
            self.host.set_cursor(Cursor::Default);
        }
    }

    /// User drag; returns whether the transform changed
    pub fn pointer_drag(&mut self, delta: Point, button: MouseButton) -> bool {
        self.controller.pan(delta, button, GestureSource::User)
    }

    /// User wheel; returns whether the transform changed
    pub fn wheel(&mut self, delta: f64, position: Point) -> bool {
        self.controller.wheel(delta, position, GestureSource::User)
    }

    /// Programmatic zoom into a node
    pub fn zoom_to_node(&mut self, node: usize) -> bool {
        self.controller.zoom_to_node(node)
    }

    /// Animates back to the identity transform
    pub fn reset_zoom(&mut self) {
        self.controller.reset();
    }

    /// Programmatic pan, exempt from gesture gating
    pub fn pan_by(&mut self, delta: Point) -> bool {
        self.controller
            .pan(delta, MouseButton::Primary, GestureSource::Programmatic)
    }

    /// Advances every animation; returns whether anything visible changed
    pub fn tick(&mut self, delta: Duration) -> bool {
        let zoomed = self.controller.tick(delta);
        let hovered = self.node_highlights.advance(delta);
        let flashed = self.cell_flashes.advance(delta);
        zoomed || hovered || flashed
    }

    /// [`tick`](Self::tick) using wall-clock time since the previous call
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let delta = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);
        self.tick(delta)
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
            || self.node_highlights.is_animating()
            || self.cell_flashes.is_animating()
    }

    /// Retained scene for the current layout, transform and hover state
    pub fn scene(&self) -> Scene {
        let style = &self.style;
        let mut scene = Scene::new(self.viewport.width, self.viewport.height);

        let mut ocean = SceneGroup::new("ocean", Transform::identity());
        ocean.push(
            SceneItem::new(
                Shape::Rect {
                    bounds: self.viewport.bounds(),
                    corner_radius: 0.0,
                },
                ShapeStyle::fill(style.brand_blue).with_opacity(style.ocean_opacity),
            )
            .with_class("ocean"),
        );
        scene.groups.push(ocean);

        let Some(layout) = &self.layout else {
            return scene;
        };
        let transform = self.controller.transform();

        let mut regions = SceneGroup::new("regions", transform);
        for (id, path) in &layout.regions {
            regions.push(
                SceneItem::new(
                    Shape::Path(path.clone()),
                    ShapeStyle::fill(style.background)
                        .with_stroke(style.border, style.region_stroke_width),
                )
                .with_class(format!("country-{}", id)),
            );
        }
        scene.groups.push(regions);

        let mut nodes = SceneGroup::new("nodes", transform);
        for cell in layout.tessellation.cells().iter().filter(|c| !c.is_empty()) {
            let flash = self.cell_flashes.amount(cell.index);
            let fill = if flash > 0.0 {
                style.brand_green
            } else {
                Color::TRANSPARENT
            };
            nodes.push(
                SceneItem::new(
                    Shape::Path(cell.path()),
                    ShapeStyle::fill(fill).with_opacity(flash),
                )
                .with_class("voronoi"),
            );
        }
        for (index, position) in layout.positions.iter().enumerate() {
            let highlight = self.node_highlights.amount(index);
            nodes.push(
                SceneItem::new(
                    Shape::Circle {
                        center: *position,
                        radius: self.config.labels.node_radius,
                    },
                    ShapeStyle::fill(style.white.lerp(&style.brand_green, highlight)).with_stroke(
                        style.border.lerp(&style.brand_green, highlight),
                        style.outline_width,
                    ),
                )
                .with_class("node"),
            );
        }
        scene.groups.push(nodes);

        let mut labels = SceneGroup::new("labels", transform);
        let boxes = layout.labels.labels();
        for label in boxes {
            let highlight = self.node_highlights.amount(label.node);
            labels.push(
                SceneItem::new(
                    Shape::Rect {
                        bounds: label.bounds(),
                        corner_radius: self.config.labels.corner_radius,
                    },
                    ShapeStyle::fill(style.white.lerp(&style.background, highlight)).with_stroke(
                        style.border.lerp(&style.brand_green, highlight),
                        style.outline_width,
                    ),
                )
                .with_class("label-bg"),
            );
        }
        for label in boxes {
            labels.push(SceneItem::new(
                Shape::Text {
                    position: label.center,
                    content: self.nodes[label.node].label.clone(),
                    font_size: layout.labels.font_size(),
                    font_family: style.font_family.clone(),
                    bold: true,
                },
                ShapeStyle::fill(style.primary),
            ));
        }
        for label in boxes {
            let highlight = self.node_highlights.amount(label.node);
            labels.push(
                SceneItem::new(
                    Shape::Path(label.connector.clone()),
                    ShapeStyle::stroke(
                        style.border.lerp(&style.brand_green, highlight),
                        style.outline_width,
                    ),
                )
                .with_class("connector"),
            );
        }
        scene.groups.push(labels);

        scene
    }

    pub fn transform(&self) -> Transform {
        self.controller.transform()
    }

    pub fn state(&self) -> ZoomState {
        self.controller.state()
    }

    pub fn mode(&self) -> InteractionMode {
        self.controller.mode()
    }

    pub fn controller(&self) -> &ZoomController {
        &self.controller
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn highlight(&self, node: usize) -> f64 {
        self.node_highlights.amount(node)
    }

    pub fn cell_flash(&self, node: usize) -> f64 {
        self.cell_flashes.amount(node)
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn layout_passes(&self) -> usize {
        self.layout_passes
    }

    pub fn regions(&self) -> &RegionStore {
        &self.regions
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn style(&self) -> &MapStyle {
        &self.style
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Node whose label (`true`) or marker (`false`) is under the pointer
    fn node_at(&self, screen: &Point) -> Option<(usize, bool)> {
        let layout = self.layout.as_ref()?;
        let content = self.controller.transform().invert(screen);
        if let Some(node) = layout.labels.label_at(&content) {
            return Some((node, true));
        }
        layout
            .tessellation
            .node_index()
            .within(&content, self.config.labels.node_radius)
            .first()
            .map(|&node| (node, false))
    }

    fn cell_at(&self, screen: &Point) -> Option<usize> {
        let layout = self.layout.as_ref()?;
        let content = self.controller.transform().invert(screen);
        layout.tessellation.cell_at(&content)
    }

    fn set_hovered(&mut self, hovered: Option<usize>) {
        if hovered == self.hovered {
            return;
        }
        self.node_highlights.clear_except(hovered);
        if let Some(node) = hovered {
            self.node_highlights.fade_to(node, 1.0);
        }
        self.hovered = hovered;
    }
}
