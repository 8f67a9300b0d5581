//! Retained scene handed to a drawing backend.
//!
//! A scene is a list of named groups, each carrying the transform it is drawn
//! under. The map group, node group and label group all share the zoom
//! transform, so zooming only rewrites three transforms and never touches the
//! layout inside them.

use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use crate::core::viewport::Transform;
use crate::rendering::path::PathData;
use crate::rendering::style::ShapeStyle;
use crate::rendering::surface::DrawSurface;
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        bounds: Bounds,
        corner_radius: f64,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Path(PathData),
    /// Centred on `position` both ways
    Text {
        position: Point,
        content: String,
        font_size: f64,
        font_family: String,
        bold: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub shape: Shape,
    pub style: ShapeStyle,
    pub class: Option<String>,
}

impl SceneItem {
    pub fn new(shape: Shape, style: ShapeStyle) -> Self {
        Self {
            shape,
            style,
            class: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneGroup {
    pub name: String,
    pub transform: Transform,
    pub items: Vec<SceneItem>,
}

impl SceneGroup {
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: SceneItem) {
        self.items.push(item);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub groups: Vec<SceneGroup>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            groups: Vec::new(),
        }
    }

    pub fn group(&self, name: &str) -> Option<&SceneGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    /// Replays the scene onto a backend, groups in paint order
    pub fn render(&self, surface: &mut dyn DrawSurface) -> Result<()> {
        surface.begin(self.width, self.height)?;
        for group in &self.groups {
            surface.push_group(&group.name, &group.transform)?;
            for item in &group.items {
                let class = item.class.as_deref();
                match &item.shape {
                    Shape::Rect {
                        bounds,
                        corner_radius,
                    } => surface.draw_rect(bounds, *corner_radius, &item.style, class)?,
                    Shape::Circle { center, radius } => {
                        surface.draw_circle(center, *radius, &item.style, class)?
                    }
                    Shape::Path(path) => surface.draw_path(path, &item.style, class)?,
                    Shape::Text {
                        position,
                        content,
                        font_size,
                        font_family,
                        bold,
                    } => surface.draw_text(
                        position,
                        content,
                        *font_size,
                        font_family,
                        *bold,
                        &item.style,
                    )?,
                }
            }
            surface.pop_group()?;
        }
        surface.finish()
    }
}
