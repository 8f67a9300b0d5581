use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use crate::core::viewport::Transform;
use crate::rendering::path::PathData;
use crate::rendering::style::ShapeStyle;
use crate::{MapError, Result};

/// Drawing backend a [`Scene`](crate::rendering::scene::Scene) is replayed onto
pub trait DrawSurface {
    fn begin(&mut self, width: f64, height: f64) -> Result<()>;
    fn push_group(&mut self, name: &str, transform: &Transform) -> Result<()>;
    fn pop_group(&mut self) -> Result<()>;
    fn draw_rect(
        &mut self,
        bounds: &Bounds,
        corner_radius: f64,
        style: &ShapeStyle,
        class: Option<&str>,
    ) -> Result<()>;
    fn draw_circle(
        &mut self,
        center: &Point,
        radius: f64,
        style: &ShapeStyle,
        class: Option<&str>,
    ) -> Result<()>;
    fn draw_path(&mut self, path: &PathData, style: &ShapeStyle, class: Option<&str>)
        -> Result<()>;
    fn draw_text(
        &mut self,
        position: &Point,
        content: &str,
        font_size: f64,
        font_family: &str,
        bold: bool,
        style: &ShapeStyle,
    ) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

/// Commands recorded by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    PushGroup { name: String, transform: Transform },
    PopGroup,
    Rect { bounds: Bounds, corner_radius: f64, style: ShapeStyle },
    Circle { center: Point, radius: f64, style: ShapeStyle },
    Path { path: PathData, style: ShapeStyle },
    Text { position: Point, content: String, font_size: f64 },
}

/// Surface that only queues what it is asked to draw
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Option<(f64, f64)>,
    drawing_queue: Vec<DrawCommand>,
    depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.drawing_queue
    }
}

impl DrawSurface for RecordingSurface {
    fn begin(&mut self, width: f64, height: f64) -> Result<()> {
        self.drawing_queue.clear();
        self.depth = 0;
        self.size = Some((width, height));
        Ok(())
    }

    fn push_group(&mut self, name: &str, transform: &Transform) -> Result<()> {
        self.depth += 1;
        self.drawing_queue.push(DrawCommand::PushGroup {
            name: name.to_string(),
            transform: *transform,
        });
        Ok(())
    }

    fn pop_group(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(MapError::Render("group stack underflow".into()));
        }
        self.depth -= 1;
        self.drawing_queue.push(DrawCommand::PopGroup);
        Ok(())
    }

    fn draw_rect(
        &mut self,
        bounds: &Bounds,
        corner_radius: f64,
        style: &ShapeStyle,
        _class: Option<&str>,
    ) -> Result<()> {
        self.drawing_queue.push(DrawCommand::Rect {
            bounds: *bounds,
            corner_radius,
            style: *style,
        });
        Ok(())
    }

    fn draw_circle(
        &mut self,
        center: &Point,
        radius: f64,
        style: &ShapeStyle,
        _class: Option<&str>,
    ) -> Result<()> {
        self.drawing_queue.push(DrawCommand::Circle {
            center: *center,
            radius,
            style: *style,
        });
        Ok(())
    }

    fn draw_path(
        &mut self,
        path: &PathData,
        style: &ShapeStyle,
        _class: Option<&str>,
    ) -> Result<()> {
        self.drawing_queue.push(DrawCommand::Path {
            path: path.clone(),
            style: *style,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        position: &Point,
        content: &str,
        font_size: f64,
        _font_family: &str,
        _bold: bool,
        _style: &ShapeStyle,
    ) -> Result<()> {
        self.drawing_queue.push(DrawCommand::Text {
            position: *position,
            content: content.to_string(),
            font_size,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.depth != 0 {
            return Err(MapError::Render(format!("{} groups left open", self.depth)));
        }
        Ok(())
    }
}
