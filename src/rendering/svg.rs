use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use crate::core::viewport::Transform;
use crate::rendering::path::{fmt_num, PathData};
use crate::rendering::scene::Scene;
use crate::rendering::style::ShapeStyle;
use crate::rendering::surface::DrawSurface;
use crate::{MapError, Result};
use std::fmt::Write;

/// Serialises a scene as a standalone SVG document
#[derive(Debug, Default)]
pub struct SvgSurface {
    output: String,
    depth: usize,
    finished: bool,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished document; `None` until `finish` has succeeded
    pub fn document(&self) -> Option<&str> {
        self.finished.then_some(self.output.as_str())
    }

    pub fn into_document(self) -> Option<String> {
        self.finished.then_some(self.output)
    }

    fn indent(&mut self) {
        for _ in 0..=self.depth {
            self.output.push_str("  ");
        }
    }

    fn write_style(&mut self, style: &ShapeStyle, class: Option<&str>) -> Result<()> {
        let fill = style
            .fill
            .map_or_else(|| "none".to_string(), |color| color.to_string());
        write!(self.output, " fill=\"{}\"", fill)?;
        if let Some(stroke) = style.stroke {
            write!(
                self.output,
                " stroke=\"{}\" stroke-width=\"{}\"",
                stroke,
                fmt_num(style.stroke_width)
            )?;
        }
        if style.opacity < 1.0 {
            write!(self.output, " opacity=\"{}\"", fmt_num(style.opacity))?;
        }
        if let Some(class) = class {
            write!(self.output, " class=\"{}\"", escape(class))?;
        }
        Ok(())
    }
}

impl DrawSurface for SvgSurface {
    fn begin(&mut self, width: f64, height: f64) -> Result<()> {
        self.output.clear();
        self.depth = 0;
        self.finished = false;
        let (w, h) = (fmt_num(width), fmt_num(height));
        writeln!(
            self.output,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
        )?;
        Ok(())
    }

    fn push_group(&mut self, name: &str, transform: &Transform) -> Result<()> {
        self.indent();
        write!(self.output, "<g class=\"{}\"", escape(name))?;
        if *transform != Transform::identity() {
            write!(
                self.output,
                " transform=\"translate({},{}) scale({})\"",
                fmt_num(transform.x),
                fmt_num(transform.y),
                fmt_num(transform.k)
            )?;
        }
        self.output.push_str(">\n");
        self.depth += 1;
        Ok(())
    }

    fn pop_group(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(MapError::Render("group stack underflow".into()));
        }
        self.depth -= 1;
        self.indent();
        self.output.push_str("</g>\n");
        Ok(())
    }

    fn draw_rect(
        &mut self,
        bounds: &Bounds,
        corner_radius: f64,
        style: &ShapeStyle,
        class: Option<&str>,
    ) -> Result<()> {
        self.indent();
        write!(
            self.output,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
            fmt_num(bounds.min.x),
            fmt_num(bounds.min.y),
            fmt_num(bounds.width()),
            fmt_num(bounds.height())
        )?;
        if corner_radius > 0.0 {
            let r = fmt_num(corner_radius);
            write!(self.output, " rx=\"{r}\" ry=\"{r}\"")?;
        }
        self.write_style(style, class)?;
        self.output.push_str("/>\n");
        Ok(())
    }

    fn draw_circle(
        &mut self,
        center: &Point,
        radius: f64,
        style: &ShapeStyle,
        class: Option<&str>,
    ) -> Result<()> {
        self.indent();
        write!(
            self.output,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(radius)
        )?;
        self.write_style(style, class)?;
        self.output.push_str("/>\n");
        Ok(())
    }

    fn draw_path(&mut self, path: &PathData, style: &ShapeStyle, class: Option<&str>) -> Result<()> {
        if path.is_empty() {
            return Ok(());
        }
        self.indent();
        write!(self.output, "<path d=\"{}\"", path)?;
        self.write_style(style, class)?;
        self.output.push_str("/>\n");
        Ok(())
    }

    fn draw_text(
        &mut self,
        position: &Point,
        content: &str,
        font_size: f64,
        font_family: &str,
        bold: bool,
        style: &ShapeStyle,
    ) -> Result<()> {
        self.indent();
        write!(
            self.output,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\"",
            fmt_num(position.x),
            fmt_num(position.y),
            fmt_num(font_size),
            escape(font_family)
        )?;
        if bold {
            self.output.push_str(" font-weight=\"bold\"");
        }
        self.write_style(style, None)?;
        writeln!(self.output, ">{}</text>", escape(content))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.depth != 0 {
            return Err(MapError::Render(format!("{} groups left open", self.depth)));
        }
        self.output.push_str("</svg>\n");
        self.finished = true;
        Ok(())
    }
}

impl Scene {
    /// Renders the scene into an SVG document
    pub fn to_svg(&self) -> Result<String> {
        let mut surface = SvgSurface::new();
        self.render(&mut surface)?;
        surface
            .into_document()
            .ok_or_else(|| MapError::Render("svg document not finished".into()))
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::scene::{SceneGroup, SceneItem, Shape};
    use crate::rendering::style::Color;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new(800.0, 1200.0);
        let mut ocean = SceneGroup::new("ocean", Transform::identity());
        ocean.push(SceneItem::new(
            Shape::Rect {
                bounds: Bounds::from_size(800.0, 1200.0),
                corner_radius: 0.0,
            },
            ShapeStyle::fill(Color::rgb(0x15, 0x9d, 0xd7)).with_opacity(0.2),
        ));
        scene.groups.push(ocean);

        let mut labels = SceneGroup::new("labels", Transform::new(4.0, -400.0, -600.0));
        labels.push(SceneItem::new(
            Shape::Text {
                position: Point::new(10.0, 20.0),
                content: "Åarjel <sma>".into(),
                font_size: 12.0,
                font_family: "'Noto Sans', sans-serif".into(),
                bold: true,
            },
            ShapeStyle::fill(Color::rgb(9, 40, 53)),
        ));
        scene.groups.push(labels);
        scene
    }

    #[test]
    fn test_svg_document() {
        let svg = sample_scene().to_svg().unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\""));
        assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"800\" height=\"1200\" fill=\"#159dd7\" opacity=\"0.2\"/>"));
        assert!(svg.contains("transform=\"translate(-400,-600) scale(4)\""));
        assert!(svg.contains("Åarjel &lt;sma&gt;</text>"));
        assert!(svg.contains("font-family=\"&apos;Noto Sans&apos;, sans-serif\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_identity_group_has_no_transform() {
        let svg = sample_scene().to_svg().unwrap();
        assert!(svg.contains("<g class=\"ocean\">"));
    }

    #[test]
    fn test_document_requires_finish() {
        let mut surface = SvgSurface::new();
        surface.begin(10.0, 10.0).unwrap();
        assert!(surface.document().is_none());
        surface.finish().unwrap();
        assert!(surface.document().is_some());
    }
}
