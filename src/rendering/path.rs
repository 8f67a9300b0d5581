use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One drawing command of a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    Close,
}

/// Backend-neutral path geometry; `Display` renders SVG path data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed polygon through `points`; empty input yields an empty path
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = Self::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for point in iter {
                path.line_to(*point);
            }
            path.close();
        }
        path
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(point));
        self
    }

    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> &mut Self {
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Adds another path's commands as further subpaths
    pub fn append(&mut self, other: &PathData) -> &mut Self {
        self.commands.extend_from_slice(&other.commands);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Bounding box of every vertex and control point
    pub fn bounds(&self) -> Option<Bounds> {
        let points: Vec<Point> = self
            .commands
            .iter()
            .flat_map(|command| match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
                PathCommand::CubicTo { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
                PathCommand::Close => Vec::new(),
            })
            .collect();
        Bounds::from_points(points.iter())
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(p) => write!(f, "M{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::LineTo(p) => write!(f, "L{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::CubicTo { ctrl1, ctrl2, to } => write!(
                    f,
                    "C{},{},{},{},{},{}",
                    fmt_num(ctrl1.x),
                    fmt_num(ctrl1.y),
                    fmt_num(ctrl2.x),
                    fmt_num(ctrl2.y),
                    fmt_num(to.x),
                    fmt_num(to.y)
                )?,
                PathCommand::Close => write!(f, "Z")?,
            }
        }
        Ok(())
    }
}

/// Three decimals is well below a pixel and keeps SVG output compact
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}
