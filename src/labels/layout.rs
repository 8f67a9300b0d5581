use crate::core::bounds::Bounds;
use crate::core::config::LabelConfig;
use crate::core::geo::Point;
use crate::core::viewport::Viewport;
use crate::data::nodes::{Node, Slot};
use crate::labels::measure::{TextExtent, TextMeasure};
use crate::rendering::path::PathData;

/// A positioned label and its connector back to the node
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBox {
    pub node: usize,
    pub slot: Slot,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub connector: PathData,
}

impl LabelBox {
    /// Places a label of `size` (padding included) in `slot` around `anchor`
    pub fn place(node: usize, anchor: Point, slot: Slot, size: TextExtent, config: &LabelConfig) -> Self {
        let direction = slot.direction();
        let half = if slot.is_vertical() {
            size.height / 2.0
        } else {
            size.width / 2.0
        };

        let center = anchor.add(&direction.multiply(config.base_offset + half));
        let start = anchor.add(&direction.multiply(config.node_radius));
        let end = center.subtract(&direction.multiply(half));

        let mut connector = PathData::new();
        connector.move_to(start).cubic_to(start, end, end);

        Self {
            node,
            slot,
            center,
            width: size.width,
            height: size.height,
            connector,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_coords(
            self.center.x - self.width / 2.0,
            self.center.y - self.height / 2.0,
            self.center.x + self.width / 2.0,
            self.center.y + self.height / 2.0,
        )
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.bounds().contains(point)
    }
}

/// Fixed-slot label placement for every node of one layout pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelLayout {
    font_size: f64,
    labels: Vec<LabelBox>,
}

impl LabelLayout {
    /// Sizes the font for the viewport width, measures each label and puts
    /// it in its node's slot. `positions` are the projected node positions,
    /// index-aligned with `nodes`.
    pub fn compute(
        nodes: &[Node],
        positions: &[Point],
        viewport: &Viewport,
        config: &LabelConfig,
        measure: &dyn TextMeasure,
    ) -> Self {
        let font_size = config.font_size_for_width(viewport.width);
        let mut unmeasured = 0;

        let labels = nodes
            .iter()
            .zip(positions)
            .enumerate()
            .map(|(index, (node, anchor))| {
                let size = match measure.measure(&node.label, font_size) {
                    Some(extent) => {
                        TextExtent::new(extent.width + font_size, extent.height + font_size)
                    }
                    None => {
                        unmeasured += 1;
                        TextExtent::default()
                    }
                };
                LabelBox::place(index, *anchor, node.slot, size, config)
            })
            .collect();

        if unmeasured > 0 {
            log::debug!("{} labels could not be measured yet", unmeasured);
        }

        let layout = Self { font_size, labels };
        let overlapping = layout.overlaps();
        if !overlapping.is_empty() {
            log::debug!("overlapping labels: {:?}", overlapping);
        }
        layout
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn labels(&self) -> &[LabelBox] {
        &self.labels
    }

    pub fn label(&self, node: usize) -> Option<&LabelBox> {
        self.labels.get(node)
    }

    /// Topmost label under `point` (later labels paint over earlier ones)
    pub fn label_at(&self, point: &Point) -> Option<usize> {
        self.labels
            .iter()
            .rev()
            .find(|label| label.contains(point))
            .map(|label| label.node)
    }

    /// Pairs of labels whose boxes overlap; reported, never resolved
    pub fn overlaps(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.labels.iter().enumerate() {
            for b in &self.labels[i + 1..] {
                if a.width > 0.0 && b.width > 0.0 && a.bounds().overlaps(&b.bounds()) {
                    pairs.push((a.node, b.node));
                }
            }
        }
        pairs
    }
}
