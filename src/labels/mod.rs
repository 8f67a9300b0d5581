//! Label placement.
//!
//! Every label goes in the slot its node was configured with, a constant gap
//! away from the node. Nothing is moved to avoid collisions; overlapping
//! labels are reported so an integrator can pick different slots.

pub mod layout;
pub mod measure;

pub use layout::{LabelBox, LabelLayout};
pub use measure::{ApproximateTextMeasure, TextExtent, TextMeasure};
