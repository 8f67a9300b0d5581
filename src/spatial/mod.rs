pub mod clip;
pub mod index;
pub mod tessellation;

pub use index::NodeIndex;
pub use tessellation::{Cell, Tessellation};
