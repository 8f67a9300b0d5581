pub mod controller;
pub mod events;
pub mod hover;

pub use controller::{ClickOutcome, InteractionMode, ModeChange, ZoomController, ZoomState};
pub use events::{Cursor, EventHandled, GestureKind, GestureSource, MouseButton, PointerEvent};
pub use hover::Highlights;
