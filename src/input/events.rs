use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MouseButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Who asked for a transform change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GestureSource {
    #[default]
    User,
    /// Host code driving the map; never gated and never constrained
    Programmatic,
}

/// Kind of gesture, for admission checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    Click,
    Pan,
    Wheel,
}

/// Pointer input as delivered by the host, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Click {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Pointer left the drawing area
    Leave,
    Drag {
        delta: Point,
        button: MouseButton,
    },
    /// Wheel delta in pixels, positive scrolling down (zooming out)
    Wheel {
        delta: f64,
        position: Point,
    },
}

impl PointerEvent {
    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            PointerEvent::Click { .. } => Some(GestureKind::Click),
            PointerEvent::Drag { .. } => Some(GestureKind::Pan),
            PointerEvent::Wheel { .. } => Some(GestureKind::Wheel),
            PointerEvent::Move { .. } | PointerEvent::Leave => None,
        }
    }
}

/// Cursor the host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    ZoomIn,
    ZoomOut,
}

impl Cursor {
    /// CSS cursor keyword
    pub fn as_css(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
            Cursor::ZoomIn => "zoom-in",
            Cursor::ZoomOut => "zoom-out",
        }
    }
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl EventHandled {
    pub fn from_bool(handled: bool) -> Self {
        if handled {
            EventHandled::Handled
        } else {
            EventHandled::NotHandled
        }
    }

    pub fn is_handled(self) -> bool {
        self == EventHandled::Handled
    }
}
