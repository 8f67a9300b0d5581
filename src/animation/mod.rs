pub mod easing;
pub mod transitions;

pub use easing::EasingType;
pub use transitions::{Frame, Interpolatable, Transition, TransitionSlot, TransitionState};
