use crate::animation::easing::EasingType;
use crate::core::viewport::Transform;
use std::time::Duration;

/// Values that can be smoothly transitioned
pub trait Interpolatable: Copy {
    fn interpolate(&self, other: &Self, t: f64) -> Self;
}

impl Interpolatable for f64 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolatable for Transform {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.lerp_with_easing(other, t, EasingType::Linear)
    }
}

/// State of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Running,
    Completed,
    Cancelled,
}

/// A single eased interpolation from one value to another
#[derive(Debug, Clone)]
pub struct Transition<T: Interpolatable> {
    from: T,
    to: T,
    duration: Duration,
    elapsed: Duration,
    easing: EasingType,
    state: TransitionState,
}

impl<T: Interpolatable> Transition<T> {
    pub fn new(from: T, to: T, duration: Duration, easing: EasingType) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
            state: TransitionState::Running,
        }
    }

    /// Advance by one frame and return the interpolated value
    pub fn advance(&mut self, delta: Duration) -> T {
        if self.state != TransitionState::Running {
            return self.current();
        }

        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.state = TransitionState::Completed;
        }
        self.current()
    }

    /// Value at the current progress
    pub fn current(&self) -> T {
        if self.state == TransitionState::Completed {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        self.from.interpolate(&self.to, eased)
    }

    /// Normalized progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }

    pub fn target(&self) -> T {
        self.to
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn cancel(&mut self) {
        self.state = TransitionState::Cancelled;
    }

    pub fn is_finished(&self) -> bool {
        self.state != TransitionState::Running
    }
}

/// Outcome of advancing a [`TransitionSlot`] by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame<T, C> {
    /// No transition in flight
    Idle,
    /// Intermediate value
    Running(T),
    /// Final value and the completion tag the transition was started with
    Finished(T, C),
}

/// Holds at most one in-flight transition for an animated property.
///
/// Starting a new transition cancels the previous one; there is no queue.
/// `C` is a completion tag handed back when the transition finishes.
#[derive(Debug, Clone)]
pub struct TransitionSlot<T: Interpolatable, C: Copy> {
    active: Option<(Transition<T>, C)>,
}

impl<T: Interpolatable, C: Copy> TransitionSlot<T, C> {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Replace any in-flight transition
    pub fn start(&mut self, transition: Transition<T>, on_complete: C) {
        if let Some((previous, _)) = self.active.as_mut() {
            previous.cancel();
        }
        self.active = Some((transition, on_complete));
    }

    pub fn advance(&mut self, delta: Duration) -> Frame<T, C> {
        let Some((transition, tag)) = self.active.as_mut() else {
            return Frame::Idle;
        };

        let value = transition.advance(delta);
        if transition.is_finished() {
            let tag = *tag;
            self.active = None;
            Frame::Finished(value, tag)
        } else {
            Frame::Running(value)
        }
    }

    /// Drop the in-flight transition without applying its target
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn target(&self) -> Option<T> {
        self.active.as_ref().map(|(transition, _)| transition.target())
    }

    pub fn completion(&self) -> Option<C> {
        self.active.as_ref().map(|(_, tag)| *tag)
    }
}

impl<T: Interpolatable, C: Copy> Default for TransitionSlot<T, C> {
    fn default() -> Self {
        Self::new()
    }
}
