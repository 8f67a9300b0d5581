use crate::animation::easing::EasingType;
use crate::animation::transitions::Transition;
use std::time::Duration;

/// Fading per-node highlight amounts in `[0, 1]`.
///
/// Each node has its own fade; retargeting a node starts a new fade from
/// wherever the previous one had got to.
#[derive(Debug, Clone, Default)]
pub struct Highlights {
    fades: Vec<Transition<f64>>,
    duration: Duration,
}

impl Highlights {
    pub fn new(count: usize, duration: Duration) -> Self {
        Self {
            fades: (0..count).map(|_| settled(0.0)).collect(),
            duration,
        }
    }

    /// Resizes for a new node set, keeping existing amounts
    pub fn resize(&mut self, count: usize) {
        self.fades.resize_with(count, || settled(0.0));
    }

    /// Fades `node` towards `target`; no-op if already heading there
    pub fn fade_to(&mut self, node: usize, target: f64) {
        let duration = self.duration;
        if let Some(fade) = self.fades.get_mut(node) {
            if fade.target() != target {
                *fade = Transition::new(fade.current(), target, duration, EasingType::EaseInOut);
            }
        }
    }

    /// Fades every node except `keep` back to zero
    pub fn clear_except(&mut self, keep: Option<usize>) {
        for node in 0..self.fades.len() {
            if Some(node) != keep {
                self.fade_to(node, 0.0);
            }
        }
    }

    pub fn amount(&self, node: usize) -> f64 {
        self.fades.get(node).map_or(0.0, Transition::current)
    }

    /// Advances every fade. Returns whether any amount changed.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let mut changed = false;
        for fade in self.fades.iter_mut().filter(|fade| !fade.is_finished()) {
            let before = fade.current();
            changed |= fade.advance(delta) != before;
        }
        changed
    }

    pub fn is_animating(&self) -> bool {
        self.fades.iter().any(|fade| !fade.is_finished())
    }
}

fn settled(value: f64) -> Transition<f64> {
    let mut transition = Transition::new(value, value, Duration::ZERO, EasingType::Linear);
    transition.advance(Duration::ZERO);
    transition
}
