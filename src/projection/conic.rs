use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

const EPSILON: f64 = 1e-6;

fn tany(phi: f64) -> f64 {
    ((FRAC_PI_2 + phi) / 2.0).tan()
}

/// Unscaled projection from rotated (lambda, phi) radians to the plane, y up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RawProjection {
    /// Lambert conformal conic with cone constant `n` and radius factor `f`
    ConicConformal { n: f64, f: f64 },
    Mercator,
}

impl RawProjection {
    /// Conformal conic through two standard parallels (degrees).
    ///
    /// A cone constant that is zero or not finite (parallels symmetric about
    /// the equator, or one of them beyond a pole) has no conic solution and
    /// falls back to Mercator, the cylindrical limit of the same family.
    pub fn conic_conformal(parallels: [f64; 2]) -> Self {
        let y0 = parallels[0].to_radians();
        let y1 = parallels[1].to_radians();
        let cy0 = y0.cos();

        let n = if (y0 - y1).abs() < f64::EPSILON {
            y0.sin()
        } else {
            (cy0 / y1.cos()).ln() / (tany(y1) / tany(y0)).ln()
        };

        if n == 0.0 || !n.is_finite() {
            log::debug!(
                "degenerate cone constant for parallels {:?}, using Mercator",
                parallels
            );
            return RawProjection::Mercator;
        }

        let f = cy0 * tany(y0).powf(n) / n;
        if !f.is_finite() {
            return RawProjection::Mercator;
        }

        RawProjection::ConicConformal { n, f }
    }

    pub fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        match *self {
            RawProjection::ConicConformal { n, f } => {
                let phi = if f > 0.0 {
                    phi.max(-FRAC_PI_2 + EPSILON)
                } else {
                    phi.min(FRAC_PI_2 - EPSILON)
                };
                let r = f / tany(phi).powf(n);
                (r * (n * lambda).sin(), f - r * (n * lambda).cos())
            }
            RawProjection::Mercator => (lambda, tany(phi).ln()),
        }
    }

    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        match *self {
            RawProjection::ConicConformal { n, f } => {
                let fy = f - y;
                let r = n.signum() * (x * x + fy * fy).sqrt();
                let mut l = x.atan2(fy.abs()) * fy.signum();
                if fy * n < 0.0 {
                    l -= PI * x.signum() * fy.signum();
                }
                let phi = 2.0 * (f / r).powf(1.0 / n).atan() - FRAC_PI_2;
                (l / n, phi)
            }
            RawProjection::Mercator => (x, 2.0 * y.exp().atan() - FRAC_PI_2),
        }
    }
}
