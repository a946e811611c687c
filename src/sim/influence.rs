//! The influence a neighbor exerts at a given distance
//!
//! `f(d) = ln(a·d) · sin(1/(b+d))`, plus its first two derivatives and a
//! Newton-Raphson finder for the distance where the influence peaks. The
//! finder is an analysis aid; ticks only evaluate `influence` itself.

use crate::consts::NEWTON_ITERATIONS;

/// Influence at distance `d`; negative infinity outside the log's domain
pub fn influence(d: f64, a: f64, b: f64) -> f64 {
    if d <= 0.0 || a * d <= 0.0 {
        return f64::NEG_INFINITY;
    }
    let value = (a * d).ln() * (1.0 / (b + d)).sin();
    if value.is_nan() { f64::NEG_INFINITY } else { value }
}

/// First derivative of [`influence`] with respect to distance
pub fn influence_slope(x: f64, a: f64, b: f64) -> f64 {
    let inv = 1.0 / (b + x);
    1.0 / x * inv.sin() - (a * x).ln() * inv.cos() * inv.powi(2)
}

/// Second derivative of [`influence`] with respect to distance
pub fn influence_curvature(x: f64, a: f64, b: f64) -> f64 {
    let inv = 1.0 / (b + x);
    (a * x).ln() * (2.0 * inv.cos() * inv.powi(3) - inv.sin() * inv.powi(4))
        - inv.sin() / x.powi(2)
        - 2.0 * inv.cos() * inv.powi(2) / x
}

/// Newton-Raphson root search for `f`, starting from `x`
///
/// Runs a fixed number of iterations, stopping early only on an exactly
/// zero derivative. No convergence check.
pub fn newton_find(f: impl Fn(f64) -> f64, df: impl Fn(f64) -> f64, mut x: f64) -> f64 {
    for i in 0..NEWTON_ITERATIONS {
        let slope = df(x);
        log::debug!("newton iteration {i}: x={x:.4} f={:.4} df={slope:.4}", f(x));
        if slope == 0.0 {
            return x;
        }
        x -= f(x) / slope;
    }
    x
}

/// Distance at which the influence for `(a, b)` peaks, starting from its zero at `1/a`
pub fn influence_peak(a: f64, b: f64) -> f64 {
    newton_find(
        |x| influence_slope(x, a, b),
        |x| influence_curvature(x, a, b),
        1.0 / a,
    )
}
