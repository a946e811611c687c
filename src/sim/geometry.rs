//! Grid geometry on the torus
//!
//! Offsets are measured in whole cells as `IVec2 { x: Δrow, y: Δcol }`.

use glam::IVec2;
use rand::Rng;

use crate::consts::ROUND_SNAP;

/// Displacement between two cells, `x` along rows and `y` along columns
pub type Offset = IVec2;

/// All four ways to measure the displacement from `(row, col)` to `(orow, ocol)`
/// when the grid wraps.
///
/// Order is fixed: direct, columns unwrapped, both unwrapped, rows unwrapped.
/// Every path is returned so a neighbor is felt across each wrap at once,
/// not only along the shortest one.
pub fn toroidal_offsets(row: i32, col: i32, orow: i32, ocol: i32, rows: i32, cols: i32) -> [Offset; 4] {
    let drow = orow - row;
    let dcol = ocol - col;
    [
        IVec2::new(drow, dcol),
        IVec2::new(drow, dcol - cols),
        IVec2::new(drow - rows, dcol - cols),
        IVec2::new(drow - rows, dcol),
    ]
}

/// Round to a neighboring integer, picking the nearer one more often
///
/// Values within [`ROUND_SNAP`] of an integer snap to it. Anything else lands
/// on `ceil(x)` with probability `x - floor(x)`, otherwise on `floor(x)`.
pub fn stochastic_round<R: Rng + ?Sized>(x: f64, rng: &mut R) -> i64 {
    let nearest = x.round();
    if (x - nearest).abs() < ROUND_SNAP {
        return nearest as i64;
    }

    let low = x.floor();
    let high = x.ceil();
    let draw = rng.random_range(low..=high);
    if draw < x { high as i64 } else { low as i64 }
}
