//! Torus Flock - flocking birds on a wraparound grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, occupants, board, tick)
//! - `render`: Console rendering of the board
//! - `snapshot`: Transport records for the excluded HTTP layer
//! - `settings`: Run configuration

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use error::{BoardError, ConfigError};
pub use settings::{Isolation, SimConfig, Steering, Weighting};
pub use sim::{Bird, BirdId, Block, Board, Occupant, OccupantKind, Placed};
pub use snapshot::{BoardSnapshot, OccupantRecord};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Default bird speed in cells per tick
    pub const DEFAULT_SPEED: f64 = 5.0;
    /// Values this close to an integer are rounded to it without a random draw
    pub const ROUND_SNAP: f64 = 0.01;
    /// Fixed Newton-Raphson iteration count for the influence maximum finder
    pub const NEWTON_ITERATIONS: usize = 10;

    /// Influence function parameters for a default bird
    pub const DEFAULT_INFLUENCE_A: f64 = 1.0;
    pub const DEFAULT_INFLUENCE_B: f64 = 1.0;

    /// Seed used when a board is created without one
    pub const DEFAULT_SEED: u64 = 2;

    /// Console run defaults
    pub const DEFAULT_ROWS: usize = 10;
    pub const DEFAULT_COLS: usize = 20;
    pub const DEFAULT_BIRDS: usize = 10;
    pub const DEFAULT_TICKS: u64 = 109;

    /// Heading reported by a block; blocks never turn
    pub const BLOCK_HEADING: f64 = 0.0;
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Straight-line distance between two points
#[inline]
pub fn euclidean_distance(p1: DVec2, p2: DVec2) -> f64 {
    p1.distance(p2)
}
