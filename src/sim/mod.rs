//! Deterministic simulation module
//!
//! All flocking logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by the board
//! - Stable iteration order (birds in insertion order, blocks first on the grid)
//! - No rendering or I/O dependencies

pub mod board;
pub mod geometry;
pub mod influence;
pub mod occupant;
pub mod tick;

pub use board::{Board, Placed};
pub use geometry::{Offset, stochastic_round, toroidal_offsets};
pub use influence::{influence, influence_curvature, influence_peak, influence_slope, newton_find};
pub use occupant::{Bird, BirdId, Block, Occupant, OccupantKind};
pub use tick::{position_phase, steering_phase, tick};
