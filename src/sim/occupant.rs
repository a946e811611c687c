//! Birds, blocks, and the closed variant that covers both

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8};

use glam::{DVec2, IVec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::stochastic_round;
use super::influence::influence;
use crate::consts::*;
use crate::{euclidean_distance, normalize_angle};
use crate::settings::{Isolation, Steering, Weighting};

/// Bird arrows for the eight 45° heading sectors, starting at east and turning clockwise
const ARROWS: [char; 8] = ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'];

/// Glyph for an empty cell
pub const EMPTY_GLYPH: char = ' ';
/// Glyph for a block
pub const BLOCK_GLYPH: char = '#';

/// Discriminant used by the transport records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OccupantKind {
    Bird = 1,
    Block = 2,
}

impl OccupantKind {
    pub fn discriminant(self) -> u8 {
        self as u8
    }
}

/// Bird identifier, unique within the board that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BirdId(pub u32);

/// A mobile agent with a heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub id: BirdId,
    /// Direction of travel (radians, normalized to [0, 2π))
    heading: f64,
    /// Influence function parameters; per bird so flocks can mix temperaments
    pub a: f64,
    pub b: f64,
}

impl Bird {
    pub fn new(id: BirdId, heading: f64) -> Self {
        Self::with_params(id, heading, DEFAULT_INFLUENCE_A, DEFAULT_INFLUENCE_B)
    }

    pub fn with_params(id: BirdId, heading: f64, a: f64, b: f64) -> Self {
        Self {
            id,
            heading: normalize_angle(heading),
            a,
            b,
        }
    }

    #[inline]
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.heading = normalize_angle(heading);
    }

    /// How strongly a neighbor at distance `d` pulls on this bird
    pub fn influence_at(&self, d: f64) -> f64 {
        influence(d, self.a, self.b)
    }

    /// Recompute the heading from candidate offsets to every other occupant
    ///
    /// Returns the new heading. Offsets are `(Δrow, Δcol)`; the heading points
    /// along the (optionally influence-weighted) sum of all of them.
    pub fn steer(&mut self, offsets: &[IVec2], steering: Steering) -> f64 {
        if offsets.is_empty() && steering.isolation == Isolation::KeepHeading {
            return self.heading;
        }

        let influences: Vec<f64> = offsets
            .iter()
            .map(|o| self.influence_at(euclidean_distance(DVec2::ZERO, o.as_dvec2())))
            .collect();

        let pull: DVec2 = match steering.weighting {
            Weighting::Unweighted => offsets.iter().map(|o| o.as_dvec2()).sum(),
            Weighting::Influence => offsets
                .iter()
                .zip(&influences)
                .filter(|(_, w)| w.is_finite())
                .map(|(o, &w)| o.as_dvec2() * w)
                .sum(),
        };

        let old = self.heading;
        // atan2(0, 0) is 0, so an empty pull yields π/2
        self.heading = normalize_angle(-pull.y.atan2(pull.x) + FRAC_PI_2);
        log::debug!(
            "bird {} heading {:.4} -> {:.4} from {} offsets",
            self.id.0,
            old,
            self.heading,
            offsets.len()
        );
        self.heading
    }

    /// Cell the bird wants to reach from `(row, col)`, before wrapping
    pub fn step<R: Rng + ?Sized>(&self, row: i64, col: i64, speed: f64, rng: &mut R) -> (i64, i64) {
        let new_row = stochastic_round(row as f64 + speed * self.heading.sin(), rng);
        let new_col = stochastic_round(col as f64 + speed * self.heading.cos(), rng);
        log::debug!("bird {} moves ({row},{col}) -> ({new_row},{new_col})", self.id.0);
        (new_row, new_col)
    }

    /// Arrow for the heading's 45° sector, with sector edges between the compass points
    ///
    /// # Panics
    /// If the heading escaped [0, 2π). Normalization makes that unreachable.
    pub fn glyph(&self) -> char {
        let direction = normalize_angle(self.heading + FRAC_PI_8);
        for (i, &arrow) in ARROWS.iter().enumerate() {
            let from = i as f64 * FRAC_PI_4;
            let to = (i + 1) as f64 * FRAC_PI_4;
            if (from..to).contains(&direction) {
                return arrow;
            }
        }
        log::error!("heading {:.4} fell outside every sector", self.heading);
        panic!("bird heading {} is not normalized", self.heading);
    }
}

/// A static obstacle; influences birds but never moves or turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block;

impl Block {
    /// Blocks stay where they are
    pub fn step(&self, row: i64, col: i64) -> (i64, i64) {
        (row, col)
    }

    /// Blocks ignore their neighbors
    pub fn steer(&self, _offsets: &[IVec2], _steering: Steering) -> f64 {
        BLOCK_HEADING
    }

    pub fn glyph(&self) -> char {
        BLOCK_GLYPH
    }
}

/// Anything that can sit on a grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Occupant<'a> {
    Bird(&'a Bird),
    Block(&'a Block),
}

impl Occupant<'_> {
    pub fn kind(&self) -> OccupantKind {
        match self {
            Occupant::Bird(_) => OccupantKind::Bird,
            Occupant::Block(_) => OccupantKind::Block,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Occupant::Bird(bird) => bird.glyph(),
            Occupant::Block(block) => block.glyph(),
        }
    }

    pub fn heading(&self) -> f64 {
        match self {
            Occupant::Bird(bird) => bird.heading(),
            Occupant::Block(_) => BLOCK_HEADING,
        }
    }

    /// Cell the occupant wants next, before wrapping
    pub fn step<R: Rng + ?Sized>(&self, row: i64, col: i64, speed: f64, rng: &mut R) -> (i64, i64) {
        match self {
            Occupant::Bird(bird) => bird.step(row, col, speed, rng),
            Occupant::Block(block) => block.step(row, col),
        }
    }
}
