//! The torus board and its occupants
//!
//! The board owns everything a run needs to be reproducible: the grid, the
//! authoritative bird and block lists, the bird id counter, and the RNG.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::occupant::{Bird, BirdId, Block, Occupant};
use crate::consts::*;
use crate::error::BoardError;
use crate::settings::{SimConfig, Steering};

/// An occupant together with the cell it sits on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placed<T> {
    pub row: usize,
    pub col: usize,
    pub occupant: T,
}

/// Grid entry pointing into the bird or block list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Bird(usize),
    Block(usize),
}

/// Reduce a possibly negative or oversized index onto `0..len`
#[inline]
pub(crate) fn wrap_index(value: i64, len: usize) -> usize {
    value.rem_euclid(len as i64) as usize
}

/// Flocking board on a torus (deterministic, single owner)
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cells, `rows * cols` long
    pub(crate) grid: Vec<Option<Slot>>,
    /// Birds in creation order
    pub(crate) birds: Vec<Placed<Bird>>,
    pub(crate) blocks: Vec<Placed<Block>>,
    /// Cells a bird advances per tick
    pub(crate) speed: f64,
    pub(crate) steering: Steering,
    /// Influence parameters handed to new birds
    influence_a: f64,
    influence_b: f64,
    seed: u64,
    pub(crate) rng: Pcg32,
    /// Completed ticks
    pub(crate) ticks: u64,
    next_bird_id: u32,
}

impl Board {
    /// Create an empty board seeded with [`DEFAULT_SEED`]
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        Self::with_seed(rows, cols, DEFAULT_SEED)
    }

    /// Create an empty board with the given RNG seed
    pub fn with_seed(rows: usize, cols: usize, seed: u64) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyDimension { rows, cols });
        }
        log::debug!("Board::new({rows}, {cols}) seed={seed}");
        Ok(Self {
            rows,
            cols,
            grid: vec![None; rows * cols],
            birds: Vec::new(),
            blocks: Vec::new(),
            speed: DEFAULT_SPEED,
            steering: Steering::default(),
            influence_a: DEFAULT_INFLUENCE_A,
            influence_b: DEFAULT_INFLUENCE_B,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
            next_bird_id: 0,
        })
    }

    /// Build a board from settings and scatter its birds and blocks
    ///
    /// Blocks are placed before birds.
    pub fn from_config(config: &SimConfig) -> Result<Self, BoardError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut board = Self::with_seed(config.rows, config.cols, seed)?
            .with_speed(config.speed)
            .with_steering(config.steering())
            .with_influence(config.influence_a, config.influence_b);

        for _ in 0..config.blocks {
            board.add_random_block();
        }
        for _ in 0..config.birds {
            board.add_random_bird();
        }
        log::info!(
            "Board {}x{} ready: {} birds, {} blocks, seed {}",
            board.rows,
            board.cols,
            board.birds.len(),
            board.blocks.len(),
            seed
        );
        Ok(board)
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_steering(mut self, steering: Steering) -> Self {
        self.steering = steering;
        self
    }

    /// Influence parameters for birds added from now on
    pub fn with_influence(mut self, a: f64, b: f64) -> Self {
        self.influence_a = a;
        self.influence_b = b;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn steering(&self) -> Steering {
        self.steering
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn birds(&self) -> &[Placed<Bird>] {
        &self.birds
    }

    pub fn blocks(&self) -> &[Placed<Block>] {
        &self.blocks
    }

    /// Wrap any integer cell onto the torus
    #[inline]
    pub fn wrap(&self, row: i64, col: i64) -> (usize, usize) {
        (wrap_index(row, self.rows), wrap_index(col, self.cols))
    }

    #[inline]
    pub(crate) fn cell_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Occupant at a cell; indices wrap around both axes
    pub fn get(&self, row: i64, col: i64) -> Option<Occupant<'_>> {
        let (row, col) = self.wrap(row, col);
        self.slot_at(row, col).map(|slot| self.resolve(slot))
    }

    pub fn is_free(&self, row: i64, col: i64) -> bool {
        self.get(row, col).is_none()
    }

    pub(crate) fn slot_at(&self, row: usize, col: usize) -> Option<Slot> {
        self.grid[self.cell_index(row, col)]
    }

    pub(crate) fn resolve(&self, slot: Slot) -> Occupant<'_> {
        match slot {
            Slot::Bird(i) => Occupant::Bird(&self.birds[i].occupant),
            Slot::Block(i) => Occupant::Block(&self.blocks[i].occupant),
        }
    }

    /// Point a wrapped cell at a slot
    fn set(&mut self, row: i64, col: i64, slot: Option<Slot>) {
        let (row, col) = self.wrap(row, col);
        let index = self.cell_index(row, col);
        self.grid[index] = slot;
    }

    fn next_id(&mut self) -> BirdId {
        let id = self.next_bird_id;
        self.next_bird_id += 1;
        BirdId(id)
    }

    /// Place a bird at a cell with the given heading (normalized on entry)
    pub fn add_bird(&mut self, row: i64, col: i64, angle: f64) -> Result<BirdId, BoardError> {
        let (row, col) = self.wrap(row, col);
        if self.slot_at(row, col).is_some() {
            return Err(BoardError::Occupied { row, col });
        }
        Ok(self.insert_bird(row, col, angle))
    }

    /// Place a block at a cell
    pub fn add_block(&mut self, row: i64, col: i64) -> Result<(), BoardError> {
        let (row, col) = self.wrap(row, col);
        if self.slot_at(row, col).is_some() {
            return Err(BoardError::Occupied { row, col });
        }
        self.insert_block(row, col);
        Ok(())
    }

    /// Place a bird with a random heading on a random free cell
    ///
    /// Retries without limit; on a full board this never returns.
    pub fn add_random_bird(&mut self) -> BirdId {
        let (row, col) = self.random_free_cell();
        let angle = self.rng.random_range(0.0..TAU);
        log::info!("adding random bird at ({row},{col}) angle {angle:.4}");
        self.insert_bird(row, col, angle)
    }

    /// Place a block on a random free cell
    ///
    /// Retries without limit; on a full board this never returns.
    pub fn add_random_block(&mut self) {
        let (row, col) = self.random_free_cell();
        log::info!("adding random block at ({row},{col})");
        self.insert_block(row, col);
    }

    /// Caller guarantees `(row, col)` is in bounds and free
    fn insert_bird(&mut self, row: usize, col: usize, angle: f64) -> BirdId {
        let id = self.next_id();
        let bird = Bird::with_params(id, angle, self.influence_a, self.influence_b);
        self.birds.push(Placed {
            row,
            col,
            occupant: bird,
        });
        self.set(row as i64, col as i64, Some(Slot::Bird(self.birds.len() - 1)));
        log::debug!("bird {} added at ({row},{col})", id.0);
        id
    }

    /// Caller guarantees `(row, col)` is in bounds and free
    fn insert_block(&mut self, row: usize, col: usize) {
        self.blocks.push(Placed {
            row,
            col,
            occupant: Block,
        });
        self.set(row as i64, col as i64, Some(Slot::Block(self.blocks.len() - 1)));
        log::debug!("block added at ({row},{col})");
    }

    fn random_free_cell(&mut self) -> (usize, usize) {
        loop {
            let row = self.rng.random_range(0..self.rows);
            let col = self.rng.random_range(0..self.cols);
            if self.slot_at(row, col).is_none() {
                return (row, col);
            }
            log::debug!("cell ({row},{col}) is occupied, retrying");
        }
    }

    /// Advance one tick: steer every bird, then move every bird
    pub fn tick(&mut self) {
        super::tick::tick(self);
    }
}
