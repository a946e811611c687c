//! Run configuration
//!
//! Loaded from JSON or assembled from command-line flags.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How neighbor offsets are combined into a heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// Sum raw offsets; the influence value is computed but not applied
    #[default]
    Unweighted,
    /// Scale each offset by its influence before summing
    Influence,
}

impl Weighting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weighting::Unweighted => "unweighted",
            Weighting::Influence => "influence",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unweighted" | "raw" => Some(Weighting::Unweighted),
            "influence" | "weighted" => Some(Weighting::Influence),
            _ => None,
        }
    }
}

/// What a bird does when there is nothing else on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Isolation {
    /// Leave the heading untouched
    #[default]
    KeepHeading,
    /// Steer from the empty sum, which always points down (π/2)
    Reset,
}

impl Isolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Isolation::KeepHeading => "keep",
            Isolation::Reset => "reset",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keep" | "keep_heading" => Some(Isolation::KeepHeading),
            "reset" => Some(Isolation::Reset),
            _ => None,
        }
    }
}

/// Steering rules shared by every bird on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Steering {
    pub weighting: Weighting,
    pub isolation: Isolation,
}

/// Simulation run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Board ===
    pub rows: usize,
    pub cols: usize,
    /// Birds placed at random cells on creation
    pub birds: usize,
    /// Blocks placed at random cells on creation
    pub blocks: usize,

    // === Motion ===
    /// Cells advanced per tick along the heading
    pub speed: f64,
    /// RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,

    // === Steering ===
    pub influence_a: f64,
    pub influence_b: f64,
    pub weighting: Weighting,
    pub isolation: Isolation,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            birds: DEFAULT_BIRDS,
            blocks: 0,

            speed: DEFAULT_SPEED,
            seed: Some(DEFAULT_SEED),

            influence_a: DEFAULT_INFLUENCE_A,
            influence_b: DEFAULT_INFLUENCE_B,
            weighting: Weighting::default(),
            isolation: Isolation::default(),
        }
    }
}

impl SimConfig {
    /// Read settings from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Steering rules for the board
    pub fn steering(&self) -> Steering {
        Steering {
            weighting: self.weighting,
            isolation: self.isolation,
        }
    }

    /// Reject settings that would build a broken board or hang placement
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Invalid("rows and cols must be non-zero"));
        }
        if !self.speed.is_finite() {
            return Err(ConfigError::Invalid("speed must be finite"));
        }
        if !self.influence_a.is_finite() || !self.influence_b.is_finite() {
            return Err(ConfigError::Invalid("influence parameters must be finite"));
        }
        // Random placement retries forever once every cell is taken
        let capacity = self.rows.saturating_mul(self.cols);
        if self.birds.saturating_add(self.blocks) > capacity {
            return Err(ConfigError::Invalid("more occupants than board cells"));
        }
        Ok(())
    }
}
