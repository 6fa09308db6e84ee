use serde::{Deserialize, Serialize};

use crate::*;

/// Fraction of the full cube (origin included) that becomes triggers, per difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerRatios {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
}

impl TriggerRatios {
    pub const fn get(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for TriggerRatios {
    fn default() -> Self {
        Self {
            easy: 0.18,
            medium: 0.22,
            hard: 0.25,
        }
    }
}

/// Tunable rules of a round.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub trigger_ratios: TriggerRatios,
    /// Probability that revealing a cell also reveals a given hidden safe neighbor.
    pub cascade_chance: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            trigger_ratios: TriggerRatios::default(),
            cascade_chance: 0.2,
        }
    }
}

impl RulesConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_probability(self.cascade_chance) {
            return Err(GameError::InvalidCascadeChance);
        }
        for difficulty in Difficulty::ALL {
            self.grid_config(difficulty)?;
        }
        Ok(())
    }

    pub fn grid_config(&self, difficulty: Difficulty) -> Result<GridConfig> {
        let ratio = self.trigger_ratios.get(difficulty);
        if !is_probability(ratio) {
            return Err(GameError::InvalidRatio);
        }
        let extent = difficulty.level();
        let side = side_len(extent) as f64;
        // truncation is floor for the non-negative product
        let triggers = (side * side * side * ratio) as CellCount;
        GridConfig::new(extent, triggers)
    }
}

pub(crate) fn is_probability(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// Shape of one generated grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub extent: u8,
    pub triggers: CellCount,
}

impl GridConfig {
    pub(crate) const fn new_unchecked(extent: u8, triggers: CellCount) -> Self {
        Self { extent, triggers }
    }

    pub fn validate_extent(extent: u8) -> Result<u8> {
        if (1..=MAX_EXTENT).contains(&extent) {
            Ok(extent)
        } else {
            Err(GameError::InvalidExtent(extent))
        }
    }

    /// Rejects unrepresentable extents and layouts where triggers would fill the whole grid.
    pub fn new(extent: u8, triggers: CellCount) -> Result<Self> {
        let extent = Self::validate_extent(extent)?;
        let cells = cell_count(extent);
        if triggers >= cells {
            return Err(GameError::TooManyTriggers { triggers, cells });
        }
        Ok(Self::new_unchecked(extent, triggers))
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.extent)
    }

    pub const fn goal(&self) -> CellCount {
        self.total_cells() - self.triggers
    }
}
