//! Session bootstrap parameters.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, ConfigError, MAX_MAZE_DIMENSION, MIN_MAZE_DIMENSION};

/// Chooses what a reset does with the current maze layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetLayout {
    /// Replay the same maze, goal and route.
    #[default]
    SameMaze,
    /// Generate a fresh maze from a seed derived from the reset count.
    NewMaze,
}

/// Parameters supplied by the host when a session starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of maze columns.
    pub width: u32,
    /// Number of maze rows.
    pub height: u32,
    /// Chance that any open cell becomes a reward cell.
    pub reward_probability: f64,
    /// Radius of the player's vision, in cells.
    pub vision_radius: f32,
    /// Player speed, in cells per reference tick.
    pub move_speed: f32,
    /// Manhattan distance the goal must exceed from the start cell.
    pub min_goal_distance: u32,
    /// Seed driving maze generation and goal selection.
    pub seed: u64,
    /// Cell the player starts on.
    pub start: CellCoord,
    /// Path cursor progress per reference tick during the demonstration.
    pub path_progress_per_tick: f32,
    /// Extra progress spent lingering at the goal before play begins.
    pub path_overshoot: f32,
    /// Fraction of the remaining distance the camera closes per tick.
    pub camera_lerp: f32,
    /// What a reset does with the maze layout.
    pub reset_layout: ResetLayout,
}

impl SessionConfig {
    /// Parameters tuned for large viewports.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            width: 25,
            height: 30,
            reward_probability: 0.04,
            vision_radius: 2.5,
            move_speed: 0.28,
            min_goal_distance: 8,
            seed: 0,
            start: CellCoord::new(1, 1),
            path_progress_per_tick: 0.07,
            path_overshoot: 20.0,
            camera_lerp: 0.1,
            reset_layout: ResetLayout::SameMaze,
        }
    }

    /// Parameters tuned for small, constrained viewports.
    #[must_use]
    pub fn constrained() -> Self {
        Self {
            width: 17,
            height: 22,
            vision_radius: 2.0,
            min_goal_distance: 6,
            ..Self::standard()
        }
    }

    /// Returns a copy using the provided seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks every parameter, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_dimension = |value: u32| (MIN_MAZE_DIMENSION..=MAX_MAZE_DIMENSION).contains(&value);
        if !valid_dimension(self.width) || !valid_dimension(self.height) {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if !(0.0..=1.0).contains(&self.reward_probability) {
            return Err(ConfigError::InvalidRewardProbability(
                self.reward_probability,
            ));
        }

        let tuning = [
            ("vision_radius", self.vision_radius),
            ("move_speed", self.move_speed),
            ("path_progress_per_tick", self.path_progress_per_tick),
            ("camera_lerp", self.camera_lerp),
        ];
        for (name, value) in tuning {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidTuning { name, value });
            }
        }
        if !(self.path_overshoot.is_finite() && self.path_overshoot >= 0.0) {
            return Err(ConfigError::InvalidTuning {
                name: "path_overshoot",
                value: self.path_overshoot,
            });
        }
        if self.camera_lerp > 1.0 {
            return Err(ConfigError::InvalidTuning {
                name: "camera_lerp",
                value: self.camera_lerp,
            });
        }

        let start = self.start;
        let interior = start.column() >= 1
            && start.row() >= 1
            && start.column() + 1 < self.width
            && start.row() + 1 < self.height;
        if !interior {
            return Err(ConfigError::InvalidStart {
                column: start.column(),
                row: start.row(),
            });
        }

        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::standard()
    }
}
