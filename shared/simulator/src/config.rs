use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 600.0;
pub const PLAYER_MOVE_FORCE: f64 = 1500.0;
pub const PLAYER_TURN_RATE: f64 = 1.0;
pub const DEFAULT_ASTEROID_COUNT: usize = 30;
/// Largest accepted width or height.
pub const MAX_SCREEN_SIZE: f64 = 100_000.0;

/// Settings for a game session.
///
/// Missing fields in a JSON config file fall back to the defaults, so a file
/// only needs to mention what it changes.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub width: f64,
    pub height: f64,
    /// `None` picks a random seed when the simulation starts.
    pub seed: Option<u64>,
    pub scenario: String,
    pub asteroid_count: usize,
    pub player_move_force: f64,
    pub turn_rate: f64,
    pub salvage: bool,
    pub walls: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            seed: None,
            scenario: "field".to_string(),
            asteroid_count: DEFAULT_ASTEROID_COUNT,
            player_move_force: PLAYER_MOVE_FORCE,
            turn_rate: PLAYER_TURN_RATE,
            salvage: false,
            walls: false,
        }
    }
}

impl GameConfig {
    pub fn from_json_file(path: &Path) -> Result<GameConfig, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<GameConfig, Error> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!("{name} must be positive, got {v}")))
            }
        };
        positive("width", self.width)?;
        positive("height", self.height)?;
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if v > MAX_SCREEN_SIZE {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be at most {MAX_SCREEN_SIZE}, got {v}"
                )));
            }
        }
        if !self.player_move_force.is_finite() || self.player_move_force < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "player_move_force must be a non-negative number, got {}",
                self.player_move_force
            )));
        }
        if !self.turn_rate.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "turn_rate must be finite, got {}",
                self.turn_rate
            )));
        }
        if self.scenario.is_empty() {
            return Err(Error::InvalidConfig("scenario name is empty".into()));
        }
        Ok(())
    }
}
