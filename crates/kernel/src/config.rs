use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::game::COLLISION_PIPE_INDEX;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tuning constants for the game rules.
///
/// `Default` yields the stock game. Missing fields in a config file fall back
/// to the default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Added to the player velocity every tick.
    pub gravity: f32,
    /// Velocity set by a jump.
    pub jump_velocity: f32,
    /// Player is teleported back to 0 once `|position|` exceeds this.
    pub kill_plane: f32,
    /// Horizontal distance between consecutive pipes.
    pub pipe_spacing: f32,
    /// Gap centres are drawn from `[0, pipe_height_range)`.
    pub pipe_height_range: f32,
    /// Scroll distance per tick.
    pub pipe_speed: f32,
    /// Half the vertical opening around a gap centre.
    pub pipe_gap_half_height: f32,
    /// Length of the pipe window.
    pub pipe_count: usize,
    pub cloud_count: usize,
    /// Leftward cloud drift per tick.
    pub cloud_speed: f32,
    /// Clouds left of `-cloud_wrap` reappear at `+cloud_wrap`.
    pub cloud_wrap: f32,
    /// Clouds spawn with `x, y` in `[-cloud_spread, cloud_spread)`.
    pub cloud_spread: f32,
    pub cloud_near: f32,
    pub cloud_far: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: 0.25,
            jump_velocity: -5.0,
            kill_plane: 250.0,
            pipe_spacing: 200.0,
            pipe_height_range: 200.0,
            pipe_speed: 2.0,
            pipe_gap_half_height: 200.0,
            pipe_count: 8,
            cloud_count: 20,
            cloud_speed: 0.5,
            cloud_wrap: 2000.0,
            cloud_spread: 1000.0,
            cloud_near: 300.0,
            cloud_far: 500.0,
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!("loaded game config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the game cannot run with: a pipe window too short for
    /// the collision check, or random ranges that are empty or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipe_count <= COLLISION_PIPE_INDEX {
            return Err(ConfigError::Invalid(format!(
                "pipe_count must be greater than {COLLISION_PIPE_INDEX}, got {}",
                self.pipe_count
            )));
        }
        check_range("pipe_height_range", 0.0, self.pipe_height_range)?;
        check_range("cloud_spread", -self.cloud_spread, self.cloud_spread)?;
        check_range("cloud_near..cloud_far", self.cloud_near, self.cloud_far)?;
        if !is_positive(self.cloud_wrap) {
            return Err(ConfigError::Invalid(format!(
                "cloud_wrap must be positive, got {}",
                self.cloud_wrap
            )));
        }
        Ok(())
    }
}

/// False for zero, negatives, infinities and NaN.
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// A sampled range `[low, high)` needs finite bounds and a finite, positive width.
fn check_range(name: &str, low: f32, high: f32) -> Result<(), ConfigError> {
    if low.is_finite() && high.is_finite() && is_positive(high - low) {
        return Ok(());
    }
    Err(ConfigError::Invalid(format!(
        "{name} must span a finite, non-empty range, got [{low}, {high})"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pipe_count, 8);
        assert_eq!(config.cloud_count, 20);
        assert_eq!(config.gravity, 0.25);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = GameConfig::from_json_str(r#"{ "gravity": 0.5 }"#).unwrap();
        assert_eq!(config.gravity, 0.5);
        assert_eq!(config.pipe_speed, 2.0);
    }

    #[test]
    fn short_pipe_window_is_rejected() {
        let err = GameConfig::from_json_str(r#"{ "pipe_count": 2 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn empty_ranges_are_rejected() {
        for json in [
            r#"{ "pipe_height_range": 0.0 }"#,
            r#"{ "cloud_spread": -1.0 }"#,
            r#"{ "cloud_near": 500.0, "cloud_far": 300.0 }"#,
            r#"{ "cloud_wrap": 0.0 }"#,
            r#"{ "pipe_height_range": 1e39 }"#,
            r#"{ "cloud_spread": 3e38 }"#,
            r#"{ "cloud_near": -3e38, "cloud_far": 3e38 }"#,
        ] {
            assert!(
                matches!(GameConfig::from_json_str(json), Err(ConfigError::Invalid(_))),
                "{json} should be invalid"
            );
        }
    }

    #[test]
    fn huge_ranges_cannot_reach_the_generator() {
        let config = GameConfig {
            cloud_spread: 3e38,
            ..GameConfig::default()
        };
        assert!(matches!(
            crate::FlappyGame::with_seed(config, 1),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn large_finite_ranges_are_accepted() {
        let config = GameConfig::from_json_str(r#"{ "cloud_spread": 1e30 }"#).unwrap();
        assert!(crate::FlappyGame::with_seed(config, 1).is_ok());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = GameConfig::from_json_str("{ gravity").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::from_json_file("/nonexistent/skyflap.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
