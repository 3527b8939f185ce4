use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::time::Millis;

/// Tunable constants of a draw session.
///
/// Every field has a default, so a JSON override only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Time between two preview ticks
    pub tick_interval_ms: Millis,
    /// Base number of preview ticks before scaling
    pub min_ticks: u32,
    /// Exclusive upper bound of the unscaled tick count
    pub max_ticks: u32,
    /// Multiplier applied to the unscaled tick count
    pub duration_scale: f64,
    /// Every n-th tick (counting from zero) emits an emphasis pulse
    pub emphasis_frequency: u32,
    /// How long an emphasis pulse stays visible
    pub emphasis_duration_ms: Millis,
    /// How long the winner reveal highlight stays visible
    pub winner_highlight_ms: Millis,
    /// Number of draws that can be undone
    pub undo_capacity: usize,
    pub min_participants: u32,
    pub max_participants: u32,
    /// Display names are `"{name_prefix} {id}"`
    pub name_prefix: String,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 80,
            min_ticks: 20,
            max_ticks: 35,
            duration_scale: 0.5,
            emphasis_frequency: 5,
            emphasis_duration_ms: 200,
            winner_highlight_ms: 400,
            undo_capacity: 10,
            min_participants: 1,
            max_participants: 1000,
            name_prefix: "Demo".to_owned(),
        }
    }
}

impl DrawConfig {
    /// Parses overrides from JSON on top of the defaults and validates the result
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.min_ticks > self.max_ticks {
            return Err(ConfigError::Invalid(format!(
                "min_ticks ({}) exceeds max_ticks ({})",
                self.min_ticks, self.max_ticks
            )));
        }
        if !self.duration_scale.is_finite() || self.duration_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "duration_scale must be a positive number, got {}",
                self.duration_scale
            )));
        }
        if self.emphasis_frequency == 0 {
            return Err(ConfigError::Invalid("emphasis_frequency must be positive".into()));
        }
        if self.undo_capacity == 0 {
            return Err(ConfigError::Invalid("undo_capacity must be positive".into()));
        }
        if self.min_participants == 0 || self.min_participants > self.max_participants {
            return Err(ConfigError::Invalid(format!(
                "participant bounds [{}, {}] are not a valid range starting at 1 or more",
                self.min_participants, self.max_participants
            )));
        }
        Ok(())
    }
}
