use serde::{Deserialize, Serialize};

use crate::core::table::TableConfig;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Cue power slider range in display units; the default sits at 5.
pub const CUE_POWER_SLIDER: (f32, f32) = (1.0, 10.0);
/// Pocket size slider range in display units.
pub const POCKET_SIZE_SLIDER: (f32, f32) = (0.8, 1.5);

/// Map the cue power slider to a velocity multiplier (5 on the slider is 1.0).
pub fn cue_sensitivity_from_slider(display: f32) -> f32 {
    clamp_display(display, CUE_POWER_SLIDER, 5.0) / 5.0
}

/// Map the pocket size slider to a pocket sensitivity (1.0 on the slider is 1.2).
pub fn pocket_sensitivity_from_slider(display: f32) -> f32 {
    clamp_display(display, POCKET_SIZE_SLIDER, 1.0) * 1.2
}

fn clamp_display(display: f32, (min, max): (f32, f32), fallback: f32) -> f32 {
    if display.is_nan() {
        log::warn!("slider value is NaN, using {}", fallback);
        return fallback;
    }
    if display < min || display > max {
        log::debug!("slider value {} clamped to [{}, {}]", display, min, max);
    }
    display.clamp(min, max)
}

/// Top-level configuration.
/// Every field has a default, so a host may pass a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds per simulation frame; all physics constants are per frame.
    pub fixed_dt: f32,
    /// Canvas size in world pixels.
    pub world_width: f32,
    pub world_height: f32,
    /// Sound slots per host frame.
    pub max_sounds: usize,
    /// HUD event slots per host frame.
    pub max_events: usize,
    /// Multiplier on shot power.
    pub cue_sensitivity: f32,
    /// Seconds after a loss before the table is re-racked. `None` waits for
    /// an explicit restart.
    pub auto_restart_secs: Option<f32>,
    pub table: TableConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 1400.0,
            world_height: 900.0,
            max_sounds: 32,
            max_events: 32,
            cue_sensitivity: 1.0,
            auto_restart_secs: Some(2.0),
            table: TableConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fixed_dt", self.fixed_dt)?;
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("cue_sensitivity", self.cue_sensitivity)?;
        if let Some(secs) = self.auto_restart_secs {
            if !secs.is_finite() || secs < 0.0 {
                return Err(ConfigError::Invalid {
                    field: "auto_restart_secs",
                    reason: format!("must be a non-negative number, got {}", secs),
                });
            }
        }

        let t = &self.table;
        positive("table.felt_width", t.felt_width)?;
        positive("table.felt_height", t.felt_height)?;
        positive("table.ball_radius", t.ball_radius)?;
        positive("table.pocket_radius", t.pocket_radius)?;
        positive("table.corner_pocket_radius", t.corner_pocket_radius)?;
        positive("table.middle_pocket_radius", t.middle_pocket_radius)?;
        positive("table.pocket_sensitivity", t.pocket_sensitivity)?;
        positive("table.corner_pocket_angle", t.corner_pocket_angle)?;
        if !t.cushion_width.is_finite() || t.cushion_width < 0.0 {
            return Err(ConfigError::Invalid {
                field: "table.cushion_width",
                reason: format!("must be a non-negative number, got {}", t.cushion_width),
            });
        }
        if t.ball_radius * 4.0 > t.felt_width.min(t.felt_height) {
            return Err(ConfigError::Invalid {
                field: "table.ball_radius",
                reason: format!(
                    "a ball of radius {} does not fit a {}x{} felt",
                    t.ball_radius, t.felt_width, t.felt_height
                ),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {}", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_table() {
        let c = GameConfig::default();
        assert_eq!(c.world_width, 1400.0);
        assert_eq!(c.world_height, 900.0);
        assert_eq!(c.table.felt_width, 1100.0);
        assert_eq!(c.table.ball_radius, 20.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "cue_sensitivity": 1.4, "table": { "pocket_sensitivity": 1.2 } }"#;
        let c = GameConfig::from_json(json).expect("valid config");
        assert_eq!(c.cue_sensitivity, 1.4);
        assert_eq!(c.table.pocket_sensitivity, 1.2);
        assert_eq!(c.table.felt_height, 600.0);
        assert_eq!(c.auto_restart_secs, Some(2.0));
    }

    #[test]
    fn null_auto_restart_disables_it() {
        let c = GameConfig::from_json(r#"{ "auto_restart_secs": null }"#).expect("valid config");
        assert_eq!(c.auto_restart_secs, None);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_non_positive_values() {
        let err = GameConfig::from_json(r#"{ "fixed_dt": 0.0 }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "fixed_dt"),
            other => panic!("expected Invalid, got {:?}", other),
        }
        let err = GameConfig::from_json(r#"{ "table": { "ball_radius": 400.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "table.ball_radius",
                ..
            }
        ));
    }

    #[test]
    fn slider_mappings() {
        assert!((cue_sensitivity_from_slider(5.0) - 1.0).abs() < 1e-6);
        assert!((cue_sensitivity_from_slider(10.0) - 2.0).abs() < 1e-6);
        assert!((cue_sensitivity_from_slider(0.0) - 0.2).abs() < 1e-6);
        assert!((pocket_sensitivity_from_slider(1.0) - 1.2).abs() < 1e-6);
        assert!((pocket_sensitivity_from_slider(3.0) - 1.8).abs() < 1e-6);
        assert!((pocket_sensitivity_from_slider(f32::NAN) - 1.2).abs() < 1e-6);
    }
}
