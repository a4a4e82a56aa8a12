//! Data-driven game balance
//!
//! Defaults reproduce the shipped feel. A JSON file may override any subset of fields;
//! missing fields fall back to the defaults.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::PrefabId;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Character controller balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Walk speed (m/s)
    pub move_speed: f32,
    /// Sprint speed (m/s)
    pub sprint_speed: f32,
    /// Look sensitivity (degrees per unit of look input)
    pub rotation_speed: f32,
    /// Horizontal acceleration/deceleration rate
    pub speed_change_rate: f32,
    /// Scale target speed by stick magnitude instead of treating input as digital
    pub analog_movement: bool,

    /// Apex height of a standing jump
    pub jump_height: f32,
    /// Baseline gravity (negative = down)
    pub gravity: f32,
    /// Gravity stops accelerating once vertical velocity reaches this
    pub terminal_velocity: f32,

    /// Time before a jump may be triggered again
    pub jump_timeout: f32,
    /// Time before the fall state is entered
    pub fall_timeout: f32,
    /// Time into a fall before deploying is allowed
    pub deploy_timeout: f32,

    /// Vertical velocity held while standing
    pub grounded_velocity: f32,
    /// Vertical velocity set when the glide opens
    pub glide_entry_velocity: f32,
    /// Velocity the glide eases toward
    pub glide_target_velocity: f32,

    /// Offset of the contact sphere below the feet (negative lifts it)
    pub grounded_offset: f32,
    /// Radius of the contact sphere
    pub grounded_radius: f32,

    /// Highest look pitch (degrees)
    pub top_clamp: f32,
    /// Lowest look pitch (degrees)
    pub bottom_clamp: f32,

    /// Landing faster than this is a bad landing
    pub bad_landing_velocity: f32,
    /// Score for landing after a glide
    pub perfect_landing_bonus: f32,
    /// Health at the start of a run
    pub start_health: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            sprint_speed: 6.0,
            rotation_speed: 1.0,
            speed_change_rate: 10.0,
            analog_movement: false,

            jump_height: 1.2,
            gravity: -15.0,
            terminal_velocity: 53.0,

            jump_timeout: 0.1,
            fall_timeout: 0.15,
            deploy_timeout: 0.8,

            grounded_velocity: -2.0,
            glide_entry_velocity: -2.0,
            glide_target_velocity: -40.0 / 3.0,

            grounded_offset: -0.14,
            grounded_radius: 0.5,

            top_clamp: 90.0,
            bottom_clamp: -90.0,

            bad_landing_velocity: -10.0,
            perfect_landing_bonus: 30000.0,
            start_health: 100.0,
        }
    }
}

/// Island generation balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Where the first island and the player are placed
    pub start_point: Vec3,
    /// Radial ring width per island index, and staircase step of the starter islands
    pub island_spacing: f32,
    /// Vertical band a generated cluster is spread over
    pub layer_band: f32,
    /// How far below the player clusters are placed
    pub drop_depth: f32,
    /// Height delta beyond which generation always happens
    pub force_threshold: i32,
    /// Height delta at or below which generation never happens
    pub min_threshold: i32,
    /// Shape of the generation probability curve, `1 - delta^(-1/falloff)`
    pub probability_falloff: f32,
    /// Largest cluster a single trigger produces
    pub max_cluster: u32,
    /// Islands stepped below the starting island
    pub starter_staircase: u32,
    /// Island prefab ids the bag draws from
    pub prefabs: Vec<PrefabId>,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            start_point: Vec3::new(0.0, 0.0, 0.0),
            island_spacing: 35.0,
            layer_band: 14.0,
            drop_depth: 140.0,
            force_threshold: 70,
            min_threshold: 14,
            probability_falloff: 35.0,
            max_cluster: 3,
            starter_staircase: 4,
            prefabs: (0..6).map(PrefabId).collect(),
        }
    }
}

/// Complete balance set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub world: WorldTuning,
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let p = &self.player;
        if p.gravity >= 0.0 {
            return Err(invalid("player.gravity", "must be negative"));
        }
        if p.terminal_velocity <= 0.0 {
            return Err(invalid("player.terminal_velocity", "must be positive"));
        }
        if p.jump_height < 0.0 {
            return Err(invalid("player.jump_height", "must not be negative"));
        }
        if p.jump_timeout < 0.0 || p.fall_timeout < 0.0 || p.deploy_timeout < 0.0 {
            return Err(invalid("player.*_timeout", "timeouts must not be negative"));
        }
        if p.grounded_radius <= 0.0 {
            return Err(invalid("player.grounded_radius", "must be positive"));
        }
        if p.bottom_clamp > p.top_clamp {
            return Err(invalid("player.bottom_clamp", "must not exceed top_clamp"));
        }
        if p.start_health <= 0.0 {
            return Err(invalid("player.start_health", "must be positive"));
        }

        let w = &self.world;
        if w.island_spacing <= 0.0 {
            return Err(invalid("world.island_spacing", "must be positive"));
        }
        if w.layer_band <= 0.0 {
            return Err(invalid("world.layer_band", "must be positive"));
        }
        if w.probability_falloff <= 0.0 {
            return Err(invalid("world.probability_falloff", "must be positive"));
        }
        if w.min_threshold < 0 || w.min_threshold > w.force_threshold {
            return Err(invalid(
                "world.min_threshold",
                "must be within 0..=force_threshold",
            ));
        }
        if w.max_cluster == 0 {
            return Err(invalid("world.max_cluster", "must be at least 1"));
        }
        if w.prefabs.is_empty() {
            return Err(invalid("world.prefabs", "must list at least one island prefab"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player": { "gravity": -20.0 } }"#).unwrap();
        assert_eq!(tuning.player.gravity, -20.0);
        assert_eq!(tuning.player.jump_height, 1.2);
        assert_eq!(tuning.world, WorldTuning::default());
    }

    #[test]
    fn test_prefab_ids_parse_as_plain_numbers() {
        let tuning = Tuning::from_json(r#"{ "world": { "prefabs": [3, 7] } }"#).unwrap();
        assert_eq!(tuning.world.prefabs, vec![PrefabId(3), PrefabId(7)]);
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let err = Tuning::from_json(r#"{ "player": { "gravity": 15.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "player.gravity",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_prefab_list() {
        let err = Tuning::from_json(r#"{ "world": { "prefabs": [] } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "world.prefabs",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ player: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }
}
