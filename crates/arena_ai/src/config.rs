//! ArenaConfig: все tunables арены в одном месте
//!
//! JSON (serde_json), отсутствующие поля → defaults (`#[serde(default)]`).
//! `validate()` отсекает отрицательные / не-finite значения.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::actor::{ActorConfig, RespawnConfig};
use crate::ai::{GuardConfig, StrategistConfig};
use crate::combat::BlasterConfig;
use crate::perception::PerceptionConfig;
use crate::pickups::PickupConfig;

/// Ошибки загрузки конфига
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Частота FixedUpdate
    pub tick_hz: f64,
    pub actor: ActorConfig,
    pub perception: PerceptionConfig,
    pub guard: GuardConfig,
    pub strategist: StrategistConfig,
    pub blaster: BlasterConfig,
    pub pickups: PickupConfig,
    pub respawn: RespawnConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            actor: ActorConfig::default(),
            perception: PerceptionConfig::default(),
            guard: GuardConfig::default(),
            strategist: StrategistConfig::default(),
            blaster: BlasterConfig::default(),
            pickups: PickupConfig::default(),
            respawn: RespawnConfig::default(),
        }
    }
}

impl ArenaConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.tick_hz.is_finite() || self.tick_hz <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "tick_hz",
                reason: format!("must be positive, got {}", self.tick_hz),
            });
        }

        let perception = &self.perception;
        let guard = &self.guard;
        let strategist = &self.strategist;
        let weights = &strategist.weights;
        let blaster = &self.blaster;
        let pickups = &self.pickups;
        let respawn = &self.respawn;

        let values = [
            ("actor.max_health", self.actor.max_health),
            ("perception.detection_radius", perception.detection_radius),
            ("perception.eye_height", perception.eye_height),
            ("guard.patrol_speed", guard.patrol_speed),
            ("guard.waypoint_tolerance", guard.waypoint_tolerance),
            ("guard.chase_speed", guard.chase_speed),
            ("guard.search_speed", guard.search_speed),
            ("guard.search_duration", guard.search_duration),
            ("strategist.decision_interval", strategist.decision_interval),
            ("strategist.action_lock_duration", strategist.action_lock_duration),
            ("strategist.critical_health01", strategist.critical_health01),
            ("strategist.normal_speed", strategist.normal_speed),
            ("strategist.flee_speed", strategist.flee_speed),
            ("strategist.flee_distance", strategist.flee_distance),
            ("strategist.flee_sample_radius", strategist.flee_sample_radius),
            ("strategist.ammo_satisfied01", strategist.ammo_satisfied01),
            ("strategist.weights.engage", weights.engage),
            ("strategist.weights.heal", weights.heal),
            ("strategist.weights.collect_ammo", weights.collect_ammo),
            ("strategist.weights.flee", weights.flee),
            ("blaster.damage", blaster.damage),
            ("blaster.projectile_speed", blaster.projectile_speed),
            ("blaster.fire_cooldown", blaster.fire_cooldown),
            ("blaster.projectile_lifetime", blaster.projectile_lifetime),
            ("blaster.muzzle_height", blaster.muzzle_height),
            ("pickups.health_amount", pickups.health_amount),
            ("pickups.respawn_delay", pickups.respawn_delay),
            ("pickups.trigger_radius", pickups.trigger_radius),
            ("respawn.respawn_delay", respawn.respawn_delay),
            ("respawn.spawn_jitter", respawn.spawn_jitter),
        ];

        for (field, value) in values {
            ensure_non_negative(field, value)?;
        }

        Ok(())
    }
}

fn ensure_non_negative(field: &'static str, value: f32) -> ConfigResult<()> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite, got {}", value),
        });
    }
    if value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be >= 0, got {}", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = ArenaConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(config.tick_hz, 60.0);
        assert_eq!(config.perception.detection_radius, 15.0);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "guard": { "search_duration": 5.0 },
            "strategist": { "weights": { "flee": 2.0 } }
        }"#;
        let config = ArenaConfig::from_json_str(json).unwrap();

        assert_eq!(config.guard.search_duration, 5.0);
        assert_eq!(config.guard.chase_speed, 5.0);
        assert_eq!(config.strategist.weights.flee, 2.0);
        assert_eq!(config.strategist.weights.heal, 1.25);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let error = ArenaConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)), "error = {:?}", error);
    }

    #[test]
    fn test_negative_value_rejected() {
        let json = r#"{ "perception": { "detection_radius": -1.0 } }"#;
        let error = ArenaConfig::from_json_str(json).unwrap_err();

        match error {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "perception.detection_radius"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let config = ArenaConfig {
            tick_hz: 0.0,
            ..ArenaConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "tick_hz", .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let error = ArenaConfig::load("/definitely/not/here/arena.json").unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
        assert!(error.to_string().contains("arena.json"));
    }
}
