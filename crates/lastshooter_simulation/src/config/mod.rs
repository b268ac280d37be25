//! Tuning configuration — immutable, грузится один раз при старте
//!
//! # Архитектура
//!
//! **TuningConfig** — статические параметры (rates, durations, thresholds, asset ids):
//! - Bevy `Resource`, читается системами, никогда не мутируется в runtime
//! - TOML файл (`TuningConfig::load`) или `Default` (значения персонажа по умолчанию)
//! - Каждая секция `#[serde(default)]` → в файле можно указать только отличия
//!
//! **Runtime state** (current FOV, crosshair factors, fire flags) живёт в компонентах
//! `ShooterCharacter`, не здесь.

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub mod bindings;

pub use bindings::*;

/// Ошибки конфигурации (только setup, не per-frame)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("missing input binding for {0}")]
    MissingBinding(String),
}

// ============================================================================
// TuningConfig
// ============================================================================

#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub camera: CameraTuning,
    pub look: LookTuning,
    pub crosshair: CrosshairTuning,
    pub fire: FireTuning,
    pub trace: TraceTuning,
    pub items: ItemTuning,
    pub sockets: SocketTuning,
    pub assets: CombatAssets,
}

impl TuningConfig {
    /// Parse + validate TOML
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read TOML file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_fov("camera.default_fov", self.camera.default_fov)?;
        ensure_fov("camera.zoomed_fov", self.camera.zoomed_fov)?;
        ensure_positive("camera.zoom_interp_speed", self.camera.zoom_interp_speed)?;

        ensure_positive("look.hip_turn_rate", self.look.hip_turn_rate)?;
        ensure_positive("look.hip_look_up_rate", self.look.hip_look_up_rate)?;
        ensure_positive("look.aiming_turn_rate", self.look.aiming_turn_rate)?;
        ensure_positive("look.aiming_look_up_rate", self.look.aiming_look_up_rate)?;
        ensure_unit("look.mouse_hip_turn_rate", self.look.mouse_hip_turn_rate)?;
        ensure_unit("look.mouse_hip_look_up_rate", self.look.mouse_hip_look_up_rate)?;
        ensure_unit("look.mouse_aiming_turn_rate", self.look.mouse_aiming_turn_rate)?;
        ensure_unit("look.mouse_aiming_look_up_rate", self.look.mouse_aiming_look_up_rate)?;

        let crosshair = &self.crosshair;
        ensure_finite("crosshair.base_spread", crosshair.base_spread)?;
        ensure_positive("crosshair.walk_speed_max", crosshair.walk_speed_max)?;
        ensure_finite("crosshair.in_air_target", crosshair.in_air_target)?;
        ensure_positive("crosshair.in_air_rate", crosshair.in_air_rate)?;
        ensure_positive("crosshair.landed_rate", crosshair.landed_rate)?;
        ensure_finite("crosshair.aim_target", crosshair.aim_target)?;
        ensure_positive("crosshair.aim_rate", crosshair.aim_rate)?;
        ensure_finite("crosshair.shooting_target", crosshair.shooting_target)?;
        ensure_positive("crosshair.shooting_rate", crosshair.shooting_rate)?;

        ensure_positive("fire.automatic_fire_rate", self.fire.automatic_fire_rate)?;
        ensure_positive("fire.shoot_time_duration", self.fire.shoot_time_duration)?;

        ensure_positive("trace.crosshair_trace_distance", self.trace.crosshair_trace_distance)?;
        let extension = self.trace.beam_extension;
        if !extension.is_finite() || extension < 1.0 {
            return Err(ConfigError::Invalid {
                field: "trace.beam_extension",
                reason: format!("must be finite and >= 1.0, got {}", extension),
            });
        }

        ensure_positive("items.throw_weapon_time", self.items.throw_weapon_time)?;
        ensure_non_negative("items.throw_impulse", self.items.throw_impulse)?;
        ensure_finite("items.throw_roll_deg", self.items.throw_roll_deg)?;
        ensure_non_negative("items.throw_max_yaw_jitter_deg", self.items.throw_max_yaw_jitter_deg)?;

        Ok(())
    }
}

fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite, got {}", value),
        })
    }
}

fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite and > 0, got {}", value),
        })
    }
}

fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite and >= 0, got {}", value),
        })
    }
}

fn ensure_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be in [0, 1], got {}", value),
        })
    }
}

fn ensure_fov(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 180.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be in (0, 180), got {}", value),
        })
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Follow camera zoom
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// FOV без прицеливания (градусы)
    pub default_fov: f32,
    /// FOV при прицеливании (градусы)
    pub zoomed_fov: f32,
    pub zoom_interp_speed: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            default_fov: 90.0,
            zoomed_fov: 35.0,
            zoom_interp_speed: 20.0,
        }
    }
}

/// Look sensitivity (gamepad rates в град/сек, mouse scales в [0, 1])
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LookTuning {
    pub hip_turn_rate: f32,
    pub hip_look_up_rate: f32,
    pub aiming_turn_rate: f32,
    pub aiming_look_up_rate: f32,
    pub mouse_hip_turn_rate: f32,
    pub mouse_hip_look_up_rate: f32,
    pub mouse_aiming_turn_rate: f32,
    pub mouse_aiming_look_up_rate: f32,
}

impl Default for LookTuning {
    fn default() -> Self {
        Self {
            hip_turn_rate: 90.0,
            hip_look_up_rate: 90.0,
            aiming_turn_rate: 20.0,
            aiming_look_up_rate: 20.0,
            mouse_hip_turn_rate: 1.0,
            mouse_hip_look_up_rate: 1.0,
            mouse_aiming_turn_rate: 0.3,
            mouse_aiming_look_up_rate: 0.3,
        }
    }
}

/// Crosshair spread factors: target + interp rate на каждый фактор
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrosshairTuning {
    /// Базовый spread (без модификаторов)
    pub base_spread: f32,
    /// Horizontal speed, при которой velocity factor = 1.0
    pub walk_speed_max: f32,
    pub in_air_target: f32,
    /// Rate роста in-air фактора (в воздухе)
    pub in_air_rate: f32,
    /// Rate спада in-air фактора (приземлились)
    pub landed_rate: f32,
    pub aim_target: f32,
    pub aim_rate: f32,
    pub shooting_target: f32,
    pub shooting_rate: f32,
}

impl Default for CrosshairTuning {
    fn default() -> Self {
        Self {
            base_spread: 0.5,
            walk_speed_max: 600.0,
            in_air_target: 2.25,
            in_air_rate: 2.25,
            landed_rate: 30.0,
            aim_target: 0.6,
            aim_rate: 30.0,
            shooting_target: 0.3,
            shooting_rate: 65.0,
        }
    }
}

/// Fire cadence
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FireTuning {
    /// Секунды между автоматическими выстрелами
    pub automatic_fire_rate: f32,
    /// Длительность crosshair "shooting" pulse (секунды)
    pub shoot_time_duration: f32,
}

impl Default for FireTuning {
    fn default() -> Self {
        Self {
            automatic_fire_rate: 0.1,
            shoot_time_duration: 0.05,
        }
    }
}

/// Hit-scan traces
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TraceTuning {
    /// Дальность crosshair trace (world units)
    pub crosshair_trace_distance: f32,
    /// Muzzle trace продлевается на этот множитель за crosshair endpoint
    pub beam_extension: f32,
}

impl Default for TraceTuning {
    fn default() -> Self {
        Self {
            crosshair_trace_distance: 50_000.0,
            beam_extension: 1.25,
        }
    }
}

/// Weapon drop/throw
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemTuning {
    /// Сколько секунд брошенное оружие падает до возврата в Pickup
    pub throw_weapon_time: f32,
    pub throw_impulse: f32,
    /// Наклон impulse вокруг forward оси (градусы)
    pub throw_roll_deg: f32,
    /// Случайный yaw jitter в [0, max) (градусы)
    pub throw_max_yaw_jitter_deg: f32,
}

impl Default for ItemTuning {
    fn default() -> Self {
        Self {
            throw_weapon_time: 0.7,
            throw_impulse: 20_000.0,
            throw_roll_deg: -20.0,
            throw_max_yaw_jitter_deg: 30.0,
        }
    }
}

/// Skeletal mesh socket names
///
/// Ствол не настраивается здесь: engine присылает его transform в `CharacterRig`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SocketTuning {
    /// Socket руки, к которому цепляется экипированное оружие (`Attachment::socket`)
    pub hand_socket: String,
}

impl Default for SocketTuning {
    fn default() -> Self {
        Self {
            hand_socket: "RightHandSocket".into(),
        }
    }
}

/// Combat asset ids (None = asset не назначен, side effect пропускается)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CombatAssets {
    pub fire_sound: Option<String>,
    pub muzzle_flash: Option<String>,
    pub impact_particles: Option<String>,
    pub beam_particles: Option<String>,
    pub hip_fire_montage: Option<String>,
    pub fire_montage_section: String,
}

impl Default for CombatAssets {
    fn default() -> Self {
        Self {
            fire_sound: Some("sfx/weapon_fire".into()),
            muzzle_flash: Some("fx/muzzle_flash".into()),
            impact_particles: Some("fx/impact".into()),
            beam_particles: Some("fx/smoke_beam".into()),
            hip_fire_montage: Some("anim/hip_fire".into()),
            fire_montage_section: "StartFire".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TuningConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.camera.zoomed_fov, 35.0);
        assert_eq!(config.fire.automatic_fire_rate, 0.1);
        assert_eq!(config.fire.shoot_time_duration, 0.05);
        assert_eq!(config.trace.crosshair_trace_distance, 50_000.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TuningConfig::from_toml_str(
            r#"
            [camera]
            zoomed_fov = 40.0

            [fire]
            automatic_fire_rate = 0.25
            "#,
        )
        .expect("valid config");

        assert_eq!(config.camera.zoomed_fov, 40.0);
        assert_eq!(config.camera.default_fov, 90.0);
        assert_eq!(config.fire.automatic_fire_rate, 0.25);
        assert_eq!(config.fire.shoot_time_duration, 0.05);
        assert_eq!(config.crosshair, CrosshairTuning::default());
    }

    #[test]
    fn test_missing_asset_from_toml() {
        let config = TuningConfig::from_toml_str(
            r#"
            [assets]
            fire_montage_section = "Burst"
            "#,
        )
        .expect("valid config");

        // Секция указана → поля без значения берут default секции
        assert_eq!(config.assets.fire_montage_section, "Burst");
        assert!(config.assets.fire_sound.is_some());
    }

    #[test]
    fn test_rejects_mouse_scale_out_of_range() {
        let err = TuningConfig::from_toml_str(
            r#"
            [look]
            mouse_aiming_turn_rate = 1.5
            "#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid { field: "look.mouse_aiming_turn_rate", .. }
        ));
    }

    #[test]
    fn test_rejects_zero_fire_rate() {
        let mut config = TuningConfig::default();
        config.fire.automatic_fire_rate = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "fire.automatic_fire_rate", .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_crosshair_rates() {
        let err = TuningConfig::from_toml_str(
            r#"
            [crosshair]
            aim_rate = -5.0
            shooting_rate = 0.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "crosshair.aim_rate", .. }
        ));

        let mut config = TuningConfig::default();
        config.crosshair.shooting_rate = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "crosshair.shooting_rate", .. })
        ));

        config.crosshair.shooting_rate = 65.0;
        config.crosshair.in_air_rate = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "crosshair.in_air_rate", .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_crosshair_targets() {
        let mut config = TuningConfig::default();
        config.crosshair.base_spread = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "crosshair.base_spread", .. })
        ));

        let mut config = TuningConfig::default();
        config.crosshair.aim_target = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "crosshair.aim_target", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_zoom_speed() {
        let err = TuningConfig::from_toml_str(
            r#"
            [camera]
            zoom_interp_speed = 0.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "camera.zoom_interp_speed", .. }
        ));
    }

    #[test]
    fn test_rejects_nan_beam_extension() {
        // TOML допускает nan/inf литералы
        let err = TuningConfig::from_toml_str(
            r#"
            [trace]
            beam_extension = nan
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "trace.beam_extension", .. }
        ));

        let mut config = TuningConfig::default();
        config.trace.beam_extension = 0.9;
        assert!(config.validate().is_err());
        config.trace.beam_extension = f32::INFINITY;
        assert!(config.validate().is_err());
        config.trace.beam_extension = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = TuningConfig::from_toml_str("[camera\nzoomed_fov = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = TuningConfig::load("/definitely/not/here/tuning.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
