//! Camera domain — follow camera zoom + look sensitivity
//!
//! # Архитектура
//!
//! - `CameraZoom` — current FOV, каждый frame интерполируется к zoomed/default
//! - `LookRates` — base turn/look rates, выбираются по aim flag (без интерполяции)
//! - Mouse scaling — hip/aiming множители для mouse delta
//! - Yaw-only axes — forward/right для movement input
//!
//! Simulation только считает значения. FOV уходит в engine как
//! `PresentationCommand::SetCameraFov`, rotation delta — как `ControlRotationDelta`.
//!
//! Система координат: Y-up, yaw = 0 смотрит в -Z, yaw растёт против часовой (вид сверху).

use bevy::prelude::*;

use crate::config::{CameraTuning, LookTuning};
use crate::shared::approach;


/// Follow camera zoom state
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct CameraZoom {
    pub default_fov: f32,
    pub zoomed_fov: f32,
    /// Текущий FOV (мутируется раз в frame)
    pub current_fov: f32,
    pub interp_speed: f32,
}

impl CameraZoom {
    /// Стартуем с default FOV
    pub fn from_tuning(tuning: &CameraTuning) -> Self {
        Self {
            default_fov: tuning.default_fov,
            zoomed_fov: tuning.zoomed_fov,
            current_fov: tuning.default_fov,
            interp_speed: tuning.zoom_interp_speed,
        }
    }

    pub fn target_fov(&self, aiming: bool) -> f32 {
        if aiming {
            self.zoomed_fov
        } else {
            self.default_fov
        }
    }

    /// Один approach шаг к target; возвращает новый current FOV
    pub fn update(&mut self, aiming: bool, delta_time: f32) -> f32 {
        self.current_fov = approach(
            self.current_fov,
            self.target_fov(aiming),
            delta_time,
            self.interp_speed,
        );
        self.current_fov
    }
}

/// Base turn/look rates (gamepad, град/сек)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct LookRates {
    pub base_turn_rate: f32,
    pub base_look_up_rate: f32,
}

impl LookRates {
    /// До первого frame — hip rates
    pub fn from_tuning(tuning: &LookTuning) -> Self {
        Self {
            base_turn_rate: tuning.hip_turn_rate,
            base_look_up_rate: tuning.hip_look_up_rate,
        }
    }

    /// Прямой выбор по aim flag (не интерполируется)
    pub fn select(&mut self, aiming: bool, tuning: &LookTuning) {
        if aiming {
            self.base_turn_rate = tuning.aiming_turn_rate;
            self.base_look_up_rate = tuning.aiming_look_up_rate;
        } else {
            self.base_turn_rate = tuning.hip_turn_rate;
            self.base_look_up_rate = tuning.hip_look_up_rate;
        }
    }

    /// Yaw delta (градусы) для normalized gamepad rate
    pub fn turn_at_rate(&self, rate: f32, delta_time: f32) -> f32 {
        rate * self.base_turn_rate * delta_time
    }

    /// Pitch delta (градусы) для normalized gamepad rate
    pub fn look_up_at_rate(&self, rate: f32, delta_time: f32) -> f32 {
        rate * self.base_look_up_rate * delta_time
    }
}

/// Mouse X delta → yaw delta
pub fn mouse_turn(value: f32, aiming: bool, tuning: &LookTuning) -> f32 {
    let scale = if aiming {
        tuning.mouse_aiming_turn_rate
    } else {
        tuning.mouse_hip_turn_rate
    };
    value * scale
}

/// Mouse Y delta → pitch delta
pub fn mouse_look_up(value: f32, aiming: bool, tuning: &LookTuning) -> f32 {
    let scale = if aiming {
        tuning.mouse_aiming_look_up_rate
    } else {
        tuning.mouse_hip_look_up_rate
    };
    value * scale
}

/// Forward по yaw-only rotation (pitch/roll игнорируются)
pub fn forward_axis(yaw_degrees: f32) -> Vec3 {
    let (sin, cos) = yaw_degrees.to_radians().sin_cos();
    Vec3::new(-sin, 0.0, -cos)
}

/// Right по yaw-only rotation
pub fn right_axis(yaw_degrees: f32) -> Vec3 {
    let (sin, cos) = yaw_degrees.to_radians().sin_cos();
    Vec3::new(cos, 0.0, -sin)
}

/// Yaw (градусы) направления в горизонтальной плоскости; нулевой вектор → 0
pub fn yaw_of(direction: Vec3) -> f32 {
    if direction.x.abs() <= f32::EPSILON && direction.z.abs() <= f32::EPSILON {
        return 0.0;
    }
    (-direction.x).atan2(-direction.z).to_degrees()
}
