//! Crosshair spread model
//!
//! Четыре независимых фактора, каждый со своим target/rate:
//! - velocity — прямой remap horizontal speed [0, walk_speed_max] → [0, 1] (не интерполируется)
//! - in_air — 2.25 в воздухе (медленно), 0 на земле (быстро)
//! - aim — 0.6 при прицеливании (сужает)
//! - shooting — 0.3 пока активен firing pulse
//!
//! `multiplier = base + velocity + in_air − aim + shooting`
//!
//! Сумма НЕ клампится: velocity 1 + in_air 2.25 + shooting 0.3 даёт 4.05.
//! HUD клампит сам при отрисовке.

use bevy::prelude::*;

use crate::config::CrosshairTuning;
use crate::shared::{approach, map_range_clamped};

/// Snapshot входов для одного frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpreadInputs {
    /// Horizontal speed (без вертикальной компоненты)
    pub speed: f32,
    pub is_falling: bool,
    pub aiming: bool,
    pub firing_pulse_active: bool,
}

/// Runtime state crosshair spread
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct CrosshairSpread {
    pub velocity_factor: f32,
    pub in_air_factor: f32,
    pub aim_factor: f32,
    pub shooting_factor: f32,
    multiplier: f32,
}

impl Default for CrosshairSpread {
    fn default() -> Self {
        Self {
            velocity_factor: 0.0,
            in_air_factor: 0.0,
            aim_factor: 0.0,
            shooting_factor: 0.0,
            multiplier: CrosshairTuning::default().base_spread,
        }
    }
}

impl CrosshairSpread {
    pub fn from_tuning(tuning: &CrosshairTuning) -> Self {
        Self {
            multiplier: tuning.base_spread,
            ..Self::default()
        }
    }

    /// Обновить все факторы (каждый frame, независимо от fire state)
    pub fn update(&mut self, inputs: SpreadInputs, delta_time: f32, tuning: &CrosshairTuning) -> f32 {
        self.velocity_factor =
            map_range_clamped((0.0, tuning.walk_speed_max), (0.0, 1.0), inputs.speed);

        self.in_air_factor = if inputs.is_falling {
            approach(self.in_air_factor, tuning.in_air_target, delta_time, tuning.in_air_rate)
        } else {
            approach(self.in_air_factor, 0.0, delta_time, tuning.landed_rate)
        };

        let aim_target = if inputs.aiming { tuning.aim_target } else { 0.0 };
        self.aim_factor = approach(self.aim_factor, aim_target, delta_time, tuning.aim_rate);

        let shooting_target = if inputs.firing_pulse_active {
            tuning.shooting_target
        } else {
            0.0
        };
        self.shooting_factor = approach(
            self.shooting_factor,
            shooting_target,
            delta_time,
            tuning.shooting_rate,
        );

        self.multiplier = tuning.base_spread + self.velocity_factor + self.in_air_factor
            - self.aim_factor
            + self.shooting_factor;
        self.multiplier
    }

    /// Последний посчитанный multiplier (HUD getter)
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }
}
