//! Animation property sync — read-only проекция kinematic state для anim graph
//!
//! Engine adapter каждый frame читает `AnimationProperties` и пишет их в
//! animation blueprint / AnimationTree parameters.

use bevy::prelude::*;

use crate::player::CharacterKinematics;
use crate::shared::normalize_axis_degrees;

#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimationProperties {
    /// Horizontal speed
    pub speed: f32,
    pub is_in_air: bool,
    pub is_accelerating: bool,
    /// Movement yaw − aim yaw, (-180, 180] (strafe blend)
    pub movement_offset_yaw: f32,
    /// Последний offset при ненулевой скорости (для stop анимаций)
    pub last_movement_offset_yaw: f32,
    pub aiming: bool,
}

impl AnimationProperties {
    pub fn update(&mut self, kinematics: &CharacterKinematics, aiming: bool) {
        self.speed = kinematics.horizontal_speed();
        self.is_in_air = kinematics.is_falling;
        self.is_accelerating = kinematics.acceleration > 0.0;

        self.movement_offset_yaw =
            normalize_axis_degrees(kinematics.movement_yaw() - kinematics.aim_yaw);
        if kinematics.velocity.length_squared() > 0.0 {
            self.last_movement_offset_yaw = self.movement_offset_yaw;
        }

        self.aiming = aiming;
    }
}
