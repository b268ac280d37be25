//! Kinematic snapshot персонажа (пишет movement/physics слой engine'а)
//!
//! Simulation только читает эти компоненты.

use bevy::prelude::*;

use crate::camera::yaw_of;

/// Per-frame snapshot движения
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterKinematics {
    pub velocity: Vec3,
    /// В воздухе (movement mode falling)
    pub is_falling: bool,
    /// Модуль текущего ускорения от input'а
    pub acceleration: f32,
    /// Control rotation yaw (градусы)
    pub aim_yaw: f32,
}

impl CharacterKinematics {
    /// Скорость без вертикальной компоненты
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }

    /// Yaw направления скорости (0, если стоим)
    pub fn movement_yaw(&self) -> f32 {
        yaw_of(self.velocity)
    }
}

/// Socket transforms skeletal mesh'а (engine обновляет каждый frame)
///
/// `barrel_socket = None` — у меша нет socket'а, muzzle/beam эффекты пропускаются.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterRig {
    pub barrel_socket: Option<Transform>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_speed_ignores_vertical() {
        let kinematics = CharacterKinematics {
            velocity: Vec3::new(300.0, -980.0, 400.0),
            is_falling: true,
            ..Default::default()
        };

        assert_eq!(kinematics.horizontal_speed(), 500.0);
    }

    #[test]
    fn test_movement_yaw_at_rest() {
        assert_eq!(CharacterKinematics::default().movement_yaw(), 0.0);
    }
}
