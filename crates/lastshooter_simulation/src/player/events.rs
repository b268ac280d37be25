//! Player events
//!
//! # Input (engine → ECS)
//! - `PlayerActionEvent` — button press/release
//! - `PlayerAxisEvent` — axis value за frame
//! - `ItemOverlapEvent` — персонаж вошёл/вышел из item сферы
//!
//! # Intents (ECS → engine)
//! - `MovementIntent` — add movement input вдоль world direction
//! - `ControlRotationDelta` — yaw/pitch delta для controller rotation
//! - `JumpIntent` — jump / stop jumping
//!
//! Engine adapter применяет intents к CharacterBody / controller.

use bevy::prelude::*;

use crate::camera::{forward_axis, right_axis};
use crate::config::{PlayerAction, PlayerAxis};

/// Button press/release
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerActionEvent {
    pub entity: Entity,
    pub action: PlayerAction,
    pub pressed: bool,
}

impl PlayerActionEvent {
    pub fn pressed(entity: Entity, action: PlayerAction) -> Self {
        Self { entity, action, pressed: true }
    }

    pub fn released(entity: Entity, action: PlayerAction) -> Self {
        Self { entity, action, pressed: false }
    }
}

/// Axis value (gamepad rate или mouse delta)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerAxisEvent {
    pub entity: Entity,
    pub axis: PlayerAxis,
    pub value: f32,
}

/// Overlap begin (+1) / end (-1) с item area сферой
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ItemOverlapEvent {
    pub character: Entity,
    pub delta: i32,
}

impl ItemOverlapEvent {
    pub fn begin(character: Entity) -> Self {
        Self { character, delta: 1 }
    }

    pub fn end(character: Entity) -> Self {
        Self { character, delta: -1 }
    }
}

/// Movement input вдоль yaw-only оси контроллера
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    pub entity: Entity,
    /// Unit direction (world space, горизонтальный)
    pub direction: Vec3,
    pub scale: f32,
}

impl MovementIntent {
    /// MoveForward; нулевой input → None
    pub fn forward(entity: Entity, value: f32, control_yaw: f32) -> Option<Self> {
        (value != 0.0).then(|| Self {
            entity,
            direction: forward_axis(control_yaw),
            scale: value,
        })
    }

    /// MoveRight; нулевой input → None
    pub fn right(entity: Entity, value: f32, control_yaw: f32) -> Option<Self> {
        (value != 0.0).then(|| Self {
            entity,
            direction: right_axis(control_yaw),
            scale: value,
        })
    }
}

/// Controller rotation delta (градусы)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ControlRotationDelta {
    pub entity: Entity,
    pub yaw: f32,
    pub pitch: f32,
}

/// Jump (pressed) / StopJumping (released)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct JumpIntent {
    pub entity: Entity,
    pub pressed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_movement_input_produces_no_intent() {
        let entity = Entity::from_raw(1);
        assert!(MovementIntent::forward(entity, 0.0, 30.0).is_none());
        assert!(MovementIntent::right(entity, 0.0, 30.0).is_none());
    }

    #[test]
    fn test_movement_intent_follows_control_yaw() {
        let entity = Entity::from_raw(1);

        let forward = MovementIntent::forward(entity, 1.0, 90.0).expect("non-zero input");
        assert!(forward.direction.abs_diff_eq(Vec3::NEG_X, 1e-6));

        let right = MovementIntent::right(entity, -0.5, 0.0).expect("non-zero input");
        assert!(right.direction.abs_diff_eq(Vec3::X, 1e-6));
        assert_eq!(right.scale, -0.5);
    }
}
