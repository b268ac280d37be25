//! Input bindings: engine action/axis names → typed player inputs
//!
//! Engine adapter резолвит имена из своей input map через `InputBindings`
//! и шлёт `PlayerActionEvent` / `PlayerAxisEvent`. Все actions/axes обязаны быть
//! привязаны — проверяется один раз в `ShooterPlugin::build`.

use bevy::prelude::*;
use std::collections::HashMap;

use super::ConfigError;

/// Continuous input axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PlayerAxis {
    MoveForward,
    MoveRight,
    /// Gamepad turn (normalized rate)
    TurnRate,
    /// Gamepad look up (normalized rate)
    LookUpRate,
    /// Mouse X delta
    Turn,
    /// Mouse Y delta
    LookUp,
}

impl PlayerAxis {
    pub const ALL: [PlayerAxis; 6] = [
        PlayerAxis::MoveForward,
        PlayerAxis::MoveRight,
        PlayerAxis::TurnRate,
        PlayerAxis::LookUpRate,
        PlayerAxis::Turn,
        PlayerAxis::LookUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAxis::MoveForward => "MoveForward",
            PlayerAxis::MoveRight => "MoveRight",
            PlayerAxis::TurnRate => "TurnRate",
            PlayerAxis::LookUpRate => "LookUpRate",
            PlayerAxis::Turn => "Turn",
            PlayerAxis::LookUp => "LookUp",
        }
    }
}

/// Discrete button actions (press/release)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PlayerAction {
    Jump,
    FireButton,
    AimingButton,
    Select,
}

impl PlayerAction {
    pub const ALL: [PlayerAction; 4] = [
        PlayerAction::Jump,
        PlayerAction::FireButton,
        PlayerAction::AimingButton,
        PlayerAction::Select,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::Jump => "Jump",
            PlayerAction::FireButton => "FireButton",
            PlayerAction::AimingButton => "AimingButton",
            PlayerAction::Select => "Select",
        }
    }
}

/// Mapping engine input names → typed inputs
#[derive(Resource, Debug, Clone, Default)]
pub struct InputBindings {
    axes: HashMap<String, PlayerAxis>,
    actions: HashMap<String, PlayerAction>,
}

impl InputBindings {
    /// Пустой набор (validate упадёт, пока всё не привязано)
    pub fn new() -> Self {
        Self::default()
    }

    /// Стандартная схема: engine name == enum name
    pub fn standard() -> Self {
        let mut bindings = Self::new();
        for axis in PlayerAxis::ALL {
            bindings.bind_axis(axis.as_str(), axis);
        }
        for action in PlayerAction::ALL {
            bindings.bind_action(action.as_str(), action);
        }
        bindings
    }

    pub fn bind_axis(&mut self, name: impl Into<String>, axis: PlayerAxis) -> &mut Self {
        self.axes.insert(name.into(), axis);
        self
    }

    pub fn bind_action(&mut self, name: impl Into<String>, action: PlayerAction) -> &mut Self {
        self.actions.insert(name.into(), action);
        self
    }

    pub fn axis(&self, name: &str) -> Option<PlayerAxis> {
        self.axes.get(name).copied()
    }

    pub fn action(&self, name: &str) -> Option<PlayerAction> {
        self.actions.get(name).copied()
    }

    /// Каждая axis и action должны иметь хотя бы одно имя
    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in PlayerAxis::ALL {
            if !self.axes.values().any(|bound| *bound == axis) {
                return Err(ConfigError::MissingBinding(axis.as_str().to_string()));
            }
        }
        for action in PlayerAction::ALL {
            if !self.actions.values().any(|bound| *bound == action) {
                return Err(ConfigError::MissingBinding(action.as_str().to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_bindings_are_complete() {
        let bindings = InputBindings::standard();
        assert!(bindings.validate().is_ok());
        assert_eq!(bindings.action("FireButton"), Some(PlayerAction::FireButton));
        assert_eq!(bindings.axis("LookUpRate"), Some(PlayerAxis::LookUpRate));
        assert_eq!(bindings.action("Reload"), None);
    }

    #[test]
    fn test_missing_action_reported() {
        let mut bindings = InputBindings::new();
        for axis in PlayerAxis::ALL {
            bindings.bind_axis(axis.as_str(), axis);
        }
        bindings
            .bind_action("Jump", PlayerAction::Jump)
            .bind_action("Fire", PlayerAction::FireButton)
            .bind_action("Aim", PlayerAction::AimingButton);

        match bindings.validate() {
            Err(ConfigError::MissingBinding(name)) => assert_eq!(name, "Select"),
            other => panic!("expected missing Select binding, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_names() {
        let mut bindings = InputBindings::standard();
        bindings.bind_action("LMB", PlayerAction::FireButton);

        assert_eq!(bindings.action("LMB"), Some(PlayerAction::FireButton));
        assert_eq!(bindings.action("FireButton"), Some(PlayerAction::FireButton));
    }
}
