//! ShooterCharacter — aggregate runtime state одного персонажа
//!
//! # Frame update (фиксированный порядок)
//!
//! 1. Camera zoom → `SetCameraFov`
//! 2. Look rates (прямой выбор по aim flag)
//! 3. Crosshair spread
//! 4. Item trace
//!
//! `aiming` читается один раз в начале frame: input handlers меняют его только
//! между frames, поэтому все шаги видят одно значение.
//!
//! Fire control живёт вне frame update: input handlers (`press_fire_button`)
//! и timer callbacks (`advance_timers`).

use bevy::prelude::*;

use crate::camera::{mouse_look_up, mouse_turn, CameraZoom, LookRates};
use crate::config::{FireTuning, LookTuning, PlayerAxis, TuningConfig};
use crate::crosshair::{CrosshairSpread, SpreadInputs};
use crate::items::{ItemTraceTracker, PickupPrompts};
use crate::shared::{Presentation, PresentationCommand};
use crate::shooting::{CrosshairProbe, FireControl, ShotExecutor, TimerQueue};

use super::kinematics::CharacterKinematics;

/// Collaborators на один frame
pub struct FrameEnv<'a, P: PickupPrompts> {
    pub probe: CrosshairProbe<'a>,
    pub prompts: &'a mut P,
    pub presentation: &'a mut dyn Presentation,
}

/// Результат frame update (для логов/HUD)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub fov: f32,
    pub spread: f32,
}

#[derive(Component, Debug, Clone)]
pub struct ShooterCharacter {
    pub aiming: bool,
    pub camera: CameraZoom,
    pub look: LookRates,
    pub crosshair: CrosshairSpread,
    pub fire: FireControl,
    pub items: ItemTraceTracker,
    pub timers: TimerQueue,
}

impl ShooterCharacter {
    pub fn new(tuning: &TuningConfig) -> Self {
        Self {
            aiming: false,
            camera: CameraZoom::from_tuning(&tuning.camera),
            look: LookRates::from_tuning(&tuning.look),
            crosshair: CrosshairSpread::from_tuning(&tuning.crosshair),
            fire: FireControl::new(),
            items: ItemTraceTracker::new(),
            timers: TimerQueue::new(),
        }
    }

    pub fn tick<P: PickupPrompts>(
        &mut self,
        delta_time: f32,
        kinematics: &CharacterKinematics,
        tuning: &TuningConfig,
        env: &mut FrameEnv<'_, P>,
    ) -> FrameSummary {
        let aiming = self.aiming;

        let fov = self.camera.update(aiming, delta_time);
        env.presentation.present(PresentationCommand::SetCameraFov { fov });

        self.look.select(aiming, &tuning.look);

        let spread = self.crosshair.update(
            SpreadInputs {
                speed: kinematics.horizontal_speed(),
                is_falling: kinematics.is_falling,
                aiming,
                firing_pulse_active: self.fire.firing_bullet,
            },
            delta_time,
            &tuning.crosshair,
        );

        let should_trace = self.items.should_trace();
        self.items.update(should_trace, &env.probe, &mut *env.prompts);

        FrameSummary { fov, spread }
    }

    pub fn aiming_button_pressed(&mut self) {
        self.aiming = true;
    }

    pub fn aiming_button_released(&mut self) {
        self.aiming = false;
    }

    pub fn press_fire_button(&mut self, tuning: &FireTuning, shot: &mut impl ShotExecutor) {
        self.fire.press_fire_button(tuning, &mut self.timers, shot);
    }

    pub fn release_fire_button(&mut self) {
        self.fire.release_fire_button();
    }

    /// Прогнать fire таймеры на `delta_time` (re-fire из callback'ов)
    pub fn advance_timers(&mut self, delta_time: f32, tuning: &FireTuning, shot: &mut impl ShotExecutor) {
        let fire = &mut self.fire;
        self.timers.advance(delta_time, |handle, timer, queue| {
            fire.on_timer(handle, timer, tuning, queue, shot);
        });
    }

    /// Yaw/pitch delta для look axis. None — не look axis или нулевой input.
    pub fn rotation_for_axis(
        &self,
        axis: PlayerAxis,
        value: f32,
        delta_time: f32,
        tuning: &LookTuning,
    ) -> Option<(f32, f32)> {
        let delta = match axis {
            PlayerAxis::TurnRate => (self.look.turn_at_rate(value, delta_time), 0.0),
            PlayerAxis::LookUpRate => (0.0, self.look.look_up_at_rate(value, delta_time)),
            PlayerAxis::Turn => (mouse_turn(value, self.aiming, tuning), 0.0),
            PlayerAxis::LookUp => (0.0, mouse_look_up(value, self.aiming, tuning)),
            PlayerAxis::MoveForward | PlayerAxis::MoveRight => return None,
        };

        (delta != (0.0, 0.0)).then_some(delta)
    }

    /// HUD getter
    pub fn crosshair_spread_multiplier(&self) -> f32 {
        self.crosshair.multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{CrosshairRay, Ray, SceneGeometry};
    use std::collections::HashMap;

    #[derive(Default)]
    struct Prompts {
        interactable: Vec<Entity>,
        visible: HashMap<Entity, bool>,
    }

    impl PickupPrompts for Prompts {
        fn is_interactable(&self, actor: Entity) -> bool {
            self.interactable.contains(&actor)
        }

        fn set_prompt_visible(&mut self, item: Entity, visible: bool) {
            self.visible.insert(item, visible);
        }
    }

    #[test]
    fn test_tick_order_and_outputs() {
        let tuning = TuningConfig::default();
        let mut character = ShooterCharacter::new(&tuning);
        character.aiming_button_pressed();

        let item = Entity::from_raw(5);
        let scene = SceneGeometry::default().with_sphere(Vec3::new(0.0, 0.0, -200.0), 20.0, Some(item));
        let viewport = CrosshairRay(Some(Ray::new(Vec3::ZERO, Vec3::NEG_Z)));
        let mut prompts = Prompts {
            interactable: vec![item],
            ..Default::default()
        };
        let mut commands: Vec<PresentationCommand> = Vec::new();
        character.items.adjust_overlap_count(1);

        let summary = {
            let mut env = FrameEnv {
                probe: CrosshairProbe::new(&viewport, &scene, &tuning.trace),
                prompts: &mut prompts,
                presentation: &mut commands,
            };
            character.tick(1.0 / 60.0, &CharacterKinematics::default(), &tuning, &mut env)
        };

        assert!(summary.fov < 90.0);
        assert_eq!(commands, vec![PresentationCommand::SetCameraFov { fov: summary.fov }]);
        assert_eq!(character.look.base_turn_rate, tuning.look.aiming_turn_rate);
        assert!(summary.spread < 0.5);
        assert_eq!(character.items.trace_hit_item(), Some(item));
        assert_eq!(prompts.visible.get(&item), Some(&true));
    }

    #[test]
    fn test_fire_pulse_feeds_crosshair() {
        let tuning = TuningConfig::default();
        let mut character = ShooterCharacter::new(&tuning);
        let mut shots = 0;

        character.press_fire_button(&tuning.fire, &mut || shots += 1);
        assert!(character.fire.firing_bullet);

        let scene = SceneGeometry::default();
        let viewport = CrosshairRay(None);
        let mut prompts = Prompts::default();
        let mut commands: Vec<PresentationCommand> = Vec::new();
        let mut env = FrameEnv {
            probe: CrosshairProbe::new(&viewport, &scene, &tuning.trace),
            prompts: &mut prompts,
            presentation: &mut commands,
        };
        character.tick(1.0 / 60.0, &CharacterKinematics::default(), &tuning, &mut env);

        assert!(character.crosshair.shooting_factor > 0.0);
        assert!(character.crosshair_spread_multiplier() > 0.5);
        assert_eq!(shots, 1);
    }

    #[test]
    fn test_hold_fire_through_timers() {
        let tuning = TuningConfig::default();
        let mut character = ShooterCharacter::new(&tuning);
        let mut shots = 0;

        character.press_fire_button(&tuning.fire, &mut || shots += 1);
        for _ in 0..20 {
            character.advance_timers(0.0125, &tuning.fire, &mut || shots += 1);
        }
        // 0.25с удержания: выстрел на press + 0.1 + 0.2
        assert_eq!(shots, 3);

        character.release_fire_button();
        for _ in 0..40 {
            character.advance_timers(0.0125, &tuning.fire, &mut || shots += 1);
        }
        assert_eq!(shots, 3);
        assert!(!character.fire.firing_bullet);
    }

    #[test]
    fn test_look_axes_respect_aim() {
        let tuning = TuningConfig::default();
        let mut character = ShooterCharacter::new(&tuning);

        assert_eq!(
            character.rotation_for_axis(PlayerAxis::Turn, 2.0, 0.016, &tuning.look),
            Some((2.0, 0.0))
        );
        assert_eq!(
            character.rotation_for_axis(PlayerAxis::MoveForward, 1.0, 0.016, &tuning.look),
            None
        );
        assert_eq!(
            character.rotation_for_axis(PlayerAxis::LookUp, 0.0, 0.016, &tuning.look),
            None
        );

        character.aiming_button_pressed();
        let (_, pitch) = character
            .rotation_for_axis(PlayerAxis::LookUp, 1.0, 0.016, &tuning.look)
            .expect("look axis");
        assert!((pitch - 0.3).abs() < 1e-6);
    }
}
