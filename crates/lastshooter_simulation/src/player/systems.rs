//! Player systems (Bevy adapters над ShooterCharacter / items)
//!
//! # Порядок (Update, chain)
//!
//! 1. `spawn_default_weapons` — стартовое оружие
//! 2. `process_player_axes` — movement / look input → intents
//! 3. `process_player_actions` — jump / fire / aim / select
//! 4. `process_item_overlaps` — overlap count → item trace on/off
//! 5. `update_characters` — zoom, look rates, crosshair, item trace
//! 6. `advance_fire_timers` — auto-fire cadence + crosshair pulse
//! 7. `sync_animation_properties` — snapshot для anim graph
//! 8. `tick_thrown_weapons` — падение брошенного оружия

use bevy::prelude::*;

use crate::animation::AnimationProperties;
use crate::config::{PlayerAction, PlayerAxis, TuningConfig};
use crate::items::{
    drop_item, equip_item, tick_fall, DefaultWeapon, EquippedWeapon, Interactable, Item, ItemState,
    PickupPrompts, WeaponThrown,
};
use crate::logger;
use crate::shared::{
    Attachment, CrosshairRay, PresentationCommand, PresentationEvent, SceneGeometry,
};
use crate::shooting::{CrosshairProbe, WeaponDischarge};
use crate::DeterministicRng;

use super::character::{FrameEnv, ShooterCharacter};
use super::events::*;
use super::kinematics::{CharacterKinematics, CharacterRig};

/// Pickup prompts поверх ECS query
impl PickupPrompts for Query<'_, '_, &mut Item> {
    fn is_interactable(&self, actor: Entity) -> bool {
        self.get(actor).is_ok_and(|item| item.is_interactable())
    }

    fn set_prompt_visible(&mut self, item: Entity, visible: bool) {
        if let Ok(mut item) = self.get_mut(item) {
            item.set_pickup_prompt_visible(visible);
        }
    }
}

/// Discharge side effects одного персонажа (buffer → PresentationEvent)
fn weapon_discharge<'a>(
    rig: Option<&CharacterRig>,
    crosshair: &'a CrosshairRay,
    scene: &'a SceneGeometry,
    tuning: &'a TuningConfig,
    presentation: &'a mut Vec<PresentationCommand>,
) -> WeaponDischarge<'a> {
    WeaponDischarge {
        muzzle: rig.and_then(|rig| rig.barrel_socket),
        viewport: crosshair,
        tracer: scene,
        trace: &tuning.trace,
        assets: &tuning.assets,
        presentation,
        last_beam: None,
    }
}

fn flush_presentation(
    writer: &mut EventWriter<PresentationEvent>,
    character: Entity,
    commands: Vec<PresentationCommand>,
) {
    for event in PresentationEvent::batch(character, commands) {
        writer.write(event);
    }
}

/// System: spawn + equip стартового оружия (один раз на персонажа)
pub fn spawn_default_weapons(
    mut commands: Commands,
    mut characters: Query<(Entity, &DefaultWeapon, &mut EquippedWeapon, Option<&Transform>)>,
    tuning: Res<TuningConfig>,
) {
    for (entity, default_weapon, mut equipped, transform) in characters.iter_mut() {
        commands.entity(entity).remove::<DefaultWeapon>();

        if equipped.0.is_some() {
            continue;
        }

        let weapon = commands.spawn_empty().id();
        let mut item = Item::weapon(default_weapon.name.clone());
        let attachment = equip_item(entity, weapon, &mut item, &mut equipped, &tuning.sockets);

        commands
            .entity(weapon)
            .insert((item, attachment, transform.copied().unwrap_or_default()));
    }
}

/// System: axis input → MovementIntent / ControlRotationDelta
pub fn process_player_axes(
    mut events: EventReader<PlayerAxisEvent>,
    characters: Query<(&ShooterCharacter, &CharacterKinematics)>,
    tuning: Res<TuningConfig>,
    time: Res<Time>,
    mut movement: EventWriter<MovementIntent>,
    mut rotation: EventWriter<ControlRotationDelta>,
) {
    let delta_time = time.delta_secs();

    for event in events.read() {
        let Ok((character, kinematics)) = characters.get(event.entity) else {
            continue;
        };

        match event.axis {
            PlayerAxis::MoveForward => {
                let intent = MovementIntent::forward(event.entity, event.value, kinematics.aim_yaw);
                if let Some(intent) = intent {
                    movement.write(intent);
                }
            }
            PlayerAxis::MoveRight => {
                let intent = MovementIntent::right(event.entity, event.value, kinematics.aim_yaw);
                if let Some(intent) = intent {
                    movement.write(intent);
                }
            }
            axis => {
                if let Some((yaw, pitch)) =
                    character.rotation_for_axis(axis, event.value, delta_time, &tuning.look)
                {
                    rotation.write(ControlRotationDelta {
                        entity: event.entity,
                        yaw,
                        pitch,
                    });
                }
            }
        }
    }
}

/// System: button press/release
#[allow(clippy::too_many_arguments)]
pub fn process_player_actions(
    mut commands: Commands,
    mut events: EventReader<PlayerActionEvent>,
    mut characters: Query<(&mut ShooterCharacter, &mut EquippedWeapon, Option<&CharacterRig>)>,
    mut items: Query<(&mut Item, Option<&mut Transform>)>,
    tuning: Res<TuningConfig>,
    crosshair: Res<CrosshairRay>,
    mut scene: ResMut<SceneGeometry>,
    mut rng: ResMut<DeterministicRng>,
    mut jumps: EventWriter<JumpIntent>,
    mut thrown: EventWriter<WeaponThrown>,
    mut presentation: EventWriter<PresentationEvent>,
) {
    for event in events.read() {
        let Ok((mut character, mut equipped, rig)) = characters.get_mut(event.entity) else {
            continue;
        };

        match (event.action, event.pressed) {
            (PlayerAction::Jump, pressed) => {
                jumps.write(JumpIntent {
                    entity: event.entity,
                    pressed,
                });
            }
            (PlayerAction::AimingButton, true) => character.aiming_button_pressed(),
            (PlayerAction::AimingButton, false) => character.aiming_button_released(),
            (PlayerAction::FireButton, true) => {
                let mut buffer = Vec::new();
                {
                    let mut discharge =
                        weapon_discharge(rig, &crosshair, &scene, &tuning, &mut buffer);
                    character.press_fire_button(&tuning.fire, &mut discharge);
                }
                flush_presentation(&mut presentation, event.entity, buffer);
            }
            (PlayerAction::FireButton, false) => character.release_fire_button(),
            (PlayerAction::Select, true) => {
                let Some(target) = character.items.trace_hit_item() else {
                    continue;
                };
                let is_weapon = items.get(target).is_ok_and(|(item, _)| item.is_weapon());
                if !is_weapon {
                    continue;
                }

                // Swap: drop текущего → equip нового → сброс trace указателей
                if let Some(current) = equipped.0 {
                    match items.get_mut(current) {
                        Ok((mut item, transform)) => {
                            let rotation =
                                transform.as_deref().map(|t| t.rotation).unwrap_or_default();
                            let throw = drop_item(
                                &mut equipped,
                                &mut item,
                                rotation,
                                &tuning.items,
                                &mut rng.rng,
                            );
                            if let Some(throw) = throw {
                                if let Some(mut transform) = transform {
                                    transform.rotation = throw.rotation;
                                }
                                commands.entity(current).remove::<Attachment>();
                                thrown.write(throw);
                            }
                        }
                        Err(_) => {
                            logger::log_warning(&format!(
                                "Equipped weapon {:?} has no Item, clearing slot",
                                current
                            ));
                            equipped.0 = None;
                        }
                    }
                }

                if let Ok((mut item, _)) = items.get_mut(target) {
                    let attachment =
                        equip_item(event.entity, target, &mut item, &mut equipped, &tuning.sockets);
                    commands.entity(target).insert(attachment);
                    // В руках предмет больше не блокирует crosshair trace
                    scene.remove_actor(target);
                }

                character.items.clear_traced_items();
            }
            (PlayerAction::Select, false) => {}
        }
    }
}

/// System: overlap begin/end → item trace on/off
pub fn process_item_overlaps(
    mut events: EventReader<ItemOverlapEvent>,
    mut characters: Query<&mut ShooterCharacter>,
) {
    for event in events.read() {
        if let Ok(mut character) = characters.get_mut(event.character) {
            let tracing = character.items.adjust_overlap_count(event.delta);
            logger::log(&format!(
                "{:?} overlap {:+} → count {}, trace {}",
                event.character,
                event.delta,
                character.items.overlapped_item_count(),
                tracing
            ));
        }
    }
}

/// System: per-frame character update
pub fn update_characters(
    mut characters: Query<(Entity, &mut ShooterCharacter, &CharacterKinematics)>,
    mut items: Query<&mut Item>,
    tuning: Res<TuningConfig>,
    crosshair: Res<CrosshairRay>,
    scene: Res<SceneGeometry>,
    time: Res<Time>,
    mut presentation: EventWriter<PresentationEvent>,
) {
    let delta_time = time.delta_secs();

    for (entity, mut character, kinematics) in characters.iter_mut() {
        let mut buffer = Vec::new();
        {
            let mut env = FrameEnv {
                probe: CrosshairProbe::new(&*crosshair, &*scene, &tuning.trace),
                prompts: &mut items,
                presentation: &mut buffer,
            };
            character.tick(delta_time, kinematics, &tuning, &mut env);
        }
        flush_presentation(&mut presentation, entity, buffer);
    }
}

/// System: fire timers (cadence не зависит от frame rate)
pub fn advance_fire_timers(
    mut characters: Query<(Entity, &mut ShooterCharacter, Option<&CharacterRig>)>,
    tuning: Res<TuningConfig>,
    crosshair: Res<CrosshairRay>,
    scene: Res<SceneGeometry>,
    time: Res<Time>,
    mut presentation: EventWriter<PresentationEvent>,
) {
    let delta_time = time.delta_secs();

    for (entity, mut character, rig) in characters.iter_mut() {
        let mut buffer = Vec::new();
        {
            let mut discharge = weapon_discharge(rig, &crosshair, &scene, &tuning, &mut buffer);
            character.advance_timers(delta_time, &tuning.fire, &mut discharge);
        }
        flush_presentation(&mut presentation, entity, buffer);
    }
}

/// System: AnimationProperties ← kinematics + aim
pub fn sync_animation_properties(
    mut characters: Query<(&ShooterCharacter, &CharacterKinematics, &mut AnimationProperties)>,
) {
    for (character, kinematics, mut properties) in characters.iter_mut() {
        properties.update(kinematics, character.aiming);
    }
}

/// System: падение брошенного оружия → снова Pickup
pub fn tick_thrown_weapons(mut items: Query<(Entity, &mut Item)>, time: Res<Time>) {
    let delta_time = time.delta_secs();

    for (entity, mut item) in items.iter_mut() {
        if item.state != ItemState::Falling {
            continue;
        }

        if tick_fall(&mut item, delta_time) {
            logger::log(&format!("{} ({:?}) landed, ready for pickup", item.name, entity));
        }
    }
}
