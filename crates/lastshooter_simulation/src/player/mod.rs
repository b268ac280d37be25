//! Player domain — player-controlled shooter character
//!
//! # Архитектура
//!
//! **Components:**
//! - `Player` — marker (input systems фильтруют по нему)
//! - `ShooterCharacter` — runtime state (zoom, look, crosshair, fire, item trace, timers)
//! - `CharacterKinematics` / `CharacterRig` — snapshot от movement слоя engine'а
//!
//! **Events:** input (`PlayerActionEvent`, `PlayerAxisEvent`, `ItemOverlapEvent`)
//! и intents (`MovementIntent`, `ControlRotationDelta`, `JumpIntent`).
//!
//! **Plugin:** `ShooterPlugin` — events, resources, system chain.

use bevy::prelude::*;

pub mod character;
pub mod events;
pub mod kinematics;
pub mod systems;

pub use character::*;
pub use events::*;
pub use kinematics::*;
pub use systems::*;

use crate::animation::AnimationProperties;
use crate::config::{InputBindings, TuningConfig};
use crate::items::{EquippedWeapon, WeaponThrown};
use crate::logger;
use crate::shared::{CrosshairRay, PresentationEvent, SceneGeometry};
use crate::{DeterministicRng, DEFAULT_SEED};

/// Marker component для player-controlled entity
///
/// В single-player обычно один entity с этим компонентом.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Полный набор компонентов персонажа-стрелка (`DefaultWeapon` добавляется отдельно)
///
/// `barrel_socket` — transform ствола на меше; None → muzzle/beam эффекты пропускаются.
pub fn shooter_bundle(tuning: &TuningConfig, barrel_socket: Option<Transform>) -> impl Bundle {
    (
        Player,
        ShooterCharacter::new(tuning),
        CharacterKinematics::default(),
        CharacterRig { barrel_socket },
        EquippedWeapon::default(),
        AnimationProperties::default(),
    )
}

/// Shooter gameplay plugin
///
/// Требует `InputBindings` resource до `add_plugins`: без полного набора bindings
/// персонажем нельзя управлять, поэтому build падает сразу, а не в runtime.
pub struct ShooterPlugin;

impl Plugin for ShooterPlugin {
    fn build(&self, app: &mut App) {
        let Some(bindings) = app.world().get_resource::<InputBindings>() else {
            panic!("ShooterPlugin requires InputBindings resource");
        };
        if let Err(err) = bindings.validate() {
            panic!("ShooterPlugin: {}", err);
        }

        if let Some(tuning) = app.world().get_resource::<TuningConfig>() {
            if let Err(err) = tuning.validate() {
                panic!("ShooterPlugin: {}", err);
            }
        } else {
            logger::log_info("TuningConfig not provided, using defaults");
            app.insert_resource(TuningConfig::default());
        }

        // Throw jitter берёт RNG отсюда; seed хоста не перезаписываем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app.init_resource::<CrosshairRay>()
            .init_resource::<SceneGeometry>()
            // Input
            .add_event::<PlayerActionEvent>()
            .add_event::<PlayerAxisEvent>()
            .add_event::<ItemOverlapEvent>()
            // Output
            .add_event::<MovementIntent>()
            .add_event::<ControlRotationDelta>()
            .add_event::<JumpIntent>()
            .add_event::<WeaponThrown>()
            .add_event::<PresentationEvent>()
            .add_systems(
                Update,
                (
                    spawn_default_weapons,
                    process_player_axes,
                    process_player_actions,
                    process_item_overlaps,
                    update_characters,
                    advance_fire_timers,
                    sync_animation_properties,
                    tick_thrown_weapons,
                )
                    .chain(),
            );
    }
}
