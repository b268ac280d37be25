//! LastShooter Simulation Core
//!
//! Third-person shooter character gameplay на Bevy 0.16 ECS (headless).
//!
//! HYBRID ARCHITECTURE:
//! - ECS = gameplay state (zoom, crosshair, fire control, items)
//! - Engine adapter = physics, rendering, audio, animation playback
//!
//! Engine → ECS: input events, kinematics snapshot, crosshair ray, world traces.
//! ECS → engine: `PresentationEvent`, movement/rotation/jump intents, `WeaponThrown`,
//! `Attachment` компоненты, `AnimationProperties`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod camera;
pub mod config;
pub mod crosshair;
pub mod items;
pub mod logger;
pub mod player;
pub mod shared;
pub mod shooting;

// Re-export основных типов для удобства
pub use animation::AnimationProperties;
pub use config::{ConfigError, InputBindings, PlayerAction, PlayerAxis, TuningConfig};
pub use items::{DefaultWeapon, EquippedWeapon, Item, ItemKind, ItemState, WeaponThrown};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel, LogPrinter,
};
pub use player::{
    shooter_bundle, CharacterKinematics, CharacterRig, ControlRotationDelta, ItemOverlapEvent,
    JumpIntent, MovementIntent, Player, PlayerActionEvent, PlayerAxisEvent, ShooterCharacter,
    ShooterPlugin,
};
pub use shared::{CrosshairRay, PresentationCommand, PresentationEvent, Ray, SceneGeometry};

/// Seed по умолчанию (если хост не поставил свой `DeterministicRng`)
pub const DEFAULT_SEED: u64 = 42;

/// Главный plugin симуляции
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }
        if !app.world().contains_resource::<InputBindings>() {
            app.insert_resource(InputBindings::standard());
        }

        app.add_plugins(ShooterPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Bindings/tuning по умолчанию; `SimulationPlugin` добавляет вызывающий
/// (можно сначала подменить `TuningConfig`).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(InputBindings::standard())
        .insert_resource(TuningConfig::default());

    app
}
