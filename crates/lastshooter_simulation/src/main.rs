//! Headless симуляция LastShooter
//!
//! Прогоняет scripted сцену без рендера: персонаж подходит к оружию на полу,
//! прицеливается, стреляет очередью и меняет оружие.
//!
//! Usage: `lastshooter_simulation [--verbose] [tuning.toml]`
//!
//! По умолчанию лог с уровня Info; `--verbose` включает Debug (overlaps, landing, discharge).

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use lastshooter_simulation::{
    create_headless_app, log_error, log_info, set_log_level, shooter_bundle, CrosshairRay,
    DefaultWeapon, EquippedWeapon, Item, ItemOverlapEvent, LogLevel, PlayerAction,
    PlayerActionEvent, Ray, SceneGeometry, ShooterCharacter, SimulationPlugin, TuningConfig,
};

const FRAME: Duration = Duration::from_micros(16_667);

fn main() {
    let seed = 42;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|arg| arg == "--verbose");

    let mut app = create_headless_app(seed);
    set_log_level(if verbose { LogLevel::Debug } else { LogLevel::Info });

    if let Some(path) = args.iter().find(|arg| !arg.starts_with("--")) {
        match TuningConfig::load(path) {
            Ok(tuning) => {
                app.insert_resource(tuning);
            }
            Err(err) => {
                log_error(&format!("{}", err));
                std::process::exit(1);
            }
        }
    }

    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .add_plugins(SimulationPlugin);

    log_info(&format!("Starting LastShooter headless simulation (seed: {})", seed));

    let tuning = app.world().resource::<TuningConfig>().clone();
    let character = app
        .world_mut()
        .spawn((
            shooter_bundle(&tuning, Some(Transform::from_xyz(20.0, 140.0, -60.0))),
            DefaultWeapon::new("SubmachineGun"),
        ))
        .id();

    // Оружие на полу в 400 units перед камерой
    let pickup = app.world_mut().spawn(Item::weapon("AssaultRifle")).id();
    app.insert_resource(
        SceneGeometry::default()
            .with_plane(Vec3::ZERO, Vec3::Y)
            .with_plane(Vec3::new(0.0, 0.0, -3000.0), Vec3::Z)
            .with_sphere(Vec3::new(0.0, 150.0, -400.0), 30.0, Some(pickup)),
    )
    .insert_resource(CrosshairRay(Some(Ray::new(
        Vec3::new(0.0, 160.0, 0.0),
        Vec3::NEG_Z,
    ))));

    for tick in 0..120 {
        let world = app.world_mut();
        match tick {
            10 => {
                world.send_event(ItemOverlapEvent::begin(character));
            }
            20 => {
                world.send_event(PlayerActionEvent::pressed(character, PlayerAction::AimingButton));
            }
            30 => {
                world.send_event(PlayerActionEvent::pressed(character, PlayerAction::FireButton));
            }
            60 => {
                world.send_event(PlayerActionEvent::released(character, PlayerAction::FireButton));
                world.send_event(PlayerActionEvent::released(character, PlayerAction::AimingButton));
            }
            80 => {
                world.send_event(PlayerActionEvent::pressed(character, PlayerAction::Select));
            }
            90 => {
                world.send_event(ItemOverlapEvent::end(character));
            }
            _ => {}
        }

        app.update();

        if tick % 10 == 0 {
            let world = app.world();
            if let Some(state) = world.get::<ShooterCharacter>(character) {
                let equipped = world.get::<EquippedWeapon>(character).and_then(|e| e.0);
                let equipped_name = equipped
                    .and_then(|weapon| world.get::<Item>(weapon))
                    .map(|item| item.name.as_str())
                    .unwrap_or("-");
                log_info(&format!(
                    "Tick {}: fov {:.1}, spread {:.2}, shots {}, traced {:?}, weapon {}",
                    tick,
                    state.camera.current_fov,
                    state.crosshair_spread_multiplier(),
                    state.fire.shots_fired,
                    state.items.trace_hit_item(),
                    equipped_name
                ));
            }
        }
    }

    log_info("Simulation complete!");
}
