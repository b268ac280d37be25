//! Shooting domain — fire control, timers, hit-scan
//!
//! # Архитектура
//!
//! - `timers` — one-shot scheduler (`FireScheduler`, `TimerQueue`)
//! - `fire_control` — state machine: button edges, auto-fire cadence, crosshair pulse
//! - `hitscan` — crosshair trace + muzzle trace, discharge side effects
//!
//! Fire cadence управляется таймерами, а не frame tick'ом: `ShooterCharacter`
//! прокидывает `TimerQueue::advance` callbacks в `FireControl::on_timer`.

pub mod timers;
pub mod fire_control;
pub mod hitscan;


pub use timers::*;
pub use fire_control::*;
pub use hitscan::*;
