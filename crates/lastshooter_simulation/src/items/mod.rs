//! Items domain — подбираемые предметы, trace под прицелом, экипировка
//!
//! - `item` — `Item` компонент, `Interactable` / `Throwable` capabilities
//! - `tracker` — `ItemTraceTracker` (overlap count + pickup prompt hysteresis)
//! - `equipment` — equip / drop / throw

pub mod item;
pub mod tracker;
pub mod equipment;

pub use item::*;
pub use tracker::*;
pub use equipment::*;
