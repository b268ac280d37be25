//! Shared domain — cross-cutting типы
//!
//! Содержит то, что используют несколько доменов:
//! - Interpolation (approach / FOV, crosshair factors)
//! - Trace collaborators (WorldTracer, Viewport, SceneGeometry)
//! - Presentation commands (sound, particles, montage, camera FOV)
//! - Attachments (weapon → hand socket)

pub mod interp;
pub mod trace;
pub mod presentation;
pub mod attachment;

// Re-export all
pub use interp::*;
pub use trace::*;
pub use presentation::*;
pub use attachment::*;
