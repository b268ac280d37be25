//! Hit-scan resolution + weapon discharge side effects
//!
//! Two-stage trace:
//! 1. Crosshair trace — центр экрана → world ray, до `crosshair_trace_distance`.
//!    Hit → точка попадания, miss → дальний конец луча.
//! 2. Muzzle trace — от ствола к точке за crosshair endpoint (× `beam_extension`).
//!    Камера и ствол не на одной линии (third-person), поэтому между стволом и
//!    целью под прицелом может стоять препятствие. Beam заканчивается на нём.

use bevy::prelude::*;

use crate::config::{CombatAssets, TraceTuning};
use crate::logger;
use crate::shared::{Presentation, PresentationCommand, Viewport, WorldTracer};

use super::fire_control::ShotExecutor;

/// Результат crosshair trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrosshairTrace {
    /// Был blocking hit
    pub hit: bool,
    /// Точка попадания или дальний конец луча
    pub location: Vec3,
    /// Actor под прицелом (только при hit)
    pub actor: Option<Entity>,
}

/// Результат muzzle trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamEnd {
    /// Muzzle trace во что-то упёрся
    pub hit: bool,
    pub location: Vec3,
    pub actor: Option<Entity>,
}

/// Viewport + world tracer, собранные на один frame
pub struct CrosshairProbe<'a> {
    pub viewport: &'a dyn Viewport,
    pub tracer: &'a dyn WorldTracer,
    pub max_distance: f32,
}

impl<'a> CrosshairProbe<'a> {
    pub fn new(viewport: &'a dyn Viewport, tracer: &'a dyn WorldTracer, tuning: &TraceTuning) -> Self {
        Self {
            viewport,
            tracer,
            max_distance: tuning.crosshair_trace_distance,
        }
    }

    /// None — нет viewport в этом frame
    pub fn trace(&self) -> Option<CrosshairTrace> {
        trace_under_crosshair(self.viewport, self.tracer, self.max_distance)
    }

    pub fn resolve_beam_end(&self, muzzle: Vec3, extension: f32) -> Option<BeamEnd> {
        let crosshair = self.trace()?;
        Some(resolve_beam_end(self.tracer, muzzle, crosshair.location, extension))
    }
}

/// Crosshair trace: deproject центр экрана, trace до `max_distance`
pub fn trace_under_crosshair(
    viewport: &dyn Viewport,
    tracer: &dyn WorldTracer,
    max_distance: f32,
) -> Option<CrosshairTrace> {
    let ray = viewport.deproject_screen_center()?;
    let end = ray.point_at(max_distance);

    Some(match tracer.raycast(ray.origin, end) {
        Some(hit) => CrosshairTrace {
            hit: true,
            location: hit.location,
            actor: hit.actor,
        },
        None => CrosshairTrace {
            hit: false,
            location: end,
            actor: None,
        },
    })
}

/// Muzzle trace к точке `muzzle + (crosshair_end - muzzle) * extension`
///
/// Blocking hit → его точка; иначе продлённый endpoint (hit = false).
pub fn resolve_beam_end(
    tracer: &dyn WorldTracer,
    muzzle: Vec3,
    crosshair_end: Vec3,
    extension: f32,
) -> BeamEnd {
    let extended = muzzle + (crosshair_end - muzzle) * extension;

    match tracer.raycast(muzzle, extended) {
        Some(hit) => BeamEnd {
            hit: true,
            location: hit.location,
            actor: hit.actor,
        },
        None => BeamEnd {
            hit: false,
            location: extended,
            actor: None,
        },
    }
}

/// Weapon discharge: всё, что происходит при одном выстреле (кроме таймеров)
///
/// Каждый side effect пропускается независимо, если нет asset'а или socket'а.
pub struct WeaponDischarge<'a> {
    /// Barrel socket transform (None — у меша нет socket'а)
    pub muzzle: Option<Transform>,
    pub viewport: &'a dyn Viewport,
    pub tracer: &'a dyn WorldTracer,
    pub trace: &'a TraceTuning,
    pub assets: &'a CombatAssets,
    pub presentation: &'a mut dyn Presentation,
    /// Последний resolved beam end (для debug/тестов)
    pub last_beam: Option<BeamEnd>,
}

impl ShotExecutor for WeaponDischarge<'_> {
    fn discharge(&mut self) {
        if let Some(cue) = &self.assets.fire_sound {
            self.presentation
                .present(PresentationCommand::PlaySound { cue: cue.clone() });
        }

        match self.muzzle {
            Some(socket) => self.discharge_from_barrel(socket),
            None => logger::log("Discharge: no barrel socket, muzzle/beam effects skipped"),
        }

        if let Some(montage) = &self.assets.hip_fire_montage {
            self.presentation.present(PresentationCommand::PlayMontage {
                montage: montage.clone(),
                section: self.assets.fire_montage_section.clone(),
            });
        }
    }
}

impl WeaponDischarge<'_> {
    fn discharge_from_barrel(&mut self, socket: Transform) {
        if let Some(effect) = &self.assets.muzzle_flash {
            self.presentation.present(PresentationCommand::SpawnParticles {
                effect: effect.clone(),
                transform: socket,
                beam_target: None,
            });
        }

        let probe = CrosshairProbe::new(self.viewport, self.tracer, self.trace);
        let Some(beam) = probe.resolve_beam_end(socket.translation, self.trace.beam_extension) else {
            logger::log("Discharge: viewport unavailable, beam skipped");
            return;
        };
        self.last_beam = Some(beam);

        if !beam.hit {
            return;
        }

        if let Some(effect) = &self.assets.impact_particles {
            self.presentation.present(PresentationCommand::SpawnParticles {
                effect: effect.clone(),
                transform: Transform::from_translation(beam.location),
                beam_target: None,
            });
        }

        if let Some(effect) = &self.assets.beam_particles {
            self.presentation.present(PresentationCommand::SpawnParticles {
                effect: effect.clone(),
                transform: socket,
                beam_target: Some(beam.location),
            });
        }
    }
}
