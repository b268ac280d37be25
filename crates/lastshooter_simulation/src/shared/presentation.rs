//! Presentation commands (ECS → engine)
//!
//! Simulation не играет звуки и не спавнит партиклы сама — она эмитит команды,
//! engine adapter их исполняет. Отсутствующий asset = команда не эмитится.

use bevy::prelude::*;

/// Одна команда presentation слою
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationCommand {
    /// Применить FOV к follow camera
    SetCameraFov { fov: f32 },
    /// 2D звук (fire cue)
    PlaySound { cue: String },
    /// Particle emitter в transform; `beam_target` = параметр "Target" для beam emitter
    SpawnParticles {
        effect: String,
        transform: Transform,
        beam_target: Option<Vec3>,
    },
    /// Montage + jump to section
    PlayMontage { montage: String, section: String },
}

/// Sink для presentation команд
pub trait Presentation {
    fn present(&mut self, command: PresentationCommand);
}

/// Буфер команд (Bevy системы потом конвертируют в `PresentationEvent`)
impl Presentation for Vec<PresentationCommand> {
    fn present(&mut self, command: PresentationCommand) {
        self.push(command);
    }
}

/// Event: presentation команда для конкретного персонажа
#[derive(Event, Debug, Clone)]
pub struct PresentationEvent {
    pub character: Entity,
    pub command: PresentationCommand,
}

impl PresentationEvent {
    /// Обернуть буфер команд в events для `character`
    pub fn batch(character: Entity, commands: Vec<PresentationCommand>) -> Vec<Self> {
        commands
            .into_iter()
            .map(|command| Self { character, command })
            .collect()
    }
}
