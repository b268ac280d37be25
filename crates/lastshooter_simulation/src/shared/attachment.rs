//! Attachment компоненты: оружие, прикреплённое к socket'у персонажа

use bevy::prelude::*;

/// Attachment — привязка weapon entity к socket'у host персонажа
///
/// Engine adapter читает `Added<Attachment>` / `RemovedComponents<Attachment>`
/// и делает attach/detach визуала (detach сохраняет world transform).
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Attachment {
    /// Host entity (персонаж)
    pub host: Entity,

    /// Socket на skeletal mesh host'а (например "RightHandSocket")
    pub socket: String,
}

impl Attachment {
    /// Создать attachment для weapon
    pub fn weapon(host: Entity, socket: impl Into<String>) -> Self {
        Self {
            host,
            socket: socket.into(),
        }
    }
}
