//! Equipment — одно оружие в руках персонажа
//!
//! # Flow
//!
//! **Equip:** Attachment к hand socket → `ItemState::Equipped` → `EquippedWeapon = Some`
//!
//! **Drop:** `EquippedWeapon = None` → detach (world transform сохраняется) →
//! `ItemState::Falling` → throw impulse (`WeaponThrown`)
//!
//! **Swap:** drop текущего, equip нового (атомарно в одном system call)
//!
//! Здесь только чистые операции над компонентами. Commands (insert/remove
//! `Attachment`, spawn) делают Bevy системы в `player::systems`.

use bevy::prelude::*;
use rand::Rng;

use crate::config::{ItemTuning, SocketTuning};
use crate::logger;
use crate::shared::Attachment;

use super::item::{upright_rotation, Item, ItemState, Throwable};

/// Текущее оружие персонажа (non-owning ссылка на weapon entity)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct EquippedWeapon(pub Option<Entity>);

/// Оружие, которое персонаж получает при spawn'е (обрабатывается один раз)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DefaultWeapon {
    pub name: String,
}

impl DefaultWeapon {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Event: оружие выброшено (engine применяет impulse к physics body)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct WeaponThrown {
    pub weapon: Entity,
    pub impulse: Vec3,
    /// Yaw-only rotation, выставленная перед броском
    pub rotation: Quat,
}

/// Equip: item → руки `host`. Возвращает Attachment для weapon entity.
pub fn equip_item(
    host: Entity,
    weapon: Entity,
    item: &mut Item,
    equipped: &mut EquippedWeapon,
    sockets: &SocketTuning,
) -> Attachment {
    item.set_state(ItemState::Equipped);
    equipped.0 = Some(weapon);

    logger::log_info(&format!(
        "{:?} equipped {} ({:?}) to {}",
        host, item.name, weapon, sockets.hand_socket
    ));

    Attachment::weapon(host, sockets.hand_socket.clone())
}

/// Drop: снять текущее оружие и бросить
///
/// None — в руках ничего нет. Вызывающий обязан убрать `Attachment` с weapon entity.
pub fn drop_item(
    equipped: &mut EquippedWeapon,
    item: &mut Item,
    weapon_rotation: Quat,
    tuning: &ItemTuning,
    rng: &mut impl Rng,
) -> Option<WeaponThrown> {
    let weapon = equipped.0.take()?;

    item.set_state(ItemState::Falling);

    let (yaw, rotation) = upright_rotation(weapon_rotation);
    let impulse = match item.as_throwable_mut() {
        Some(throwable) => throwable.throw(yaw, tuning, rng),
        None => Vec3::ZERO,
    };

    logger::log_info(&format!("Dropped {} ({:?}), impulse {:?}", item.name, weapon, impulse));

    Some(WeaponThrown {
        weapon,
        impulse,
        rotation,
    })
}

/// Падение брошенного оружия; по окончании item снова `Pickup`
pub fn tick_fall(item: &mut Item, delta_time: f32) -> bool {
    let landed = item
        .as_throwable_mut()
        .is_some_and(|weapon| weapon.tick_fall(delta_time));

    if landed {
        item.set_state(ItemState::Pickup);
    }
    landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_equip_sets_state_and_attachment() {
        let host = Entity::from_raw(1);
        let weapon = Entity::from_raw(2);
        let mut item = Item::weapon("SMG");
        let mut equipped = EquippedWeapon::default();

        let attachment = equip_item(host, weapon, &mut item, &mut equipped, &SocketTuning::default());

        assert_eq!(item.state, ItemState::Equipped);
        assert_eq!(equipped.0, Some(weapon));
        assert_eq!(attachment, Attachment::weapon(host, "RightHandSocket"));
    }

    #[test]
    fn test_drop_without_weapon_is_noop() {
        let mut item = Item::weapon("SMG");
        let mut equipped = EquippedWeapon::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let thrown = drop_item(&mut equipped, &mut item, Quat::IDENTITY, &ItemTuning::default(), &mut rng);

        assert!(thrown.is_none());
        assert_eq!(item.state, ItemState::Pickup);
    }

    #[test]
    fn test_drop_then_land() {
        let weapon = Entity::from_raw(2);
        let mut item = Item::weapon("SMG");
        item.set_state(ItemState::Equipped);
        let mut equipped = EquippedWeapon(Some(weapon));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let tuning = ItemTuning::default();

        let thrown = drop_item(&mut equipped, &mut item, Quat::IDENTITY, &tuning, &mut rng)
            .expect("weapon was equipped");

        assert_eq!(thrown.weapon, weapon);
        assert!(thrown.impulse.length() > 0.0);
        assert_eq!(equipped.0, None);
        assert_eq!(item.state, ItemState::Falling);

        assert!(!tick_fall(&mut item, 0.5));
        assert!(tick_fall(&mut item, 0.3));
        assert_eq!(item.state, ItemState::Pickup);
    }
}
