//! Item model — подбираемые предметы и оружие
//!
//! # Архитектура
//!
//! Composition вместо иерархии: один `Item` компонент, вариант `ItemKind`
//! определяет capabilities:
//! - `Interactable` — у предмета есть pickup prompt (все items)
//! - `Throwable` — можно выбросить с impulse (только `ItemKind::Weapon`)

use bevy::prelude::*;
use rand::Rng;

use crate::camera::{forward_axis, right_axis, yaw_of};
use crate::config::ItemTuning;

/// Lifecycle предмета
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ItemState {
    /// Лежит в мире, можно подобрать
    Pickup,
    /// Летит к персонажу (interp к камере)
    EquipInterping,
    /// В инвентаре (скрыт)
    PickedUp,
    /// В руках персонажа
    Equipped,
    /// Выброшен, падает
    Falling,
}

/// Weapon-specific state
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct WeaponItem {
    pub falling: bool,
    /// Сколько ещё падать (секунды)
    pub fall_remaining: f32,
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum ItemKind {
    Weapon(WeaponItem),
    Generic,
}

/// Pickup prompt capability
pub trait Interactable {
    /// Prompt можно показать прямо сейчас
    fn is_interactable(&self) -> bool;
    fn set_pickup_prompt_visible(&mut self, visible: bool);
}

/// Throw capability
pub trait Throwable {
    /// Начать падение. Возвращает impulse (world space).
    fn throw(&mut self, yaw_degrees: f32, tuning: &ItemTuning, rng: &mut impl Rng) -> Vec3;

    /// Продвинуть падение; true — падение закончилось в этом шаге
    fn tick_fall(&mut self, delta_time: f32) -> bool;
}

/// Item component
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    pub state: ItemState,
    pub pickup_prompt_visible: bool,
}

impl Item {
    pub fn weapon(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Weapon(WeaponItem::default()),
            state: ItemState::Pickup,
            pickup_prompt_visible: false,
        }
    }

    pub fn generic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Generic,
            state: ItemState::Pickup,
            pickup_prompt_visible: false,
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon(_))
    }

    /// Смена состояния. Equipped/PickedUp прячут prompt.
    pub fn set_state(&mut self, state: ItemState) {
        self.state = state;
        if matches!(state, ItemState::Equipped | ItemState::PickedUp) {
            self.pickup_prompt_visible = false;
        }
    }

    /// Throwable view (None для не-оружия)
    pub fn as_throwable_mut(&mut self) -> Option<&mut WeaponItem> {
        match &mut self.kind {
            ItemKind::Weapon(weapon) => Some(weapon),
            ItemKind::Generic => None,
        }
    }
}

impl Interactable for Item {
    fn is_interactable(&self) -> bool {
        self.state == ItemState::Pickup
    }

    fn set_pickup_prompt_visible(&mut self, visible: bool) {
        self.pickup_prompt_visible = visible;
    }
}

impl Throwable for WeaponItem {
    fn throw(&mut self, yaw_degrees: f32, tuning: &ItemTuning, rng: &mut impl Rng) -> Vec3 {
        let forward = forward_axis(yaw_degrees);
        let right = right_axis(yaw_degrees);

        // Right ось с креном вокруг forward, затем случайный yaw
        let tilted = Quat::from_axis_angle(forward, tuning.throw_roll_deg.to_radians()) * right;
        let jitter = if tuning.throw_max_yaw_jitter_deg > 0.0 {
            rng.gen_range(0.0..tuning.throw_max_yaw_jitter_deg)
        } else {
            0.0
        };
        let direction = Quat::from_rotation_y(jitter.to_radians()) * tilted;

        self.falling = true;
        self.fall_remaining = tuning.throw_weapon_time;

        direction * tuning.throw_impulse
    }

    fn tick_fall(&mut self, delta_time: f32) -> bool {
        if !self.falling {
            return false;
        }

        self.fall_remaining -= delta_time;
        if self.fall_remaining > 0.0 {
            return false;
        }

        self.fall_remaining = 0.0;
        self.falling = false;
        true
    }
}

/// Yaw-only rotation для брошенного оружия (pitch/roll сбрасываются)
pub fn upright_rotation(rotation: Quat) -> (f32, Quat) {
    let yaw = yaw_of(rotation * Vec3::NEG_Z);
    (yaw, Quat::from_rotation_y(yaw.to_radians()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_only_pickup_items_are_interactable() {
        let mut item = Item::weapon("SMG");
        assert!(item.is_interactable());

        item.set_pickup_prompt_visible(true);
        item.set_state(ItemState::Equipped);
        assert!(!item.is_interactable());
        assert!(!item.pickup_prompt_visible);

        item.set_state(ItemState::Falling);
        assert!(!item.is_interactable());
    }

    #[test]
    fn test_generic_item_is_not_throwable() {
        let mut item = Item::generic("Ammo");
        assert!(!item.is_weapon());
        assert!(item.as_throwable_mut().is_none());
    }

    #[test]
    fn test_throw_impulse_direction() {
        let tuning = ItemTuning {
            throw_max_yaw_jitter_deg: 0.0,
            ..ItemTuning::default()
        };
        let mut weapon = WeaponItem::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let impulse = weapon.throw(0.0, &tuning, &mut rng);

        assert!(weapon.falling);
        assert!((impulse.length() - tuning.throw_impulse).abs() < 1.0);
        // Right (+X), -20° вокруг forward (-Z) == +20° вокруг +Z → вверх
        let expected = Vec3::new(20f32.to_radians().cos(), 20f32.to_radians().sin(), 0.0);
        assert!(impulse.normalize().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_throw_jitter_is_deterministic() {
        let tuning = ItemTuning::default();
        let mut a = WeaponItem::default();
        let mut b = WeaponItem::default();

        let first = a.throw(45.0, &tuning, &mut ChaCha8Rng::seed_from_u64(7));
        let second = b.throw(45.0, &tuning, &mut ChaCha8Rng::seed_from_u64(7));

        assert_eq!(first, second);
    }

    #[test]
    fn test_fall_ends_after_throw_time() {
        let tuning = ItemTuning::default();
        let mut weapon = WeaponItem::default();
        weapon.throw(0.0, &tuning, &mut ChaCha8Rng::seed_from_u64(3));

        assert!(!weapon.tick_fall(0.5));
        assert!(weapon.tick_fall(0.25));
        assert!(!weapon.falling);
        assert!(!weapon.tick_fall(1.0));
    }

    #[test]
    fn test_upright_rotation_keeps_yaw() {
        let tilted = Quat::from_rotation_y(30f32.to_radians()) * Quat::from_rotation_x(0.4);
        let (yaw, upright) = upright_rotation(tilted);

        assert!((yaw - 30.0).abs() < 1e-3);
        assert!((upright * Vec3::NEG_Z).abs_diff_eq(forward_axis(30.0), 1e-5));
    }
}
