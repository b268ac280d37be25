//! Fire control state machine
//!
//! Состояния моделируются флагом `should_fire` (Idle = true, Cooldown = false):
//!
//! ```text
//! press ──► try_fire ──(should_fire)──► discharge, should_fire=false,
//!                                       pulse on, arm AutomaticFireReset
//! AutomaticFireReset ──► should_fire=true ──(button held)──► try_fire
//! CrosshairPulseEnd  ──► firing_bullet=false
//! ```
//!
//! Re-fire edge-triggered: новый выстрел только из timer callback, никакого
//! поллинга кнопки в frame tick. Release не отменяет pulse.

use crate::config::FireTuning;

use super::timers::{FireScheduler, FireTimer, TimerHandle};

/// Weapon discharge side effect (sound, muzzle flash, beam, montage)
pub trait ShotExecutor {
    fn discharge(&mut self);
}

impl<F: FnMut()> ShotExecutor for F {
    fn discharge(&mut self) {
        self()
    }
}

/// Runtime fire state одного персонажа
#[derive(Debug, Clone, PartialEq)]
pub struct FireControl {
    pub fire_button_held: bool,
    /// Можно начинать новый выстрел
    pub should_fire: bool,
    /// Crosshair "shooting" pulse активен
    pub firing_bullet: bool,
    automatic_fire_timer: Option<TimerHandle>,
    crosshair_pulse_timer: Option<TimerHandle>,
    /// Счётчик выстрелов (для HUD/тестов)
    pub shots_fired: u32,
}

impl Default for FireControl {
    fn default() -> Self {
        Self {
            fire_button_held: false,
            should_fire: true,
            firing_bullet: false,
            automatic_fire_timer: None,
            crosshair_pulse_timer: None,
            shots_fired: 0,
        }
    }
}

impl FireControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_fire_button(
        &mut self,
        tuning: &FireTuning,
        scheduler: &mut impl FireScheduler,
        shot: &mut impl ShotExecutor,
    ) {
        self.fire_button_held = true;
        self.try_fire(tuning, scheduler, shot);
    }

    /// Только снимает флаг: pending таймеры не трогаем
    pub fn release_fire_button(&mut self) {
        self.fire_button_held = false;
    }

    /// Выстрел, если cooldown закончился. Возвращает true, если выстрел был.
    pub fn try_fire(
        &mut self,
        tuning: &FireTuning,
        scheduler: &mut impl FireScheduler,
        shot: &mut impl ShotExecutor,
    ) -> bool {
        if !self.should_fire {
            return false;
        }

        shot.discharge();
        self.shots_fired += 1;
        self.start_crosshair_pulse(tuning, scheduler);

        self.should_fire = false;
        if let Some(previous) = self.automatic_fire_timer.take() {
            scheduler.cancel(previous);
        }
        self.automatic_fire_timer =
            Some(scheduler.schedule_once(tuning.automatic_fire_rate, FireTimer::AutomaticFireReset));

        true
    }

    /// Timer callback. Handles, которые уже не наши (перевзведены/отменены), игнорируются.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        timer: FireTimer,
        tuning: &FireTuning,
        scheduler: &mut impl FireScheduler,
        shot: &mut impl ShotExecutor,
    ) {
        match timer {
            FireTimer::AutomaticFireReset => {
                if self.automatic_fire_timer != Some(handle) {
                    return;
                }
                self.automatic_fire_timer = None;
                self.should_fire = true;
                if self.fire_button_held {
                    self.try_fire(tuning, scheduler, shot);
                }
            }
            FireTimer::CrosshairPulseEnd => {
                if self.crosshair_pulse_timer != Some(handle) {
                    return;
                }
                self.crosshair_pulse_timer = None;
                self.firing_bullet = false;
            }
        }
    }

    pub fn is_cooling_down(&self) -> bool {
        self.automatic_fire_timer.is_some()
    }

    /// Перевзвод pulse заменяет предыдущий (pulse длится от последнего выстрела)
    fn start_crosshair_pulse(&mut self, tuning: &FireTuning, scheduler: &mut impl FireScheduler) {
        self.firing_bullet = true;
        if let Some(previous) = self.crosshair_pulse_timer.take() {
            scheduler.cancel(previous);
        }
        self.crosshair_pulse_timer =
            Some(scheduler.schedule_once(tuning.shoot_time_duration, FireTimer::CrosshairPulseEnd));
    }
}
