//! One-shot timer scheduler для fire control
//!
//! Каждый персонаж владеет своим `TimerQueue`. Bevy система раз в frame зовёт
//! `advance(dt, ..)`; все таймеры, истёкшие внутри шага, срабатывают по порядку
//! времени. Перед каждым callback часы встают на момент срабатывания, поэтому
//! таймер, перевзведённый из callback, отсчитывается от этого момента, а не от
//! конца frame. Cadence не зависит от frame rate.

/// Логические таймеры fire control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FireTimer {
    /// Конец cooldown между выстрелами
    AutomaticFireReset,
    /// Конец crosshair "shooting" pulse
    CrosshairPulseEnd,
}

/// Cancellable handle (уникален в пределах одного scheduler'а)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Scheduler abstraction: "сработать один раз через duration, можно отменить"
pub trait FireScheduler {
    fn schedule_once(&mut self, duration: f32, timer: FireTimer) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Минимальная длительность (нулевой таймер не должен срабатывать в том же instant бесконечно)
const MIN_DURATION: f64 = 1.0e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTimer {
    handle: TimerHandle,
    timer: FireTimer,
    fire_at: f64,
}

/// Timer queue с внутренними часами (секунды, f64 чтобы не копить ошибку)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimerQueue {
    now: f64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Текущее время очереди
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|pending| pending.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Сдвинуть часы на `delta_time` и отдать все истёкшие таймеры в `on_expire`
    ///
    /// Callback получает очередь обратно → может взводить/отменять таймеры.
    /// Таймеры, взведённые из callback и истекающие внутри того же шага,
    /// срабатывают в этом же вызове.
    pub fn advance<F>(&mut self, delta_time: f32, mut on_expire: F)
    where
        F: FnMut(TimerHandle, FireTimer, &mut TimerQueue),
    {
        let target = self.now + f64::from(delta_time.max(0.0));

        while let Some(index) = self.next_due(target) {
            let due = self.pending.swap_remove(index);
            self.now = due.fire_at.max(self.now);
            on_expire(due.handle, due.timer, self);
        }

        self.now = target;
    }

    /// Самый ранний таймер с `fire_at <= target` (при равенстве — раньше взведённый)
    fn next_due(&self, target: f64) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.fire_at <= target)
            .min_by(|(_, a), (_, b)| {
                a.fire_at
                    .total_cmp(&b.fire_at)
                    .then_with(|| a.handle.cmp(&b.handle))
            })
            .map(|(index, _)| index)
    }
}

impl FireScheduler for TimerQueue {
    fn schedule_once(&mut self, duration: f32, timer: FireTimer) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        self.pending.push(PendingTimer {
            handle,
            timer,
            fire_at: self.now + f64::from(duration).max(MIN_DURATION),
        });

        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|pending| pending.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_duration() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(0.1, FireTimer::AutomaticFireReset);

        let mut fired = Vec::new();
        queue.advance(0.05, |_, timer, _| fired.push(timer));
        assert!(fired.is_empty());

        queue.advance(0.06, |_, timer, _| fired.push(timer));
        assert_eq!(fired, vec![FireTimer::AutomaticFireReset]);
        assert!(queue.is_empty());

        queue.advance(1.0, |_, timer, _| fired.push(timer));
        assert_eq!(fired.len(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_once(0.05, FireTimer::CrosshairPulseEnd);
        assert!(queue.is_pending(handle));

        queue.cancel(handle);
        assert!(!queue.is_pending(handle));

        let mut count = 0;
        queue.advance(1.0, |_, _, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_chronological_order_within_step() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(0.1, FireTimer::AutomaticFireReset);
        queue.schedule_once(0.05, FireTimer::CrosshairPulseEnd);

        let mut fired = Vec::new();
        queue.advance(0.5, |_, timer, queue| fired.push((timer, queue.now())));

        assert_eq!(fired[0].0, FireTimer::CrosshairPulseEnd);
        assert_eq!(fired[1].0, FireTimer::AutomaticFireReset);
        assert!((fired[0].1 - 0.05).abs() < 1e-6);
        assert!((fired[1].1 - 0.1).abs() < 1e-6);
        assert!((queue.now() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rearm_from_callback_catches_up() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(0.1, FireTimer::AutomaticFireReset);

        // Один большой шаг 0.35с: таймер перевзводится из callback → 3 срабатывания
        let mut times = Vec::new();
        queue.advance(0.35, |_, timer, queue| {
            times.push(queue.now());
            queue.schedule_once(0.1, timer);
        });

        assert_eq!(times.len(), 3);
        assert!((times[2] - 0.3).abs() < 1e-6);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_zero_duration_is_clamped() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(0.0, FireTimer::CrosshairPulseEnd);

        let mut count = 0;
        queue.advance(0.0, |_, _, _| count += 1);
        assert_eq!(count, 0);

        queue.advance(0.001, |_, _, _| count += 1);
        assert_eq!(count, 1);
    }
}
