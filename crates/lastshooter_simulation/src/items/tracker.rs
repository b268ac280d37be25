//! Item trace tracker — какой предмет под прицелом
//!
//! Трассировка включена только пока персонаж пересекает хотя бы одну item сферу
//! (`overlapped_item_count > 0`). Каждый frame crosshair trace; если попали в
//! interactable item — показываем его prompt и прячем prompt предыдущего.
//!
//! Промах (trace без blocking hit) оставляет оба указателя как есть:
//! prompt последнего предмета остаётся видимым, пока trace снова во что-то
//! не попадёт или трассировка не выключится.

use bevy::prelude::*;

use crate::shooting::CrosshairProbe;

/// Доступ к prompt'ам предметов (ECS query / тестовый stub)
pub trait PickupPrompts {
    fn is_interactable(&self, actor: Entity) -> bool;
    fn set_prompt_visible(&mut self, item: Entity, visible: bool);
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct ItemTraceTracker {
    overlapped_item_count: u32,
    should_trace: bool,
    /// Non-owning ссылки на items
    trace_hit_item: Option<Entity>,
    trace_hit_item_last_frame: Option<Entity>,
}

impl ItemTraceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count клампится снизу нулём; трассировка включена iff count > 0
    pub fn adjust_overlap_count(&mut self, delta: i32) -> bool {
        let next = i64::from(self.overlapped_item_count) + i64::from(delta);
        if next <= 0 {
            self.overlapped_item_count = 0;
            self.should_trace = false;
        } else {
            self.overlapped_item_count = u32::try_from(next).unwrap_or(u32::MAX);
            self.should_trace = true;
        }
        self.should_trace
    }

    pub fn overlapped_item_count(&self) -> u32 {
        self.overlapped_item_count
    }

    pub fn should_trace(&self) -> bool {
        self.should_trace
    }

    /// Item под прицелом в этом frame
    pub fn trace_hit_item(&self) -> Option<Entity> {
        self.trace_hit_item
    }

    pub fn trace_hit_item_last_frame(&self) -> Option<Entity> {
        self.trace_hit_item_last_frame
    }

    /// Забыть оба указателя (после swap: подобранный item больше не "под прицелом")
    pub fn clear_traced_items(&mut self) {
        self.trace_hit_item = None;
        self.trace_hit_item_last_frame = None;
    }

    pub fn update(
        &mut self,
        should_trace: bool,
        probe: &CrosshairProbe<'_>,
        prompts: &mut impl PickupPrompts,
    ) {
        if !should_trace {
            if let Some(last) = self.trace_hit_item_last_frame.take() {
                prompts.set_prompt_visible(last, false);
            }
            self.trace_hit_item = None;
            return;
        }

        // Нет viewport или нет blocking hit → указатели не трогаем
        let Some(trace) = probe.trace() else {
            return;
        };
        if !trace.hit {
            return;
        }

        let current = trace.actor.filter(|actor| prompts.is_interactable(*actor));
        self.trace_hit_item = current;

        if let Some(item) = current {
            prompts.set_prompt_visible(item, true);
        }

        if let Some(last) = self.trace_hit_item_last_frame {
            if Some(last) != current {
                prompts.set_prompt_visible(last, false);
            }
        }

        self.trace_hit_item_last_frame = current;
    }
}
