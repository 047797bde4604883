use super::{components::*, events::*};
use crate::core::events::LogEvent;
use bevy::prelude::*;

/// 打印背包内容
pub fn print_backpack(
    mut ev_list: EventReader<ListBackpackEvent>,
    backpack: Res<Backpack>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    log.write(LogEvent(format!(
        "Backpack: {}/{} slots",
        backpack.stacks.len(),
        backpack.capacity
    )));
    if backpack.stacks.is_empty() {
        log.write(LogEvent("  (empty)".into()));
    }
    for (idx, stack) in backpack.stacks.iter().enumerate() {
        log.write(LogEvent(format!(
            "[{idx}] {} ×{} (id={})",
            stack.id.display_name(),
            stack.count(),
            stack.id
        )));
    }
}
