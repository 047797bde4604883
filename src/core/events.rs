use bevy::prelude::*;

use super::resources::HotKeys;

/// 给玩家看的提示（HUD 的替身，由 main 里的 forward_log_event 打印）
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct LogEvent(pub String);

/// 启动时告诉玩家怎么打开面板
pub fn announce_mod(hotkeys: Res<HotKeys>, mut writer: EventWriter<LogEvent>) {
    writer.write(LogEvent(format!(
        "ModCrafting: press [{:?}] to open the crafting panel, [{:?}] to destroy the selected target. Type `help` for console commands.",
        hotkeys.toggle_panel, hotkeys.destroy_target
    )));
}
