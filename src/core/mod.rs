use bevy::prelude::*;

pub mod events;
pub mod keys;
pub mod resources;
pub mod states;

use resources::{HotKeys, ModConfig};

/// 核心插件：注册状态 / 提示事件 / 配置资源
pub struct CorePlugin {
    pub config: ModConfig,
    /// main 里读配置失败时的错误文本，插件构建时再打日志（那时 LogPlugin 已就绪）
    pub load_error: Option<String>,
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::AppState;

        if let Some(err) = &self.load_error {
            warn!("配置读取失败，使用默认配置: {err}");
        }
        let hotkeys = HotKeys::from_bindings(&self.config.keybindings);

        app.init_state::<AppState>()
            .add_event::<events::LogEvent>()
            .insert_resource(self.config.clone())
            .insert_resource(hotkeys)
            .add_systems(Startup, events::announce_mod);
    }
}
