pub mod components;
mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use components::PanelState;
use systems::*;

/// 面板可见性、筛选选择和热键
pub struct PanelPlugin;
impl Plugin for PanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanelState>().add_systems(
            Update,
            (poll_hotkeys, render_panel)
                .chain()
                .run_if(in_state(AppState::InGame)),
        );
    }
}
