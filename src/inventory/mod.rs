pub mod components;
pub mod events;
mod systems;

use bevy::prelude::*;
use crate::core::states::AppState;
use components::*;
use events::*;
use systems::*;

/// 玩家背包：制作时勾选"放进背包"的物品存在这里
pub struct InventoryPlugin;
impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Backpack>()
            .add_event::<ListBackpackEvent>()
            .add_systems(Update, print_backpack.run_if(in_state(AppState::InGame)));
    }
}
