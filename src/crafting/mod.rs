pub mod components;
pub mod errors;
pub mod events;
mod systems;

use crate::core::resources::ModConfig;
use crate::core::states::AppState;
use bevy::prelude::*;
use components::*;
use events::*;
use systems::*;

/// 生成 / 销毁物品，以及销毁前的确认流程
pub struct CraftingPlugin;
impl Plugin for CraftingPlugin {
    fn build(&self, app: &mut App) {
        let session = app
            .world()
            .get_resource::<ModConfig>()
            .map(|config| config.session.clone())
            .unwrap_or_default();

        app.insert_resource(Permission {
            host: session.host,
            multiplayer_allowed: session.multiplayer_allowed,
        })
        .init_resource::<PendingConfirmation>()
        .add_event::<CraftItemEvent>()
        .add_event::<DestroyRequestEvent>()
        .add_event::<DialogAnswerEvent>()
        .add_event::<PermissionChangedEvent>()
        .add_systems(
            Update,
            (permission_changed, craft_item, request_destroy, answer_dialog)
                .chain()
                .run_if(in_state(AppState::InGame)),
        );
    }
}
