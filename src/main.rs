use bevy::prelude::*;

mod catalog;
mod core;
mod crafting;
mod data;
mod interface;
mod inventory;
mod panel;

use crate::catalog::CatalogPlugin;
use crate::core::CorePlugin;
use crate::core::resources::{CONFIG_PATH, ModConfig};
use crate::core::states;
use crate::crafting::CraftingPlugin;
use crate::interface::debug_cli::DebugCliPlugin;
use crate::inventory::InventoryPlugin;
use crate::panel::PanelPlugin;

fn main() {
    let (config, load_error) = ModConfig::load_or_default(CONFIG_PATH);
    let visible = config.session.show_window;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "ModCrafting".into(),
                visible,
                ..default()
            }), // 默认不显示窗口，靠终端操作；热键需要窗口有焦点
            ..default()
        }))
        .add_plugins(CorePlugin {
            config,
            load_error: load_error.map(|err| format!("{err:#}")),
        })
        .add_plugins(CatalogPlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins(InventoryPlugin)
        .add_plugins(CraftingPlugin)
        .add_plugins(PanelPlugin)
        .add_plugins(DebugCliPlugin)
        .add_systems(Update, forward_log_event) // 简单打印
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();
}

fn forward_log_event(mut reader: EventReader<crate::core::events::LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}
