pub mod loader;
pub mod schema;

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::catalog::Catalog;
use crate::catalog::curated::CuratedSets;
use crate::core::resources::ModConfig;
use crate::core::states::AppState;
use loader::RonAssetLoader;
use schema::{CuratedTable, ItemList};

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct CatalogAssets {
    items: Option<Handle<ItemList>>,
    curated: Option<Handle<CuratedTable>>,
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemList>()
            .init_asset::<CuratedTable>()
            .register_asset_loader(RonAssetLoader::<ItemList>::default())
            .register_asset_loader(RonAssetLoader::<CuratedTable>::default())
            .init_resource::<CatalogAssets>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(
                Update,
                check_loaded.run_if(in_state(AppState::Loading)),
            );
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    mut catalog_assets: ResMut<CatalogAssets>,
    asset_server: Res<AssetServer>,
    config: Res<ModConfig>,
) {
    catalog_assets.items = Some(asset_server.load(config.data.items.clone()));
    catalog_assets.curated = Some(asset_server.load(config.data.curated.clone()));
}

fn still_loading(state: &LoadState) -> bool {
    matches!(state, LoadState::NotLoaded | LoadState::Loading)
}

/// 两份资产都有结果（成功或失败）后再进游戏。
/// 目录失败 → 空目录；清单失败 → 保留内置清单。
fn check_loaded(
    mut commands: Commands,
    mut next: ResMut<NextState<AppState>>,
    catalog_assets: Res<CatalogAssets>,
    asset_server: Res<AssetServer>,
    item_lists: Res<Assets<ItemList>>,
    curated_tables: Res<Assets<CuratedTable>>,
) {
    let (Some(items), Some(curated)) = (&catalog_assets.items, &catalog_assets.curated) else {
        return;
    };
    let items_state = asset_server.load_state(items.id());
    let curated_state = asset_server.load_state(curated.id());
    if still_loading(&items_state) || still_loading(&curated_state) {
        return;
    }

    match item_lists.get(items) {
        Some(list) => {
            let catalog = Catalog::from_definitions(list.items.iter().cloned());
            info!("✔ Items loaded: {}", catalog.len());
            commands.insert_resource(catalog);
        }
        None => warn!("物品目录加载失败，目录为空: {items_state:?}"),
    }

    match curated_tables.get(curated) {
        Some(table) => {
            let sets = CuratedSets::new(table.version, table.sets.clone());
            info!("✔ Curated sets loaded (version {})", sets.version());
            commands.insert_resource(sets);
        }
        None => warn!("分类清单加载失败，使用内置清单: {curated_state:?}"),
    }

    next.set(AppState::InGame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogPlugin;
    use crate::core::resources::DataPaths;
    use bevy::asset::AssetPlugin;
    use bevy::state::app::StatesPlugin;
    use std::time::Duration;

    fn loading_app(data: DataPaths) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .init_state::<AppState>()
            .insert_resource(ModConfig {
                data,
                ..default()
            })
            .add_plugins((CatalogPlugin, DataPlugin));
        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Loading);
        app
    }

    /// 资产在后台线程加载，轮询到进入 InGame 为止
    fn run_until_in_game(app: &mut App) {
        for _ in 0..500 {
            app.update();
            if *app.world().resource::<State<AppState>>().get() == AppState::InGame {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("assets never settled");
    }

    #[test]
    fn shipped_assets_replace_the_defaults() {
        let mut app = loading_app(DataPaths::default());
        run_until_in_game(&mut app);

        let catalog = app.world().resource::<Catalog>();
        assert!(catalog.len() > 50);
        assert!(catalog.find("Log").is_some());
        let curated = app.world().resource::<CuratedSets>();
        assert_eq!(curated.version(), 3);
    }

    #[test]
    fn missing_assets_still_enter_the_game() {
        let mut app = loading_app(DataPaths {
            items: "data/no_such_items.ron".into(),
            curated: "data/no_such_curated.ron".into(),
        });
        run_until_in_game(&mut app);

        // 目录为空，分类清单保留内置版本
        assert_eq!(app.world().resource::<Catalog>().len(), 0);
        assert_eq!(
            *app.world().resource::<CuratedSets>(),
            CuratedSets::builtin()
        );
    }
}
