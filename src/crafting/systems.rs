use super::{components::*, errors::CraftingError, events::*};
use crate::catalog::Catalog;
use crate::catalog::crafted::{CraftedItemRecord, CraftedItems};
use crate::catalog::curated::CuratedSets;
use crate::catalog::engine::CatalogFilter;
use crate::core::events::LogEvent;
use crate::inventory::components::Backpack;
use crate::panel::components::PanelState;
use bevy::prelude::*;

/// 一次最多制作的数量
pub const MAX_CRAFT_COUNT: u32 = 999;

/// 一次制作的结果
struct CraftOutcome {
    name: String,
    count: u32,
    clamped: bool,
    stored: u32,
    /// 背包满了只好放到世界里的数量
    dropped: u32,
}

/// 失败统一在系统边界处理：写日志 + 提示玩家，不重试
fn report(log: &mut EventWriter<LogEvent>, action: &str, err: CraftingError) {
    warn!("[ModCrafting:{action}] {err}");
    log.write(LogEvent(format!("Error: {err}")));
}

/// 处理"craft"：不消耗材料，直接在世界里生成实体并记录下来
pub fn craft_item(
    mut commands: Commands,
    mut ev_craft: EventReader<CraftItemEvent>,
    mut crafted: ResMut<CraftedItems>,
    mut backpack: ResMut<Backpack>,
    catalog: Res<Catalog>,
    permission: Res<Permission>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_craft.read() {
        match spawn_crafted(&mut commands, &mut crafted, &mut backpack, &catalog, &permission, ev) {
            Ok(outcome) => {
                let CraftOutcome { name, count, clamped, stored, dropped } = outcome;
                if clamped {
                    log.write(LogEvent(format!("Count limited to {MAX_CRAFT_COUNT}")));
                }
                info!("crafted {count} x {name} ({stored} in backpack)");
                log.write(LogEvent(format!("{count} x {name} crafted!")));
                if dropped > 0 {
                    log.write(LogEvent(format!(
                        "Backpack is full, {dropped} x {name} placed in the world"
                    )));
                }
            }
            Err(err) => report(&mut log, "craft_item", err),
        }
    }
}

fn spawn_crafted(
    commands: &mut Commands,
    crafted: &mut CraftedItems,
    backpack: &mut Backpack,
    catalog: &Catalog,
    permission: &Permission,
    ev: &CraftItemEvent,
) -> Result<CraftOutcome, CraftingError> {
    if !permission.is_active() {
        return Err(CraftingError::NotPermitted);
    }
    let item = catalog
        .find(&ev.item)
        .ok_or_else(|| CraftingError::UnknownItem(ev.item.clone()))?;

    // 建筑一次只放一个，而且只能放在世界里
    let requested = ev.count.max(1);
    let (count, to_backpack) = if item.construction {
        (1, false)
    } else {
        (requested.min(MAX_CRAFT_COUNT), ev.to_backpack)
    };
    let mut outcome = CraftOutcome {
        name: item.localized_name(),
        count,
        clamped: count < requested && !item.construction,
        stored: 0,
        dropped: 0,
    };

    for _ in 0..count {
        let entity = commands
            .spawn((
                CraftedItem {
                    id: item.id.clone(),
                },
                Name::new(item.display_name()),
            ))
            .id();
        if to_backpack {
            if backpack.store(&item.id, entity) {
                commands.entity(entity).insert(InBackpack);
                outcome.stored += 1;
            } else {
                outcome.dropped += 1;
            }
        }
        crafted.record(CraftedItemRecord {
            entity,
            id: item.id.clone(),
        });
    }
    Ok(outcome)
}

/// 收到销毁请求只是弹确认，不直接动手
pub fn request_destroy(
    mut ev_request: EventReader<DestroyRequestEvent>,
    mut pending: ResMut<PendingConfirmation>,
    panel: Res<PanelState>,
    crafted: Res<CraftedItems>,
    permission: Res<Permission>,
    mut log: EventWriter<LogEvent>,
) {
    for DestroyRequestEvent(request) in ev_request.read() {
        match prepare_destroy(*request, &panel, &crafted, &permission) {
            Ok(action) => {
                log.write(LogEvent(format!(
                    "Are you sure you want to destroy {}? (yes / no)",
                    action.describe()
                )));
                pending.0 = Some(action);
            }
            Err(err) => report(&mut log, "request_destroy", err),
        }
    }
}

fn prepare_destroy(
    request: DestroyRequest,
    panel: &PanelState,
    crafted: &CraftedItems,
    permission: &Permission,
) -> Result<PendingDestroy, CraftingError> {
    if !permission.is_active() {
        return Err(CraftingError::NotPermitted);
    }
    match request {
        DestroyRequest::Filtered => Ok(PendingDestroy::Filtered {
            category: panel.filter,
            keyword: panel.keyword.clone(),
        }),
        DestroyRequest::Target => {
            if !panel.destroy_target_enabled {
                return Err(CraftingError::TargetOptionDisabled);
            }
            let record = panel
                .target
                .and_then(|index| crafted.get(index))
                .ok_or(CraftingError::NoTarget)?;
            Ok(PendingDestroy::Target(record.clone()))
        }
    }
}

/// 确认框回答：yes 执行挂起的销毁，no 丢弃
pub fn answer_dialog(
    mut commands: Commands,
    mut ev_answer: EventReader<DialogAnswerEvent>,
    mut pending: ResMut<PendingConfirmation>,
    mut crafted: ResMut<CraftedItems>,
    mut backpack: ResMut<Backpack>,
    mut panel: ResMut<PanelState>,
    catalog: Res<Catalog>,
    curated: Res<CuratedSets>,
    mut log: EventWriter<LogEvent>,
) {
    for DialogAnswerEvent(yes) in ev_answer.read() {
        let Some(action) = pending.0.take() else {
            report(&mut log, "answer_dialog", CraftingError::NothingPending);
            continue;
        };
        if !*yes {
            log.write(LogEvent(format!("Kept {}.", action.describe())));
            continue;
        }

        let filter = CatalogFilter::new(&catalog, &curated);
        match destroy_pending(&mut commands, &mut crafted, &mut backpack, filter, &action) {
            Ok(count) => {
                info!("destroyed {count} crafted item(s)");
                log.write(LogEvent(format!("{} destroyed!", action.describe())));
            }
            Err(err) => report(&mut log, "answer_dialog", err),
        }
        // 下标已经失效
        panel.target = None;
    }
}

fn destroy_pending(
    commands: &mut Commands,
    crafted: &mut CraftedItems,
    backpack: &mut Backpack,
    filter: CatalogFilter<'_>,
    action: &PendingDestroy,
) -> Result<usize, CraftingError> {
    let doomed = match action {
        PendingDestroy::Filtered { category, keyword } => {
            filter.filter_crafted(crafted, *category, keyword)
        }
        PendingDestroy::Target(record) => crafted
            .records()
            .iter()
            .filter(|r| r.entity == record.entity)
            .cloned()
            .collect(),
    };
    if doomed.is_empty() {
        return Err(match action {
            PendingDestroy::Target(_) => CraftingError::NoTarget,
            filtered => CraftingError::NothingToDestroy(filtered.describe()),
        });
    }

    for record in &doomed {
        commands.entity(record.entity).despawn();
        backpack.take(record.entity);
    }
    if doomed.len() == crafted.len() {
        crafted.clear();
    } else {
        for record in &doomed {
            crafted.forget(record.entity);
        }
    }
    Ok(doomed.len())
}

pub fn permission_changed(
    mut ev_permission: EventReader<PermissionChangedEvent>,
    mut permission: ResMut<Permission>,
    mut log: EventWriter<LogEvent>,
) {
    for PermissionChangedEvent(allowed) in ev_permission.read() {
        permission.multiplayer_allowed = *allowed;
        let (verdict, reason) = if *allowed {
            ("granted", "the game host allowed usage")
        } else {
            ("revoked", "the game host did not allow usage")
        };
        log.write(LogEvent(format!(
            "Permission to use mods and cheats in multiplayer was {verdict} because {reason}."
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::FilterCategory;
    use crate::data::schema::{ItemDefinition, ItemId};

    fn test_app(permission: Permission) -> App {
        let catalog = Catalog::from_definitions([
            ItemDefinition::new("Log"),
            ItemDefinition::new("Rope"),
            ItemDefinition { tool: true, ..ItemDefinition::new("Axe") },
            ItemDefinition { construction: true, ..ItemDefinition::new("Small_Fire") },
        ]);
        let mut app = App::new();
        app.add_event::<CraftItemEvent>()
            .add_event::<DestroyRequestEvent>()
            .add_event::<DialogAnswerEvent>()
            .add_event::<PermissionChangedEvent>()
            .add_event::<LogEvent>()
            .insert_resource(catalog)
            .insert_resource(CuratedSets::builtin())
            .insert_resource(permission)
            .init_resource::<CraftedItems>()
            .init_resource::<Backpack>()
            .init_resource::<PanelState>()
            .init_resource::<PendingConfirmation>()
            .add_systems(
                Update,
                (permission_changed, craft_item, request_destroy, answer_dialog).chain(),
            );
        app
    }

    fn host() -> Permission {
        Permission { host: true, multiplayer_allowed: false }
    }

    fn send<E: Event>(app: &mut App, event: E) {
        app.world_mut().send_event(event);
        app.update();
    }

    fn craft(app: &mut App, item: &str, count: u32) {
        send(app, CraftItemEvent { item: item.into(), count, to_backpack: false });
    }

    fn craft_to_backpack(app: &mut App, item: &str, count: u32) {
        send(app, CraftItemEvent { item: item.into(), count, to_backpack: true });
    }

    fn crafted_ids(app: &App) -> Vec<String> {
        app.world()
            .resource::<CraftedItems>()
            .records()
            .iter()
            .map(|r| r.id.to_string())
            .collect()
    }

    fn messages(app: &App) -> Vec<String> {
        app.world()
            .resource::<Events<LogEvent>>()
            .iter_current_update_events()
            .map(|e| e.0.clone())
            .collect()
    }

    #[test]
    fn crafting_spawns_and_records_entities() {
        let mut app = test_app(host());
        craft(&mut app, "log", 3);

        assert_eq!(crafted_ids(&app), ["Log", "Log", "Log"]);
        for record in app.world().resource::<CraftedItems>().records() {
            let item = app.world().get::<CraftedItem>(record.entity);
            assert_eq!(item.map(|c| &c.id), Some(&ItemId::from("Log")));
        }
        assert_eq!(messages(&app), ["3 x Log crafted!"]);
    }

    #[test]
    fn construction_is_crafted_once_and_zero_means_one() {
        let mut app = test_app(host());
        craft(&mut app, "Small_Fire", 5);
        craft(&mut app, "Rope", 0);
        assert_eq!(crafted_ids(&app), ["Small_Fire", "Rope"]);
    }

    #[test]
    fn unknown_item_is_reported_not_recorded() {
        let mut app = test_app(host());
        craft(&mut app, "Unobtainium", 1);
        assert!(crafted_ids(&app).is_empty());
        assert_eq!(messages(&app).len(), 1);
        assert!(messages(&app)[0].contains("Unobtainium"));
    }

    #[test]
    fn crafting_requires_host_or_multiplayer_permission() {
        let mut app = test_app(Permission { host: false, multiplayer_allowed: false });
        craft(&mut app, "Axe", 1);
        assert!(crafted_ids(&app).is_empty());

        send(&mut app, PermissionChangedEvent(true));
        assert!(app.world().resource::<Permission>().is_active());
        craft(&mut app, "Axe", 1);
        assert_eq!(crafted_ids(&app), ["Axe"]);
    }

    #[test]
    fn destroy_under_filter_only_removes_matching_items() {
        let mut app = test_app(host());
        craft(&mut app, "Log", 1);
        craft(&mut app, "Axe", 1);
        let axe = app.world().resource::<CraftedItems>().records()[1].entity;

        app.world_mut().resource_mut::<PanelState>().set_filter(FilterCategory::Tools);
        send(&mut app, DestroyRequestEvent(DestroyRequest::Filtered));
        // 还没确认，什么都没动
        assert_eq!(crafted_ids(&app), ["Log", "Axe"]);

        send(&mut app, DialogAnswerEvent(true));
        assert_eq!(crafted_ids(&app), ["Log"]);
        assert!(!app.world().entities().contains(axe));
        assert!(app.world().resource::<PendingConfirmation>().0.is_none());
    }

    #[test]
    fn filter_is_snapshotted_when_the_prompt_opens() {
        let mut app = test_app(host());
        craft(&mut app, "Log", 1);
        craft(&mut app, "Axe", 1);

        app.world_mut().resource_mut::<PanelState>().set_filter(FilterCategory::Resources);
        send(&mut app, DestroyRequestEvent(DestroyRequest::Filtered));
        app.world_mut().resource_mut::<PanelState>().set_filter(FilterCategory::Tools);
        send(&mut app, DialogAnswerEvent(true));

        assert_eq!(crafted_ids(&app), ["Axe"]);
    }

    #[test]
    fn declining_keeps_everything() {
        let mut app = test_app(host());
        craft(&mut app, "Log", 2);
        send(&mut app, DestroyRequestEvent(DestroyRequest::Filtered));
        send(&mut app, DialogAnswerEvent(false));
        assert_eq!(crafted_ids(&app), ["Log", "Log"]);

        // 已经回答过，再回答就没有挂起的操作了
        send(&mut app, DialogAnswerEvent(true));
        assert_eq!(crafted_ids(&app), ["Log", "Log"]);
    }

    #[test]
    fn destroy_target_needs_option_and_selection() {
        let mut app = test_app(host());
        craft(&mut app, "Log", 1);
        craft(&mut app, "Rope", 1);

        send(&mut app, DestroyRequestEvent(DestroyRequest::Target));
        assert!(app.world().resource::<PendingConfirmation>().0.is_none());

        app.world_mut().resource_mut::<PanelState>().destroy_target_enabled = true;
        send(&mut app, DestroyRequestEvent(DestroyRequest::Target));
        assert!(app.world().resource::<PendingConfirmation>().0.is_none());

        app.world_mut().resource_mut::<PanelState>().target = Some(1);
        send(&mut app, DestroyRequestEvent(DestroyRequest::Target));
        send(&mut app, DialogAnswerEvent(true));

        assert_eq!(crafted_ids(&app), ["Log"]);
        assert_eq!(app.world().resource::<PanelState>().target, None);
    }

    #[test]
    fn empty_filtered_destroy_is_reported() {
        let mut app = test_app(host());
        craft(&mut app, "Log", 1);
        app.world_mut().resource_mut::<PanelState>().set_filter(FilterCategory::Weapons);
        send(&mut app, DestroyRequestEvent(DestroyRequest::Filtered));
        send(&mut app, DialogAnswerEvent(true));

        assert_eq!(crafted_ids(&app), ["Log"]);
        assert!(messages(&app)[0].starts_with("Error: No weapons"));
    }

    #[test]
    fn backpack_option_stores_crafted_items() {
        let mut app = test_app(host());
        craft_to_backpack(&mut app, "Rope", 2);

        let records = app.world().resource::<CraftedItems>().records().to_vec();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(app.world().get::<InBackpack>(record.entity).is_some());
        }
        assert_eq!(app.world().resource::<Backpack>().count(&"Rope".into()), 2);
    }

    #[test]
    fn construction_always_goes_to_the_world() {
        let mut app = test_app(host());
        craft_to_backpack(&mut app, "Small_Fire", 3);

        let records = app.world().resource::<CraftedItems>().records().to_vec();
        assert_eq!(records.len(), 1);
        assert!(app.world().get::<InBackpack>(records[0].entity).is_none());
        assert!(app.world().resource::<Backpack>().stacks.is_empty());
    }

    #[test]
    fn full_backpack_drops_the_rest_in_the_world() {
        let mut app = test_app(host());
        app.insert_resource(Backpack::with_capacity(1));
        craft_to_backpack(&mut app, "Log", 1);
        craft_to_backpack(&mut app, "Rope", 1);

        assert_eq!(crafted_ids(&app), ["Log", "Rope"]);
        assert_eq!(app.world().resource::<Backpack>().count(&"Rope".into()), 0);
        assert_eq!(
            messages(&app),
            ["1 x Rope crafted!", "Backpack is full, 1 x Rope placed in the world"]
        );
    }

    #[test]
    fn destroying_removes_items_from_the_backpack() {
        let mut app = test_app(host());
        craft_to_backpack(&mut app, "Log", 2);
        craft(&mut app, "Axe", 1);

        app.world_mut().resource_mut::<PanelState>().set_filter(FilterCategory::Resources);
        send(&mut app, DestroyRequestEvent(DestroyRequest::Filtered));
        send(&mut app, DialogAnswerEvent(true));

        assert_eq!(crafted_ids(&app), ["Axe"]);
        assert!(app.world().resource::<Backpack>().stacks.is_empty());
    }

    #[test]
    fn destroying_everything_empties_the_collection() {
        let mut app = test_app(host());
        craft(&mut app, "Log", 1);
        craft(&mut app, "Axe", 1);

        send(&mut app, DestroyRequestEvent(DestroyRequest::Filtered));
        send(&mut app, DialogAnswerEvent(true));

        assert!(crafted_ids(&app).is_empty());
        assert_eq!(app.world().resource::<CraftedItems>().len(), 0);
    }

    #[test]
    fn huge_counts_are_limited() {
        let mut app = test_app(host());
        craft(&mut app, "Log", 4_000_000_000);

        assert_eq!(crafted_ids(&app).len(), MAX_CRAFT_COUNT as usize);
        assert_eq!(
            messages(&app),
            [
                format!("Count limited to {MAX_CRAFT_COUNT}"),
                format!("{MAX_CRAFT_COUNT} x Log crafted!"),
            ]
        );
    }
}
