use super::components::PanelState;
use crate::catalog::Catalog;
use crate::catalog::crafted::CraftedItems;
use crate::catalog::curated::CuratedSets;
use crate::catalog::engine::CatalogFilter;
use crate::catalog::filter::FilterCategory;
use crate::core::events::LogEvent;
use crate::core::resources::HotKeys;
use crate::crafting::events::{DestroyRequest, DestroyRequestEvent};
use bevy::prelude::*;

/// 每行三列
const COLUMNS: usize = 3;

/// 开关面板 / 销毁选中目标
pub fn poll_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    hotkeys: Res<HotKeys>,
    mut panel: ResMut<PanelState>,
    mut ev_destroy: EventWriter<DestroyRequestEvent>,
    mut log: EventWriter<LogEvent>,
) {
    if keys.just_pressed(hotkeys.toggle_panel) && !panel.toggle() {
        log.write(LogEvent("ModCrafting panel closed".into()));
    }
    if keys.just_pressed(hotkeys.destroy_target) {
        ev_destroy.write(DestroyRequestEvent(DestroyRequest::Target));
    }
}

/// 面板状态或目录变化时重画
pub fn render_panel(
    panel: Res<PanelState>,
    catalog: Res<Catalog>,
    curated: Res<CuratedSets>,
    crafted: Res<CraftedItems>,
    mut log: EventWriter<LogEvent>,
) {
    if !panel.visible || !(panel.is_changed() || catalog.is_changed()) {
        return;
    }
    for line in render_lines(&panel, &catalog, &curated, &crafted) {
        log.write(LogEvent(line));
    }
}

pub fn render_lines(
    panel: &PanelState,
    catalog: &Catalog,
    curated: &CuratedSets,
    crafted: &CraftedItems,
) -> Vec<String> {
    let filter = CatalogFilter::new(catalog, curated);
    let result = filter.filter_catalog(panel.filter, &panel.keyword);

    let header = match panel.filter {
        FilterCategory::Keyword => format!("Keyword \"{}\"", panel.keyword),
        other => other.to_string(),
    };
    let mut lines = vec![format!(
        "=== ModCrafting | Filter: {header} | {} items ===",
        result.len()
    )];

    if result.is_empty() {
        lines.push("  (empty)".into());
    }
    for (row, chunk) in result.entries().chunks(COLUMNS).enumerate() {
        let cells: String = chunk
            .iter()
            .enumerate()
            .map(|(col, entry)| {
                let index = row * COLUMNS + col;
                let marker = if index == panel.selected { '>' } else { ' ' };
                format!("{marker}[{index:>3}] {:<26}", entry.name)
            })
            .collect();
        lines.push(cells.trim_end().to_string());
    }

    let selected = result
        .get(panel.selected)
        .map_or_else(|| "-".to_string(), |entry| entry.name.clone());
    let crafted_here = filter
        .filter_crafted(crafted, panel.filter, &panel.keyword)
        .len();
    lines.push(format!(
        "Selected: {selected} | crafted under filter: {crafted_here}/{} | backpack: {} | destroy target: {}",
        crafted.len(),
        if panel.add_to_backpack { "on" } else { "off" },
        if panel.destroy_target_enabled { "on" } else { "off" }
    ));
    lines
}
