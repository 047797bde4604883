pub mod crafted;
pub mod curated;
pub mod engine;
pub mod filter;

use bevy::prelude::*;
use std::collections::HashMap;

use crate::data::schema::{ItemDefinition, ItemId};
use crafted::CraftedItems;
use curated::CuratedSets;

/// 整个会话共享的物品目录（只读）
#[derive(Resource, Debug, Default, Clone)]
pub struct Catalog {
    items: HashMap<ItemId, ItemDefinition>,
}

impl Catalog {
    /// 重复的 id 以后出现的为准
    pub fn from_definitions(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        let mut items = HashMap::new();
        for definition in definitions {
            if let Some(old) = items.insert(definition.id.clone(), definition) {
                warn!("物品 id 重复: {}，保留后一条", old.id);
            }
        }
        Self { items }
    }

    pub fn get(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    /// 按 id / 显示名 / 本地化名查找，大小写不敏感。
    /// 精确 id 优先；否则多个候选里取 id 最小的那个。
    pub fn find(&self, token: &str) -> Option<&ItemDefinition> {
        let token = token.trim();
        if let Some(item) = self.items.get(&ItemId::from(token)) {
            return Some(item);
        }
        self.items
            .values()
            .filter(|item| {
                item.id.as_str().eq_ignore_ascii_case(token)
                    || item.display_name().eq_ignore_ascii_case(token)
                    || item
                        .name
                        .as_deref()
                        .is_some_and(|name| name.eq_ignore_ascii_case(token))
            })
            .min_by(|a, b| a.id.cmp(&b.id))
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// 筛选引擎用到的会话资源。目录本身由 DataPlugin 在加载完后插入。
pub struct CatalogPlugin;
impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Catalog>()
            .insert_resource(CuratedSets::builtin())
            .init_resource::<CraftedItems>();
    }
}
