use bevy::prelude::*;

use crate::data::schema::ItemId;

/// 本 mod 生成的一件物品：世界里的实体 + 它的物品种类
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftedItemRecord {
    pub entity: Entity,
    pub id: ItemId,
}

/// 按生成顺序记录的已制作物品，整个会话期间只会被显式增删
#[derive(Resource, Debug, Default)]
pub struct CraftedItems {
    records: Vec<CraftedItemRecord>,
}

impl CraftedItems {
    pub fn record(&mut self, record: CraftedItemRecord) {
        self.records.push(record);
    }

    /// 移除不存在的实体是空操作
    pub fn forget(&mut self, entity: Entity) -> Option<CraftedItemRecord> {
        let index = self.records.iter().position(|r| r.entity == entity)?;
        Some(self.records.remove(index))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, index: usize) -> Option<&CraftedItemRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[CraftedItemRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn record_then_forget_is_a_no_op() {
        let e = entities(3);
        let mut crafted = CraftedItems::default();
        crafted.record(CraftedItemRecord { entity: e[0], id: "Log".into() });
        crafted.record(CraftedItemRecord { entity: e[1], id: "Axe".into() });
        let before = crafted.records().to_vec();

        crafted.record(CraftedItemRecord { entity: e[2], id: "Stone".into() });
        let removed = crafted.forget(e[2]);

        assert_eq!(removed.map(|r| r.id), Some(ItemId::from("Stone")));
        assert_eq!(crafted.records(), before.as_slice());
    }

    #[test]
    fn forget_keeps_creation_order_and_is_idempotent() {
        let e = entities(3);
        let mut crafted = CraftedItems::default();
        for (entity, id) in e.iter().zip(["Log", "Axe", "Rope"]) {
            crafted.record(CraftedItemRecord { entity: *entity, id: id.into() });
        }

        assert!(crafted.forget(e[1]).is_some());
        assert!(crafted.forget(e[1]).is_none());
        let ids: Vec<_> = crafted.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["Log", "Rope"]);

        crafted.clear();
        assert_eq!(crafted.len(), 0);
        assert!(crafted.forget(e[0]).is_none());
    }
}
