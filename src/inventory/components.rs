use bevy::prelude::*;

use crate::data::schema::ItemId;

/// 背包格数
pub const BACKPACK_CAPACITY: usize = 30;

/// 同一种物品堆在一格里
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub id: ItemId,
    /// 这一格里的已制作实体，按放入顺序
    pub entities: Vec<Entity>,
}

impl ItemStack {
    pub fn count(&self) -> usize {
        self.entities.len()
    }
}

/// 玩家背包（挂在 Resource）
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Backpack {
    pub stacks: Vec<ItemStack>,
    pub capacity: usize,
}

impl Default for Backpack {
    fn default() -> Self {
        Self::with_capacity(BACKPACK_CAPACITY)
    }
}

impl Backpack {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stacks: Vec::new(),
            capacity,
        }
    }

    /// 有同 ID 堆叠就叠上去，否则占一个空格；背包满了返回 false
    pub fn store(&mut self, id: &ItemId, entity: Entity) -> bool {
        if let Some(stack) = self.stacks.iter_mut().find(|s| &s.id == id) {
            stack.entities.push(entity);
            return true;
        }
        if self.stacks.len() >= self.capacity {
            return false;
        }
        self.stacks.push(ItemStack {
            id: id.clone(),
            entities: vec![entity],
        });
        true
    }

    /// 取出实体；空掉的格子直接移除。不在背包里返回 false
    pub fn take(&mut self, entity: Entity) -> bool {
        let Some(index) = self
            .stacks
            .iter()
            .position(|s| s.entities.contains(&entity))
        else {
            return false;
        };
        let stack = &mut self.stacks[index];
        stack.entities.retain(|e| *e != entity);
        if stack.entities.is_empty() {
            self.stacks.remove(index);
        }
        true
    }

    pub fn count(&self, id: &ItemId) -> usize {
        self.stacks
            .iter()
            .find(|s| &s.id == id)
            .map_or(0, ItemStack::count)
    }
}
