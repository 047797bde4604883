use bevy::prelude::*;

use crate::catalog::crafted::CraftedItemRecord;
use crate::catalog::filter::FilterCategory;
use crate::data::schema::ItemId;

/// 挂在由本 mod 生成的实体上
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct CraftedItem {
    pub id: ItemId,
}

/// 已制作实体放在了背包里
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InBackpack;

/// 单机 / 主机，或者主机在多人模式下放行
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permission {
    pub host: bool,
    pub multiplayer_allowed: bool,
}

impl Permission {
    pub fn is_active(&self) -> bool {
        self.host || self.multiplayer_allowed
    }
}

/// 等待玩家确认的销毁操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDestroy {
    /// 发起时的筛选条件快照
    Filtered {
        category: FilterCategory,
        keyword: String,
    },
    Target(CraftedItemRecord),
}

impl PendingDestroy {
    /// 提示框里显示的对象
    pub fn describe(&self) -> String {
        match self {
            PendingDestroy::Filtered {
                category: FilterCategory::Keyword,
                keyword,
            } => format!("crafted items matching \"{}\"", keyword.trim()),
            PendingDestroy::Filtered { category, .. } => {
                format!("{} crafted using this mod", category.name().to_lowercase())
            }
            PendingDestroy::Target(record) => record.id.display_name(),
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct PendingConfirmation(pub Option<PendingDestroy>);
