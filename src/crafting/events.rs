use bevy::prelude::*;

/// 制作物品；item 可以是 id、显示名或本地化名
#[derive(Event, Debug, Clone)]
pub struct CraftItemEvent {
    pub item: String,
    pub count: u32,
    /// 放进背包而不是世界里；建筑忽略这一项
    pub to_backpack: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyRequest {
    /// 当前筛选下所有已制作物品
    Filtered,
    /// 面板上选中的那一件
    Target,
}

/// 先弹确认，玩家回答 yes 才真正销毁
#[derive(Event, Debug, Clone, Copy)]
pub struct DestroyRequestEvent(pub DestroyRequest);

/// 确认框的回答：true = yes
#[derive(Event, Debug, Clone, Copy)]
pub struct DialogAnswerEvent(pub bool);

/// 主机修改了多人模式下的权限
#[derive(Event, Debug, Clone, Copy)]
pub struct PermissionChangedEvent(pub bool);
