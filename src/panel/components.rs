use bevy::prelude::*;

use crate::catalog::filter::FilterCategory;

/// 面板的全部界面状态
#[derive(Resource, Debug)]
pub struct PanelState {
    pub visible: bool,
    pub filter: FilterCategory,
    /// 只在 Keyword 分类下生效
    pub keyword: String,
    /// 当前筛选结果里的下标
    pub selected: usize,
    /// CraftedItems 里的下标
    pub target: Option<usize>,
    pub destroy_target_enabled: bool,
    /// 制作的物品放进背包（建筑除外）
    pub add_to_backpack: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            visible: false,
            filter: FilterCategory::default(),
            keyword: String::new(),
            selected: 0,
            target: None,
            destroy_target_enabled: false,
            add_to_backpack: true,
        }
    }
}

impl PanelState {
    pub fn set_filter(&mut self, filter: FilterCategory) {
        self.filter = filter;
        self.selected = 0;
    }

    pub fn search(&mut self, keyword: &str) {
        self.keyword = keyword.trim().to_string();
        self.set_filter(FilterCategory::Keyword);
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}
