use serde::{Deserialize, Serialize};
use std::fmt;

/// 面板上的筛选分类，同一时刻只有一个处于选中状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterCategory {
    Keyword,
    #[default]
    All,
    Resources,
    Food,
    Construction,
    Tools,
    Weapons,
    Armor,
    Unique,
    Medical,
}

impl FilterCategory {
    /// 面板上的展示顺序
    pub const CATEGORIES: [FilterCategory; 10] = [
        FilterCategory::Keyword,
        FilterCategory::All,
        FilterCategory::Resources,
        FilterCategory::Food,
        FilterCategory::Construction,
        FilterCategory::Tools,
        FilterCategory::Weapons,
        FilterCategory::Armor,
        FilterCategory::Unique,
        FilterCategory::Medical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterCategory::Keyword => "Keyword",
            FilterCategory::All => "All",
            FilterCategory::Resources => "Resources",
            FilterCategory::Food => "Food",
            FilterCategory::Construction => "Construction",
            FilterCategory::Tools => "Tools",
            FilterCategory::Weapons => "Weapons",
            FilterCategory::Armor => "Armor",
            FilterCategory::Unique => "Unique",
            FilterCategory::Medical => "Medical",
        }
    }

    /// 大小写不敏感；认不出返回 None
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::CATEGORIES
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// 认不出的名字一律当作 All
    pub fn parse(name: &str) -> Self {
        Self::from_name(name).unwrap_or(FilterCategory::All)
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
