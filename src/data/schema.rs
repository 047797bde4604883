use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::catalog::filter::FilterCategory;

/// 物品种类的唯一标识，取值以目录资产为准
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 规范化显示名：下划线换成空格
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// 目录里的一条物品定义（只读）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    /// 本地化名称，没有就用规范化 id
    #[serde(default)] pub name: Option<String>,
    #[serde(default)] pub seed: bool,
    #[serde(default)] pub meat: bool,
    #[serde(default)] pub food: bool,
    #[serde(default)] pub consumable: bool,
    #[serde(default)] pub construction: bool,
    #[serde(default)] pub tool: bool,
    #[serde(default)] pub weapon: bool,
    #[serde(default)] pub armor: bool,
    #[serde(default)] pub quest: bool,
    #[serde(default)] pub readable: bool,
}

impl ItemDefinition {
    /// 所有分类属性都为 false 的定义
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            seed: false,
            meat: false,
            food: false,
            consumable: false,
            construction: false,
            tool: false,
            weapon: false,
            armor: false,
            quest: false,
            readable: false,
        }
    }

    pub fn display_name(&self) -> String {
        self.id.display_name()
    }

    pub fn localized_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.display_name())
    }
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemList {
    pub items: Vec<ItemDefinition>,
}

/// 手工维护的分类清单（Resources / Unique / Medical），带版本号
#[derive(Asset, TypePath, Deserialize, Debug, Default)]
pub struct CuratedTable {
    #[serde(default)]
    pub version: u32,
    pub sets: HashMap<FilterCategory, Vec<ItemId>>,
}
