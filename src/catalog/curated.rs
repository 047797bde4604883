use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use super::filter::FilterCategory;
use crate::data::loader::parse_ron;
use crate::data::schema::{CuratedTable, ItemId};

/// 编进二进制的默认清单，和 assets 里的是同一份文件
const BUILTIN_TABLE: &str = include_str!("../../assets/data/curated.ron");

/// 不能从单个属性推出来的分类的成员清单
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct CuratedSets {
    version: u32,
    lists: HashMap<FilterCategory, Vec<ItemId>>,
    members: HashMap<FilterCategory, HashSet<ItemId>>,
}

impl CuratedSets {
    /// 每个清单内部去重，保留首次出现的顺序
    pub fn new(
        version: u32,
        sets: impl IntoIterator<Item = (FilterCategory, Vec<ItemId>)>,
    ) -> Self {
        let mut lists = HashMap::new();
        let mut members = HashMap::new();
        for (category, ids) in sets {
            let mut seen = HashSet::new();
            let list: Vec<ItemId> = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
            lists.insert(category, list);
            members.insert(category, seen);
        }
        Self {
            version,
            lists,
            members,
        }
    }

    pub fn builtin() -> Self {
        match parse_ron::<CuratedTable>(BUILTIN_TABLE.as_bytes()) {
            Ok(table) => table.into(),
            Err(err) => {
                warn!("内置分类清单解析失败: {err}");
                Self::default()
            }
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn list(&self, category: FilterCategory) -> &[ItemId] {
        self.lists
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, category: FilterCategory, id: &ItemId) -> bool {
        self.members
            .get(&category)
            .is_some_and(|set| set.contains(id))
    }
}

impl From<CuratedTable> for CuratedSets {
    fn from(table: CuratedTable) -> Self {
        Self::new(table.version, table.sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_parses() {
        let sets = CuratedSets::builtin();
        assert!(sets.version() > 0);
        assert!(sets.contains(FilterCategory::Resources, &"Log".into()));
        assert!(sets.contains(FilterCategory::Resources, &"Rope".into()));
        assert!(sets.contains(FilterCategory::Medical, &"Painkillers".into()));
        assert!(sets.contains(FilterCategory::Unique, &"Machete".into()));
        assert!(!sets.contains(FilterCategory::Tools, &"Machete".into()));
        assert!(sets.list(FilterCategory::Medical).len() > 40);
    }

    #[test]
    fn lists_are_deduplicated_in_order() {
        let sets = CuratedSets::new(
            1,
            [(
                FilterCategory::Resources,
                vec!["Stone".into(), "Log".into(), "Stone".into()],
            )],
        );
        assert_eq!(
            sets.list(FilterCategory::Resources),
            &[ItemId::from("Stone"), ItemId::from("Log")]
        );
        assert!(sets.list(FilterCategory::Medical).is_empty());
    }
}
