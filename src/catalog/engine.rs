//! 目录筛选：同一个判定函数同时服务于"制作列表"和"按筛选销毁"，
//! 保证两边看到的是同一批物品。

use std::collections::HashSet;

use super::Catalog;
use super::crafted::{CraftedItemRecord, CraftedItems};
use super::curated::CuratedSets;
use super::filter::FilterCategory;
use crate::data::schema::{ItemDefinition, ItemId};

/// 结果里的一行：物品 id + 规范化显示名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    pub id: ItemId,
    pub name: String,
}

/// 按显示名（大小写不敏感）排好序的筛选结果，同一 id 只出现一次
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    entries: Vec<FilterEntry>,
}

impl FilterResult {
    fn from_ids<'a>(ids: impl IntoIterator<Item = &'a ItemId>) -> Self {
        let mut seen = HashSet::new();
        let mut entries: Vec<FilterEntry> = ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .map(|id| FilterEntry {
                id: id.clone(),
                name: id.display_name(),
            })
            .collect();
        entries.sort_by_cached_key(|e| (e.name.to_lowercase(), e.id.clone()));
        Self { entries }
    }

    /// 已制作物品里出现过的物品种类
    pub fn from_records(records: &[CraftedItemRecord]) -> Self {
        Self::from_ids(records.iter().map(|r| &r.id))
    }

    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FilterEntry> {
        self.entries.get(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 预处理过的筛选条件
struct Criteria {
    category: FilterCategory,
    needle: String,
}

impl Criteria {
    fn new(category: FilterCategory, keyword: &str) -> Self {
        Self {
            category,
            needle: keyword.trim().to_lowercase(),
        }
    }
}

/// 无状态的筛选器，借用目录和手工清单
#[derive(Clone, Copy)]
pub struct CatalogFilter<'a> {
    catalog: &'a Catalog,
    curated: &'a CuratedSets,
}

impl<'a> CatalogFilter<'a> {
    pub fn new(catalog: &'a Catalog, curated: &'a CuratedSets) -> Self {
        Self { catalog, curated }
    }

    pub fn matches(&self, item: &ItemDefinition, category: FilterCategory, keyword: &str) -> bool {
        self.matches_criteria(item, &Criteria::new(category, keyword))
    }

    fn matches_criteria(&self, item: &ItemDefinition, criteria: &Criteria) -> bool {
        match criteria.category {
            FilterCategory::All => true,
            FilterCategory::Keyword => keyword_matches(item, &criteria.needle),
            FilterCategory::Food => item.seed || item.meat || item.food || item.consumable,
            FilterCategory::Construction => item.construction,
            FilterCategory::Tools => item.tool,
            FilterCategory::Weapons => item.weapon,
            FilterCategory::Armor => item.armor,
            FilterCategory::Resources | FilterCategory::Medical => {
                self.curated.contains(criteria.category, &item.id)
            }
            FilterCategory::Unique => {
                item.quest
                    || item.readable
                    || self.curated.contains(FilterCategory::Unique, &item.id)
            }
        }
    }

    /// 对整个目录筛选；清单里有但目录里没有的 id 自然被跳过
    pub fn filter_catalog(&self, category: FilterCategory, keyword: &str) -> FilterResult {
        let criteria = Criteria::new(category, keyword);
        FilterResult::from_ids(
            self.catalog
                .definitions()
                .filter(|item| self.matches_criteria(item, &criteria))
                .map(|item| &item.id),
        )
    }

    /// 对已制作物品筛选，按生成顺序返回命中的记录。
    /// 目录里查不到定义的记录只在 All 下命中。
    pub fn filter_crafted(
        &self,
        crafted: &CraftedItems,
        category: FilterCategory,
        keyword: &str,
    ) -> Vec<CraftedItemRecord> {
        let criteria = Criteria::new(category, keyword);
        crafted
            .records()
            .iter()
            .filter(|record| match self.catalog.get(&record.id) {
                Some(item) => self.matches_criteria(item, &criteria),
                None => category == FilterCategory::All,
            })
            .cloned()
            .collect()
    }
}

/// 空关键字匹配一切
fn keyword_matches(item: &ItemDefinition, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    item.display_name().to_lowercase().contains(needle)
        || item.id.as_str().to_lowercase().contains(needle)
        || item
            .name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(needle))
}
