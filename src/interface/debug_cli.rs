//! 文字 CLI：读取 stdin → 解析命令 → 驱动面板和制作系统
//!
//! 面板的所有操作都能在终端里完成。

use bevy::app::AppExit;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::catalog::crafted::CraftedItems;
use crate::catalog::curated::CuratedSets;
use crate::catalog::engine::{CatalogFilter, FilterResult};
use crate::catalog::filter::FilterCategory;
use crate::core::{events::LogEvent, states::AppState};
use crate::crafting::components::Permission;
use crate::crafting::events::{
    CraftItemEvent, DestroyRequest, DestroyRequestEvent, DialogAnswerEvent,
    PermissionChangedEvent,
};
use crate::inventory::{components::Backpack, events::ListBackpackEvent};
use crate::panel::components::PanelState;

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

const HELP: &str = r#"命令列表:
  help                   查看帮助
  status                 查看当前状态
  exit / quit            退出程序
  panel                  打开 / 关闭面板
  filters                列出所有分类
  filter <name>          切换分类（认不出的名字当作 All）
  search [keyword]       按关键字筛选（不带参数 = 全部）
  list                   列出当前筛选结果
  select <index>         选中筛选结果中的一项
  craft [count]          制作选中的物品
  give <id> [count]      按 id / 名称直接制作
  info <token>           用 id / uuid / 名称 查询单个物品
  crafted                列出当前筛选下已制作的物品
  destroy                销毁当前筛选下已制作的物品（需确认）
  target <index>         选中一件已制作物品作为销毁目标
  autodestroy on|off     开关销毁目标热键
  backpack [on|off]      查看背包 / 开关"制作后放进背包"
  yes / no               回答确认框
  permit on|off          主机允许 / 禁止多人模式下使用"#;

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if !line.is_empty() {
                        let mut buf = buffer.lock().expect("cli buffer poisoned");
                        buf.push_back(line.to_string());
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands.run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

/// 我们支持的命令
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Panel,
    Filters,
    Filter(String),
    Search(String),
    List,
    Select(usize),
    Craft(u32),
    Give { item: String, count: u32 },
    Info(String),
    Crafted,
    Destroy,
    Target(usize),
    AutoDestroy(bool),
    /// None = 打印背包
    Backpack(Option<bool>),
    Answer(bool),
    Permit(bool),
    Invalid(String),
    Unsupported(String),
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let mut buffer = CLI_BUFFER.lock().expect("cli buffer poisoned");
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    mut panel: ResMut<PanelState>,
    catalog: Res<Catalog>,
    curated: Res<CuratedSets>,
    crafted: Res<CraftedItems>,
    permission: Res<Permission>,
    backpack: Res<Backpack>,
    mut ev_craft: EventWriter<CraftItemEvent>,
    mut ev_destroy: EventWriter<DestroyRequestEvent>,
    mut ev_answer: EventWriter<DialogAnswerEvent>,
    mut ev_permission: EventWriter<PermissionChangedEvent>,
    mut ev_backpack: EventWriter<ListBackpackEvent>,
) {
    let filter = CatalogFilter::new(&catalog, &curated);

    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                log.write(LogEvent(HELP.into()));
            }

            Command::Status => {
                log.write(LogEvent(format!(
                    "Items: {} | curated v{} ({} resources, {} unique, {} medical) | crafted: {} | filter: {} | panel: {} | permission: {}",
                    catalog.len(),
                    curated.version(),
                    curated.list(FilterCategory::Resources).len(),
                    curated.list(FilterCategory::Unique).len(),
                    curated.list(FilterCategory::Medical).len(),
                    crafted.len(),
                    panel.filter,
                    if panel.visible { "open" } else { "closed" },
                    if permission.is_active() { "granted" } else { "revoked" },
                )));
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Success);
            }

            Command::Panel => {
                if !panel.toggle() {
                    log.write(LogEvent("ModCrafting panel closed".into()));
                }
            }

            Command::Filters => {
                let names: Vec<&str> = FilterCategory::CATEGORIES
                    .iter()
                    .map(|c| c.name())
                    .collect();
                log.write(LogEvent(format!("Filters: {}", names.join(", "))));
            }

            Command::Filter(name) => {
                let category = FilterCategory::parse(&name);
                if !category.name().eq_ignore_ascii_case(&name) {
                    log.write(LogEvent(format!("未知分类 {name}，使用 All")));
                }
                panel.set_filter(category);
                log.write(LogEvent(format!("Filter: {category}")));
            }

            Command::Search(keyword) => {
                panel.search(&keyword);
                let hits = filter.filter_catalog(FilterCategory::Keyword, &keyword).len();
                log.write(LogEvent(format!("Keyword \"{}\": {hits} items", keyword.trim())));
            }

            Command::List => {
                let result = filter.filter_catalog(panel.filter, &panel.keyword);
                if result.is_empty() {
                    log.write(LogEvent("  (empty)".into()));
                }
                for (index, name) in result.names().enumerate() {
                    let marker = if index == panel.selected { '>' } else { ' ' };
                    log.write(LogEvent(format!("{marker}[{index}] {name}")));
                }
            }

            Command::Select(index) => {
                let result = filter.filter_catalog(panel.filter, &panel.keyword);
                match result.get(index) {
                    Some(entry) => {
                        panel.selected = index;
                        log.write(LogEvent(format!("Selected: {}", entry.name)));
                    }
                    None => {
                        log.write(LogEvent(format!("下标超出范围 (0..{})", result.len())));
                    }
                }
            }

            Command::Craft(count) => {
                let result = filter.filter_catalog(panel.filter, &panel.keyword);
                match result.get(panel.selected) {
                    Some(entry) => {
                        ev_craft.write(CraftItemEvent {
                            item: entry.id.to_string(),
                            count,
                            to_backpack: panel.add_to_backpack,
                        });
                    }
                    None => {
                        log.write(LogEvent("Item could not be crafted: nothing selected".into()));
                    }
                }
            }

            Command::Give { item, count } => {
                ev_craft.write(CraftItemEvent {
                    item,
                    count,
                    to_backpack: panel.add_to_backpack,
                });
            }

            Command::Info(token) => {
                let found = catalog.find(&token).or_else(|| {
                    catalog
                        .definitions()
                        .find(|d| uuid_from_id(d.id.as_str()).to_string() == token.to_lowercase())
                });
                match found {
                    Some(item) => {
                        let groups: Vec<&str> = FilterCategory::CATEGORIES
                            .iter()
                            .filter(|c| {
                                !matches!(c, FilterCategory::Keyword | FilterCategory::All)
                                    && filter.matches(item, **c, "")
                            })
                            .map(|c| c.name())
                            .collect();
                        log.write(LogEvent(format!(
                            "==================================================
UUID    : {}
ID      : {}
Name    : {}
Filters : {}
Backpack: {}
==================================================",
                            uuid_from_id(item.id.as_str()),
                            item.id,
                            item.localized_name(),
                            if groups.is_empty() { "-".to_string() } else { groups.join(", ") },
                            backpack.count(&item.id),
                        )));
                    }
                    None => {
                        log.write(LogEvent("未找到匹配物品".into()));
                    }
                }
            }

            Command::Crafted => {
                let hits = filter.filter_crafted(&crafted, panel.filter, &panel.keyword);
                if hits.is_empty() {
                    log.write(LogEvent("  (empty)".into()));
                }
                for record in &hits {
                    // 显示在 CraftedItems 里的下标，target 命令用的就是它
                    let index = crafted
                        .records()
                        .iter()
                        .position(|r| r.entity == record.entity)
                        .unwrap_or_default();
                    log.write(LogEvent(format!(
                        "[{index}] {} ({})",
                        record.id.display_name(),
                        record.entity
                    )));
                }
                let kinds = FilterResult::from_records(&hits);
                log.write(LogEvent(format!(
                    "{} crafted item(s) of {} kind(s) under {}",
                    hits.len(),
                    kinds.len(),
                    panel.filter
                )));
            }

            Command::Destroy => {
                ev_destroy.write(DestroyRequestEvent(DestroyRequest::Filtered));
            }

            Command::Target(index) => match crafted.get(index) {
                Some(record) => {
                    panel.target = Some(index);
                    log.write(LogEvent(format!("Target: {}", record.id.display_name())));
                }
                None => {
                    log.write(LogEvent(format!("下标超出范围 (0..{})", crafted.len())));
                }
            },

            Command::AutoDestroy(enabled) => {
                panel.destroy_target_enabled = enabled;
                log.write(LogEvent(format!(
                    "Destroy target has been {}",
                    if enabled { "enabled" } else { "disabled" }
                )));
            }

            Command::Backpack(Some(enabled)) => {
                panel.add_to_backpack = enabled;
                log.write(LogEvent(format!(
                    "Add to backpack has been {}",
                    if enabled { "enabled" } else { "disabled" }
                )));
            }

            Command::Backpack(None) => {
                ev_backpack.write(ListBackpackEvent);
            }

            Command::Answer(yes) => {
                ev_answer.write(DialogAnswerEvent(yes));
            }

            Command::Permit(allowed) => {
                ev_permission.write(PermissionChangedEvent(allowed));
            }

            Command::Invalid(usage) => {
                log.write(LogEvent(format!("用法: {usage}")));
            }

            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "panel" | "p" => Command::Panel,
        "filters" => Command::Filters,
        "filter" | "f" => match parts.next() {
            Some(name) => Command::Filter(name.to_string()),
            None => Command::Invalid("filter <name>".into()),
        },
        // 关键字可以带空格
        "search" | "find" => Command::Search(parts.collect::<Vec<_>>().join(" ")),
        "list" | "ls" | "l" => Command::List,
        "select" | "sel" => match parts.next().and_then(|s| s.parse().ok()) {
            Some(index) => Command::Select(index),
            None => Command::Invalid("select <index>".into()),
        },
        "craft" | "c" => Command::Craft(parse_count(parts.next())),
        "give" => match parts.next() {
            Some(item) => Command::Give {
                item: item.to_string(),
                count: parse_count(parts.next()),
            },
            None => Command::Invalid("give <id> [count]".into()),
        },
        "info" | "items" | "item" | "i" => match parts.next() {
            Some(token) => Command::Info(token.to_string()),
            None => Command::Invalid("info <token>".into()),
        },
        "crafted" => Command::Crafted,
        "destroy" | "d" => Command::Destroy,
        "target" | "t" => match parts.next().and_then(|s| s.parse().ok()) {
            Some(index) => Command::Target(index),
            None => Command::Invalid("target <index>".into()),
        },
        "autodestroy" => match parse_switch(parts.next()) {
            Some(enabled) => Command::AutoDestroy(enabled),
            None => Command::Invalid("autodestroy on|off".into()),
        },
        "backpack" | "bag" => match parts.next() {
            None => Command::Backpack(None),
            Some(token) => match parse_switch(Some(token)) {
                Some(enabled) => Command::Backpack(Some(enabled)),
                None => Command::Invalid("backpack [on|off]".into()),
            },
        },
        "yes" | "y" => Command::Answer(true),
        "no" | "n" => Command::Answer(false),
        "permit" => match parse_switch(parts.next()) {
            Some(allowed) => Command::Permit(allowed),
            None => Command::Invalid("permit on|off".into()),
        },
        other => Command::Unsupported(other.into()),
    }
}

/// 解析不了就按 1 个
fn parse_count(token: Option<&str>) -> u32 {
    token.and_then(|s| s.parse().ok()).unwrap_or(1)
}

fn parse_switch(token: Option<&str>) -> Option<bool> {
    match token?.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn uuid_from_id(id: &str) -> Uuid {
    // 用固定 namespace + id 字节生成版本 5 UUID，保证可重复得到同一值
    Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_and_search() {
        assert_eq!(parse_command("filter tools"), Command::Filter("tools".into()));
        assert_eq!(parse_command("FILTER"), Command::Invalid("filter <name>".into()));
        assert_eq!(
            parse_command("search  bamboo   stick "),
            Command::Search("bamboo stick".into())
        );
        assert_eq!(parse_command("search"), Command::Search(String::new()));
    }

    #[test]
    fn counts_fall_back_to_one() {
        assert_eq!(parse_command("craft"), Command::Craft(1));
        assert_eq!(parse_command("craft 5"), Command::Craft(5));
        assert_eq!(parse_command("craft lots"), Command::Craft(1));
        assert_eq!(
            parse_command("give Log -3"),
            Command::Give { item: "Log".into(), count: 1 }
        );
    }

    #[test]
    fn parses_destroy_flow() {
        assert_eq!(parse_command("destroy"), Command::Destroy);
        assert_eq!(parse_command("target 2"), Command::Target(2));
        assert_eq!(parse_command("autodestroy ON"), Command::AutoDestroy(true));
        assert_eq!(parse_command("autodestroy maybe"), Command::Invalid("autodestroy on|off".into()));
        assert_eq!(parse_command("y"), Command::Answer(true));
        assert_eq!(parse_command("no"), Command::Answer(false));
        assert_eq!(parse_command("permit off"), Command::Permit(false));
    }

    #[test]
    fn parses_backpack_switch_and_listing() {
        assert_eq!(parse_command("backpack"), Command::Backpack(None));
        assert_eq!(parse_command("bag off"), Command::Backpack(Some(false)));
        assert_eq!(parse_command("backpack ON"), Command::Backpack(Some(true)));
        assert_eq!(
            parse_command("backpack full"),
            Command::Invalid("backpack [on|off]".into())
        );
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(parse_command("fly"), Command::Unsupported("fly".into()));
    }

    #[test]
    fn uuid_is_stable_per_id() {
        assert_eq!(uuid_from_id("Log"), uuid_from_id("Log"));
        assert_ne!(uuid_from_id("Log"), uuid_from_id("log"));
    }
}
