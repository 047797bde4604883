use anyhow::Context;
use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::keys::parse_key_code;

/// 相对于工作目录的配置文件位置
pub const CONFIG_PATH: &str = "config/mod_crafting.toml";

pub const DEFAULT_TOGGLE_KEY: KeyCode = KeyCode::Numpad9;
pub const DEFAULT_DESTROY_KEY: KeyCode = KeyCode::NumpadSubtract;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("`data.{0}` must not be empty")]
    EmptyPath(&'static str),
}

/// 整个 mod 的配置（config/mod_crafting.toml），缺的字段全部走默认值
#[derive(Resource, Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModConfig {
    pub keybindings: KeyBindings,
    pub data: DataPaths,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyBindings {
    pub toggle_panel: String,
    pub destroy_target: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_panel: "Numpad9".into(),
            destroy_target: "NumpadSubtract".into(),
        }
    }
}

/// 资产路径，相对 assets/
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataPaths {
    pub items: String,
    pub curated: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            items: "data/items.ron".into(),
            curated: "data/curated.ron".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// 单机或主机
    pub host: bool,
    /// 主机是否允许多人模式下使用
    pub multiplayer_allowed: bool,
    pub show_window: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: true,
            multiplayer_allowed: false,
            show_window: false,
        }
    }
}

impl ModConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ModConfig = toml::from_str(text)?;
        if config.data.items.trim().is_empty() {
            return Err(ConfigError::EmptyPath("items"));
        }
        if config.data.curated.trim().is_empty() {
            return Err(ConfigError::EmptyPath("curated"));
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// 文件不存在 / 读取或解析失败 → 默认值并带回错误，由调用方记日志
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<anyhow::Error>) {
        let path = path.as_ref();
        if !path.exists() {
            let err = anyhow::anyhow!("{} not found", path.display());
            return (Self::default(), Some(err));
        }
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }
}

/// 解析好的热键
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotKeys {
    pub toggle_panel: KeyCode,
    pub destroy_target: KeyCode,
}

impl Default for HotKeys {
    fn default() -> Self {
        Self {
            toggle_panel: DEFAULT_TOGGLE_KEY,
            destroy_target: DEFAULT_DESTROY_KEY,
        }
    }
}

impl HotKeys {
    /// 认不出的按键名退回到该项的默认键
    pub fn from_bindings(bindings: &KeyBindings) -> Self {
        Self {
            toggle_panel: resolve_key("toggle_panel", &bindings.toggle_panel, DEFAULT_TOGGLE_KEY),
            destroy_target: resolve_key(
                "destroy_target",
                &bindings.destroy_target,
                DEFAULT_DESTROY_KEY,
            ),
        }
    }
}

fn resolve_key(field: &str, name: &str, fallback: KeyCode) -> KeyCode {
    parse_key_code(name).unwrap_or_else(|| {
        warn!("未知按键 `{name}` (keybindings.{field})，使用默认 {fallback:?}");
        fallback
    })
}
