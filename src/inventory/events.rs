use bevy::prelude::*;

/// 让 CLI 请求打印背包
#[derive(Event)]
pub struct ListBackpackEvent;
