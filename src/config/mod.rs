//! 配置管理
//!
//! 配置来源按优先级从低到高：结构体默认值、`config.toml`、
//! `config.<APP_ENV>.toml`、`UPLOAD_STATION_` 前缀环境变量、常用环境变量直接覆盖。

mod r#impl;
mod structs;

pub use structs::*;
