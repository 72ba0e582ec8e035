//! Upload Station - 文件上传与下载服务
//!
//! 基于 Actix Web 构建，上传记录存放在 SeaORM 管理的数据库中，文件内容存放在本地目录。
//!
//! # 架构
//! - `app`: HTTP 应用组装
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 请求日志与错误渲染中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）

pub mod app;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
