//! Canvas-Lite - 轻量级课程管理后端服务
//!
//! 基于 Actix Web 构建，课程、模块、作业与提交的访问控制统一由 `policy` 模块判定。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证与角色中间件
//! - `models`: 数据模型定义
//! - `policy`: 访问策略（纯规则 + 事实查询）
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod policy;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
