//! Student Dashboard - 学生表现看板后端服务
//!
//! 基于 Actix Web 构建，聚合学生成绩、考勤与课外活动数据。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis），缓存看板聚合结果
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（CRUD、导入导出、看板统计）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
