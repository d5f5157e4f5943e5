//! 路由模块
//!
//! 包含所有路由处理逻辑的模块声明

// 模块声明，不包含业务逻辑
pub mod auth;
pub mod dashboard;
pub mod discover;
pub mod groups;
pub mod members;
pub mod my_groups;
pub mod pages;
pub mod payments;
pub mod static_assets;
