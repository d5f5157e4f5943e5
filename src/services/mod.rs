//! 后台服务模块

pub mod warmup;
