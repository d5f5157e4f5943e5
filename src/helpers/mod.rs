//! 公共辅助模块
//!
//! 各页面共用的筛选、聚合、格式化、分页与缓存逻辑。

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod format;
pub mod monitoring;
pub mod pagination;
