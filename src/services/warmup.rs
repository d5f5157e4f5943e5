//! 片段预热服务
//!
//! 启动时把各列表页的默认片段渲染进缓存，首个请求不必现场渲染。

use std::time::Duration;
use tracing::{info, warn};

use crate::helpers::cache::put_cached_fragment;
use crate::routes::discover::{self, CACHE_KEY_DISCOVER_DEFAULT};
use crate::routes::groups::{self, CACHE_KEY_GROUPS_DEFAULT};
use crate::routes::members::{self, CACHE_KEY_MEMBERS_DEFAULT};
use crate::store::DataStore;

/// 预热全部默认片段，返回成功预热的数量
pub fn warmup_default_fragments(store: &DataStore) -> usize {
    info!("开始片段预热...");

    let jobs: [(&str, Result<String, askama::Error>); 3] = [
        (CACHE_KEY_GROUPS_DEFAULT, groups::render_default_fragment(store)),
        (CACHE_KEY_MEMBERS_DEFAULT, members::render_default_fragment(store)),
        (CACHE_KEY_DISCOVER_DEFAULT, discover::render_default_fragment(store)),
    ];

    let mut warmed = 0;
    for (key, result) in jobs {
        match result {
            Ok(html) => {
                put_cached_fragment(key, html, Some(Duration::from_secs(900)));
                warmed += 1;
            }
            Err(e) => {
                warn!("片段预热失败: key={}, 错误={}", key, e);
            }
        }
    }

    info!("片段预热完成: 成功 {}/{}", warmed, 3);
    warmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::cache::get_cached_fragment;
    use chrono::Utc;

    #[test]
    fn warms_all_default_fragments() {
        let store = DataStore::seed(Utc::now());
        assert_eq!(warmup_default_fragments(&store), 3);
        assert!(get_cached_fragment(CACHE_KEY_GROUPS_DEFAULT).is_some());
        assert!(get_cached_fragment(CACHE_KEY_MEMBERS_DEFAULT).is_some());
        assert!(get_cached_fragment(CACHE_KEY_DISCOVER_DEFAULT).is_some());
    }
}
