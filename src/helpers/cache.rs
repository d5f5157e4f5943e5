//! 片段缓存模块
//!
//! 缓存默认（无筛选条件）列表片段的渲染结果。种子数据启动后不再
//! 变化，缓存不存在失效一致性问题，TTL 只用来限制内存占用。

use metrics::{gauge, increment_counter};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct CacheEntry {
    html: String,
    expires: Instant,
}

/// 渲染结果缓存
pub struct FragmentCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl FragmentCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    /// 读取缓存片段，过期条目视为未命中
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(_) => return None,
        };
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires => {
                increment_counter!("fragment_cache_hits_total", "key" => key.to_string());
                Some(entry.html.clone())
            }
            Some(_) => {
                increment_counter!("fragment_cache_misses_total", "key" => key.to_string(), "reason" => "expired");
                None
            }
            None => {
                increment_counter!("fragment_cache_misses_total", "key" => key.to_string(), "reason" => "not_found");
                None
            }
        }
    }

    /// 写入缓存片段，顺带清理已过期条目
    pub fn put(&self, key: &str, html: String, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let now = Instant::now();
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|_, entry| now < entry.expires);
            entries.insert(
                key.to_string(),
                CacheEntry {
                    html,
                    expires: now + ttl,
                },
            );
            increment_counter!("fragment_cache_sets_total", "key" => key.to_string());
            gauge!("fragment_cache_size_items", entries.len() as f64);
        }
    }
}

lazy_static::lazy_static! {
    static ref FRAGMENT_CACHE: FragmentCache = FragmentCache::new(Duration::from_secs(300));
}

/// 读取全局片段缓存
pub fn get_cached_fragment(key: &str) -> Option<String> {
    FRAGMENT_CACHE.get(key)
}

/// 写入全局片段缓存
pub fn put_cached_fragment(key: &str, html: String, ttl: Option<Duration>) {
    FRAGMENT_CACHE.put(key, html, ttl);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trip() {
        let cache = FragmentCache::new(Duration::from_secs(60));
        cache.put("groups:default", "<div>grid</div>".to_string(), None);
        assert_eq!(
            cache.get("groups:default").as_deref(),
            Some("<div>grid</div>")
        );
    }

    #[test]
    fn missing_key_is_none() {
        let cache = FragmentCache::new(Duration::from_secs(60));
        assert!(cache.get("missing").is_none());
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let cache = FragmentCache::new(Duration::from_secs(60));
        cache.put("k", "v".to_string(), Some(Duration::from_secs(0)));
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("k").is_none());
    }
}
