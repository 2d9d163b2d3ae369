use crate::constants::cache::SCORE_TABLE_CAPACITY;
use crate::data_fetcher::models::ScoreTable;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// LRU of score tables keyed by match id. Only tables that can no longer change
/// (finished matches) belong here, so entries never expire.
#[derive(Clone)]
pub struct ScoreCache {
    inner: Arc<RwLock<LruCache<String, ScoreTable>>>,
}

impl ScoreCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    pub async fn get(&self, match_id: &str) -> Option<ScoreTable> {
        let mut cache = self.inner.write().await;
        let hit = cache.get(match_id).cloned();
        debug!(
            "Score cache {} for match {}",
            if hit.is_some() { "hit" } else { "miss" },
            match_id
        );
        hit
    }

    pub async fn put(&self, match_id: String, table: ScoreTable) {
        let mut cache = self.inner.write().await;
        debug!(
            "Caching score table for match {} ({} rows)",
            match_id,
            table.rows.len()
        );
        cache.put(match_id, table);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new(SCORE_TABLE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(label: &str) -> ScoreTable {
        ScoreTable {
            header: vec![label.to_string()],
            rows: vec![],
        }
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let cache = ScoreCache::default();
        assert!(cache.is_empty().await);

        cache.put("A".to_string(), table("A")).await;

        assert_eq!(cache.get("A").await, Some(table("A")));
        assert_eq!(cache.get("B").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_evicts_least_recently_used() {
        let cache = ScoreCache::new(2);
        cache.put("A".to_string(), table("A")).await;
        cache.put("B".to_string(), table("B")).await;
        cache.get("A").await;
        cache.put("C".to_string(), table("C")).await;

        assert!(cache.get("A").await.is_some());
        assert!(cache.get("B").await.is_none());
        assert!(cache.get("C").await.is_some());
    }

    #[tokio::test]
    async fn test_zero_capacity_falls_back_to_one() {
        let cache = ScoreCache::new(0);
        cache.put("A".to_string(), table("A")).await;
        cache.put("B".to_string(), table("B")).await;
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = ScoreCache::default();
        cache.put("A".to_string(), table("A")).await;
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
