//! Time-bounded read cache in front of catalogs.
//!
//! Population is last-write-wins and entries may be up to one TTL stale.
//! Readers never wait on each other: entries live in a sharded `DashMap`.
//! Expired entries are dropped when read, and swept from the whole map at
//! most once per TTL when new entries are stored.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::CatalogError;
use crate::pricing::adjustment::AdjustmentContext;
use crate::pricing::catalog::{Catalog, CatalogFilter, Priced};
use crate::pricing::item::PricedItem;

/// Default time-to-live for cached query results.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Key-value cache with expiry.
pub trait QueryCache<V>: Send + Sync {
    /// Fresh value for `key`, if any. Expired entries are dropped.
    fn get(&self, key: &str) -> Option<V>;

    fn set(&self, key: String, value: V);

    fn invalidate(&self, key: &str);

    fn clear(&self);
}

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// `DashMap`-backed cache with a single TTL for all entries.
pub struct TtlCache<V> {
    entries: DashMap<String, Entry<V>>,
    ttl: Duration,
    last_sweep: Mutex<Instant>,
}

impl<V: Clone + Send + Sync> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries. Expired ones count until they are read or
    /// swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| e.stored_at.elapsed() < self.ttl);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::debug!(removed, "Swept expired cache entries");
        }
        removed
    }

    /// Sweep if a TTL has passed since the last sweep.
    fn maybe_sweep(&self) {
        {
            let mut last = self.last_sweep.lock().unwrap_or_else(|p| p.into_inner());
            if last.elapsed() < self.ttl {
                return;
            }
            *last = Instant::now();
        }
        self.purge_expired();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone + Send + Sync> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<V: Clone + Send + Sync> QueryCache<V> for TtlCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        {
            let entry = self.entries.get(key)?;
            if entry.stored_at.elapsed() < self.ttl {
                return Some(entry.value.clone());
            }
        }
        // Shard read guard is released above; re-check under the write lock.
        self.entries
            .remove_if(key, |_, e| e.stored_at.elapsed() >= self.ttl);
        None
    }

    fn set(&self, key: String, value: V) {
        self.maybe_sweep();
        self.entries.insert(
            key,
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }

    fn clear(&self) {
        self.entries.clear();
    }
}

/// Catalog decorator that serves repeated queries from a [`QueryCache`].
///
/// Entries are keyed by filter, location and season. Market windows are
/// evaluated at population time, which the TTL bounds. Errors pass through
/// uncached.
pub struct CachedCatalog<T: PricedItem> {
    inner: Arc<dyn Catalog<T>>,
    cache: Arc<dyn QueryCache<Vec<Priced<T>>>>,
}

impl<T: PricedItem> CachedCatalog<T> {
    pub fn new(inner: Arc<dyn Catalog<T>>, cache: Arc<dyn QueryCache<Vec<Priced<T>>>>) -> Self {
        Self { inner, cache }
    }

    /// Wrap with a fresh [`TtlCache`].
    pub fn with_ttl(inner: Arc<dyn Catalog<T>>, ttl: Duration) -> Self {
        Self::new(inner, Arc::new(TtlCache::new(ttl)))
    }

    pub fn cache(&self) -> &Arc<dyn QueryCache<Vec<Priced<T>>>> {
        &self.cache
    }

    fn key(filter: &CatalogFilter, ctx: &AdjustmentContext) -> String {
        format!(
            "{}|loc={}|season={}",
            filter.cache_key(),
            ctx.location.as_deref().unwrap_or("").trim().to_lowercase(),
            ctx.season.map(|s| s.as_str()).unwrap_or(""),
        )
    }
}

#[async_trait]
impl<T: PricedItem> Catalog<T> for CachedCatalog<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn query(
        &self,
        filter: &CatalogFilter,
        ctx: &AdjustmentContext,
    ) -> Result<Vec<Priced<T>>, CatalogError> {
        let key = Self::key(filter, ctx);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(catalog = self.inner.name(), %key, "Catalog cache hit");
            return Ok(hit);
        }

        tracing::debug!(catalog = self.inner.name(), %key, "Catalog cache miss");
        let results = self.inner.query(filter, ctx).await?;
        self.cache.set(key, results.clone());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    use crate::pricing::catalog::InMemoryCatalog;
    use crate::pricing::item::ToolItem;

    #[test]
    fn test_ttl_expiry() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_millis(20));
        cache.set("a".to_string(), 1);
        assert_eq!(cache.get("a"), Some(1));

        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(cache.get("a"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_sweeps_stale_keys() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_millis(1));
        for i in 0..1000 {
            cache.set(format!("key-{i}"), i);
        }
        std::thread::sleep(Duration::from_millis(10));

        cache.set("fresh".to_string(), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_purge_keeps_live_entries() {
        let cache: TtlCache<u32> = TtlCache::default();
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);
        assert_eq!(cache.purge_expired(), 0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_last_write_wins_and_invalidate() {
        let cache: TtlCache<&str> = TtlCache::default();
        cache.set("k".to_string(), "first");
        cache.set("k".to_string(), "second");
        assert_eq!(cache.get("k"), Some("second"));

        cache.invalidate("k");
        assert_eq!(cache.get("k"), None);

        cache.set("x".to_string(), "x");
        cache.set("y".to_string(), "y");
        cache.clear();
        assert!(cache.is_empty());
    }

    struct CountingCatalog {
        inner: InMemoryCatalog<ToolItem>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Catalog<ToolItem> for CountingCatalog {
        fn name(&self) -> &str {
            "tool_rentals"
        }

        async fn query(
            &self,
            filter: &CatalogFilter,
            ctx: &AdjustmentContext,
        ) -> Result<Vec<Priced<ToolItem>>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.query(filter, ctx).await
        }
    }

    #[tokio::test]
    async fn test_cached_catalog_reuses_results() {
        let mixer = ToolItem {
            id: "mixer".to_string(),
            name: "Cement mixer".to_string(),
            category: "concrete".to_string(),
            daily_rate: dec!(30),
            weekly_rate: Some(dec!(80)),
            weekend_rate: None,
            monthly_rate: None,
            deposit: dec!(50),
            min_hire_days: 1,
            license_required: false,
            training_required: false,
            project_types: vec!["patio".to_string()],
            adjustments: vec![],
        };
        let counting = Arc::new(CountingCatalog {
            inner: InMemoryCatalog::new("tool_rentals", vec![mixer]).unwrap(),
            calls: AtomicUsize::new(0),
        });
        let inner: Arc<dyn Catalog<ToolItem>> = counting.clone();
        let cached = CachedCatalog::with_ttl(inner, DEFAULT_TTL);

        let ctx = AdjustmentContext::new(Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap());
        let filter = CatalogFilter::text("patio");

        let first = cached.query(&filter, &ctx).await.unwrap();
        let second = cached.query(&filter, &ctx).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);

        // A different location is a different entry.
        let london = ctx.clone().with_location("London");
        cached.query(&filter, &london).await.unwrap();
        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);

        cached.cache().clear();
        cached.query(&filter, &ctx).await.unwrap();
        assert_eq!(counting.calls.load(Ordering::SeqCst), 3);
    }
}
