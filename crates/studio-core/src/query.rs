//! Data-fetching cache.
//!
//! Fetched results keyed by query identity, with two independent windows: a
//! staleness window after which a cached value is still served but gets
//! refreshed, and an eviction window after which an unused entry is removed
//! by [`QueryCache::sweep`]. The map itself is a bounded LRU, so runaway
//! key cardinality cannot grow without limit even between sweeps.

use std::fmt;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);
const DEFAULT_EVICT_AFTER: Duration = Duration::from_secs(10 * 60);
const DEFAULT_MAX_ENTRIES: NonZeroUsize = NonZeroUsize::new(512).unwrap();

/// Cache tuning knobs.
///
/// `evict_after >= stale_after` is the intended configuration; the cache
/// does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Age after which a cached result is still served but refreshed.
    pub stale_after: Duration,
    /// Idle time after which an unused entry is removed by a sweep,
    /// measured from last use, independent of staleness.
    pub evict_after: Duration,
    /// Hard bound on resident entries.
    pub max_entries: NonZeroUsize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: DEFAULT_STALE_AFTER,
            evict_after: DEFAULT_EVICT_AFTER,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Identity of a query: ordered segments, e.g. `["studies", "42"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Errors surfaced to callers of [`QueryCache::get_or_fetch`].
#[derive(Debug, Error)]
pub enum QueryError {
    /// The fetcher failed and no cached value was available to serve.
    #[error("query fetch failed")]
    Fetch(#[source] anyhow::Error),
}

struct Entry {
    value: Value,
    fetched_at: Instant,
    last_used: Instant,
}

/// Read-only view of one cache entry, for diagnostics.
#[derive(Debug, Clone)]
pub struct EntrySnapshot {
    pub key: QueryKey,
    /// Time since the value was fetched.
    pub age: Duration,
    /// Time since the entry was last used.
    pub idle: Duration,
    /// Whether the next use would trigger a refresh.
    pub stale: bool,
}

/// Keyed cache of fetched results.
pub struct QueryCache {
    entries: LruCache<QueryKey, Entry>,
    policy: CachePolicy,
}

impl QueryCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            entries: LruCache::new(policy.max_entries),
            policy,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached value for `key`, fetching on a miss.
    ///
    /// A fresh hit never invokes the fetcher. A stale hit serves the cached
    /// value and refreshes the entry in the same call; a failed refresh
    /// keeps the stale entry servable and only logs. A failed fetch on a
    /// miss is an error and caches nothing.
    pub fn get_or_fetch<F>(&mut self, key: QueryKey, fetch: F) -> Result<Value, QueryError>
    where
        F: FnOnce() -> anyhow::Result<Value>,
    {
        self.get_or_fetch_at(key, fetch, Instant::now())
    }

    /// Variant of [`Self::get_or_fetch`] taking an explicit timestamp.
    pub fn get_or_fetch_at<F>(
        &mut self,
        key: QueryKey,
        fetch: F,
        now: Instant,
    ) -> Result<Value, QueryError>
    where
        F: FnOnce() -> anyhow::Result<Value>,
    {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = now;
            let age = now.saturating_duration_since(entry.fetched_at);
            if age < self.policy.stale_after {
                return Ok(entry.value.clone());
            }
            // Stale: serve the cached value, refresh in place for the next
            // read. This is the synchronous form of stale-while-revalidate.
            let stale = entry.value.clone();
            match fetch() {
                Ok(fresh) => {
                    entry.value = fresh;
                    entry.fetched_at = now;
                    tracing::debug!(key = %key, "stale entry refreshed");
                }
                Err(error) => {
                    tracing::warn!(key = %key, %error, "refresh failed; serving stale value");
                }
            }
            return Ok(stale);
        }

        let value = fetch().map_err(QueryError::Fetch)?;
        tracing::debug!(key = %key, "query result cached");
        self.entries.put(
            key,
            Entry {
                value: value.clone(),
                fetched_at: now,
                last_used: now,
            },
        );
        Ok(value)
    }

    /// Remove entries unused for longer than the eviction window. Returns
    /// the number of entries removed.
    pub fn sweep(&mut self) -> usize {
        self.sweep_at(Instant::now())
    }

    /// Variant of [`Self::sweep`] taking an explicit timestamp.
    pub fn sweep_at(&mut self, now: Instant) -> usize {
        let expired: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| {
                now.saturating_duration_since(entry.last_used) >= self.policy.evict_after
            })
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.entries.pop(key);
        }
        if !expired.is_empty() {
            tracing::debug!(evicted = expired.len(), "query cache swept");
        }
        expired.len()
    }

    /// Per-entry diagnostics. Does not touch recency.
    pub fn snapshot(&self) -> Vec<EntrySnapshot> {
        self.snapshot_at(Instant::now())
    }

    /// Variant of [`Self::snapshot`] taking an explicit timestamp.
    pub fn snapshot_at(&self, now: Instant) -> Vec<EntrySnapshot> {
        self.entries
            .iter()
            .map(|(key, entry)| {
                let age = now.saturating_duration_since(entry.fetched_at);
                EntrySnapshot {
                    key: key.clone(),
                    age,
                    idle: now.saturating_duration_since(entry.last_used),
                    stale: age >= self.policy.stale_after,
                }
            })
            .collect()
    }
}
