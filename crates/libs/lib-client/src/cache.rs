//! # Query Cache
//!
//! Keyed, de-duplicating cache for read requests.
//!
//! ```text
//! fetch(key) ──▶ fresh value? ──yes──▶ Arc<T>
//!                    │ no
//!                    ▼
//!               in flight? ──yes──▶ join the shared future
//!                    │ no
//!                    ▼
//!               start fetcher, publish as in flight
//! ```
//!
//! Concurrent callers with the same [`QueryKey`] observe a single call of the
//! fetcher and receive the same `Arc<T>`. Failures are recorded on the entry
//! for [`QueryCache::state`] but never stored as values; the next `fetch`
//! tries again.
//!
//! The map lock is a `parking_lot::Mutex` and is never held across an await.
//! Each in-flight request carries a ticket; only the waiter whose ticket still
//! matches the entry writes the outcome back, so a request that was
//! invalidated or superseded while running cannot overwrite newer state.
//!
//! There is no size cap and staleness does not evict: every distinct key
//! keeps its entry until [`QueryCache::invalidate`],
//! [`QueryCache::invalidate_endpoint`] or [`QueryCache::clear`] removes it.
//! Long-lived owners should clear endpoints they no longer display.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

use lib_core::{ApiError, QueryDescriptor, Result};

type SharedFetch<T> = Shared<BoxFuture<'static, Result<Arc<T>>>>;

/// Cache key: the endpoint plus the serialized query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    pub endpoint: String,
    pub fragment: String,
}

impl QueryKey {
    /// Key for a list request.
    pub fn new(endpoint: impl Into<String>, query: &QueryDescriptor) -> Self {
        Self {
            endpoint: endpoint.into(),
            fragment: query.cache_fragment(),
        }
    }

    /// Key for a request that takes no parameters.
    pub fn endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fragment: String::new(),
        }
    }

    /// Key for a single resource.
    pub fn detail(endpoint: impl Into<String>, id: &str) -> Self {
        Self {
            endpoint: endpoint.into(),
            fragment: format!("id={}", id),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fragment.is_empty() {
            write!(f, "{}", self.endpoint)
        } else {
            write!(f, "{}?{}", self.endpoint, self.fragment)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Never fetched.
    Idle,
    /// First fetch running, no value yet.
    Pending,
    /// Last fetch succeeded.
    Success,
    /// Last fetch failed.
    Error,
}

/// Snapshot of one cache entry.
#[derive(Debug)]
pub struct QueryState<T> {
    pub data: Option<Arc<T>>,
    pub error: Option<ApiError>,
    pub status: QueryStatus,
    /// A request for this key is running (first load or refetch).
    pub is_fetching: bool,
}

impl<T> QueryState<T> {
    fn idle() -> Self {
        Self {
            data: None,
            error: None,
            status: QueryStatus::Idle,
            is_fetching: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == QueryStatus::Pending
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }
}

struct Entry<T> {
    value: Option<Arc<T>>,
    fetched_at: Option<Instant>,
    error: Option<ApiError>,
    in_flight: Option<(u64, SharedFetch<T>)>,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            value: None,
            fetched_at: None,
            error: None,
            in_flight: None,
        }
    }
}

impl<T> Entry<T> {
    fn fresh_value(&self, stale_after: Option<Duration>) -> Option<Arc<T>> {
        if self.error.is_some() {
            return None;
        }
        let value = self.value.as_ref()?;
        match (stale_after, self.fetched_at) {
            (Some(limit), Some(at)) if at.elapsed() >= limit => None,
            _ => Some(Arc::clone(value)),
        }
    }

    fn state(&self) -> QueryState<T> {
        let status = if self.error.is_some() {
            QueryStatus::Error
        } else if self.value.is_some() {
            QueryStatus::Success
        } else if self.in_flight.is_some() {
            QueryStatus::Pending
        } else {
            QueryStatus::Idle
        };

        QueryState {
            data: self.value.clone(),
            error: self.error.clone(),
            status,
            is_fetching: self.in_flight.is_some(),
        }
    }
}

/// De-duplicating cache for one response type.
pub struct QueryCache<T> {
    entries: Mutex<HashMap<QueryKey, Entry<T>>>,
    stale_after: Option<Duration>,
    next_ticket: AtomicU64,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T> QueryCache<T> {
    /// `stale_after = None` keeps values until invalidated.
    pub fn new(stale_after: Option<Duration>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            stale_after,
            next_ticket: AtomicU64::new(1),
        }
    }

    pub fn state(&self, key: &QueryKey) -> QueryState<T> {
        self.entries
            .lock()
            .get(key)
            .map(Entry::state)
            .unwrap_or_else(QueryState::idle)
    }

    /// Drop one entry. A request still running for it will not write back.
    pub fn invalidate(&self, key: &QueryKey) {
        if self.entries.lock().remove(key).is_some() {
            tracing::debug!(key = %key, "Query invalidated");
        }
    }

    /// Drop every entry for `endpoint`, whatever its query.
    pub fn invalidate_endpoint(&self, endpoint: &str) {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|key, _| key.endpoint != endpoint);
        tracing::debug!(endpoint, removed = before - entries.len(), "Endpoint invalidated");
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    /// Cached value when fresh, otherwise join or start a request.
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (ticket, request) = {
            let mut entries = self.entries.lock();
            let entry = entries.entry(key.clone()).or_default();
            if let Some(value) = entry.fresh_value(self.stale_after) {
                tracing::trace!(key = %key, "Query cache hit");
                return Ok(value);
            }
            self.join_or_start(key, entry, fetcher)
        };

        let outcome = request.await;
        self.settle(key, ticket, &outcome);
        outcome
    }

    /// Always go to the backend, unless a request for `key` is already
    /// running, in which case its result is shared.
    pub async fn refetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (ticket, request) = {
            let mut entries = self.entries.lock();
            let entry = entries.entry(key.clone()).or_default();
            self.join_or_start(key, entry, fetcher)
        };

        let outcome = request.await;
        self.settle(key, ticket, &outcome);
        outcome
    }

    fn join_or_start<F, Fut>(&self, key: &QueryKey, entry: &mut Entry<T>, fetcher: F) -> (u64, SharedFetch<T>)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        if let Some((ticket, request)) = &entry.in_flight {
            tracing::trace!(key = %key, "Joining in-flight query");
            return (*ticket, request.clone());
        }

        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let request = fetcher().map(|result| result.map(Arc::new)).boxed().shared();
        entry.in_flight = Some((ticket, request.clone()));
        tracing::debug!(key = %key, ticket, "Query started");
        (ticket, request)
    }

    fn settle(&self, key: &QueryKey, ticket: u64, outcome: &Result<Arc<T>>) {
        let mut entries = self.entries.lock();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        if !matches!(&entry.in_flight, Some((current, _)) if *current == ticket) {
            return;
        }

        entry.in_flight = None;
        match outcome {
            Ok(value) => {
                entry.value = Some(Arc::clone(value));
                entry.fetched_at = Some(Instant::now());
                entry.error = None;
            }
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "Query failed");
                entry.error = Some(e.clone());
            }
        }
    }
}

impl<T> fmt::Debug for QueryCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.len())
            .field("stale_after", &self.stale_after)
            .finish()
    }
}

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// A cache entry bound to the request that fills it.
///
/// Built once per screen or command with a fixed key. A different query is
/// a different key, so it gets a new handle.
pub struct QueryHandle<T> {
    cache: Arc<QueryCache<T>>,
    key: QueryKey,
    fetcher: Fetcher<T>,
}

impl<T> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            key: self.key.clone(),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<T: Send + Sync + 'static> QueryHandle<T> {
    pub fn new<F, Fut>(cache: Arc<QueryCache<T>>, key: QueryKey, fetcher: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            cache,
            key,
            fetcher: Arc::new(move || fetcher().boxed()),
        }
    }

    pub async fn fetch(&self) -> Result<Arc<T>> {
        let fetcher = Arc::clone(&self.fetcher);
        self.cache.fetch(&self.key, move || fetcher()).await
    }

    pub async fn refetch(&self) -> Result<Arc<T>> {
        let fetcher = Arc::clone(&self.fetcher);
        self.cache.refetch(&self.key, move || fetcher()).await
    }

    pub fn state(&self) -> QueryState<T> {
        self.cache.state(&self.key)
    }

    pub fn invalidate(&self) {
        self.cache.invalidate(&self.key);
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl<T> fmt::Debug for QueryHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryHandle").field("key", &self.key).finish()
    }
}
