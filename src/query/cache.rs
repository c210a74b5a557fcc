use super::QueryKey;
use crate::models::NotesPage;
use std::collections::HashMap;
use std::sync::Arc;

/// Cached list pages are served without a refetch for this long.
pub(crate) const DEFAULT_STALE_MS: i64 = 5 * 60 * 1000;
/// Unobserved entries are dropped after this long without activity.
pub(crate) const DEFAULT_GC_MS: i64 = 5 * 60 * 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct QueryConfig {
    pub stale_ms: i64,
    pub gc_ms: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_ms: DEFAULT_STALE_MS,
            gc_ms: DEFAULT_GC_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// What an observer of one key sees.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct QueryState {
    pub data: Option<NotesPage>,
    pub status: QueryStatus,
    /// A request is in flight and there is nothing to show yet.
    pub is_loading: bool,
    /// A request is in flight (initial load or background refresh).
    pub is_fetching: bool,
    pub is_error: bool,
    /// `data` belongs to the previously displayed key, shown while this one loads.
    pub is_placeholder: bool,
    pub is_stale: bool,
    pub error: Option<String>,
}

/// Receipt for an issued list request. Hand it back to [`QueryCache::complete`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FetchTicket {
    pub key: QueryKey,
    pub request_id: u64,
}

#[derive(Clone, Debug)]
pub(crate) struct QueryRead {
    pub state: QueryState,
    /// Present when the caller must perform the network request.
    pub fetch: Option<FetchTicket>,
}

pub(crate) type Listener = Arc<dyn Fn(&QueryState) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SubscriptionId(u64);

#[derive(Default)]
struct CacheEntry {
    data: Option<NotesPage>,
    placeholder: Option<NotesPage>,
    status: QueryStatus,
    error: Option<String>,
    fetched_ms: Option<i64>,
    touched_ms: i64,
    invalidated: bool,
    /// Id of the latest request issued for this key, while unresolved.
    in_flight: Option<u64>,
}

impl CacheEntry {
    fn is_fresh(&self, now_ms: i64, stale_ms: i64) -> bool {
        !self.invalidated
            && self
                .fetched_ms
                .is_some_and(|t| now_ms.saturating_sub(t) < stale_ms)
    }

    fn state(&self, now_ms: i64, stale_ms: i64) -> QueryState {
        let is_fetching = self.in_flight.is_some();
        let (data, is_placeholder) = match (&self.data, &self.placeholder) {
            (Some(d), _) => (Some(d.clone()), false),
            (None, Some(p)) if is_fetching => (Some(p.clone()), true),
            _ => (None, false),
        };

        QueryState {
            is_loading: is_fetching && data.is_none(),
            is_fetching,
            is_error: self.status == QueryStatus::Error,
            is_placeholder,
            is_stale: !self.is_fresh(now_ms, stale_ms),
            error: self.error.clone(),
            status: self.status,
            data,
        }
    }
}

/// Key -> entry map for list pages, with staleness, request deduplication,
/// last-issued-wins completion and per-key subscribers.
///
/// The cache never performs I/O itself. `query` hands out a [`FetchTicket`]
/// when a request is needed; the caller runs it and reports back through
/// `complete`.
pub(crate) struct QueryCache {
    config: QueryConfig,
    entries: HashMap<QueryKey, CacheEntry>,
    listeners: HashMap<QueryKey, Vec<(SubscriptionId, Listener)>>,
    next_request_id: u64,
    next_subscription_id: u64,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(QueryConfig::default())
    }
}

impl QueryCache {
    pub fn new(config: QueryConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            listeners: HashMap::new(),
            next_request_id: 0,
            next_subscription_id: 0,
        }
    }

    /// Current state for `key` without triggering anything.
    pub fn state(&self, key: &QueryKey, now_ms: i64) -> QueryState {
        self.entries
            .get(key)
            .map(|e| e.state(now_ms, self.config.stale_ms))
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn is_in_flight(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.in_flight.is_some())
    }

    /// Read `key`. Serves fresh data as-is, otherwise issues (or joins) a
    /// request. `previous` is the key the caller displayed before; its data is
    /// used as a placeholder while `key` has nothing of its own.
    pub fn query(
        &mut self,
        key: &QueryKey,
        previous: Option<&QueryKey>,
        now_ms: i64,
    ) -> QueryRead {
        let placeholder = previous
            .filter(|p| *p != key)
            .and_then(|p| self.entries.get(p))
            .and_then(|e| e.data.clone());

        let stale_ms = self.config.stale_ms;
        let entry = self.entries.entry(key.clone()).or_default();
        entry.touched_ms = now_ms;

        let fetch = if entry.is_fresh(now_ms, stale_ms) {
            tracing::debug!(%key, "serving fresh cache entry");
            None
        } else if let Some(request_id) = entry.in_flight {
            tracing::debug!(%key, request_id, "joining in-flight request");
            None
        } else {
            self.next_request_id += 1;
            let request_id = self.next_request_id;
            entry.in_flight = Some(request_id);
            entry.status = QueryStatus::Loading;
            tracing::debug!(%key, request_id, "issuing list request");
            Some(FetchTicket {
                key: key.clone(),
                request_id,
            })
        };

        if entry.in_flight.is_some() && entry.data.is_none() && entry.placeholder.is_none() {
            entry.placeholder = placeholder;
        }

        let state = entry.state(now_ms, stale_ms);
        if fetch.is_some() {
            self.notify(key, now_ms);
        }

        QueryRead { state, fetch }
    }

    /// Explicit re-trigger: ignores freshness, still joins an in-flight request.
    pub fn refetch(&mut self, key: &QueryKey, now_ms: i64) -> Option<FetchTicket> {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.touched_ms = now_ms;
        if entry.in_flight.is_some() {
            return None;
        }

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        entry.in_flight = Some(request_id);
        entry.status = QueryStatus::Loading;
        tracing::debug!(%key, request_id, "refetching list");

        self.notify(key, now_ms);
        Some(FetchTicket {
            key: key.clone(),
            request_id,
        })
    }

    /// Apply the outcome of a request. Returns `false` when the response was
    /// discarded because a newer request for the same key superseded it.
    pub fn complete<E: std::fmt::Display>(
        &mut self,
        ticket: &FetchTicket,
        result: Result<NotesPage, E>,
        now_ms: i64,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            tracing::debug!(key = %ticket.key, "response for evicted entry dropped");
            return false;
        };

        if entry.in_flight != Some(ticket.request_id) {
            tracing::debug!(
                key = %ticket.key,
                request_id = ticket.request_id,
                "discarding superseded response"
            );
            return false;
        }

        entry.in_flight = None;
        entry.placeholder = None;
        entry.touched_ms = now_ms;

        match result {
            Ok(page) => {
                entry.data = Some(page);
                entry.status = QueryStatus::Success;
                entry.error = None;
                entry.fetched_ms = Some(now_ms);
                entry.invalidated = false;
            }
            Err(e) => {
                tracing::warn!(key = %ticket.key, error = %e, "list request failed");
                // Last-known-good data stays.
                entry.status = QueryStatus::Error;
                entry.error = Some(e.to_string());
            }
        }

        self.notify(&ticket.key, now_ms);
        true
    }

    /// Mark every entry as untrustworthy. In-flight requests are superseded,
    /// since they may carry pre-mutation data. Returns the keys that have
    /// subscribers so the caller can re-read them.
    pub fn invalidate_all(&mut self, now_ms: i64) -> Vec<QueryKey> {
        for entry in self.entries.values_mut() {
            entry.invalidated = true;
            if entry.in_flight.take().is_some() {
                entry.placeholder = None;
                entry.status = if entry.data.is_some() {
                    QueryStatus::Success
                } else {
                    QueryStatus::Idle
                };
            }
        }
        tracing::debug!(entries = self.entries.len(), "list cache invalidated");

        let mut active: Vec<QueryKey> = self
            .listeners
            .iter()
            .filter(|(_, subs)| !subs.is_empty())
            .map(|(k, _)| k.clone())
            .collect();
        active.sort();

        for key in active.iter() {
            self.notify(key, now_ms);
        }
        active
    }

    pub fn subscribe(&mut self, key: &QueryKey, listener: Listener) -> SubscriptionId {
        self.next_subscription_id += 1;
        let id = SubscriptionId(self.next_subscription_id);
        self.listeners
            .entry(key.clone())
            .or_default()
            .push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;
        self.listeners.retain(|_, subs| {
            let before = subs.len();
            subs.retain(|(sid, _)| *sid != id);
            removed |= subs.len() != before;
            !subs.is_empty()
        });
        removed
    }

    /// Drop entries nobody watches, nothing is fetching, and that have not
    /// been touched within the gc window. Returns how many were dropped.
    pub fn collect_garbage(&mut self, now_ms: i64) -> usize {
        let gc_ms = self.config.gc_ms;
        let listeners = &self.listeners;
        let before = self.entries.len();
        self.entries.retain(|key, e| {
            listeners.contains_key(key)
                || e.in_flight.is_some()
                || now_ms.saturating_sub(e.touched_ms) < gc_ms
        });
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn notify(&self, key: &QueryKey, now_ms: i64) {
        let Some(subs) = self.listeners.get(key) else {
            return;
        };
        if subs.is_empty() {
            return;
        }
        let state = self.state(key, now_ms);
        for (_, listener) in subs {
            listener(&state);
        }
    }
}
