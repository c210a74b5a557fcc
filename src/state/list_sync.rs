use crate::models::NotesPage;
use crate::query::{FetchTicket, Listener, QueryCache, QueryKey, QueryRead, QueryState, SubscriptionId};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The list cache together with the single subscription the notes screen
/// holds on it. Switching keys moves the subscription and hands the key that
/// was on screen to the cache as the placeholder source.
#[derive(Default)]
pub(crate) struct ListSync {
    cache: QueryCache,
    subscription: Option<(QueryKey, SubscriptionId)>,
}

impl ListSync {
    pub fn cache_mut(&mut self) -> &mut QueryCache {
        &mut self.cache
    }

    pub fn active_key(&self) -> Option<&QueryKey> {
        self.subscription.as_ref().map(|(k, _)| k)
    }

    /// Show `key`. `listener` is only registered when the key changes.
    pub fn load(&mut self, key: &QueryKey, listener: Listener, now_ms: i64) -> QueryRead {
        let previous = match self.subscription.take() {
            Some((current, id)) if &current == key => {
                self.subscription = Some((current, id));
                None
            }
            Some((current, id)) => {
                self.cache.unsubscribe(id);
                Some(current)
            }
            None => None,
        };

        if self.subscription.is_none() {
            let id = self.cache.subscribe(key, listener);
            self.subscription = Some((key.clone(), id));
        }

        let read = self.cache.query(key, previous.as_ref(), now_ms);
        let dropped = self.cache.collect_garbage(now_ms);
        if dropped > 0 {
            tracing::debug!(dropped, remaining = self.cache.len(), "evicted unused list pages");
        }
        read
    }

    pub fn retry(&mut self, key: &QueryKey, now_ms: i64) -> Option<FetchTicket> {
        self.cache.refetch(key, now_ms)
    }

    pub fn complete<E: std::fmt::Display>(
        &mut self,
        ticket: &FetchTicket,
        result: Result<NotesPage, E>,
        now_ms: i64,
    ) -> bool {
        self.cache.complete(ticket, result, now_ms)
    }
}

/// Lock the shared list. A poisoned lock is reused as is, so completions
/// always reach the cache and mutation tickets always get released.
pub(crate) fn lock_list(sync: &Mutex<ListSync>) -> MutexGuard<'_, ListSync> {
    sync.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Page count reported for the displayed key. Placeholder data belongs to
/// another key and never sets pagination bounds.
pub(crate) fn settled_total_pages(state: &QueryState) -> Option<u32> {
    if state.is_placeholder {
        return None;
    }
    state.data.as_ref().map(|d| d.total_pages)
}
