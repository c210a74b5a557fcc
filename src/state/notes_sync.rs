use crate::api::{ApiClient, PER_PAGE};
use crate::debounce::{DebounceTicket, Debouncer};
use crate::query::{FetchTicket, Listener, QueryKey, QueryState};
use crate::state::list_sync::{lock_list, settled_total_pages, ListSync};
use crate::state::mutations::{MutationCoordinator, MutationError};
use crate::state::view::ViewState;
use crate::util::now_ms;
use crate::validation::NoteForm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use wasm_bindgen::JsCast;

/// Reactive controller for the notes screen.
///
/// Responsibilities:
/// - derive the list key from view state and keep the displayed list in sync
/// - debounce the search box (one browser timer)
/// - run list requests and create/delete calls as local tasks
///
/// Non-responsibilities:
/// - caching rules, view transitions and mutation bookkeeping; those live in
///   `ListSync`, `ViewState` and `MutationCoordinator`
#[derive(Clone)]
pub(crate) struct NotesSyncController {
    api_client: ApiClient,

    /// The single shared cache and the list's subscription on it.
    /// Subscribers only write signals, so no listener re-enters the lock.
    sync: Arc<Mutex<ListSync>>,

    debouncer: Arc<Mutex<Debouncer<String>>>,
    search_timer_id: RwSignal<Option<i32>>,

    pub view: RwSignal<ViewState>,
    pub list: RwSignal<QueryState>,
    pub mutations: RwSignal<MutationCoordinator>,
    key: Memo<QueryKey>,
}

impl NotesSyncController {
    pub fn new(api_client: ApiClient) -> Self {
        let view = RwSignal::new(ViewState::default());
        let key = Memo::new(move |_| view.with(|v| v.query_key()));

        let s = Self {
            api_client,
            sync: Arc::new(Mutex::new(ListSync::default())),
            debouncer: Arc::new(Mutex::new(Debouncer::default())),
            search_timer_id: RwSignal::new(None),
            view,
            list: RwSignal::new(QueryState::default()),
            mutations: RwSignal::new(MutationCoordinator::default()),
            key,
        };

        s.start_key_watcher();
        s.start_total_pages_watcher();

        s
    }

    fn start_key_watcher(&self) {
        let s2 = self.clone();
        Effect::new(move |_| {
            let key = s2.key.get();
            s2.load(key);
        });
    }

    /// Pagination bounds follow the last real (non-placeholder) page shown.
    fn start_total_pages_watcher(&self) {
        let list = self.list;
        let view = self.view;
        Effect::new(move |_| {
            let Some(total) = list.with(settled_total_pages) else {
                return;
            };
            if view.with_untracked(|v| v.total_pages()) != Some(total) {
                view.update(|v| v.record_total_pages(total));
            }
        });
    }

    fn lock_sync(&self) -> MutexGuard<'_, ListSync> {
        lock_list(&self.sync)
    }

    fn load(&self, key: QueryKey) {
        let list = self.list;
        let listener: Listener = Arc::new(move |state: &QueryState| list.set(state.clone()));
        let read = self.lock_sync().load(&key, listener, now_ms());

        self.list.set(read.state);
        if let Some(ticket) = read.fetch {
            self.spawn_fetch(ticket);
        }
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let api_client = self.api_client.clone();
        let s2 = self.clone();
        spawn_local(async move {
            let res = api_client
                .fetch_notes(ticket.key.page, PER_PAGE, &ticket.key.search)
                .await;
            s2.lock_sync().complete(&ticket, res, now_ms());
        });
    }

    /// Explicit retry of the displayed list.
    pub fn retry(&self) {
        let key = self.key.get_untracked();
        let ticket = self.lock_sync().retry(&key, now_ms());
        if let Some(ticket) = ticket {
            self.spawn_fetch(ticket);
        }
    }

    /// Called by the search box on each input, including the clear button.
    /// The list only follows once the debouncer settles.
    pub fn set_search(&self, text: String) {
        self.view.update(|v| v.set_search(text.clone()));

        let ticket = self
            .debouncer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text);
        self.schedule_search_settle(ticket);
    }

    fn cancel_search_timer(&self) {
        if let Some(tid) = self.search_timer_id.get_untracked() {
            if let Some(win) = web_sys::window() {
                win.clear_timeout_with_handle(tid);
            }
            self.search_timer_id.set(None);
        }
    }

    fn schedule_search_settle(&self, ticket: DebounceTicket) {
        self.cancel_search_timer();

        let Some(win) = web_sys::window() else {
            return;
        };

        let s2 = self.clone();
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            s2.on_search_settled(ticket);
        });

        let tid = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                ticket.delay_ms,
            )
            .unwrap_or(0);
        self.search_timer_id.set(Some(tid));
    }

    fn on_search_settled(&self, ticket: DebounceTicket) {
        self.search_timer_id.set(None);

        let mut debouncer = self.debouncer.lock().unwrap_or_else(PoisonError::into_inner);
        self.view.update(|v| {
            settle_search(&mut debouncer, v, ticket);
        });
    }

    pub fn set_page(&self, page: u32) {
        self.view.update(|v| {
            v.set_page(page);
        });
    }

    pub fn open_modal(&self) {
        self.mutations.update(|m| m.clear_create_error());
        self.view.update(|v| v.open_modal());
    }

    pub fn close_modal(&self) {
        self.view.update(|v| v.close_modal());
    }

    /// Submit the create form. Validation failures are returned immediately;
    /// the network outcome lands in `mutations` and `view`.
    pub fn create_note(&self, form: NoteForm) -> Result<(), MutationError> {
        let view = self.view.get_untracked();
        let (ticket, body) = self
            .mutations
            .try_update(|m| m.begin_create(&form, &view))
            .ok_or(MutationError::Busy)??;

        let api_client = self.api_client.clone();
        let s2 = self.clone();
        spawn_local(async move {
            let res = api_client.create_note(&body).await;
            let now = now_ms();
            let outcome = s2
                .mutations
                .try_update(|m| {
                    s2.view.try_update(|v| {
                        m.finish_create(&ticket, res, s2.lock_sync().cache_mut(), v, now)
                    })
                })
                .flatten();

            if matches!(outcome, Some(Ok(_))) {
                s2.load(s2.key.get_untracked());
            }
        });

        Ok(())
    }

    /// Ask the user, then delete. The list only changes after the server
    /// confirms and the refetch lands.
    pub fn delete_note(&self, id: String) {
        let begun = self
            .mutations
            .try_update(|m| m.begin_delete(&id, confirm_in_browser));

        let ticket = match begun {
            Some(Ok(ticket)) => ticket,
            Some(Err(e)) => {
                tracing::debug!(id = %id, reason = %e, "delete not started");
                return;
            }
            None => return,
        };

        let api_client = self.api_client.clone();
        let s2 = self.clone();
        spawn_local(async move {
            let res = api_client.delete_note(&id).await;
            let now = now_ms();
            let outcome = s2
                .mutations
                .try_update(|m| m.finish_delete(&ticket, res, s2.lock_sync().cache_mut(), now));

            if matches!(outcome, Some(Ok(_))) {
                s2.load(s2.key.get_untracked());
            }
        });
    }
}

/// A search timer elapsed. Applies the settled term when `ticket` is still
/// the latest input; returns whether the debounced term changed.
fn settle_search(debouncer: &mut Debouncer<String>, view: &mut ViewState, ticket: DebounceTicket) -> bool {
    match debouncer.fire(ticket) {
        Some(term) => {
            tracing::debug!(search = %term, "search settled");
            view.apply_debounced_search(term)
        }
        None => false,
    }
}

fn confirm_in_browser(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
