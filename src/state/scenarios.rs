//! Whole-screen flows driven through the same pieces the controller wires
//! together, with the network replaced by explicit completions.

use crate::api::{ApiClient, ApiError, ConfigError, EnvConfig};
use crate::components::notes::{list_display, ListDisplay};
use crate::debounce::Debouncer;
use crate::models::{Note, NoteTag, NotesPage};
use crate::query::{QueryCache, QueryKey, QueryState};
use crate::state::mutations::MutationCoordinator;
use crate::state::view::ViewState;
use crate::validation::NoteForm;
use std::sync::{Arc, Mutex};

fn note(id: &str, title: &str) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: String::new(),
        tag: NoteTag::Meeting,
        created_at: None,
        updated_at: None,
    }
}

fn page_of(notes: Vec<Note>, total_pages: u32) -> NotesPage {
    NotesPage { notes, total_pages }
}

#[test]
fn test_typing_a_search_settles_into_one_request_and_empty_state() {
    let mut view = ViewState::default();
    let mut debouncer: Debouncer<String> = Debouncer::default();
    let mut cache = QueryCache::default();

    let mut tickets = Vec::new();
    for text in ["M", "Mee", "Meeting"] {
        view.set_search(text);
        tickets.push(debouncer.push(text.to_string()));
    }
    assert_eq!(view.query_key(), QueryKey::new(1, ""));

    for t in tickets {
        if let Some(term) = debouncer.fire(t) {
            view.apply_debounced_search(term);
        }
    }
    let key = view.query_key();
    assert_eq!(key, QueryKey::new(1, "Meeting"));
    assert_eq!(
        ApiClient::notes_path(key.page, 12, &key.search),
        "/notes?page=1&perPage=12&search=Meeting"
    );

    let ticket = cache.query(&key, None, 0).fetch.expect("one request");
    assert!(cache.query(&key, None, 1).fetch.is_none());
    cache.complete(&ticket, Ok::<_, ApiError>(page_of(vec![], 0)), 2);

    let state = cache.state(&key, 3);
    assert_eq!(list_display(&state), ListDisplay::Empty);
}

#[test]
fn test_create_on_third_page_closes_modal_and_forces_refetch() {
    let mut view = ViewState::default();
    view.record_total_pages(4);
    view.set_page(3);
    let key = view.query_key();

    let mut cache = QueryCache::default();
    let t = cache.query(&key, None, 0).fetch.expect("fetch");
    cache.complete(&t, Ok::<_, ApiError>(page_of(vec![note("1", "Standup")], 4)), 0);

    view.open_modal();
    let mut mutations = MutationCoordinator::default();
    let form = NoteForm {
        title: "Retro".to_string(),
        content: String::new(),
        tag: "Meeting".to_string(),
    };
    let (ticket, _) = mutations.begin_create(&form, &view).expect("valid");
    mutations
        .finish_create(&ticket, Ok(note("2", "Retro")), &mut cache, &mut view, 1_000)
        .expect("created");

    assert!(!view.is_modal_open());
    assert_eq!(view.page(), 3);
    let read = cache.query(&view.query_key(), None, 1_001);
    assert!(read.fetch.is_some(), "fresh window ignored after create");
    assert_eq!(read.state.data.map(|d| d.notes.len()), Some(1));
}

#[test]
fn test_confirmed_delete_removes_note_after_refetch() {
    let key = QueryKey::new(1, "");
    let mut cache = QueryCache::default();

    let seen: Arc<Mutex<Vec<QueryState>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    cache.subscribe(
        &key,
        Arc::new(move |s: &QueryState| sink.lock().expect("lock").push(s.clone())),
    );

    let t = cache.query(&key, None, 0).fetch.expect("fetch");
    let before = page_of(vec![note("41", "Keep"), note("42", "Drop")], 1);
    cache.complete(&t, Ok::<_, ApiError>(before), 0);

    let mut mutations = MutationCoordinator::default();
    let ticket = mutations.begin_delete("42", |_| true).expect("confirmed");
    let deleted = mutations
        .finish_delete(&ticket, Ok(note("42", "Drop")), &mut cache, 10)
        .expect("deleted");
    assert_eq!(deleted.id, "42");

    let refetch = cache.query(&key, None, 11).fetch.expect("refetch");
    cache.complete(&refetch, Ok::<_, ApiError>(page_of(vec![note("41", "Keep")], 1)), 12);

    let ids: Vec<String> = cache
        .state(&key, 13)
        .data
        .expect("data")
        .notes
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(ids, vec!["41".to_string()]);

    let last = seen.lock().expect("lock").last().cloned().expect("notified");
    assert!(last.data.expect("data").notes.iter().all(|n| n.id != "42"));
}

#[test]
fn test_missing_token_refuses_to_build_client() {
    let cfg = EnvConfig {
        api_url: "https://example.test/api".to_string(),
        token: None,
        log_level: None,
    };
    assert_eq!(
        ApiClient::from_config(&cfg).map(|_| ()),
        Err(ConfigError::MissingToken)
    );
}
