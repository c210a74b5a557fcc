mod modal;
mod note_form;
mod note_list;
mod pagination;
mod search_box;

pub use modal::Modal;
pub use note_form::NoteFormView;
pub use note_list::NoteList;
pub use pagination::Pagination;
pub use search_box::SearchBox;

use crate::models::Note;
use crate::query::QueryState;

/// What the list body shows for a given list state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ListDisplay {
    Loading,
    Error(String),
    Empty,
    Notes(Vec<Note>),
}

pub(crate) fn list_display(state: &QueryState) -> ListDisplay {
    match &state.data {
        Some(page) if !page.notes.is_empty() => ListDisplay::Notes(page.notes.clone()),
        Some(_) if !state.is_loading => ListDisplay::Empty,
        _ if state.is_error => {
            ListDisplay::Error(state.error.clone().unwrap_or_default())
        }
        _ => ListDisplay::Loading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteTag, NotesPage};
    use crate::query::QueryStatus;

    fn with_notes(n: usize) -> NotesPage {
        NotesPage {
            notes: (0..n)
                .map(|i| Note {
                    id: i.to_string(),
                    title: format!("note {i}"),
                    content: String::new(),
                    tag: NoteTag::Todo,
                    created_at: None,
                    updated_at: None,
                })
                .collect(),
            total_pages: 1,
        }
    }

    #[test]
    fn test_first_load_shows_loading() {
        let state = QueryState {
            status: QueryStatus::Loading,
            is_loading: true,
            is_fetching: true,
            ..QueryState::default()
        };
        assert_eq!(list_display(&state), ListDisplay::Loading);
        assert_eq!(list_display(&QueryState::default()), ListDisplay::Loading);
    }

    #[test]
    fn test_empty_page_shows_empty_state() {
        let state = QueryState {
            data: Some(with_notes(0)),
            status: QueryStatus::Success,
            ..QueryState::default()
        };
        assert_eq!(list_display(&state), ListDisplay::Empty);
    }

    #[test]
    fn test_failed_first_load_shows_error() {
        let state = QueryState {
            status: QueryStatus::Error,
            is_error: true,
            error: Some("offline".to_string()),
            ..QueryState::default()
        };
        assert_eq!(list_display(&state), ListDisplay::Error("offline".to_string()));
    }

    #[test]
    fn test_data_wins_over_refresh_error_and_placeholder() {
        let state = QueryState {
            data: Some(with_notes(2)),
            status: QueryStatus::Error,
            is_error: true,
            error: Some("offline".to_string()),
            ..QueryState::default()
        };
        assert!(matches!(list_display(&state), ListDisplay::Notes(ref n) if n.len() == 2));

        let placeholder = QueryState {
            data: Some(with_notes(1)),
            is_fetching: true,
            is_placeholder: true,
            ..QueryState::default()
        };
        assert!(matches!(list_display(&placeholder), ListDisplay::Notes(_)));
    }
}
