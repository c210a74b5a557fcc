use crate::api::ApiClient;
use leptos::prelude::*;

mod list_sync;
pub(crate) mod mutations;
mod notes_sync;
pub(crate) mod view;

#[cfg(test)]
mod scenarios;

pub(crate) use notes_sync::NotesSyncController;

#[derive(Clone)]
pub(crate) struct AppState {
    pub notes: NotesSyncController,
}

impl AppState {
    pub fn new(api_client: ApiClient) -> Self {
        Self {
            notes: NotesSyncController::new(api_client),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

/// Shorthand for components below `App`.
pub(crate) fn use_notes() -> NotesSyncController {
    expect_context::<AppContext>().0.notes
}
