use crate::api::ApiClient;
use crate::pages::NotesPage;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;

#[component]
pub fn App(api_client: ApiClient) -> impl IntoView {
    provide_context(AppContext(AppState::new(api_client)));

    view! {
        <main class="mx-auto min-h-screen max-w-5xl px-4 py-6">
            <NotesPage />
        </main>
    }
}
