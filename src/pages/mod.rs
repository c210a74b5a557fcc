use crate::api::ConfigError;
use crate::components::notes::{
    list_display, ListDisplay, Modal, NoteFormView, NoteList, Pagination, SearchBox,
};
use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Spinner};
use crate::state::use_notes;
use leptos::prelude::*;

#[component]
pub fn NotesPage() -> impl IntoView {
    let notes = use_notes();
    let list = notes.list;

    let display = Memo::new(move |_| list.with(list_display));
    // Background refresh of data already on screen.
    let refreshing = Memo::new(move |_| list.with(|s| s.is_fetching && s.data.is_some()));
    let refresh_error = Memo::new(move |_| {
        list.with(|s| {
            if s.is_error && s.data.is_some() {
                s.error.clone()
            } else {
                None
            }
        })
    });

    let on_create = {
        let notes = notes.clone();
        move |_| notes.open_modal()
    };

    let retry = notes.clone();

    view! {
        <div class="flex flex-col gap-4">
            <header class="flex flex-wrap items-center justify-between gap-3">
                <SearchBox />
                <Pagination />
                <Button on:click=on_create>"Create note +"</Button>
            </header>

            <Show when=move || refreshing.get() fallback=|| ().into_view()>
                <div class="flex items-center gap-2 text-xs text-muted-foreground">
                    <Spinner class="size-3" />
                    "Refreshing..."
                </div>
            </Show>

            {move || refresh_error.get().map(|e| view! {
                <Alert class="border-destructive/30">
                    <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                </Alert>
            })}

            {move || {
                let retry = retry.clone();
                match display.get() {
                    ListDisplay::Loading => view! {
                        <div class="flex items-center gap-2 py-8 text-sm text-muted-foreground">
                            <Spinner />
                            "Loading..."
                        </div>
                    }
                    .into_any(),
                    ListDisplay::Error(message) => view! {
                        <div class="flex flex-col items-start gap-2 py-8">
                            <p class="text-sm text-destructive">"Error loading notes."</p>
                            <p class="text-xs text-muted-foreground">{message}</p>
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                on:click=move |_: web_sys::MouseEvent| retry.retry()
                            >
                                "Retry"
                            </Button>
                        </div>
                    }
                    .into_any(),
                    ListDisplay::Empty => view! {
                        <p class="py-8 text-sm text-muted-foreground">"No notes found."</p>
                    }
                    .into_any(),
                    ListDisplay::Notes(items) => view! { <NoteList notes=items /> }.into_any(),
                }
            }}

            <Modal title="New note">
                <NoteFormView />
            </Modal>
        </div>
    }
}

/// Shown instead of the app when startup configuration is unusable.
#[component]
pub fn ConfigErrorPage(error: ConfigError) -> impl IntoView {
    view! {
        <main class="mx-auto max-w-md px-4 py-16">
            <Alert class="border-destructive/30">
                <AlertDescription class="text-destructive">
                    {format!("Cannot start: {error}")}
                </AlertDescription>
            </Alert>
        </main>
    }
}
