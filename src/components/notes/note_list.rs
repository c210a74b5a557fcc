use crate::components::ui::{Button, ButtonSize, ButtonVariant, Spinner};
use crate::models::Note;
use crate::state::use_notes;
use leptos::prelude::*;

#[component]
pub fn NoteList(notes: Vec<Note>) -> impl IntoView {
    view! {
        <ul class="grid gap-3 sm:grid-cols-2 lg:grid-cols-3">
            {notes.into_iter().map(|note| view! { <NoteCard note=note /> }).collect_view()}
        </ul>
    }
}

#[component]
fn NoteCard(note: Note) -> impl IntoView {
    let controller = use_notes();
    let mutations = controller.mutations;

    let id = note.id.clone();
    let pending = Memo::new({
        let id = id.clone();
        move |_| mutations.with(|m| m.is_delete_pending(&id))
    });
    let error = Memo::new({
        let id = id.clone();
        move |_| mutations.with(|m| m.delete_error(&id).map(str::to_string))
    });

    view! {
        <li class="flex flex-col gap-2 rounded-md border border-border bg-background p-4 shadow-xs">
            <h2 class="truncate text-base font-semibold">{note.title}</h2>
            <p class="whitespace-pre-wrap break-words text-sm text-muted-foreground">{note.content}</p>
            <div class="mt-auto flex items-center justify-between gap-2 pt-2">
                <span class="rounded-full bg-accent px-2.5 py-0.5 text-xs">{note.tag.to_string()}</span>
                <Button
                    variant=ButtonVariant::Destructive
                    size=ButtonSize::Sm
                    attr:disabled=move || pending.get()
                    on:click=move |_: web_sys::MouseEvent| controller.delete_note(id.clone())
                >
                    <Show when=move || pending.get() fallback=|| ().into_view()>
                        <Spinner />
                    </Show>
                    {move || if pending.get() { "Deleting..." } else { "Delete" }}
                </Button>
            </div>
            {move || error.get().map(|e| view! { <p class="text-xs text-destructive">{e}</p> })}
        </li>
    }
}
