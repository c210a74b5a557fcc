use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input, Label, Select, Spinner,
    Textarea,
};
use crate::models::NoteTag;
use crate::state::mutations::MutationError;
use crate::state::use_notes;
use crate::validation::NoteForm;
use leptos::prelude::*;
use strum::IntoEnumIterator;

/// Create form shown inside the modal. Its fields live as long as the modal
/// does, so a reopened modal always starts empty.
#[component]
pub fn NoteFormView() -> impl IntoView {
    let controller = use_notes();
    let mutations = controller.mutations;

    let form = RwSignal::new(NoteForm::default());
    // Field messages appear once the field has been left or a submit tried.
    let touched = RwSignal::new([false; 3]);

    let errors = Memo::new(move |_| form.with(|f| f.errors()));
    let pending = Memo::new(move |_| mutations.with(|m| m.is_create_pending()));
    let server_error = Memo::new(move |_| mutations.with(|m| m.create_error().map(str::to_string)));

    let field_error = move |idx: usize| {
        move || {
            if !touched.with(|t| t[idx]) {
                return None;
            }
            errors.with(|e| match idx {
                0 => e.title.clone(),
                1 => e.content.clone(),
                _ => e.tag.clone(),
            })
        }
    };
    let touch = move |idx: usize| Callback::new(move |_: ()| touched.update(|t| t[idx] = true));

    let tag_options: Vec<(String, String)> = NoteTag::iter()
        .map(|t| (t.to_string(), t.to_string()))
        .collect();

    let on_submit = {
        let controller = controller.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            touched.set([true; 3]);
            match controller.create_note(form.get_untracked()) {
                Ok(()) => {}
                Err(MutationError::Validation(_)) | Err(MutationError::Busy) => {}
                Err(e) => tracing::warn!(error = %e, "create not started"),
            }
        }
    };

    let on_cancel = {
        let controller = controller.clone();
        move |_| controller.close_modal()
    };

    view! {
        <form class="space-y-3" on:submit=on_submit novalidate=true>
            <div class="space-y-1">
                <Label class="text-xs" html_for="note-title">"Title"</Label>
                <Input
                    id="note-title"
                    name="title"
                    value=Signal::derive(move || form.with(|f| f.title.clone()))
                    on_input=Callback::new(move |v: String| form.update(|f| f.title = v))
                    on_blur=touch(0)
                    invalid=Signal::derive(move || field_error(0)().is_some())
                    disabled=pending
                />
                {move || field_error(0)().map(|e| view! { <p class="text-xs text-destructive">{e}</p> })}
            </div>

            <div class="space-y-1">
                <Label class="text-xs" html_for="note-content">"Content"</Label>
                <Textarea
                    id="note-content"
                    name="content"
                    rows=8
                    value=Signal::derive(move || form.with(|f| f.content.clone()))
                    on_input=Callback::new(move |v: String| form.update(|f| f.content = v))
                    on_blur=touch(1)
                    invalid=Signal::derive(move || field_error(1)().is_some())
                    disabled=pending
                />
                {move || field_error(1)().map(|e| view! { <p class="text-xs text-destructive">{e}</p> })}
            </div>

            <div class="space-y-1">
                <Label class="text-xs" html_for="note-tag">"Tag"</Label>
                <Select
                    id="note-tag"
                    name="tag"
                    options=tag_options
                    value=Signal::derive(move || form.with(|f| f.tag.clone()))
                    on_change=Callback::new(move |v: String| {
                        form.update(|f| f.tag = v);
                        touched.update(|t| t[2] = true);
                    })
                    disabled=pending
                />
                {move || field_error(2)().map(|e| view! { <p class="text-xs text-destructive">{e}</p> })}
            </div>

            {move || server_error.get().map(|e| view! {
                <Alert class="border-destructive/30">
                    <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                </Alert>
            })}

            <div class="flex items-center justify-end gap-2 pt-2">
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    attr:r#type="button"
                    on:click=on_cancel
                >
                    "Cancel"
                </Button>
                <Button
                    size=ButtonSize::Sm
                    attr:r#type="submit"
                    attr:disabled=move || pending.get() || !form.with(|f| f.is_valid())
                >
                    <Show when=move || pending.get() fallback=|| ().into_view()>
                        <Spinner />
                    </Show>
                    {move || if pending.get() { "Creating..." } else { "Create note" }}
                </Button>
            </div>
        </form>
    }
}
