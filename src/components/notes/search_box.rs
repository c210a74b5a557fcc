use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input};
use crate::state::use_notes;
use icons::X;
use leptos::prelude::*;

/// Search input. Keystrokes update the box immediately; the list follows
/// once typing pauses.
#[component]
pub fn SearchBox() -> impl IntoView {
    let notes = use_notes();
    let view_state = notes.view;
    let raw = Signal::derive(move || view_state.with(|v| v.raw_search().to_string()));

    let on_input = {
        let notes = notes.clone();
        Callback::new(move |text: String| notes.set_search(text))
    };

    view! {
        <div class="relative w-full max-w-xs">
            <Input
                r#type="search"
                placeholder="Search notes"
                class="pr-8"
                value=raw
                on_input=on_input
            />
            <Show when=move || !raw.get().is_empty() fallback=|| ().into_view()>
                {
                    let notes = notes.clone();
                    view! {
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            class="absolute right-0.5 top-0.5 size-8"
                            attr:aria-label="Clear search"
                            on:click=move |_: web_sys::MouseEvent| notes.set_search(String::new())
                        >
                            <X />
                        </Button>
                    }
                }
            </Show>
        </div>
    }
}
