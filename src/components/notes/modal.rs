use crate::state::use_notes;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use wasm_bindgen::JsCast;

/// Overlay shown while the view state says the modal is open. Clicking the
/// backdrop or pressing Escape closes it.
#[component]
pub fn Modal(#[prop(into)] title: String, children: ChildrenFn) -> impl IntoView {
    let notes = use_notes();
    let view_state = notes.view;
    let is_open = Memo::new(move |_| view_state.with(|v| v.is_modal_open()));

    let close_on_escape = {
        let notes = notes.clone();
        window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Escape" && is_open.get_untracked() {
                ev.prevent_default();
                notes.close_modal();
            }
        })
    };
    on_cleanup(move || close_on_escape.remove());

    let on_backdrop = {
        let notes = notes.clone();
        move |ev: web_sys::MouseEvent| {
            // Only clicks on the backdrop itself, not bubbling from the panel.
            let on_self = match (ev.target(), ev.current_target()) {
                (Some(t), Some(c)) => t
                    .dyn_ref::<web_sys::Node>()
                    .zip(c.dyn_ref::<web_sys::Node>())
                    .is_some_and(|(t, c)| t.is_same_node(Some(c))),
                _ => false,
            };
            if on_self {
                notes.close_modal();
            }
        }
    };

    view! {
        <Show when=move || is_open.get() fallback=|| ().into_view()>
            <div
                class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
                role="dialog"
                aria-modal="true"
                on:click=on_backdrop.clone()
            >
                <div class="w-full max-w-md rounded-md border border-border bg-background p-4 shadow-lg">
                    <div class="mb-3 text-sm font-medium">{title.clone()}</div>
                    {children()}
                </div>
            </div>
        </Show>
    }
}
