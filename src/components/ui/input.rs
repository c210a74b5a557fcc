use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

const FIELD_CLASS: &str = "placeholder:text-muted-foreground border-input w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50 aria-invalid:border-destructive aria-invalid:ring-destructive/20";

// NOTE: values are wired by hand (`prop:value` + `on:input`) instead of
// `bind:value`, so callers can route keystrokes through their own handlers.

fn event_value(ev: &web_sys::Event) -> Option<String> {
    let target = ev.target()?;
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        return Some(area.value());
    }
    target
        .dyn_ref::<web_sys::HtmlSelectElement>()
        .map(|select| select.value())
}

#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into, optional)] invalid: Signal<bool>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into, optional)] on_blur: Option<Callback<()>>,
) -> impl IntoView {
    let merged_class = tw_merge!("flex h-9", FIELD_CLASS, class);

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            disabled=move || disabled.get()
            aria-invalid=move || invalid.get().then_some("true")
            prop:value=move || value.get()
            on:input=move |ev| {
                if let Some(v) = event_value(&ev) {
                    on_input.run(v);
                }
            }
            on:blur=move |_| {
                if let Some(cb) = on_blur {
                    cb.run(());
                }
            }
        />
    }
}

#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(default = 6)] rows: u32,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into, optional)] invalid: Signal<bool>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into, optional)] on_blur: Option<Callback<()>>,
) -> impl IntoView {
    let merged_class = tw_merge!("min-h-24 py-2 resize-y", FIELD_CLASS, class);

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            name=name
            id=id
            rows=rows
            disabled=move || disabled.get()
            aria-invalid=move || invalid.get().then_some("true")
            prop:value=move || value.get()
            on:input=move |ev| {
                if let Some(v) = event_value(&ev) {
                    on_input.run(v);
                }
            }
            on:blur=move |_| {
                if let Some(cb) = on_blur {
                    cb.run(());
                }
            }
        />
    }
}

/// Native `<select>` over a fixed list of `(value, label)` options.
#[component]
pub fn Select(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    options: Vec<(String, String)>,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!("flex h-9", FIELD_CLASS, class);

    view! {
        <select
            data-name="Select"
            class=merged_class
            name=name
            id=id
            disabled=move || disabled.get()
            prop:value=move || value.get()
            on:change=move |ev| {
                if let Some(v) = event_value(&ev) {
                    on_change.run(v);
                }
            }
        >
            {options
                .into_iter()
                .map(|(v, label)| {
                    let current = v.clone();
                    view! {
                        <option value=v selected=move || value.with(|cur| cur == &current)>
                            {label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
