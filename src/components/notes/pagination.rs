use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::state::use_notes;
use leptos::prelude::*;

/// Pages shown around the current one.
const PAGE_RANGE: u32 = 3;
/// Pages always shown at each end.
const MARGIN_PAGES: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PageItem {
    Page(u32),
    Gap,
}

/// Page buttons for `current` of `total`. Runs of hidden pages collapse to a
/// single `Gap`; a gap that would hide exactly one page shows that page.
pub(crate) fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    let window_end = (current.saturating_sub(PAGE_RANGE / 2).max(1) + PAGE_RANGE - 1).min(total);
    let window_start = (window_end + 1).saturating_sub(PAGE_RANGE).max(1);

    let shown = |p: u32| {
        p <= MARGIN_PAGES || p > total.saturating_sub(MARGIN_PAGES) || (window_start..=window_end).contains(&p)
    };

    let mut items: Vec<PageItem> = Vec::new();
    let mut p = 1;
    while p <= total {
        if shown(p) {
            items.push(PageItem::Page(p));
            p += 1;
            continue;
        }
        let run_start = p;
        while p <= total && !shown(p) {
            p += 1;
        }
        if p - run_start == 1 {
            items.push(PageItem::Page(run_start));
        } else {
            items.push(PageItem::Gap);
        }
    }
    items
}

#[component]
pub fn Pagination() -> impl IntoView {
    let notes = use_notes();
    let view_state = notes.view;

    let current = Memo::new(move |_| view_state.with(|v| v.page()));
    let total = Memo::new(move |_| view_state.with(|v| v.total_pages().unwrap_or(0)));

    let go = {
        let notes = notes.clone();
        move |page: u32| notes.set_page(page)
    };
    let go_prev = go.clone();
    let go_next = go.clone();

    view! {
        <Show when=move || { total.get() > 1 } fallback=|| ().into_view()>
            <nav class="flex items-center gap-1" aria-label="Pagination">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    attr:disabled={move || current.get() <= 1}
                    on:click={
                        let go_prev = go_prev.clone();
                        move |_ev: web_sys::MouseEvent| go_prev(current.get_untracked().saturating_sub(1))
                    }
                >
                    "← Previous"
                </Button>

                {
                    let go = go.clone();
                    move || {
                        let go = go.clone();
                        page_items(current.get(), total.get())
                            .into_iter()
                            .map(|item| match item {
                                PageItem::Gap => {
                                    view! { <span class="px-2 text-muted-foreground">"…"</span> }.into_any()
                                }
                                PageItem::Page(p) => {
                                    let go = go.clone();
                                    let is_current = p == current.get_untracked();
                                    view! {
                                        <Button
                                            variant={if is_current { ButtonVariant::Default } else { ButtonVariant::Outline }}
                                            size=ButtonSize::Icon
                                            attr:aria-current={is_current.then_some("page")}
                                            on:click=move |_ev: web_sys::MouseEvent| go(p)
                                        >
                                            {p.to_string()}
                                        </Button>
                                    }
                                    .into_any()
                                }
                            })
                            .collect_view()
                    }
                }

                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    attr:disabled={move || current.get() >= total.get()}
                    on:click={
                        let go_next = go_next.clone();
                        move |_ev: web_sys::MouseEvent| go_next(current.get_untracked() + 1)
                    }
                >
                    "Next →"
                </Button>
            </nav>
        </Show>
    }
}
