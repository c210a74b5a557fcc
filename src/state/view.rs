use crate::query::QueryKey;

/// Page, search and modal state for the notes screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ViewState {
    page: u32,
    raw_search: String,
    debounced_search: String,
    modal_open: bool,
    /// Bumped on every `open_modal`, so late completions can tell whether
    /// the modal they were submitted from is still the one on screen.
    modal_session: u64,
    /// From the last successful fetch of the displayed key.
    total_pages: Option<u32>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            raw_search: String::new(),
            debounced_search: String::new(),
            modal_open: false,
            modal_session: 0,
            total_pages: None,
        }
    }
}

impl ViewState {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn raw_search(&self) -> &str {
        &self.raw_search
    }

    pub fn debounced_search(&self) -> &str {
        &self.debounced_search
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn modal_session(&self) -> u64 {
        self.modal_session
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    pub fn query_key(&self) -> QueryKey {
        QueryKey::new(self.page, self.debounced_search.clone())
    }

    /// Keystroke-level update; the list does not change until the debounced
    /// term does.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.raw_search = text.into();
    }

    /// A settled search term arrived. Returns whether it differed; a new term
    /// always starts from the first page.
    pub fn apply_debounced_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.debounced_search {
            return false;
        }
        self.debounced_search = term;
        self.page = 1;
        true
    }

    fn last_page(&self) -> u32 {
        self.total_pages.unwrap_or(1).max(1)
    }

    /// Move to page `n`, clamped to the pages the last fetch reported.
    /// Returns the page actually selected.
    pub fn set_page(&mut self, n: u32) -> u32 {
        let clamped = n.clamp(1, self.last_page());
        if clamped != n {
            tracing::debug!(requested = n, page = clamped, "page request clamped");
        }
        self.page = clamped;
        clamped
    }

    /// Record the page count from a successful fetch of the displayed key.
    /// When the list shrank below the current page, step back to the new
    /// last page.
    pub fn record_total_pages(&mut self, total: u32) {
        self.total_pages = Some(total);
        if total > 0 && self.page > total {
            self.page = total;
        }
    }

    pub fn open_modal(&mut self) {
        if !self.modal_open {
            self.modal_open = true;
            self.modal_session += 1;
        }
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    /// Close only if the modal is still showing the given session.
    pub fn close_modal_session(&mut self, session: u64) -> bool {
        if self.modal_open && self.modal_session == session {
            self.modal_open = false;
            true
        } else {
            false
        }
    }
}
