/// Identifies one cacheable list result: a page of the list filtered by a
/// search term. Comparison is exact; `"ab"` and `"AB"` are different keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct QueryKey {
    pub page: u32,
    pub search: String,
}

impl QueryKey {
    pub fn new(page: u32, search: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            search: search.into(),
        }
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "notes[page={}, search={:?}]", self.page, self.search)
    }
}
