//! Caller-owned pagination state.

/// Pagination state supplied by the caller on every render.
///
/// Read-only to the windowing core: the core never fetches, it only signals intent through
/// the caller's `fetch_next_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationCursor {
    /// More rows exist beyond the loaded set.
    pub has_next_page: bool,
    /// A fetch for the next page is outstanding.
    pub is_fetching_next_page: bool,
}

impl PaginationCursor {
    /// Cursor for a fully loaded data set.
    pub fn complete() -> Self {
        Self::default()
    }

    /// Cursor with more pages available and nothing in flight.
    pub fn more_available() -> Self {
        Self {
            has_next_page: true,
            is_fetching_next_page: false,
        }
    }

    /// Same cursor with a fetch marked in flight.
    pub fn fetching(self) -> Self {
        Self {
            is_fetching_next_page: true,
            ..self
        }
    }

    /// True when a new fetch may be started.
    pub fn can_fetch(&self) -> bool {
        self.has_next_page && !self.is_fetching_next_page
    }
}
