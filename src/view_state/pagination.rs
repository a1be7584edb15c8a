//! Pagination - when to ask the caller for the next page
//!
//! The coordinator never fetches. It watches the trailing edge of the rendered window and
//! calls the caller's `fetch_next_page` when the edge reaches the end of the loaded rows,
//! more pages exist, and nothing is in flight.
//!
//! Back-pressure is by suppression: while the cursor says a fetch is outstanding, or after a
//! request for the current row count has already been made, further triggers are dropped.
//! A failed fetch is not retried here; the error goes back to the caller.

use crate::model::PaginationCursor;
use tracing::debug;

/// Outcome of one [`PaginationCoordinator::observe`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDecision {
    /// `fetch_next_page` was called.
    Requested,
    /// Nothing is rendered, so there is no trailing edge.
    NoWindow,
    /// The trailing edge is not near the end of the loaded rows.
    NotNearEnd,
    /// The cursor reports no further pages.
    NoMorePages,
    /// A fetch is outstanding.
    InFlight,
    /// A request for this row count was already made.
    AlreadyRequested,
}

/// Decides when to request more rows.
#[derive(Debug, Clone, Default)]
pub struct PaginationCoordinator {
    /// How many rows before the last loaded row the trailing edge may be and still trigger.
    threshold: usize,
    /// Loaded row count at the time of the last request.
    requested_at: Option<usize>,
}

impl PaginationCoordinator {
    /// Coordinator triggering within `threshold` rows of the end.
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            requested_at: None,
        }
    }

    /// Configured trigger distance, in rows.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Whether a request is latched for the current need.
    pub fn is_latched(&self) -> bool {
        self.requested_at.is_some()
    }

    /// Re-arm after a failed fetch so the next observation may request again.
    pub fn reset(&mut self) {
        self.requested_at = None;
    }

    /// Check the trailing edge after a render.
    ///
    /// # Arguments
    /// - `trailing_index`: index of the last rendered row slot (the loader row sits at
    ///   `loaded_rows`), or `None` when nothing rendered
    /// - `loaded_rows`: number of data rows loaded so far
    /// - `cursor`: caller's pagination state for this render
    /// - `fetch_next_page`: called at most once
    ///
    /// # Errors
    /// Returns whatever `fetch_next_page` returns. The request stays latched, so the same
    /// need does not trigger again until rows arrive or [`reset`](Self::reset) is called.
    pub fn observe<E, F>(
        &mut self,
        trailing_index: Option<usize>,
        loaded_rows: usize,
        cursor: PaginationCursor,
        fetch_next_page: F,
    ) -> Result<FetchDecision, E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        if self.requested_at.is_some_and(|n| n != loaded_rows) {
            self.requested_at = None;
        }

        let Some(trailing) = trailing_index else {
            return Ok(FetchDecision::NoWindow);
        };
        let last_loaded = loaded_rows.saturating_sub(1);
        if trailing.saturating_add(self.threshold) < last_loaded {
            return Ok(FetchDecision::NotNearEnd);
        }
        if !cursor.has_next_page {
            return Ok(FetchDecision::NoMorePages);
        }
        if cursor.is_fetching_next_page {
            return Ok(FetchDecision::InFlight);
        }
        if self.requested_at == Some(loaded_rows) {
            return Ok(FetchDecision::AlreadyRequested);
        }

        debug!(trailing, loaded_rows, "requesting next page");
        self.requested_at = Some(loaded_rows);
        fetch_next_page()?;
        Ok(FetchDecision::Requested)
    }
}
