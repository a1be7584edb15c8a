//! Visible slice and boundary change notification
//!
//! A virtualizer recomputes its rows on every scroll tick even when the first and last
//! rows did not change. [`SliceChangeNotifier`] turns that stream into one callback per
//! actual boundary change, which is what prefetchers want.

use super::window::{RowIdentity, VirtualRow};
use tracing::debug;

/// Boundary rows of the materialized window.
///
/// # Invariants
/// - `start.index <= end.index`
/// - both rows come from the same `virtual_rows()` result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualSlice {
    /// First materialized row.
    pub start: VirtualRow,
    /// Last materialized row.
    pub end: VirtualRow,
}

impl VirtualSlice {
    /// Slice of an ascending run of virtual rows. `None` for an empty run.
    pub fn from_rows(rows: &[VirtualRow]) -> Option<Self> {
        let (start, end) = (rows.first()?, rows.last()?);
        debug_assert!(start.index <= end.index, "virtual rows must be ascending");
        Some(Self {
            start: start.clone(),
            end: end.clone(),
        })
    }

    /// Number of rows in the slice (inclusive bounds).
    pub fn len(&self) -> usize {
        self.end.index - self.start.index + 1
    }

    /// A slice always holds at least one row.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `index` lies inside the slice.
    pub fn contains(&self, index: usize) -> bool {
        (self.start.index..=self.end.index).contains(&index)
    }

    /// Every index in the slice, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        self.start.index..=self.end.index
    }
}

type Boundary = (RowIdentity, RowIdentity);

fn boundary(rows: &[VirtualRow]) -> Option<Boundary> {
    Some((rows.first()?.identity(), rows.last()?.identity()))
}

/// Remembers the previous render's boundary and reports changes.
#[derive(Debug, Clone, Default)]
pub struct SliceChangeNotifier {
    previous: Option<Boundary>,
}

impl SliceChangeNotifier {
    /// Notifier with no previous boundary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare this render's rows with the previous render's.
    ///
    /// With virtualization disabled there is no slice to report: the callback never runs
    /// and the remembered boundary is forgotten, so re-enabling reports the first slice.
    ///
    /// # Returns
    /// `true` when `on_change` was invoked.
    pub fn observe<F>(&mut self, rows: &[VirtualRow], virtualize_rows: bool, on_change: F) -> bool
    where
        F: FnOnce(Option<&VirtualSlice>),
    {
        if !virtualize_rows {
            self.previous = None;
            return false;
        }

        let current = boundary(rows);
        if current == self.previous {
            return false;
        }

        let slice = VirtualSlice::from_rows(rows);
        debug!(
            start = slice.as_ref().map(|s| s.start.index),
            end = slice.as_ref().map(|s| s.end.index),
            "virtual slice changed"
        );
        self.previous = current;
        on_change(slice.as_ref());
        true
    }
}

/// Run `notifier` for one render. Hook-style entry point for callers that keep the
/// notifier next to their other per-table state.
pub fn use_on_virtual_slice_change<F>(
    notifier: &mut SliceChangeNotifier,
    virtual_rows: &[VirtualRow],
    virtualize_rows: bool,
    on_virtual_slice_change: Option<F>,
) -> bool
where
    F: FnOnce(Option<&VirtualSlice>),
{
    notifier.observe(virtual_rows, virtualize_rows, |slice| {
        if let Some(callback) = on_virtual_slice_change {
            callback(slice);
        }
    })
}
