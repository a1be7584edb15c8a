//! Core view-state types

use crate::model::RowId;
use std::fmt;

/// Key of one slot in the window.
///
/// Data rows are keyed by their id so a measurement follows the row when rows are inserted
/// or removed before it. The loader row has a single fixed key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKey {
    /// A caller data row.
    Row(RowId),
    /// The trailing "Loading" row shown while more pages exist.
    Loader,
}

impl RowKey {
    /// The trailing loader slot.
    pub fn is_loader(&self) -> bool {
        matches!(self, RowKey::Loader)
    }

    /// Row id of a data slot.
    pub fn row_id(&self) -> Option<&RowId> {
        match self {
            RowKey::Row(id) => Some(id),
            RowKey::Loader => None,
        }
    }
}

impl From<RowId> for RowKey {
    fn from(id: RowId) -> Self {
        RowKey::Row(id)
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Row(id) => write!(f, "{}", id),
            RowKey::Loader => f.write_str("<loader>"),
        }
    }
}
