//! Row identifiers and descriptors.
//!
//! Identifiers validate non-empty strings at construction time. The raw constructor is
//! never exported; use [`RowId::new`] or [`RowId::positional`].

use std::fmt;
use thiserror::Error;

/// Stable identifier of one table row.
///
/// Used as the measurement cache key, so a row keeps its measured height when other rows
/// are inserted before it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(String);

/// Error returned when a row id is empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row id must be a non-empty string")]
pub struct InvalidRowId;

impl RowId {
    /// Smart constructor: validates non-empty id.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gridwin::model::RowId;
    /// assert!(RowId::new("cluster-7").is_ok());
    /// assert!(RowId::new("").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidRowId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidRowId)
        } else {
            Ok(Self(raw))
        }
    }

    /// Fallback id for rows whose data carries no usable id.
    ///
    /// Nested rows are prefixed with their parent's id: `"<parent>.<index>"`.
    pub fn positional(index: usize, parent: Option<&RowId>) -> Self {
        match parent {
            Some(parent) => Self(format!("{}.{}", parent.0, index)),
            None => Self(index.to_string()),
        }
    }

    /// The id as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of caller data plus its last measured height.
///
/// The height is `None` until the row has been rendered and measured; until then the
/// window uses its estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDescriptor<P> {
    id: RowId,
    payload: P,
    measured_height: Option<usize>,
}

impl<P> RowDescriptor<P> {
    /// Create an unmeasured row.
    pub fn new(id: RowId, payload: P) -> Self {
        Self {
            id,
            payload,
            measured_height: None,
        }
    }

    /// Row id.
    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Caller data for the row.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Last measured height, if the row has ever been measured.
    pub fn measured_height(&self) -> Option<usize> {
        self.measured_height
    }

    /// Same row under a different id.
    pub(crate) fn with_id(mut self, id: RowId) -> Self {
        self.id = id;
        self
    }

    /// Record a measurement. Only the table view-state calls this, alongside the window's
    /// estimate cache.
    pub(crate) fn set_measured_height(&mut self, height: usize) {
        self.measured_height = Some(height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty() {
        assert_eq!(RowId::new(""), Err(InvalidRowId));
    }

    #[test]
    fn new_accepts_any_non_empty_string() {
        let id = RowId::new(" ").unwrap();
        assert_eq!(id.as_str(), " ");
    }

    #[test]
    fn positional_without_parent_is_index() {
        assert_eq!(RowId::positional(12, None).as_str(), "12");
    }

    #[test]
    fn positional_with_parent_is_prefixed() {
        let parent = RowId::new("svc").unwrap();
        assert_eq!(RowId::positional(3, Some(&parent)).as_str(), "svc.3");
    }

    #[test]
    fn display_matches_as_str() {
        let id = RowId::new("abc").unwrap();
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn descriptor_starts_unmeasured() {
        let row = RowDescriptor::new(RowId::new("a").unwrap(), 5u32);
        assert_eq!(row.measured_height(), None);
        assert_eq!(*row.payload(), 5);
    }

    #[test]
    fn descriptor_records_measurement() {
        let mut row = RowDescriptor::new(RowId::new("a").unwrap(), ());
        row.set_measured_height(40);
        assert_eq!(row.measured_height(), Some(40));
    }
}
