//! Page-by-page JSONL reader.

use crate::integration::process_lines;
use crate::model::error::InputError;
use crate::model::{Record, RowDescriptor, RowId};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// One page of rows.
#[derive(Debug)]
pub struct Page {
    /// Rows parsed from this page, malformed lines excluded.
    pub rows: Vec<RowDescriptor<Record>>,
    /// More input remains after this page.
    pub has_more: bool,
}

/// Reads rows from a JSONL stream `page_size` lines at a time.
///
/// Malformed lines are logged and skipped; they still count toward the page size so a
/// page never reads unboundedly far ahead.
///
/// Row ids are unique across all pages. A repeated id is renamed `"<id>.<position>"`.
#[derive(Debug)]
pub struct PagedRowSource<R> {
    reader: R,
    page_size: usize,
    /// Lines consumed so far.
    lines_read: usize,
    /// Rows produced so far.
    rows_read: usize,
    /// Every id handed out so far.
    seen_ids: HashSet<RowId>,
    exhausted: bool,
}

impl PagedRowSource<BufReader<File>> {
    /// Open a JSONL file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn open(path: impl AsRef<Path>, page_size: usize) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file), page_size))
    }
}

impl<R: BufRead> PagedRowSource<R> {
    /// Wrap any buffered reader. A `page_size` of 0 is treated as 1.
    pub fn from_reader(reader: R, page_size: usize) -> Self {
        Self {
            reader,
            page_size: page_size.max(1),
            lines_read: 0,
            rows_read: 0,
            seen_ids: HashSet::new(),
            exhausted: false,
        }
    }

    /// Lines read per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// No further pages.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Rows produced across all pages so far.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Read the next page.
    ///
    /// After the last page, returns an empty page with `has_more == false`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if reading fails.
    pub fn next_page(&mut self) -> Result<Page, InputError> {
        if self.exhausted {
            return Ok(Page {
                rows: Vec::new(),
                has_more: false,
            });
        }

        let first_line = self.lines_read + 1;
        let mut lines = Vec::with_capacity(self.page_size);
        let mut buffer = String::new();
        while lines.len() < self.page_size {
            buffer.clear();
            if self.reader.read_line(&mut buffer)? == 0 {
                break;
            }
            lines.push(buffer.trim_end_matches(['\n', '\r']).to_string());
        }
        self.lines_read += lines.len();

        let has_more = !self.reader.fill_buf()?.is_empty();
        self.exhausted = !has_more;

        let (rows, errors) = process_lines(lines, first_line, self.rows_read);
        for error in &errors {
            warn!(%error, "skipping malformed row");
        }
        let base = self.rows_read;
        let rows: Vec<_> = rows
            .into_iter()
            .enumerate()
            .map(|(offset, row)| self.claim_id(row, base + offset))
            .collect();
        self.rows_read += rows.len();
        debug!(
            rows = rows.len(),
            skipped = errors.len(),
            total = self.rows_read,
            has_more,
            "page read"
        );

        Ok(Page { rows, has_more })
    }

    fn claim_id(&mut self, row: RowDescriptor<Record>, index: usize) -> RowDescriptor<Record> {
        if self.seen_ids.insert(row.id().clone()) {
            return row;
        }
        let mut id = RowId::positional(index, Some(row.id()));
        while self.seen_ids.contains(&id) {
            id = RowId::positional(index, Some(&id));
        }
        debug!(original = %row.id(), renamed = %id, "duplicate row id");
        self.seen_ids.insert(id.clone());
        row.with_id(id)
    }
}
