//! Table view-state - one table's rows, window, and per-render decisions
//!
//! `TableViewState` owns the caller's rows and the windowing machinery. Each render pass
//! produces a [`RenderPlan`]: which row slots to draw, with what filler above and below, and
//! which surface tokens to use. Hosts draw the plan, measure what they drew, and feed the
//! measurements back through [`TableViewState::record_measurement`].

use super::measure::to_extent;
use super::pagination::{FetchDecision, PaginationCoordinator};
use super::slice::{SliceChangeNotifier, VirtualSlice};
use super::types::RowKey;
use super::window::{Align, RowWindow, VirtualRow, WindowOptions};
use crate::elevation::{ElevationScope, TableSurfaceTokens};
use crate::model::{PaginationCursor, RowDescriptor, RowId};
use serde::Deserialize;
use tracing::debug;

/// Shown in place of rows when nothing matches.
pub const EMPTY_MESSAGE: &str = "No results match your query";

/// Scroll distance past which the back-to-top affordance appears.
pub const DEFAULT_SCROLL_TOP_MARGIN: usize = 500;

/// Placeholder rows drawn while the first load is in progress.
pub const DEFAULT_SKELETON_ROWS: usize = 10;

/// Row background pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowBackground {
    /// Odd rows raised.
    #[default]
    Stripes,
    /// Every row raised.
    Raised,
    /// No row raised.
    Flat,
}

impl RowBackground {
    /// Whether the row at `index` is drawn on the raised fill.
    pub fn is_raised(self, index: usize) -> bool {
        match self {
            RowBackground::Raised => true,
            RowBackground::Stripes => index % 2 == 1,
            RowBackground::Flat => false,
        }
    }
}

/// Per-table options.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Draw only the window instead of every row.
    pub virtualize_rows: bool,
    /// Window estimate and overscan.
    pub window: WindowOptions,
    /// Rows before the end at which the next page is requested.
    pub fetch_threshold: usize,
    /// Scroll distance past which [`TableViewState::show_back_to_top`] can be true.
    pub scroll_top_margin: usize,
    /// Placeholder rows while loading.
    pub loading_skeleton_rows: usize,
    /// Row striping pattern.
    pub row_background: RowBackground,
    /// Freeze column widths while scrolling. Follows `virtualize_rows` when unset.
    pub lock_columns_on_scroll: Option<bool>,
    /// Scope the table is placed in.
    pub elevation: ElevationScope,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            virtualize_rows: false,
            window: WindowOptions::default(),
            fetch_threshold: 0,
            scroll_top_margin: DEFAULT_SCROLL_TOP_MARGIN,
            loading_skeleton_rows: DEFAULT_SKELETON_ROWS,
            row_background: RowBackground::default(),
            lock_columns_on_scroll: None,
            elevation: ElevationScope::root(),
        }
    }
}

/// What occupies a planned row slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedRowKind {
    /// A caller row.
    Data(RowId),
    /// Trailing row shown while more pages exist.
    Loader,
    /// Placeholder while loading.
    Skeleton,
}

/// One row slot to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRow {
    /// Row slot index; the loader row sits after the last data row.
    pub index: usize,
    /// What occupies the slot.
    pub kind: PlannedRowKind,
    /// Drawn on the raised fill.
    pub raised: bool,
    /// Drawn with the highlight style.
    pub highlighted: bool,
    /// Offset from the top of the content.
    pub start: usize,
    /// Height of the slot.
    pub size: usize,
}

impl PlannedRow {
    fn from_virtual(row: &VirtualRow, background: RowBackground, highlighted: Option<usize>) -> Self {
        let (kind, is_highlighted) = match &row.key {
            RowKey::Row(id) => (PlannedRowKind::Data(id.clone()), highlighted == Some(row.index)),
            RowKey::Loader => (PlannedRowKind::Loader, false),
        };
        Self {
            index: row.index,
            kind,
            raised: background.is_raised(row.index),
            highlighted: is_highlighted,
            start: row.start,
            size: row.size,
        }
    }

    /// Offset of the slot's bottom edge.
    pub fn end(&self) -> usize {
        self.start + self.size
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// Row slots in draw order.
    pub rows: Vec<PlannedRow>,
    /// Filler height above the first planned row.
    pub padding_top: usize,
    /// Filler height below the last planned row.
    pub padding_bottom: usize,
    /// Token names for the table's elevation.
    pub surface: TableSurfaceTokens,
    /// Column widths should stay fixed for this pass.
    pub columns_locked: bool,
    /// Nothing to draw and not loading: show [`EMPTY_MESSAGE`].
    pub empty: bool,
}

/// State for one windowed table.
#[derive(Debug, Clone)]
pub struct TableViewState<P> {
    options: TableOptions,
    rows: Vec<RowDescriptor<P>>,
    window: RowWindow,
    notifier: SliceChangeNotifier,
    pagination: PaginationCoordinator,
    cursor: PaginationCursor,
    loading: bool,
    /// Position and id of the highlighted row. The position disambiguates duplicate ids.
    highlighted: Option<(usize, RowId)>,
    is_scrolling: bool,
    /// Last window row of the most recent render pass.
    trailing_index: Option<usize>,
}

impl<P> TableViewState<P> {
    /// Empty table with `options`.
    pub fn new(options: TableOptions) -> Self {
        Self {
            window: RowWindow::new(options.window),
            pagination: PaginationCoordinator::new(options.fetch_threshold),
            options,
            rows: Vec::new(),
            notifier: SliceChangeNotifier::new(),
            cursor: PaginationCursor::default(),
            loading: false,
            highlighted: None,
            is_scrolling: false,
            trailing_index: None,
        }
    }

    /// Current options.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Underlying row window.
    pub fn window(&self) -> &RowWindow {
        &self.window
    }

    /// Loaded data rows.
    pub fn rows(&self) -> &[RowDescriptor<P>] {
        &self.rows
    }

    /// Data row at `index`.
    pub fn row(&self, index: usize) -> Option<&RowDescriptor<P>> {
        self.rows.get(index)
    }

    /// Number of data rows (the loader row is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// No data rows loaded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace all rows.
    ///
    /// The highlight follows its row id into the new set, or is cleared if the id is gone.
    pub fn set_rows(&mut self, rows: Vec<RowDescriptor<P>>) {
        self.rows = rows;
        if let Some((index, id)) = self.highlighted.take() {
            let still_there = self.rows.get(index).is_some_and(|row| *row.id() == id);
            self.highlighted = if still_there {
                Some((index, id))
            } else {
                self.position_of(&id).map(|index| (index, id))
            };
        }
        self.sync_window();
    }

    /// Append a page of rows.
    pub fn append_rows(&mut self, rows: impl IntoIterator<Item = RowDescriptor<P>>) {
        let before = self.rows.len();
        self.rows.extend(rows);
        debug!(before, after = self.rows.len(), "rows appended");
        self.sync_window();
    }

    /// Current pagination cursor.
    pub fn cursor(&self) -> PaginationCursor {
        self.cursor
    }

    /// Update pagination state. Adds or removes the loader row as needed.
    pub fn set_cursor(&mut self, cursor: PaginationCursor) {
        let loader_changed = cursor.has_next_page != self.cursor.has_next_page;
        self.cursor = cursor;
        if loader_changed {
            self.sync_window();
        }
    }

    /// Whether the first load is still running.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Show skeleton rows instead of data while `loading`.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether only the window is drawn.
    pub fn virtualize_rows(&self) -> bool {
        self.options.virtualize_rows
    }

    /// Switch between windowed and full rendering.
    pub fn set_virtualize_rows(&mut self, virtualize_rows: bool) {
        self.options.virtualize_rows = virtualize_rows;
    }

    /// Body height, in host units.
    pub fn set_viewport_height(&mut self, height: usize) {
        self.window.set_viewport_height(height);
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> usize {
        self.window.scroll_offset()
    }

    /// Scroll to an absolute offset, clamped.
    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.window.set_scroll_offset(offset);
    }

    /// Scroll by a signed delta, clamped.
    pub fn scroll_by(&mut self, delta: isize) {
        self.window.scroll_by(delta);
    }

    /// Bring the row at `index` into view.
    pub fn scroll_to_row(&mut self, index: usize, align: Align) {
        self.window.scroll_to_index(index, align);
    }

    /// Whether the user is scrolling.
    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// Mirror of the scroll activity detector's state.
    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        self.is_scrolling = is_scrolling;
    }

    /// Id of the highlighted row.
    pub fn highlighted_row(&self) -> Option<&RowId> {
        self.highlighted.as_ref().map(|(_, id)| id)
    }

    /// Position of the highlighted row.
    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted.as_ref().map(|(index, _)| *index)
    }

    /// Highlight the first row carrying `id`. An id that matches no row clears the highlight.
    pub fn set_highlighted_row(&mut self, id: Option<RowId>) {
        self.highlighted = id.and_then(|id| self.position_of(&id).map(|index| (index, id)));
    }

    /// Move the highlight by `delta` rows and bring it into view.
    ///
    /// With nothing highlighted, the first row is highlighted. No-op without rows.
    pub fn move_highlight(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let next = match self.highlighted_index() {
            None => 0,
            Some(i) if delta < 0 => i.saturating_sub(delta.unsigned_abs()),
            Some(i) => i.saturating_add(delta as usize).min(self.rows.len() - 1),
        };
        self.highlighted = Some((next, self.rows[next].id().clone()));
        self.window.scroll_to_index(next, Align::Auto);
    }

    /// Record the measured height of the row slot at `index`.
    ///
    /// # Returns
    /// The scroll adjustment the window applied to keep content anchored.
    pub fn record_measurement(&mut self, index: usize, px: f64) -> isize {
        if let Some(row) = self.rows.get_mut(index).filter(|_| !px.is_infinite()) {
            row.set_measured_height(to_extent(px));
        }
        self.window.measure(index, px)
    }

    /// Columns keep their widths while the user is scrolling a virtualized table.
    pub fn columns_locked(&self) -> bool {
        self.options
            .lock_columns_on_scroll
            .unwrap_or(self.options.virtualize_rows)
            && self.is_scrolling
    }

    /// Plan one render.
    ///
    /// `on_slice_change` runs when the window's boundary rows differ from the previous pass
    /// and virtualization is on.
    pub fn render_pass<F>(&mut self, on_slice_change: F) -> RenderPlan
    where
        F: FnOnce(Option<&VirtualSlice>),
    {
        let virtual_rows = self.window.virtual_rows();
        self.trailing_index = virtual_rows.last().map(|row| row.index);
        self.notifier
            .observe(&virtual_rows, self.options.virtualize_rows, on_slice_change);

        let background = self.options.row_background;
        let highlighted = self.highlighted_index();
        let (rows, padding_top, padding_bottom) = if self.loading {
            let size = self.options.window.estimate_size;
            let skeleton: Vec<PlannedRow> = (0..self.options.loading_skeleton_rows)
                .map(|index| PlannedRow {
                    index,
                    kind: PlannedRowKind::Skeleton,
                    raised: background.is_raised(index),
                    highlighted: false,
                    start: index * size,
                    size,
                })
                .collect();
            (skeleton, 0, 0)
        } else if self.options.virtualize_rows {
            let (top, bottom) = self.window.padding(&virtual_rows);
            let planned: Vec<PlannedRow> = virtual_rows
                .iter()
                .map(|row| PlannedRow::from_virtual(row, background, highlighted))
                .collect();
            (planned, top, bottom)
        } else {
            let planned: Vec<PlannedRow> = (0..self.rows.len())
                .map(|index| PlannedRow {
                    index,
                    kind: PlannedRowKind::Data(self.rows[index].id().clone()),
                    raised: background.is_raised(index),
                    highlighted: highlighted == Some(index),
                    start: self.window.row_start(index).unwrap_or(0),
                    size: self.window.row_size(index).unwrap_or(0),
                })
                .collect();
            (planned, 0, 0)
        };

        let empty = rows.is_empty() && !self.loading;
        RenderPlan {
            rows,
            padding_top,
            padding_bottom,
            surface: TableSurfaceTokens::for_level(self.options.elevation.table_level()),
            columns_locked: self.columns_locked(),
            empty,
        }
    }

    /// Ask for the next page if the last render pass reached the end of the loaded rows.
    ///
    /// # Errors
    /// Whatever `fetch_next_page` returns; see [`PaginationCoordinator::observe`].
    pub fn maybe_fetch_next_page<E, F>(&mut self, fetch_next_page: F) -> Result<FetchDecision, E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        self.pagination
            .observe(self.trailing_index, self.rows.len(), self.cursor, fetch_next_page)
    }

    /// Re-arm pagination after a failed fetch.
    pub fn reset_pagination(&mut self) {
        self.pagination.reset();
    }

    /// Whether the back-to-top affordance should be visible.
    pub fn show_back_to_top(&self, hovered: bool) -> bool {
        hovered && self.window.scroll_offset() > self.options.scroll_top_margin
    }

    /// Scroll to the top.
    pub fn back_to_top(&mut self) {
        self.window.set_scroll_offset(0);
    }

    fn position_of(&self, id: &RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == id)
    }

    fn sync_window(&mut self) {
        let mut keys: Vec<RowKey> = self
            .rows
            .iter()
            .map(|row| RowKey::Row(row.id().clone()))
            .collect();
        if self.cursor.has_next_page {
            keys.push(RowKey::Loader);
        }
        self.window.set_rows(keys);
    }
}

impl<P> Default for TableViewState<P> {
    fn default() -> Self {
        Self::new(TableOptions::default())
    }
}
