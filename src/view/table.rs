//! Table widget for the terminal host.
//!
//! Rows are laid out like a CSS grid with `display: contents` rows: each cell is placed
//! directly in the column grid and the row has no box of its own. Its height is the tallest
//! cell, which is what [`RowNode`] reports through the children-range path of the
//! measurement service.

use super::styles::TableStyles;
use crate::model::{cell_text, Record, RowId};
use crate::view_state::measure::{measure_row_height, LayoutNode};
use crate::view_state::table::EMPTY_MESSAGE;
use crate::view_state::{PlannedRow, PlannedRowKind, RenderPlan, TableViewState};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use std::collections::HashSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Lines a single cell may wrap to.
pub const MAX_CELL_LINES: usize = 3;
/// Lines of expanded details shown under a row.
pub const MAX_EXPANDER_LINES: usize = 12;
/// Narrowest column before columns start being dropped.
pub const MIN_COLUMN_WIDTH: u16 = 6;

/// Text of the trailing loader row.
pub const LOADER_TEXT: &str = "Loading...";
/// Placeholder drawn in skeleton rows.
pub const SKELETON_TEXT: &str = "░░░░";
/// Right-aligned status hint shown when scrolled far enough.
pub const BACK_TO_TOP_HINT: &str = "[g] Back to top";

/// Body height for a table drawn in an area `area_height` tall (header and status take a
/// line each).
pub fn body_height(area_height: u16) -> u16 {
    area_height.saturating_sub(2)
}

/// Greedy wrap by display width.
///
/// Control characters become spaces. Empty text is one empty line. Output stops at
/// `max_lines`.
pub fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines = vec![String::new()];
    if width == 0 {
        return lines;
    }
    let mut current_width = 0;
    for c in text.chars() {
        let c = if c.is_control() { ' ' } else { c };
        let w = c.width().unwrap_or(0);
        if current_width + w > width && current_width > 0 {
            if lines.len() == max_lines {
                break;
            }
            lines.push(String::new());
            current_width = 0;
        }
        if let Some(line) = lines.last_mut() {
            line.push(c);
        }
        current_width += w;
    }
    lines
}

fn pad_to(text: &str, width: usize) -> String {
    let used = text.width();
    let mut out = String::with_capacity(text.len() + width.saturating_sub(used));
    out.push_str(text);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}

// ===== Columns =====

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header text.
    pub name: String,
    /// Width in cells, separator included.
    pub width: u16,
}

impl Column {
    /// Width available for text; one cell of gap is kept on the right.
    pub fn content_width(&self) -> usize {
        usize::from(self.width.saturating_sub(1)).max(1)
    }
}

/// Column grid for one terminal width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    columns: Vec<Column>,
}

impl ColumnLayout {
    /// Split `total_width` evenly across `names`, dropping trailing columns that would be
    /// narrower than [`MIN_COLUMN_WIDTH`]. No names gives a single unnamed column.
    pub fn compute(names: &[String], total_width: u16) -> Self {
        if total_width == 0 {
            return Self::default();
        }
        let fit = usize::from((total_width / MIN_COLUMN_WIDTH).max(1));
        let count = names.len().clamp(1, fit);
        let base = total_width / count as u16;
        let extra = total_width % count as u16;

        let columns = (0..count)
            .map(|i| Column {
                name: names.get(i).cloned().unwrap_or_default(),
                width: base + u16::from((i as u16) < extra),
            })
            .collect();
        Self { columns }
    }

    /// Columns left to right.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// No columns laid out yet.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn line(&self, cells: &[&str]) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| pad_to(cells.get(i).copied().unwrap_or(""), usize::from(column.width)))
            .collect()
    }

    /// Header line, each name padded to its column.
    pub fn header(&self) -> String {
        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        self.line(&names)
    }
}

// ===== Measurement nodes =====

/// A table row whose cells sit in the parent grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowNode {
    /// Wrapped line count of each cell.
    pub cell_lines: Vec<usize>,
}

impl LayoutNode for RowNode {
    fn box_height(&self) -> f64 {
        0.0
    }

    fn has_children(&self) -> bool {
        !self.cell_lines.is_empty()
    }

    fn children_range_height(&self) -> f64 {
        // cells all start on the row's first line
        self.cell_lines.iter().copied().max().unwrap_or(0) as f64
    }
}

/// Expanded details row: an ordinary box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpanderNode {
    /// Line count.
    pub lines: usize,
}

impl LayoutNode for ExpanderNode {
    fn box_height(&self) -> f64 {
        self.lines as f64
    }

    fn has_children(&self) -> bool {
        self.lines > 0
    }

    fn children_range_height(&self) -> f64 {
        self.lines as f64
    }
}

// ===== Rendered rows =====

/// A planned row turned into terminal lines.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    /// Row slot index.
    pub index: usize,
    /// What the slot holds.
    pub kind: PlannedRowKind,
    /// Drawn on the raised fill.
    pub raised: bool,
    /// Drawn with the highlight style.
    pub highlighted: bool,
    /// Planned offset of the row's top edge.
    pub start: usize,
    /// Row lines followed by expander lines.
    pub lines: Vec<String>,
    /// Measured height of row plus expander.
    pub height: f64,
}

impl RenderedRow {
    /// Skeleton rows are placeholders and never feed the window.
    pub fn is_measurable(&self) -> bool {
        !matches!(self.kind, PlannedRowKind::Skeleton)
    }
}

fn expander_lines(record: &Record, width: usize) -> Vec<String> {
    let pretty = serde_json::to_string_pretty(record).unwrap_or_default();
    pretty
        .lines()
        .take(MAX_EXPANDER_LINES)
        .map(|line| {
            let text = format!("  │ {}", line);
            wrap_text(&text, width, 1).swap_remove(0)
        })
        .collect()
}

fn render_row(
    planned: &PlannedRow,
    state: &TableViewState<Record>,
    columns: &ColumnLayout,
    expanded: &HashSet<RowId>,
    total_width: usize,
) -> RenderedRow {
    let (lines, height) = match &planned.kind {
        PlannedRowKind::Skeleton => {
            let cells: Vec<String> = columns
                .columns()
                .iter()
                .map(|c| wrap_text(SKELETON_TEXT, c.content_width(), 1).swap_remove(0))
                .collect();
            let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
            (vec![columns.line(&refs)], 1.0)
        }
        PlannedRowKind::Loader => {
            let node = RowNode { cell_lines: vec![1] };
            let height = measure_row_height::<dyn LayoutNode>(Some(&node), None);
            (vec![LOADER_TEXT.to_string()], height)
        }
        PlannedRowKind::Data(id) => {
            let record = state.row(planned.index).map(|row| row.payload());
            let wrapped: Vec<Vec<String>> = columns
                .columns()
                .iter()
                .map(|c| {
                    let value = record.and_then(|r| r.get(&c.name));
                    wrap_text(&cell_text(value), c.content_width(), MAX_CELL_LINES)
                })
                .collect();
            let node = RowNode {
                cell_lines: wrapped.iter().map(Vec::len).collect(),
            };

            let row_lines = node.cell_lines.iter().copied().max().unwrap_or(0);
            let mut lines: Vec<String> = (0..row_lines)
                .map(|k| {
                    let cells: Vec<&str> = wrapped
                        .iter()
                        .map(|cell| cell.get(k).map(String::as_str).unwrap_or(""))
                        .collect();
                    columns.line(&cells)
                })
                .collect();

            let details = match record {
                Some(record) if expanded.contains(id) => expander_lines(record, total_width),
                _ => Vec::new(),
            };
            let expander = (!details.is_empty()).then(|| ExpanderNode {
                lines: details.len(),
            });
            let height = measure_row_height::<dyn LayoutNode>(
                Some(&node),
                expander.as_ref().map(|e| e as &dyn LayoutNode),
            );
            lines.extend(details);
            (lines, height)
        }
    };

    RenderedRow {
        index: planned.index,
        kind: planned.kind.clone(),
        raised: planned.raised,
        highlighted: planned.highlighted,
        start: planned.start,
        lines,
        height,
    }
}

/// Turn a plan into terminal lines.
///
/// A virtualized plan is already limited to the window, so every row is built (overscan
/// rows included, so they get measured). An unvirtualized plan holds every row; only rows
/// overlapping the viewport are built.
pub fn build_rows(
    plan: &RenderPlan,
    state: &TableViewState<Record>,
    columns: &ColumnLayout,
    expanded: &HashSet<RowId>,
    total_width: u16,
) -> Vec<RenderedRow> {
    let offset = state.scroll_offset();
    let bottom = offset + state.window().viewport_height();
    let clip = !state.virtualize_rows() && !state.is_loading();
    plan.rows
        .iter()
        .filter(|row| !clip || (row.end() > offset && row.start < bottom))
        .map(|row| render_row(row, state, columns, expanded, usize::from(total_width)))
        .collect()
}

// ===== Widget =====

/// Draws a planned table: header, body, status line.
pub struct TableView<'a> {
    /// Plan from the render pass.
    pub plan: &'a RenderPlan,
    /// Laid-out rows of the plan.
    pub rows: &'a [RenderedRow],
    /// Column widths.
    pub columns: &'a ColumnLayout,
    /// Resolved styles.
    pub styles: TableStyles,
    /// Current scroll offset, in lines.
    pub scroll_offset: usize,
    /// Status line text.
    pub status: &'a str,
    /// Show the back-to-top hint.
    pub back_to_top: bool,
}

impl Widget for TableView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = usize::from(area.width);
        buf.set_style(area, self.styles.body);
        buf.set_stringn(area.x, area.y, self.columns.header(), width, self.styles.header);

        let body = Rect {
            x: area.x,
            y: area.y.saturating_add(1),
            width: area.width,
            height: body_height(area.height),
        };

        if self.plan.empty {
            if body.height > 0 {
                let text_width = EMPTY_MESSAGE.width() as u16;
                let x = body.x + body.width.saturating_sub(text_width) / 2;
                let y = body.y + body.height / 2;
                buf.set_stringn(x, y, EMPTY_MESSAGE, width, self.styles.muted);
            }
        } else if let Some(first) = self.rows.first() {
            let origin = match first.kind {
                PlannedRowKind::Skeleton => 0,
                _ => self.scroll_offset as isize,
            };
            let mut y = first.start as isize - origin;
            for row in self.rows {
                let style = self.styles.row(row.raised, row.highlighted);
                for line in &row.lines {
                    if y >= 0 && y < body.height as isize {
                        let line_y = body.y + y as u16;
                        buf.set_style(Rect::new(body.x, line_y, body.width, 1), style);
                        buf.set_stringn(body.x, line_y, line, width, style);
                    }
                    y += 1;
                }
            }
        }

        if area.height >= 2 {
            let status_y = area.bottom() - 1;
            buf.set_stringn(area.x, status_y, self.status, width, self.styles.muted);
            if self.back_to_top {
                let hint_width = BACK_TO_TOP_HINT.width() as u16;
                if hint_width <= area.width {
                    let x = area.right() - hint_width;
                    buf.set_stringn(x, status_y, BACK_TO_TOP_HINT, width, self.styles.header);
                }
            }
        }
    }
}
