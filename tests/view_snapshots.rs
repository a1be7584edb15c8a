//! Snapshot tests for the table widget
//!
//! Uses insta + ratatui TestBackend to verify rendering output doesn't regress.

use gridwin::model::{column_names, PaginationCursor, Record, RowDescriptor, RowId};
use gridwin::view::{body_height, build_rows, ColorConfig, ColumnLayout, TableStyles, TableView};
use gridwin::view_state::{TableOptions, TableViewState, WindowOptions};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Modifier;
use ratatui::Terminal;
use serde_json::json;
use std::collections::HashSet;

// ===== Test Helpers =====

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Empty lines are removed to keep snapshots clean.
fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("test rows must be objects"),
    }
}

fn greek() -> Vec<RowDescriptor<Record>> {
    [("a", "alpha"), ("b", "beta"), ("c", "gamma")]
        .into_iter()
        .map(|(id, name)| {
            RowDescriptor::new(
                RowId::new(id).unwrap(),
                record(json!({"id": id, "name": name})),
            )
        })
        .collect()
}

fn state(rows: Vec<RowDescriptor<Record>>) -> TableViewState<Record> {
    let mut state = TableViewState::new(TableOptions {
        virtualize_rows: true,
        window: WindowOptions {
            estimate_size: 1,
            overscan: 0,
        },
        ..TableOptions::default()
    });
    state.set_rows(rows);
    state
}

fn render(
    state: &mut TableViewState<Record>,
    width: u16,
    height: u16,
    status: &str,
    back_to_top: bool,
) -> Buffer {
    state.set_viewport_height(usize::from(body_height(height)));
    let names = column_names(state.rows().iter().map(|row| row.payload()));
    let columns = ColumnLayout::compute(&names, width);
    let plan = state.render_pass(|_| {});
    let rows = build_rows(&plan, state, &columns, &HashSet::new(), width);
    let styles = TableStyles::from_tokens(plan.surface, ColorConfig::disabled());

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| {
            let view = TableView {
                plan: &plan,
                rows: &rows,
                columns: &columns,
                styles,
                scroll_offset: state.scroll_offset(),
                status,
                back_to_top,
            };
            frame.render_widget(view, frame.area());
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

// ===== Snapshots =====

#[test]
fn snapshot_table_with_rows() {
    let mut state = state(greek());
    let buffer = render(&mut state, 24, 6, "3 rows", false);
    insta::assert_snapshot!(buffer_to_string(&buffer), @r"
    id          name
    a           alpha
    b           beta
    c           gamma
    3 rows
    ");
}

#[test]
fn snapshot_loader_row_after_data() {
    let mut state = state(greek().into_iter().take(2).collect());
    state.set_cursor(PaginationCursor::more_available());
    let buffer = render(&mut state, 24, 6, "2+ rows", false);
    insta::assert_snapshot!(buffer_to_string(&buffer), @r"
    id          name
    a           alpha
    b           beta
    Loading...
    2+ rows
    ");
}

#[test]
fn snapshot_skeleton_while_loading() {
    let mut state = state(Vec::new());
    state.set_loading(true);
    let buffer = render(&mut state, 20, 6, "loading", false);
    insta::assert_snapshot!(buffer_to_string(&buffer), @r"
    ░░░░
    ░░░░
    ░░░░
    ░░░░
    loading
    ");
}

#[test]
fn scrolled_table_starts_at_offset() {
    let mut state = state(greek());
    state.set_viewport_height(2);
    state.set_scroll_offset(1);
    let buffer = render(&mut state, 24, 4, "", false);
    assert_eq!(
        buffer_to_string(&buffer),
        "id          name\nb           beta\nc           gamma"
    );
}

#[test]
fn empty_table_centers_message() {
    let mut state = state(Vec::new());
    let buffer = render(&mut state, 30, 5, "0 rows", false);
    assert_eq!(
        buffer_to_string(&buffer),
        " No results match your query\n0 rows"
    );
}

#[test]
fn back_to_top_hint_is_right_aligned() {
    let mut state = state(greek());
    let buffer = render(&mut state, 24, 6, "x", true);
    let text = buffer_to_string(&buffer);
    assert_eq!(text.lines().last(), Some("x        [g] Back to top"));
}

#[test]
fn highlighted_row_is_reversed_without_colors() {
    let mut state = state(greek());
    state.set_highlighted_row(Some(RowId::new("b").unwrap()));
    let buffer = render(&mut state, 24, 6, "", false);
    // header on line 0, rows a/b/c on lines 1..=3
    assert!(buffer[(0, 2)].modifier.contains(Modifier::REVERSED));
    assert!(!buffer[(0, 1)].modifier.contains(Modifier::REVERSED));
}
