//! TUI rendering and terminal management (impure shell)
//!
//! Owns the terminal, the paged row source and the table view state. Each frame runs the
//! view-state render pass, measures what it drew, and feeds the measurements back.

mod styles;
pub mod table;

pub use styles::{token_color, ColorConfig, TableStyles};
pub use table::{
    body_height, build_rows, wrap_text, Column, ColumnLayout, ExpanderNode, RenderedRow,
    RowNode, TableView, BACK_TO_TOP_HINT,
};

use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::model::{column_names, InputError, KeyAction, PaginationCursor, Record, RowId};
use crate::source::{Page, PagedRowSource};
use crate::view_state::{
    use_is_scrolling, IsScrollingOptions, RenderPlan, ScrollActivity, TableViewState,
};
use crossterm::{
    event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::layout::{Position, Rect};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Scroll container id for the table body.
pub const TABLE_PANE: &str = "table";

/// Redraw interval when nothing is pending.
const IDLE_TICK: Duration = Duration::from_millis(500);

/// Lines per mouse wheel notch.
const WHEEL_STEP: isize = 3;

/// Render passes per frame. The second pass lets rows measured in the first settle.
const MEASURE_PASSES: usize = 2;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend, and over the reader so tests
/// can feed rows from memory.
pub struct TuiApp<B, R>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    state: TableViewState<Record>,
    source: PagedRowSource<R>,
    key_bindings: KeyBindings,
    activity: ScrollActivity<&'static str>,
    colors: ColorConfig,
    /// Every column name seen so far, in first-seen order.
    column_names: Vec<String>,
    columns: ColumnLayout,
    expanded: HashSet<RowId>,
    /// Mouse is over the table.
    hovered: bool,
    /// Last rendered table area (for mouse hit testing)
    last_area: Option<Rect>,
    /// First and last window index from the last slice change.
    last_slice: Option<(usize, usize)>,
    fetch_error: Option<String>,
}

impl TuiApp<CrosstermBackend<Stdout>, BufReader<File>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        source: PagedRowSource<BufReader<File>>,
        config: &ResolvedConfig,
        colors: ColorConfig,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, source, config, colors))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). The first frame shows skeleton rows while the
    /// first page loads.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;
        self.load_first_page()?;

        loop {
            self.draw()?;
            if self.fetch_if_needed() {
                continue;
            }

            let timeout = self
                .activity
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
                .unwrap_or(IDLE_TICK);

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }

            self.tick(Instant::now());
        }
    }
}

impl<B, R> TuiApp<B, R>
where
    B: ratatui::backend::Backend,
    R: BufRead,
{
    fn with_terminal(
        terminal: Terminal<B>,
        source: PagedRowSource<R>,
        config: &ResolvedConfig,
        colors: ColorConfig,
    ) -> Self {
        let mut state = TableViewState::new(config.table_options());
        state.set_loading(true);

        let activity = use_is_scrolling(
            Some(TABLE_PANE),
            IsScrollingOptions {
                rest_delay: config.rest_delay(),
                on_is_scrolling_change: Some(Box::new(|scrolling| {
                    trace!(scrolling, "table scroll state");
                })),
            },
        );

        Self {
            terminal,
            state,
            source,
            key_bindings: KeyBindings::default(),
            activity,
            colors,
            column_names: Vec::new(),
            columns: ColumnLayout::default(),
            expanded: HashSet::new(),
            hovered: false,
            last_area: None,
            last_slice: None,
            fetch_error: None,
        }
    }

    fn load_first_page(&mut self) -> Result<(), TuiError> {
        let page = self.source.next_page()?;
        info!(rows = page.rows.len(), has_more = page.has_more, "first page loaded");
        self.absorb_page(page);
        self.state.set_loading(false);
        Ok(())
    }

    fn absorb_page(&mut self, page: Page) {
        for name in column_names(page.rows.iter().map(|row| row.payload())) {
            if !self.column_names.contains(&name) {
                self.column_names.push(name);
            }
        }
        self.state.append_rows(page.rows);
        self.state.set_cursor(if page.has_more {
            PaginationCursor::more_available()
        } else {
            PaginationCursor::complete()
        });
    }

    /// Request the next page if the last frame reached the loader row.
    ///
    /// The read is synchronous, so the cursor never stays in the fetching state past this
    /// call. Returns `true` if a page was read and the frame should be redrawn.
    fn fetch_if_needed(&mut self) -> bool {
        let source = &mut self.source;
        let mut fetched: Option<Page> = None;
        let decision = self.state.maybe_fetch_next_page(|| {
            fetched = Some(source.next_page()?);
            Ok::<(), InputError>(())
        });

        match decision {
            Ok(decision) => trace!(?decision, "pagination check"),
            Err(error) => {
                warn!(%error, "fetching next page failed");
                // stays latched until the user retries
                self.fetch_error = Some(error.to_string());
            }
        }

        let Some(page) = fetched else {
            return false;
        };
        let stalled = page.rows.is_empty() && page.has_more;
        self.absorb_page(page);
        if stalled {
            // every line was skipped: the row count keying the latch did not move
            debug!("page produced no rows, re-arming pagination");
            self.state.reset_pagination();
        }
        true
    }

    fn retry_fetch(&mut self) {
        if self.fetch_error.take().is_some() {
            info!("retrying next page");
            self.state.reset_pagination();
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        let page = self.state.window().viewport_height().max(1) as isize;
        match action {
            KeyAction::Quit => return true,
            KeyAction::ScrollDown => self.state.scroll_by(1),
            KeyAction::ScrollUp => self.state.scroll_by(-1),
            KeyAction::PageDown => self.state.scroll_by(page),
            KeyAction::PageUp => self.state.scroll_by(-page),
            KeyAction::ScrollToTop => self.state.back_to_top(),
            KeyAction::ScrollToBottom => self.state.set_scroll_offset(usize::MAX),
            KeyAction::NextRow => self.state.move_highlight(1),
            KeyAction::PrevRow => self.state.move_highlight(-1),
            KeyAction::ToggleExpand => self.toggle_expanded(),
            KeyAction::ToggleVirtualize => {
                let virtualize = !self.state.virtualize_rows();
                info!(virtualize, "row virtualization toggled");
                self.state.set_virtualize_rows(virtualize);
            }
            KeyAction::RetryFetch => self.retry_fetch(),
        }

        if action.is_scroll() {
            self.activity.handle_scroll(&TABLE_PANE, Instant::now());
        }
        false
    }

    fn toggle_expanded(&mut self) {
        let Some(id) = self.state.highlighted_row().cloned() else {
            return;
        };
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    /// Handle a single mouse event
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(area) = self.last_area else {
            return;
        };
        let position = Position::new(mouse.column, mouse.row);
        self.hovered = area.contains(position);
        if !self.hovered {
            return;
        }

        let scrolled = match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.state.scroll_by(WHEEL_STEP);
                true
            }
            MouseEventKind::ScrollUp => {
                self.state.scroll_by(-WHEEL_STEP);
                true
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let on_status_line = mouse.row + 1 == area.bottom();
                if on_status_line && self.state.show_back_to_top(true) {
                    self.state.back_to_top();
                    true
                } else {
                    false
                }
            }
            _ => false,
        };

        if scrolled {
            self.activity.handle_scroll(&TABLE_PANE, Instant::now());
        }
    }

    /// Terminal resized. The viewport is picked up on the next draw; the rest timer is left
    /// alone.
    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
    }

    /// Advance timers to `now`.
    fn tick(&mut self, now: Instant) {
        self.activity.poll(now);
        self.state.set_is_scrolling(self.activity.is_scrolling());
    }

    /// Plan, measure and re-plan until heights settle or the pass limit is hit.
    fn plan_frame(&mut self, width: u16) -> (RenderPlan, Vec<RenderedRow>) {
        let mut pass = 0;
        loop {
            let mut slice = None;
            let plan = self.state.render_pass(|changed| {
                slice = Some(changed.map(|s| (s.start.index, s.end.index)));
            });
            if let Some(slice) = slice {
                debug!(?slice, "visible slice changed");
                self.last_slice = slice;
            }

            if !plan.columns_locked || self.columns.is_empty() {
                self.columns = ColumnLayout::compute(&self.column_names, width);
            }
            let rows = build_rows(&plan, &self.state, &self.columns, &self.expanded, width);

            let mut changed = false;
            for row in rows.iter().filter(|row| row.is_measurable()) {
                let before = self.state.window().row_size(row.index);
                self.state.record_measurement(row.index, row.height);
                changed |= self.state.window().row_size(row.index) != before;
            }

            pass += 1;
            if !changed || pass >= MEASURE_PASSES {
                return (plan, rows);
            }
        }
    }

    fn status_line(&self) -> String {
        let mut status = format!(
            "{}{} rows | {}",
            self.state.len(),
            if self.state.cursor().has_next_page { "+" } else { "" },
            if self.state.virtualize_rows() {
                "virtualized"
            } else {
                "all rows"
            },
        );
        if let Some((first, last)) = self.last_slice {
            status.push_str(&format!(" | {}-{}", first, last));
        }
        if self.state.is_scrolling() {
            status.push_str(" | scrolling");
        }
        if let Some(error) = &self.fetch_error {
            status.push_str(&format!(" | {} (r to retry)", error));
        }
        status
    }

    /// Render one frame.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        self.last_area = Some(area);
        self.state.set_viewport_height(usize::from(body_height(area.height)));
        self.state.set_is_scrolling(self.activity.is_scrolling());

        let (plan, rows) = self.plan_frame(area.width);
        let status = self.status_line();
        let styles = TableStyles::from_tokens(plan.surface, self.colors);
        let back_to_top = self.state.show_back_to_top(self.hovered);
        let scroll_offset = self.state.scroll_offset();
        let columns = &self.columns;

        self.terminal.draw(|frame| {
            let view = TableView {
                plan: &plan,
                rows: &rows,
                columns,
                styles,
                scroll_offset,
                status: &status,
                back_to_top,
            };
            frame.render_widget(view, frame.area());
        })?;
        Ok(())
    }
}

// ===== Test Helpers =====
//
// Test-only accessors. DO NOT use these in production code.

#[cfg(any(test, feature = "bench-internals"))]
#[allow(dead_code)] // Not all helpers used in every context (tests vs benchmarks)
impl<B, R> TuiApp<B, R>
where
    B: ratatui::backend::Backend,
    R: BufRead,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Loads the first page immediately; no terminal setup.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        source: PagedRowSource<R>,
        config: &ResolvedConfig,
    ) -> Result<Self, TuiError> {
        let mut app = Self::with_terminal(terminal, source, config, ColorConfig::disabled());
        app.load_first_page()?;
        Ok(app)
    }

    pub(crate) fn state(&self) -> &TableViewState<Record> {
        &self.state
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    pub(crate) fn tick_test(&mut self, now: Instant) {
        self.tick(now)
    }

    pub(crate) fn fetch_test(&mut self) -> bool {
        self.fetch_if_needed()
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

// ===== Benchmark Helpers =====
//
// Public wrappers for benchmarks when bench-internals feature is enabled.

#[cfg(feature = "bench-internals")]
impl<B, R> TuiApp<B, R>
where
    B: ratatui::backend::Backend,
    R: BufRead,
{
    /// Create TuiApp for benchmarking. Delegates to new_for_test.
    pub fn new_for_bench(
        terminal: Terminal<B>,
        source: PagedRowSource<R>,
        config: &ResolvedConfig,
    ) -> Result<Self, TuiError> {
        Self::new_for_test(terminal, source, config)
    }

    /// Feed one key event. Returns `true` on quit.
    pub fn handle_key_bench(&mut self, key: KeyEvent) -> bool {
        self.handle_key_test(key)
    }

    /// Draw one frame.
    pub fn render_bench(&mut self) -> Result<(), TuiError> {
        self.render_test()
    }

    /// Run one pagination check.
    pub fn fetch_bench(&mut self) -> bool {
        self.fetch_test()
    }
}

/// Initialize and run the TUI application with a row source
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    source: PagedRowSource<BufReader<File>>,
    config: &ResolvedConfig,
    colors: ColorConfig,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(source, config, colors)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::io::Cursor;

    type TestApp = TuiApp<TestBackend, Cursor<Vec<u8>>>;

    fn jsonl(n: usize) -> String {
        (0..n)
            .map(|i| format!("{{\"id\":\"r{}\",\"name\":\"row {}\"}}\n", i, i))
            .collect()
    }

    fn config(page_size: usize) -> ResolvedConfig {
        ResolvedConfig {
            page_size,
            ..ResolvedConfig::default()
        }
    }

    fn create_test_app(text: &str, page_size: usize) -> TestApp {
        let terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let source = PagedRowSource::from_reader(Cursor::new(text.as_bytes().to_vec()), page_size);
        TuiApp::new_for_test(terminal, source, &config(page_size)).unwrap()
    }

    fn screen(app: &TestApp) -> String {
        let buffer = app.terminal().backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn handle_key_q_returns_true() {
        let mut app = create_test_app(&jsonl(3), 10);
        assert!(app.handle_key_test(key(KeyCode::Char('q'))));
    }

    #[test]
    fn handle_key_ctrl_c_returns_true() {
        let mut app = create_test_app(&jsonl(3), 10);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key_test(ctrl_c));
    }

    #[test]
    fn handle_key_other_returns_false() {
        let mut app = create_test_app(&jsonl(3), 10);
        assert!(!app.handle_key_test(key(KeyCode::Char('z'))));
    }

    #[test]
    fn first_page_renders_rows_and_header() {
        let mut app = create_test_app(&jsonl(3), 10);
        app.render_test().unwrap();
        let text = screen(&app);
        assert!(text.contains("id"));
        assert!(text.contains("name"));
        assert!(text.contains("row 2"));
        assert!(text.contains("3 rows"));
    }

    #[test]
    fn empty_input_shows_empty_message() {
        let mut app = create_test_app("", 10);
        app.render_test().unwrap();
        assert!(screen(&app).contains(crate::view_state::table::EMPTY_MESSAGE));
    }

    #[test]
    fn loader_row_fetches_next_page() {
        // 10 body lines, 5-row pages: the loader row is visible after the first page
        let mut app = create_test_app(&jsonl(12), 5);
        app.render_test().unwrap();
        assert!(screen(&app).contains(table::LOADER_TEXT));
        assert!(app.fetch_test());
        assert_eq!(app.state().len(), 10);
    }

    #[test]
    fn no_fetch_without_render() {
        let mut app = create_test_app(&jsonl(12), 5);
        assert!(!app.fetch_test());
        assert_eq!(app.state().len(), 5);
    }

    #[test]
    fn scroll_key_starts_scroll_activity() {
        let mut app = create_test_app(&jsonl(50), 100);
        app.render_test().unwrap();
        app.handle_key_test(key(KeyCode::Char('j')));
        assert!(app.activity.is_scrolling());
        assert_eq!(app.state().scroll_offset(), 1);

        app.tick_test(Instant::now() + Duration::from_secs(5));
        assert!(!app.activity.is_scrolling());
        assert!(!app.state().is_scrolling());
    }

    #[test]
    fn highlight_keys_do_not_start_scroll_activity() {
        let mut app = create_test_app(&jsonl(5), 10);
        app.render_test().unwrap();
        let ctrl_j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        app.handle_key_test(ctrl_j);
        assert!(!app.activity.is_scrolling());
        assert_eq!(app.state().highlighted_row().map(RowId::as_str), Some("r0"));
    }

    #[test]
    fn enter_expands_highlighted_row() {
        let mut app = create_test_app(&jsonl(5), 10);
        app.render_test().unwrap();
        app.handle_key_test(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL));
        app.handle_key_test(key(KeyCode::Enter));
        app.render_test().unwrap();
        // row + "{", id, name, "}"
        assert_eq!(app.state().window().row_size(0), Some(5));
        assert!(screen(&app).contains("\"name\": \"row 0\""));

        app.handle_key_test(key(KeyCode::Enter));
        app.render_test().unwrap();
        assert_eq!(app.state().window().row_size(0), Some(1));
    }

    #[test]
    fn toggle_virtualize_key() {
        let mut app = create_test_app(&jsonl(5), 10);
        assert!(app.state().virtualize_rows());
        app.handle_key_test(key(KeyCode::Char('v')));
        assert!(!app.state().virtualize_rows());
        app.render_test().unwrap();
        assert!(screen(&app).contains("all rows"));
    }

    #[test]
    fn mouse_wheel_scrolls_inside_table() {
        let mut app = create_test_app(&jsonl(50), 100);
        app.render_test().unwrap();
        app.handle_mouse_test(mouse(MouseEventKind::ScrollDown, 5, 5));
        assert_eq!(app.state().scroll_offset(), 3);
        assert!(app.activity.is_scrolling());
    }

    #[test]
    fn back_to_top_hint_needs_hover_and_distance() {
        let mut app = create_test_app(&jsonl(200), 200);
        app.render_test().unwrap();
        for _ in 0..20 {
            app.handle_mouse_test(mouse(MouseEventKind::ScrollDown, 5, 5));
        }
        app.render_test().unwrap();
        assert!(screen(&app).contains(BACK_TO_TOP_HINT));

        // click on the status line
        app.handle_mouse_test(mouse(MouseEventKind::Down(MouseButton::Left), 35, 11));
        assert_eq!(app.state().scroll_offset(), 0);
    }

    #[test]
    fn page_of_malformed_lines_does_not_stall_loading() {
        let mut text = jsonl(5);
        text.push_str(&"not json\n".repeat(5));
        text.extend((5..10).map(|i| format!("{{\"id\":\"r{}\"}}\n", i)));
        let mut app = create_test_app(&text, 5);

        for _ in 0..10 {
            app.render_test().unwrap();
            app.fetch_test();
        }
        assert_eq!(app.state().len(), 10);
        assert_eq!(app.state().row(9).map(|row| row.id().as_str()), Some("r9"));
        assert!(!app.state().cursor().has_next_page);
    }

    /// Fails exactly once, on the second read at or past `fail_at`.
    struct HiccupReader {
        inner: Cursor<Vec<u8>>,
        fail_at: u64,
        hits: usize,
    }

    impl HiccupReader {
        fn check(&mut self) -> io::Result<()> {
            if self.inner.position() >= self.fail_at {
                self.hits += 1;
                if self.hits == 2 {
                    return Err(io::Error::other("disk hiccup"));
                }
            }
            Ok(())
        }
    }

    impl io::Read for HiccupReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.check()?;
            io::Read::read(&mut self.inner, buf)
        }
    }

    impl BufRead for HiccupReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            self.check()?;
            self.inner.fill_buf()
        }
        fn consume(&mut self, amount: usize) {
            self.inner.consume(amount)
        }
    }

    #[test]
    fn retry_key_rearms_after_failed_read() {
        let reader = HiccupReader {
            inner: Cursor::new(jsonl(12).into_bytes()),
            fail_at: jsonl(5).len() as u64,
            hits: 0,
        };
        let terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let source = PagedRowSource::from_reader(reader, 5);
        let mut app = TuiApp::new_for_test(terminal, source, &config(5)).unwrap();

        app.render_test().unwrap();
        assert!(!app.fetch_test());
        assert!(app.fetch_error.is_some());

        // no automatic retry
        app.render_test().unwrap();
        assert!(!app.fetch_test());
        assert_eq!(app.state().len(), 5);

        app.handle_key_test(key(KeyCode::Char('r')));
        assert!(app.fetch_error.is_none());
        app.render_test().unwrap();
        assert!(app.fetch_test());
        assert_eq!(app.state().len(), 10);
    }

    #[test]
    fn first_page_read_error_propagates() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk gone"))
            }
        }
        impl BufRead for Broken {
            fn fill_buf(&mut self) -> io::Result<&[u8]> {
                Err(io::Error::other("disk gone"))
            }
            fn consume(&mut self, _: usize) {}
        }

        let terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let source = PagedRowSource::from_reader(Broken, 5);
        let Err(err) = TuiApp::new_for_test(terminal, source, &config(5)) else {
            panic!("expected the first page to fail");
        };
        assert!(matches!(err, TuiError::Input(InputError::Io(_))));
    }
}
