//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Scroll the table up by one row height. Default: k/↑
    ScrollUp,
    /// Scroll the table down by one row height. Default: j/↓
    ScrollDown,
    /// Scroll up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first row. Default: g/Home
    ScrollToTop,
    /// Jump to the last loaded row. Default: G/End
    ScrollToBottom,
    /// Move the highlight to the next row. Default: Ctrl+j
    NextRow,
    /// Move the highlight to the previous row. Default: Ctrl+k
    PrevRow,
    /// Show or hide the highlighted row's expanded details. Default: Enter
    ToggleExpand,
    /// Toggle row virtualization on and off. Default: v
    ToggleVirtualize,
    /// Try the next page again after a failed read. Default: r
    RetryFetch,
    /// Quit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether this action moves the scroll container (and so counts as scroll activity).
    pub fn is_scroll(&self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::ScrollToTop
                | KeyAction::ScrollToBottom
        )
    }
}
