//! Table styling: theme token names to terminal colors.
//!
//! The view-state layer only knows token names (`fill-two`, `fill-two-hover`, ...). This is
//! the one place they become colors.

use crate::elevation::TableSurfaceTokens;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colors off; highlight falls back to reverse video.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Token palette =====

/// Terminal color for a theme token. Unknown tokens map to `Color::Reset`.
pub fn token_color(token: &str) -> Color {
    match token {
        "fill-zero" => Color::Rgb(0x17, 0x1a, 0x21),
        "fill-one" => Color::Rgb(0x1c, 0x20, 0x27),
        "fill-one-hover" => Color::Rgb(0x21, 0x25, 0x2d),
        "fill-one-selected" => Color::Rgb(0x2a, 0x2e, 0x37),
        "fill-two" => Color::Rgb(0x21, 0x25, 0x2d),
        "fill-two-hover" => Color::Rgb(0x2a, 0x2e, 0x37),
        "fill-two-selected" => Color::Rgb(0x30, 0x34, 0x3d),
        "fill-three" => Color::Rgb(0x2a, 0x2e, 0x37),
        "fill-three-hover" => Color::Rgb(0x30, 0x34, 0x3d),
        "fill-three-selected" => Color::Rgb(0x3c, 0x40, 0x4a),
        "border" => Color::Rgb(0x2a, 0x2e, 0x37),
        "border-fill-two" => Color::Rgb(0x3c, 0x40, 0x4a),
        "border-fill-three" => Color::Rgb(0x4a, 0x4e, 0x58),
        _ => Color::Reset,
    }
}

// ===== TableStyles =====

/// Resolved styles for one render of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyles {
    /// Flat rows.
    pub body: Style,
    /// Raised (striped) rows.
    pub raised_row: Style,
    /// Highlighted row.
    pub highlighted_row: Style,
    /// Header line and the back-to-top hint.
    pub header: Style,
    /// Borders and the expander gutter.
    pub border: Style,
    /// Status line, loader and empty message.
    pub muted: Style,
}

impl TableStyles {
    /// Styles for the given surface tokens.
    ///
    /// Without colors the highlight falls back to reverse video so it stays visible.
    pub fn from_tokens(tokens: TableSurfaceTokens, colors: ColorConfig) -> Self {
        let header = Style::default().add_modifier(Modifier::BOLD);
        if !colors.colors_enabled() {
            return Self {
                body: Style::default(),
                raised_row: Style::default(),
                highlighted_row: Style::default().add_modifier(Modifier::REVERSED),
                header,
                border: Style::default(),
                muted: Style::default(),
            };
        }

        Self {
            body: Style::default().bg(token_color(tokens.background)),
            raised_row: Style::default().bg(token_color(tokens.raised_row)),
            highlighted_row: Style::default().bg(token_color(tokens.highlighted_cell)),
            header: header.bg(token_color(tokens.background)),
            border: Style::default().fg(token_color(tokens.border)),
            muted: Style::default().fg(Color::DarkGray),
        }
    }

    /// Style of a row given its flags. Highlight wins over raised.
    pub fn row(&self, raised: bool, highlighted: bool) -> Style {
        if highlighted {
            self.highlighted_row
        } else if raised {
            self.raised_row
        } else {
            self.body
        }
    }
}

// ===== Tests =====
