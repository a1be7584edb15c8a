//! Theme token names per elevation level
//!
//! Only token names live here; hosts resolve them to concrete colors.

use super::level::{ElevationLevel, TableElevation};

/// Tokens for a generic raised container (cards, panels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceTokens {
    /// Container fill.
    pub background: &'static str,
    /// Container outline.
    pub border: &'static str,
    /// Fill under the pointer.
    pub hover: &'static str,
    /// Fill of a selected item.
    pub selected: &'static str,
}

impl SurfaceTokens {
    /// Tokens for a container at `level`. Level 0 shares level 1's fills, since a
    /// container is never flush with the page.
    pub fn for_level(level: ElevationLevel) -> Self {
        match level.get() {
            0 | 1 => Self {
                background: "fill-one",
                border: "border",
                hover: "fill-one-hover",
                selected: "fill-one-selected",
            },
            2 => Self {
                background: "fill-two",
                border: "border-fill-two",
                hover: "fill-two-hover",
                selected: "fill-two-selected",
            },
            _ => Self {
                background: "fill-three",
                border: "border-fill-three",
                hover: "fill-three-hover",
                selected: "fill-three-selected",
            },
        }
    }
}

/// Tokens for a table surface and its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSurfaceTokens {
    /// Table fill.
    pub background: &'static str,
    /// Outline and row separators.
    pub border: &'static str,
    /// Background of raised (striped) rows.
    pub raised_row: &'static str,
    /// Background of the highlighted row and the expander border.
    pub highlighted_cell: &'static str,
}

impl TableSurfaceTokens {
    /// A table sits one fill above the surface it is placed on.
    pub fn for_level(level: TableElevation) -> Self {
        match level.get() {
            0 => Self {
                background: "fill-one",
                border: "border",
                raised_row: "fill-one-hover",
                highlighted_cell: "fill-one-selected",
            },
            1 => Self {
                background: "fill-two",
                border: "border-fill-two",
                raised_row: "fill-two-hover",
                highlighted_cell: "fill-two-selected",
            },
            _ => Self {
                background: "fill-three",
                border: "border-fill-three",
                raised_row: "fill-three-hover",
                highlighted_cell: "fill-three-selected",
            },
        }
    }
}
