//! View-state layer - windowing, measurement, and per-render decisions
//!
//! Everything here is host-independent: no terminal, no clock of its own. Hosts feed in
//! viewport sizes, scroll offsets, measurements, and instants, and draw what comes out.
//!
//! # Module Structure
//!
//! - `types`: RowKey
//! - `height_index`: HeightIndex - O(log n) prefix sums via Fenwick tree
//! - `measure`: row height measurement with the children-range fallback
//! - `window`: RowWindow - which rows to materialize
//! - `slice`: VirtualSlice and boundary change notification
//! - `scroll_activity`: debounced is-scrolling detector
//! - `pagination`: next-page request coordination
//! - `table`: TableViewState - composes the above into a RenderPlan

pub mod height_index;
pub mod measure;
pub mod pagination;
pub mod scroll_activity;
pub mod slice;
pub mod table;
pub mod types;
pub mod window;

pub use measure::{measure_element_height, LayoutNode, MeasureStrategy, TwoTierMeasure};
pub use pagination::{FetchDecision, PaginationCoordinator};
pub use scroll_activity::{use_is_scrolling, IsScrollingOptions, ScrollActivity, ScrollState};
pub use slice::{use_on_virtual_slice_change, SliceChangeNotifier, VirtualSlice};
pub use table::{PlannedRow, PlannedRowKind, RenderPlan, RowBackground, TableOptions, TableViewState};
pub use types::RowKey;
pub use window::{Align, RowWindow, VirtualRow, WindowOptions};
