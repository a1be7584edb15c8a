//! gridwin
//!
//! Windowed table rendering: only the rows inside the viewport (plus overscan) are
//! materialized, heights are measured as rows are drawn, and the next page is requested
//! when the window reaches the loader row.
//!
//! The library follows a Pure Core / Impure Shell split. `elevation`, `model` and
//! `view_state` are host-independent; `source`, `view` and `logging` do the I/O for the
//! bundled terminal host.

pub mod config;
pub mod elevation;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod view;
pub mod view_state;

// Re-export main loop integration
pub mod integration;
