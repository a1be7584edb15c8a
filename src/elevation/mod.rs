//! Elevation - nesting depth used to pick contrasting surfaces
//!
//! Containers raise the level of everything inside them so nested surfaces stay
//! distinguishable from their parent. The level is an explicit value threaded down the
//! render call chain through [`ElevationScope`]; nothing reads it from global state.
//!
//! # Module Structure
//!
//! - `level`: `ElevationLevel` (0..=3), `TableElevation` (0..=2) and the clamp functions
//! - `scope`: `ElevationScope` - read/provide/container rules
//! - `surface`: token names per level for generic containers and tables

pub mod level;
pub mod scope;
pub mod surface;

pub use level::{clamp_level, clamp_table_level, ElevationLevel, TableElevation};
pub use scope::ElevationScope;
pub use surface::{SurfaceTokens, TableSurfaceTokens};
