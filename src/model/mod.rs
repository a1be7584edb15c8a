//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod key_action;
pub mod pagination;
pub mod record;
pub mod row;

pub use error::{InputError, ParseError};
pub use key_action::KeyAction;
pub use pagination::PaginationCursor;
pub use record::{cell_text, column_names, Record};
pub use row::{InvalidRowId, RowDescriptor, RowId};
